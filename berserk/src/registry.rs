use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::errors::*;
use crate::template::{DigestAlgorithm, DigestInfoTemplate};

// 00 01 FF..FF 00, then a DigestInfo SEQUENCE whose long-form length runs into the gap.
// The verifier reads only the trailing length bytes, which open `middle`.
const PKCS1_PREFIX: [u8; 13] = [
    0x00, 0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x30, 0xd9,
];

// End of the outer length, then the AlgorithmIdentifier SEQUENCE with a 9-byte length
// whose first `middle_gap` bytes are skipped.
const SHA1_MIDDLE: [u8; 6] = [0x00, 0x00, 0x00, 0x21, 0x30, 0x89];
const SHA256_MIDDLE: [u8; 6] = [0x00, 0x00, 0x00, 0x31, 0x30, 0x89];
const LENGTH_GAP: usize = 5;

const SHA1_SUFFIX: [u8; 15] = [
    0x00, 0x00, 0x00, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
];
const SHA256_SUFFIX: [u8; 19] = [
    0x00, 0x00, 0x00, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

pub static RSA2048_SHA1: DigestInfoTemplate = DigestInfoTemplate {
    bit_length: 2048,
    digest_length: 20,
    prefix: Cow::Borrowed(&PKCS1_PREFIX),
    middle: Cow::Borrowed(&SHA1_MIDDLE),
    middle_gap: LENGTH_GAP,
    suffix: Cow::Borrowed(&SHA1_SUFFIX),
};

pub static RSA4096_SHA1: DigestInfoTemplate = DigestInfoTemplate {
    bit_length: 4096,
    digest_length: 20,
    prefix: Cow::Borrowed(&PKCS1_PREFIX),
    middle: Cow::Borrowed(&SHA1_MIDDLE),
    middle_gap: LENGTH_GAP,
    suffix: Cow::Borrowed(&SHA1_SUFFIX),
};

pub static RSA2048_SHA256: DigestInfoTemplate = DigestInfoTemplate {
    bit_length: 2048,
    digest_length: 32,
    prefix: Cow::Borrowed(&PKCS1_PREFIX),
    middle: Cow::Borrowed(&SHA256_MIDDLE),
    middle_gap: LENGTH_GAP,
    suffix: Cow::Borrowed(&SHA256_SUFFIX),
};

pub static RSA4096_SHA256: DigestInfoTemplate = DigestInfoTemplate {
    bit_length: 4096,
    digest_length: 32,
    prefix: Cow::Borrowed(&PKCS1_PREFIX),
    middle: Cow::Borrowed(&SHA256_MIDDLE),
    middle_gap: LENGTH_GAP,
    suffix: Cow::Borrowed(&SHA256_SUFFIX),
};

static BUILTIN: Lazy<Result<TemplateRegistry>> = Lazy::new(|| {
    TemplateRegistry::new(vec![
        (DigestAlgorithm::Sha1, RSA2048_SHA1.clone()),
        (DigestAlgorithm::Sha1, RSA4096_SHA1.clone()),
        (DigestAlgorithm::Sha256, RSA2048_SHA256.clone()),
        (DigestAlgorithm::Sha256, RSA4096_SHA256.clone()),
    ])
});

/// Immutable map from (digest algorithm, modulus bits) to a template.
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: HashMap<(DigestAlgorithm, usize), DigestInfoTemplate>,
}

impl TemplateRegistry {
    /// Builds a registry, rejecting duplicate keys and templates whose windows do not fit
    /// or whose digest length disagrees with the algorithm.
    pub fn new<I>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DigestAlgorithm, DigestInfoTemplate)>,
    {
        let mut map = HashMap::new();
        for (algorithm, template) in templates {
            template.layout()?;
            if template.digest_length != algorithm.digest_length() {
                return Err(ForgeError::WrongDigestLength {
                    expected: algorithm.digest_length(),
                    actual: template.digest_length,
                });
            }
            let key = (algorithm, template.bit_length);
            if map.insert(key, template).is_some() {
                return Err(ForgeError::DuplicateTemplate {
                    algorithm,
                    bit_length: key.1,
                });
            }
        }
        Ok(TemplateRegistry { templates: map })
    }

    /// The templates shipped with the crate, built on first use.
    pub fn builtin() -> Result<&'static TemplateRegistry> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    pub fn lookup(
        &self,
        algorithm: DigestAlgorithm,
        bit_length: usize,
    ) -> Result<&DigestInfoTemplate> {
        self.templates
            .get(&(algorithm, bit_length))
            .ok_or(ForgeError::UnsupportedCombination {
                algorithm,
                bit_length,
            })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DigestAlgorithm, &DigestInfoTemplate)> {
        self.templates
            .iter()
            .map(|(&(algorithm, _), template)| (algorithm, template))
    }
}
