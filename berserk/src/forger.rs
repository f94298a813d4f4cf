use bignum::BigNumTrait;
use rand::RngCore;
use rsa::RsaPublic;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::ForgeConfig;
use crate::errors::*;
use crate::registry::TemplateRegistry;
use crate::root;
use crate::target::ForgeTarget;
use crate::template::{DigestAlgorithm, DigestInfoTemplate, Layout};
use crate::validate::{validate, Verdict};

/// The two public-key values a forger needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModulusDescriptor {
    pub bit_length: usize,
    pub public_exponent: u64,
}

impl ModulusDescriptor {
    pub fn new(bit_length: usize, public_exponent: u64) -> Self {
        ModulusDescriptor {
            bit_length,
            public_exponent,
        }
    }

    pub fn from_public<T: BigNumTrait>(key: &RsaPublic<T>) -> Result<Self> {
        let public_exponent = key
            .e()
            .to_u64()
            .ok_or_else(|| ForgeError::UnsupportedExponent(key.e().to_dec_str()))?;
        Ok(ModulusDescriptor {
            bit_length: key.bits(),
            public_exponent,
        })
    }
}

/// Forges signatures for one modulus size. Holds no key material and no mutable state,
/// so a single forger can be shared between threads.
#[derive(Clone, Debug)]
pub struct Forger<'r> {
    bit_length: usize,
    config: ForgeConfig,
    registry: &'r TemplateRegistry,
}

impl Forger<'static> {
    /// Binds to `modulus` using the built-in templates and the default retry limit.
    pub fn bind(modulus: ModulusDescriptor) -> Result<Self> {
        Forger::bind_with(modulus, TemplateRegistry::builtin()?, ForgeConfig::default())
    }
}

impl<'r> Forger<'r> {
    pub fn bind_with(
        modulus: ModulusDescriptor,
        registry: &'r TemplateRegistry,
        config: ForgeConfig,
    ) -> Result<Self> {
        if modulus.public_exponent != 3 {
            return Err(ForgeError::UnsupportedExponent(
                modulus.public_exponent.to_string(),
            ));
        }
        Ok(Forger {
            bit_length: modulus.bit_length,
            config,
            registry,
        })
    }

    pub fn with_config(self, config: ForgeConfig) -> Self {
        Forger { config, ..self }
    }

    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Forges a signature for `digest`, retrying internally up to the configured limit.
    #[instrument(level = "debug", skip(self, rng, digest), fields(bits = self.bit_length))]
    pub fn sign<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        digest: &[u8],
        algorithm: DigestAlgorithm,
    ) -> Result<Vec<u8>> {
        let template = self.registry.lookup(algorithm, self.bit_length)?;
        self.forge(rng, template, digest)
    }

    /// A single attempt. A miss is `Err(ForgeError::Retryable)` and the caller decides whether
    /// to try again.
    pub fn sign_once<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        digest: &[u8],
        algorithm: DigestAlgorithm,
    ) -> Result<Vec<u8>> {
        let template = self.registry.lookup(algorithm, self.bit_length)?;
        self.plan(template, digest)?.run(rng)
    }

    /// Like `sign`, against a template that need not be registered.
    pub fn sign_with_template<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        digest: &[u8],
        template: &DigestInfoTemplate,
    ) -> Result<Vec<u8>> {
        self.forge(rng, template, digest)
    }

    fn plan<'a>(
        &self,
        template: &'a DigestInfoTemplate,
        digest: &'a [u8],
    ) -> Result<Attempt<'a>> {
        if template.bit_length != self.bit_length {
            return Err(ForgeError::ModulusMismatch {
                template_bits: template.bit_length,
                modulus_bits: self.bit_length,
            });
        }
        Attempt::new(template, digest)
    }

    fn forge<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        template: &DigestInfoTemplate,
        digest: &[u8],
    ) -> Result<Vec<u8>> {
        let attempt = self.plan(template, digest)?;
        let mut attempts = 0u32;
        loop {
            attempts = attempts.saturating_add(1);
            let err = match attempt.run(rng) {
                Ok(signature) => {
                    debug!(attempts, "forged signature");
                    return Ok(signature);
                }
                Err(err) => err,
            };
            match err.failure() {
                ForgeFailure::Permanent(_) => return Err(err),
                ForgeFailure::Retryable => {
                    if self.config.exhausted(attempts) {
                        warn!(attempts, "giving up, no candidate matched the template");
                        return Err(ForgeError::ExhaustedRetries { attempts });
                    }
                }
            }
        }
    }
}

//Everything about one forge that does not depend on randomness
struct Attempt<'a> {
    template: &'a DigestInfoTemplate,
    layout: Layout,
    digest: &'a [u8],
}

impl<'a> Attempt<'a> {
    fn new(template: &'a DigestInfoTemplate, digest: &'a [u8]) -> Result<Self> {
        if digest.len() != template.digest_length {
            return Err(ForgeError::WrongDigestLength {
                expected: template.digest_length,
                actual: digest.len(),
            });
        }
        let layout = template.layout()?;
        //Everything after the last random byte is fixed
        let tail = if template.middle_gap == 0 {
            [&template.middle[..], &template.suffix[..], digest].concat()
        } else {
            [&template.suffix[..], digest].concat()
        };
        if root::tail_reachable(&tail) == Some(false) {
            return Err(ForgeError::NoCubeRoot);
        }
        Ok(Attempt {
            template,
            layout,
            digest,
        })
    }

    fn run<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let target = ForgeTarget::assemble(rng, self.template, &self.layout, self.digest);
        let candidate = match root::candidate_root(target.as_bytes(), self.layout.low_window()) {
            Some(candidate) => candidate,
            None => {
                debug!("gap bytes left the low window without a cube root");
                return Err(ForgeError::Retryable);
            }
        };
        match validate(&candidate, self.template, self.digest)? {
            Verdict::Match => candidate
                .to_bytes_be_padded(self.layout.size)
                .ok_or(ForgeError::Overflow {
                    needed: candidate.bytes(),
                    available: self.layout.size,
                }),
            Verdict::Mismatch(window) => {
                debug!(?window, "cube missed a template window");
                Err(ForgeError::Retryable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bignum::BigUint;
    use std::borrow::Cow;

    #[test]
    fn descriptor_from_key() {
        let key = RsaPublic::new(BigUint::from_u32(0xffff_fffb), BigUint::from_u32(3));
        assert_eq!(
            ModulusDescriptor::from_public(&key),
            Ok(ModulusDescriptor::new(32, 3))
        );
        let key = RsaPublic::new(BigUint::from_u32(187), BigUint::one().lsh(100));
        assert_eq!(
            ModulusDescriptor::from_public(&key),
            Err(ForgeError::UnsupportedExponent(
                "1267650600228229401496703205376".to_string()
            ))
        );
    }

    #[test]
    fn mismatched_template_size() {
        let forger = Forger::bind(ModulusDescriptor::new(4096, 3)).unwrap();
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        assert_eq!(
            forger.sign_with_template(&mut rng, &[1; 20], &crate::registry::RSA2048_SHA1),
            Err(ForgeError::ModulusMismatch {
                template_bits: 2048,
                modulus_bits: 4096,
            })
        );
    }

    #[test]
    fn unreachable_digest_is_permanent() {
        let forger = Forger::bind(ModulusDescriptor::new(2048, 3)).unwrap();
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let mut digest = [0u8; 20];
        digest[19] = 2;
        assert_eq!(
            forger.sign(&mut rng, &digest, DigestAlgorithm::Sha1),
            Err(ForgeError::NoCubeRoot)
        );
    }

    #[test]
    fn middle_counts_towards_the_fixed_tail() {
        // Without a middle gap, `middle` sets the valuation: 02 || 00 * 21 has 169 trailing zeros
        let template = DigestInfoTemplate {
            bit_length: 2048,
            digest_length: 20,
            prefix: Cow::Borrowed(&[0x00, 0x01]),
            middle: Cow::Borrowed(&[0x02]),
            middle_gap: 0,
            suffix: Cow::Borrowed(&[0x00]),
        };
        let forger = Forger::bind(ModulusDescriptor::new(2048, 3))
            .unwrap()
            .with_config(ForgeConfig::unbounded());
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        assert_eq!(
            forger.sign_with_template(&mut rng, &[0; 20], &template),
            Err(ForgeError::NoCubeRoot)
        );

        // With a gap, the same bytes leave the valuation to the random draw
        let template = DigestInfoTemplate {
            middle_gap: 4,
            ..template
        };
        assert!(Attempt::new(&template, &[0; 20]).is_ok());
    }
}
