use crate::template::DigestAlgorithm;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForgeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForgeError {
    #[error("public exponent {0} is not 3")]
    UnsupportedExponent(String),

    #[error("no template for {algorithm} with a {bit_length}-bit modulus")]
    UnsupportedCombination {
        algorithm: DigestAlgorithm,
        bit_length: usize,
    },

    #[error("template for {template_bits}-bit signatures used with a {modulus_bits}-bit modulus")]
    ModulusMismatch {
        template_bits: usize,
        modulus_bits: usize,
    },

    #[error("template for {algorithm} registered twice for {bit_length}-bit moduli")]
    DuplicateTemplate {
        algorithm: DigestAlgorithm,
        bit_length: usize,
    },

    #[error("digest is {actual} bytes, expected {expected}")]
    WrongDigestLength { expected: usize, actual: usize },

    #[error("no cube ends in this suffix and digest")]
    NoCubeRoot,

    #[error("forged cube missed the template, retry with fresh randomness")]
    Retryable,

    #[error("needs {needed} bytes, signature has {available}")]
    Overflow { needed: usize, available: usize },

    #[error("no match after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PermanentKind {
    UnsupportedExponent,
    UnsupportedCombination,
    ModulusMismatch,
    DuplicateTemplate,
    WrongDigestLength,
    NoCubeRoot,
    Overflow,
    ExhaustedRetries,
}

//How a retry loop has to treat an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForgeFailure {
    Retryable,
    Permanent(PermanentKind),
}

impl ForgeError {
    pub fn failure(&self) -> ForgeFailure {
        use self::ForgeFailure::Permanent;
        match *self {
            ForgeError::Retryable => ForgeFailure::Retryable,
            ForgeError::UnsupportedExponent(_) => Permanent(PermanentKind::UnsupportedExponent),
            ForgeError::UnsupportedCombination { .. } => {
                Permanent(PermanentKind::UnsupportedCombination)
            }
            ForgeError::ModulusMismatch { .. } => Permanent(PermanentKind::ModulusMismatch),
            ForgeError::DuplicateTemplate { .. } => Permanent(PermanentKind::DuplicateTemplate),
            ForgeError::WrongDigestLength { .. } => Permanent(PermanentKind::WrongDigestLength),
            ForgeError::NoCubeRoot => Permanent(PermanentKind::NoCubeRoot),
            ForgeError::Overflow { .. } => Permanent(PermanentKind::Overflow),
            ForgeError::ExhaustedRetries { .. } => Permanent(PermanentKind::ExhaustedRetries),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.failure() == ForgeFailure::Retryable
    }
}
