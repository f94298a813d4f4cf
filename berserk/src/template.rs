use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}

impl DigestAlgorithm {
    pub fn digest_length(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DigestAlgorithm::Sha1 => write!(f, "SHA-1"),
            DigestAlgorithm::Sha256 => write!(f, "SHA-256"),
        }
    }
}

/// Byte windows a lax verifier inspects in a decoded signature of `bit_length` bits.
///
/// From the end: the raw digest, `suffix` right before it, `middle_gap` unchecked bytes,
/// then `middle`. `prefix` sits at offset 0. Everything else is unchecked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DigestInfoTemplate {
    pub bit_length: usize,
    pub digest_length: usize,
    pub prefix: Cow<'static, [u8]>,
    pub middle: Cow<'static, [u8]>,
    pub middle_gap: usize,
    pub suffix: Cow<'static, [u8]>,
}

/// Offsets derived from a template. `size` is the signature length in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub size: usize,
    pub prefix_end: usize,
    pub middle_offset: usize,
    pub middle_end: usize,
    pub suffix_offset: usize,
    pub digest_offset: usize,
}

impl Layout {
    //Bytes from the start of `middle` to the end of the signature
    pub fn low_window(&self) -> usize {
        self.size - self.middle_offset
    }

    pub fn gap_len(&self) -> usize {
        (self.middle_offset - self.prefix_end) + (self.suffix_offset - self.middle_end)
    }
}

impl DigestInfoTemplate {
    pub fn size(&self) -> usize {
        self.bit_length / 8
    }

    pub fn layout(&self) -> Result<Layout> {
        let size = self.size();
        let needed = self.prefix.len()
            + self.middle.len()
            + self.middle_gap
            + self.suffix.len()
            + self.digest_length;
        if needed > size || self.bit_length % 8 != 0 {
            return Err(ForgeError::Overflow {
                needed,
                available: size,
            });
        }
        let digest_offset = size - self.digest_length;
        let suffix_offset = digest_offset - self.suffix.len();
        let middle_end = suffix_offset - self.middle_gap;
        let middle_offset = middle_end - self.middle.len();
        Ok(Layout {
            size,
            prefix_end: self.prefix.len(),
            middle_offset,
            middle_end,
            suffix_offset,
            digest_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(prefix: usize, middle: usize, gap: usize, suffix: usize) -> DigestInfoTemplate {
        DigestInfoTemplate {
            bit_length: 2048,
            digest_length: 20,
            prefix: vec![1; prefix].into(),
            middle: vec![2; middle].into(),
            middle_gap: gap,
            suffix: vec![3; suffix].into(),
        }
    }

    #[test]
    fn offsets() {
        let layout = template(13, 6, 5, 15).layout().unwrap();
        assert_eq!(layout.size, 256);
        assert_eq!(layout.digest_offset, 236);
        assert_eq!(layout.suffix_offset, 221);
        assert_eq!(layout.middle_end, 216);
        assert_eq!(layout.middle_offset, 210);
        assert_eq!(layout.low_window(), 46);
        assert_eq!(layout.gap_len(), 197 + 5);
    }

    #[test]
    fn windows_fill_signature_exactly() {
        let layout = template(100, 100, 1, 35).layout().unwrap();
        assert_eq!(layout.middle_offset, layout.prefix_end);
        assert_eq!(layout.gap_len(), 1);
    }

    #[test]
    fn windows_exceed_signature() {
        assert_eq!(
            template(100, 100, 2, 35).layout(),
            Err(ForgeError::Overflow {
                needed: 257,
                available: 256
            })
        );
    }

    #[test]
    fn display() {
        assert_eq!(DigestAlgorithm::Sha256.to_string(), "SHA-256");
        assert_eq!(DigestAlgorithm::Sha1.digest_length(), 20);
    }
}
