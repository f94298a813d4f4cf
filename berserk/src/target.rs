use rand::RngCore;

use crate::template::{DigestInfoTemplate, Layout};

/// The integer one attempt tries to hit, as `size` big-endian bytes: the template windows,
/// the digest at the end and fresh random bytes in every gap.
pub struct ForgeTarget {
    bytes: Vec<u8>,
}

impl ForgeTarget {
    //`digest` must have the template's digest length and `layout` must come from `template`.
    pub fn assemble<R: RngCore + ?Sized>(
        rng: &mut R,
        template: &DigestInfoTemplate,
        layout: &Layout,
        digest: &[u8],
    ) -> Self {
        let mut bytes = vec![0u8; layout.size];
        bytes[..layout.prefix_end].copy_from_slice(&template.prefix);
        fill(rng, &mut bytes[layout.prefix_end..layout.middle_offset]);
        bytes[layout.middle_offset..layout.middle_end].copy_from_slice(&template.middle);
        fill(rng, &mut bytes[layout.middle_end..layout.suffix_offset]);
        bytes[layout.suffix_offset..layout.digest_offset].copy_from_slice(&template.suffix);
        bytes[layout.digest_offset..].copy_from_slice(digest);
        ForgeTarget { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn fill<R: RngCore + ?Sized>(rng: &mut R, gap: &mut [u8]) {
    if !gap.is_empty() {
        rng.fill_bytes(gap);
    }
}
