use bignum::{BigNumTrait, BigUint};

use crate::errors::*;
use crate::template::DigestInfoTemplate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    Prefix,
    Middle,
    Suffix,
    Digest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Match,
    //The first window that differs
    Mismatch(Window),
}

/// Cubes `candidate` without reduction and compares the four template windows, and nothing
/// else, against the template and `digest`.
pub fn validate(
    candidate: &BigUint,
    template: &DigestInfoTemplate,
    digest: &[u8],
) -> Result<Verdict> {
    if digest.len() != template.digest_length {
        return Err(ForgeError::WrongDigestLength {
            expected: template.digest_length,
            actual: digest.len(),
        });
    }
    let layout = template.layout()?;
    let cube = candidate.power(3);
    let rendered = cube
        .to_bytes_be_padded(layout.size)
        .ok_or(ForgeError::Overflow {
            needed: cube.bytes(),
            available: layout.size,
        })?;

    let windows = [
        (Window::Prefix, 0, &template.prefix[..]),
        (Window::Middle, layout.middle_offset, &template.middle[..]),
        (Window::Suffix, layout.suffix_offset, &template.suffix[..]),
        (Window::Digest, layout.digest_offset, digest),
    ];
    for &(window, offset, expected) in &windows {
        if &rendered[offset..offset + expected.len()] != expected {
            return Ok(Verdict::Mismatch(window));
        }
    }
    Ok(Verdict::Match)
}
