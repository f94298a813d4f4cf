// The low window of the cube is solved exactly mod 2^(8K) and spliced under the plain cube root

use bignum::{BigNumTrait, BigUint};

/// Largest `r` with `r^3 <= target`, by Newton iteration.
pub fn cube_root(target: &BigUint) -> BigUint {
    target.root(3).0
}

/// Some `l < 2^(8 * bytes)` with `l^3 = tail mod 2^(8 * bytes)`, if one exists.
pub fn tail_root(tail: &BigUint, bytes: usize) -> Option<BigUint> {
    tail.root_mod_pow2(3, 8 * bytes)
}

/// A candidate for `target` whose cube reproduces the last `low_window` bytes of `target`
/// exactly. None if those bytes are not the tail of any cube.
pub fn candidate_root(target: &[u8], low_window: usize) -> Option<BigUint> {
    let bits = 8 * low_window;
    let t = BigUint::from_bytes_be(target);
    let low = tail_root(&t.low_bits(bits), low_window)?;
    let high = cube_root(&t).rsh(bits).lsh(bits);
    Some(high + low)
}

/// Whether some cube ends in `tail`, when that can be decided from `tail` alone.
///
/// A non-zero tail fixes the 2-adic valuation of everything in front of it, so the answer holds
/// for any bytes that get prepended. An all-zero tail decides nothing and yields None.
pub fn tail_reachable(tail: &[u8]) -> Option<bool> {
    BigUint::from_bytes_be(tail)
        .trailing_zeros()
        .map(|v| v % 3 == 0)
}
