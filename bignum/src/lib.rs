#[macro_use]
extern crate error_chain;
extern crate num;

use num::pow;
use num::ToPrimitive;
use num::{Num, One, Zero};

pub use num::bigint::BigUint;

error_chain!{}

pub trait BigNumTrait: Sized + Ord + Clone + std::fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_u32(u: u32) -> Self;
    fn from_bytes_be(bytes: &[u8]) -> Self;
    fn to_bytes_be(&self) -> Vec<u8>;
    fn to_bytes_be_padded(&self, len: usize) -> Option<Vec<u8>>;
    fn from_hex_str(bytes: &str) -> Result<Self>;
    fn from_dec_str(bytes: &str) -> Result<Self>;
    fn to_dec_str(&self) -> String;
    fn to_u64(&self) -> Option<u64>;
    fn mod_exp(&self, exponent: &Self, modulus: &Self) -> Self;
    fn power(&self, k: usize) -> Self;
    fn root(&self, k: usize) -> (Self, bool);
    fn root_mod_pow2(&self, k: usize, bits: usize) -> Option<Self>;
    fn rsh(&self, k: usize) -> Self;
    fn lsh(&self, k: usize) -> Self;
    fn low_bits(&self, k: usize) -> Self;
    fn trailing_zeros(&self) -> Option<usize>;
    fn bits(&self) -> usize;
    fn bytes(&self) -> usize;
}

impl BigNumTrait for BigUint {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn from_u32(u: u32) -> Self {
        BigUint::from(u)
    }

    fn from_bytes_be(bytes: &[u8]) -> Self {
        BigUint::from_bytes_be(bytes)
    }

    fn to_bytes_be(&self) -> Vec<u8> {
        self.to_bytes_be()
    }

    //Left-pads with zeros to exactly `len` bytes. Returns None if the number does not fit.
    fn to_bytes_be_padded(&self, len: usize) -> Option<Vec<u8>> {
        let bytes = BigNumTrait::bytes(self);
        if bytes > len {
            return None;
        }
        let mut result = vec![0u8; len];
        if bytes > 0 {
            result[len - bytes..].copy_from_slice(&self.to_bytes_be());
        }
        Some(result)
    }

    fn from_hex_str(bytes: &str) -> Result<Self> {
        BigUint::from_str_radix(bytes, 16).chain_err(|| "invalid hex string")
    }

    fn from_dec_str(bytes: &str) -> Result<Self> {
        BigUint::from_str_radix(bytes, 10).chain_err(|| "invalid dec string")
    }

    fn to_dec_str(&self) -> String {
        self.to_str_radix(10)
    }

    fn to_u64(&self) -> Option<u64> {
        ToPrimitive::to_u64(self)
    }

    fn mod_exp(&self, exponent: &Self, modulus: &Self) -> Self {
        self.modpow(exponent, modulus)
    }

    fn power(&self, k: usize) -> Self {
        pow(self.clone(), k)
    }

    //Returns a pair (r, is_root), where r is the biggest integer with r^k <= x, and is_root indicates
    //whether we have equality.
    //
    //Newton's method on f(r) = r^k - x, started above the root. The integer iterates decrease
    //strictly until they reach the floor of the root, so we stop at the first one that does not.
    fn root(&self, k: usize) -> (Self, bool) {
        assert!(k >= 1, "root of degree zero");
        if k == 1 || self.is_zero() {
            return (self.clone(), true);
        }
        let k_big = BigUint::from(k);
        let k_minus_one = BigUint::from(k - 1);
        let mut x = <BigUint as One>::one().lsh((BigNumTrait::bits(self) + k - 1) / k);
        loop {
            let y = (&k_minus_one * &x + self / pow(x.clone(), k - 1)) / &k_big;
            if y >= x {
                break;
            }
            x = y;
        }
        let is_root = pow(x.clone(), k) == *self;
        (x, is_root)
    }

    //Returns some r < 2^bits with r^k = x mod 2^bits, for odd k.
    //
    //For odd r the map r -> r^k permutes the odd residues mod 2^bits, so the odd part of x has
    //exactly one such root, found one bit at a time: (r + 2^i)^k = r^k + 2^i mod 2^(i+1).
    //If x = 2^v * odd, a root exists only when k divides v. Returns None otherwise, and for
    //even k.
    fn root_mod_pow2(&self, k: usize, bits: usize) -> Option<Self> {
        if k % 2 == 0 {
            return None;
        }
        let x = self.low_bits(bits);
        let v = match BigNumTrait::trailing_zeros(&x) {
            Some(v) => v,
            None => return Some(Zero::zero()),
        };
        if v % k != 0 {
            return None;
        }
        let odd = x.rsh(v);
        let width = bits - v;
        let mut r: BigUint = One::one();
        for i in 1..width {
            if bit(&pow(r.clone(), k), i) != bit(&odd, i) {
                r += <BigUint as One>::one().lsh(i);
            }
        }
        Some(r.lsh(v / k))
    }

    fn rsh(&self, k: usize) -> Self {
        self >> k
    }

    fn lsh(&self, k: usize) -> Self {
        self << k
    }

    fn low_bits(&self, k: usize) -> Self {
        if BigNumTrait::bits(self) <= k {
            return self.clone();
        }
        self & &(<BigUint as One>::one().lsh(k) - 1u32)
    }

    fn trailing_zeros(&self) -> Option<usize> {
        BigUint::trailing_zeros(self).map(|v| v as usize)
    }

    fn bits(&self) -> usize {
        BigUint::bits(self) as usize
    }

    fn bytes(&self) -> usize {
        let bits = BigNumTrait::bits(self);
        let mut result = bits / 8;
        if bits % 8 != 0 {
            result += 1;
        }
        result
    }
}

fn bit(x: &BigUint, i: usize) -> bool {
    !(x.rsh(i) & <BigUint as One>::one()).is_zero()
}
