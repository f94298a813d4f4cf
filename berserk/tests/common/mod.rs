#![allow(dead_code)]

use berserk::{DigestInfoTemplate, Layout};
use bignum::{BigNumTrait, BigUint};
use rand::{Error, RngCore};

// Modulus of a self-signed CA certificate with public exponent 3
pub const CA_MODULUS: &str = "\
    a6ddac5f80e6a02db689abb363ab23333c2c049f43fa37bb7b442bc7060fbb4d\
    281ac88ba59e655db34e2d6b81509ece5c5b65d092091b9c525d5a8907253c1b\
    c035d0623351e26b447f020f17a71e2ea7bb823d70f1f358c6f817cbfd8f119c\
    bd457eefa8d398790627b0d4b37e9553f3f6bec6078d601a000c23cd8f67e46c\
    556a25d226c693edc5936ab69029847c4d4d5e668dbc4a0b5c49b9fe881998e1\
    982cbd677409263c979077f54d6f17e25b06d6614a462dca1d9d6ae64235ab91\
    64c58eaa86d652f0a0698c665d3f53e7866a0bd203fb17d59c852c0524d15cfa\
    85442259cdef6725591c2e0c9aed38bf5de919c7881fc2718626a023f4dc6767";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wraps an RNG and counts every draw made through it.
pub struct CountingRng<R> {
    inner: R,
    pub calls: usize,
    pub bytes: usize,
}

impl<R: RngCore> CountingRng<R> {
    pub fn new(inner: R) -> Self {
        CountingRng {
            inner,
            calls: 0,
            bytes: 0,
        }
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.calls += 1;
        self.bytes += 4;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.calls += 1;
        self.bytes += 8;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.calls += 1;
        self.bytes += dest.len();
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.calls += 1;
        self.bytes += dest.len();
        self.inner.try_fill_bytes(dest)
    }
}

/// Cubes a signature without reduction, rendered to the template width.
pub fn cube(signature: &[u8], size: usize) -> Vec<u8> {
    BigUint::from_bytes_be(signature)
        .power(3)
        .to_bytes_be_padded(size)
        .expect("cube wider than the signature")
}

/// Asserts that `block` carries every template window and `digest` at the end.
pub fn assert_windows(block: &[u8], template: &DigestInfoTemplate, digest: &[u8]) {
    let Layout {
        size,
        middle_offset,
        middle_end,
        suffix_offset,
        digest_offset,
        ..
    } = template.layout().unwrap();
    assert_eq!(block.len(), size);
    assert_eq!(&block[..template.prefix.len()], &template.prefix[..], "prefix");
    assert_eq!(&block[middle_offset..middle_end], &template.middle[..], "middle");
    assert_eq!(&block[suffix_offset..digest_offset], &template.suffix[..], "suffix");
    assert_eq!(&block[digest_offset..], digest, "digest");
}
