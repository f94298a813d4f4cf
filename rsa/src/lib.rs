extern crate bignum;
extern crate num_traits;
use num_traits::NumOps;

//The public half of an RSA key. Nothing here ever sees a private exponent.
pub struct RsaPublic<T> {
    n: T,
    e: T,
}

impl<T: bignum::BigNumTrait> RsaPublic<T> {
    pub fn new(n: T, e: T) -> Self {
        RsaPublic { n, e }
    }

    pub fn from_hex_modulus(n: &str, e: u32) -> bignum::Result<Self> {
        Ok(RsaPublic {
            n: T::from_hex_str(n)?,
            e: T::from_u32(e),
        })
    }

    pub fn n(&self) -> &T {
        &self.n
    }

    pub fn e(&self) -> &T {
        &self.e
    }

    //Size of the modulus in bits, rounded up to whole bytes
    pub fn bits(&self) -> usize {
        8 * self.n.bytes()
    }
}

impl<T: bignum::BigNumTrait> RsaPublic<T>
where
    for<'a1, 'a2> &'a1 T: NumOps<&'a2 T, T>,
{
    pub fn encrypt(&self, m: &T) -> T {
        m.mod_exp(&self.e, &self.n)
    }

    //The raw public operation rendered to the modulus width, as a verifier sees it.
    pub fn encrypt_bytes(&self, signature: &[u8]) -> Option<Vec<u8>> {
        let m = T::from_bytes_be(signature);
        if m >= self.n {
            return None;
        }
        self.encrypt(&m).to_bytes_be_padded(self.n.bytes())
    }
}
