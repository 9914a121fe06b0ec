use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::{
    generate_key_from_primes, key_from_primes_with_exp, RsaKeyComponents,
};
use crate::algorithms::rsa::{compute_modulus, rsa_decrypt, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::traits::keys::{PrivateKeyParts, PublicKeyParts};

/// Default bound on random draws when searching for a public exponent.
pub const DEFAULT_EXPONENT_ATTEMPTS: usize = 1000;

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: coprime to `φ(n)`.
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    pub(crate) d: BigUint,
    /// Euler's totient of the modulus.
    pub(crate) phi: BigUint,
    /// Prime factors of N, contains exactly 2 elements.
    pub(crate) primes: Vec<BigUint>,
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", self.n())
            .field("e", self.e())
            .finish_non_exhaustive()
    }
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.primes == other.primes
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separate public and private key hashes
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.phi.zeroize();
        for prime in self.primes.iter_mut() {
            prime.zeroize();
        }
        self.primes.clear();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        if n <= BigUint::one() {
            return Err(Error::InvalidModulus);
        }
        if e.is_zero() {
            return Err(Error::InvalidExponent);
        }
        Ok(Self { n, e })
    }

    /// Textbook RSA encryption: `m^e mod n`.
    ///
    /// Rejects messages outside `[0, n)` instead of letting them wrap.
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        if m >= &self.n {
            return Err(Error::MessageTooLong);
        }
        rsa_encrypt(m, &self.e, &self.n)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl RsaPrivateKey {
    /// Derive a key from two distinct primes, drawing the public exponent
    /// from `rng`.
    ///
    /// The primes are not tested for primality; composite inputs produce a
    /// key that silently fails to decrypt.
    pub fn from_primes<R: CryptoRngCore>(rng: &mut R, p: &BigUint, q: &BigUint) -> Result<Self> {
        Self::from_primes_with_limit(rng, p, q, DEFAULT_EXPONENT_ATTEMPTS)
    }

    /// Same as [`RsaPrivateKey::from_primes`], with an explicit bound on the
    /// number of exponent draws.
    pub fn from_primes_with_limit<R: CryptoRngCore>(
        rng: &mut R,
        p: &BigUint,
        q: &BigUint,
        max_attempts: usize,
    ) -> Result<Self> {
        let components = generate_key_from_primes(rng, p, q, max_attempts)?;
        Ok(Self::from_components(components))
    }

    /// Derive a key from two distinct primes and a chosen public exponent.
    ///
    /// `e` must lie in `[1, φ(n))` and be coprime to `φ(n)`.
    pub fn from_primes_with_exp(p: &BigUint, q: &BigUint, e: &BigUint) -> Result<Self> {
        let components = key_from_primes_with_exp(p, q, e)?;
        Ok(Self::from_components(components))
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        let [p, q] = self.primes.as_slice() else {
            return Err(Error::InvariantViolation);
        };

        if &compute_modulus(p, q) != self.n() {
            return Err(Error::InvariantViolation);
        }

        if !((self.e() * &self.d) % &self.phi).is_one() {
            return Err(Error::InvariantViolation);
        }

        Ok(())
    }

    /// Textbook RSA decryption: `c^d mod n`.
    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint> {
        if c >= self.n() {
            return Err(Error::Decryption);
        }
        rsa_decrypt(c, &self.d, self.n())
    }
}

impl RsaPrivateKey {
    fn from_components(components: RsaKeyComponents) -> Self {
        let RsaKeyComponents {
            n,
            e,
            d,
            phi,
            primes,
        } = components;

        Self {
            pubkey_components: RsaPublicKey { n, e },
            d,
            phi,
            primes,
        }
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn phi(&self) -> &BigUint {
        &self.phi
    }

    fn primes(&self) -> &[BigUint] {
        &self.primes
    }
}
