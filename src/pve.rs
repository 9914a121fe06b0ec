//! Pair Value Encryption.
//!
//! Maps a finite problem space onto pairs of modular inverses in `Z/nZ` and
//! encrypts the images with textbook RSA. Because RSA is multiplicatively
//! homomorphic, `Enc(a)·Enc(b) ≡ (a·b)^e (mod n)`, so the product of two
//! ciphertexts is `1 mod n` exactly when their plaintexts are inverse
//! partners. Matching therefore needs only the modulus, never the private key.
//!
//! Keys and loaded spaces are distinct types: [`PveKeys`] holds freshly
//! generated key material, [`PveKeys::load`] turns it into a
//! [`PairValEnc`] which can encrypt, compare and decrypt.
//!
//! # ☢️️ WARNING ☢️
//!
//! Encryption is deterministic. Anyone holding the public key can encrypt
//! every problem value and recognise ciphertexts. Use for experimentation
//! only.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::algorithms::rsa::rsa_encrypt;
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Key material for Pair Value Encryption, before a problem space is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PveKeys {
    key: RsaPrivateKey,
}

impl PveKeys {
    /// Generate keys from two distinct primes.
    pub fn new<R: CryptoRngCore>(rng: &mut R, p: &BigUint, q: &BigUint) -> Result<Self> {
        Ok(Self {
            key: RsaPrivateKey::from_primes(rng, p, q)?,
        })
    }

    /// Wrap an existing RSA private key.
    pub fn from_private_key(key: RsaPrivateKey) -> Self {
        Self { key }
    }

    /// Returns the underlying RSA private key.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.key
    }

    /// Returns a [`Matcher`] that compares ciphertexts without private material.
    pub fn matcher(&self) -> Matcher {
        Matcher {
            key: self.key.to_public_key(),
        }
    }

    /// Load a problem space and its mapping into the plaintext space.
    ///
    /// `values` must be distinct, and `mapping` must send each of them, and
    /// nothing else, to a distinct integer in `[1, n)`.
    pub fn load<T: Ord + Clone>(
        self,
        values: Vec<T>,
        mapping: BTreeMap<T, BigUint>,
    ) -> Result<PairValEnc<T>> {
        let space = ProblemSpace::new(values, mapping, self.key.n())?;
        Ok(PairValEnc { keys: self, space })
    }
}

impl PublicKeyParts for PveKeys {
    fn n(&self) -> &BigUint {
        self.key.n()
    }

    fn e(&self) -> &BigUint {
        self.key.e()
    }
}

impl PrivateKeyParts for PveKeys {
    fn d(&self) -> &BigUint {
        self.key.d()
    }

    fn phi(&self) -> &BigUint {
        self.key.phi()
    }

    fn primes(&self) -> &[BigUint] {
        self.key.primes()
    }
}

/// Compares Pair Value Encryption ciphertexts using only the public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    key: RsaPublicKey,
}

impl Matcher {
    /// Create a new matcher from a public key.
    pub fn new(key: RsaPublicKey) -> Self {
        Self { key }
    }

    /// Returns the public key used for matching.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Returns true if `x·y ≡ 1 (mod n)`, i.e. the ciphertexts encrypt a
    /// matching pair.
    pub fn compare(&self, x: &BigUint, y: &BigUint) -> bool {
        ((x * y) % self.key.n()).is_one()
    }
}

#[derive(Clone)]
struct ProblemSpace<T> {
    values: Vec<T>,
    mapping: BTreeMap<T, BigUint>,
    inverse_mapping: BTreeMap<BigUint, T>,
}

impl<T: Ord + Clone> ProblemSpace<T> {
    fn new(values: Vec<T>, mapping: BTreeMap<T, BigUint>, n: &BigUint) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for value in &values {
            if !seen.insert(value) {
                return Err(Error::DuplicateValue);
            }
        }

        if mapping.len() != values.len() || !values.iter().all(|v| mapping.contains_key(v)) {
            return Err(Error::InvalidMapping);
        }

        let mut inverse_mapping = BTreeMap::new();
        for (value, plaintext) in &mapping {
            if plaintext.is_zero() || plaintext >= n {
                return Err(Error::InvalidMapping);
            }
            if inverse_mapping
                .insert(plaintext.clone(), value.clone())
                .is_some()
            {
                return Err(Error::InvalidMapping);
            }
        }

        tracing::debug!(values = values.len(), "loaded problem space");

        Ok(Self {
            values,
            mapping,
            inverse_mapping,
        })
    }
}

/// Pair Value Encryption over a loaded problem space.
#[derive(Clone)]
pub struct PairValEnc<T> {
    keys: PveKeys,
    space: ProblemSpace<T>,
}

impl<T> fmt::Debug for PairValEnc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairValEnc")
            .field("keys", &self.keys)
            .field("values", &self.space.values.len())
            .finish_non_exhaustive()
    }
}

impl<T: Ord + Clone> PairValEnc<T> {
    /// Replace the problem space and mapping.
    ///
    /// On error the previously loaded space stays in place.
    pub fn load(&mut self, values: Vec<T>, mapping: BTreeMap<T, BigUint>) -> Result<()> {
        self.space = ProblemSpace::new(values, mapping, self.keys.n())?;
        Ok(())
    }

    /// Returns the loaded problem space.
    pub fn values(&self) -> &[T] {
        &self.space.values
    }

    /// Returns the mapping from problem space to plaintext space.
    pub fn mapping(&self) -> &BTreeMap<T, BigUint> {
        &self.space.mapping
    }

    /// Returns the key material.
    pub fn keys(&self) -> &PveKeys {
        &self.keys
    }

    /// Returns a [`Matcher`] that can be handed to parties without the
    /// private key.
    pub fn matcher(&self) -> Matcher {
        self.keys.matcher()
    }

    /// Map `x` into the plaintext space and encrypt it.
    pub fn encrypt(&self, x: &T) -> Result<BigUint> {
        let plaintext = self
            .space
            .mapping
            .get(x)
            .ok_or(Error::NotInProblemSpace)?;
        rsa_encrypt(plaintext, self.keys.e(), self.keys.n())
    }

    /// Returns true if the ciphertexts encrypt a matching pair.
    pub fn compare(&self, x: &BigUint, y: &BigUint) -> bool {
        ((x * y) % self.keys.n()).is_one()
    }

    /// Decrypt `x` back into the problem space.
    ///
    /// `private_key` must equal the stored private exponent; it is compared
    /// in constant time.
    pub fn decrypt(&self, x: &BigUint, private_key: &BigUint) -> Result<T> {
        let expected = Zeroizing::new(self.keys.d().to_bytes_be());
        let supplied = Zeroizing::new(private_key.to_bytes_be());
        if !bool::from(expected.as_slice().ct_eq(supplied.as_slice())) {
            tracing::warn!("rejected decryption with mismatched private key");
            return Err(Error::Unauthorized);
        }

        let plaintext = Zeroizing::new(self.keys.key.decrypt(x)?);
        self.space
            .inverse_mapping
            .get(&*plaintext)
            .cloned()
            .ok_or(Error::DecryptionMappingMiss)
    }

    /// Drop the loaded space and return the key material.
    pub fn into_keys(self) -> PveKeys {
        self.keys
    }
}
