//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds textbook RSA: setup from caller-supplied primes and
//! the raw encryption and decryption primitives with no padding and no range
//! checks. Textbook RSA is deterministic and malleable, so it is not secure
//! on its own. It's intended for teaching and for building constructions
//! such as [`crate::pve`] that rely on its multiplicative homomorphism.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

pub use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};

use crate::errors::Result;
use crate::key::RsaPrivateKey;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Derives the textbook RSA triple `(n, e, d)` from two primes.
///
/// `e` is drawn uniformly from `[1, φ(n))` until coprime to `φ(n)`.
pub fn rsa_setup<R: CryptoRngCore>(
    rng: &mut R,
    p: &BigUint,
    q: &BigUint,
) -> Result<(BigUint, BigUint, BigUint)> {
    let key = RsaPrivateKey::from_primes(rng, p, q)?;
    Ok((key.n().clone(), key.e().clone(), key.d().clone()))
}
