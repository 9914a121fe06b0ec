//! Derive RSA key components from caller-supplied primes

use alloc::vec::Vec;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::{
    algorithms::rsa::{
        compute_modulus, compute_private_exponent, compute_totient, is_valid_exponent,
    },
    errors::{Error, Result},
};

pub(crate) struct RsaKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub phi: BigUint,
    pub primes: Vec<BigUint>,
}

/// Rejects prime pairs that cannot yield a usable key. Primality itself is
/// the caller's responsibility.
fn check_primes(p: &BigUint, q: &BigUint) -> Result<()> {
    let two = BigUint::from(2u32);
    if p < &two || q < &two || p == q {
        return Err(Error::InvalidPrime);
    }
    Ok(())
}

/// Derives `(n, e, d)` from two primes, drawing `e` uniformly from `[1, φ(n))`
/// until it is coprime to `φ(n)`.
///
/// The search gives up with [`Error::KeyGenerationFailed`] after
/// `max_attempts` draws. Coprime residues have positive density, so with any
/// reasonable bound this only happens with a broken random source.
pub(crate) fn generate_key_from_primes<R: CryptoRngCore>(
    rng: &mut R,
    p: &BigUint,
    q: &BigUint,
    max_attempts: usize,
) -> Result<RsaKeyComponents> {
    check_primes(p, q)?;

    let n = compute_modulus(p, q);
    let phi = compute_totient(p, q);
    let e = generate_public_exponent(rng, &phi, max_attempts)?;
    let d = compute_private_exponent(&e, &phi)?;

    tracing::debug!(modulus_bits = n.bits(), "derived RSA key from primes");

    Ok(RsaKeyComponents {
        n,
        e,
        d,
        phi,
        primes: vec![p.clone(), q.clone()],
    })
}

/// Derives `(n, e, d)` from two primes and a caller-chosen public exponent.
pub(crate) fn key_from_primes_with_exp(
    p: &BigUint,
    q: &BigUint,
    e: &BigUint,
) -> Result<RsaKeyComponents> {
    check_primes(p, q)?;

    let n = compute_modulus(p, q);
    let phi = compute_totient(p, q);
    if !is_valid_exponent(e, &phi) {
        return Err(Error::InvalidExponent);
    }
    let d = compute_private_exponent(e, &phi)?;

    Ok(RsaKeyComponents {
        n,
        e: e.clone(),
        d,
        phi,
        primes: vec![p.clone(), q.clone()],
    })
}

fn generate_public_exponent<R: CryptoRngCore>(
    rng: &mut R,
    phi: &BigUint,
    max_attempts: usize,
) -> Result<BigUint> {
    let one = BigUint::one();

    for attempt in 1..=max_attempts {
        let e = rng.gen_biguint_range(&one, phi);
        if e.gcd(phi).is_one() {
            tracing::debug!(attempt, "selected public exponent");
            return Ok(e);
        }
    }

    tracing::warn!(max_attempts, "public exponent search exhausted");
    Err(Error::KeyGenerationFailed)
}
