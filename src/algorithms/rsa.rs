//! Generic RSA implementation

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use crate::errors::{Error, Result};
use crate::math::{mod_inverse, mod_pow};

/// ⚠️ Raw RSA encryption of `m` with exponent `e` modulo `n`. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// `m` is not range checked: values at or above `n` silently wrap. See the
/// [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt(m: &BigUint, e: &BigUint, n: &BigUint) -> Result<BigUint> {
    mod_pow(m, e, n)
}

/// ⚠️ Raw RSA decryption of `c` with private exponent `d` modulo `n`.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// No blinding and no range checks. See the [module-level
/// documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt(c: &BigUint, d: &BigUint, n: &BigUint) -> Result<BigUint> {
    mod_pow(c, d, n)
}

/// Computes the modulus `n = p·q`.
pub(crate) fn compute_modulus(p: &BigUint, q: &BigUint) -> BigUint {
    p * q
}

/// Computes Euler's totient `φ(n) = (p - 1)(q - 1)` for distinct primes.
pub(crate) fn compute_totient(p: &BigUint, q: &BigUint) -> BigUint {
    let one = BigUint::one();
    (p - &one) * (q - &one)
}

/// Computes the private exponent `d = e^-1 mod φ(n)`.
///
/// Callers have already established `gcd(e, φ(n)) = 1`, so a missing
/// inverse means the inputs were inconsistent.
pub(crate) fn compute_private_exponent(e: &BigUint, phi: &BigUint) -> Result<BigUint> {
    mod_inverse(e, phi).map_err(|_| Error::InvariantViolation)
}

/// Returns true if `e` is usable as public exponent for totient `phi`.
pub(crate) fn is_valid_exponent(e: &BigUint, phi: &BigUint) -> bool {
    let one = BigUint::one();
    e >= &one && e < phi && e.gcd(phi).is_one()
}
