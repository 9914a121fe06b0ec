//! Modular arithmetic over arbitrary-precision integers.

use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::errors::{Error, Result};

/// Extended Euclidean algorithm.
///
/// Returns `(gcd, x, y)` such that `a·x + b·y = gcd(a, b)`. The coefficients
/// are the ones produced by the classic recursion
/// `egcd(0, b) = (b, 0, 1)`, `egcd(a, b) = (g, y1 - (b / a)·x1, x1)` where
/// `(g, x1, y1) = egcd(b mod a, a)`, computed here without recursion so
/// large operands cannot exhaust the stack.
pub fn ext_euclid(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    // Walk the remainder sequence of (b, a). `s` tracks the coefficient of
    // `b` and `t` the coefficient of `a`.
    let mut old_r = b.clone();
    let mut r = a.clone();
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        old_r = core::mem::replace(&mut r, rem);

        let q = BigInt::from_biguint(Plus, q);

        let next_s = &old_s - &q * &s;
        old_s = core::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = core::mem::replace(&mut t, next_t);
    }

    (old_r, old_t, old_s)
}

/// Calculate the modular inverse of `a` modulo `m`, normalised into `[0, m)`.
///
/// Returns [`Error::NoInverseExists`] when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::InvalidModulus);
    }

    let (gcd, x, _) = ext_euclid(a, m);
    if !gcd.is_one() {
        return Err(Error::NoInverseExists);
    }

    let m = BigInt::from_biguint(Plus, m.clone());
    x.mod_floor(&m)
        .to_biguint()
        .ok_or(Error::InvariantViolation)
}

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// A base congruent to zero yields zero for every exponent, zero included.
/// Any other base raised to the zeroth power yields one.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidModulus);
    }

    let mut base = base % modulus;
    if base.is_zero() {
        return Ok(BigUint::zero());
    }

    let mut acc = BigUint::one();
    let mut exp = exponent.clone();
    while !exp.is_zero() {
        if exp.is_odd() {
            acc = (&acc * &base) % modulus;
        }
        exp = exp >> 1usize;
        base = (&base * &base) % modulus;
    }

    Ok(acc)
}

/// Generic trait to implement modular inverse
pub trait ModInverse<R: Sized>: Sized {
    /// Function to calculate the [modular multiplicative
    /// inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse) of an integer *a* modulo *m*.
    ///
    /// Returns [`Error::NoInverseExists`] if none exists.
    fn mod_inverse(self, m: R) -> Result<Self>;
}

impl<'a> ModInverse<&'a BigUint> for BigUint {
    fn mod_inverse(self, m: &'a BigUint) -> Result<BigUint> {
        mod_inverse(&self, m)
    }
}

impl ModInverse<BigUint> for BigUint {
    fn mod_inverse(self, m: BigUint) -> Result<BigUint> {
        mod_inverse(&self, &m)
    }
}
