//! Example problem space for [`crate::pve`].
//!
//! The space is `{0, …, size - 1}` where `i` matches `j` when `i ^ j == mask`.
//! Matching pairs are assigned pairs of modular inverses found by scanning
//! `a = 1, 2, 3, …` under a small modulus. The defaults (16 values, mask 15,
//! modulus 33) give eight matching pairs and fit a key built from the
//! primes 3 and 11.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::One;

use crate::errors::{Error, Result};
use crate::math::mod_inverse;

/// How inverse pairs are picked while scanning the modulus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Take every `(a, a^-1)` in scan order, including self-inverse values
    /// and values already used by earlier pairs. Reproduces the historical
    /// reference mapping, which is not injective and is therefore rejected
    /// by [`crate::pve::PveKeys::load`].
    Reference,

    /// Skip self-inverse values and values already taken, so every problem
    /// value gets a distinct plaintext.
    #[default]
    Distinct,
}

/// Builder for an XOR-matched example space.
#[derive(Debug, Clone)]
pub struct ExampleSpaceBuilder {
    size: u64,
    mask: u64,
    modulus: BigUint,
    scan_mode: ScanMode,
}

impl Default for ExampleSpaceBuilder {
    fn default() -> Self {
        Self {
            size: 16,
            mask: 15,
            modulus: BigUint::from(33u32),
            scan_mode: ScanMode::default(),
        }
    }
}

/// Problem space, its mapping, and the pairs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSpace {
    /// Problem space values in ascending order.
    pub values: Vec<u64>,
    /// Mapping from problem values to plaintexts.
    pub mapping: BTreeMap<u64, BigUint>,
    /// Matching problem pairs `(i, j)` with `i <= j`, lexicographically ordered.
    pub matches: Vec<(u64, u64)>,
    /// Inverse pairs `(a, b)` in scan order, zipped with `matches`.
    pub inverse_pairs: Vec<(BigUint, BigUint)>,
}

impl ExampleSpace {
    /// Split into the arguments expected by [`crate::pve::PveKeys::load`].
    pub fn into_parts(self) -> (Vec<u64>, BTreeMap<u64, BigUint>) {
        (self.values, self.mapping)
    }
}

impl ExampleSpaceBuilder {
    /// Create a builder with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of problem values.
    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// XOR mask defining the match relation.
    pub fn mask(mut self, mask: u64) -> Self {
        self.mask = mask;
        self
    }

    /// Modulus the inverse pairs are taken from. Must equal the modulus of
    /// the key the space is loaded into.
    pub fn modulus(mut self, modulus: BigUint) -> Self {
        self.modulus = modulus;
        self
    }

    /// Inverse pair selection strategy.
    pub fn scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    /// Build the space.
    ///
    /// Fails with [`Error::InvalidMapping`] if the mask pairs a value with
    /// itself or leaves a value without a partner, and with
    /// [`Error::PlaintextSpaceExhausted`] if the modulus runs out of inverse
    /// pairs before every match has one.
    pub fn build(&self) -> Result<ExampleSpace> {
        let values: Vec<u64> = (0..self.size).collect();
        let matches = self.find_matches();
        self.check_matches(&matches)?;
        let inverse_pairs = self.find_inverse_pairs(matches.len())?;

        let mut mapping = BTreeMap::new();
        for ((i, j), (a, b)) in matches.iter().zip(&inverse_pairs) {
            mapping.insert(*i, a.clone());
            mapping.insert(*j, b.clone());
        }

        Ok(ExampleSpace {
            values,
            mapping,
            matches,
            inverse_pairs,
        })
    }

    fn find_matches(&self) -> Vec<(u64, u64)> {
        let mut matches = Vec::new();
        for i in 0..self.size {
            for j in i..self.size {
                if i ^ j == self.mask {
                    matches.push((i, j));
                }
            }
        }
        matches
    }

    /// Every value must sit in exactly one match, paired with a different value.
    fn check_matches(&self, matches: &[(u64, u64)]) -> Result<()> {
        let mut seen = BTreeSet::new();
        for &(i, j) in matches {
            if i == j || !seen.insert(i) || !seen.insert(j) {
                return Err(Error::InvalidMapping);
            }
        }
        if (seen.len() as u64) != self.size {
            return Err(Error::InvalidMapping);
        }
        Ok(())
    }

    fn find_inverse_pairs(&self, count: usize) -> Result<Vec<(BigUint, BigUint)>> {
        let one = BigUint::one();
        let mut used = BTreeSet::new();
        let mut pairs = Vec::with_capacity(count);

        let mut a = BigUint::one();
        while pairs.len() < count {
            if a >= self.modulus {
                return Err(Error::PlaintextSpaceExhausted);
            }

            match mod_inverse(&a, &self.modulus) {
                Ok(b) => {
                    let take = match self.scan_mode {
                        ScanMode::Reference => true,
                        ScanMode::Distinct => {
                            a != b && !used.contains(&a) && !used.contains(&b)
                        }
                    };
                    if take {
                        used.insert(a.clone());
                        used.insert(b.clone());
                        pairs.push((a.clone(), b));
                    }
                }
                Err(Error::NoInverseExists) => {}
                Err(err) => return Err(err),
            }

            a += &one;
        }

        Ok(pairs)
    }
}

/// Builds the default example space: 16 values, `i ^ j == 15`, modulus 33.
pub fn xor_example_space() -> Result<ExampleSpace> {
    ExampleSpaceBuilder::default().build()
}
