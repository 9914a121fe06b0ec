#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Modules
//!
//! - [`math`]: extended Euclid, modular inverse and modular exponentiation
//!   over arbitrary-precision integers.
//! - [`RsaPrivateKey`] / [`RsaPublicKey`]: textbook RSA keys derived from
//!   caller-supplied primes.
//! - [`pve`]: Pair Value Encryption, matching encrypted values without
//!   decrypting them.
//! - [`example_space`]: the XOR-matched demonstration space.
//! - [`hazmat`]: the raw `(n, e, d)` setup and textbook primitives.
//!
//! # Usage
//!
//! ## Textbook RSA
//!
//! ```
//! use pve::{BigUint, RsaPrivateKey, RsaPublicKey, traits::PrivateKeyParts};
//!
//! let p = BigUint::from(3u32);
//! let q = BigUint::from(11u32);
//! let private_key = RsaPrivateKey::from_primes_with_exp(&p, &q, &BigUint::from(3u32))
//!     .expect("failed to derive a key");
//! assert_eq!(private_key.d(), &BigUint::from(7u32));
//!
//! let public_key = RsaPublicKey::from(&private_key);
//! let c = public_key.encrypt(&BigUint::from(5u32)).expect("failed to encrypt");
//! assert_eq!(c, BigUint::from(26u32));
//! assert_eq!(private_key.decrypt(&c).expect("failed to decrypt"), BigUint::from(5u32));
//! ```
//!
//! Matching with a public key only is shown in the example above.

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod errors;
pub mod example_space;
pub mod math;
pub mod pve;
pub mod traits;

mod key;

pub use crate::{
    errors::{Error, Result},
    key::{RsaPrivateKey, RsaPublicKey, DEFAULT_EXPONENT_ATTEMPTS},
    pve::{Matcher, PairValEnc, PveKeys},
};

pub mod hazmat;
