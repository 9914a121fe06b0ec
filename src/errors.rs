//! Error types.

/// Alias for [`core::result::Result`] with the `pve` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// No modular inverse exists because the operands are not coprime.
    NoInverseExists,

    /// The search for a public exponent ran out of attempts.
    KeyGenerationFailed,

    /// Key material failed an internal consistency check.
    InvariantViolation,

    /// Mapping is not total, not injective, or has images outside `[1, n)`.
    InvalidMapping,

    /// Problem space contains the same value twice.
    DuplicateValue,

    /// Value is not part of the loaded problem space.
    NotInProblemSpace,

    /// Supplied private key does not match the stored one.
    Unauthorized,

    /// Decrypted plaintext has no entry in the inverse mapping.
    DecryptionMappingMiss,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid exponent.
    InvalidExponent,

    /// Message too long.
    MessageTooLong,

    /// Decryption error.
    Decryption,

    /// Modulus cannot supply enough inverse pairs for the problem space.
    PlaintextSpaceExhausted,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NoInverseExists => write!(f, "no modular inverse exists"),
            Error::KeyGenerationFailed => {
                write!(f, "no public exponent found within the attempt limit")
            }
            Error::InvariantViolation => write!(f, "key invariant violated"),
            Error::InvalidMapping => write!(f, "invalid problem space mapping"),
            Error::DuplicateValue => write!(f, "duplicate value in problem space"),
            Error::NotInProblemSpace => write!(f, "value not in problem space"),
            Error::Unauthorized => write!(f, "private key does not match"),
            Error::DecryptionMappingMiss => {
                write!(f, "decrypted plaintext not present in mapping")
            }
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::Decryption => write!(f, "decryption error"),
            Error::PlaintextSpaceExhausted => {
                write!(f, "modulus has too few inverse pairs for problem space")
            }
        }
    }
}
