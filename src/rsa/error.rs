// RSA Engine Errors
// Error kinds surfaced by key generation and the chunk codec

use std::fmt;

use thiserror::Error;

/// Result type for engine operations
pub type RsaResult<T> = Result<T, RsaError>;

/// Key field that an operation needed but found unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComponent {
    Modulus,
    PublicExponent,
    PrivateExponent,
}

impl fmt::Display for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyComponent::Modulus => write!(f, "modulus"),
            KeyComponent::PublicExponent => write!(f, "public exponent"),
            KeyComponent::PrivateExponent => write!(f, "private exponent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsaError {
    #[error("Sorry, no {0} set.")]
    MissingKeyComponent(KeyComponent),

    #[error("Chunk size {size} is outside the allowed range [{min}, {max}]")]
    InvalidChunkSize { size: usize, min: usize, max: usize },

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("No probable prime of {bit_length} bits found after {attempts} candidates")]
    PrimeGenerationTimeout { bit_length: u64, attempts: u64 },

    #[error("Prime bit length must be at least 2, got {0}")]
    InvalidBitLength(u64),

    #[error("Modulus must be at least 2")]
    ModulusTooSmall,

    #[error("Modulus needs {bytes} bytes but encrypted blocks are {width} bytes wide")]
    ModulusTooWide { bytes: usize, width: usize },
}
