//! rsa-chunk: a teaching-grade RSA engine.
//!
//! Solovay-Strassen prime generation, two-prime key pairs with 128-bit primes,
//! and a chunked file codec writing fixed 33-byte blocks followed by a
//! two-byte size trailer.

pub mod config;
pub mod rsa;
pub mod util;

pub use config::{ConfigError, EngineConfig};
pub use rsa::{RsaEngine, RsaError, RsaResult};
