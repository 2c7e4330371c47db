// Engine Configuration
// Tunables for prime generation and the default chunk size, loadable from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rsa::chunk::{validate_chunk_size, DEFAULT_CHUNK_SIZE};
use crate::rsa::prime::{DEFAULT_MAX_PRIME_CANDIDATES, DEFAULT_PRIMALITY_ROUNDS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for an RSA engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Witness rounds per prime candidate (default: 100)
    pub primality_rounds: u32,
    /// Candidates drawn per prime before giving up (default: 100000)
    pub max_prime_candidates: u64,
    /// Stored plaintext chunk size, 1..=31 (default: 16)
    pub chunk_size: usize,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            max_prime_candidates: DEFAULT_MAX_PRIME_CANDIDATES,
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Render the effective configuration in the same TOML layout `from_toml_str` reads
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primality_rounds == 0 {
            return Err(ConfigError::Invalid("primality_rounds must be at least 1".to_string()));
        }
        if self.max_prime_candidates == 0 {
            return Err(ConfigError::Invalid(
                "max_prime_candidates must be at least 1".to_string(),
            ));
        }
        validate_chunk_size(self.chunk_size).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    pub fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }

    pub fn with_max_prime_candidates(mut self, candidates: u64) -> Self {
        self.max_prime_candidates = candidates;
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.primality_rounds, 100);
        assert_eq!(config.chunk_size, 16);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str("chunk_size = 31\nseed = 7\n").unwrap();
        assert_eq!(config.chunk_size, 31);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.primality_rounds, DEFAULT_PRIMALITY_ROUNDS);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            EngineConfig::from_toml_str("chunk_size = 32"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("primality_rounds = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("chunk_size = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_to_toml_reloads() {
        let config = EngineConfig::default().with_chunk_size(8).with_seed(42);
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("chunk_size = 8"));
        assert!(rendered.contains("seed = 42"));
        assert_eq!(EngineConfig::from_toml_str(&rendered).unwrap(), config);

        // Unseeded configs omit the key entirely
        let rendered = EngineConfig::default().to_toml_string().unwrap();
        assert!(!rendered.contains("seed"));
        assert_eq!(EngineConfig::from_toml_str(&rendered).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_primality_rounds(20)
            .with_max_prime_candidates(500)
            .with_chunk_size(8)
            .with_seed(3);
        assert_eq!(config.primality_rounds, 20);
        assert_eq!(config.max_prime_candidates, 500);
        assert_eq!(config.chunk_size, 8);
        assert_eq!(config.seed, Some(3));
        assert!(EngineConfig::default().with_max_prime_candidates(0).validate().is_err());
    }
}
