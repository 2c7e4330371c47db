// RSA Engine
// Stateful facade over one set of key material, as consumed by front ends

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::bigint::RsaBigInt;
use super::chunk::{validate_chunk_size, CIPHER_BLOCK_WIDTH, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use super::error::RsaResult;
use super::keygen::{generate_key_material, KeyMaterial};
use super::prime::PrimeGenerator;
use crate::config::{ConfigError, EngineConfig};

/// Key pair holder with chunked encryption and decryption.
///
/// Every engine owns its random source, so independent engines can run on
/// separate threads without sharing state.
pub struct RsaEngine {
    keys: KeyMaterial,
    chunk_size: usize,
    primes: PrimeGenerator<StdRng>,
}

impl RsaEngine {
    /// Engine with default settings and an entropy-seeded random source
    pub fn new() -> Self {
        Self::build(&EngineConfig::default())
    }

    /// Engine from validated configuration
    pub fn with_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            keys: KeyMaterial::default(),
            chunk_size: config.chunk_size,
            primes: PrimeGenerator::new(rng, config.primality_rounds, config.max_prime_candidates),
        }
    }

    /// Replace all key material with a freshly generated pair.
    /// On failure the previous key material is kept as it was.
    pub fn create_key_pair(&mut self) -> RsaResult<()> {
        self.keys = generate_key_material(&mut self.primes)?;
        Ok(())
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Modulus as a decimal string
    pub fn n(&self) -> RsaResult<String> {
        Ok(self.keys.modulus()?.to_string())
    }

    /// Public exponent as a decimal string
    pub fn e(&self) -> RsaResult<String> {
        Ok(self.keys.public_exponent()?.to_string())
    }

    /// Private exponent as a decimal string
    pub fn d(&self) -> RsaResult<String> {
        Ok(self.keys.private_exponent()?.to_string())
    }

    // The setters do not check that the fields belong to one key pair

    pub fn set_n(&mut self, n: RsaBigInt) {
        self.keys.n = Some(n);
    }

    pub fn set_e(&mut self, e: RsaBigInt) {
        self.keys.e = Some(e);
    }

    pub fn set_d(&mut self, d: RsaBigInt) {
        self.keys.d = Some(d);
    }

    pub fn min_chunk_size(&self) -> usize {
        MIN_CHUNK_SIZE
    }

    pub fn max_chunk_size(&self) -> usize {
        MAX_CHUNK_SIZE
    }

    /// Width of one encrypted block
    pub fn cipher_chunk_size(&self) -> usize {
        CIPHER_BLOCK_WIDTH
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) -> RsaResult<()> {
        validate_chunk_size(chunk_size)?;
        self.chunk_size = chunk_size;
        Ok(())
    }

    /// Encrypt with the public exponent; needs e and n
    pub fn encrypt(&self, plaintext: &[u8], chunk_size: usize) -> RsaResult<Vec<u8>> {
        self.keys.public_key()?.encrypt(plaintext, chunk_size)
    }

    /// Decrypt with the private exponent; needs d and n
    pub fn decrypt(&self, ciphertext: &[u8]) -> RsaResult<Vec<u8>> {
        self.keys.private_key()?.decrypt(ciphertext)
    }
}

impl Default for RsaEngine {
    fn default() -> Self {
        Self::new()
    }
}
