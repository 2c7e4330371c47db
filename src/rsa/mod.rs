// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod chunk;
pub mod decrypt;
pub mod encrypt;
pub mod engine;
pub mod error;
pub mod keygen;
pub mod prime;

pub use chunk::{inspect_stream, StreamLayout, CIPHER_BLOCK_WIDTH, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
pub use decrypt::decrypt_bytes;
pub use encrypt::encrypt_bytes;
pub use engine::RsaEngine;
pub use error::{KeyComponent, RsaError, RsaResult};
pub use keygen::{generate_key_material, KeyMaterial, RsaPrivateKey, RsaPublicKey};
pub use prime::PrimeGenerator;
