// RSA Decryption Implementation
// Reverses the chunked block format produced by the encryptor

use tracing::debug;

use super::bigint::{from_bytes, mod_pow, to_signed_bytes};
use super::chunk::{align_chunk, inspect_stream, validate_modulus};
use super::error::RsaResult;
use super::keygen::RsaPrivateKey;

/// Decrypt ciphertext bytes using RSA private key
/// Returns plaintext as bytes
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> RsaResult<Vec<u8>> {
    validate_modulus(&private_key.n)?;
    let layout = inspect_stream(ciphertext)?;
    let mut plaintext = Vec::with_capacity(layout.plaintext_len());

    for index in 0..layout.blocks {
        let Some(block) = layout.block(ciphertext, index) else {
            break;
        };

        // m = c^d mod n
        let m = mod_pow(&from_bytes(block), &private_key.d, &private_key.n);

        let width = if index == 0 {
            layout.first_chunk_size
        } else {
            layout.chunk_size
        };
        plaintext.extend_from_slice(&align_chunk(to_signed_bytes(&m), width));
    }

    debug!(
        blocks = layout.blocks,
        chunk_size = layout.chunk_size,
        first_chunk_size = layout.first_chunk_size,
        plaintext_len = plaintext.len(),
        "decrypted payload"
    );

    Ok(plaintext)
}
