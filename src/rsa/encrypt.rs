// RSA Encryption Implementation
// Chunked textbook RSA: each tail-anchored chunk becomes one 33-byte block

use tracing::debug;

use super::bigint::{from_bytes, mod_pow, to_signed_bytes};
use super::chunk::{
    pad_block, split_from_tail, validate_chunk_size, validate_modulus, CIPHER_BLOCK_WIDTH, TRAILER_LEN,
};
use super::error::{RsaError, RsaResult};
use super::keygen::RsaPublicKey;

/// Encrypt bytes using RSA public key
///
/// Output is one `CIPHER_BLOCK_WIDTH` block per chunk followed by the
/// trailer `[first_chunk_size, chunk_size]`.
pub fn encrypt_bytes(plaintext: &[u8], chunk_size: usize, public_key: &RsaPublicKey) -> RsaResult<Vec<u8>> {
    validate_chunk_size(chunk_size)?;
    validate_modulus(&public_key.n)?;

    // Every c < n, so a modulus that fits bounds every block
    let modulus_width = to_signed_bytes(&public_key.n).len();
    if modulus_width > CIPHER_BLOCK_WIDTH {
        return Err(RsaError::ModulusTooWide {
            bytes: modulus_width,
            width: CIPHER_BLOCK_WIDTH,
        });
    }

    let (first_chunk_size, chunks) = split_from_tail(plaintext, chunk_size);
    let mut ciphertext = Vec::with_capacity(chunks.len() * CIPHER_BLOCK_WIDTH + TRAILER_LEN);

    for chunk in &chunks {
        // c = m^e mod n
        let c = mod_pow(&from_bytes(chunk), &public_key.e, &public_key.n);
        ciphertext.extend_from_slice(&pad_block(&to_signed_bytes(&c)));
    }

    // Both sizes are at most MAX_CHUNK_SIZE and fit in a byte
    ciphertext.push(first_chunk_size as u8);
    ciphertext.push(chunk_size as u8);

    debug!(
        modulus_bits = public_key.bit_length(),
        plaintext_len = plaintext.len(),
        chunks = chunks.len(),
        chunk_size,
        first_chunk_size,
        "encrypted payload"
    );

    Ok(ciphertext)
}
