// Chunk Layout
// Fixed-width block format shared by the chunk encryptor and decryptor
//
// Stream: [33-byte block]* [first_chunk_size] [chunk_size]

use super::bigint::RsaBigInt;
use super::error::{RsaError, RsaResult};

/// Width of every encrypted block: a 256-bit modulus plus a sign byte
pub const CIPHER_BLOCK_WIDTH: usize = 33;

/// Smallest accepted plaintext chunk size
pub const MIN_CHUNK_SIZE: usize = 1;

/// Largest accepted plaintext chunk size; leaves room below the modulus
pub const MAX_CHUNK_SIZE: usize = 31;

/// Chunk size used when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// Bytes appended after the last block
pub const TRAILER_LEN: usize = 2;

/// Reject chunk sizes outside [MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]
pub fn validate_chunk_size(chunk_size: usize) -> RsaResult<()> {
    if (MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
        Ok(())
    } else {
        Err(RsaError::InvalidChunkSize {
            size: chunk_size,
            min: MIN_CHUNK_SIZE,
            max: MAX_CHUNK_SIZE,
        })
    }
}

/// Moduli of 0 and 1 leave no residues to encrypt into
pub fn validate_modulus(n: &RsaBigInt) -> RsaResult<()> {
    if *n < RsaBigInt::from(2u8) {
        Err(RsaError::ModulusTooSmall)
    } else {
        Ok(())
    }
}

/// Slice `plaintext` into `chunk_size` pieces counted from the end.
///
/// Every chunk but the first is full; the first holds the remainder of
/// `len % chunk_size`, or a full chunk when the length divides evenly.
/// Returns the first chunk's size (as recorded in the trailer) and the chunks.
pub fn split_from_tail(plaintext: &[u8], chunk_size: usize) -> (usize, Vec<&[u8]>) {
    let first_chunk_size = match plaintext.len() % chunk_size {
        0 => chunk_size,
        remainder => remainder,
    };

    if plaintext.is_empty() {
        return (first_chunk_size, Vec::new());
    }

    let (first, rest) = plaintext.split_at(first_chunk_size);
    let mut chunks = Vec::with_capacity(1 + rest.len() / chunk_size);
    chunks.push(first);
    chunks.extend(rest.chunks(chunk_size));

    (first_chunk_size, chunks)
}

/// Right-align `value` in a zero-filled block of `CIPHER_BLOCK_WIDTH` bytes.
/// The caller guarantees `value.len() <= CIPHER_BLOCK_WIDTH`.
pub fn pad_block(value: &[u8]) -> [u8; CIPHER_BLOCK_WIDTH] {
    let mut block = [0u8; CIPHER_BLOCK_WIDTH];
    block[CIPHER_BLOCK_WIDTH - value.len()..].copy_from_slice(value);
    block
}

/// Fit a decrypted value to `width` bytes.
///
/// Longer values lose exactly one leading byte, which is assumed to be a sign
/// byte; this only holds while the chunk stays well below the modulus width.
/// Shorter values are left-padded with zeros.
pub fn align_chunk(raw: Vec<u8>, width: usize) -> Vec<u8> {
    if raw.len() > width {
        raw[1..].to_vec()
    } else if raw.len() < width {
        let mut aligned = vec![0u8; width - raw.len()];
        aligned.extend_from_slice(&raw);
        aligned
    } else {
        raw
    }
}

/// Shape of an encrypted stream, read from its trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamLayout {
    pub blocks: usize,
    pub first_chunk_size: usize,
    pub chunk_size: usize,
}

impl StreamLayout {
    /// Plaintext length the stream decodes to under the matching key
    pub fn plaintext_len(&self) -> usize {
        match self.blocks {
            0 => 0,
            n => self.first_chunk_size + (n - 1) * self.chunk_size,
        }
    }

    /// Encrypted block `index` (without the trailer)
    pub fn block<'a>(&self, ciphertext: &'a [u8], index: usize) -> Option<&'a [u8]> {
        if index >= self.blocks {
            return None;
        }
        let start = index * CIPHER_BLOCK_WIDTH;
        ciphertext.get(start..start + CIPHER_BLOCK_WIDTH)
    }
}

/// Validate the stream shape and read its trailer, without any key
pub fn inspect_stream(ciphertext: &[u8]) -> RsaResult<StreamLayout> {
    if ciphertext.len() < TRAILER_LEN {
        return Err(RsaError::MalformedCiphertext(format!(
            "stream is {} bytes, shorter than the {}-byte trailer",
            ciphertext.len(),
            TRAILER_LEN
        )));
    }

    let body_len = ciphertext.len() - TRAILER_LEN;
    if body_len % CIPHER_BLOCK_WIDTH != 0 {
        return Err(RsaError::MalformedCiphertext(format!(
            "body of {} bytes is not a multiple of {}",
            body_len, CIPHER_BLOCK_WIDTH
        )));
    }

    let chunk_size = ciphertext[ciphertext.len() - 1] as usize;
    let first_chunk_size = ciphertext[ciphertext.len() - 2] as usize;

    if validate_chunk_size(chunk_size).is_err() {
        return Err(RsaError::MalformedCiphertext(format!(
            "trailer chunk size {} is outside [{}, {}]",
            chunk_size, MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
        )));
    }
    if first_chunk_size == 0 || first_chunk_size > chunk_size {
        return Err(RsaError::MalformedCiphertext(format!(
            "trailer first chunk size {} is outside [1, {}]",
            first_chunk_size, chunk_size
        )));
    }

    Ok(StreamLayout {
        blocks: body_len / CIPHER_BLOCK_WIDTH,
        first_chunk_size,
        chunk_size,
    })
}
