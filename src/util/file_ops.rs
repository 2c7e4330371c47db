// File Operations for RSA Encryption/Decryption
// Key files, whole-file reads and writes, and file-level encrypt/decrypt

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::rsa::bigint::RsaBigInt;
use crate::rsa::{RsaEngine, RsaError};

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed key file: {0}")]
    MalformedKeyFile(String),

    #[error(transparent)]
    Crypto(#[from] RsaError),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Read entire file into memory
pub fn read_file(path: &Path) -> FileResult<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Write data to file
pub fn write_file(path: &Path, data: &[u8]) -> FileResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> FileResult<u64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len())
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Key file body: modulus line, then exponent
pub fn format_key_file(modulus: &str, exponent: &str) -> String {
    format!("{}\n{}", modulus, exponent)
}

/// Parse exactly two whitespace-separated decimal integers: modulus, exponent
pub fn parse_key_file(contents: &str) -> FileResult<(RsaBigInt, RsaBigInt)> {
    let tokens: Vec<&str> = contents.split_whitespace().collect();
    let [modulus, exponent] = tokens.as_slice() else {
        return Err(FileError::MalformedKeyFile(format!(
            "expected 2 numbers, found {}",
            tokens.len()
        )));
    };

    Ok((parse_decimal(modulus)?, parse_decimal(exponent)?))
}

fn parse_decimal(token: &str) -> FileResult<RsaBigInt> {
    token
        .parse::<RsaBigInt>()
        .map_err(|e| FileError::MalformedKeyFile(format!("{:?} is not a decimal integer: {}", token, e)))
}

/// Write N and E; fails before creating the file if either is unset
pub fn save_public_key(engine: &RsaEngine, path: &Path) -> FileResult<()> {
    let contents = format_key_file(&engine.n()?, &engine.e()?);
    write_file(path, contents.as_bytes())?;
    info!(path = %path.display(), "saved public key");
    Ok(())
}

/// Write N and D; fails before creating the file if either is unset
pub fn save_private_key(engine: &RsaEngine, path: &Path) -> FileResult<()> {
    let contents = format_key_file(&engine.n()?, &engine.d()?);
    write_file(path, contents.as_bytes())?;
    info!(path = %path.display(), "saved private key");
    Ok(())
}

/// Load N and E into the engine; nothing is set unless both parse
pub fn load_public_key(engine: &mut RsaEngine, path: &Path) -> FileResult<()> {
    let contents = std::fs::read_to_string(path)?;
    let (n, e) = parse_key_file(&contents)?;
    engine.set_n(n);
    engine.set_e(e);
    info!(path = %path.display(), "loaded public key");
    Ok(())
}

/// Load N and D into the engine; nothing is set unless both parse
pub fn load_private_key(engine: &mut RsaEngine, path: &Path) -> FileResult<()> {
    let contents = std::fs::read_to_string(path)?;
    let (n, d) = parse_key_file(&contents)?;
    engine.set_n(n);
    engine.set_d(d);
    info!(path = %path.display(), "loaded private key");
    Ok(())
}

/// Encrypt `input` into `output`; returns the ciphertext length
pub fn encrypt_file(engine: &RsaEngine, input: &Path, output: &Path, chunk_size: usize) -> FileResult<usize> {
    let plaintext = read_file(input)?;
    let ciphertext = engine.encrypt(&plaintext, chunk_size)?;
    write_file(output, &ciphertext)?;
    Ok(ciphertext.len())
}

/// Decrypt `input` into `output`; returns the plaintext length
pub fn decrypt_file(engine: &RsaEngine, input: &Path, output: &Path) -> FileResult<usize> {
    let ciphertext = read_file(input)?;
    let plaintext = engine.decrypt(&ciphertext)?;
    write_file(output, &plaintext)?;
    Ok(plaintext.len())
}
