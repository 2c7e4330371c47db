//! Key files and whole-file encryption through the public API

use rsa_chunk::rsa::{KeyComponent, RsaEngine, RsaError};
use rsa_chunk::util::file_ops::{self, FileError};
use rsa_chunk::EngineConfig;

fn seeded_engine(seed: u64) -> RsaEngine {
    RsaEngine::with_config(&EngineConfig::default().with_seed(seed)).unwrap()
}

#[test]
fn key_files_hold_two_decimal_lines() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public.key");
    let private = dir.path().join("private.key");

    let mut engine = seeded_engine(31);
    engine.create_key_pair().unwrap();
    file_ops::save_public_key(&engine, &public).unwrap();
    file_ops::save_private_key(&engine, &private).unwrap();

    let public_text = std::fs::read_to_string(&public).unwrap();
    assert_eq!(public_text, format!("{}\n{}", engine.n().unwrap(), engine.e().unwrap()));

    let private_text = std::fs::read_to_string(&private).unwrap();
    assert_eq!(private_text, format!("{}\n{}", engine.n().unwrap(), engine.d().unwrap()));
}

#[test]
fn encrypt_and_decrypt_files_with_loaded_keys() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public.key");
    let private = dir.path().join("private.key");
    let plain = dir.path().join("message.txt");
    let encrypted = dir.path().join("message.enc");
    let decrypted = dir.path().join("message.out");

    let mut generator = seeded_engine(32);
    generator.create_key_pair().unwrap();
    file_ops::save_public_key(&generator, &public).unwrap();
    file_ops::save_private_key(&generator, &private).unwrap();

    let message: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    file_ops::write_file(&plain, &message).unwrap();

    let mut sender = RsaEngine::new();
    file_ops::load_public_key(&mut sender, &public).unwrap();
    let written = file_ops::encrypt_file(&sender, &plain, &encrypted, 31).unwrap();
    assert_eq!(written as u64, file_ops::get_file_size(&encrypted).unwrap());

    let mut receiver = RsaEngine::new();
    file_ops::load_private_key(&mut receiver, &private).unwrap();
    let read = file_ops::decrypt_file(&receiver, &encrypted, &decrypted).unwrap();

    assert_eq!(read, message.len());
    assert_eq!(file_ops::read_file(&decrypted).unwrap(), message);
}

#[test]
fn saving_without_keys_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("public.key");

    let engine = RsaEngine::new();
    let err = file_ops::save_public_key(&engine, &path).unwrap_err();

    assert!(matches!(
        err,
        FileError::Crypto(RsaError::MissingKeyComponent(KeyComponent::Modulus))
    ));
    assert!(!path.exists());
}

#[test]
fn malformed_key_file_leaves_engine_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.key");
    std::fs::write(&path, "3233\nnot-a-number\n").unwrap();

    let mut engine = RsaEngine::new();
    let err = file_ops::load_public_key(&mut engine, &path).unwrap_err();

    assert!(matches!(err, FileError::MalformedKeyFile(_)));
    assert!(engine.n().is_err());
    assert!(engine.e().is_err());
}

#[test]
fn decrypting_a_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.enc");
    let output = dir.path().join("corrupt.out");
    std::fs::write(&corrupt, vec![0u8; 50]).unwrap();

    let mut engine = seeded_engine(33);
    engine.create_key_pair().unwrap();

    let err = file_ops::decrypt_file(&engine, &corrupt, &output).unwrap_err();
    assert!(matches!(err, FileError::Crypto(RsaError::MalformedCiphertext(_))));
    assert!(!output.exists());
}

#[test]
fn zero_modulus_from_key_file_is_rejected_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("zero-public.key");
    let private = dir.path().join("zero-private.key");
    std::fs::write(&public, "0\n17").unwrap();
    std::fs::write(&private, "0\n2753").unwrap();

    let mut sender = RsaEngine::new();
    file_ops::load_public_key(&mut sender, &public).unwrap();
    assert_eq!(sender.n().unwrap(), "0");
    assert_eq!(sender.encrypt(b"hello", 4), Err(RsaError::ModulusTooSmall));

    let mut receiver = RsaEngine::new();
    file_ops::load_private_key(&mut receiver, &private).unwrap();
    assert_eq!(receiver.decrypt(&[4, 4]), Err(RsaError::ModulusTooSmall));
}
