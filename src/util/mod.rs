// Utility Module
// File and key-file I/O around the RSA engine

pub mod file_ops;
