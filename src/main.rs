//! rsa-chunk: command line front end for the chunked RSA engine
//!
//! Usage:
//!   rsa-chunk keygen  --public pub.key --private priv.key
//!   rsa-chunk encrypt --public pub.key --input file --output file.enc [--chunk-size 16]
//!   rsa-chunk decrypt --private priv.key --input file.enc --output file
//!   rsa-chunk inspect --input file.enc
//!   rsa-chunk config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use rsa_chunk::rsa::{inspect_stream, RsaEngine};
use rsa_chunk::util::file_ops;
use rsa_chunk::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "rsa-chunk", version, about = "Teaching-grade RSA key generation and chunked file encryption")]
struct Cli {
    /// Path to a TOML engine configuration file
    #[arg(long, short = 'c', env = "RSA_CHUNK_CONFIG")]
    config: Option<PathBuf>,

    /// Seed the random source for reproducible keys
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RSA_CHUNK_LOG", default_value = "info")]
    log: String,

    /// Log format (json, text)
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a key pair and write the public and private key files
    Keygen {
        #[arg(long)]
        public: PathBuf,
        #[arg(long)]
        private: PathBuf,
    },
    /// Encrypt a file with a public key file
    Encrypt {
        #[arg(long)]
        public: PathBuf,
        #[arg(long, short = 'i')]
        input: PathBuf,
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// Plaintext bytes per block, 1..=31 (default: from config)
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Decrypt a file with a private key file
    Decrypt {
        #[arg(long)]
        private: PathBuf,
        #[arg(long, short = 'i')]
        input: PathBuf,
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// Show the block layout of an encrypted file
    Inspect {
        #[arg(long, short = 'i')]
        input: PathBuf,
    },
    /// Print the effective engine configuration as TOML
    Config,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log, &cli.log_format);

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut engine = RsaEngine::with_config(&config).context("invalid engine configuration")?;

    match cli.command {
        Command::Keygen { public, private } => {
            engine.create_key_pair().context("key generation failed")?;

            file_ops::save_public_key(&engine, &public)
                .with_context(|| format!("failed to write {}", public.display()))?;
            file_ops::save_private_key(&engine, &private)
                .with_context(|| format!("failed to write {}", private.display()))?;

            println!("modulus N: {}", engine.n()?);
            println!("public exponent: {}", engine.e()?);
        }
        Command::Encrypt {
            public,
            input,
            output,
            chunk_size,
        } => {
            if let Some(size) = chunk_size {
                engine.set_chunk_size(size)?;
            }

            file_ops::load_public_key(&mut engine, &public)
                .with_context(|| format!("failed to load public key {}", public.display()))?;

            let written = file_ops::encrypt_file(&engine, &input, &output, engine.chunk_size())
                .with_context(|| format!("failed to encrypt {}", input.display()))?;

            info!(
                input = %input.display(),
                output = %output.display(),
                chunk_size = engine.chunk_size(),
                "encrypted file"
            );
            println!("wrote {} ({})", output.display(), file_ops::format_file_size(written as u64));
        }
        Command::Decrypt {
            private,
            input,
            output,
        } => {
            file_ops::load_private_key(&mut engine, &private)
                .with_context(|| format!("failed to load private key {}", private.display()))?;

            let written = file_ops::decrypt_file(&engine, &input, &output)
                .with_context(|| format!("failed to decrypt {}", input.display()))?;

            info!(input = %input.display(), output = %output.display(), "decrypted file");
            println!("wrote {} ({})", output.display(), file_ops::format_file_size(written as u64));
        }
        Command::Inspect { input } => {
            let data = file_ops::read_file(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let layout = inspect_stream(&data)?;

            println!("file size: {}", file_ops::format_file_size(data.len() as u64));
            println!("blocks: {}", layout.blocks);
            println!("chunk size: {}", layout.chunk_size);
            println!("first chunk size: {}", layout.first_chunk_size);
            println!("plaintext length: {}", layout.plaintext_len());
            if let Some(block) = layout.block(&data, 0) {
                println!("first block: {}", hex::encode(block));
            }
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
