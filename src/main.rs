use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finvault::cli::{
    handle_decrypt, handle_encrypt, handle_load, handle_paths, handle_store, resolve_secret,
};
use finvault::config::{StoragePaths, DEFAULT_KEY_VAR};
use finvault::storage::SecureStore;

#[derive(Parser)]
#[command(
    name = "finvault",
    author = "Kaylee Beyene",
    version,
    about = "Encrypted local storage for sensitive financial data",
    long_about = "finvault encrypts data with AES-256-GCM under keys derived \
                  from a master secret, and stores the resulting envelopes as \
                  JSON files. The master secret is read from an environment \
                  variable and is never written to disk."
)]
struct Cli {
    /// Environment variable holding the master key
    #[arg(long, global = true, default_value = DEFAULT_KEY_VAR)]
    key_var: String,

    /// Prompt for the master key instead of reading the environment
    #[arg(long, global = true)]
    prompt: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt plaintext into an envelope
    Encrypt {
        /// Read plaintext from this file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the envelope here (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt an envelope back to plaintext
    Decrypt {
        /// Read the envelope from this file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the plaintext here (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encrypt and save a named record in the data directory
    Store {
        /// Record name
        name: String,
        /// Read plaintext from this file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Load and decrypt a named record
    Load {
        /// Record name
        name: String,
        /// Write the plaintext here (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Paths,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = StoragePaths::new()?;

    if let Commands::Paths = cli.command {
        handle_paths(&paths, &cli.key_var)?;
        return Ok(());
    }

    let store = SecureStore::new(resolve_secret(&cli.key_var, cli.prompt)?);

    match cli.command {
        Commands::Encrypt { input, output } => {
            handle_encrypt(&store, input.as_deref(), output.as_deref())?
        }
        Commands::Decrypt { input, output } => {
            handle_decrypt(&store, input.as_deref(), output.as_deref())?
        }
        Commands::Store { name, input } => {
            handle_store(&store, &paths, &name, input.as_deref())?
        }
        Commands::Load { name, output } => {
            handle_load(&store, &paths, &name, output.as_deref())?
        }
        Commands::Paths => unreachable!(),
    }

    Ok(())
}
