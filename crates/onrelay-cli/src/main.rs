//! # onrelay CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// OnRelay escrow toolchain.
///
/// Computes signing digests for the escrow authorization schemas, signs
/// them, generates keys, and checks incoming signature triples.
#[derive(Parser, Debug)]
#[command(name = "onrelay", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate or re-derive a secp256k1 key pair.
    Keygen(onrelay_cli::keys::KeygenArgs),
    /// Compute the signing digest for an authorization schema.
    Digest(onrelay_cli::digest::DigestArgs),
    /// Sign a signing digest with a seed.
    Sign(onrelay_cli::sign::SignArgs),
    /// Recover and check the signer of a (v, r, s) triple.
    Verify(onrelay_cli::sign::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen(args) => onrelay_cli::keys::run(args),
        Commands::Digest(args) => onrelay_cli::digest::run(args),
        Commands::Sign(args) => onrelay_cli::sign::run_sign(args),
        Commands::Verify(args) => onrelay_cli::sign::run_verify(args),
    }
}
