//! # Keygen Subcommand
//!
//! Generates a secp256k1 key pair and prints the address plus the secret
//! seed. The seed is printed once, here, and nowhere else — the key-pair
//! type itself never exposes it.

use anyhow::Context;
use clap::Args;
use rand::RngCore;

use onrelay_core::hex;
use onrelay_crypto::EcdsaKeyPair;

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Derive the key pair from this 32-byte hex seed instead of a random
    /// one.
    #[arg(long)]
    pub seed: Option<String>,
}

/// Generate (or re-derive) a key pair and print its identity.
pub fn run(args: KeygenArgs) -> anyhow::Result<()> {
    let seed = match args.seed {
        Some(seed_hex) => hex::decode_fixed::<32>(&seed_hex, "seed")
            .context("seed must be 32 bytes of hex")?,
        None => random_seed(),
    };
    let keypair = EcdsaKeyPair::from_seed(&seed).context("seed is not a valid secret scalar")?;

    println!("address: {}", keypair.address());
    println!("seed:    0x{}", hex::encode(&seed));
    Ok(())
}

fn random_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    loop {
        rand::rngs::OsRng.fill_bytes(&mut seed);
        // The zero scalar and values at or above the curve order are not
        // valid secrets; redraw on the astronomically unlikely miss.
        if EcdsaKeyPair::from_seed(&seed).is_ok() {
            return seed;
        }
    }
}
