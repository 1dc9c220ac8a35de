//! # Sign and Verify Subcommands
//!
//! Detached signing of a precomputed signing digest, and checking an
//! incoming `(v, r, s)` triple before submitting it to an engine.

use anyhow::Context;
use clap::Args;

use onrelay_core::{hex, Address, MessageDigest};
use onrelay_crypto::secp256k1::{recover_signer, EcdsaKeyPair, RecoverableSignature};

/// Arguments for the sign subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// 32-byte hex seed of the signing key.
    #[arg(long)]
    pub seed: String,
    /// 32-byte hex signing digest (from `onrelay digest`).
    #[arg(long)]
    pub digest: String,
}

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// 32-byte hex signing digest the triple claims to cover.
    #[arg(long)]
    pub digest: String,
    /// Recovery id (27/28 or 0/1).
    #[arg(long)]
    pub v: u8,
    /// The r scalar, hex.
    #[arg(long)]
    pub r: String,
    /// The s scalar, hex.
    #[arg(long)]
    pub s: String,
    /// Expected signer address; when given, the exit status reflects the
    /// match.
    #[arg(long)]
    pub expected: Option<String>,
}

/// Sign a digest and print the triple as JSON.
pub fn run_sign(args: SignArgs) -> anyhow::Result<()> {
    let seed = hex::decode_fixed::<32>(&args.seed, "seed").context("seed must be 32 bytes of hex")?;
    let keypair = EcdsaKeyPair::from_seed(&seed).context("seed is not a valid secret scalar")?;
    let digest = MessageDigest::from_hex(&args.digest).context("invalid signing digest")?;

    let signature = keypair.sign_digest(&digest).context("signing failed")?;
    println!("{}", serde_json::to_string_pretty(&signature)?);
    Ok(())
}

/// Recover the signer of a triple and optionally check it against an
/// expected address.
pub fn run_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let digest = MessageDigest::from_hex(&args.digest).context("invalid signing digest")?;
    let r = hex::decode_fixed::<32>(&args.r, "r scalar")?;
    let s = hex::decode_fixed::<32>(&args.s, "s scalar")?;
    let signature = RecoverableSignature::new(args.v, r, s);

    let recovered = recover_signer(&digest, &signature).context("signer recovery failed")?;
    println!("recovered: {recovered}");

    if let Some(expected) = args.expected {
        let expected = Address::from_hex(&expected).context("invalid expected address")?;
        if recovered == expected {
            println!("match: yes");
        } else {
            println!("match: no");
            anyhow::bail!("recovered signer does not match {expected}");
        }
    }
    Ok(())
}
