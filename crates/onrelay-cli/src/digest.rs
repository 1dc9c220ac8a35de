//! # Digest Subcommand
//!
//! Computes the signing digest for each authorization schema. The output
//! is what the entitled party signs — with `onrelay sign` or any wallet
//! that produces recoverable secp256k1 triples over a 32-byte prehash.

use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};

use onrelay_core::wire::ActionKind;
use onrelay_core::{Address, TradeId};
use onrelay_crypto::message;

/// Arguments for the digest subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Message schema to compute.
    #[command(subcommand)]
    pub schema: DigestSchema,
}

/// The three authorization message schemas.
#[derive(Subcommand, Debug)]
pub enum DigestSchema {
    /// Trade creation (relayer co-signature).
    Creation {
        /// 16-byte trade identifier, hex.
        #[arg(long)]
        trade_id: String,
        /// Seller address, hex.
        #[arg(long)]
        seller: String,
        /// Buyer address, hex.
        #[arg(long)]
        buyer: String,
        /// Trade value.
        #[arg(long)]
        value: u128,
        /// Fee in basis points.
        #[arg(long)]
        fee_bps: u16,
    },
    /// Release or cancellation (fee-bounded).
    Action {
        /// 16-byte trade identifier, hex.
        #[arg(long)]
        trade_id: String,
        /// Which direct release path.
        #[arg(long)]
        action: RelayAction,
        /// Maximum fee the signature covers.
        #[arg(long, default_value_t = u128::MAX)]
        fee_bound: u128,
    },
    /// Dispute resolution (the ruling percentage is not signed).
    Dispute {
        /// 16-byte trade identifier, hex.
        #[arg(long)]
        trade_id: String,
    },
}

/// The two relay actions, as CLI values.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RelayAction {
    /// Release to the buyer (seller signs).
    Release,
    /// Cancel back to the seller (buyer signs).
    Cancel,
}

impl From<RelayAction> for ActionKind {
    fn from(action: RelayAction) -> Self {
        match action {
            RelayAction::Release => Self::Release,
            RelayAction::Cancel => Self::Cancel,
        }
    }
}

/// Compute and print the requested signing digest.
pub fn run(args: DigestArgs) -> anyhow::Result<()> {
    match args.schema {
        DigestSchema::Creation {
            trade_id,
            seller,
            buyer,
            value,
            fee_bps,
        } => {
            let trade_id = TradeId::from_hex(&trade_id).context("invalid trade id")?;
            let seller = Address::from_hex(&seller).context("invalid seller address")?;
            let buyer = Address::from_hex(&buyer).context("invalid buyer address")?;
            let trade_digest =
                message::creation_digest(&trade_id, &seller, &buyer, value, fee_bps);
            let signing =
                message::creation_signing_digest(&trade_id, &seller, &buyer, value, fee_bps);
            println!("trade digest:   {trade_digest}");
            println!("signing digest: {signing}");
        }
        DigestSchema::Action {
            trade_id,
            action,
            fee_bound,
        } => {
            let trade_id = TradeId::from_hex(&trade_id).context("invalid trade id")?;
            let signing = message::action_signing_digest(&trade_id, action.into(), fee_bound);
            println!("signing digest: {signing}");
        }
        DigestSchema::Dispute { trade_id } => {
            let trade_id = TradeId::from_hex(&trade_id).context("invalid trade id")?;
            let signing = message::action_signing_digest(&trade_id, ActionKind::Resolve, 0);
            println!("signing digest: {signing}");
        }
    }
    Ok(())
}
