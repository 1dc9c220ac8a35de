//! # onrelay-engine — The Escrow Engine
//!
//! The orchestrator of the OnRelay stack. Composes the wire layouts and
//! signature recovery from `onrelay-crypto` with the trade ledger from
//! `onrelay-state` into the four escrow operations:
//!
//! - **`create_escrow`** — relayer-co-signed trade creation; pulls the
//!   value into custody.
//! - **`relay`** — the two direct release paths: seller-authorized release
//!   to the buyer (fee deducted) and buyer-authorized cancellation (full
//!   refund to the seller).
//! - **`resolve_dispute`** — applies an arbitrator-authorized ruling,
//!   splitting the value between the parties.
//! - **`trade` / `events`** — side-effect-free queries.
//!
//! ## Modules
//!
//! - `config.rs` — construction-time role configuration, immutable
//!   thereafter.
//! - `fees.rs` — checked basis-point fee and dispute-split arithmetic.
//! - `gateway.rs` — the `ValueGateway` seam to the external token ledger,
//!   plus an in-memory implementation.
//! - `event.rs` — append-only observable event records.
//! - `engine.rs` — the operations themselves.
//!
//! ## Atomicity
//!
//! Every operation either fully succeeds or leaves no trace: gateway
//! transfers happen first and the ledger transition commits only after
//! they succeed, and multi-payout settlements go through the gateway's
//! all-or-nothing split call. No trade is ever observable "half released".

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod fees;
pub mod gateway;

pub use config::EngineConfig;
pub use engine::EscrowEngine;
pub use error::EscrowError;
pub use event::EscrowEvent;
pub use gateway::{TokenLedger, TransferError, ValueGateway};
