//! # onrelay-core — Foundational Types for the OnRelay Escrow Engine
//!
//! This crate is the bedrock of the OnRelay workspace. It defines the
//! type-system primitives that the escrow protocol is built on. Every other
//! crate in the workspace depends on `onrelay-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `TradeId`, `Address`,
//!    `MessageDigest` — all newtypes with validated constructors. No bare
//!    byte slices or strings for identifiers.
//!
//! 2. **`WireBytes` newtype.** ALL message-digest computation flows through
//!    the fixed-layout encoders in `wire.rs`. No ad-hoc byte concatenation
//!    for signable messages. Ever. A digest over an unvetted byte sequence
//!    is unconstructible by design.
//!
//! 3. **Single `ActionKind` enum.** One definition, three variants,
//!    exhaustive `match` everywhere. Each authorized action maps to exactly
//!    one message layout and one required signer role.
//!
//! 4. **UTC-only timestamps.** The `Timestamp` type enforces UTC with
//!    seconds precision. Timestamps stamp event records; they never
//!    participate in signing digests.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `onrelay-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod digest;
pub mod error;
pub mod hex;
pub mod identity;
pub mod temporal;
pub mod wire;

// Re-export primary types for ergonomic imports.
pub use digest::MessageDigest;
pub use error::{CoreError, CryptoError};
pub use identity::{Address, TradeId};
pub use temporal::Timestamp;
pub use wire::{ActionKind, WireBytes};
