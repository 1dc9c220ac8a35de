//! # onrelay-crypto — Cryptographic Primitives for OnRelay
//!
//! Implements the digest and signature half of the escrow protocol:
//!
//! - **Keccak** (`keccak.rs`): Keccak-256 over vetted wire layouts, digest
//!   re-hashing, and the prefixed personal-message wrap applied before any
//!   signature.
//!
//! - **Messages** (`message.rs`): the signing-digest pipeline for the three
//!   authorization schemas — trade creation, fee-bounded release/cancel,
//!   and dispute resolution.
//!
//! - **secp256k1** (`secp256k1.rs`): recoverable ECDSA — `(v, r, s)`
//!   signatures, signer recovery to a 20-byte address, fail-closed
//!   verification against an expected signer, and key pairs for tooling
//!   and tests.
//!
//! ## Crate Policy
//!
//! - Depends only on `onrelay-core` internally.
//! - Digest entry points accept `WireBytes` or `MessageDigest`, never raw
//!   byte slices.
//! - Private keys are never serialized or logged.

pub mod keccak;
pub mod message;
pub mod secp256k1;

pub use keccak::{keccak256, personal_message_digest, rehash};
pub use message::{
    action_signing_digest, creation_digest, creation_signing_digest,
};
pub use secp256k1::{recover_signer, verify_signer, EcdsaKeyPair, RecoverableSignature};
