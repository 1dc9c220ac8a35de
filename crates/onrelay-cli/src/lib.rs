//! # onrelay-cli — Operator Tooling
//!
//! Subcommand handlers for the `onrelay` binary. The relayer-side
//! workflow is: compute the signing digest for an authorization
//! (`digest`), have the entitled party sign it (`sign`, or an external
//! wallet), and check any incoming triple before submission (`verify`).

pub mod digest;
pub mod keys;
pub mod sign;
