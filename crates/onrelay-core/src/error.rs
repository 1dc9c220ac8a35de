//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the OnRelay workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Parse errors name the offending input and the expected shape.
//! - Cryptographic errors fail loudly with full context, but signature
//!   verification against an expected signer never surfaces an ambiguous
//!   error — it collapses to a boolean at the verification seam.

use thiserror::Error;

/// Errors from parsing and validating core types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A hex string could not be decoded.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),

    /// A decoded byte string had the wrong length for its target type.
    #[error("invalid {what} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The type being constructed.
        what: &'static str,
        /// Required byte length.
        expected: usize,
        /// Actual byte length.
        got: usize,
    },
}

/// Errors in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key construction or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// A signature component is malformed (zero scalar, out-of-range
    /// recovery id, or a value outside the curve order).
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Signer recovery failed for a structurally valid signature.
    #[error("signer recovery failed: {0}")]
    RecoveryFailed(String),
}
