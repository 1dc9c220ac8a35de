//! # Keccak-256 Digest Computation
//!
//! Computes Keccak-256 digests exclusively from [`WireBytes`] (for message
//! layouts) or [`MessageDigest`] (for re-hashing and the personal-message
//! wrap), ensuring every digest in the system descends from a vetted
//! fixed-layout byte sequence.
//!
//! ## Security Invariant
//!
//! There is no Keccak entry point over `&[u8]`. Passing raw bytes is a
//! compile error, which prevents any code path from signing or verifying a
//! digest over an unvetted concatenation.

use sha3::{Digest, Keccak256};

use onrelay_core::{MessageDigest, WireBytes};

/// The generic signed-statement prefix applied before every signature.
///
/// Wrapping a digest in this prefix marks it as a detached signed message,
/// so a signature over it can never double as a signature over a raw
/// protocol payload of the same shape.
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the Keccak-256 digest of a packed message layout.
pub fn keccak256(layout: &WireBytes) -> MessageDigest {
    MessageDigest::from_bytes(digest_of(layout.as_bytes()))
}

/// Re-hash a digest: `keccak256(digest)`.
///
/// The creation schema wraps its trade digest in a second bare hash before
/// the personal-message wrap, so the trade digest itself is never the
/// statement a relayer signs.
pub fn rehash(digest: &MessageDigest) -> MessageDigest {
    MessageDigest::from_bytes(digest_of(digest.as_bytes()))
}

/// Apply the personal-message wrap: `keccak256(prefix ‖ digest)`.
///
/// This is the final step of every signing-digest pipeline; the output is
/// what parties actually sign.
pub fn personal_message_digest(digest: &MessageDigest) -> MessageDigest {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(digest.as_bytes());
    MessageDigest::from_bytes(hasher.finalize().into())
}

fn digest_of(bytes: &[u8]) -> [u8; 32] {
    Keccak256::digest(bytes).into()
}
