//! # Recoverable secp256k1 ECDSA
//!
//! Signer recovery and verification for the escrow protocol's `(v, r, s)`
//! signature triples. A signature over a signing digest identifies its
//! author: the public key is recovered from the digest and the triple, and
//! the author's address is the trailing 20 bytes of the key's Keccak-256
//! digest.
//!
//! ## Security Invariant
//!
//! - [`verify_signer()`] fails closed: any malformed component (zero
//!   scalar, out-of-range recovery id, non-curve point) or any recovered
//!   address other than the expected one yields `false` — never an error
//!   that could be mistaken for success.
//! - Replay protection does NOT live here. A valid signature is public
//!   once broadcast; uniqueness-of-effect is enforced by the trade
//!   ledger's state transitions.
//! - Private keys are never serialized or logged. `EcdsaKeyPair` does not
//!   implement `Serialize` and its `Debug` output is redacted.
//!
//! ## Serde
//!
//! `RecoverableSignature` serializes `r` and `s` as hex-encoded strings
//! and `v` as an integer.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use onrelay_core::{Address, CryptoError, MessageDigest};

/// An ECDSA signature triple with its recovery id.
///
/// `v` follows the 27/28 wire convention; the raw recovery id 0/1 is also
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableSignature {
    /// Recovery id: 27/28 (wire convention) or 0/1.
    pub v: u8,
    /// The `r` scalar, big-endian.
    #[serde(with = "onrelay_core::hex::hex32")]
    pub r: [u8; 32],
    /// The `s` scalar, big-endian.
    #[serde(with = "onrelay_core::hex::hex32")]
    pub s: [u8; 32],
}

impl RecoverableSignature {
    /// Assemble a signature from its wire components.
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }
}

/// An secp256k1 key pair for signing authorization digests.
///
/// Does not implement `Serialize` — private keys must not be accidentally
/// serialized into logs, responses, or artifacts.
pub struct EcdsaKeyPair {
    signing_key: SigningKey,
}

impl EcdsaKeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// Create a key pair from a raw 32-byte secret scalar.
    ///
    /// Rejects the zero scalar and values at or above the curve order.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key = SigningKey::from_bytes(&(*seed).into())
            .map_err(|e| CryptoError::KeyError(format!("invalid secret scalar: {e}")))?;
        Ok(Self { signing_key })
    }

    /// The 20-byte address this key pair signs as.
    pub fn address(&self) -> Address {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a signing digest, producing a recoverable `(v, r, s)` triple
    /// with `v` in the 27/28 wire convention.
    pub fn sign_digest(&self, digest: &MessageDigest) -> Result<RecoverableSignature, CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|e| CryptoError::KeyError(format!("signing failed: {e}")))?;
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(RecoverableSignature::new(27 + recovery_id.to_byte(), r, s))
    }
}

impl std::fmt::Debug for EcdsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EcdsaKeyPair(<private>)")
    }
}

/// Recover the signer address from a signing digest and a signature
/// triple.
///
/// # Errors
///
/// Returns `CryptoError::MalformedSignature` for structurally invalid
/// input (zero scalar, unknown recovery id) and
/// `CryptoError::RecoveryFailed` when no public key can be recovered.
pub fn recover_signer(
    digest: &MessageDigest,
    signature: &RecoverableSignature,
) -> Result<Address, CryptoError> {
    if signature.r == [0u8; 32] || signature.s == [0u8; 32] {
        return Err(CryptoError::MalformedSignature(
            "zero signature scalar".to_string(),
        ));
    }
    let recovery_id = normalize_v(signature.v)
        .and_then(RecoveryId::from_byte)
        .ok_or_else(|| {
            CryptoError::MalformedSignature(format!("recovery id out of range: {}", signature.v))
        })?;
    let sig = Signature::from_scalars(signature.r, signature.s)
        .map_err(|e| CryptoError::MalformedSignature(format!("invalid scalars: {e}")))?;
    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(address_from_verifying_key(&verifying_key))
}

/// Verify that a signature over a signing digest was produced by the
/// expected signer.
///
/// Fails closed: malformed signatures and mismatched signers both yield
/// `false`.
pub fn verify_signer(
    digest: &MessageDigest,
    signature: &RecoverableSignature,
    expected: &Address,
) -> bool {
    match recover_signer(digest, signature) {
        Ok(recovered) => recovered == *expected,
        Err(_) => false,
    }
}

/// Derive the 20-byte address of a public key: the trailing 20 bytes of
/// `keccak256` over the uncompressed point, SEC1 tag byte excluded.
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address::from_bytes(address)
}

/// Map a wire `v` (27/28) or raw recovery id (0/1) to the raw form.
fn normalize_v(v: u8) -> Option<u8> {
    match v {
        0 | 1 => Some(v),
        27 | 28 => Some(v - 27),
        _ => None,
    }
}
