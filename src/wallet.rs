//! Wallet cryptographic substrate: secp256k1 key generation, checksummed
//! address derivation, canonical compact recoverable signatures, and
//! signature/address recovery.
//!
//! Every public function here is a pure function of its inputs (plus, for
//! [`generate_key_pair`]/[`generate_wallet`], the system CSPRNG). Security
//! of the identity chain built on top of this module rests on exact
//! byte-level agreement between signer and verifier, so the encodings
//! below follow the spec's layout precisely rather than any "more
//! idiomatic" alternative (e.g. using the decoded public-key bytes for
//! address derivation instead of its ASCII hex text).
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use crate::errors::XeError;
use crate::hash::{keccak256_of_text, sha256_of_text};

/// A 130-character lowercase hex signature: `r(64) || s(64) || v(2)`.
pub type SignatureHex = String;

/// A generated or restored wallet: private key, compressed public key, and
/// the derived checksummed address.
#[derive(Debug, Clone)]
pub struct Wallet {
    private_key: SecretKey,
    public_key_hex: String,
    address: String,
}

impl Wallet {
    /// The private key as 64 lowercase hex characters.
    ///
    /// Named explicitly (not `Display`/`Deref`) so call sites that reach
    /// for it read as a deliberate, guarded access rather than an
    /// incidental print or comparison.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key.secret_bytes())
    }

    /// The compressed public key as 66 lowercase hex characters.
    pub fn public_key_hex(&self) -> &str {
        &self.public_key_hex
    }

    /// The checksummed `xe_` address.
    pub fn address(&self) -> &str {
        &self.address
    }

    fn secret_key(&self) -> &SecretKey {
        &self.private_key
    }
}

/// Generate a fresh secp256k1 key pair using the system CSPRNG.
pub fn generate_key_pair() -> (SecretKey, PublicKey) {
    let secp = Secp256k1::new();
    let mut rng = rand::thread_rng();
    secp.generate_keypair(&mut rng)
}

/// Generate a fresh wallet: key pair plus derived checksummed address.
pub fn generate_wallet() -> Wallet {
    let (secret_key, public_key) = generate_key_pair();
    let public_key_hex = hex::encode(public_key.serialize());
    let address = generate_checksum_address_from_pubkey_hex(&public_key_hex);
    Wallet {
        private_key: secret_key,
        public_key_hex,
        address,
    }
}

/// Restore a wallet from a 64-character hex private key.
pub fn restore_wallet_from_private_key(private_key_hex: &str) -> Result<Wallet, XeError> {
    let bytes = hex::decode(private_key_hex)
        .map_err(|e| XeError::InvalidPrivateKey(format!("not valid hex: {e}")))?;
    let secret_key = SecretKey::from_slice(&bytes)
        .map_err(|e| XeError::InvalidPrivateKey(format!("not a valid scalar: {e}")))?;
    let secp = Secp256k1::new();
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    let public_key_hex = hex::encode(public_key.serialize());
    let address = generate_checksum_address_from_pubkey_hex(&public_key_hex);
    Ok(Wallet {
        private_key: secret_key,
        public_key_hex,
        address,
    })
}

/// Derive the compressed public key (66 hex chars) for a private key.
pub fn private_key_to_public_key(private_key_hex: &str) -> Result<String, XeError> {
    Ok(restore_wallet_from_private_key(private_key_hex)?
        .public_key_hex()
        .to_string())
}

/// Derive the checksummed address for a private key.
pub fn private_key_to_checksum_address(private_key_hex: &str) -> Result<String, XeError> {
    Ok(restore_wallet_from_private_key(private_key_hex)?
        .address()
        .to_string())
}

/// Derive the checksummed address for a compressed public key (66 hex chars).
pub fn public_key_to_checksum_address(public_key_hex: &str) -> Result<String, XeError> {
    let bytes = hex::decode(public_key_hex)
        .map_err(|e| XeError::InvalidPublicKey(format!("not valid hex: {e}")))?;
    PublicKey::from_slice(&bytes)
        .map_err(|e| XeError::InvalidPublicKey(format!("not a valid point: {e}")))?;
    Ok(generate_checksum_address_from_pubkey_hex(public_key_hex))
}

fn generate_checksum_address_from_pubkey_hex(public_key_hex: &str) -> String {
    let h = hex::encode(keccak256_of_text(public_key_hex));
    let body = &h[h.len() - 40..];
    checksum_body(body)
}

/// Apply the EIP-55-like checksum to an already-lowercased 40-char hex body,
/// returning the full `xe_`-prefixed address.
fn checksum_body(body_lower: &str) -> String {
    let h2 = hex::encode(keccak256_of_text(body_lower));
    let mut out = String::with_capacity(43);
    out.push_str("xe_");
    for (j, c) in body_lower.chars().enumerate() {
        let indicator = h2.as_bytes()[j];
        let indicator = (indicator as char).to_digit(16).unwrap_or(0);
        if indicator >= 8 {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Re-derive the canonical checksummed form of any `xe_` + 40 hex address,
/// regardless of the case it was supplied in.
///
/// Idempotent: `generate_checksum_address(generate_checksum_address(a)) ==
/// generate_checksum_address(a)`.
pub fn generate_checksum_address(address: &str) -> Result<String, XeError> {
    let body = address
        .strip_prefix("xe_")
        .ok_or_else(|| XeError::InvalidAddress("missing xe_ prefix".into()))?;
    if body.len() != 40 || !body.bytes().all(is_ascii_hex_digit) {
        return Err(XeError::InvalidAddress(
            "body is not exactly 40 hex characters".into(),
        ));
    }
    Ok(checksum_body(&body.to_ascii_lowercase()))
}

fn is_ascii_hex_digit(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b) || (b'A'..=b'F').contains(&b)
}

/// Validate that `address` is well-formed and carries the correct checksum.
///
/// Total and infallible: malformed input simply yields `false`.
pub fn checksum_address_is_valid(address: &str) -> bool {
    let Some(body) = address.strip_prefix("xe_") else {
        return false;
    };
    if body.len() != 40 || !body.bytes().all(is_ascii_hex_digit) {
        return false;
    }
    match generate_checksum_address(address) {
        Ok(canonical) => canonical == address,
        Err(_) => false,
    }
}

/// `generateSignature`: sign the SHA-256 digest of `msg` (hex-encoded text,
/// treated as the 32-byte digest) and return the 130-char compact
/// recoverable signature.
pub fn generate_signature(private_key_hex: &str, msg: &str) -> Result<SignatureHex, XeError> {
    let wallet = restore_wallet_from_private_key(private_key_hex)?;
    sign_digest(wallet.secret_key(), &sha256_of_text(msg))
}

fn sign_digest(secret_key: &SecretKey, digest: &[u8; 32]) -> Result<SignatureHex, XeError> {
    let secp = Secp256k1::new();
    let message = Message::from_digest(*digest);
    let recoverable: RecoverableSignature = secp.sign_ecdsa_recoverable(&message, secret_key);
    let (recovery_id, compact) = recoverable.serialize_compact();
    let v = recovery_id.to_i32();
    debug_assert!((0..=1).contains(&v), "secp256k1 recovery id out of range");
    Ok(format!("{}{:02x}", hex::encode(compact), v))
}

/// Parsed form of a 130-char signature hex string.
struct ParsedSignature {
    r: [u8; 32],
    s: [u8; 32],
    v: i32,
}

fn parse_signature(sig: &str) -> Result<ParsedSignature, XeError> {
    if sig.len() != 130 || !sig.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()) {
        return Err(XeError::InvalidSignature(
            "signature must be 130 lowercase hex characters".into(),
        ));
    }
    let bytes = hex::decode(sig)
        .map_err(|e| XeError::InvalidSignature(format!("not valid hex: {e}")))?;
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[0..32]);
    s.copy_from_slice(&bytes[32..64]);
    let v = bytes[64] as i32;
    Ok(ParsedSignature { r, s, v })
}

/// `recoverPublicKeyFromSignedMessage`: recover the compressed public key
/// (66 hex chars) that produced `sig` over `msg`.
pub fn recover_public_key_from_signed_message(
    msg: &str,
    sig: &str,
) -> Result<String, XeError> {
    let parsed = parse_signature(sig)?;
    let recovery_id = RecoveryId::from_i32(parsed.v)?;
    let mut compact = [0u8; 64];
    compact[0..32].copy_from_slice(&parsed.r);
    compact[32..64].copy_from_slice(&parsed.s);
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)?;

    let digest = sha256_of_text(msg);
    let message = Message::from_digest(digest);
    let secp = Secp256k1::new();
    let public_key = secp.recover_ecdsa(&message, &recoverable)?;
    Ok(hex::encode(public_key.serialize()))
}

/// `recoverAddressFromSignedMessage`: recover the checksummed address that
/// produced `sig` over `msg`.
pub fn recover_address_from_signed_message(msg: &str, sig: &str) -> Result<String, XeError> {
    let public_key_hex = recover_public_key_from_signed_message(msg, sig)?;
    public_key_to_checksum_address(&public_key_hex)
}

/// `verifySignatureAddress`: true iff the address recovered from `sig` over
/// `msg` equals `address` (case-sensitive).
///
/// Total and infallible: any malformed `sig`/recovery failure yields
/// `false`, never an error and never `true`.
pub fn verify_signature_address(msg: &str, sig: &str, address: &str) -> bool {
    match recover_address_from_signed_message(msg, sig) {
        Ok(recovered) => recovered == address,
        Err(_) => false,
    }
}
