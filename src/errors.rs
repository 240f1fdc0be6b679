/// Error types for the XE identity crate.
///
/// Generation-side operations (wallet creation, signing, mining, extending a
/// chain) fail loudly through [`XeError`]. Verification never does: see
/// [`crate::identity::verify_identity`], whose public signature has no
/// `Result` at all — every internal failure folds to `false`.
use thiserror::Error;

/// The primary error type for the XE identity crate.
#[derive(Error, Debug)]
pub enum XeError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("secp256k1 error: {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("argon2 error: {0}")]
    Argon2(String),

    #[error("chain invariant violated: {0}")]
    InvariantViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl XeError {
    /// Returns true for errors that stem from caller-supplied malformed
    /// input rather than a crypto-library or runtime failure.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            XeError::InvalidPrivateKey(_)
                | XeError::InvalidPublicKey(_)
                | XeError::InvalidAddress(_)
                | XeError::InvalidSignature(_)
        )
    }
}
