//! A proof-of-work identity system layered over an XE blockchain wallet
//! primitive set.
//!
//! Holders mint a self-contained, publicly verifiable identity by chaining
//! memory-hard proofs of work, each signed by a secp256k1 key whose
//! corresponding address names the identity. A verifier, given only the
//! public identity object, can check that the chain was produced by the
//! claimed address, that each link required the intended computational
//! cost, and that no link was reordered, substituted, or forged.
//!
//! # Layering
//!
//! - [`hash`] — SHA-256, Keccak-256, and Argon2id primitives.
//! - [`wallet`] — key generation, checksummed address derivation, signing,
//!   and signature/address recovery.
//! - [`difficulty`] — the pure challenge-index → leading-zero-count schedule.
//! - [`miner`] — the proof-of-work search over a single challenge.
//! - [`identity`] — the chain itself: [`identity::generate_identity`],
//!   [`identity::Identity::add_challenge`], [`identity::verify_identity`].
//!
//! Data flows top-down only: the identity engine calls the miner; the miner
//! calls the wallet and Argon2id; the wallet calls the curve and hash
//! primitives. There is no feedback edge.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use xe_identity::{config::MiningParams, identity};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), xe_identity::XeError> {
//!     let params = MiningParams::default();
//!     let id = identity::generate_identity(10, &params).await?;
//!     assert!(id.verify());
//!
//!     // Hand the public half to a verifier; the private key never leaves
//!     // this process.
//!     let public = id.get_public_identity();
//!     assert!(identity::verify_identity(&public));
//!     Ok(())
//! }
//! ```
//!
//! # Errors and verification
//!
//! Generation-side operations (minting a wallet, signing, mining, extending
//! a chain) return [`Result<_, XeError>`] and fail loudly. Verification
//! never does: [`identity::verify_identity`] is a total, panic-free
//! function from `&PublicIdentity` to `bool` — every internal failure
//! (malformed hex, a recovery error, an Argon2id allocation failure) folds
//! to `false` rather than propagating.
//!
//! # Logging
//!
//! This crate emits [`log`](https://docs.rs/log/) records at `debug`
//! (lifecycle events), `trace` (per-attempt mining detail), and `warn`
//! (verification rejections, naming which check failed without leaking key
//! material). Wire in any `log`-compatible logger and control verbosity
//! with `RUST_LOG`.
//!
//! # Non-goals
//!
//! This crate does not address persistence, key storage at rest, network
//! distribution of identities, revocation, expiry, rate limiting,
//! multi-party identities, curve rotation, HD derivation, or
//! multi-signature. It also does not implement XE denomination
//! formatting/conversion helpers — those are number-formatting utilities
//! orthogonal to the identity subsystem.
pub mod config;
pub mod difficulty;
pub mod errors;
pub mod hash;
pub mod identity;
pub mod miner;
pub mod wallet;

pub use config::MiningParams;
pub use errors::XeError;
pub use identity::{generate_identity, generate_identity_default, verify_identity, Identity, PublicIdentity};
pub use wallet::{generate_wallet, Wallet};
