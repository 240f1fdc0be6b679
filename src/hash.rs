//! Hash primitives used across the wallet and mining protocol.
//!
//! Two quirks are load-bearing and must not be "fixed":
//! - [`keccak256_of_text`] hashes the ASCII/UTF-8 *text* of its input, not
//!   decoded bytes. Address derivation depends on this bit-for-bit.
//! - [`sha256_of_text`] likewise hashes the UTF-8 bytes of a string, never
//!   a decoded byte array.
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::config::MiningParams;
use crate::errors::XeError;

/// `sha256(msg)` over the UTF-8 bytes of `msg`.
pub fn sha256_of_text(msg: &str) -> [u8; 32] {
    Sha256::digest(msg.as_bytes()).into()
}

/// `keccak256(input)` over the UTF-8 bytes of `input` (deliberately not
/// decoded hex — see module docs).
pub fn keccak256_of_text(input: &str) -> [u8; 32] {
    Keccak256::digest(input.as_bytes()).into()
}

/// Salt string for challenge index `i`: the literal ASCII `xe-challenge-<i>`.
pub fn challenge_salt(challenge_index: u64) -> String {
    format!("xe-challenge-{challenge_index}")
}

/// `argon2id(password, salt, params) -> 32 bytes`, raw output.
///
/// `password` and `salt` are hashed as their UTF-8 byte representation.
/// This is a CPU- and memory-intensive blocking call (§5 of the spec this
/// crate implements); callers on an async runtime should run it via
/// `spawn_blocking` rather than awaiting it directly on a reactor thread —
/// see [`crate::miner::mine_signature`].
pub fn argon2id(password: &str, salt: &str, params: &MiningParams) -> Result<Vec<u8>, XeError> {
    let argon2 = params.argon2()?;
    let mut output = vec![0u8; params.hash_len];
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut output)
        .map_err(|e| XeError::Argon2(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_vector() {
        let digest = sha256_of_text("");
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b85"
        );
    }

    #[test]
    fn keccak256_matches_known_vector() {
        let digest = keccak256_of_text("");
        assert_eq!(
            hex::encode(digest),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47"
        );
    }

    #[test]
    fn challenge_salt_is_stable() {
        assert_eq!(challenge_salt(0), "xe-challenge-0");
        assert_eq!(challenge_salt(42), "xe-challenge-42");
    }

    #[test]
    fn argon2id_is_deterministic_for_fixed_inputs() {
        let params = MiningParams {
            memory_cost_kib: 8,
            time_cost: 1,
            parallelism: 1,
            hash_len: 32,
        };
        let a = argon2id("password", &challenge_salt(0), &params).unwrap();
        let b = argon2id("password", &challenge_salt(0), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn argon2id_differs_per_salt() {
        let params = MiningParams {
            memory_cost_kib: 8,
            time_cost: 1,
            parallelism: 1,
            hash_len: 32,
        };
        let a = argon2id("password", &challenge_salt(0), &params).unwrap();
        let b = argon2id("password", &challenge_salt(1), &params).unwrap();
        assert_ne!(a, b);
    }
}
