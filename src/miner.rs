//! Proof-of-work miner: one Argon2id memory-hard seed per challenge, then a
//! cheap SHA-256 + ECDSA search over a solution counter.
//!
//! The asymmetric cost shape is deliberate: Argon2id runs exactly once per
//! challenge (see [`crate::hash::argon2id`]), not once per attempt. Folding
//! it into the inner loop would change the protocol and break
//! verification — do not "optimize" it away.
use log::trace;

use crate::config::MiningParams;
use crate::difficulty::difficulty;
use crate::errors::XeError;
use crate::hash::{argon2id, challenge_salt};
use crate::wallet::{generate_signature, SignatureHex};

/// Returns true iff `sig`'s hex encoding starts with `difficulty` `'0'`
/// characters.
pub fn meets_difficulty(sig: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    sig.len() >= difficulty && sig.as_bytes()[..difficulty].iter().all(|&b| b == b'0')
}

/// `mineSignature`: search for a `(signature, solution)` pair whose
/// signature meets `difficulty` zero-nibble leading work, seeded by a
/// memory-hard Argon2id hash of `message` for this `challenge_index`.
///
/// This is the CPU/memory-bound half of the protocol; callers on an async
/// runtime should run it inside `spawn_blocking` (see
/// [`crate::identity::generate_identity`]) rather than calling it directly
/// from an async context.
pub fn mine_signature(
    private_key_hex: &str,
    message: &str,
    difficulty_target: u32,
    challenge_index: u64,
    params: &MiningParams,
) -> Result<(SignatureHex, u64), XeError> {
    let salt = challenge_salt(challenge_index);
    let seed = argon2id(message, &salt, params)?;
    let seed_hex = hex::encode(seed);

    let mut solution: u64 = 0;
    loop {
        let input = format!("{seed_hex}{solution}");
        let sig = generate_signature(private_key_hex, &input)?;
        if meets_difficulty(&sig, difficulty_target) {
            return Ok((sig, solution));
        }
        trace!("challenge {challenge_index}: solution {solution} missed difficulty {difficulty_target}");
        solution += 1;
    }
}

/// Convenience wrapper that looks up the required difficulty for
/// `challenge_index` from the standard schedule before mining.
pub fn mine_challenge(
    private_key_hex: &str,
    message: &str,
    challenge_index: u64,
    params: &MiningParams,
) -> Result<(SignatureHex, u64), XeError> {
    mine_signature(
        private_key_hex,
        message,
        difficulty(challenge_index),
        challenge_index,
        params,
    )
}
