//! Tunable parameters for the Argon2id memory-hard seeding step.
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::XeError;

/// The Argon2id parameters used to derive a challenge's memory-hard seed.
///
/// [`MiningParams::default`] reproduces the fixed production parameters
/// exactly: 64 MiB memory cost, 3 passes, single-lane, 32-byte output.
/// Tests may substitute a cheaper value so suites run quickly; production
/// callers should use the default unless they have a specific reason not
/// to, since two chains mined under different parameters are not
/// cross-compatible (verification recomputes the seed with whatever
/// `MiningParams` the caller passes in).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningParams {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
    pub hash_len: usize,
}

impl MiningParams {
    /// Builds the underlying `argon2` crate configuration for these
    /// parameters, always pinned to the Argon2id variant.
    pub(crate) fn argon2(&self) -> Result<Argon2<'static>, XeError> {
        let params = Params::new(
            self.memory_cost_kib,
            self.time_cost,
            self.parallelism,
            Some(self.hash_len),
        )
        .map_err(|e| XeError::Argon2(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            memory_cost_kib: 65_536,
            time_cost: 3,
            parallelism: 1,
            hash_len: 32,
        }
    }
}
