//! Pure difficulty schedule: maps a challenge index to a required count of
//! leading hex zeros.

/// `d = clamp(2 + (i*2)/5, 2, 4)`, computed in integer arithmetic so the
/// schedule cannot diverge across platforms (floating point is
/// deliberately never used here).
pub fn difficulty(challenge_index: u64) -> u32 {
    let raw = 2 + (challenge_index * 2) / 5;
    raw.clamp(2, 4) as u32
}
