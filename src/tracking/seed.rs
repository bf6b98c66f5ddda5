//! Seeded draws derived from a phone number
//!
//! Profile content must be reproducible: looking up the same number twice
//! has to yield the same fabricated data. The seed is the sum of the phone
//! string's char codes, pushed through a single LCG-style transform.

/// Deterministic draw source for profile fabrication.
///
/// The seed is never advanced between draws, so `draw(max)` with the same
/// bound always returns the same value. Stored profiles depend on this
/// behavior; see `test_draws_reuse_the_same_seed`.
#[derive(Debug, Clone, Copy)]
pub struct SeededRng {
    seed: u64,
}

impl SeededRng {
    /// Seed from a phone number string (sum of char codes)
    pub fn from_phone(phone_number: &str) -> Self {
        let seed = phone_number.chars().map(|c| c as u32 as u64).sum();
        Self { seed }
    }

    /// Draw a value in `[0, max)`
    pub fn draw(&self, max: u64) -> u64 {
        let scrambled = (self.seed * 9301 + 49297) % 233_280;
        (scrambled as f64 / 233_280.0 * max as f64).floor() as u64
    }
}
