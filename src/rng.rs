//! Injectable randomness for the shaper.
//!
//! Stock quantities and generated SKU suffixes come from a [`RandomSource`]
//! so tests can substitute a deterministic implementation and assert exact
//! output without flakiness.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of randomness for product shaping.
pub trait RandomSource {
    /// A random integer in `[min, max]`, both ends inclusive.
    fn int_in_range(&mut self, min: u32, max: u32) -> u32;

    /// A random alphanumeric string of the given length.
    fn alphanumeric(&mut self, len: usize) -> String;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min..=max)
    }

    fn alphanumeric(&mut self, len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Deterministic source for tests: integers always come out as `min`,
/// strings as a repeated marker character.
#[derive(Debug, Default)]
pub struct FixedRandom;

impl RandomSource for FixedRandom {
    fn int_in_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn alphanumeric(&mut self, len: usize) -> String {
        "x".repeat(len)
    }
}

/// Generate a SKU: prefix + 8 random alphanumerics + the last two digits
/// of the current unix timestamp.
pub fn generate_sku(prefix: &str, rng: &mut dyn RandomSource) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}{}{:02}", prefix, rng.alphanumeric(8), secs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_bounds() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            let v = rng.int_in_range(1000, 5000);
            assert!((1000..=5000).contains(&v));
        }
    }

    #[test]
    fn test_thread_random_alphanumeric() {
        let mut rng = ThreadRandom;
        let s = rng.alphanumeric(8);
        assert_eq!(s.len(), 8);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_sku_shape() {
        let mut rng = FixedRandom;
        let sku = generate_sku("beauty", &mut rng);
        assert!(sku.starts_with("beautyxxxxxxxx"));
        assert_eq!(sku.len(), "beauty".len() + 8 + 2);
    }
}
