use std::num::NonZeroU32;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub const CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Generates `count` random hash inputs.
/// Uses a fixed seed for reproducible benchmark results.
#[allow(dead_code)]
pub fn generate_random_inputs(count: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count).map(|_| rng.next_u64() as i64).collect()
}

/// Modulus matching [`CHARSET`].
#[allow(dead_code)]
pub fn charset_modulus() -> NonZeroU32 {
    NonZeroU32::new(CHARSET.chars().count() as u32).unwrap()
}
