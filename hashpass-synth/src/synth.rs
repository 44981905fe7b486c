use std::time::Instant;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::charset::CharacterSet;
use crate::error::{Error, Result};
use crate::hash::{Algorithm, HashFunction};

/// Per-position offset mixed into each entropy value.
pub const POSITION_STRIDE: u64 = 1009;

/// Builds passwords by hashing fresh entropy into character indices.
///
/// Each position mixes a monotonic clock reading, a position offset and a
/// 64-bit CSPRNG draw, so inputs are not reused across positions or calls.
pub struct PasswordSynthesizer<R = OsRng> {
    hash: HashFunction,
    rng: R,
    origin: Instant,
}

impl PasswordSynthesizer<OsRng> {
    /// Synthesizer for `algorithm` backed by the OS CSPRNG.
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        Ok(Self::with_rng(HashFunction::new(algorithm)?, OsRng))
    }
}

impl<R: RngCore + CryptoRng> PasswordSynthesizer<R> {
    pub fn with_rng(hash: HashFunction, rng: R) -> Self {
        Self {
            hash,
            rng,
            origin: Instant::now(),
        }
    }

    pub fn hash_function(&self) -> &HashFunction {
        &self.hash
    }

    /// Generates a password of exactly `length` characters drawn from `charset`.
    pub fn generate(&mut self, charset: &CharacterSet, length: usize) -> Result<String> {
        if length == 0 {
            return Err(Error::InvalidInput("password length must be positive"));
        }

        let modulus = charset.modulus();
        let chars = charset.as_chars();
        let mut password = String::with_capacity(length);
        for position in 0..length {
            let input = self.entropy(position);
            // hash() guarantees index < modulus == chars.len()
            let index = self.hash.hash(input, modulus) as usize;
            password.push(chars[index]);
        }

        Ok(password)
    }

    #[inline]
    fn entropy(&mut self, position: usize) -> i64 {
        let clock = self.origin.elapsed().as_nanos() as u64;
        clock
            .wrapping_add((position as u64).wrapping_mul(POSITION_STRIDE))
            .wrapping_add(self.rng.next_u64()) as i64
    }
}

/// One-shot synthesis with a freshly constructed hash function.
pub fn synthesize(charset: &str, length: usize, algorithm: Algorithm) -> Result<String> {
    let charset = CharacterSet::new(charset)?;
    let mut synth = PasswordSynthesizer::new(algorithm)?;
    synth.generate(&charset, length)
}

/// Runs [`synthesize`] on tokio's blocking pool.
#[cfg(feature = "tokio")]
pub async fn synthesize_async(
    charset: String,
    length: usize,
    algorithm: Algorithm,
) -> Result<String> {
    tokio::task::spawn_blocking(move || synthesize(&charset, length, algorithm))
        .await?
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::charset::CharClasses;

    #[test]
    fn test_two_char_set() {
        for algorithm in Algorithm::ALL {
            for _ in 0..50 {
                let password = synthesize("AB", 5, algorithm).unwrap();
                assert_eq!(password.chars().count(), 5);
                let in_set = password.chars().all(|c| c == 'A' || c == 'B');
                assert!(in_set, "{algorithm}: {password}");
            }
        }
    }

    #[test]
    fn test_empty_charset() {
        for algorithm in Algorithm::ALL {
            let result = synthesize("", 5, algorithm);
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
    }

    #[test]
    fn test_zero_length() {
        for algorithm in Algorithm::ALL {
            let result = synthesize("AB", 0, algorithm);
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
    }

    #[test]
    fn test_single_char_set() {
        for algorithm in Algorithm::ALL {
            assert_eq!(synthesize("x", 8, algorithm).unwrap(), "xxxxxxxx");
        }
    }

    #[test]
    fn test_multibyte_chars() {
        let password = synthesize("αβγ", 16, Algorithm::Universal).unwrap();
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().all(|c| "αβγ".contains(c)));
    }

    #[test]
    fn test_seeded_rng_with_default_classes() {
        let charset = CharacterSet::from_classes(CharClasses::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for algorithm in Algorithm::ALL {
            let hash = HashFunction::with_rng(algorithm, &mut rng).unwrap();
            let mut synth = PasswordSynthesizer::with_rng(hash, StdRng::seed_from_u64(9));
            let password = synth.generate(&charset, 32).unwrap();
            assert_eq!(password.len(), 32);
            assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_repeated_calls_vary() {
        for algorithm in Algorithm::ALL {
            let mut synth = PasswordSynthesizer::new(algorithm).unwrap();
            let charset = CharacterSet::from_classes(CharClasses::default()).unwrap();
            let passwords: HashSet<String> = (0..20)
                .map(|_| synth.generate(&charset, 16).unwrap())
                .collect();
            assert!(
                passwords.len() > 1,
                "{algorithm} produced the same password 20 times"
            );
        }
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn test_synthesize_async() {
        let password = synthesize_async("AB".to_string(), 12, Algorithm::Multiplicative)
            .await
            .unwrap();
        assert_eq!(password.len(), 12);

        let err = synthesize_async(String::new(), 12, Algorithm::Division).await;
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }
}
