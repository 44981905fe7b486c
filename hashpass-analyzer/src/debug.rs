//! Sample output for eyeballing one hash strategy.
//!
//! A debug report shows a handful of synthesized passwords followed by raw
//! `input -> hash -> char` mappings, all from the same hash instance.

use std::fmt;

use hashpass_synth::charset::UPPERCASE;
use hashpass_synth::{CharacterSet, HashFunction, PasswordSynthesizer};
use rand::rngs::OsRng;
use serde::Serialize;

use crate::error::{Error, Result};

/// Character set used when none is given.
pub const DEBUG_CHARSET: &str = UPPERCASE;

pub const DEBUG_LENGTH: usize = 12;

/// Passwords generated per report.
pub const SAMPLE_PASSWORDS: usize = 10;

/// Raw mappings listed per report.
pub const SAMPLE_MAPPINGS: usize = 20;

/// Distance between consecutive mapping inputs, in nanoseconds.
const INPUT_STRIDE: i64 = 1000;

/// One hashed input and the character it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub input: i64,
    pub hash: u32,
    pub selected: char,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugReport {
    pub algorithm: &'static str,
    /// `a=.., b=.., p=..` for universal instances.
    pub parameters: Option<String>,
    pub passwords: Vec<String>,
    pub mappings: Vec<Mapping>,
}

/// Generates sample passwords with `hash`, then maps clock-derived inputs
/// through the same instance.
///
/// Mapping inputs start at the current wall-clock time in nanoseconds and
/// step by 1000.
#[tracing::instrument(level = "debug", skip_all, fields(algorithm = %hash.algorithm()))]
pub fn debug_hash(
    hash: HashFunction,
    charset: &CharacterSet,
    length: usize,
) -> Result<DebugReport> {
    let mut synth = PasswordSynthesizer::with_rng(hash, OsRng);
    let mut passwords = Vec::with_capacity(SAMPLE_PASSWORDS);
    for _ in 0..SAMPLE_PASSWORDS {
        passwords.push(synth.generate(charset, length)?);
    }

    let Some(base) = chrono::Utc::now().timestamp_nanos_opt() else {
        return Err(Error::InvalidInput("system clock is out of range"));
    };

    let hash = synth.hash_function();
    let chars = charset.as_chars();
    let mappings = (0..SAMPLE_MAPPINGS as i64)
        .map(|i| {
            let input = base.wrapping_add(i * INPUT_STRIDE);
            let index = hash.hash(input, charset.modulus());
            Mapping {
                input,
                hash: index,
                selected: chars[index as usize],
            }
        })
        .collect();

    Ok(DebugReport {
        algorithm: hash.algorithm().name(),
        parameters: hash.universal_params().map(ToString::to_string),
        passwords,
        mappings,
    })
}

impl fmt::Display for DebugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Debug Test ===", self.algorithm)?;
        if let Some(parameters) = &self.parameters {
            writeln!(f, "Parameters: {parameters}")?;
        }

        writeln!(f, "Testing {} password generations:", self.passwords.len())?;
        for (i, password) in self.passwords.iter().enumerate() {
            writeln!(f, "{}. {password}", i + 1)?;
        }

        let count = self.mappings.len();
        writeln!(f)?;
        writeln!(f, "Testing hash distribution (first {count} values):")?;
        for mapping in &self.mappings {
            writeln!(f, "{mapping}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (input, hash, selected) = (self.input, self.hash, self.selected);
        write!(f, "Input: {input} -> Hash: {hash} -> Char: {selected}")
    }
}

#[cfg(test)]
mod tests {
    use hashpass_synth::{Algorithm, UniversalParams};

    use super::*;

    #[test]
    fn test_report_shape_for_every_algorithm() {
        let charset = CharacterSet::new(DEBUG_CHARSET).unwrap();
        for algorithm in Algorithm::ALL {
            let hash = HashFunction::new(algorithm).unwrap();
            let report = debug_hash(hash, &charset, DEBUG_LENGTH).unwrap();

            assert_eq!(report.algorithm, algorithm.name());
            assert_eq!(report.passwords.len(), SAMPLE_PASSWORDS);
            for password in &report.passwords {
                assert_eq!(password.chars().count(), DEBUG_LENGTH);
                assert!(password.chars().all(|c| DEBUG_CHARSET.contains(c)));
            }

            assert_eq!(report.mappings.len(), SAMPLE_MAPPINGS);
            for mapping in &report.mappings {
                assert!(mapping.hash < charset.modulus().get());
                assert_eq!(charset.get(mapping.hash), Some(mapping.selected));
            }
            for pair in report.mappings.windows(2) {
                assert_eq!(pair[1].input.wrapping_sub(pair[0].input), INPUT_STRIDE);
            }
        }
    }

    #[test]
    fn test_parameters_only_for_universal() {
        let charset = CharacterSet::new("AB").unwrap();
        let report = debug_hash(HashFunction::Division, &charset, 4).unwrap();
        assert_eq!(report.parameters, None);

        let params = UniversalParams::new(3, 5, 11).unwrap();
        let hash = HashFunction::Universal(params);
        let report = debug_hash(hash, &charset, 4).unwrap();
        assert_eq!(report.parameters.as_deref(), Some("a=3, b=5, p=11"));
    }

    #[test]
    fn test_mappings_follow_the_instance() {
        let charset = CharacterSet::new(DEBUG_CHARSET).unwrap();
        let hash = HashFunction::Multiplicative;
        let report = debug_hash(hash, &charset, 8).unwrap();
        for mapping in &report.mappings {
            assert_eq!(hash.hash(mapping.input, charset.modulus()), mapping.hash);
        }
    }

    #[test]
    fn test_text_layout() {
        let charset = CharacterSet::new(DEBUG_CHARSET).unwrap();
        let params = UniversalParams::new(48_271, 11, 1_000_000_007).unwrap();
        let hash = HashFunction::Universal(params);
        let report = debug_hash(hash, &charset, 12).unwrap();
        let text = report.to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== Universal Hash Debug Test ===");
        assert_eq!(lines[1], "Parameters: a=48271, b=11, p=1000000007");
        assert_eq!(lines[2], "Testing 10 password generations:");
        assert!(lines[3].starts_with("1. "));
        assert!(lines[12].starts_with("10. "));
        assert_eq!(lines[14], "Testing hash distribution (first 20 values):");
        let mapping_lines = lines.iter().filter(|l| l.starts_with("Input: ")).count();
        assert_eq!(mapping_lines, SAMPLE_MAPPINGS);
    }

    #[test]
    fn test_zero_length_rejected() {
        let charset = CharacterSet::new("AB").unwrap();
        let result = debug_hash(HashFunction::Division, &charset, 0);
        assert!(matches!(result, Err(Error::Synth(_))));
    }
}
