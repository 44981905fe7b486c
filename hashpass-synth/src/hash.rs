//! The hash family used to turn a 64-bit entropy value into a character index.
//!
//! All three strategies share one contract: `hash(input, modulus)` returns an
//! index in `[0, modulus)` for every `i64` input, negative values included.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};

use crate::error::{Error, Result};

/// Knuth's multiplier: the fractional part of the golden ratio scaled to 2^32.
pub const MULTIPLIER: u64 = 2_654_435_769;

/// Mask selecting the low 32 bits of the input.
pub const MASK: u64 = 0xFFFF_FFFF;

/// Primes a universal hash instance draws its modulus from.
pub const LARGE_PRIMES: &[i64] = &[
    1_000_000_007,
    1_000_000_009,
    1_000_000_021,
    1_000_000_033,
    1_000_000_087,
];

/// Selects which hashing strategy drives character selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Division,
    Multiplicative,
    Universal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Division,
        Algorithm::Multiplicative,
        Algorithm::Universal,
    ];

    /// Human readable name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Division => "Simple Hash (Division Method)",
            Algorithm::Multiplicative => "Multiplication Hash (Fixed)",
            Algorithm::Universal => "Universal Hash",
        }
    }

    /// Short lowercase label, the canonical form accepted by `FromStr`.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Division => "division",
            Algorithm::Multiplicative => "multiplicative",
            Algorithm::Universal => "universal",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "division" | "simple" => Ok(Algorithm::Division),
            "multiplicative" | "multiplication" => Ok(Algorithm::Multiplicative),
            "universal" => Ok(Algorithm::Universal),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Coefficients of one member of the universal family `((a*k + b) mod p) mod m`.
///
/// Chosen once when the owning [`HashFunction`] is built and never changed
/// afterwards, so two instances generally compute different mappings.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UniversalParams {
    a: i64,
    b: i64,
    p: i64,
}

impl UniversalParams {
    /// Pins explicit parameters, for reproducible runs.
    ///
    /// Requires `p >= 2`, `1 <= a < p` and `0 <= b < p`. `p` must also stay below
    /// 2^31 so that the reduced product cannot overflow an `i64`.
    pub fn new(a: i64, b: i64, p: i64) -> Result<Self> {
        let valid = (2..=i64::from(i32::MAX)).contains(&p)
            && (1..p).contains(&a)
            && (0..p).contains(&b);
        if !valid {
            return Err(Error::InvalidParameters { a, b, p });
        }
        Ok(Self { a, b, p })
    }

    /// Draws `p` from `primes` and `a`, `b` uniformly from their ranges.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, primes: &[i64]) -> Result<Self> {
        let p = *primes.choose(rng).ok_or(Error::EmptyPrimeTable)?;
        let a = rng.gen_range(1..p);
        let b = rng.gen_range(0..p);
        Self::new(a, b, p)
    }

    pub fn a(&self) -> i64 {
        self.a
    }

    pub fn b(&self) -> i64 {
        self.b
    }

    pub fn p(&self) -> i64 {
        self.p
    }
}

impl fmt::Display for UniversalParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={}, b={}, p={}", self.a, self.b, self.p)
    }
}

// Coefficients stay out of debug output so they do not end up in logs.
impl fmt::Debug for UniversalParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniversalParams")
            .field("p", &self.p)
            .finish_non_exhaustive()
    }
}

/// A hashing strategy together with whatever per-instance state it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunction {
    Division,
    Multiplicative,
    Universal(UniversalParams),
}

impl HashFunction {
    /// Builds the given strategy, drawing universal coefficients from the OS CSPRNG.
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        Self::with_rng(algorithm, &mut OsRng)
    }

    /// Builds the given strategy with an injected CSPRNG.
    pub fn with_rng<R: RngCore + CryptoRng>(algorithm: Algorithm, rng: &mut R) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Division => HashFunction::Division,
            Algorithm::Multiplicative => HashFunction::Multiplicative,
            Algorithm::Universal => {
                let params = UniversalParams::random(rng, LARGE_PRIMES)?;
                tracing::debug!(p = params.p, "selected universal hash parameters");
                HashFunction::Universal(params)
            }
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            HashFunction::Division => Algorithm::Division,
            HashFunction::Multiplicative => Algorithm::Multiplicative,
            HashFunction::Universal(_) => Algorithm::Universal,
        }
    }

    pub fn universal_params(&self) -> Option<&UniversalParams> {
        match self {
            HashFunction::Universal(params) => Some(params),
            _ => None,
        }
    }

    /// Maps `input` to an index in `[0, modulus)`.
    #[inline]
    pub fn hash(&self, input: i64, modulus: NonZeroU32) -> u32 {
        let m = i64::from(modulus.get());
        let index = match self {
            HashFunction::Division => (input % m).unsigned_abs(),
            HashFunction::Multiplicative => {
                let k = (input as u64) & MASK;
                // k < 2^32 and MULTIPLIER < 2^32, so the product fits in a u64.
                let high = (k * MULTIPLIER) >> 32;
                high % u64::from(modulus.get())
            }
            HashFunction::Universal(UniversalParams { a, b, p }) => {
                let ak = ((a % p) * (input % p)) % p;
                (((ak + b) % p) % m).unsigned_abs()
            }
        };
        // index < modulus <= u32::MAX
        index as u32
    }
}
