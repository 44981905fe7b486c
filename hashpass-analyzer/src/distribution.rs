use std::num::NonZeroU32;

use hashpass_synth::{Algorithm, HashFunction};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::Control;

/// Buckets used by the distribution analysis.
pub const DEFAULT_BUCKETS: u32 = 100;

/// Samples between cancellation checks.
const CHECK_INTERVAL: u64 = 1024;

/// Population statistics of a bucket histogram.
///
/// `uniformity` is `100 * (1 - std_dev / expected)`; higher is more even. It is
/// a descriptive number, not a test with a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionStats {
    pub samples: u64,
    pub buckets: u32,
    pub expected: f64,
    pub min: u64,
    pub max: u64,
    pub std_dev: f64,
    pub uniformity: f64,
}

impl DistributionStats {
    /// Computes stats from a histogram whose counts sum to `samples`.
    pub fn from_histogram(histogram: &[u64]) -> Result<Self> {
        let Some(buckets) = u32::try_from(histogram.len()).ok().filter(|b| *b > 0) else {
            return Err(Error::InvalidInput("histogram must have 1 to u32::MAX buckets"));
        };
        let samples: u64 = histogram.iter().sum();
        if samples == 0 {
            return Err(Error::InvalidInput("histogram is empty"));
        }

        let expected = samples as f64 / f64::from(buckets);
        let squared_error: f64 = histogram
            .iter()
            .map(|&count| (count as f64 - expected).powi(2))
            .sum();
        let std_dev = (squared_error / f64::from(buckets)).sqrt();

        Ok(Self {
            samples,
            buckets,
            expected,
            min: histogram.iter().copied().min().unwrap_or(0),
            max: histogram.iter().copied().max().unwrap_or(0),
            std_dev,
            uniformity: 100.0 * (1.0 - std_dev / expected),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub algorithm: &'static str,
    pub histogram: Vec<u64>,
    pub stats: DistributionStats,
}

/// Hashes `samples` random inputs into `buckets` buckets and summarises the spread.
///
/// Inputs are absolute values of uniform 64-bit draws from `rng`.
#[tracing::instrument(
    level = "debug",
    skip(hash, rng, ctl),
    fields(algorithm = %hash.algorithm())
)]
pub fn analyze_distribution<R: RngCore>(
    hash: &HashFunction,
    samples: u64,
    buckets: NonZeroU32,
    rng: &mut R,
    ctl: &Control,
) -> Result<DistributionReport> {
    if samples == 0 {
        return Err(Error::InvalidInput("sample count must be positive"));
    }

    let mut histogram = vec![0u64; buckets.get() as usize];
    let mut pending = 0u64;
    for _ in 0..samples {
        let input = (rng.next_u64() as i64).wrapping_abs();
        histogram[hash.hash(input, buckets) as usize] += 1;

        pending += 1;
        if pending == CHECK_INTERVAL {
            ctl.advance(pending);
            pending = 0;
            ctl.checkpoint()?;
        }
    }
    ctl.advance(pending);

    let stats = DistributionStats::from_histogram(&histogram)?;
    tracing::debug!(
        uniformity = stats.uniformity,
        std_dev = stats.std_dev,
        "distribution analysed"
    );

    Ok(DistributionReport {
        algorithm: hash.algorithm().name(),
        histogram,
        stats,
    })
}

/// Runs [`analyze_distribution`] for each algorithm with a fresh hash instance.
pub fn analyze_algorithms(
    algorithms: &[Algorithm],
    samples: u64,
    buckets: NonZeroU32,
    ctl: &Control,
) -> Result<Vec<DistributionReport>> {
    let mut rng = StdRng::from_entropy();
    algorithms
        .iter()
        .map(|algorithm| {
            ctl.checkpoint()?;
            let hash = HashFunction::new(*algorithm)?;
            analyze_distribution(&hash, samples, buckets, &mut rng, ctl)
        })
        .collect()
}
