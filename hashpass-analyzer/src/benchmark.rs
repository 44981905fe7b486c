use std::collections::{BTreeMap, HashMap, LinkedList};
use std::hint::black_box;
use std::time::{Duration, Instant};

use hashpass_synth::{Algorithm, CharacterSet, PasswordSynthesizer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::task::Control;

/// Character set the synthesis benchmark draws from.
pub const BENCH_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub const DEFAULT_LENGTHS: &[usize] = &[8, 16, 32];

/// Upper bound on random accesses and lookups per container.
pub const MAX_ACCESSES: u32 = 1000;

fn as_millis<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_nanos() as f64 / 1_000_000.0)
}

/// Timing of `iterations` syntheses of one algorithm at one length.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    pub algorithm: &'static str,
    pub password_length: usize,
    pub iterations: u32,
    #[serde(rename = "total_ms", serialize_with = "as_millis")]
    pub total: Duration,
    #[serde(rename = "average_ms", serialize_with = "as_millis")]
    pub average: Duration,
}

/// Times full password syntheses for every `(length, algorithm)` pair.
///
/// Each algorithm gets a fresh synthesizer per length, so universal
/// parameters are drawn anew for every row.
#[tracing::instrument(level = "debug", skip(ctl))]
pub fn benchmark(
    algorithms: &[Algorithm],
    lengths: &[usize],
    iterations: u32,
    ctl: &Control,
) -> Result<Vec<BenchmarkResult>> {
    if iterations == 0 {
        return Err(Error::InvalidInput("iteration count must be positive"));
    }
    let charset = CharacterSet::new(BENCH_CHARSET)?;

    let mut results = Vec::with_capacity(algorithms.len() * lengths.len());
    for &length in lengths {
        for &algorithm in algorithms {
            let mut synth = PasswordSynthesizer::new(algorithm)?;

            let start = Instant::now();
            for _ in 0..iterations {
                ctl.checkpoint()?;
                black_box(synth.generate(&charset, length)?);
                ctl.advance(1);
            }
            let total = start.elapsed();

            tracing::debug!(algorithm = %algorithm, length, ?total, "benchmark row complete");
            results.push(BenchmarkResult {
                algorithm: algorithm.name(),
                password_length: length,
                iterations,
                total,
                average: total / iterations,
            });
        }
    }

    Ok(results)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Insert,
    RandomAccess,
    Lookup,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerTiming {
    pub container: &'static str,
    pub operation: Operation,
    pub count: u32,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerReport {
    pub sequences: Vec<ContainerTiming>,
    pub maps: Vec<ContainerTiming>,
}

impl ContainerReport {
    pub fn timings(&self) -> impl Iterator<Item = &ContainerTiming> {
        self.sequences.iter().chain(&self.maps)
    }
}

/// Compares Vec against LinkedList and HashMap against BTreeMap.
///
/// Inserts `iterations` elements into each container, then performs
/// `min(iterations, MAX_ACCESSES)` random accesses or lookups.
#[tracing::instrument(level = "debug", skip(ctl))]
pub fn benchmark_containers(iterations: u32, ctl: &Control) -> Result<ContainerReport> {
    if iterations == 0 {
        return Err(Error::InvalidInput("iteration count must be positive"));
    }
    let accesses = iterations.min(MAX_ACCESSES);
    let mut rng = StdRng::from_entropy();

    let mut vec: Vec<String> = Vec::new();
    let vec_insert = timed_insert(iterations, ctl, |i| vec.push(format!("password{i}")))?;
    let mut list: LinkedList<String> = LinkedList::new();
    let list_insert = timed_insert(iterations, ctl, |i| list.push_back(format!("password{i}")))?;

    let len = vec.len();
    let vec_access = timed_access(accesses, ctl, || {
        black_box(&vec[rng.gen_range(0..len)]).len()
    })?;
    let len = list.len();
    let list_access = timed_access(accesses, ctl, || {
        let index = rng.gen_range(0..len);
        list.iter().nth(index).map_or(0, |s| black_box(s).len())
    })?;

    let mut hash_map: HashMap<String, String> = HashMap::new();
    let hash_insert = timed_insert(iterations, ctl, |i| {
        hash_map.insert(format!("key{i}"), format!("password{i}"));
    })?;
    let mut tree_map: BTreeMap<String, String> = BTreeMap::new();
    let tree_insert = timed_insert(iterations, ctl, |i| {
        tree_map.insert(format!("key{i}"), format!("password{i}"));
    })?;

    let hash_lookup = timed_access(accesses, ctl, || {
        let key = format!("key{}", rng.gen_range(0..iterations));
        hash_map.get(&key).map_or(0, |s| black_box(s).len())
    })?;
    let tree_lookup = timed_access(accesses, ctl, || {
        let key = format!("key{}", rng.gen_range(0..iterations));
        tree_map.get(&key).map_or(0, |s| black_box(s).len())
    })?;

    let row = |container, operation, count, elapsed| ContainerTiming {
        container,
        operation,
        count,
        elapsed,
    };
    Ok(ContainerReport {
        sequences: vec![
            row("Vec", Operation::Insert, iterations, vec_insert),
            row("LinkedList", Operation::Insert, iterations, list_insert),
            row("Vec", Operation::RandomAccess, accesses, vec_access),
            row("LinkedList", Operation::RandomAccess, accesses, list_access),
        ],
        maps: vec![
            row("HashMap", Operation::Insert, iterations, hash_insert),
            row("BTreeMap", Operation::Insert, iterations, tree_insert),
            row("HashMap", Operation::Lookup, accesses, hash_lookup),
            row("BTreeMap", Operation::Lookup, accesses, tree_lookup),
        ],
    })
}

/// Units of progress [`benchmark_containers`] reports for `iterations`.
pub fn container_work_units(iterations: u32) -> u64 {
    4 * u64::from(iterations) + 4 * u64::from(iterations.min(MAX_ACCESSES))
}

fn timed_insert(count: u32, ctl: &Control, mut insert: impl FnMut(u32)) -> Result<Duration> {
    ctl.checkpoint()?;
    let start = Instant::now();
    for i in 0..count {
        insert(i);
    }
    let elapsed = start.elapsed();
    ctl.advance(u64::from(count));
    Ok(elapsed)
}

fn timed_access(
    count: u32,
    ctl: &Control,
    mut access: impl FnMut() -> usize,
) -> Result<Duration> {
    ctl.checkpoint()?;
    let start = Instant::now();
    for _ in 0..count {
        black_box(access());
    }
    let elapsed = start.elapsed();
    ctl.advance(u64::from(count));
    Ok(elapsed)
}
