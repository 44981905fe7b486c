//! Analysis selection and report rendering.
//!
//! Every report renders as aligned plain text through `Display` and as JSON
//! through `Serialize`.

use std::fmt::{self, Write};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use hashpass_synth::Algorithm;
use serde::Serialize;

use crate::benchmark::{
    BENCH_CHARSET, BenchmarkResult, ContainerReport, ContainerTiming, DEFAULT_LENGTHS, Operation,
    benchmark, benchmark_containers, container_work_units,
};
use crate::distribution::{DEFAULT_BUCKETS, DistributionReport, analyze_algorithms};
use crate::error::{Error, Result};
use crate::task::Control;

const WIDE: usize = 80;
const NARROW: usize = 60;
const RULE: usize = 40;

const CONCLUSIONS: [&str; 5] = [
    "Division hashing is usually fastest, but its spread can be less even",
    "Universal hashing gives the best unpredictability and distribution",
    "Vec beats LinkedList on random access",
    "HashMap beats BTreeMap on point lookups",
    "Pick the algorithm that matches the security requirements",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Performance,
    Distribution,
    Containers,
    Complete,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Performance,
        AnalysisKind::Distribution,
        AnalysisKind::Containers,
        AnalysisKind::Complete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::Performance => "performance",
            AnalysisKind::Distribution => "distribution",
            AnalysisKind::Containers => "containers",
            AnalysisKind::Complete => "complete",
        }
    }

    /// Progress units a run with `iterations` reports on completion.
    pub fn work_units(self, iterations: u32) -> u64 {
        let n = u64::from(iterations);
        let algorithms = Algorithm::ALL.len() as u64;
        match self {
            AnalysisKind::Performance => algorithms * DEFAULT_LENGTHS.len() as u64 * n,
            AnalysisKind::Distribution => algorithms * n,
            AnalysisKind::Containers => container_work_units(iterations),
            AnalysisKind::Complete => {
                let parts = [
                    AnalysisKind::Performance,
                    AnalysisKind::Distribution,
                    AnalysisKind::Containers,
                ];
                parts.iter().map(|kind| kind.work_units(iterations)).sum()
            }
        }
    }

    /// Runs the analysis on the current thread.
    #[tracing::instrument(level = "info", skip(self, ctl), fields(kind = self.label()))]
    pub fn run(self, iterations: u32, ctl: &Control) -> Result<Report> {
        if iterations == 0 {
            return Err(Error::InvalidInput("iteration count must be positive"));
        }
        let report = match self {
            AnalysisKind::Performance => Report::Performance(performance(iterations, ctl)?),
            AnalysisKind::Distribution => Report::Distribution(distribution(iterations, ctl)?),
            AnalysisKind::Containers => Report::Containers(containers(iterations, ctl)?),
            AnalysisKind::Complete => Report::Complete(CompleteReport {
                generated_at: chrono::Local::now().to_rfc2822(),
                iterations,
                charset_size: BENCH_CHARSET.chars().count(),
                performance: performance(iterations, ctl)?,
                distribution: distribution(iterations, ctl)?,
                containers: containers(iterations, ctl)?,
            }),
        };
        tracing::info!("analysis complete");
        Ok(report)
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnalysisKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedAnalysis(s.to_string()))
    }
}

fn performance(iterations: u32, ctl: &Control) -> Result<PerformanceReport> {
    let results = benchmark(&Algorithm::ALL, DEFAULT_LENGTHS, iterations, ctl)?;
    Ok(PerformanceReport {
        iterations,
        results,
    })
}

fn distribution(iterations: u32, ctl: &Control) -> Result<DistributionSection> {
    let Some(buckets) = NonZeroU32::new(DEFAULT_BUCKETS) else {
        return Err(Error::InvalidInput("bucket count must be positive"));
    };
    let samples = u64::from(iterations);
    Ok(DistributionSection {
        samples,
        buckets: DEFAULT_BUCKETS,
        reports: analyze_algorithms(&Algorithm::ALL, samples, buckets, ctl)?,
    })
}

fn containers(iterations: u32, ctl: &Control) -> Result<ContainerSection> {
    let timings = benchmark_containers(iterations, ctl)?;
    Ok(ContainerSection {
        iterations,
        timings,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub iterations: u32,
    pub results: Vec<BenchmarkResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSection {
    pub samples: u64,
    pub buckets: u32,
    pub reports: Vec<DistributionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerSection {
    pub iterations: u32,
    pub timings: ContainerReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteReport {
    pub generated_at: String,
    pub iterations: u32,
    pub charset_size: usize,
    pub performance: PerformanceReport,
    pub distribution: DistributionSection,
    pub containers: ContainerSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Performance(PerformanceReport),
    Distribution(DistributionSection),
    Containers(ContainerSection),
    Complete(CompleteReport),
}

impl Report {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn banner(out: &mut impl Write, title: &str, width: usize) -> fmt::Result {
    writeln!(out, "{}", "=".repeat(width))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(width))
}

fn ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "Hash Function Performance Analysis", NARROW)?;
        writeln!(f)?;

        let mut current = None;
        for row in &self.results {
            if current != Some(row.password_length) {
                if current.is_some() {
                    writeln!(f)?;
                }
                current = Some(row.password_length);
                writeln!(f, "Password Length: {} characters", row.password_length)?;
                writeln!(f, "{}", "-".repeat(RULE))?;
            }
            writeln!(
                f,
                "{:<25}: Total {:8.2} ms, Average {:8.4} ms",
                row.algorithm,
                ms(row.total),
                ms(row.average)
            )?;
        }
        writeln!(f)
    }
}

impl fmt::Display for DistributionSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "Hash Function Distribution Analysis", NARROW)?;
        writeln!(f)?;
        for report in &self.reports {
            let stats = &report.stats;
            writeln!(f, "{}", report.algorithm)?;
            writeln!(f, "{}", "-".repeat(RULE))?;
            writeln!(f, "Expected: {:.2}", stats.expected)?;
            writeln!(f, "Min: {}, Max: {}", stats.min, stats.max)?;
            writeln!(f, "Standard Deviation: {:.2}", stats.std_dev)?;
            writeln!(f, "Uniformity: {:.2}%", stats.uniformity)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes timings as consecutive pairs sharing one heading.
fn timing_pairs(
    f: &mut fmt::Formatter<'_>,
    rows: &[ContainerTiming],
    inserted: &str,
) -> fmt::Result {
    for pair in rows.chunks(2) {
        let count = pair[0].count;
        match pair[0].operation {
            Operation::Insert => writeln!(f, "Insert {count} {inserted}:")?,
            Operation::RandomAccess => writeln!(f, "Random access {count} times:")?,
            Operation::Lookup => writeln!(f, "Random lookup {count} times:")?,
        }
        for timing in pair {
            writeln!(f, "{}: {:.2} ms", timing.container, ms(timing.elapsed))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for ContainerSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "Data Structure Performance Analysis", NARROW)?;
        writeln!(f)?;

        writeln!(f, "1. Vec vs LinkedList Performance")?;
        writeln!(f, "{}", "-".repeat(RULE))?;
        timing_pairs(f, &self.timings.sequences, "elements")?;

        writeln!(f, "2. HashMap vs BTreeMap Performance")?;
        writeln!(f, "{}", "-".repeat(RULE))?;
        timing_pairs(f, &self.timings.maps, "key-value pairs")
    }
}

impl fmt::Display for CompleteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "Password Generator - Complete Performance Report", WIDE)?;
        writeln!(f)?;
        writeln!(f, "Test Configuration:")?;
        writeln!(f, "- Test Iterations: {}", self.iterations)?;
        writeln!(f, "- Character Set Size: {}", self.charset_size)?;
        writeln!(f, "- Test Time: {}", self.generated_at)?;
        writeln!(f)?;

        writeln!(f, "{}", self.performance)?;
        writeln!(f, "{}", self.distribution)?;
        write!(f, "{}", self.containers)?;

        writeln!(f)?;
        banner(f, "Conclusions:", WIDE)?;
        for (i, line) in CONCLUSIONS.iter().enumerate() {
            writeln!(f, "{}. {line}", i + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Performance(r) => fmt::Display::fmt(r, f),
            Report::Distribution(r) => fmt::Display::fmt(r, f),
            Report::Containers(r) => fmt::Display::fmt(r, f),
            Report::Complete(r) => fmt::Display::fmt(r, f),
        }
    }
}
