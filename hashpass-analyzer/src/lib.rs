//! Offline analysis of the hashpass synthesis strategies.
//!
//! Three analyses exercise the hash family from `hashpass-synth` without
//! sharing any mutable state with a caller:
//!
//! - **Performance**: times repeated password synthesis per algorithm and
//!   password length.
//! - **Distribution**: hashes uniform random inputs into 100 buckets and
//!   reports expected count, min/max, standard deviation and uniformity.
//! - **Containers**: compares sequence and map containers on insert and
//!   random access. Unrelated to hashing correctness.
//!
//! A complete report runs all three. Work is CPU bound; [`task::run_analysis`]
//! moves it onto tokio's blocking pool and hands back one result.
//!
//! [`debug::debug_hash`] is separate: it prints sample passwords and raw
//! hash mappings for a single strategy.
//!
//! ```no_run
//! use hashpass_analyzer::{AnalysisKind, Control, run_analysis};
//!
//! # async fn demo() -> hashpass_analyzer::Result<()> {
//! let report = run_analysis(AnalysisKind::Distribution, 10_000, Control::new()).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod benchmark;
pub mod debug;
pub mod distribution;
pub mod error;
pub mod report;
pub mod task;

pub use benchmark::{BenchmarkResult, ContainerReport, benchmark, benchmark_containers};
pub use debug::{DebugReport, debug_hash};
pub use distribution::{
    DistributionReport, DistributionStats, analyze_algorithms, analyze_distribution,
};
pub use error::{Error, Result};
pub use report::{AnalysisKind, Report};
pub use task::{Control, run_analysis, spawn_analysis};

/// Environment variable overriding the default iteration count.
pub const ITERATIONS_ENV: &str = "HASHPASS_ITERATIONS";

pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Iteration bounds accepted by the command line.
pub const MIN_ITERATIONS: u32 = 100;
pub const MAX_ITERATIONS: u32 = 100_000;

