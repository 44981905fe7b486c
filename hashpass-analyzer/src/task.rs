//! Background execution of analyses.
//!
//! Work runs on tokio's blocking pool and reports back through a single
//! completion: the awaited `Result<Report>`. A [`Control`] travels with the
//! work so callers can cancel it and watch progress.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::report::{AnalysisKind, Report};

/// Cancellation flag and progress counter shared with a running analysis.
#[derive(Debug, Clone, Default)]
pub struct Control {
    cancel: CancellationToken,
    progress: Arc<AtomicU64>,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            progress: Arc::default(),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Work units completed so far.
    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Relaxed)
    }

    /// Fails with [`Error::Cancelled`] once cancellation has been requested.
    #[inline]
    pub fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn advance(&self, units: u64) {
        self.progress.fetch_add(units, Ordering::Relaxed);
    }
}

/// Runs `kind` on the blocking pool and waits for its single result.
pub async fn run_analysis(kind: AnalysisKind, iterations: u32, ctl: Control) -> Result<Report> {
    tokio::task::spawn_blocking(move || kind.run(iterations, &ctl))
        .await?
}

/// Detached variant of [`run_analysis`]; await the handle for the result.
pub fn spawn_analysis(
    kind: AnalysisKind,
    iterations: u32,
    ctl: Control,
) -> JoinHandle<Result<Report>> {
    tokio::spawn(run_analysis(kind, iterations, ctl))
}
