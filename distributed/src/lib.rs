use anyhow::Result;
use common::{input::read_lines, output::write_count, run_sequential, App, Mode, Report};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;
use uuid::Uuid;

pub mod config;
pub mod context;
pub mod coordinator;
pub mod partition;

pub use config::{JobArgs, JobConfig};
pub use context::ComputeContext;
pub use coordinator::JobOutcome;
pub use partition::{Partition, PartitionStrategy};

/// Counts `input` with `app` on a scoped compute context.
pub fn run_distributed(app: &App, input: &Path, config: &JobConfig) -> Result<Report> {
    let (outcome, elapsed) = ComputeContext::scope(&app.app_name, config.workers, |ctx| {
        let start = Instant::now();
        let lines = read_lines(input)?;
        info!("read {} lines from {}", lines.len(), input.display());
        let outcome = ctx.run(app, lines, config)?;
        Ok((outcome, start.elapsed()))
    })?;

    Ok(Report {
        mode: Mode::Distributed,
        app_name: app.app_name.clone(),
        word_count: outcome.value,
        elapsed,
        partitions: Some(outcome.partitions),
        retried_tasks: outcome.retried_tasks,
    })
}

#[derive(Debug)]
pub struct Comparison {
    pub distributed: Report,
    pub sequential: Report,
    /// Outcome of persisting the distributed count.
    pub written: Result<()>,
}

/// Counts `input` partitioned, writes that count to `output`, then counts
/// `input` again sequentially.
///
/// Panics if the two counts differ. A failed write does not stop the
/// sequential run; it is handed back in [`Comparison::written`].
pub fn compare(app: &App, input: &Path, output: &Path, config: &JobConfig) -> Result<Comparison> {
    let distributed = run_distributed(app, input, config)?;
    let written = write_count(output, distributed.word_count);
    let sequential = run_sequential(app, input)?;

    assert_eq!(
        distributed.word_count, sequential.word_count,
        "distributed and sequential counts differ"
    );
    Ok(Comparison {
        distributed,
        sequential,
        written,
    })
}

pub fn temp_file() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("wc-{}", Uuid::new_v4()));
    path
}
