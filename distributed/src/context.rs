use crate::{
    config::JobConfig,
    coordinator::{Coordinator, JobOutcome},
    partition::partition,
};
use anyhow::{Context, Result};
use common::App;
use std::{num::NonZeroUsize, sync::Arc, time::Duration};
use tokio::runtime::{self, Runtime};
use tracing::info;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// A dedicated runtime for partitioned jobs.
///
/// The runtime is shut down when the context is dropped, whichever way the
/// owning scope exits.
#[derive(Debug)]
pub struct ComputeContext {
    name: String,
    threads: usize,
    runtime: Option<Runtime>,
}

impl ComputeContext {
    pub fn start(name: &str, threads: NonZeroUsize) -> Result<Self> {
        let runtime = runtime::Builder::new_multi_thread()
            .worker_threads(threads.get())
            .thread_name(format!("{name}-worker"))
            .enable_all()
            .build()
            .with_context(|| format!("start compute context {name}"))?;
        info!("compute context {} started with {} threads", name, threads);
        Ok(Self {
            name: name.to_string(),
            threads: threads.get(),
            runtime: Some(runtime),
        })
    }

    /// Runs `f` with a context that only lives for the duration of the call.
    pub fn scope<T, F>(name: &str, threads: NonZeroUsize, f: F) -> Result<T>
    where
        F: FnOnce(&ComputeContext) -> Result<T>,
    {
        let ctx = Self::start(name, threads)?;
        f(&ctx)
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Partitions `lines` and counts them with `app` on this context.
    pub fn run(&self, app: &App, lines: Vec<String>, config: &JobConfig) -> Result<JobOutcome> {
        let runtime = self
            .runtime
            .as_ref()
            .with_context(|| format!("compute context {} is stopped", self.name))?;
        let partitions = partition(lines, config.partitions, config.strategy);
        let coordinator = Arc::new(Coordinator::new(app.clone(), partitions, config));
        runtime.block_on(coordinator.run(config.workers.get()))
    }
}

impl Drop for ComputeContext {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
            info!("compute context {} stopped", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> NonZeroUsize {
        NonZeroUsize::new(2).unwrap()
    }

    #[test]
    fn test_scope_runs_job() {
        let app = App::load("wc").unwrap();
        let lines = vec!["Hello, World!".to_string(), "a  b".to_string()];
        let outcome = ComputeContext::scope("test", two(), |ctx| {
            assert_eq!(ctx.threads(), 2);
            ctx.run(&app, lines, &JobConfig::default())
        })
        .unwrap();
        assert_eq!(outcome.value, 5);
    }

    #[test]
    fn test_scope_propagates_error() {
        let result: Result<()> =
            ComputeContext::scope("test", two(), |_| anyhow::bail!("job failed"));
        assert_eq!(result.unwrap_err().to_string(), "job failed");
    }

    #[test]
    fn test_context_reusable() {
        let app = App::load("wc").unwrap();
        let ctx = ComputeContext::start("test", two()).unwrap();
        for n in 1..4 {
            let lines = vec!["word".to_string(); n];
            assert_eq!(ctx.run(&app, lines, &JobConfig::default()).unwrap().value, n as u64);
        }
    }
}
