use crate::partition::PartitionStrategy;
use clap::Args;
use std::{num::NonZeroUsize, time::Duration};

pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Number of CPUs on this host, at least one.
pub fn default_parallelism() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub partitions: NonZeroUsize,
    pub workers: NonZeroUsize,
    pub strategy: PartitionStrategy,
    /// A task running longer than this is handed out again.
    pub task_timeout: Duration,
    /// Idle workers sleep this long before polling again.
    pub poll_interval: Duration,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            partitions: default_parallelism(),
            workers: default_parallelism(),
            strategy: PartitionStrategy::default(),
            task_timeout: DEFAULT_TASK_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Number of partitions [default: number of CPUs]
    #[arg(short, long, env = "WC_PARTITIONS")]
    pub partitions: Option<NonZeroUsize>,
    /// Number of worker tasks and runtime threads [default: number of CPUs]
    #[arg(short, long, env = "WC_WORKERS")]
    pub workers: Option<NonZeroUsize>,
    #[arg(long, value_enum, env = "WC_STRATEGY", default_value_t = PartitionStrategy::Contiguous)]
    pub strategy: PartitionStrategy,
    /// Milliseconds before a running task is re-executed
    #[arg(long, env = "WC_TASK_TIMEOUT_MS", default_value_t = 5000)]
    pub task_timeout_ms: u64,
}

impl From<JobArgs> for JobConfig {
    fn from(args: JobArgs) -> Self {
        let defaults = JobConfig::default();
        Self {
            partitions: args.partitions.unwrap_or(defaults.partitions),
            workers: args.workers.unwrap_or(defaults.workers),
            strategy: args.strategy,
            task_timeout: Duration::from_millis(args.task_timeout_ms),
            poll_interval: defaults.poll_interval,
        }
    }
}
