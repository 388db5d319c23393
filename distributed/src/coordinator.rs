use crate::{config::JobConfig, partition::Partition};
use anyhow::{Context, Result};
use common::App;
use crossbeam_queue::SegQueue;
use dashmap::DashMap;
use itertools::Itertools;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{
    task::{JoinHandle, JoinSet},
    time,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type TaskId = String;
type TaskMap = DashMap<TaskId, Task>;

fn new_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub partition: Arc<Partition>,
}

#[derive(Debug)]
pub struct PollTaskReply {
    pub task: Option<Task>,
    pub shutdown: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOutcome {
    pub value: u64,
    pub partitions: usize,
    pub retried_tasks: usize,
}

/// Hands out one task per partition to workers and collects their results.
///
/// A task still running after `task_timeout` is queued again under a fresh
/// id; completions from ids that are no longer running are dropped, so every
/// partition contributes exactly once.
#[derive(Debug)]
pub struct Coordinator {
    app: App,
    n_partitions: usize,
    task_timeout: Duration,
    poll_interval: Duration,
    pending_tasks: Arc<SegQueue<Task>>,
    running_tasks: Arc<TaskMap>,
    results: DashMap<usize, u64>,
    retry_handlers: Arc<DashMap<TaskId, JoinHandle<()>>>,
    retried: Arc<AtomicUsize>,
}

impl Coordinator {
    pub fn new(app: App, partitions: Vec<Partition>, config: &JobConfig) -> Self {
        let this = Self {
            app,
            n_partitions: partitions.len(),
            task_timeout: config.task_timeout,
            poll_interval: config.poll_interval,
            pending_tasks: Arc::new(SegQueue::new()),
            running_tasks: Arc::new(TaskMap::new()),
            results: DashMap::new(),
            retry_handlers: Arc::new(DashMap::new()),
            retried: Arc::new(AtomicUsize::new(0)),
        };
        for partition in partitions {
            this.pending_tasks.push(Task {
                id: new_task_id(),
                partition: Arc::new(partition),
            });
        }
        this
    }

    fn spawn_retry(&self, task: &Task) {
        let id = task.id.clone();
        let timeout = self.task_timeout;

        let pending = Arc::clone(&self.pending_tasks);
        let running = Arc::clone(&self.running_tasks);
        let retried = Arc::clone(&self.retried);
        let handlers = Arc::clone(&self.retry_handlers);

        let handler = tokio::spawn(async move {
            use dashmap::mapref::entry::Entry;

            time::sleep(timeout).await;
            handlers.remove(&id);
            if let Entry::Occupied(o) = running.entry(id) {
                let mut task = o.remove_entry().1;
                warn!(
                    "task {} (partition {}) timed out, re-queueing",
                    task.id, task.partition.index
                );
                task.id = new_task_id();
                retried.fetch_add(1, Ordering::Relaxed);
                pending.push(task);
            }
        });

        self.retry_handlers.insert(task.id.clone(), handler);
        // the timer may have fired before its handle was stored
        self.retry_handlers
            .remove_if(&task.id, |_, handler| handler.is_finished());
    }

    pub fn done(&self) -> bool {
        self.results.len() == self.n_partitions
    }

    pub fn poll_task(&self) -> PollTaskReply {
        match self.pending_tasks.pop() {
            Some(task) => {
                self.running_tasks.insert(task.id.clone(), task.clone());
                self.spawn_retry(&task);
                debug!("assigned task {} (partition {})", task.id, task.partition.index);
                PollTaskReply {
                    task: Some(task),
                    shutdown: false,
                }
            }
            None => PollTaskReply {
                task: None,
                shutdown: self.done(),
            },
        }
    }

    /// Records `value` for the task's partition. Returns `false` when the
    /// task id is no longer running and the value was ignored.
    pub fn complete_task(&self, task: &Task, value: u64) -> bool {
        if self.running_tasks.remove(&task.id).is_none() {
            info!(
                "ignoring stale completion of task {} (partition {})",
                task.id, task.partition.index
            );
            return false;
        }
        if let Some((_, handler)) = self.retry_handlers.remove(&task.id) {
            handler.abort()
        }

        self.results.insert(task.partition.index, value);
        debug!("task done: {} (partition {}) = {}", task.id, task.partition.index, value);
        if self.done() {
            info!("all {} partitions done", self.n_partitions);
        }
        true
    }

    /// Folds the partition results. Partitions without a result are
    /// skipped, so this is only meaningful once [`Coordinator::done`].
    pub fn reduce(&self) -> u64 {
        self.results
            .iter()
            .map(|pair| (*pair.key(), *pair.value()))
            .sorted_by_key(|(index, _)| *index)
            .fold(self.app.identity(), |acc, (_, value)| self.app.reduce(acc, value))
    }

    /// Runs `workers` worker tasks until every partition is done, then
    /// reduces. Dropping the returned future aborts the workers.
    pub async fn run(self: Arc<Self>, workers: usize) -> Result<JobOutcome> {
        info!(
            "running {} over {} partitions with {} workers",
            self.app.app_name, self.n_partitions, workers
        );
        let mut set = JoinSet::new();
        for id in 0..workers {
            set.spawn(run_worker(id, Arc::clone(&self)));
        }
        while let Some(joined) = set.join_next().await {
            joined.context("worker task aborted")??;
        }

        Ok(JobOutcome {
            value: self.reduce(),
            partitions: self.n_partitions,
            retried_tasks: self.retried.load(Ordering::Relaxed),
        })
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        for pair in self.retry_handlers.iter() {
            pair.value().abort();
        }
    }
}

async fn run_worker(id: usize, coordinator: Arc<Coordinator>) -> Result<()> {
    loop {
        let reply = coordinator.poll_task();
        match reply.task {
            Some(task) => {
                let app = coordinator.app.clone();
                let partition = Arc::clone(&task.partition);
                let value = tokio::task::spawn_blocking(move || common::fold(&*app, &partition.lines))
                    .await
                    .with_context(|| format!("partition {} failed", task.partition.index))?;
                coordinator.complete_task(&task, value);
            }
            None if reply.shutdown => {
                debug!("worker {} exit", id);
                return Ok(());
            }
            None => time::sleep(coordinator.poll_interval).await,
        }
    }
}
