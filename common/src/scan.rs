use crate::{input, App, Mode, Report};
use anyhow::Result;
use std::{path::Path, time::Instant};
use tracing::info;

/// Counts `path` with `app` in one streaming pass.
pub fn run_sequential(app: &App, path: &Path) -> Result<Report> {
    let start = Instant::now();
    let mut acc = app.identity();
    let mut lines = 0usize;
    input::for_each_line(path, |line| {
        acc = app.reduce(acc, app.map(line));
        lines += 1;
    })?;
    info!("scanned {} lines from {}", lines, path.display());

    Ok(Report {
        mode: Mode::Sequential,
        app_name: app.app_name.clone(),
        word_count: acc,
        elapsed: start.elapsed(),
        partitions: None,
        retried_tasks: 0,
    })
}
