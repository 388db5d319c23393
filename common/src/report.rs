use std::{fmt, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Distributed,
}

/// Outcome of one run, printed by the binaries.
#[derive(Debug, Clone)]
pub struct Report {
    pub mode: Mode,
    pub app_name: String,
    pub word_count: u64,
    pub elapsed: Duration,
    pub partitions: Option<usize>,
    pub retried_tasks: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = match (self.mode, self.partitions) {
            (Mode::Distributed, Some(n)) => format!("Distributed execution (@ {n} partitions):"),
            (Mode::Distributed, None) => "Distributed execution:".to_string(),
            (Mode::Sequential, _) => "Sequential execution:".to_string(),
        };
        writeln!(f, "{header}")?;
        writeln!(f, "{}", "-".repeat(header.len()))?;
        writeln!(f, "app = {}", self.app_name)?;
        writeln!(f, "word_count = {}", self.word_count)?;
        if self.retried_tasks > 0 {
            writeln!(f, "retried_tasks = {}", self.retried_tasks)?;
        }
        write!(f, "time_elapsed = {:.6}s", self.elapsed.as_secs_f64())
    }
}
