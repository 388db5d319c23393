use std::{fmt, ops::Deref, sync::Arc};

pub mod input;
mod logging;
pub mod output;
pub mod report;
mod scan;
pub mod wc;

pub use logging::{init_logger, init_logger_with_dir, init_logging};
pub use report::{Mode, Report};
pub use scan::run_sequential;

pub const APP_NAMES: &[&str] = &["wc"];

/// Map/reduce factorization of a line-oriented job.
///
/// `map` is applied to every line independently and `reduce` must be
/// associative and commutative with `identity` as its neutral element, so
/// any partitioning of the input folds to the same value.
pub trait Api: Send + Sync {
    fn name(&self) -> &str;

    fn map(&self, line: &str) -> u64;

    fn reduce(&self, left: u64, right: u64) -> u64;

    fn identity(&self) -> u64 {
        0
    }
}

/// Folds `lines` in order with `app`.
pub fn fold<I, S>(app: &dyn Api, lines: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .fold(app.identity(), |acc, line| app.reduce(acc, app.map(line.as_ref())))
}

#[derive(Clone)]
pub struct App {
    pub app_name: String,
    inner: Arc<dyn Api>,
}

impl App {
    pub fn load(app_name: &str) -> anyhow::Result<Self> {
        let inner: Arc<dyn Api> = match app_name {
            "wc" => Arc::new(wc::WordCount),
            _ => anyhow::bail!(
                "unknown app `{}`, expected one of: {}",
                app_name,
                APP_NAMES.join(", ")
            ),
        };
        Ok(Self {
            app_name: app_name.to_string(),
            inner,
        })
    }

    pub fn from_api(api: Arc<dyn Api>) -> Self {
        Self {
            app_name: api.name().to_string(),
            inner: api,
        }
    }
}

impl Deref for App {
    type Target = dyn Api;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").field("app_name", &self.app_name).finish()
    }
}
