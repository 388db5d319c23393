use anyhow::Result;
use clap::Parser;
use common::{init_logging, output::write_count, App};
use distributed::{run_distributed, JobArgs};
use std::path::PathBuf;

/// Counts words in INPUT over partitions on a local compute context.
#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(short, long, default_value = "wc")]
    app_name: String,
    /// Write the count to this file, creating parent directories
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write logs to a daily file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[command(flatten)]
    job: JobArgs,
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref())?;

    let app = App::load(&cli.app_name)?;
    let report = run_distributed(&app, &cli.input, &cli.job.into())?;
    println!("{report}");

    if let Some(output) = &cli.output {
        write_count(output, report.word_count)?;
    }
    Ok(())
}
