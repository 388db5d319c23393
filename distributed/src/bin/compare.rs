use anyhow::Result;
use clap::Parser;
use common::{init_logging, App};
use distributed::{compare, JobArgs};
use std::path::PathBuf;
use tracing::error;

/// Counts INPUT both partitioned and sequentially and checks the results agree.
#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(short, long, default_value = "wc")]
    app_name: String,
    /// Where the distributed count is written
    #[arg(short, long, default_value = "output/hamletout.txt")]
    output: PathBuf,
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[command(flatten)]
    job: JobArgs,
    #[arg(default_value = "data/hamlet.txt")]
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref())?;
    let app = App::load(&cli.app_name)?;

    let comparison = compare(&app, &cli.input, &cli.output, &cli.job.into())?;
    println!("{}\n", comparison.distributed);
    match &comparison.written {
        Ok(()) => println!("Output written to {}\n", cli.output.display()),
        Err(e) => error!("{:#}", e),
    }
    println!("{}\n", comparison.sequential);
    println!("Testing equality of results: PASS");
    comparison.written
}
