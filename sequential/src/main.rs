use anyhow::Result;
use clap::Parser;
use common::{init_logging, output::write_count, run_sequential, App};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(short, long, default_value = "wc")]
    app_name: String,
    /// Write the count to this file, creating parent directories
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long)]
    log_dir: Option<PathBuf>,
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref())?;
    let app = App::load(&cli.app_name)?;

    let report = run_sequential(&app, &cli.input)?;
    println!("{report}");

    if let Some(output) = &cli.output {
        write_count(output, report.word_count)?;
    }
    Ok(())
}
