use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use weebcentral_dl::{cli::Cli, error_time, info_time, process::process_series, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let start_time = Local::now();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {
            info_time!(start_time, "Download completed.");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            error_time!("Download finished with failed chapters.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error_time!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let config = cli.into_config()?;
    let summary = process_series(&config).await?;

    for (chapter, outcome) in summary.chapters.iter().filter(|(_, o)| o.is_failed()) {
        error_time!("{}: {outcome}", chapter.name);
    }
    Ok(summary.is_success())
}
