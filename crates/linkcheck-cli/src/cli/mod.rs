//! CLI for linkcheck.

mod check;

use anyhow::Result;
use clap::Parser;
use linkcheck_core::config;
use std::path::PathBuf;

use check::run_check;

/// Sort file-hosting links into live and dead lists.
#[derive(Debug, Parser)]
#[command(name = "linkcheck")]
#[command(
    about = "linkcheck: extract file-hosting links from text and sort them into good/bad lists",
    long_about = None
)]
pub struct Cli {
    /// Text file with links anywhere in it; paste-site links are fetched and scanned.
    pub input: PathBuf,

    /// Directory for good_urls.txt and bad_urls.txt (overrides `output_dir` in config.toml).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        if let Some(dir) = cli.output_dir {
            cfg.output_dir = dir;
        }
        run_check(&cli.input, &cfg).await
    }
}
