//! `linkcheck <input>` – check every link in a file.

use anyhow::Result;
use linkcheck_core::config::LinkcheckConfig;
use linkcheck_core::pipeline;
use std::path::Path;

pub async fn run_check(input: &Path, cfg: &LinkcheckConfig) -> Result<()> {
    let summary = pipeline::run_check(input, cfg).await?;

    if summary.candidates == 0 {
        println!("No new links found in {}.", input.display());
    }
    println!("Input URLs: {}", summary.candidates);
    println!(
        "Good URLs:  {}  ({})",
        summary.good,
        summary.good_path.display()
    );
    println!(
        "Bad URLs:   {}  ({})",
        summary.bad,
        summary.bad_path.display()
    );
    if summary.skipped_seen > 0 {
        println!("Already recorded, skipped: {}", summary.skipped_seen);
    }
    Ok(())
}
