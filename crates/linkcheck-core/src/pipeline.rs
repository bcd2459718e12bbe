//! One check run: extract candidates, probe each one, append it to a list.
//!
//! Probes are blocking curl calls, run on the blocking pool with at most
//! `workers` in flight. Results are written from the driving task only, so
//! each output list has a single writer.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LinkcheckConfig;
use crate::extract::Extractor;
use crate::hosts::{self, HostTable};
use crate::output::{self, OutputLists};
use crate::validate::Validator;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub input_lines: usize,
    pub candidates: usize,
    pub good: usize,
    pub bad: usize,
    pub skipped_seen: usize,
    pub pastes_expanded: usize,
    pub good_path: PathBuf,
    pub bad_path: PathBuf,
}

pub struct Checker {
    cfg: LinkcheckConfig,
    extractor: Arc<Extractor>,
    validator: Validator,
}

impl Checker {
    /// Checker over the built-in host table.
    pub fn new(cfg: LinkcheckConfig) -> Result<Self> {
        Self::with_table(cfg, hosts::builtin())
    }

    pub fn with_table(cfg: LinkcheckConfig, table: HostTable) -> Result<Self> {
        let table = Arc::new(table);
        let extractor = Arc::new(Extractor::new(Arc::clone(&table))?);
        let validator = Validator::new(table, cfg.timeouts());
        Ok(Self {
            cfg,
            extractor,
            validator,
        })
    }

    /// Points MEGA lookups at another API endpoint.
    pub fn with_mega_api(mut self, api: impl Into<String>) -> Self {
        self.validator = self.validator.with_mega_api(api);
        self
    }

    /// Checks every link in the file at `input` and appends each to the good or bad list.
    ///
    /// Input bytes that are not UTF-8 are replaced, not rejected. Links
    /// already present in either list are skipped. Probe failures only
    /// mark links bad; unreadable input or a failed list write ends the run.
    pub async fn run(&self, input: &Path) -> Result<RunSummary> {
        let bytes = fs::read(input)
            .with_context(|| format!("failed to read input file: {}", input.display()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let input_lines = text.lines().count();
        tracing::info!("raw input lines: {}", input_lines);
        if text.trim().is_empty() {
            tracing::warn!("input file {} is empty", input.display());
        }

        let out_dir = self.cfg.output_dir.clone();
        let seen = output::load_seen(&out_dir)?;
        tracing::info!("previously recorded URLs: {}", seen.len());

        let extraction = tokio::task::spawn_blocking({
            let extractor = Arc::clone(&self.extractor);
            let depth = self.cfg.paste_depth;
            let timeouts = self.cfg.timeouts();
            move || extractor.collect(&text, &seen, depth, timeouts)
        })
        .await
        .context("extract task join")?;
        tracing::info!(
            "unique unseen candidate URLs: {} ({} paste page(s) expanded)",
            extraction.candidates.len(),
            extraction.pastes_expanded
        );

        let mut lists = OutputLists::open(&out_dir)?;
        let candidates = extraction.candidates.len();
        let workers = self.cfg.workers.max(1);
        let mut pending = extraction.candidates.into_iter();
        let mut join_set = tokio::task::JoinSet::new();

        loop {
            while join_set.len() < workers {
                let Some(url) = pending.next() else {
                    break;
                };
                let validator = self.validator.clone();
                join_set.spawn_blocking(move || {
                    let verdict = validator.check(&url);
                    (url, verdict)
                });
            }
            let Some(joined) = join_set.join_next().await else {
                break;
            };
            let (url, verdict) = joined.context("probe task join")?;
            lists.record(&url, &verdict)?;
        }

        let summary = RunSummary {
            input_lines,
            candidates,
            good: lists.good_count(),
            bad: lists.bad_count(),
            skipped_seen: extraction.skipped_seen,
            pastes_expanded: extraction.pastes_expanded,
            good_path: lists.good_path().to_path_buf(),
            bad_path: lists.bad_path().to_path_buf(),
        };
        tracing::info!(
            "checked {} URL(s): {} good, {} bad",
            summary.candidates,
            summary.good,
            summary.bad
        );
        Ok(summary)
    }
}

/// Runs one check of `input` with the built-in host table.
pub async fn run_check(input: &Path, cfg: &LinkcheckConfig) -> Result<RunSummary> {
    Checker::new(cfg.clone())?.run(input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::{Liveness, SupportedHost};
    use tempfile::tempdir;

    fn cfg_in(dir: &Path) -> LinkcheckConfig {
        LinkcheckConfig {
            output_dir: dir.join("output"),
            ..LinkcheckConfig::default()
        }
    }

    #[tokio::test]
    async fn no_matches_leaves_empty_lists() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "nothing to see at https://example.com/here\n").unwrap();
        let cfg = cfg_in(dir.path());
        let table = HostTable::new(vec![SupportedHost::probe(
            "hosta.example",
            Liveness::Status200,
        )]);

        let summary = Checker::with_table(cfg.clone(), table)
            .unwrap()
            .run(&input)
            .await
            .unwrap();

        assert_eq!(summary.candidates, 0);
        assert_eq!(summary.input_lines, 1);
        let good = fs::read_to_string(cfg.output_dir.join(output::GOOD_FILE)).unwrap();
        let bad = fs::read_to_string(cfg.output_dir.join(output::BAD_FILE)).unwrap();
        assert!(good.is_empty());
        assert!(bad.is_empty());
    }

    #[tokio::test]
    async fn non_utf8_input_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("latin1.txt");
        fs::write(&input, b"caf\xe9 https://hosta.example/file/x\n").unwrap();
        let cfg = LinkcheckConfig {
            connect_timeout_secs: 1,
            timeout_secs: 2,
            ..cfg_in(dir.path())
        };
        let table = HostTable::new(vec![SupportedHost::probe(
            "hosta.example",
            Liveness::Status200,
        )]);

        let summary = Checker::with_table(cfg, table)
            .unwrap()
            .run(&input)
            .await
            .unwrap();

        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.good + summary.bad, 1);
        let listed = fs::read_to_string(&summary.good_path).unwrap()
            + &fs::read_to_string(&summary.bad_path).unwrap();
        assert_eq!(listed, "https://hosta.example/file/x\n");
    }

    #[tokio::test]
    async fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let err = run_check(&dir.path().join("absent.txt"), &cfg)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read input file"));
    }
}
