//! Candidate URL extraction.
//!
//! Scans free text for links to supported hosts, drops forbidden and
//! already-recorded links, and expands paste-site links by fetching the paste
//! and scanning it in turn (bounded depth).

mod pattern;

pub use pattern::build_pattern;

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::fetch::{self, FetchError, Timeouts};
use crate::hosts::HostTable;

/// Outcome of scanning one input: the deduplicated candidates plus bookkeeping.
#[derive(Debug, Default, Clone)]
pub struct Extraction {
    /// Links to validate; each gets exactly one verdict.
    pub candidates: BTreeSet<String>,
    /// Paste pages fetched and scanned.
    pub pastes_expanded: usize,
    /// Links dropped because an output file already lists them.
    pub skipped_seen: usize,
}

pub struct Extractor {
    table: Arc<HostTable>,
    pattern: Regex,
}

impl Extractor {
    pub fn new(table: Arc<HostTable>) -> anyhow::Result<Self> {
        let pattern = build_pattern(table.domains())?;
        Ok(Self { table, pattern })
    }

    /// Every supported-host link in `text`, deduplicated, before any filtering.
    pub fn raw_urls(&self, text: &str) -> BTreeSet<String> {
        let text = normalize_input(text);
        self.pattern
            .find_iter(&text)
            .map(|m| m.as_str().trim_end_matches(['.', '\'']).to_string())
            .collect()
    }

    /// Scans `text`, fetching paste pages with libcurl.
    pub fn collect(
        &self,
        text: &str,
        seen: &HashSet<String>,
        paste_depth: u32,
        timeouts: Timeouts,
    ) -> Extraction {
        self.collect_with(text, seen, paste_depth, |url| fetch_paste(url, timeouts))
    }

    /// Like [`Extractor::collect`] with a caller-supplied paste fetcher.
    ///
    /// Paste links are expanded while `paste_depth` allows; at the limit they
    /// are kept as ordinary candidates. A paste that fails to load is logged
    /// and contributes nothing.
    pub fn collect_with<F>(
        &self,
        text: &str,
        seen: &HashSet<String>,
        paste_depth: u32,
        mut fetch_paste: F,
    ) -> Extraction
    where
        F: FnMut(&str) -> Result<String, FetchError>,
    {
        let mut out = Extraction::default();
        let mut visited = HashSet::new();
        self.scan(text, seen, paste_depth, &mut fetch_paste, &mut visited, &mut out);
        out
    }

    fn scan<F>(
        &self,
        text: &str,
        seen: &HashSet<String>,
        depth_left: u32,
        fetch_paste: &mut F,
        visited: &mut HashSet<String>,
        out: &mut Extraction,
    ) where
        F: FnMut(&str) -> Result<String, FetchError>,
    {
        for url in self.raw_urls(text) {
            if self.table.is_forbidden(&url) {
                tracing::trace!(url = %url, "forbidden link dropped");
                continue;
            }
            if seen.contains(&url) {
                out.skipped_seen += 1;
                continue;
            }
            if depth_left > 0 && self.table.is_paste(&url) {
                if !visited.insert(url.clone()) {
                    continue;
                }
                let raw_url = self.table.fix_url(&url);
                match fetch_paste(&raw_url) {
                    Ok(body) => {
                        out.pastes_expanded += 1;
                        tracing::debug!(paste = %url, "scanning paste");
                        self.scan(&body, seen, depth_left - 1, fetch_paste, visited, out);
                    }
                    Err(e) => tracing::warn!(paste = %url, "could not load paste: {}", e),
                }
                continue;
            }
            out.candidates.insert(url);
        }
    }
}

/// Splits URLs glued together and folds the legacy MEGA domain.
fn normalize_input(text: &str) -> String {
    text.replace("http", " http").replace("mega.co.nz", "mega.nz")
}

fn fetch_paste(url: &str, timeouts: Timeouts) -> Result<String, FetchError> {
    let page = fetch::get_page(url, timeouts)?;
    if !page.is_ok() {
        return Err(FetchError::Http(page.status));
    }
    Ok(page.body)
}
