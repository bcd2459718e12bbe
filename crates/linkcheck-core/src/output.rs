//! The two append-only result lists: `good_urls.txt` and `bad_urls.txt`.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::validate::Verdict;

pub const GOOD_FILE: &str = "good_urls.txt";
pub const BAD_FILE: &str = "bad_urls.txt";

/// Open handles on both lists. One URL per line, each line flushed as written.
pub struct OutputLists {
    good: File,
    bad: File,
    good_path: PathBuf,
    bad_path: PathBuf,
    good_count: usize,
    bad_count: usize,
}

fn open_append(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output list: {}", path.display()))
}

impl OutputLists {
    /// Opens (creating if absent) both lists inside `dir`, creating `dir` too.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir: {}", dir.display()))?;
        let good_path = dir.join(GOOD_FILE);
        let bad_path = dir.join(BAD_FILE);
        Ok(Self {
            good: open_append(&good_path)?,
            bad: open_append(&bad_path)?,
            good_path,
            bad_path,
            good_count: 0,
            bad_count: 0,
        })
    }

    /// Appends `url` to the list matching `verdict`. Write failures are fatal to the run.
    pub fn record(&mut self, url: &str, verdict: &Verdict) -> Result<()> {
        let (file, path) = if verdict.is_valid() {
            self.good_count += 1;
            (&mut self.good, &self.good_path)
        } else {
            self.bad_count += 1;
            (&mut self.bad, &self.bad_path)
        };
        writeln!(file, "{}", url)
            .and_then(|()| file.flush())
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn good_count(&self) -> usize {
        self.good_count
    }

    pub fn bad_count(&self) -> usize {
        self.bad_count
    }

    pub fn good_path(&self) -> &Path {
        &self.good_path
    }

    pub fn bad_path(&self) -> &Path {
        &self.bad_path
    }
}

/// Every URL already present in either list of `dir`. Missing lists count as empty.
pub fn load_seen(dir: &Path) -> Result<HashSet<String>> {
    let mut seen = HashSet::new();
    for name in [GOOD_FILE, BAD_FILE] {
        let path = dir.join(name);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        seen.extend(
            data.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    Ok(seen)
}
