//! Builds the link pattern from the host table's domains.

use anyhow::{Context, Result};
use regex::Regex;

/// Characters that end a URL in free text.
const URL_BODY: &str = r#"[^ \t\r\n"<>();,]"#;

/// Case-insensitive pattern for `http(s)://[sub.]<domain>[.tld][:port]/path`.
///
/// Domains may be partial (`bunkrr` matches `bunkrr.su`). A URL needs at least
/// one path segment to match.
pub fn build_pattern<'a, I>(domains: I) -> Result<Regex>
where
    I: IntoIterator<Item = &'a str>,
{
    let alternatives: Vec<String> = domains.into_iter().map(regex::escape).collect();
    if alternatives.is_empty() {
        anyhow::bail!("host table has no domains");
    }
    let pattern = format!(
        r"(?i)https?://(?:[a-z0-9-]+\.)*(?:{})(?:\.[a-z0-9-]+)*(?::\d+)?(?:/{}+)+",
        alternatives.join("|"),
        URL_BODY
    );
    Regex::new(&pattern).with_context(|| format!("invalid link pattern: {pattern}"))
}
