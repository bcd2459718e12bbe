//! MEGA links: the share page always loads, so existence is asked of the MEGA API.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{DeadReason, Verdict};
use crate::fetch::{self, Timeouts};

pub const MEGA_API_URL: &str = "https://g.api.mega.co.nz/cs";

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MegaKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MegaLink {
    pub kind: MegaKind,
    pub id: String,
}

/// Rewrites legacy `#!id!key` / `#F!id!key` links to `file/id#key` / `folder/id#key`.
pub fn normalize_mega_url(url: &str) -> String {
    let url = url.replace("mega.co.nz", "mega.nz");
    if url.contains("#F!") {
        return url.replace("#F!", "folder/").replace('!', "#");
    }
    if url.contains("#!") {
        return url.replace("#!", "file/").replace('!', "#");
    }
    url
}

impl MegaLink {
    /// Parses a (normalized) `…/file/<id>#key` or `…/folder/<id>#key` link.
    pub fn parse(url: &str) -> Option<Self> {
        let parsed = url::Url::parse(url).ok()?;
        let mut segments = parsed.path_segments()?;
        let kind = match segments.next()? {
            "file" => MegaKind::File,
            "folder" => MegaKind::Folder,
            _ => return None,
        };
        let id = segments.next().filter(|s| !s.is_empty())?;
        Some(Self {
            kind,
            id: id.to_string(),
        })
    }

    fn api_url(&self, api: &str) -> String {
        let seq = REQUEST_SEQ.fetch_add(1, Ordering::Relaxed);
        match self.kind {
            MegaKind::File => format!("{api}?id={seq}"),
            MegaKind::Folder => format!("{api}?id={seq}&n={}", self.id),
        }
    }

    fn payload(&self) -> Value {
        match self.kind {
            MegaKind::File => json!([{ "a": "g", "p": self.id }]),
            MegaKind::Folder => json!([{ "a": "f", "c": 1, "r": 1, "ca": 1 }]),
        }
    }
}

/// MEGA answers a failed command with a negative error code, either bare or
/// as the single element of the reply array.
fn error_code(reply: &Value) -> Option<i64> {
    let code = match reply {
        Value::Array(items) if items.len() == 1 => items[0].as_i64(),
        other => other.as_i64(),
    }?;
    (code < 0).then_some(code)
}

pub(crate) fn check(url: &str, api: &str, timeouts: Timeouts) -> Verdict {
    let Some(link) = MegaLink::parse(&normalize_mega_url(url)) else {
        tracing::debug!(url, "unrecognized MEGA link shape");
        return Verdict::Invalid(DeadReason::Unsupported);
    };
    match fetch::post_json(&link.api_url(api), &link.payload(), timeouts) {
        Ok(reply) => match error_code(&reply) {
            Some(code) => Verdict::Invalid(DeadReason::MegaError(code)),
            None => Verdict::Valid,
        },
        Err(e) => Verdict::Invalid(DeadReason::Unreachable(e.to_string())),
    }
}
