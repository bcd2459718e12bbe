//! Per-link liveness probing.
//!
//! One GET per candidate (plus one MEGA API call for MEGA links). Every
//! failure, whether transport error, timeout, non-200 or a host's "not found"
//! page, becomes an `Invalid` verdict; nothing here aborts the run.

mod liveness;
pub mod mega;

use std::fmt;
use std::sync::Arc;

use crate::fetch::{self, Timeouts};
use crate::hosts::{HostKind, HostTable, Liveness};

/// Why a link was judged dead. Logged only; the output partition is two-valued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadReason {
    /// No host entry serves the URL, or it is a paste page left unexpanded.
    Unsupported,
    /// The host answered with something other than 200.
    HttpStatus(u32),
    /// 200, but the body is the host's "file not found" page.
    NotFoundPage,
    /// DNS, connect, timeout or other transport failure.
    Unreachable(String),
    /// MEGA API returned a negative error code.
    MegaError(i64),
}

impl fmt::Display for DeadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadReason::Unsupported => write!(f, "unsupported link"),
            DeadReason::HttpStatus(code) => write!(f, "HTTP {}", code),
            DeadReason::NotFoundPage => write!(f, "host shows a not-found page"),
            DeadReason::Unreachable(e) => write!(f, "unreachable: {}", e),
            DeadReason::MegaError(code) => write!(f, "MEGA API error {}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(DeadReason),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Checks candidate links against their hosting services.
#[derive(Debug, Clone)]
pub struct Validator {
    table: Arc<HostTable>,
    timeouts: Timeouts,
    mega_api: String,
}

impl Validator {
    pub fn new(table: Arc<HostTable>, timeouts: Timeouts) -> Self {
        Self {
            table,
            timeouts,
            mega_api: mega::MEGA_API_URL.to_string(),
        }
    }

    /// Points MEGA lookups at another API endpoint.
    pub fn with_mega_api(mut self, api: impl Into<String>) -> Self {
        self.mega_api = api.into();
        self
    }

    /// Probes `url` and returns its verdict. Blocking; run under `spawn_blocking` from async code.
    pub fn check(&self, url: &str) -> Verdict {
        let verdict = self.probe(url);
        match &verdict {
            Verdict::Valid => tracing::debug!(url, "live"),
            Verdict::Invalid(reason) => tracing::debug!(url, %reason, "dead"),
        }
        verdict
    }

    fn probe(&self, url: &str) -> Verdict {
        let rule = match self.table.lookup(url).map(|h| &h.kind) {
            Some(HostKind::Probe(rule)) => rule,
            Some(HostKind::Paste) | None => return Verdict::Invalid(DeadReason::Unsupported),
        };

        let target = self.table.fix_url(url);
        let page = match fetch::get_page(&target, self.timeouts) {
            Ok(page) => page,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!(url, "timed out");
                }
                return Verdict::Invalid(DeadReason::Unreachable(e.to_string()));
            }
        };
        if !page.is_ok() {
            return Verdict::Invalid(DeadReason::HttpStatus(page.status));
        }

        match rule {
            Liveness::Mega => mega::check(&target, &self.mega_api, self.timeouts),
            rule if liveness::page_is_live(rule, &page) => Verdict::Valid,
            _ => Verdict::Invalid(DeadReason::NotFoundPage),
        }
    }
}
