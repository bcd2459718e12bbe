//! Supported hosting services and how each one is judged.
//!
//! The table is data, not code: adding a hosting service means adding one
//! `SupportedHost` entry to [`builtin`]. Lookup matches the entry's domain
//! against the URL host (first entry wins), so partial domains such as
//! `bunkrr` cover every TLD the service hops between.

mod builtin;
mod fixers;

pub use builtin::builtin;
pub use fixers::LinkFixer;

/// How a fetched page of a file host is turned into a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    /// HTTP 200 is enough.
    Status200,
    /// 200 and the body length in characters differs from the host's fixed-size "not found" page.
    NotFoundPageLen(usize),
    /// 200 and the body contains none of the host's "not found" markers.
    NotFoundMarkers(&'static [&'static str]),
    /// 200, then a MEGA API lookup of the file or folder id.
    Mega,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    /// File host probed for liveness.
    Probe(Liveness),
    /// Paste site whose page is fetched and scanned for more links.
    Paste,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedHost {
    pub domain: String,
    pub kind: HostKind,
}

impl SupportedHost {
    pub fn probe(domain: impl Into<String>, liveness: Liveness) -> Self {
        Self {
            domain: domain.into(),
            kind: HostKind::Probe(liveness),
        }
    }

    pub fn paste(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            kind: HostKind::Paste,
        }
    }
}

/// Host table plus the URL filters and rewrites that go with it.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    hosts: Vec<SupportedHost>,
    forbidden: Vec<String>,
    fixers: Vec<LinkFixer>,
}

impl HostTable {
    pub fn new(hosts: Vec<SupportedHost>) -> Self {
        Self {
            hosts,
            forbidden: Vec::new(),
            fixers: Vec::new(),
        }
    }

    /// Substrings that disqualify a matched URL (executables, redirectors, etc.).
    pub fn with_forbidden<I, S>(mut self, forbidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden = forbidden.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fixers(mut self, fixers: Vec<LinkFixer>) -> Self {
        self.fixers = fixers;
        self
    }

    /// Domains in table order, for building the extraction pattern.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(|h| h.domain.as_str())
    }

    /// Finds the entry serving `url`, comparing against the URL's `host[:port]`.
    pub fn lookup(&self, url: &str) -> Option<&SupportedHost> {
        let authority = authority_of(url)?;
        self.hosts
            .iter()
            .find(|h| domain_matches(&authority, &h.domain))
    }

    pub fn is_paste(&self, url: &str) -> bool {
        matches!(self.lookup(url), Some(h) if h.kind == HostKind::Paste)
    }

    pub fn is_forbidden(&self, url: &str) -> bool {
        self.forbidden.iter().any(|f| url.contains(f.as_str()))
    }

    /// Applies the first matching link fixer, or returns `url` unchanged.
    pub fn fix_url(&self, url: &str) -> String {
        self.fixers
            .iter()
            .find(|f| f.applies_to(url))
            .map(|f| f.apply(url))
            .unwrap_or_else(|| url.to_string())
    }
}

/// True if `domain` occurs in `authority` on label boundaries: preceded by the
/// start or a `.`, followed by the end, a `.` or a `:`.
fn domain_matches(authority: &str, domain: &str) -> bool {
    let domain = domain.to_ascii_lowercase();
    authority.match_indices(domain.as_str()).any(|(start, m)| {
        let before = authority[..start].chars().next_back();
        let after = authority[start + m.len()..].chars().next();
        matches!(before, None | Some('.')) && matches!(after, None | Some('.' | ':'))
    })
}

/// `host` or `host:port` of a URL, lowercased by the parser.
fn authority_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
