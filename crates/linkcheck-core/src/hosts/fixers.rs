//! URL rewrites applied before fetching: raw views of paste sites, moved domains.

/// A rewrite triggered by a substring of the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFixer {
    trigger: String,
    rewrite: Rewrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rewrite {
    /// Replace every occurrence of the trigger.
    Replace(String),
    /// Append a path segment (e.g. `/raw`).
    AppendSegment(String),
}

impl LinkFixer {
    pub fn replace(trigger: impl Into<String>, with: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            rewrite: Rewrite::Replace(with.into()),
        }
    }

    pub fn append_segment(trigger: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            rewrite: Rewrite::AppendSegment(segment.into()),
        }
    }

    pub fn applies_to(&self, url: &str) -> bool {
        url.contains(self.trigger.as_str())
    }

    pub fn apply(&self, url: &str) -> String {
        let trigger = self.trigger.as_str();
        match &self.rewrite {
            Rewrite::Replace(with) if with.contains(trigger) && url.contains(with.as_str()) => {
                url.to_string()
            }
            Rewrite::Replace(with) => url.replace(trigger, with),
            Rewrite::AppendSegment(segment) => {
                let base = url.trim_end_matches('/');
                if base.ends_with(&format!("/{segment}")) {
                    base.to_string()
                } else {
                    format!("{base}/{segment}")
                }
            }
        }
    }
}
