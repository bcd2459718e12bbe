//! Page-based liveness rules for hosts that answer 200 even for missing files.

use crate::fetch::Page;
use crate::hosts::Liveness;

/// True if `page` shows live content under `rule`. Only meaningful for 200 pages.
pub(crate) fn page_is_live(rule: &Liveness, page: &Page) -> bool {
    match rule {
        Liveness::Status200 | Liveness::Mega => page.is_ok(),
        Liveness::NotFoundPageLen(len) => page.is_ok() && page.body.chars().count() != *len,
        Liveness::NotFoundMarkers(markers) => {
            page.is_ok() && !markers.iter().any(|m| page.body.contains(m))
        }
    }
}
