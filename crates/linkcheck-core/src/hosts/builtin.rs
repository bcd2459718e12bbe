//! The built-in host table.

use super::{HostTable, LinkFixer, Liveness, SupportedHost};

const IMAGEPORTER_GONE: &[&str] = &["No file"];
const FOURSHARED_GONE: &[&str] = &[
    "You need owner's permission to access this folder.",
    "The file link that you requested is not valid.",
];
const BUNKRR_GONE: &[&str] = &["a twerking taco"];

const FORBIDDEN: &[&str] = &[
    ".exe",
    ".msi",
    ".mp4",
    "pixl.is",
    "redirect",
    "uploadbank.com",
    "filesfly.cc",
    "direct-link",
    "t.me",
];

/// Every hosting service and paste site the checker knows about.
pub fn builtin() -> HostTable {
    use Liveness::*;

    let hosts = vec![
        SupportedHost::probe("mega.nz", Mega),
        SupportedHost::probe("mega.co.nz", Mega),
        SupportedHost::probe("imgspice.com", NotFoundPageLen(4924)),
        SupportedHost::probe("imageporter.com", NotFoundMarkers(IMAGEPORTER_GONE)),
        SupportedHost::probe("4shared.com", NotFoundMarkers(FOURSHARED_GONE)),
        SupportedHost::probe("bunkrr", NotFoundMarkers(BUNKRR_GONE)),
        SupportedHost::probe("gofile.io", NotFoundPageLen(1158)),
        SupportedHost::probe("cyberfile.me", NotFoundPageLen(12094)),
        SupportedHost::probe("ibb.co", Status200),
        SupportedHost::probe("upfiles.com", Status200),
        SupportedHost::probe("files.catbox.moe", Status200),
        SupportedHost::probe("puu.sh", Status200),
        SupportedHost::probe("pixeldrain.com", Status200),
        SupportedHost::probe("mediafire.com", Status200),
        SupportedHost::probe("stream.bunkr.is", Status200),
        SupportedHost::probe("bunkr.is", Status200),
        SupportedHost::probe("drive.google.com", Status200),
        SupportedHost::probe("sendvid", Status200),
        SupportedHost::probe("cyberdrop.me", Status200),
        SupportedHost::paste("justpaste.it"),
        SupportedHost::paste("pastebin.com"),
        SupportedHost::paste("rentry.co"),
        SupportedHost::paste("paste.ee"),
        SupportedHost::paste("bitbin.it"),
        SupportedHost::paste("anonpaste.io"),
        SupportedHost::paste("telegra.ph"),
        SupportedHost::paste("paste.gg"),
        SupportedHost::paste("paster.so"),
    ];

    HostTable::new(hosts)
        .with_forbidden(FORBIDDEN.iter().copied())
        .with_fixers(vec![
            LinkFixer::replace("pastebin.com", "pastebin.com/raw"),
            LinkFixer::append_segment("rentry.co", "raw"),
            LinkFixer::replace("bunkrr.su", "bunkrr.si"),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::HostKind;

    #[test]
    fn builtin_classifies_known_hosts() {
        let t = builtin();
        let kind = |u: &str| t.lookup(u).map(|h| h.kind.clone());
        assert_eq!(
            kind("https://mega.nz/file/abc#key"),
            Some(HostKind::Probe(Liveness::Mega))
        );
        assert_eq!(
            kind("https://gofile.io/d/xyz"),
            Some(HostKind::Probe(Liveness::NotFoundPageLen(1158)))
        );
        assert_eq!(
            kind("https://www.mediafire.com/file/x/y"),
            Some(HostKind::Probe(Liveness::Status200))
        );
        assert_eq!(kind("https://pastebin.com/AbC"), Some(HostKind::Paste));
        assert!(kind("https://example.com/file").is_none());
    }

    #[test]
    fn builtin_stream_bunkr_is_plain_status() {
        let t = builtin();
        assert_eq!(
            t.lookup("https://stream.bunkr.is/v/clip").map(|h| h.domain.as_str()),
            Some("stream.bunkr.is")
        );
    }

    #[test]
    fn builtin_forbids_executables_and_telegram() {
        let t = builtin();
        assert!(t.is_forbidden("https://mediafire.com/file/setup.exe"));
        assert!(t.is_forbidden("https://t.me/channel"));
        assert!(!t.is_forbidden("https://mediafire.com/file/notes.zip"));
    }

    #[test]
    fn builtin_fixers() {
        let t = builtin();
        assert_eq!(t.fix_url("https://pastebin.com/AbC"), "https://pastebin.com/raw/AbC");
        assert_eq!(t.fix_url("https://rentry.co/list"), "https://rentry.co/list/raw");
        assert_eq!(t.fix_url("https://bunkrr.su/a/x"), "https://bunkrr.si/a/x");
    }
}
