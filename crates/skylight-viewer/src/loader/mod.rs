//! Document loading: URL parsing and the fetch capability.
//!
//! The viewer never talks to a transport directly. It resolves every
//! link against the current page URL and hands the resolved [`Url`] to
//! a [`DocumentFetcher`]; which fetcher backs the viewer is decided
//! once at startup. [`FileFetcher`] reads from the filesystem,
//! [`http::HttpFetcher`] speaks blocking HTTP/1.1.

pub mod http;

use std::fmt;
use std::fs;

use skylight_types::error::{Result, SkylightError};

// ------------------------------------------------------------------
// URL parsing and resolution (simplified RFC 3986)
// ------------------------------------------------------------------

/// A parsed URL.
///
/// Two schemes matter to the viewer: `file` (the path is a filesystem
/// path) and `http`. Anything else parses fine but is rejected by the
/// fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    /// Scheme component, lowercased (`"file"`, `"http"`).
    pub scheme: String,
    /// Host component; empty for `file` URLs.
    pub host: String,
    /// Optional explicit port number.
    pub port: Option<u16>,
    /// Path component. Starts with `/` except for a bare relative
    /// filesystem path.
    pub path: String,
    /// Optional query string (without the leading `?`).
    pub query: Option<String>,
    /// Optional fragment (without the leading `#`).
    pub fragment: Option<String>,
}

impl Url {
    /// Parse a URL string.
    ///
    /// Handles full URLs (`http://host/page.xhtml`,
    /// `file:///gallery/index.xhtml`) and fragment-only references
    /// (`#top`). A string without a scheme is taken as a filesystem
    /// path; callers that intend to resolve relative links against it
    /// should canonicalize the path first so it is absolute.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        if let Some(frag) = url.strip_prefix('#') {
            return Some(Url {
                scheme: String::new(),
                host: String::new(),
                port: None,
                path: String::new(),
                query: None,
                fragment: Some(frag.to_string()),
            });
        }

        if let Some(idx) = url.find("://") {
            let scheme = &url[..idx];
            let rest = &url[idx + 3..];
            return Self::parse_authority_and_path(scheme, rest);
        }

        // No scheme: a filesystem path, kept verbatim. Paths may
        // legally contain `?` and `#`, so no query/fragment split.
        Some(Url {
            scheme: "file".to_string(),
            host: String::new(),
            port: None,
            path: url.to_string(),
            query: None,
            fragment: None,
        })
    }

    /// Parse `host[:port]/path?query#fragment` after the scheme has
    /// been stripped.
    fn parse_authority_and_path(scheme: &str, rest: &str) -> Option<Url> {
        let (rest, fragment) = match rest.find('#') {
            Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
            None => (rest, None),
        };

        let (rest, query) = match rest.find('?') {
            Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
            None => (rest, None),
        };

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rfind(':') {
            Some(i) => match authority[i + 1..].parse::<u16>() {
                Ok(p) => (&authority[..i], Some(p)),
                Err(_) => (authority, None),
            },
            None => (authority, None),
        };

        Some(Url {
            scheme: scheme.to_lowercase(),
            host: host.to_string(),
            port,
            path: path.to_string(),
            query,
            fragment,
        })
    }

    /// Resolve a relative reference against this base URL.
    ///
    /// Handles absolute URLs (returned as-is), absolute paths
    /// (`/path`), relative paths (`page.xhtml`, `../album/index.xhtml`),
    /// query-only (`?q`) and fragment-only (`#frag`) references.
    pub fn resolve(&self, relative: &str) -> Option<Url> {
        let relative = relative.trim();
        if relative.is_empty() {
            return Some(self.clone());
        }

        if relative.contains("://") {
            return Url::parse(relative);
        }

        if let Some(frag) = relative.strip_prefix('#') {
            let mut resolved = self.clone();
            resolved.fragment = Some(frag.to_string());
            return Some(resolved);
        }

        if let Some(query) = relative.strip_prefix('?') {
            let mut resolved = self.clone();
            resolved.query = Some(query.to_string());
            resolved.fragment = None;
            return Some(resolved);
        }

        if let Some(rest) = relative.strip_prefix('/') {
            let (path, query, fragment) = split_path_query_fragment(rest);
            return Some(Url {
                scheme: self.scheme.clone(),
                host: self.host.clone(),
                port: self.port,
                path: format!("/{path}"),
                query,
                fragment,
            });
        }

        let (rel_path, query, fragment) = split_path_query_fragment(relative);
        Some(Url {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: self.port,
            path: resolve_path(self.directory(), &rel_path),
            query,
            fragment,
        })
    }

    /// The directory portion of the path, up to and including the
    /// last `/`.
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(i) => &self.path[..=i],
            None => "",
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "{}", self.path)?;
        if let Some(ref q) = self.query {
            write!(f, "?{q}")?;
        }
        if let Some(ref frag) = self.fragment {
            write!(f, "#{frag}")?;
        }
        Ok(())
    }
}

/// Split a path string into `(path, query, fragment)`.
fn split_path_query_fragment(s: &str) -> (String, Option<String>, Option<String>) {
    let (s, fragment) = match s.find('#') {
        Some(i) => (&s[..i], Some(s[i + 1..].to_string())),
        None => (s, None),
    };
    let (path, query) = match s.find('?') {
        Some(i) => (s[..i].to_string(), Some(s[i + 1..].to_string())),
        None => (s.to_string(), None),
    };
    (path, query, fragment)
}

/// Resolve a relative path against a base directory, collapsing `..`
/// and `.` segments. The result is absolute exactly when the base is.
fn resolve_path(base_dir: &str, relative: &str) -> String {
    let absolute = base_dir.starts_with('/');
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

    for seg in relative.split('/') {
        match seg {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }

    if absolute {
        format!("/{}", segments.join("/"))
    } else {
        segments.join("/")
    }
}

// ------------------------------------------------------------------
// Fetch capability
// ------------------------------------------------------------------

/// The viewer's one way of getting bytes for a URL.
///
/// Selected once at startup; the widget holds a `Box<dyn
/// DocumentFetcher>` and never branches on the transport again. A
/// fetcher that does not handle a URL's scheme returns
/// [`SkylightError::UnsupportedScheme`], which the widget turns into
/// its blocking error banner.
pub trait DocumentFetcher {
    /// Fetch the raw bytes of the document at `url`.
    fn fetch(&mut self, url: &Url) -> Result<Vec<u8>>;
}

/// Reads documents from the local filesystem (`file` URLs and bare
/// paths).
pub struct FileFetcher;

impl DocumentFetcher for FileFetcher {
    fn fetch(&mut self, url: &Url) -> Result<Vec<u8>> {
        if url.scheme != "file" {
            return Err(SkylightError::UnsupportedScheme(url.scheme.clone()));
        }
        fs::read(&url.path).map_err(|e| SkylightError::Fetch(format!("{}: {e}", url.path)))
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- URL parsing ------------------------------------------------

    #[test]
    fn parse_full_http_url() {
        let url = Url::parse("http://example.com/album/page.xhtml").unwrap();
        assert_eq!(url.scheme, "http");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.port, None);
        assert_eq!(url.path, "/album/page.xhtml");
        assert_eq!(url.query, None);
        assert_eq!(url.fragment, None);
    }

    #[test]
    fn parse_file_url() {
        let url = Url::parse("file:///gallery/index.xhtml").unwrap();
        assert_eq!(url.scheme, "file");
        assert_eq!(url.host, "");
        assert_eq!(url.path, "/gallery/index.xhtml");
    }

    #[test]
    fn parse_bare_path_as_file() {
        let url = Url::parse("/out/album/photo.xhtml").unwrap();
        assert_eq!(url.scheme, "file");
        assert_eq!(url.path, "/out/album/photo.xhtml");
        assert_eq!(url.to_string(), "file:///out/album/photo.xhtml");
    }

    #[test]
    fn parse_url_with_port() {
        let url = Url::parse("http://localhost:8080/index.xhtml").unwrap();
        assert_eq!(url.host, "localhost");
        assert_eq!(url.port, Some(8080));
        assert_eq!(url.path, "/index.xhtml");
    }

    #[test]
    fn parse_url_with_query_and_fragment() {
        let url = Url::parse("http://example.com/p.xhtml?size=big#photo").unwrap();
        assert_eq!(url.path, "/p.xhtml");
        assert_eq!(url.query, Some("size=big".to_string()));
        assert_eq!(url.fragment, Some("photo".to_string()));
    }

    #[test]
    fn parse_host_without_path_gets_root() {
        let url = Url::parse("http://example.com").unwrap();
        assert_eq!(url.path, "/");
    }

    #[test]
    fn parse_empty_is_none() {
        assert!(Url::parse("").is_none());
        assert!(Url::parse("   ").is_none());
    }

    #[test]
    fn scheme_is_lowercased() {
        let url = Url::parse("HTTP://example.com/").unwrap();
        assert_eq!(url.scheme, "http");
    }

    // -- Resolution -------------------------------------------------

    #[test]
    fn resolve_sibling_page() {
        let base = Url::parse("file:///gallery/album/photo1.xhtml").unwrap();
        let resolved = base.resolve("photo2.xhtml").unwrap();
        assert_eq!(resolved.scheme, "file");
        assert_eq!(resolved.path, "/gallery/album/photo2.xhtml");
    }

    #[test]
    fn resolve_dotdot_to_parent_album() {
        let base = Url::parse("file:///gallery/album/photo1.xhtml").unwrap();
        let resolved = base.resolve("../index.xhtml").unwrap();
        assert_eq!(resolved.path, "/gallery/index.xhtml");
    }

    #[test]
    fn resolve_absolute_path_keeps_host() {
        let base = Url::parse("http://example.com/a/b.xhtml").unwrap();
        let resolved = base.resolve("/c/d.xhtml").unwrap();
        assert_eq!(resolved.host, "example.com");
        assert_eq!(resolved.path, "/c/d.xhtml");
    }

    #[test]
    fn resolve_absolute_url_replaces_base() {
        let base = Url::parse("file:///gallery/index.xhtml").unwrap();
        let resolved = base.resolve("http://example.com/x.xhtml").unwrap();
        assert_eq!(resolved.scheme, "http");
        assert_eq!(resolved.host, "example.com");
    }

    #[test]
    fn resolve_fragment_only_keeps_page() {
        let base = Url::parse("http://example.com/page.xhtml").unwrap();
        let resolved = base.resolve("#exif").unwrap();
        assert_eq!(resolved.path, "/page.xhtml");
        assert_eq!(resolved.fragment, Some("exif".to_string()));
    }

    #[test]
    fn resolve_empty_returns_base() {
        let base = Url::parse("http://example.com/page.xhtml").unwrap();
        assert_eq!(base.resolve("").unwrap(), base);
    }

    #[test]
    fn resolve_relative_base_stays_relative() {
        let base = Url::parse("album/photo1.xhtml").unwrap();
        let resolved = base.resolve("photo2.xhtml").unwrap();
        assert_eq!(resolved.path, "album/photo2.xhtml");
    }

    #[test]
    fn resolve_dotdot_past_root_clamps() {
        let base = Url::parse("http://example.com/a.xhtml").unwrap();
        let resolved = base.resolve("../../b.xhtml").unwrap();
        assert_eq!(resolved.path, "/b.xhtml");
    }

    #[test]
    fn display_round_trip() {
        let s = "http://example.com:8080/a/b.xhtml?q=1#frag";
        let url = Url::parse(s).unwrap();
        assert_eq!(url.to_string(), s);
    }

    #[test]
    fn directory_of_page() {
        let url = Url::parse("file:///gallery/album/photo.xhtml").unwrap();
        assert_eq!(url.directory(), "/gallery/album/");
    }

    // -- FileFetcher ------------------------------------------------

    #[test]
    fn file_fetcher_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.xhtml");
        std::fs::write(&path, b"<html/>").unwrap();

        let url = Url::parse(&format!("file://{}", path.display())).unwrap();
        let body = FileFetcher.fetch(&url).unwrap();
        assert_eq!(body, b"<html/>");
    }

    #[test]
    fn file_fetcher_missing_file_is_fetch_error() {
        let url = Url::parse("file:///no/such/page.xhtml").unwrap();
        let err = FileFetcher.fetch(&url).unwrap_err();
        assert!(matches!(err, SkylightError::Fetch(_)));
    }

    #[test]
    fn file_fetcher_rejects_http() {
        let url = Url::parse("http://example.com/page.xhtml").unwrap();
        let err = FileFetcher.fetch(&url).unwrap_err();
        match err {
            SkylightError::UnsupportedScheme(s) => assert_eq!(s, "http"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_host() -> impl Strategy<Value = String> {
            "[a-z]{3,10}".prop_map(|s| format!("{s}.com"))
        }

        fn arb_path() -> impl Strategy<Value = String> {
            proptest::collection::vec("[a-z0-9]{1,8}", 1..4)
                .prop_map(|segs| format!("/{}", segs.join("/")))
        }

        proptest! {
            #[test]
            fn parse_display_round_trips(host in arb_host(), path in arb_path()) {
                let s = format!("http://{host}{path}");
                let url = Url::parse(&s).unwrap();
                prop_assert_eq!(url.to_string(), s);
            }

            #[test]
            fn resolved_relative_path_shares_directory(
                host in arb_host(),
                dir in "[a-z]{1,8}",
                name in "[a-z]{1,8}",
            ) {
                let base = Url::parse(&format!("http://{host}/{dir}/index.xhtml")).unwrap();
                let resolved = base.resolve(&format!("{name}.xhtml")).unwrap();
                prop_assert_eq!(resolved.path, format!("/{dir}/{name}.xhtml"));
            }

            #[test]
            fn resolve_never_escapes_scheme(
                host in arb_host(),
                rel in "[a-z]{1,8}\\.xhtml",
            ) {
                let base = Url::parse(&format!("http://{host}/a/b.xhtml")).unwrap();
                let resolved = base.resolve(&rel).unwrap();
                prop_assert_eq!(resolved.scheme, "http");
                prop_assert_eq!(resolved.host, base.host);
            }
        }
    }
}
