//! Shared test fixtures for the viewer.
//!
//! Provides [`StaticFetcher`], an in-memory [`DocumentFetcher`], and
//! builders for page markup in the shape the generator emits.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use skylight_types::error::{Result, SkylightError};

use crate::loader::{DocumentFetcher, Url};

/// A fetcher serving documents from an in-memory url -> bytes map.
///
/// Mirrors [`crate::loader::FileFetcher`]'s scheme policy so widget
/// tests can exercise the unsupported-scheme path.
pub(crate) struct StaticFetcher {
    pages: HashMap<String, Vec<u8>>,
    fetch_count: Rc<Cell<usize>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::new(),
            fetch_count: Rc::new(Cell::new(0)),
        }
    }

    pub(crate) fn insert(&mut self, url: &str, body: &str) {
        self.pages.insert(url.to_string(), body.as_bytes().to_vec());
    }

    /// Handle onto the fetch counter, usable after the fetcher moves
    /// into a widget.
    pub(crate) fn counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.fetch_count)
    }
}

impl DocumentFetcher for StaticFetcher {
    fn fetch(&mut self, url: &Url) -> Result<Vec<u8>> {
        if url.scheme != "file" {
            return Err(SkylightError::UnsupportedScheme(url.scheme.clone()));
        }
        self.fetch_count.set(self.fetch_count.get() + 1);
        self.pages
            .get(&url.to_string())
            .cloned()
            .ok_or_else(|| SkylightError::Fetch(format!("not found: {url}")))
    }
}

/// Build a photo page with the generator's conventional structure.
///
/// `None` for a direction renders the disabled span the generator
/// emits for it; `None` for `exif` omits the EXIF link entirely.
pub(crate) fn photo_page(
    title: &str,
    parent: Option<&str>,
    prev: Option<&str>,
    next: Option<&str>,
    exif: Option<&str>,
) -> String {
    let mut nav = String::new();
    match prev {
        Some(href) => nav.push_str(&format!(
            "<a title=\"previous\" href=\"{href}\"><span class=\"prev\"/></a>"
        )),
        None => nav.push_str("<span class=\"prev disabled\"/>"),
    }
    if let Some(href) = parent {
        nav.push_str(&format!(
            "<a title=\"up\" href=\"{href}\"><span class=\"parent\"/></a>"
        ));
    }
    match next {
        Some(href) => nav.push_str(&format!(
            "<a title=\"next\" href=\"{href}\"><span class=\"next\"/></a>"
        )),
        None => nav.push_str("<span class=\"next disabled\"/>"),
    }
    if let Some(href) = exif {
        nav.push_str(&format!(
            "<span class=\"exif\"><a class=\"exif\" title=\"exif data\" href=\"{href}\">exif</a></span>"
        ));
    }

    format!(
        "<html><head><title>{title}</title></head>\
         <body class=\"photo\">\
         <div id=\"body\" class=\"body\">\
         <div class=\"photo\"><img src=\"{title}.jpg\" alt=\"{title}\"/></div>\
         <div class=\"navigation\">{nav}</div>\
         </div>\
         </body></html>"
    )
}

/// Build an EXIF companion document holding one table of `(field,
/// value)` rows, shaped like the generator's EXIF pages.
pub(crate) fn exif_page(rows: &[(&str, &str)]) -> String {
    let mut body = String::from("<html><body><table class=\"exif\">");
    for (field, value) in rows {
        body.push_str(&format!("<tr><th>{field}</th><td>{value}</td></tr>"));
    }
    body.push_str("</table></body></html>");
    body
}
