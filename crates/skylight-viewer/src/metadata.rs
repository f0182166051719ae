//! EXIF metadata injection.
//!
//! A photo page names a companion document through its `a.exif` link.
//! On page load the viewer fetches that document once, pulls the first
//! `table` element out of it, and appends the table to the photo
//! container, hidden until toggled. One attempt, no retry, no
//! cancellation: every failure simply leaves the page without a table
//! and is logged at debug level.

use log::debug;

use skylight_markup::dom::Document;
use skylight_markup::parser;

use crate::loader::{DocumentFetcher, Url};
use crate::page::PageRefs;

/// Fetch the EXIF companion document and inject its first table into
/// the photo container. Returns whether a table was injected.
pub fn load_exif_table(
    doc: &mut Document,
    refs: &PageRefs,
    page_url: &Url,
    fetcher: &mut dyn DocumentFetcher,
) -> bool {
    let Some(container) = refs.photo else {
        debug!("no photo container; skipping exif metadata");
        return false;
    };
    let Some(link) = refs.exif_link else {
        debug!("no exif link; skipping exif metadata");
        return false;
    };
    let Some(href) = doc.element(link).and_then(|a| a.href()).map(String::from) else {
        debug!("exif link has no href; skipping exif metadata");
        return false;
    };
    let Some(url) = page_url.resolve(&href) else {
        debug!("exif href {href:?} does not resolve; skipping exif metadata");
        return false;
    };

    let body = match fetcher.fetch(&url) {
        Ok(body) => body,
        Err(e) => {
            debug!("exif fetch failed for {url}: {e}");
            return false;
        },
    };

    let exif_doc = parser::parse(&String::from_utf8_lossy(&body));
    let Some(table) = exif_doc.find_first("table") else {
        debug!("no table in exif document {url}");
        return false;
    };

    let adopted = doc.adopt(&exif_doc, table);
    doc.append_child(container, adopted);
    debug!("injected exif table from {url}");
    true
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
