//! XHTML page construction.
//!
//! Pages are built as [`skylight_markup`] documents and serialized by the
//! pipeline. The layout is the classic static-gallery shape: a wrapper
//! `div#body`, an `h1.title`, a `div.navigation` block with prev / parent /
//! next arrows, album link lists, thumbnail tables, and a footer.

use std::sync::OnceLock;

use regex::Regex;

use skylight_markup::dom::{Document, NodeId};
use skylight_model::gallery::{Album, AlbumId, Gallery, Photo, reldir};

use crate::config::PageConfig;

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
const DOCTYPE: &str = "html PUBLIC '-//W3C//DTD XHTML 1.0 Strict//EN' \
     'http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd'";
const GENERATOR_URL: &str = "https://github.com/skylight-gallery/skylight";

/// Stylesheet every page links first; written by the pipeline when the
/// configured assets do not provide one.
pub const DEFAULT_STYLESHEET: &str = "css/skylight.css";

/// Thumbnail table row width.
const PHOTOS_PER_ROW: usize = 5;

/// Navigation targets for one page; `(href, link title)` pairs.
struct NavData {
    prev: Option<(String, String)>,
    next: Option<(String, String)>,
    parent_href: String,
    parent_title: String,
    exif_href: Option<String>,
}

/// Builds gallery, album, photo, and EXIF pages.
pub struct PageBuilder {
    css: Vec<String>,
    js: Vec<String>,
    copyright: String,
}

impl PageBuilder {
    pub fn new(page: &PageConfig) -> Self {
        let mut css = vec![DEFAULT_STYLESHEET.to_string()];
        css.extend(page.css.iter().cloned());
        Self {
            css,
            js: page.js.clone(),
            copyright: page.copyright.clone(),
        }
    }

    /// The gallery index page: title, description, root album links.
    pub fn gallery_page(&self, gallery: &Gallery) -> Document {
        let (mut doc, content) = self.scaffold(&gallery.title, "gallery", ".");
        append_heading(&mut doc, content, &gallery.title);
        self.append_description(&mut doc, content, &gallery.description);

        if !gallery.roots.is_empty() {
            let albums = doc.create_element_with("div", &[("class", "albums")]);
            for &root in &gallery.roots {
                let album = gallery.album(root);
                append_album_link(&mut doc, albums, album, &album.dir);
            }
            doc.append_child(content, albums);
        }

        self.finish(&mut doc, content);
        doc
    }

    /// An album page: heading, navigation, subalbum links, thumbnail
    /// table. `parent` is `None` for root albums (the gallery is the
    /// parent).
    pub fn album_page(&self, gallery: &Gallery, id: AlbumId, parent: Option<AlbumId>) -> Document {
        let album = gallery.album(id);
        let title = format!("{} - {}", gallery.title, album.title);
        let rootdir = gallery.rootdir(id);
        let (mut doc, content) = self.scaffold(&title, "album", &rootdir);

        append_heading(&mut doc, content, &album.title);
        self.append_description(&mut doc, content, &album.description);
        append_navigation(&mut doc, content, &album_nav(gallery, id, parent));

        if !album.subalbums.is_empty() {
            let albums = doc.create_element_with("div", &[("class", "albums")]);
            for &sub in &album.subalbums {
                let subalbum = gallery.album(sub);
                append_album_link(&mut doc, albums, subalbum, reldir(&subalbum.dir));
            }
            doc.append_child(content, albums);
        }

        if !album.photos.is_empty() {
            let table = doc.create_element_with("table", &[("class", "photos")]);
            for row in album.photos.chunks(PHOTOS_PER_ROW) {
                let tr = doc.create_element("tr");
                for photo in row {
                    append_photo_cell(&mut doc, tr, photo);
                }
                doc.append_child(table, tr);
            }
            doc.append_child(content, table);
        }

        self.finish(&mut doc, content);
        doc
    }

    /// A photo page: heading, navigation (with an EXIF link when EXIF
    /// data exists), and the image itself.
    pub fn photo_page(&self, gallery: &Gallery, id: AlbumId, index: usize) -> Document {
        let album = gallery.album(id);
        let photo = &album.photos[index];
        let title = format!("{} - {} - {}", gallery.title, album.title, photo.title);
        let rootdir = gallery.rootdir(id);
        let (mut doc, content) = self.scaffold(&title, "photo", &rootdir);

        let heading = format!("{}: {}", album.title, photo.title);
        append_heading(&mut doc, content, &heading);
        self.append_description(&mut doc, content, &photo.description);
        append_navigation(&mut doc, content, &photo_nav(album, index));

        let container = doc.create_element_with("div", &[("class", "photo")]);
        let alt = format!("photo: {}", photo.title);
        let src = format!("{}.jpg", photo.name);
        let img = doc.create_element_with("img", &[("alt", &alt), ("src", &src)]);
        doc.append_child(container, img);
        doc.append_child(content, container);

        self.finish(&mut doc, content);
        doc
    }

    /// An EXIF page: the field table alone inside the page scaffold.
    pub fn exif_page(&self, gallery: &Gallery, id: AlbumId, index: usize) -> Document {
        let album = gallery.album(id);
        let photo = &album.photos[index];
        let title = format!("{} - {} - {}", gallery.title, album.title, photo.title);
        let rootdir = gallery.rootdir(id);
        let (mut doc, content) = self.scaffold(&title, "exif", &rootdir);

        let table = doc.create_element_with("table", &[("class", "exif")]);
        for (field, value) in &photo.exif {
            let tr = doc.create_element("tr");
            let th = doc.create_element("th");
            let field_text = doc.create_text(field);
            doc.append_child(th, field_text);
            let td = doc.create_element("td");
            let value_text = doc.create_text(value);
            doc.append_child(td, value_text);
            doc.append_child(tr, th);
            doc.append_child(tr, td);
            doc.append_child(table, tr);
        }
        doc.append_child(content, table);

        self.finish(&mut doc, content);
        doc
    }

    // ------------------------------------------------------------------
    // Scaffold
    // ------------------------------------------------------------------

    /// Doctype, html/head/body, stylesheet and script includes resolved
    /// against `rootdir`, and the `div#body` wrapper all content goes in.
    fn scaffold(&self, title: &str, body_class: &str, rootdir: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        doc.doctype = Some(DOCTYPE.to_string());
        let html = doc.create_element_with("html", &[("xmlns", XHTML_NS)]);
        let root = doc.root;
        doc.append_child(root, html);

        let head = doc.create_element("head");
        doc.append_child(html, head);
        let title_el = doc.create_element("title");
        let title_text = doc.create_text(title);
        doc.append_child(title_el, title_text);
        doc.append_child(head, title_el);
        for css in &self.css {
            let href = format!("{rootdir}/{css}");
            let link = doc.create_element_with(
                "link",
                &[("rel", "stylesheet"), ("href", &href), ("type", "text/css")],
            );
            doc.append_child(head, link);
        }
        for js in &self.js {
            let src = format!("{rootdir}/{js}");
            let script =
                doc.create_element_with("script", &[("src", &src), ("type", "text/javascript")]);
            doc.append_child(head, script);
        }

        let body = doc.create_element_with("body", &[("class", body_class)]);
        doc.append_child(html, body);
        let content = doc.create_element_with("div", &[("id", "body"), ("class", "body")]);
        doc.append_child(body, content);
        (doc, content)
    }

    /// Close the page with the footer.
    fn finish(&self, doc: &mut Document, content: NodeId) {
        let footer = doc.create_element_with("div", &[("class", "footer")]);
        let generator = doc.create_element_with("span", &[("class", "generator")]);
        let open = doc.create_text("[ ");
        doc.append_child(generator, open);
        let link = doc.create_element_with("a", &[("href", GENERATOR_URL)]);
        let label = doc.create_text("generated by skylight");
        doc.append_child(link, label);
        doc.append_child(generator, link);
        let close = doc.create_text(" ]");
        doc.append_child(generator, close);
        doc.append_child(footer, generator);

        if !self.copyright.is_empty() {
            let gap = doc.create_text(" ");
            doc.append_child(footer, gap);
            let copyright = doc.create_element_with("span", &[("class", "copyright")]);
            append_rich_text(doc, copyright, &self.copyright);
            doc.append_child(footer, copyright);
        }
        doc.append_child(content, footer);
    }

    fn append_description(&self, doc: &mut Document, parent: NodeId, description: &str) {
        if description.is_empty() {
            return;
        }
        let p = doc.create_element_with("p", &[("class", "description")]);
        append_rich_text(doc, p, description);
        doc.append_child(parent, p);
    }
}

// ------------------------------------------------------------------
// Fragments
// ------------------------------------------------------------------

fn append_heading(doc: &mut Document, parent: NodeId, title: &str) {
    let h1 = doc.create_element_with("h1", &[("class", "title")]);
    let text = doc.create_text(title);
    doc.append_child(h1, text);
    doc.append_child(parent, h1);
}

fn append_album_link(doc: &mut Document, parent: NodeId, album: &Album, link_dir: &str) {
    let entry = doc.create_element_with("div", &[("class", "album")]);
    let link_title = format!("album: {}", album.title);
    let href = format!("{link_dir}/index.xhtml");
    let a = doc.create_element_with("a", &[("title", &link_title), ("href", &href)]);
    let text = doc.create_text(&album.title);
    doc.append_child(a, text);
    doc.append_child(entry, a);
    doc.append_child(parent, entry);
}

fn append_photo_cell(doc: &mut Document, row: NodeId, photo: &Photo) {
    let td = doc.create_element_with("td", &[("class", "photo")]);
    let href = format!("{}.xhtml", photo.name);
    let a = doc.create_element_with("a", &[("title", &photo.title), ("href", &href)]);
    let alt = format!("photo: {}", photo.title);
    let src = format!("{}.thumb.jpg", photo.name);
    let img = doc.create_element_with("img", &[("alt", &alt), ("src", &src)]);
    doc.append_child(a, img);
    doc.append_child(td, a);
    let caption = doc.create_element("div");
    let text = doc.create_text(&photo.title);
    doc.append_child(caption, text);
    doc.append_child(td, caption);
    doc.append_child(row, td);
}

fn append_navigation(doc: &mut Document, content: NodeId, nav: &NavData) {
    let block = doc.create_element_with("div", &[("class", "navigation")]);
    match &nav.prev {
        Some((href, title)) => append_nav_link(doc, block, "prev", href, title),
        None => append_nav_disabled(doc, block, "prev"),
    }
    append_nav_link(doc, block, "parent", &nav.parent_href, &nav.parent_title);
    match &nav.next {
        Some((href, title)) => append_nav_link(doc, block, "next", href, title),
        None => append_nav_disabled(doc, block, "next"),
    }
    if let Some(href) = &nav.exif_href {
        let wrap = doc.create_element_with("span", &[("class", "exif")]);
        let a = doc.create_element_with(
            "a",
            &[("class", "exif"), ("title", "exif data"), ("href", href)],
        );
        let label = doc.create_text("exif");
        doc.append_child(a, label);
        doc.append_child(wrap, a);
        doc.append_child(block, wrap);
    }
    doc.append_child(content, block);
}

fn append_nav_link(doc: &mut Document, block: NodeId, class: &str, href: &str, title: &str) {
    let a = doc.create_element_with("a", &[("title", title), ("href", href)]);
    let arrow = doc.create_element_with("span", &[("class", class)]);
    doc.append_child(a, arrow);
    doc.append_child(block, a);
}

fn append_nav_disabled(doc: &mut Document, block: NodeId, class: &str) {
    let disabled = format!("{class} disabled");
    let arrow = doc.create_element_with("span", &[("class", &disabled)]);
    doc.append_child(block, arrow);
}

// ------------------------------------------------------------------
// Navigation targets
// ------------------------------------------------------------------

fn album_nav(gallery: &Gallery, id: AlbumId, parent: Option<AlbumId>) -> NavData {
    let siblings: &[AlbumId] = match parent {
        Some(p) => &gallery.album(p).subalbums,
        None => &gallery.roots,
    };
    let rootdir = gallery.rootdir(id);

    let mut prev = None;
    let mut next = None;
    if let Some(i) = siblings.iter().position(|&s| s == id) {
        if i > 0 {
            let sibling = gallery.album(siblings[i - 1]);
            prev = Some((
                format!("{rootdir}/{}/index.xhtml", sibling.dir),
                format!("previous album: {}", sibling.title),
            ));
        }
        if i + 1 < siblings.len() {
            let sibling = gallery.album(siblings[i + 1]);
            next = Some((
                format!("{rootdir}/{}/index.xhtml", sibling.dir),
                format!("next album: {}", sibling.title),
            ));
        }
    }
    let parent_title = match parent {
        Some(p) => format!("album: {}", gallery.album(p).title),
        None => format!("gallery: {}", gallery.title),
    };
    NavData {
        prev,
        next,
        parent_href: "../index.xhtml".to_string(),
        parent_title,
        exif_href: None,
    }
}

fn photo_nav(album: &Album, index: usize) -> NavData {
    let photo = &album.photos[index];
    let prev = album
        .prev_photo(index)
        .map(|p| (format!("{}.xhtml", p.name), format!("previous photo: {}", p.title)));
    let next = album
        .next_photo(index)
        .map(|p| (format!("{}.xhtml", p.name), format!("next photo: {}", p.title)));
    let exif_href = if photo.exif.is_empty() {
        None
    } else {
        Some(format!("{}.exif.xhtml", photo.name))
    };
    NavData {
        prev,
        next,
        parent_href: "index.xhtml".to_string(),
        parent_title: format!("album: {}", album.title),
        exif_href,
    }
}

// ------------------------------------------------------------------
// Rich text
// ------------------------------------------------------------------

/// Append description text: a literal `\n` sequence becomes `<br/>` and
/// bare http(s) URLs become links. Entity escaping happens on serialize.
fn append_rich_text(doc: &mut Document, parent: NodeId, text: &str) {
    for (i, segment) in text.split("\\n").enumerate() {
        if i > 0 {
            let br = doc.create_element("br");
            doc.append_child(parent, br);
        }
        append_linked_text(doc, parent, segment);
    }
}

fn append_linked_text(doc: &mut Document, parent: NodeId, text: &str) {
    let mut last = 0;
    for m in autolink().find_iter(text) {
        if m.start() > last {
            let leading = doc.create_text(&text[last..m.start()]);
            doc.append_child(parent, leading);
        }
        let a = doc.create_element_with("a", &[("href", m.as_str())]);
        let label = doc.create_text(m.as_str());
        doc.append_child(a, label);
        doc.append_child(parent, a);
        last = m.end();
    }
    if last < text.len() {
        let trailing = doc.create_text(&text[last..]);
        doc.append_child(parent, trailing);
    }
}

/// A url starts with http(s) and ends with a word character or slash;
/// `<` and `>` never belong to one.
fn autolink() -> &'static Regex {
    static AUTOLINK: OnceLock<Regex> = OnceLock::new();
    AUTOLINK.get_or_init(|| Regex::new(r"\bhttps?://\w[^<>\s]+[\w/]").unwrap())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use skylight_markup::parser::check_well_formed;
    use skylight_markup::writer::{serialize, serialize_pretty};

    fn photo(name: &str, title: &str) -> Photo {
        Photo {
            name: name.to_string(),
            title: title.to_string(),
            description: String::new(),
            exif: Vec::new(),
        }
    }

    /// Gallery with two root albums; the first has a subalbum and three
    /// photos, the middle one carrying EXIF data.
    fn fixture() -> Gallery {
        let mut gallery = Gallery::new("Gallery", "All my photos");
        let alps = gallery.add_album("alps");
        let dawn = gallery.add_album("alps/dawn");
        let peaks = gallery.add_album("peaks");
        gallery.roots.push(alps);
        gallery.roots.push(peaks);

        {
            let album = gallery.album_mut(alps);
            album.title = "Alps".to_string();
            album.description = "Hiking in the Alps".to_string();
            album.subalbums.push(dawn);
            album.photos.push(photo("dsc_0001", "Start"));
            let mut middle = photo("dsc_0002", "Summit");
            middle.exif.push(("Aperture".to_string(), "F8".to_string()));
            album.photos.push(middle);
            album.photos.push(photo("dsc_0003", "Descent"));
        }
        gallery.album_mut(dawn).title = "Dawn".to_string();
        gallery.album_mut(peaks).title = "Peaks".to_string();
        gallery
    }

    fn builder() -> PageBuilder {
        PageBuilder::new(&PageConfig::default())
    }

    #[test]
    fn gallery_page_links_root_albums() {
        let gallery = fixture();
        let doc = builder().gallery_page(&gallery);

        assert_eq!(doc.title().as_deref(), Some("Gallery"));
        let albums = doc.find_by_class("div", "albums").unwrap();
        assert_eq!(doc.get(albums).children.len(), 2);

        let first_link = doc.find_by_class("div", "album").unwrap();
        let a = doc.get(first_link).children[0];
        let element = doc.element(a).unwrap();
        assert_eq!(element.href(), Some("alps/index.xhtml"));
        assert_eq!(element.get_attribute("title"), Some("album: Alps"));
    }

    #[test]
    fn gallery_page_carries_doctype_and_body_class() {
        let doc = builder().gallery_page(&fixture());
        assert!(doc.doctype.as_deref().unwrap_or("").contains("XHTML 1.0 Strict"));
        let body = doc.body().unwrap();
        assert!(doc.element(body).unwrap().has_class("gallery"));
    }

    #[test]
    fn album_page_title_and_heading() {
        let gallery = fixture();
        let doc = builder().album_page(&gallery, 0, None);
        assert_eq!(doc.title().as_deref(), Some("Gallery - Alps"));
        let h1 = doc.find_first("h1").unwrap();
        assert_eq!(doc.text_content(h1), "Alps");
    }

    #[test]
    fn first_root_album_has_disabled_prev_and_linked_next() {
        let gallery = fixture();
        let doc = builder().album_page(&gallery, 0, None);

        assert!(doc.find_by_class("span", "disabled").is_some());
        let nav = doc.find_by_class("div", "navigation").unwrap();
        let anchors: Vec<_> = doc
            .get(nav)
            .children
            .iter()
            .filter_map(|&child| doc.element(child))
            .filter(|e| e.tag == "a")
            .collect();
        // parent and next; prev is the disabled span
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].get_attribute("title"), Some("gallery: Gallery"));
        assert_eq!(anchors[0].href(), Some("../index.xhtml"));
        assert_eq!(anchors[1].get_attribute("title"), Some("next album: Peaks"));
        assert_eq!(anchors[1].href(), Some("../peaks/index.xhtml"));
    }

    #[test]
    fn subalbum_links_use_the_relative_dir() {
        let gallery = fixture();
        let doc = builder().album_page(&gallery, 0, None);
        let albums = doc.find_by_class("div", "albums").unwrap();
        let entry = doc.get(albums).children[0];
        let a = doc.get(entry).children[0];
        assert_eq!(doc.element(a).unwrap().href(), Some("dawn/index.xhtml"));
    }

    #[test]
    fn subalbum_parent_is_the_album_not_the_gallery() {
        let gallery = fixture();
        let doc = builder().album_page(&gallery, 1, Some(0));
        let nav = doc.find_by_class("div", "navigation").unwrap();
        let parent = doc
            .get(nav)
            .children
            .iter()
            .filter_map(|&child| doc.element(child))
            .find(|e| e.tag == "a")
            .unwrap();
        assert_eq!(parent.get_attribute("title"), Some("album: Alps"));
    }

    #[test]
    fn thumbnails_fill_rows_of_five() {
        let mut gallery = fixture();
        for i in 4..=7 {
            let name = format!("dsc_000{i}");
            gallery.album_mut(0).photos.push(photo(&name, "More"));
        }
        // 7 photos now
        let doc = builder().album_page(&gallery, 0, None);
        assert_eq!(doc.find_all("tr").len(), 2);
        assert_eq!(doc.find_all("td").len(), 7);

        let td = doc.find_by_class("td", "photo").unwrap();
        let a = doc.get(td).children[0];
        assert_eq!(doc.element(a).unwrap().href(), Some("dsc_0001.xhtml"));
        let img = doc.get(a).children[0];
        assert_eq!(doc.element(img).unwrap().src(), Some("dsc_0001.thumb.jpg"));
    }

    #[test]
    fn photo_page_navigation_walks_the_album() {
        let gallery = fixture();
        let doc = builder().photo_page(&gallery, 0, 1);

        assert_eq!(doc.title().as_deref(), Some("Gallery - Alps - Summit"));
        let h1 = doc.find_first("h1").unwrap();
        assert_eq!(doc.text_content(h1), "Alps: Summit");

        let nav = doc.find_by_class("div", "navigation").unwrap();
        let anchors: Vec<_> = doc
            .get(nav)
            .children
            .iter()
            .filter_map(|&child| doc.element(child))
            .filter(|e| e.tag == "a")
            .collect();
        assert_eq!(anchors[0].href(), Some("dsc_0001.xhtml"));
        assert_eq!(
            anchors[0].get_attribute("title"),
            Some("previous photo: Start")
        );
        assert_eq!(anchors[1].href(), Some("index.xhtml"));
        assert_eq!(anchors[2].href(), Some("dsc_0003.xhtml"));
    }

    #[test]
    fn photo_with_exif_gets_the_exif_link() {
        let gallery = fixture();
        let doc = builder().photo_page(&gallery, 0, 1);
        let a = doc.find_by_class("a", "exif").unwrap();
        let element = doc.element(a).unwrap();
        assert_eq!(element.href(), Some("dsc_0002.exif.xhtml"));
        assert_eq!(element.get_attribute("title"), Some("exif data"));
        assert_eq!(doc.text_content(a), "exif");
    }

    #[test]
    fn photo_without_exif_has_no_exif_link() {
        let gallery = fixture();
        let doc = builder().photo_page(&gallery, 0, 0);
        assert!(doc.find_by_class("a", "exif").is_none());
    }

    #[test]
    fn photo_page_shows_the_full_image() {
        let gallery = fixture();
        let doc = builder().photo_page(&gallery, 0, 1);
        let container = doc.find_by_class("div", "photo").unwrap();
        let img = doc.get(container).children[0];
        assert_eq!(doc.element(img).unwrap().src(), Some("dsc_0002.jpg"));
    }

    #[test]
    fn exif_page_lists_fields_in_order() {
        let mut gallery = fixture();
        gallery.album_mut(0).photos[1]
            .exif
            .push(("Flash".to_string(), "No flash".to_string()));
        let doc = builder().exif_page(&gallery, 0, 1);

        let table = doc.find_by_class("table", "exif").unwrap();
        let rows = doc.get(table).children.clone();
        assert_eq!(rows.len(), 2);
        let th = doc.get(rows[0]).children[0];
        assert_eq!(doc.text_content(th), "Aperture");
        let td = doc.get(rows[0]).children[1];
        assert_eq!(doc.text_content(td), "F8");
    }

    #[test]
    fn stylesheet_href_follows_page_depth() {
        let gallery = fixture();
        let doc = builder().album_page(&gallery, 1, Some(0));
        let link = doc.find_first("link").unwrap();
        assert_eq!(
            doc.element(link).unwrap().get_attribute("href"),
            Some("../../css/skylight.css")
        );
    }

    #[test]
    fn extra_css_and_js_are_included() {
        let page = PageConfig {
            copyright: String::new(),
            css: vec!["css/extra.css".to_string()],
            js: vec!["js/site.js".to_string()],
        };
        let doc = PageBuilder::new(&page).gallery_page(&fixture());
        assert_eq!(doc.find_all("link").len(), 2);
        let script = doc.find_first("script").unwrap();
        assert_eq!(
            doc.element(script).unwrap().src(),
            Some("./js/site.js")
        );
    }

    #[test]
    fn description_linebreaks_become_br() {
        let mut gallery = fixture();
        gallery.album_mut(0).description = "first line\\nsecond line".to_string();
        let doc = builder().album_page(&gallery, 0, None);
        let p = doc.find_by_class("p", "description").unwrap();
        assert!(doc.find_first("br").is_some());
        assert_eq!(doc.text_content(p), "first linesecond line");
    }

    #[test]
    fn urls_in_descriptions_become_anchors() {
        let mut gallery = fixture();
        gallery.album_mut(0).description =
            "route at http://example.com/map with photos".to_string();
        let doc = builder().album_page(&gallery, 0, None);
        let p = doc.find_by_class("p", "description").unwrap();
        let a = doc
            .get(p)
            .children
            .iter()
            .copied()
            .find(|&c| doc.element(c).is_some_and(|e| e.tag == "a"))
            .unwrap();
        assert_eq!(doc.element(a).unwrap().href(), Some("http://example.com/map"));
        assert_eq!(doc.text_content(p), "route at http://example.com/map with photos");
    }

    #[test]
    fn copyright_lands_in_the_footer() {
        let page = PageConfig {
            copyright: "(cc) holiday snaps".to_string(),
            css: Vec::new(),
            js: Vec::new(),
        };
        let doc = PageBuilder::new(&page).gallery_page(&fixture());
        let span = doc.find_by_class("span", "copyright").unwrap();
        assert_eq!(doc.text_content(span), "(cc) holiday snaps");
    }

    #[test]
    fn special_characters_escape_on_serialize() {
        let mut gallery = fixture();
        gallery.album_mut(0).title = "Tom & Jerry <3".to_string();
        let doc = builder().album_page(&gallery, 0, None);
        let markup = serialize(&doc);
        assert!(markup.contains("Tom &amp; Jerry &lt;3"));
        assert!(!markup.contains("<3"));
    }

    #[test]
    fn every_page_kind_is_well_formed() {
        let gallery = fixture();
        let builder = builder();
        let pages = [
            builder.gallery_page(&gallery),
            builder.album_page(&gallery, 0, None),
            builder.album_page(&gallery, 1, Some(0)),
            builder.photo_page(&gallery, 0, 1),
            builder.exif_page(&gallery, 0, 1),
        ];
        for page in &pages {
            let markup = serialize_pretty(page);
            check_well_formed(&markup).unwrap();
        }
    }
}
