//! Album file parser.
//!
//! Album files are line oriented; one statement per line:
//!
//! ```text
//! # comment
//! /peaks; High Peaks; a week above the treeline   album definition
//! /peaks/dawn                                     subalbum reference
//! dc0042; Dawn; first light on the ridge          photo
//! ```
//!
//! Fields are separated by `"; "`. Album directories may be referenced
//! before they are defined; every album starts out as a gallery root and
//! is demoted the moment something references it. One parser may load
//! several album files into the same gallery.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use skylight_types::error::{Result, SkylightError};

use crate::gallery::{AlbumId, Gallery, Photo};

/// Multi-file album parser accumulating one [`Gallery`].
pub struct AlbumParser {
    gallery: Gallery,
    by_dir: HashMap<String, AlbumId>,
    current: Option<AlbumId>,
}

impl AlbumParser {
    pub fn new() -> Self {
        Self::with_gallery(Gallery::new("", ""))
    }

    /// Parse into an existing gallery (typically carrying the configured
    /// title and description).
    pub fn with_gallery(gallery: Gallery) -> Self {
        Self {
            gallery,
            by_dir: HashMap::new(),
            current: None,
        }
    }

    /// Load one album file from disk.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.load_str(&path.display().to_string(), &text)
    }

    /// Load one album file from a string. `file` is used in error
    /// messages only.
    pub fn load_str(&mut self, file: &str, text: &str) -> Result<()> {
        for (index, raw) in text.lines().enumerate() {
            let lineno = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.statement(file, lineno, line)?;
        }
        Ok(())
    }

    /// The finished gallery. Run [`crate::check::check`] on it before
    /// generating anything.
    pub fn into_gallery(self) -> Gallery {
        self.gallery
    }

    // -- statement handling -------------------------------------------------

    fn statement(&mut self, file: &str, lineno: usize, line: &str) -> Result<()> {
        if let Some(rest) = line.strip_prefix('/') {
            let fields = split_fields(file, lineno, rest)?;
            let dir = parse_dir(file, lineno, fields[0])?;
            match fields.len() {
                1 => self.reference(file, lineno, &dir),
                2 | 3 => {
                    let title = fields[1].to_string();
                    let description = fields.get(2).map(|s| s.to_string()).unwrap_or_default();
                    self.define(file, lineno, &dir, title, description)
                },
                _ => Err(syntax_error(file, lineno)),
            }
        } else {
            let fields = split_fields(file, lineno, line)?;
            let name = fields[0];
            if fields.len() > 3 || !is_photo_name(name) {
                return Err(syntax_error(file, lineno));
            }
            let title = fields.get(1).map(|s| s.to_string()).unwrap_or_default();
            let description = fields.get(2).map(|s| s.to_string()).unwrap_or_default();
            self.photo(file, lineno, name, title, description)
        }
    }

    /// Album definition: `/dir; title` or `/dir; title; description`.
    fn define(
        &mut self,
        file: &str,
        lineno: usize,
        dir: &str,
        title: String,
        description: String,
    ) -> Result<()> {
        let id = self.get_or_create(dir);
        if self.gallery.album(id).defined {
            return Err(SkylightError::parse(
                file,
                lineno,
                format!("album \"{dir}\" already defined"),
            ));
        }
        let album = self.gallery.album_mut(id);
        album.defined = true;
        album.title = title;
        album.description = description;
        self.current = Some(id);
        Ok(())
    }

    /// Subalbum reference: `/dir` alone appends the referenced album to
    /// the current album.
    fn reference(&mut self, file: &str, lineno: usize, dir: &str) -> Result<()> {
        let id = self.get_or_create(dir);
        let Some(current) = self.current else {
            return Err(SkylightError::parse(
                file,
                lineno,
                format!("subalbum /{dir} cannot exist without album"),
            ));
        };
        self.gallery.album_mut(current).subalbums.push(id);
        // a referenced album is no longer a root
        self.gallery.roots.retain(|&root| root != id);
        Ok(())
    }

    fn photo(
        &mut self,
        file: &str,
        lineno: usize,
        name: &str,
        title: String,
        description: String,
    ) -> Result<()> {
        let Some(current) = self.current else {
            return Err(SkylightError::parse(
                file,
                lineno,
                format!("photo {name} cannot exist without album"),
            ));
        };
        self.gallery.album_mut(current).photos.push(Photo {
            name: name.to_string(),
            title,
            description,
            exif: Vec::new(),
        });
        Ok(())
    }

    /// Find the album for a directory, creating it on first mention.
    /// Every new album starts as a gallery root; [`Self::reference`]
    /// demotes it when it becomes someone's subalbum.
    fn get_or_create(&mut self, dir: &str) -> AlbumId {
        if let Some(&id) = self.by_dir.get(dir) {
            return id;
        }
        let id = self.gallery.add_album(dir);
        self.gallery.roots.push(id);
        self.by_dir.insert(dir.to_string(), id);
        id
    }
}

impl Default for AlbumParser {
    fn default() -> Self {
        Self::new()
    }
}

// -- field validation -------------------------------------------------------

fn syntax_error(file: &str, lineno: usize) -> SkylightError {
    SkylightError::parse(file, lineno, "syntax error")
}

/// Split a statement into `"; "`-separated fields, trimmed. A field that
/// is empty or still contains a `;` did not match the grammar.
fn split_fields<'a>(file: &str, lineno: usize, text: &'a str) -> Result<Vec<&'a str>> {
    let mut fields = Vec::new();
    for field in text.split("; ") {
        let field = field.trim();
        if field.is_empty() || field.contains(';') {
            return Err(syntax_error(file, lineno));
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Validate and normalize an album directory: allowed characters only,
/// empty path segments collapsed.
fn parse_dir(file: &str, lineno: usize, raw: &str) -> Result<String> {
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/'))
    {
        return Err(syntax_error(file, lineno));
    }
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Err(syntax_error(file, lineno));
    }
    Ok(segments.join("/"))
}

fn is_photo_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
