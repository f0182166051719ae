//! Gallery consistency check.
//!
//! Run after all album files are loaded and before any output is
//! generated. The model is broken when:
//!
//! - an album was referenced but never defined;
//! - no root albums remain (every album is someone's subalbum);
//! - an album contains neither subalbums nor photos.

use std::collections::HashSet;

use skylight_types::error::{Result, SkylightError};

use crate::gallery::{AlbumId, Gallery};

/// Check the gallery, reporting the first inconsistency found.
pub fn check(gallery: &Gallery) -> Result<()> {
    let unresolved: Vec<&str> = gallery
        .albums
        .iter()
        .filter(|album| !album.defined)
        .map(|album| album.dir.as_str())
        .collect();
    if !unresolved.is_empty() {
        return Err(SkylightError::Check(format!(
            "unresolved album references found: {}",
            unresolved.join(", ")
        )));
    }

    if gallery.roots.is_empty() {
        return Err(SkylightError::Check("no root albums in gallery".into()));
    }

    // walk every reachable album; the visited set keeps reference
    // cycles from looping
    let mut visited: HashSet<AlbumId> = HashSet::new();
    let mut stack: Vec<AlbumId> = gallery.roots.clone();
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let album = gallery.album(id);
        if album.subalbums.is_empty() && album.photos.is_empty() {
            return Err(SkylightError::Check(format!(
                "album \"{}\" contains no subalbums nor photos",
                album.dir
            )));
        }
        stack.extend(&album.subalbums);
    }
    Ok(())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
