//! File operations for the generator: directory creation, asset lookup,
//! and the exclude-aware copy.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use regex::Regex;

use skylight_types::error::Result;

/// Create a directory (and parents) if it does not exist.
pub fn mkdir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Resolve `name` against each directory of `path`, returning every hit.
pub fn lookup(path: &[String], name: &str) -> Vec<PathBuf> {
    path.iter()
        .map(|dir| Path::new(dir).join(name))
        .filter(|candidate| candidate.exists())
        .collect()
}

/// Files to copy for one asset: `(source file, destination directory)`.
///
/// A directory keeps its own name under `dest_dir` (`share/css` copies to
/// `dest_dir/css/...`); a plain file lands directly in `dest_dir`. Source
/// paths matching `exclude` anywhere are skipped.
pub fn walk(source: &Path, dest_dir: &Path, exclude: &Regex) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut found = Vec::new();
    if source.is_dir() {
        let base = source.parent().unwrap_or_else(|| Path::new(""));
        walk_dir(source, base, dest_dir, exclude, &mut found)?;
    } else if source.is_file() && !exclude.is_match(&source.to_string_lossy()) {
        found.push((source.to_path_buf(), dest_dir.to_path_buf()));
    }
    Ok(found)
}

fn walk_dir(
    dir: &Path,
    base: &Path,
    dest_dir: &Path,
    exclude: &Regex,
    found: &mut Vec<(PathBuf, PathBuf)>,
) -> std::io::Result<()> {
    let dest = match dir.strip_prefix(base) {
        Ok(rel) => dest_dir.join(rel),
        Err(_) => dest_dir.to_path_buf(),
    };
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(&path, base, dest_dir, exclude, found)?;
        } else if !exclude.is_match(&path.to_string_lossy()) {
            found.push((path, dest.clone()));
        }
    }
    Ok(())
}

/// Copy a file or directory into `dest_dir`, skipping excluded paths.
pub fn copy_tree(source: &Path, dest_dir: &Path, exclude: &Regex) -> Result<()> {
    for (src, dest) in walk(source, dest_dir, exclude)? {
        let Some(name) = src.file_name() else {
            continue;
        };
        mkdir(&dest)?;
        fs::copy(&src, dest.join(name))?;
        info!("{} copied into {}", src.display(), dest.display());
    }
    Ok(())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_exclude() -> Regex {
        Regex::new(r"\.svn|CVS|~$|\.swp$").unwrap()
    }

    #[test]
    fn directory_keeps_its_own_name() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("share/css");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("site.css"), "body {}").unwrap();
        let out = tmp.path().join("out");

        copy_tree(&src, &out, &default_exclude()).unwrap();

        assert!(out.join("css/site.css").is_file());
        assert!(!out.join("share").exists());
    }

    #[test]
    fn plain_file_lands_in_dest_root() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("logo.png");
        fs::write(&src, "png").unwrap();
        let out = tmp.path().join("out");

        copy_tree(&src, &out, &default_exclude()).unwrap();

        assert!(out.join("logo.png").is_file());
    }

    #[test]
    fn nested_directories_survive() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("css");
        fs::create_dir_all(src.join("print")).unwrap();
        fs::write(src.join("site.css"), "a").unwrap();
        fs::write(src.join("print/print.css"), "b").unwrap();
        let out = tmp.path().join("out");

        copy_tree(&src, &out, &default_exclude()).unwrap();

        assert!(out.join("css/site.css").is_file());
        assert!(out.join("css/print/print.css").is_file());
    }

    #[test]
    fn excluded_paths_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("css");
        fs::create_dir_all(src.join(".svn")).unwrap();
        fs::write(src.join("site.css"), "a").unwrap();
        fs::write(src.join("site.css~"), "backup").unwrap();
        fs::write(src.join(".svn/entries"), "svn").unwrap();
        let out = tmp.path().join("out");

        copy_tree(&src, &out, &default_exclude()).unwrap();

        assert!(out.join("css/site.css").is_file());
        assert!(!out.join("css/site.css~").exists());
        assert!(!out.join("css/.svn").exists());
    }

    #[test]
    fn lookup_returns_every_hit_in_search_order() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(a.join("css")).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::create_dir_all(b.join("css")).unwrap();
        let path = vec![
            a.display().to_string(),
            b.display().to_string(),
        ];

        let hits = lookup(&path, "css");
        assert_eq!(hits, vec![a.join("css"), b.join("css")]);
        assert!(lookup(&path, "js").is_empty());
    }

    #[test]
    fn mkdir_tolerates_existing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("x/y");
        mkdir(&dir).unwrap();
        mkdir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
