//! Generator configuration -- loaded from a TOML file.
//!
//! A minimal configuration names the gallery, the album files, the photo
//! input directories, and the output directory:
//!
//! ```toml
//! [gallery]
//! title = "Holiday photos"
//! albums = ["gallery.album"]
//! input_dirs = ["/data/photos"]
//! output_dir = "out"
//! ```
//!
//! Everything else has a sensible default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use skylight_types::error::{Result, SkylightError};

/// Top-level generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub gallery: GalleryConfig,
    /// Photo conversion settings, `[photo.thumb]` and `[photo.image]`.
    #[serde(default)]
    pub photo: PhotoConfig,
    /// Page chrome: copyright line and extra css/js includes.
    #[serde(default)]
    pub page: PageConfig,
}

/// The `[gallery]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    /// Gallery title, shown on every page.
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Album files to parse, in order.
    pub albums: Vec<String>,
    /// Directories searched for source photos.
    pub input_dirs: Vec<String>,
    /// Everything generated lands below this directory.
    pub output_dir: String,
    /// Check generated pages for well-formedness.
    #[serde(default)]
    pub validate: bool,
    /// Files or directories copied into the output directory.
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,
    /// Directories the assets are resolved against.
    #[serde(default)]
    pub search_path: Vec<String>,
    /// Paths matching this pattern are skipped during the asset copy.
    #[serde(default = "default_exclude")]
    pub exclude: String,
    /// Convert photos with GraphicsMagick (`gm convert`) instead of
    /// ImageMagick (`convert`).
    #[serde(default)]
    pub graphicsmagick: bool,
    /// EXIF fields kept on EXIF pages, in display order.
    #[serde(default = "default_exif_headers")]
    pub exif_headers: Vec<String>,
}

/// The `[photo]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoConfig {
    #[serde(default)]
    pub thumb: ConversionConfig,
    #[serde(default)]
    pub image: ConversionConfig,
}

/// Conversion settings for one photo kind.
///
/// `size` defaults per kind (`128x128>` thumbnails, `800x600>` images);
/// an empty `quality` or `unsharp` drops the flag from the argument list.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_unsharp")]
    pub unsharp: String,
    /// Extra conversion arguments, whitespace separated.
    #[serde(default)]
    pub params: String,
}

/// The `[page]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageConfig {
    /// Copyright text for the page footer.
    #[serde(default)]
    pub copyright: String,
    /// Stylesheets included after the default `css/skylight.css`.
    #[serde(default)]
    pub css: Vec<String>,
    /// Scripts included on every page.
    #[serde(default)]
    pub js: Vec<String>,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.check_required()?;
        Ok(config)
    }

    /// Read and parse a configuration file. Any failure becomes a
    /// configuration error naming the file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|_| {
            SkylightError::Config(format!("config file {} does not exist", path.display()))
        })?;
        Self::from_toml(&text)
            .map_err(|e| SkylightError::Config(format!("{}: {e}", path.display())))
    }

    fn check_required(&self) -> Result<()> {
        if self.gallery.title.is_empty() {
            return Err(SkylightError::Config("no gallery title configured".to_string()));
        }
        if self.gallery.albums.is_empty() {
            return Err(SkylightError::Config("no album files configured".to_string()));
        }
        if self.gallery.input_dirs.is_empty() {
            return Err(SkylightError::Config("no input directory configured".to_string()));
        }
        if self.gallery.output_dir.is_empty() {
            return Err(SkylightError::Config("no output directory configured".to_string()));
        }
        Ok(())
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            size: None,
            quality: default_quality(),
            unsharp: default_unsharp(),
            params: String::new(),
        }
    }
}

fn default_assets() -> Vec<String> {
    vec!["css".to_string()]
}
fn default_exclude() -> String {
    r"\.svn|CVS|~$|\.swp$".to_string()
}
fn default_quality() -> String {
    "90".to_string()
}
fn default_unsharp() -> String {
    "0.1x0.1+2.0+0".to_string()
}
fn default_exif_headers() -> Vec<String> {
    [
        "Image timestamp",
        "Exposure time",
        "Aperture",
        "Exposure bias",
        "Flash",
        "Flash bias",
        "Focal length",
        "ISO speed",
        "Exposure mode",
        "Metering mode",
        "White balance",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[gallery]
title = "Test gallery"
albums = ["gallery.album"]
input_dirs = ["photos"]
output_dir = "out"
"#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.gallery.title, "Test gallery");
        assert_eq!(config.gallery.description, "");
        assert_eq!(config.gallery.assets, vec!["css".to_string()]);
        assert_eq!(config.gallery.exclude, r"\.svn|CVS|~$|\.swp$");
        assert!(!config.gallery.validate);
        assert!(!config.gallery.graphicsmagick);
        assert_eq!(config.gallery.exif_headers.len(), 11);
        assert_eq!(config.gallery.exif_headers[0], "Image timestamp");

        assert_eq!(config.photo.thumb.size, None);
        assert_eq!(config.photo.thumb.quality, "90");
        assert_eq!(config.photo.image.unsharp, "0.1x0.1+2.0+0");
        assert_eq!(config.page.copyright, "");
        assert!(config.page.css.is_empty());
    }

    #[test]
    fn full_config_overrides_defaults() {
        let toml = r#"
[gallery]
title = "Peaks"
description = "Mountain photos"
albums = ["a.album", "b.album"]
input_dirs = ["/data/a", "/data/b"]
output_dir = "/tmp/gallery"
validate = true
assets = ["css", "logo.png"]
search_path = ["share"]
exclude = "\\.bak$"
graphicsmagick = true
exif_headers = ["Aperture", "Flash"]

[photo.thumb]
size = "200x200>"
quality = "85"

[photo.image]
size = "1024x768>"
unsharp = ""
params = "-strip -auto-orient"

[page]
copyright = "(cc) someone"
css = ["css/extra.css"]
js = ["js/site.js"]
"#;
        let config = Config::from_toml(toml).unwrap();
        assert!(config.gallery.validate);
        assert!(config.gallery.graphicsmagick);
        assert_eq!(config.gallery.exif_headers, vec!["Aperture", "Flash"]);
        assert_eq!(config.photo.thumb.size.as_deref(), Some("200x200>"));
        assert_eq!(config.photo.thumb.quality, "85");
        // Unset options keep their defaults.
        assert_eq!(config.photo.thumb.unsharp, "0.1x0.1+2.0+0");
        assert_eq!(config.photo.image.unsharp, "");
        assert_eq!(config.photo.image.params, "-strip -auto-orient");
        assert_eq!(config.page.copyright, "(cc) someone");
        assert_eq!(config.page.js, vec!["js/site.js"]);
    }

    #[test]
    fn missing_title_is_an_error() {
        let toml = r#"
[gallery]
albums = ["gallery.album"]
input_dirs = ["photos"]
output_dir = "out"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("title"), "got: {err}");
    }

    #[test]
    fn empty_albums_is_an_error() {
        let toml = r#"
[gallery]
title = "Test"
albums = []
input_dirs = ["photos"]
output_dir = "out"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(err.to_string(), "config error: no album files configured");
    }

    #[test]
    fn empty_output_dir_is_an_error() {
        let toml = r#"
[gallery]
title = "Test"
albums = ["a.album"]
input_dirs = ["photos"]
output_dir = ""
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(err.to_string(), "config error: no output directory configured");
    }

    #[test]
    fn from_path_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.gallery.title, "Test gallery");
    }

    #[test]
    fn from_path_names_the_missing_file() {
        let err = Config::from_path(Path::new("no/such/skylight.toml")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "config error: config file no/such/skylight.toml does not exist"
        );
    }

    #[test]
    fn from_path_names_the_broken_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[gallery\ntitle = ").unwrap();
        let err = Config::from_path(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("config error: "), "got: {message}");
        assert!(
            message.contains(&file.path().display().to_string()),
            "got: {message}"
        );
    }
}
