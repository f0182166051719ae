//! The generator pipeline.
//!
//! A build runs four stages in order: parse the album files, copy
//! assets, generate pages and converted photos, and postprocess the
//! output. Each stage is a method so the command line can also run a
//! subset (parsing alone answers `skylight check`).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use regex::Regex;

use skylight_markup::{parser, writer};
use skylight_model::check;
use skylight_model::gallery::{AlbumId, Gallery};
use skylight_model::parser::AlbumParser;
use skylight_types::error::{Result, SkylightError};

use crate::assets;
use crate::config::Config;
use crate::convert::{self, ConversionArgs, Converter, IMAGE_SIZE, THUMB_SIZE};
use crate::exif;
use crate::page::{DEFAULT_STYLESHEET, PageBuilder};

/// Stylesheet written when the configured assets do not provide one.
const BUILTIN_STYLESHEET: &str = include_str!("../../../assets/skylight.css");

/// Drives a gallery build.
#[derive(Debug)]
pub struct Generator {
    config: Config,
    gallery: Gallery,
    converter: Converter,
    thumb_args: ConversionArgs,
    image_args: ConversionArgs,
    exclude: Regex,
    outdir: PathBuf,
}

impl Generator {
    pub fn new(config: Config) -> Result<Self> {
        let exclude = Regex::new(&config.gallery.exclude)
            .map_err(|e| SkylightError::Config(format!("invalid exclude pattern: {e}")))?;
        let converter = Converter::new(config.gallery.graphicsmagick);
        let thumb_args = ConversionArgs::from_config(&config.photo.thumb, THUMB_SIZE);
        let image_args = ConversionArgs::from_config(&config.photo.image, IMAGE_SIZE);
        let gallery = Gallery::new(&config.gallery.title, &config.gallery.description);
        let outdir = PathBuf::from(&config.gallery.output_dir);
        Ok(Self {
            config,
            gallery,
            converter,
            thumb_args,
            image_args,
            exclude,
            outdir,
        })
    }

    /// The parsed gallery model.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Force output validation on regardless of configuration.
    pub fn force_validate(&mut self) {
        self.config.gallery.validate = true;
    }

    /// Probe for the external tools a build needs.
    pub fn check_tools(&self) -> Result<()> {
        self.converter.check_available()?;
        convert::check_command("exiv2", "Exiv2 (exiv2 command)")
    }

    /// Parse the configured album files and check gallery consistency.
    pub fn parse(&mut self) -> Result<()> {
        let mut parser = AlbumParser::with_gallery(Gallery::new(
            &self.config.gallery.title,
            &self.config.gallery.description,
        ));
        for album_file in &self.config.gallery.albums {
            debug!("parsing album file {album_file}");
            parser.load_path(Path::new(album_file))?;
        }
        self.gallery = parser.into_gallery();
        check::check(&self.gallery)
    }

    /// Copy configured assets into the output directory. The built-in
    /// stylesheet is written when the assets did not provide one.
    pub fn copy(&self) -> Result<()> {
        assets::mkdir(&self.outdir)?;
        for asset in &self.config.gallery.assets {
            for found in assets::lookup(&self.config.gallery.search_path, asset) {
                assets::copy_tree(&found, &self.outdir, &self.exclude)?;
            }
        }

        let stylesheet = self.outdir.join(DEFAULT_STYLESHEET);
        if !stylesheet.exists() {
            if let Some(dir) = stylesheet.parent() {
                assets::mkdir(dir)?;
            }
            fs::write(&stylesheet, BUILTIN_STYLESHEET)?;
            info!("wrote default stylesheet {}", stylesheet.display());
        }
        Ok(())
    }

    /// Generate the gallery index, album and photo pages, EXIF pages,
    /// and converted photos.
    pub fn generate(&mut self) -> Result<()> {
        assets::mkdir(&self.outdir)?;
        let builder = PageBuilder::new(&self.config.page);

        let index = builder.gallery_page(&self.gallery);
        fs::write(self.outdir.join("index.xhtml"), writer::serialize(&index))?;

        let mut generated = HashSet::new();
        let roots = self.gallery.roots.clone();
        for root in roots {
            self.generate_album(&builder, root, None, &mut generated)?;
        }
        info!("generated index page");
        Ok(())
    }

    fn generate_album(
        &mut self,
        builder: &PageBuilder,
        id: AlbumId,
        parent: Option<AlbumId>,
        generated: &mut HashSet<AlbumId>,
    ) -> Result<()> {
        // A shared album renders once, under its first parent.
        if !generated.insert(id) {
            return Ok(());
        }
        let dir = self.outdir.join(&self.gallery.album(id).dir);
        assets::mkdir(&dir)?;

        let page = builder.album_page(&self.gallery, id, parent);
        fs::write(dir.join("index.xhtml"), writer::serialize(&page))?;

        let subalbums = self.gallery.album(id).subalbums.clone();
        for sub in subalbums {
            self.generate_album(builder, sub, Some(id), generated)?;
        }
        for index in 0..self.gallery.album(id).photos.len() {
            self.generate_photo(builder, id, index)?;
        }
        info!("generated album {}", self.gallery.album(id).dir);
        Ok(())
    }

    fn generate_photo(&mut self, builder: &PageBuilder, id: AlbumId, index: usize) -> Result<()> {
        let name = self.gallery.album(id).photos[index].name.clone();
        let sources = assets::lookup(&self.config.gallery.input_dirs, &format!("{name}.jpg"));
        let Some(source) = sources.into_iter().next() else {
            error!("could not find photo {name} file");
            return Ok(());
        };

        self.generate_exif(builder, id, index, &source)?;

        let dir = self.outdir.join(&self.gallery.album(id).dir);
        let thumb_out = dir.join(format!("{name}.thumb.jpg"));
        self.convert_photo(&source, &thumb_out, &self.thumb_args);
        let image_out = dir.join(format!("{name}.jpg"));
        self.convert_photo(&source, &image_out, &self.image_args);

        let page = builder.photo_page(&self.gallery, id, index);
        fs::write(dir.join(format!("{name}.xhtml")), writer::serialize(&page))?;
        info!("generated photo page {name}");
        Ok(())
    }

    /// Read EXIF data into the model and write the EXIF page when the
    /// photo has any.
    fn generate_exif(
        &mut self,
        builder: &PageBuilder,
        id: AlbumId,
        index: usize,
        source: &Path,
    ) -> Result<()> {
        let data = match exif::read_exif(source, &self.config.gallery.exif_headers) {
            Ok(data) => data,
            Err(e) => {
                error!("could not read exif of {}: {e}", source.display());
                Vec::new()
            },
        };
        self.gallery.album_mut(id).photos[index].exif = data;

        let name = self.gallery.album(id).photos[index].name.clone();
        if self.gallery.album(id).photos[index].exif.is_empty() {
            error!("photo {name} does not contain exif");
            return Ok(());
        }
        let page = builder.exif_page(&self.gallery, id, index);
        let dir = self.outdir.join(&self.gallery.album(id).dir);
        fs::write(dir.join(format!("{name}.exif.xhtml")), writer::serialize(&page))?;
        info!("generated exif page for photo {name}");
        Ok(())
    }

    /// Convert one photo kind, leaving existing output intact. Failed
    /// conversions are logged; the build continues.
    fn convert_photo(&self, source: &Path, output: &Path, args: &ConversionArgs) {
        if output.exists() {
            info!("leaving intact {}", output.display());
            return;
        }
        info!("converting to {}", output.display());
        if let Err(e) = self.converter.convert(source, output, args) {
            error!("failed conversion {}: {e}", output.display());
        }
    }

    /// Reformat every generated page; with validation on, check each
    /// for well-formedness and log failures.
    pub fn postprocess(&self) -> Result<()> {
        for file in xhtml_files(&self.outdir)? {
            let text = fs::read_to_string(&file)?;
            let doc = parser::parse(&text);
            let pretty = writer::serialize_pretty(&doc);
            fs::write(&file, &pretty)?;

            if self.config.gallery.validate {
                info!("validating file: {}", file.display());
                if let Err(e) = parser::check_well_formed(&pretty) {
                    error!("validating failed: {}: {e}", file.display());
                }
            }
        }
        Ok(())
    }
}

fn xhtml_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_xhtml(dir, &mut files)?;
    Ok(files)
}

fn collect_xhtml(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_xhtml(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "xhtml") {
            files.push(path);
        }
    }
    Ok(())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
