//! Gallery, album, and photo types.

/// Index into the [`Gallery`]'s album arena.
pub type AlbumId = usize;

/// A photo gallery: the root of the data model.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub title: String,
    pub description: String,
    /// Album arena; albums reference each other by [`AlbumId`].
    pub albums: Vec<Album>,
    /// Top-level albums, in definition order.
    pub roots: Vec<AlbumId>,
}

/// A single album.
#[derive(Debug, Clone)]
pub struct Album {
    /// Album directory counted from the gallery root, e.g. `peaks/dawn`.
    pub dir: String,
    pub title: String,
    pub description: String,
    pub subalbums: Vec<AlbumId>,
    pub photos: Vec<Photo>,
    /// Set when the album file carried a definition line for this album.
    /// Albums created by a reference alone stay undefined until then.
    pub(crate) defined: bool,
}

/// A single photo.
#[derive(Debug, Clone)]
pub struct Photo {
    /// Source file name without extension or directory.
    pub name: String,
    pub title: String,
    pub description: String,
    /// EXIF fields in display order, filled in during generation.
    pub exif: Vec<(String, String)>,
}

impl Gallery {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            albums: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Add an album to the arena and return its [`AlbumId`]. The album
    /// starts undefined and unrooted.
    pub fn add_album(&mut self, dir: &str) -> AlbumId {
        let id = self.albums.len();
        self.albums.push(Album {
            dir: dir.to_string(),
            title: String::new(),
            description: String::new(),
            subalbums: Vec::new(),
            photos: Vec::new(),
            defined: false,
        });
        id
    }

    pub fn album(&self, id: AlbumId) -> &Album {
        &self.albums[id]
    }

    pub fn album_mut(&mut self, id: AlbumId) -> &mut Album {
        &mut self.albums[id]
    }

    /// Relative path from an album's directory up to the gallery root:
    /// one `..` per directory component (`peaks/dawn` gives `../..`).
    pub fn rootdir(&self, id: AlbumId) -> String {
        let album = self.album(id);
        let ups: Vec<&str> = album.dir.split('/').map(|_| "..").collect();
        ups.join("/")
    }

    /// Total number of photos across all albums.
    pub fn photo_count(&self) -> usize {
        self.albums.iter().map(|a| a.photos.len()).sum()
    }
}

/// Last component of an album directory.
pub fn reldir(dir: &str) -> &str {
    dir.rsplit('/').next().unwrap_or(dir)
}

impl Album {
    /// The photo before `index`, if any.
    pub fn prev_photo(&self, index: usize) -> Option<&Photo> {
        index.checked_sub(1).and_then(|i| self.photos.get(i))
    }

    /// The photo after `index`, if any.
    pub fn next_photo(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index + 1)
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
