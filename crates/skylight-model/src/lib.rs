//! Gallery data model for Skylight.
//!
//! A gallery is a tree of albums holding photos. Albums live in a flat
//! arena indexed by [`gallery::AlbumId`] because album files may reference
//! an album before defining it; the parser resolves such forward
//! references against the arena. [`check::check`] verifies the finished
//! model before anything is generated.

pub mod check;
pub mod gallery;
pub mod parser;
