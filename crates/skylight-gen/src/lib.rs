//! Static gallery generator for Skylight.
//!
//! Turns a set of album files plus photo directories into a tree of
//! XHTML pages. The work is split into a configuration layer
//! ([`config`]), page construction ([`page`]), external image
//! conversion ([`convert`]), EXIF extraction ([`exif`]), asset copying
//! ([`assets`]), and the [`pipeline`] that runs the stages in order.

pub mod assets;
pub mod config;
pub mod convert;
pub mod exif;
pub mod page;
pub mod pipeline;
