//! Foundation types for Skylight.
//!
//! This crate contains the types shared by all Skylight crates: input
//! events, error types, and the common `Result` alias.

pub mod error;
pub mod input;
