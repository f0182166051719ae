//! XHTML document model for Skylight.
//!
//! This crate contains the pieces shared by the gallery generator and the
//! page viewer: a flat-arena DOM, a lenient XML/XHTML tokenizer and parser
//! (malformed markup degrades instead of failing), character-entity
//! decoding and escaping, a serializer with a pretty-printing variant, and
//! a strict well-formedness checker used by the generator's validation
//! step.

pub mod dom;
pub mod entities;
pub mod parser;
pub mod tokenizer;
pub mod writer;
