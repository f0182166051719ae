//! Tree construction.
//!
//! Consumes the token stream and builds an arena DOM. Construction is
//! lenient and total: mismatched close tags close to the nearest open
//! ancestor, stray close tags are dropped, and unclosed elements are
//! closed at end of input. Entity references in character data and
//! attribute values are decoded here.
//!
//! [`check_well_formed`] is the strict counterpart used by the
//! generator's validation step; it reports the first offense instead of
//! recovering.

use skylight_types::error::{Result, SkylightError};

use crate::dom::{Attribute, Document, ElementData, NodeId, NodeKind, is_void};
use crate::entities;
use crate::tokenizer::{Token, Tokenizer};

/// Parse markup into a [`Document`]. Never fails; malformed input
/// degrades per the rules above.
///
/// Whitespace-only character data is treated as inter-element formatting
/// and dropped.
pub fn parse(input: &str) -> Document {
    let mut tokenizer = Tokenizer::new(input);
    build(tokenizer.tokenize())
}

fn build(tokens: Vec<Token>) -> Document {
    let mut doc = Document::new();
    // stack of open elements: (tag name, node id)
    let mut open: Vec<(String, NodeId)> = Vec::new();

    for token in tokens {
        let parent = open.last().map_or(doc.root, |(_, id)| *id);
        match token {
            Token::StartTag(tag) => {
                let attributes = tag
                    .attributes
                    .into_iter()
                    .map(|a| Attribute {
                        name: a.name,
                        value: entities::decode(&a.value),
                    })
                    .collect();
                let data = ElementData {
                    tag: tag.name.clone(),
                    attributes,
                };
                let id = doc.add_node(NodeKind::Element(data));
                doc.append_child(parent, id);
                if !tag.self_closing && !is_void(&tag.name) {
                    open.push((tag.name, id));
                }
            },
            Token::EndTag(name) => {
                // close to the nearest matching ancestor; ignore strays
                if let Some(found) = open.iter().rposition(|(n, _)| *n == name) {
                    open.truncate(found);
                }
            },
            Token::Text(raw) => {
                if raw.trim().is_empty() {
                    continue;
                }
                let id = doc.add_node(NodeKind::Text(entities::decode(&raw)));
                doc.append_child(parent, id);
            },
            Token::Comment(text) => {
                let id = doc.add_node(NodeKind::Comment(text));
                doc.append_child(parent, id);
            },
            Token::Doctype(text) => {
                if doc.doctype.is_none() {
                    doc.doctype = Some(text);
                }
            },
            Token::Eof => break,
        }
    }
    doc
}

/// Check `input` for XML well-formedness, reporting the first offense.
///
/// Unlike [`parse`] this applies XML rules, not leniency: every element
/// must be closed in order (void tags included), every `&` must begin a
/// valid reference, and character data and extra elements may not follow
/// the document element.
pub fn check_well_formed(input: &str) -> Result<()> {
    let mut tokenizer = Tokenizer::new(input);
    let tokens = tokenizer.tokenize();

    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;

    for token in &tokens {
        match token {
            Token::StartTag(tag) => {
                for attr in &tag.attributes {
                    entities::decode_strict(&attr.value).map_err(|e| {
                        SkylightError::Markup(format!("in attribute {}: {e}", attr.name))
                    })?;
                }
                if open.is_empty() {
                    if seen_root {
                        return Err(SkylightError::Markup(format!(
                            "content after document element: <{}>",
                            tag.name
                        )));
                    }
                    seen_root = true;
                }
                if !tag.self_closing {
                    open.push(tag.name.clone());
                }
            },
            Token::EndTag(name) => match open.pop() {
                Some(expected) if expected == *name => {},
                Some(expected) => {
                    return Err(SkylightError::Markup(format!(
                        "mismatched close tag </{name}>, expected </{expected}>"
                    )));
                },
                None => {
                    return Err(SkylightError::Markup(format!(
                        "close tag </{name}> with no open element"
                    )));
                },
            },
            Token::Text(raw) => {
                entities::decode_strict(raw).map_err(SkylightError::Markup)?;
                if open.is_empty() && !raw.trim().is_empty() {
                    return Err(SkylightError::Markup(
                        "character data outside the document element".into(),
                    ));
                }
            },
            Token::Comment(_) | Token::Doctype(_) | Token::Eof => {},
        }
    }

    if tokenizer.ended_inside_markup() {
        return Err(SkylightError::Markup(
            "unexpected end of input inside markup".into(),
        ));
    }
    if let Some(unclosed) = open.last() {
        return Err(SkylightError::Markup(format!("unclosed element <{unclosed}>")));
    }
    Ok(())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
