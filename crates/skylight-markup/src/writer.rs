//! Document serialization.
//!
//! Two variants: [`serialize`] emits the document with no added
//! whitespace, [`serialize_pretty`] indents block-level structure for
//! human-readable output files. Attribute values and character data are
//! entity-escaped on the way out; empty elements are written `<tag/>`.

use crate::dom::{Document, NodeId, NodeKind, is_block_level};
use crate::entities::{escape_attr, escape_text};

const INDENT: &str = "  ";

/// Serialize with no added whitespace.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    write_doctype(doc, &mut out);
    for i in 0..doc.get(doc.root).children.len() {
        let child = doc.get(doc.root).children[i];
        write_compact(doc, child, &mut out);
    }
    out
}

/// Serialize with block-level elements indented, one per line.
pub fn serialize_pretty(doc: &Document) -> String {
    let mut out = String::new();
    write_doctype(doc, &mut out);
    for i in 0..doc.get(doc.root).children.len() {
        let child = doc.get(doc.root).children[i];
        write_pretty(doc, child, 0, &mut out);
    }
    out
}

fn write_doctype(doc: &Document, out: &mut String) {
    if let Some(ref doctype) = doc.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(doctype);
        out.push_str(">\n");
    }
}

fn write_open_tag(doc: &Document, id: NodeId, out: &mut String) {
    if let NodeKind::Element(ref data) = doc.get(id).kind {
        out.push('<');
        out.push_str(&data.tag);
        for attr in &data.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&escape_attr(&attr.value));
            out.push('"');
        }
    }
}

fn write_compact(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.get(id).kind {
        NodeKind::Document => {
            for i in 0..doc.get(id).children.len() {
                write_compact(doc, doc.get(id).children[i], out);
            }
        },
        NodeKind::Element(data) => {
            write_open_tag(doc, id, out);
            let children = &doc.get(id).children;
            if children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for i in 0..children.len() {
                    write_compact(doc, doc.get(id).children[i], out);
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push('>');
            }
        },
        NodeKind::Text(s) => out.push_str(&escape_text(s)),
        NodeKind::Comment(s) => {
            out.push_str("<!--");
            out.push_str(s);
            out.push_str("-->");
        },
    }
}

/// `true` if any direct child forces the parent onto multiple lines.
fn has_block_child(doc: &Document, id: NodeId) -> bool {
    doc.get(id).children.iter().any(|&c| match &doc.get(c).kind {
        NodeKind::Element(data) => is_block_level(&data.tag),
        NodeKind::Comment(_) => true,
        _ => false,
    })
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_pretty(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    match &doc.get(id).kind {
        NodeKind::Document => {
            for i in 0..doc.get(id).children.len() {
                write_pretty(doc, doc.get(id).children[i], depth, out);
            }
        },
        NodeKind::Element(data) => {
            push_indent(out, depth);
            write_open_tag(doc, id, out);
            let children = &doc.get(id).children;
            if children.is_empty() {
                out.push_str("/>\n");
            } else if has_block_child(doc, id) {
                out.push_str(">\n");
                for i in 0..children.len() {
                    write_pretty(doc, doc.get(id).children[i], depth + 1, out);
                }
                push_indent(out, depth);
                out.push_str("</");
                out.push_str(&data.tag);
                out.push_str(">\n");
            } else {
                // inline content stays on one line
                out.push('>');
                for i in 0..children.len() {
                    write_compact(doc, doc.get(id).children[i], out);
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push_str(">\n");
            }
        },
        // reached only for text mixed into block content
        NodeKind::Text(s) => {
            push_indent(out, depth);
            out.push_str(&escape_text(s.trim()));
            out.push('\n');
        },
        NodeKind::Comment(s) => {
            push_indent(out, depth);
            out.push_str("<!--");
            out.push_str(s);
            out.push_str("-->\n");
        },
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
