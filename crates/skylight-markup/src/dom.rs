//! Arena-based DOM tree.
//!
//! Nodes are stored in a flat `Vec` arena and linked by index. This avoids
//! reference-counting overhead and makes tree walks cache-friendly. Tag
//! names are plain lowercase strings; XHTML is case-sensitive and the
//! generator only ever emits lowercase.

/// Index into the [`Document`]'s node arena.
pub type NodeId = usize;

// ------------------------------------------------------------------
// Node types
// ------------------------------------------------------------------

/// The root of a parsed or generated document.
#[derive(Debug, Clone)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub root: NodeId,
    /// Raw doctype text (without `<!DOCTYPE` and `>`), if the document
    /// declared one. Re-emitted verbatim by the serializer.
    pub doctype: Option<String>,
}

/// A single node in the DOM tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The kind of DOM node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Data associated with an Element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<Attribute>,
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

// ------------------------------------------------------------------
// Tag classification
// ------------------------------------------------------------------

/// Returns `true` for XHTML void elements (no content, serialized as
/// `<tag/>`).
pub fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "hr" | "img" | "input" | "link" | "meta" | "param"
    )
}

/// Returns `true` for elements the pretty printer places on a line of
/// their own. Inline content (`a`, `span`, `img`, text) stays on the
/// parent's line.
pub fn is_block_level(tag: &str) -> bool {
    matches!(
        tag,
        "html"
            | "head"
            | "body"
            | "title"
            | "meta"
            | "link"
            | "style"
            | "script"
            | "div"
            | "p"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "table"
            | "thead"
            | "tbody"
            | "tfoot"
            | "tr"
            | "td"
            | "th"
            | "caption"
            | "form"
            | "blockquote"
            | "pre"
            | "hr"
    )
}

// ------------------------------------------------------------------
// ElementData
// ------------------------------------------------------------------

impl ElementData {
    /// Create a new `ElementData` with the given tag and no attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Get an attribute value by name (exact match).
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if this element has a given CSS class.
    ///
    /// The `class` attribute value is split on ASCII whitespace and each
    /// token is compared to `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Get the `id` attribute if present.
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Get the `href` attribute if present (for links).
    pub fn href(&self) -> Option<&str> {
        self.get_attribute("href")
    }

    /// Get the `src` attribute if present (for images).
    pub fn src(&self) -> Option<&str> {
        self.get_attribute("src")
    }
}

// ------------------------------------------------------------------
// Document
// ------------------------------------------------------------------

impl Document {
    /// Create an empty document with a synthetic `Document` root node.
    pub fn new() -> Self {
        let root_node = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: 0,
            doctype: None,
        }
    }

    /// Add a new node to the arena and return its [`NodeId`].
    ///
    /// The node starts unattached; link it with [`Document::append_child`].
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create an unattached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.add_node(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create an unattached element node with attributes.
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut data = ElementData::new(tag);
        for (name, value) in attrs {
            data.attributes.push(Attribute {
                name: (*name).to_string(),
                value: (*value).to_string(),
            });
        }
        self.add_node(NodeKind::Element(data))
    }

    /// Create an unattached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.add_node(NodeKind::Text(text.to_string()))
    }

    /// Append `child_id` as the last child of `parent_id`.
    ///
    /// Updates both the parent's child list and the child's parent link.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        self.nodes[parent_id].children.push(child_id);
        self.nodes[child_id].parent = Some(parent_id);
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Get the [`ElementData`] for a node, if it is an `Element`.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Deep-copy a node and its subtree from another document into this
    /// arena. The copy is returned unattached; link it with
    /// [`Document::append_child`].
    pub fn adopt(&mut self, src: &Document, src_id: NodeId) -> NodeId {
        let id = self.add_node(src.get(src_id).kind.clone());
        for i in 0..src.get(src_id).children.len() {
            let src_child = src.get(src_id).children[i];
            let child = self.adopt(src, src_child);
            self.append_child(id, child);
        }
        id
    }

    /// Get the concatenated text content of a node and all its
    /// descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(s) => out.push_str(s),
            _ => {
                for i in 0..self.nodes[id].children.len() {
                    let child = self.nodes[id].children[i];
                    self.collect_text(child, out);
                }
            },
        }
    }

    /// Find the first element whose `id` attribute matches `target`.
    pub fn get_element_by_id(&self, target: &str) -> Option<NodeId> {
        self.find_node(self.root, &|data| data.id() == Some(target))
    }

    /// Depth-first search for the first element with the given tag.
    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.find_node(self.root, &|data| data.tag == tag)
    }

    /// Depth-first search for the first element with the given tag and
    /// CSS class.
    pub fn find_by_class(&self, tag: &str, class: &str) -> Option<NodeId> {
        self.find_node(self.root, &|data| data.tag == tag && data.has_class(class))
    }

    /// Collect every element with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_nodes(self.root, tag, &mut out);
        out
    }

    fn find_node(&self, node_id: NodeId, pred: &dyn Fn(&ElementData) -> bool) -> Option<NodeId> {
        if let NodeKind::Element(ref data) = self.nodes[node_id].kind
            && pred(data)
        {
            return Some(node_id);
        }
        for i in 0..self.nodes[node_id].children.len() {
            let child = self.nodes[node_id].children[i];
            if let Some(found) = self.find_node(child, pred) {
                return Some(found);
            }
        }
        None
    }

    fn collect_nodes(&self, node_id: NodeId, tag: &str, out: &mut Vec<NodeId>) {
        if let NodeKind::Element(ref data) = self.nodes[node_id].kind
            && data.tag == tag
        {
            out.push(node_id);
        }
        for i in 0..self.nodes[node_id].children.len() {
            let child = self.nodes[node_id].children[i];
            self.collect_nodes(child, tag, out);
        }
    }

    /// Find the `<body>` element.
    pub fn body(&self) -> Option<NodeId> {
        self.find_first("body")
    }

    /// Find the `<head>` element.
    pub fn head(&self) -> Option<NodeId> {
        self.find_first("head")
    }

    /// Find the `<title>` text content, if any.
    pub fn title(&self) -> Option<String> {
        let title_id = self.find_first("title")?;
        let text = self.text_content(title_id);
        if text.is_empty() { None } else { Some(text) }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_document_with_nodes() {
        let mut doc = Document::new();
        assert_eq!(doc.nodes.len(), 1); // root Document node

        let div_id = doc.create_element("div");
        assert_eq!(div_id, 1);
        doc.append_child(doc.root, div_id);
        assert_eq!(doc.get(doc.root).children, vec![div_id]);
    }

    #[test]
    fn parent_child_links() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("p");
        doc.append_child(doc.root, parent);
        doc.append_child(parent, child);

        assert_eq!(doc.get(child).parent, Some(parent));
        assert_eq!(doc.get(parent).children, vec![child]);
        assert_eq!(doc.get(doc.root).children, vec![parent]);
    }

    #[test]
    fn is_void_correctness() {
        assert!(is_void("br"));
        assert!(is_void("hr"));
        assert!(is_void("img"));
        assert!(is_void("link"));
        assert!(is_void("meta"));

        assert!(!is_void("div"));
        assert!(!is_void("a"));
        assert!(!is_void("table"));
    }

    #[test]
    fn is_block_level_correctness() {
        assert!(is_block_level("div"));
        assert!(is_block_level("p"));
        assert!(is_block_level("h1"));
        assert!(is_block_level("table"));
        assert!(is_block_level("td"));

        assert!(!is_block_level("span"));
        assert!(!is_block_level("a"));
        assert!(!is_block_level("img"));
        assert!(!is_block_level("br"));
    }

    #[test]
    fn element_data_attributes() {
        let mut elem = ElementData::new("a");
        elem.attributes.push(Attribute {
            name: "href".into(),
            value: "photo.xhtml".into(),
        });
        elem.attributes.push(Attribute {
            name: "class".into(),
            value: "exif disabled".into(),
        });
        elem.attributes.push(Attribute {
            name: "id".into(),
            value: "my-link".into(),
        });

        assert_eq!(elem.get_attribute("href"), Some("photo.xhtml"));
        assert_eq!(elem.href(), Some("photo.xhtml"));
        assert_eq!(elem.id(), Some("my-link"));
        assert!(elem.has_class("exif"));
        assert!(elem.has_class("disabled"));
        assert!(!elem.has_class("photo"));
        assert_eq!(elem.get_attribute("missing"), None);
    }

    #[test]
    fn element_data_src() {
        let mut elem = ElementData::new("img");
        elem.attributes.push(Attribute {
            name: "src".into(),
            value: "dc0042.thumb.jpg".into(),
        });
        assert_eq!(elem.src(), Some("dc0042.thumb.jpg"));
    }

    #[test]
    fn create_element_with_attrs() {
        let mut doc = Document::new();
        let a = doc.create_element_with("a", &[("href", "index.xhtml"), ("class", "parent")]);
        let data = doc.element(a).unwrap();
        assert_eq!(data.href(), Some("index.xhtml"));
        assert!(data.has_class("parent"));
    }

    #[test]
    fn text_content_traversal() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_child(doc.root, p);

        let t1 = doc.create_text("Hello ");
        doc.append_child(p, t1);

        let b = doc.create_element("b");
        doc.append_child(p, b);

        let t2 = doc.create_text("world");
        doc.append_child(b, t2);

        assert_eq!(doc.text_content(p), "Hello world");
        assert_eq!(doc.text_content(b), "world");
    }

    #[test]
    fn get_element_by_id_found() {
        let mut doc = Document::new();
        let div_id = doc.create_element_with("div", &[("id", "body")]);
        doc.append_child(doc.root, div_id);

        assert_eq!(doc.get_element_by_id("body"), Some(div_id));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn find_first_and_all() {
        let mut doc = Document::new();
        let table = doc.create_element("table");
        doc.append_child(doc.root, table);
        let tr = doc.create_element("tr");
        doc.append_child(table, tr);
        let td1 = doc.create_element("td");
        let td2 = doc.create_element("td");
        doc.append_child(tr, td1);
        doc.append_child(tr, td2);

        assert_eq!(doc.find_first("table"), Some(table));
        assert_eq!(doc.find_first("td"), Some(td1));
        assert_eq!(doc.find_all("td"), vec![td1, td2]);
        assert!(doc.find_all("img").is_empty());
    }

    #[test]
    fn find_by_class_matches_tag_and_class() {
        let mut doc = Document::new();
        let plain = doc.create_element("div");
        doc.append_child(doc.root, plain);
        let photo = doc.create_element_with("div", &[("class", "photo")]);
        doc.append_child(doc.root, photo);
        let span = doc.create_element_with("span", &[("class", "photo")]);
        doc.append_child(doc.root, span);

        assert_eq!(doc.find_by_class("div", "photo"), Some(photo));
        assert_eq!(doc.find_by_class("span", "photo"), Some(span));
        assert_eq!(doc.find_by_class("div", "albums"), None);
    }

    #[test]
    fn adopt_copies_subtree() {
        let mut src = Document::new();
        let table = src.create_element_with("table", &[("class", "exif")]);
        src.append_child(src.root, table);
        let tr = src.create_element("tr");
        src.append_child(table, tr);
        let td = src.create_element("td");
        src.append_child(tr, td);
        let text = src.create_text("1/250 s");
        src.append_child(td, text);

        let mut dst = Document::new();
        let container = dst.create_element_with("div", &[("class", "photo")]);
        dst.append_child(dst.root, container);

        let copy = dst.adopt(&src, table);
        dst.append_child(container, copy);

        assert_eq!(dst.get(copy).parent, Some(container));
        assert_eq!(dst.find_first("table"), Some(copy));
        assert_eq!(dst.text_content(copy), "1/250 s");
        // the source document is untouched
        assert_eq!(src.text_content(table), "1/250 s");
        assert_eq!(src.get(table).parent, Some(src.root));
    }

    #[test]
    fn body_head_and_title_lookup() {
        let mut doc = Document::new();
        let html = doc.create_element("html");
        doc.append_child(doc.root, html);

        let head = doc.create_element("head");
        doc.append_child(html, head);

        let title = doc.create_element("title");
        doc.append_child(head, title);
        let text = doc.create_text("Gallery - Album");
        doc.append_child(title, text);

        let body = doc.create_element("body");
        doc.append_child(html, body);

        assert_eq!(doc.head(), Some(head));
        assert_eq!(doc.body(), Some(body));
        assert_eq!(doc.title(), Some("Gallery - Album".into()));
    }

    #[test]
    fn title_missing_returns_none() {
        let doc = Document::new();
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn default_impl() {
        let doc = Document::default();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.root, 0);
        assert!(doc.doctype.is_none());
    }
}
