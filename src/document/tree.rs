use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{PostError, PostResult};

/// SVG element namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Namespace of the `inkscape:label` attribute.
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
/// Namespace of `xlink:href`.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Namespace-aware element or attribute name.
pub struct QName {
    /// Resolved namespace URI.
    pub namespace: Option<String>,
    /// Prefix used when serializing.
    pub prefix: Option<String>,
    /// Local part.
    pub local: String,
}

impl QName {
    /// Name without namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.into(),
        }
    }

    /// Whether this is `{ns}local`.
    pub fn is(&self, ns: Option<&str>, local: &str) -> bool {
        self.namespace.as_deref() == ns && self.local == local
    }

    fn write(&self, out: &mut String) {
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
            out.push(':');
        }
        out.push_str(&self.local);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One attribute, kept in document order.
pub struct Attribute {
    /// Attribute name.
    pub name: QName,
    /// Unescaped value.
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// `xmlns` declaration introduced on an element.
pub struct NamespaceDecl {
    /// `None` for the default namespace.
    pub prefix: Option<String>,
    /// Namespace URI.
    pub uri: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What an element means to the substitution engine.
pub enum NodeRole {
    /// Carries the text of a labelled slot (`tspan`).
    TextSpan,
    /// Raster slot (`image`).
    Image,
    /// Anything else; only searched through.
    Container,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A document node.
pub enum Node {
    /// Element with attributes and children.
    Element(Element),
    /// Character data.
    Text(String),
    /// Comment, preserved on output.
    Comment(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Owned, mutable element.
pub struct Element {
    /// Tag name.
    pub name: QName,
    /// Namespaces declared on this element.
    pub namespaces: Vec<NamespaceDecl>,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Element with no attributes or children.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            namespaces: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Role of this element for substitution.
    pub fn role(&self) -> NodeRole {
        let svg = |local| self.name.is(Some(SVG_NS), local) || self.name.is(None, local);
        if svg("tspan") {
            NodeRole::TextSpan
        } else if svg("image") {
            NodeRole::Image
        } else {
            NodeRole::Container
        }
    }

    /// Value of `{ns}local`.
    pub fn attr(&self, ns: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(ns, local))
            .map(|a| a.value.as_str())
    }

    /// Overwrite an existing `{ns}local`; returns `false` when the attribute is absent.
    pub fn set_attr(&mut self, ns: Option<&str>, local: &str, value: impl Into<String>) -> bool {
        match self.attributes.iter_mut().find(|a| a.name.is(ns, local)) {
            Some(a) => {
                a.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Overwrite `name` or append it.
    pub fn put_attr(&mut self, name: QName, value: impl Into<String>) {
        let value = value.into();
        let ns = name.namespace.clone();
        if !self.set_attr(ns.as_deref(), &name.local, value.clone()) {
            self.attributes.push(Attribute { name, value });
        }
    }

    /// The `inkscape:label` of this element.
    pub fn label(&self) -> Option<&str> {
        self.attr(Some(INKSCAPE_NS), "label")
    }

    /// Text before the first child element.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Replace the text before the first child element.
    pub fn set_text(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.children.first_mut() {
            Some(Node::Text(t)) => *t = value,
            _ => self.children.insert(0, Node::Text(value)),
        }
    }

    /// Child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Mutable child elements in document order.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First element labelled `label`, pre-order, including `self`.
    pub fn find_labelled_mut(&mut self, label: &str) -> Option<&mut Element> {
        if self.label() == Some(label) {
            return Some(self);
        }
        self.child_elements_mut()
            .find_map(|child| child.find_labelled_mut(label))
    }

    /// First element labelled `label`, pre-order, including `self`.
    pub fn find_labelled(&self, label: &str) -> Option<&Element> {
        if self.label() == Some(label) {
            return Some(self);
        }
        self.child_elements()
            .find_map(|child| child.find_labelled(label))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A labelled SVG template loaded for one render.
pub struct TemplateDocument {
    /// Root element.
    pub root: Element,
}

impl TemplateDocument {
    /// Parse SVG text.
    pub fn parse(text: &str) -> PostResult<Self> {
        let mut opts = roxmltree::ParsingOptions::default();
        opts.allow_dtd = true;
        let doc = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| PostError::template(format!("parse svg: {e}")))?;
        Ok(Self {
            root: convert_element(doc.root_element()),
        })
    }

    /// Read and parse an SVG file.
    pub fn load(path: impl AsRef<Path>) -> PostResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PostError::template(format!("read template '{}': {e}", path.display()))
        })?;
        Self::parse(&text)
            .map_err(|e| PostError::template(format!("'{}': {e}", path.display())))
    }

    /// Serialize to UTF-8 XML with a declaration.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        write_element(&mut out, &self.root);
        out.push('\n');
        out
    }

    /// Write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> PostResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_xml())
            .with_context(|| format!("write svg '{}'", path.display()))?;
        Ok(())
    }
}

/// Serialization prefix for `ns`. Elements prefer the default namespace; attributes
/// never use it.
fn prefix_for(node: roxmltree::Node<'_, '_>, ns: Option<&str>, element: bool) -> Option<String> {
    match ns {
        None => None,
        Some(XML_NS) => Some("xml".to_string()),
        Some(uri) if element && node.default_namespace() == Some(uri) => None,
        Some(uri) => node
            .namespaces()
            .filter(|n| n.uri() == uri)
            .find_map(|n| n.name())
            .map(str::to_string),
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let name = QName {
        namespace: tag.namespace().map(str::to_string),
        prefix: prefix_for(node, tag.namespace(), true),
        local: tag.name().to_string(),
    };

    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    let namespaces = node
        .namespaces()
        .filter(|ns| ns.uri() != XML_NS)
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| NamespaceDecl {
            prefix: ns.name().map(str::to_string),
            uri: ns.uri().to_string(),
        })
        .collect();

    let attributes = node
        .attributes()
        .map(|a| Attribute {
            name: QName {
                namespace: a.namespace().map(str::to_string),
                prefix: prefix_for(node, a.namespace(), false),
                local: a.name().to_string(),
            },
            value: a.value().to_string(),
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            children.push(Node::Text(child.text().unwrap_or_default().to_string()));
        } else if child.is_comment() {
            children.push(Node::Comment(child.text().unwrap_or_default().to_string()));
        }
    }

    Element {
        name,
        namespaces,
        attributes,
        children,
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    el.name.write(out);
    for ns in &el.namespaces {
        match &ns.prefix {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        escape_into(out, &ns.uri, true);
        out.push('"');
    }
    for a in &el.attributes {
        out.push(' ');
        a.name.write(out);
        out.push_str("=\"");
        escape_into(out, &a.value, true);
        out.push('"');
    }

    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        match child {
            Node::Element(e) => write_element(out, e),
            Node::Text(t) => escape_into(out, t, false),
            Node::Comment(c) => {
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->");
            }
        }
    }
    out.push_str("</");
    el.name.write(out);
    out.push('>');
}

fn escape_into(out: &mut String, s: &str, attr: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            '\n' if attr => out.push_str("&#10;"),
            '\t' if attr => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
