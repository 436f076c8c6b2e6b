//! The rendered visual tree and its static HTML serialization.

use std::fmt::Write;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "meta", "link"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub styles: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn el(tag: &'static str) -> Self {
        Node::Element(Element {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn class(mut self, class: &'static str) -> Self {
        if let Node::Element(el) = &mut self {
            el.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element(el) = &mut self {
            el.attrs.push((name, value.into()));
        }
        self
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element(el) = &mut self {
            el.styles.push((property, value.into()));
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        if let Node::Element(el) = &mut self {
            el.children.push(child);
        }
        self
    }

    pub fn children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        if let Node::Element(el) = &mut self {
            el.children.extend(children);
        }
        self
    }

    /// Shorthand for an element holding a single text child.
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.child(Node::text(content))
    }

    pub fn has_class(&self, class: &str) -> bool {
        matches!(self, Node::Element(el) if el.classes.iter().any(|c| *c == class))
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(el) => el
                .attrs
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    /// Pre-order traversal: this node, then every descendant.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Node::Element(el) = node {
                stack.extend(el.children.iter().rev());
            }
        }
        out
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Serializes the tree to static HTML markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                if !el.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", el.classes.join(" "));
                }
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                if !el.styles.is_empty() {
                    let css: Vec<String> = el
                        .styles
                        .iter()
                        .map(|(p, v)| format!("{p}:{v}"))
                        .collect();
                    let _ = write!(out, " style=\"{}\"", escape(&css.join(";")));
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
