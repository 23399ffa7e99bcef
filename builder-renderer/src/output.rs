//! Visual output tree.
//!
//! Renderers produce [`VNode`] trees rather than strings so hosts can
//! inspect, diff or serialize them. [`VNode::to_html`] turns a tree into
//! markup with all text and attribute values escaped.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Elements that never have children or a closing tag.
const VOID_TAGS: [&str; 6] = ["img", "hr", "br", "input", "source", "meta"];

/// A node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum VNode {
    /// An HTML element.
    Element(VElement),
    /// Literal text.
    Text {
        /// Unescaped text.
        text: String,
    },
}

/// An HTML element with attributes, inline style and children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VElement {
    /// Tag name.
    pub tag: String,
    /// Attributes in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    /// CSS declarations in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<(String, String)>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VNode>,
}

impl VNode {
    /// Start an element with the given tag.
    #[must_use]
    pub fn el(tag: &str) -> Self {
        Self::Element(VElement {
            tag: tag.to_string(),
            ..VElement::default()
        })
    }

    /// A text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Set an attribute, replacing an earlier value for the same name.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Self::Element(element) = &mut self {
            let value = value.into();
            match element.attrs.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = value,
                None => element.attrs.push((name.to_string(), value)),
            }
        }
        self
    }

    /// Append to the `class` attribute.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        if let Self::Element(element) = &mut self {
            match element.attrs.iter_mut().find(|(n, _)| n == "class") {
                Some(slot) => {
                    slot.1.push(' ');
                    slot.1.push_str(class);
                }
                None => element.attrs.push(("class".to_string(), class.to_string())),
            }
        }
        self
    }

    /// Set one CSS declaration, replacing an earlier value for the property.
    #[must_use]
    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        if let Self::Element(element) = &mut self {
            let value = value.into();
            match element.style.iter_mut().find(|(p, _)| p == property) {
                Some(slot) => slot.1 = value,
                None => element.style.push((property.to_string(), value)),
            }
        }
        self
    }

    /// Set several CSS declarations.
    #[must_use]
    pub fn styles<I>(self, declarations: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        declarations
            .into_iter()
            .fold(self, |node, (property, value)| node.style(&property, value))
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: VNode) -> Self {
        if let Self::Element(element) = &mut self {
            element.children.push(child);
        }
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = VNode>,
    {
        if let Self::Element(element) = &mut self {
            element.children.extend(children);
        }
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Self::text(text))
    }

    /// Tag name, or `None` for text.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element(element) => Some(&element.tag),
            Self::Text { .. } => None,
        }
    }

    /// Value of an attribute.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element(element) => element
                .attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            Self::Text { .. } => None,
        }
    }

    /// Value of a CSS declaration.
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        match self {
            Self::Element(element) => element
                .style
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.as_str()),
            Self::Text { .. } => None,
        }
    }

    /// Child nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[VNode] {
        match self {
            Self::Element(element) => &element.children,
            Self::Text { .. } => &[],
        }
    }

    /// All text in the tree, concatenated with single spaces.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        match self {
            Self::Text { text } => {
                if !text.trim().is_empty() {
                    parts.push(text.trim());
                }
            }
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(parts);
                }
            }
        }
    }

    /// Depth-first search for the first element with `tag`.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&VNode> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.child_nodes().iter().find_map(|child| child.find(tag))
    }

    /// Serialize to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(&escape_html(text)),
            Self::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
                }
                if !element.style.is_empty() {
                    let css: Vec<String> = element
                        .style
                        .iter()
                        .map(|(p, v)| format!("{p}: {v}"))
                        .collect();
                    let _ = write!(out, " style=\"{}\"", escape_html(&css.join("; ")));
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Escape text for use in HTML content and quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
