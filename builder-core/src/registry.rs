//! Element registry: per-type defaults and property-editor fields.
//!
//! Everything type-specific that the store, the session and the editor
//! panel need is looked up here, so adding an element kind means adding an
//! entry rather than touching every consumer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::blocks;
use crate::element::{ElementType, Size, StyleMap};

/// Starting values for a freshly added element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefaults {
    /// Initial content.
    pub content: String,
    /// Initial style bag.
    pub styles: StyleMap,
    /// Initial size.
    pub size: Size,
    /// Initial list items (list elements only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
    /// Initial link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Initial alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ElementDefaults {
    /// Defaults with the given content and size, no styles.
    #[must_use]
    pub fn new(content: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            content: content.into(),
            styles: StyleMap::new(),
            size: Size::new(width, height),
            list_items: None,
            link: None,
            alt: None,
        }
    }

    /// Add a style property.
    #[must_use]
    pub fn style(mut self, key: &str, value: &str) -> Self {
        self.styles.insert(key.to_string(), value.to_string());
        self
    }

    /// Set the list items.
    #[must_use]
    pub fn list_items(mut self, items: &[&str]) -> Self {
        self.list_items = Some(items.iter().map(ToString::to_string).collect());
        self
    }

    /// Set the link target.
    #[must_use]
    pub fn link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    /// Set the alternative text.
    #[must_use]
    pub fn alt(mut self, alt: &str) -> Self {
        self.alt = Some(alt.to_string());
        self
    }
}

/// Input widget the property editor should show for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// URL input.
    Url,
    /// Color picker.
    Color,
    /// Numeric input.
    Number,
    /// Checkbox.
    Toggle,
    /// One entry per line.
    Lines,
    /// Drop-down with fixed options.
    Select(Vec<String>),
}

/// Which part of an element a field edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldTarget {
    /// [`Element::content`](crate::Element::content).
    Content,
    /// One key of the style bag.
    Style(String),
    /// The link target.
    Link,
    /// The alternative text.
    Alt,
    /// The list items.
    ListItems,
    /// One key of a composite configuration.
    Config(String),
}

impl FieldTarget {
    /// Short key naming the edited property, e.g. `fontSize` or `title`.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Content => "content",
            Self::Style(key) | Self::Config(key) => key,
            Self::Link => "link",
            Self::Alt => "alt",
            Self::ListItems => "listItems",
        }
    }
}

/// A property-editor field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyField {
    /// Key of the edited property.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Input widget.
    pub kind: FieldKind,
    /// Edited property.
    pub target: FieldTarget,
}

impl PropertyField {
    /// Create a field.
    #[must_use]
    pub fn new(label: &str, kind: FieldKind, target: FieldTarget) -> Self {
        Self {
            key: target.key().to_string(),
            label: label.to_string(),
            kind,
            target,
        }
    }

    /// A field editing one style key.
    #[must_use]
    pub fn style(label: &str, key: &str, kind: FieldKind) -> Self {
        Self::new(label, kind, FieldTarget::Style(key.to_string()))
    }

    /// A field editing one composite configuration key.
    #[must_use]
    pub fn config(label: &str, key: &str, kind: FieldKind) -> Self {
        Self::new(label, kind, FieldTarget::Config(key.to_string()))
    }
}

/// Everything the registry knows about one element type.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    /// Type this entry describes.
    pub element_type: ElementType,
    /// Name shown in the element palette.
    pub label: String,
    /// Palette group, e.g. `Basic` or `Blocks`.
    pub category: String,
    /// Defaults for new elements.
    pub defaults: ElementDefaults,
    /// Property-editor fields.
    pub fields: Vec<PropertyField>,
    /// Full default configuration for composites.
    pub config_defaults: Option<serde_json::Value>,
}

impl RegistryEntry {
    /// Create an entry; composite configuration defaults are filled in from
    /// [`blocks::default_config`].
    #[must_use]
    pub fn new(
        element_type: ElementType,
        label: &str,
        category: &str,
        defaults: ElementDefaults,
        fields: Vec<PropertyField>,
    ) -> Self {
        let config_defaults = blocks::default_config(&element_type);
        Self {
            element_type,
            label: label.to_string(),
            category: category.to_string(),
            defaults,
            fields,
            config_defaults,
        }
    }
}

/// Lookup table from element type to [`RegistryEntry`].
#[derive(Debug, Clone)]
pub struct Registry {
    entries: HashMap<ElementType, RegistryEntry>,
    order: Vec<ElementType>,
    fallback: RegistryEntry,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// A registry with no entries; every lookup hits the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            fallback: RegistryEntry::new(
                ElementType::Other(String::new()),
                "Element",
                "Other",
                ElementDefaults::new("", 200.0, 100.0),
                effect_fields(),
            ),
        }
    }

    /// The registry with all built-in element types.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for entry in builtin_entries() {
            registry.register(entry);
        }
        registry
    }

    /// Add or replace an entry.
    pub fn register(&mut self, entry: RegistryEntry) {
        let element_type = entry.element_type.clone();
        if !self.entries.contains_key(&element_type) {
            self.order.push(element_type.clone());
        }
        self.entries.insert(element_type, entry);
    }

    /// Entry for a type, if registered.
    #[must_use]
    pub fn get(&self, element_type: &ElementType) -> Option<&RegistryEntry> {
        self.entries.get(element_type)
    }

    /// Whether the type has an entry.
    #[must_use]
    pub fn contains(&self, element_type: &ElementType) -> bool {
        self.entries.contains_key(element_type)
    }

    /// Defaults for a new element of `element_type`.
    ///
    /// Unregistered types get a generic 200x100 box.
    #[must_use]
    pub fn defaults(&self, element_type: &ElementType) -> ElementDefaults {
        self.entry_or_fallback(element_type).defaults.clone()
    }

    /// Property-editor fields for `element_type`.
    #[must_use]
    pub fn fields(&self, element_type: &ElementType) -> &[PropertyField] {
        &self.entry_or_fallback(element_type).fields
    }

    /// Full default configuration for a composite type.
    #[must_use]
    pub fn config_defaults(&self, element_type: &ElementType) -> Option<&serde_json::Value> {
        self.entry_or_fallback(element_type).config_defaults.as_ref()
    }

    /// Registered types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &ElementType> {
        self.order.iter()
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.order.iter().filter_map(|ty| self.entries.get(ty))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_or_fallback(&self, element_type: &ElementType) -> &RegistryEntry {
        self.entries.get(element_type).unwrap_or(&self.fallback)
    }
}

// ---------------------------------------------------------------------------
// Built-in entries
// ---------------------------------------------------------------------------

fn text_fields() -> Vec<PropertyField> {
    vec![
        PropertyField::style("Text Color", "color", FieldKind::Color),
        PropertyField::style("Font Size", "fontSize", FieldKind::Text),
        PropertyField::style(
            "Font Weight",
            "fontWeight",
            select(&["normal", "500", "600", "bold"]),
        ),
        PropertyField::style(
            "Text Align",
            "textAlign",
            select(&["left", "center", "right", "justify"]),
        ),
        PropertyField::style("Line Height", "lineHeight", FieldKind::Text),
    ]
}

fn box_fields() -> Vec<PropertyField> {
    vec![
        PropertyField::style("Background", "backgroundColor", FieldKind::Color),
        PropertyField::style("Padding", "padding", FieldKind::Text),
        PropertyField::style("Border", "border", FieldKind::Text),
        PropertyField::style("Border Radius", "borderRadius", FieldKind::Text),
    ]
}

fn effect_fields() -> Vec<PropertyField> {
    vec![
        PropertyField::style("Opacity", "opacity", FieldKind::Number),
        PropertyField::style("Shadow", "boxShadow", FieldKind::Text),
        PropertyField::style("Layer", "zIndex", FieldKind::Number),
    ]
}

fn select(options: &[&str]) -> FieldKind {
    FieldKind::Select(options.iter().map(ToString::to_string).collect())
}

fn fields(groups: Vec<Vec<PropertyField>>) -> Vec<PropertyField> {
    groups.into_iter().flatten().collect()
}

fn content_field(label: &str, kind: FieldKind) -> PropertyField {
    PropertyField::new(label, kind, FieldTarget::Content)
}

#[allow(clippy::too_many_lines)]
fn builtin_entries() -> Vec<RegistryEntry> {
    use ElementType as T;

    let basic = "Basic";
    let media = "Media";
    let layout = "Layout";
    let blocks = "Blocks";

    vec![
        RegistryEntry::new(
            T::Text,
            "Text",
            basic,
            ElementDefaults::new("Edit this text", 300.0, 50.0)
                .style("fontSize", "16px")
                .style("color", "#333333"),
            fields(vec![
                vec![content_field("Text", FieldKind::TextArea)],
                text_fields(),
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Heading,
            "Heading",
            basic,
            ElementDefaults::new("Heading", 400.0, 60.0)
                .style("fontSize", "32px")
                .style("fontWeight", "bold")
                .style("color", "#111827"),
            fields(vec![
                vec![content_field("Text", FieldKind::Text)],
                text_fields(),
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Button,
            "Button",
            basic,
            ElementDefaults::new("Click Me", 150.0, 40.0)
                .style("backgroundColor", "#3b82f6")
                .style("color", "#ffffff")
                .style("borderRadius", "6px")
                .style("fontSize", "16px")
                .link("#"),
            fields(vec![
                vec![
                    content_field("Label", FieldKind::Text),
                    PropertyField::new("Link", FieldKind::Url, FieldTarget::Link),
                ],
                text_fields(),
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Link,
            "Link",
            basic,
            ElementDefaults::new("Link text", 120.0, 30.0)
                .style("color", "#3b82f6")
                .style("textDecoration", "underline")
                .link("#"),
            fields(vec![
                vec![
                    content_field("Text", FieldKind::Text),
                    PropertyField::new("URL", FieldKind::Url, FieldTarget::Link),
                ],
                text_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Image,
            "Image",
            media,
            ElementDefaults::new("https://via.placeholder.com/300x200", 300.0, 200.0)
                .style("objectFit", "cover")
                .alt("Image"),
            fields(vec![
                vec![
                    content_field("Image URL", FieldKind::Url),
                    PropertyField::new("Alt Text", FieldKind::Text, FieldTarget::Alt),
                    PropertyField::style(
                        "Fit",
                        "objectFit",
                        select(&["cover", "contain", "fill", "none"]),
                    ),
                ],
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Video,
            "Video",
            media,
            ElementDefaults::new("https://www.example.com/video.mp4", 400.0, 225.0),
            fields(vec![
                vec![content_field("Video URL", FieldKind::Url)],
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::List,
            "List",
            basic,
            ElementDefaults::new("", 250.0, 120.0)
                .style("fontSize", "16px")
                .style("color", "#333333")
                .list_items(&["Item 1", "Item 2", "Item 3"]),
            fields(vec![
                vec![PropertyField::new(
                    "Items",
                    FieldKind::Lines,
                    FieldTarget::ListItems,
                )],
                text_fields(),
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Quote,
            "Quote",
            basic,
            ElementDefaults::new("This is an inspiring quote.", 400.0, 100.0)
                .style("fontStyle", "italic")
                .style("fontSize", "18px")
                .style("color", "#4b5563")
                .style("borderLeft", "4px solid #3b82f6")
                .style("paddingLeft", "16px"),
            fields(vec![
                vec![content_field("Quote", FieldKind::TextArea)],
                text_fields(),
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Divider,
            "Divider",
            layout,
            ElementDefaults::new("", 400.0, 20.0)
                .style("borderColor", "#e5e7eb")
                .style("borderWidth", "1px"),
            fields(vec![
                vec![
                    PropertyField::style("Color", "borderColor", FieldKind::Color),
                    PropertyField::style("Thickness", "borderWidth", FieldKind::Text),
                ],
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Spacer,
            "Spacer",
            layout,
            ElementDefaults::new("", 400.0, 50.0),
            effect_fields(),
        ),
        RegistryEntry::new(
            T::Icon,
            "Icon",
            basic,
            ElementDefaults::new("★", 50.0, 50.0)
                .style("fontSize", "32px")
                .style("color", "#f59e0b"),
            fields(vec![
                vec![
                    content_field("Icon", FieldKind::Text),
                    PropertyField::new("Link", FieldKind::Url, FieldTarget::Link),
                ],
                text_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Container,
            "Container",
            layout,
            ElementDefaults::new("", 400.0, 300.0)
                .style("backgroundColor", "#f3f4f6")
                .style("border", "1px dashed #d1d5db")
                .style("borderRadius", "8px"),
            fields(vec![box_fields(), effect_fields()]),
        ),
        RegistryEntry::new(
            T::Hero,
            "Hero Section",
            blocks,
            ElementDefaults::new("{}", 800.0, 400.0),
            fields(vec![
                vec![
                    PropertyField::config("Title", "title", FieldKind::Text),
                    PropertyField::config("Subtitle", "subtitle", FieldKind::TextArea),
                    PropertyField::config("Button Text", "buttonText", FieldKind::Text),
                    PropertyField::config("Button Link", "buttonLink", FieldKind::Url),
                    PropertyField::config(
                        "Background Image",
                        "backgroundImage",
                        FieldKind::Url,
                    ),
                    PropertyField::config(
                        "Background Color",
                        "backgroundColor",
                        FieldKind::Color,
                    ),
                    PropertyField::config("Text Color", "textColor", FieldKind::Color),
                    PropertyField::config(
                        "Alignment",
                        "alignment",
                        select(&["left", "center", "right"]),
                    ),
                ],
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Navigation,
            "Navigation",
            blocks,
            ElementDefaults::new("{}", 800.0, 64.0),
            fields(vec![
                vec![
                    PropertyField::config("Brand", "brand", FieldKind::Text),
                    PropertyField::config(
                        "Background Color",
                        "backgroundColor",
                        FieldKind::Color,
                    ),
                    PropertyField::config("Text Color", "textColor", FieldKind::Color),
                ],
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Footer,
            "Footer",
            blocks,
            ElementDefaults::new("{}", 800.0, 200.0),
            fields(vec![
                vec![
                    PropertyField::config("Company Name", "companyName", FieldKind::Text),
                    PropertyField::config("Tagline", "tagline", FieldKind::Text),
                    PropertyField::config("Copyright", "copyright", FieldKind::Text),
                    PropertyField::config(
                        "Background Color",
                        "backgroundColor",
                        FieldKind::Color,
                    ),
                    PropertyField::config("Text Color", "textColor", FieldKind::Color),
                ],
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Card,
            "Card",
            blocks,
            ElementDefaults::new("{}", 300.0, 380.0)
                .style("backgroundColor", "#ffffff")
                .style("borderRadius", "8px")
                .style("boxShadow", "0 2px 8px rgba(0,0,0,0.1)"),
            fields(vec![
                vec![
                    PropertyField::config("Title", "title", FieldKind::Text),
                    PropertyField::config("Description", "description", FieldKind::TextArea),
                    PropertyField::config("Image URL", "image", FieldKind::Url),
                    PropertyField::config("Button Text", "buttonText", FieldKind::Text),
                    PropertyField::config("Button Link", "buttonLink", FieldKind::Url),
                ],
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::CallToAction,
            "Call to Action",
            blocks,
            ElementDefaults::new("{}", 800.0, 250.0),
            fields(vec![
                vec![
                    PropertyField::config("Heading", "heading", FieldKind::Text),
                    PropertyField::config("Description", "description", FieldKind::TextArea),
                    PropertyField::config("Button Text", "buttonText", FieldKind::Text),
                    PropertyField::config("Button Link", "buttonLink", FieldKind::Url),
                    PropertyField::config(
                        "Background Color",
                        "backgroundColor",
                        FieldKind::Color,
                    ),
                    PropertyField::config("Text Color", "textColor", FieldKind::Color),
                ],
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::Testimonial,
            "Testimonial",
            blocks,
            ElementDefaults::new("{}", 400.0, 250.0)
                .style("backgroundColor", "#ffffff")
                .style("borderRadius", "8px"),
            fields(vec![
                vec![
                    PropertyField::config("Quote", "quote", FieldKind::TextArea),
                    PropertyField::config("Author", "author", FieldKind::Text),
                    PropertyField::config("Role", "role", FieldKind::Text),
                    PropertyField::config("Avatar URL", "avatar", FieldKind::Url),
                    PropertyField::config("Rating", "rating", FieldKind::Number),
                ],
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::PricingCard,
            "Pricing Card",
            blocks,
            ElementDefaults::new("{}", 300.0, 450.0)
                .style("backgroundColor", "#ffffff")
                .style("borderRadius", "12px"),
            fields(vec![
                vec![
                    PropertyField::config("Plan Name", "planName", FieldKind::Text),
                    PropertyField::config("Price", "price", FieldKind::Text),
                    PropertyField::config("Period", "period", FieldKind::Text),
                    PropertyField::config("Features", "features", FieldKind::Lines),
                    PropertyField::config("Button Text", "buttonText", FieldKind::Text),
                    PropertyField::config("Button Link", "buttonLink", FieldKind::Url),
                    PropertyField::config("Highlighted", "highlighted", FieldKind::Toggle),
                ],
                box_fields(),
                effect_fields(),
            ]),
        ),
        RegistryEntry::new(
            T::ImageSlider,
            "Image Slider",
            blocks,
            ElementDefaults::new("{}", 800.0, 400.0),
            fields(vec![
                vec![
                    PropertyField::config("Autoplay", "autoplay", FieldKind::Toggle),
                    PropertyField::config("Interval (ms)", "intervalMs", FieldKind::Number),
                    PropertyField::config("Show Arrows", "showArrows", FieldKind::Toggle),
                ],
                effect_fields(),
            ]),
        ),
    ]
}
