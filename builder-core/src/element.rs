//! Canvas elements - the building blocks of a page design.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest width or height an element may have, in canvas pixels.
pub const MIN_ELEMENT_SIZE: f32 = 20.0;

/// Flat bag of visual properties (colors, typography, spacing, borders...).
///
/// Keys use the camelCase CSS property names the host UI edits
/// (`backgroundColor`, `fontSize`, `zIndex`, ...).
pub type StyleMap = BTreeMap<String, String>;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an element ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type tag of an element.
///
/// The set is closed for the built-in kinds but tolerant of unknown tags:
/// anything unrecognised round-trips through [`ElementType::Other`] so a
/// document written by a newer editor still loads and renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Paragraph text.
    Text,
    /// Section heading.
    Heading,
    /// Clickable button.
    Button,
    /// Inline hyperlink.
    Link,
    /// Static image.
    Image,
    /// Embedded video.
    Video,
    /// Bulleted list.
    List,
    /// Block quote.
    Quote,
    /// Horizontal rule.
    Divider,
    /// Empty vertical space.
    Spacer,
    /// Single glyph icon.
    Icon,
    /// Plain styled box.
    Container,
    /// Hero section block.
    Hero,
    /// Navigation bar block.
    Navigation,
    /// Page footer block.
    Footer,
    /// Content card block.
    Card,
    /// Call-to-action banner block.
    CallToAction,
    /// Customer testimonial block.
    Testimonial,
    /// Pricing plan card block.
    PricingCard,
    /// Image carousel block.
    ImageSlider,
    /// A tag this build does not know about.
    Other(String),
}

impl ElementType {
    /// Every built-in element type, primitives first.
    pub const BUILTIN: [ElementType; 20] = [
        Self::Text,
        Self::Heading,
        Self::Button,
        Self::Link,
        Self::Image,
        Self::Video,
        Self::List,
        Self::Quote,
        Self::Divider,
        Self::Spacer,
        Self::Icon,
        Self::Container,
        Self::Hero,
        Self::Navigation,
        Self::Footer,
        Self::Card,
        Self::CallToAction,
        Self::Testimonial,
        Self::PricingCard,
        Self::ImageSlider,
    ];

    /// The serialized tag, e.g. `"pricing-card"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Button => "button",
            Self::Link => "link",
            Self::Image => "image",
            Self::Video => "video",
            Self::List => "list",
            Self::Quote => "quote",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
            Self::Icon => "icon",
            Self::Container => "container",
            Self::Hero => "hero",
            Self::Navigation => "navigation",
            Self::Footer => "footer",
            Self::Card => "card",
            Self::CallToAction => "call-to-action",
            Self::Testimonial => "testimonial",
            Self::PricingCard => "pricing-card",
            Self::ImageSlider => "image-slider",
            Self::Other(tag) => tag,
        }
    }

    /// Whether the content of this type is a structured configuration.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::Hero
                | Self::Navigation
                | Self::Footer
                | Self::Card
                | Self::CallToAction
                | Self::Testimonial
                | Self::PricingCard
                | Self::ImageSlider
        )
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "heading" => Self::Heading,
            "button" => Self::Button,
            "link" => Self::Link,
            "image" => Self::Image,
            "video" => Self::Video,
            "list" => Self::List,
            "quote" => Self::Quote,
            "divider" => Self::Divider,
            "spacer" => Self::Spacer,
            "icon" => Self::Icon,
            "container" => Self::Container,
            "hero" => Self::Hero,
            "navigation" => Self::Navigation,
            "footer" => Self::Footer,
            "card" => Self::Card,
            "call-to-action" | "cta" => Self::CallToAction,
            "testimonial" => Self::Testimonial,
            "pricing-card" | "pricing" => Self::PricingCard,
            "image-slider" | "slider" => Self::ImageSlider,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<ElementType> for String {
    fn from(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-left corner of an element in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the left edge of the canvas.
    pub x: f32,
    /// Pixels from the top edge of the canvas.
    pub y: f32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This position with both coordinates floored at zero.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }

    /// This position moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height of an element in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// This size with both axes floored at [`MIN_ELEMENT_SIZE`].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(MIN_ELEMENT_SIZE),
            height: self.height.max(MIN_ELEMENT_SIZE),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(200.0, 100.0)
    }
}

/// A page element with content, styling and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Type tag selecting defaults, editor fields and renderer.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Raw text/URL for primitives, JSON configuration for composites.
    #[serde(default)]
    pub content: String,
    /// Size-independent visual properties.
    #[serde(default)]
    pub styles: StyleMap,
    /// Top-left corner.
    pub position: Position,
    /// Width and height.
    pub size: Size,
    /// Items of a `list` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
    /// Link target for buttons, links and icons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Alternative text for media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Nested elements owned by this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element of the given type at the origin.
    #[must_use]
    pub fn new(element_type: ElementType) -> Self {
        Self {
            id: ElementId::new(),
            element_type,
            content: String::new(),
            styles: StyleMap::new(),
            position: Position::default(),
            size: Size::default(),
            list_items: None,
            link: None,
            alt: None,
            children: Vec::new(),
        }
    }

    /// Set the position (floored at zero).
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position.clamped();
        self
    }

    /// Set the size (floored at [`MIN_ELEMENT_SIZE`]).
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size.clamped();
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set one style property.
    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let p = self.position;
        x >= p.x && x <= p.x + self.size.width && y >= p.y && y <= p.y + self.size.height
    }

    /// Deep copy with fresh ids for this element and all descendants.
    #[must_use]
    pub fn deep_clone_with_new_ids(&self) -> Self {
        let mut copy = self.clone();
        copy.reassign_ids();
        copy
    }

    fn reassign_ids(&mut self) {
        self.id = ElementId::new();
        for child in &mut self.children {
            child.reassign_ids();
        }
    }

    /// Whether geometry satisfies the size and position floors.
    #[must_use]
    pub fn has_valid_geometry(&self) -> bool {
        self.position.x >= 0.0
            && self.position.y >= 0.0
            && self.size.width >= MIN_ELEMENT_SIZE
            && self.size.height >= MIN_ELEMENT_SIZE
    }
}

/// A partial update for an element.
///
/// Every present field replaces the element's field wholesale; absent fields
/// are left untouched. `styles` therefore replaces the whole bag: use
/// [`ElementPatch::merge_style`] on top of the current bag to change a
/// single property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New style bag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
    /// New position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// New size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// New list items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
    /// New link target (`Some(None)` clears it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Option<String>>,
    /// New alternative text (`Some(None)` clears it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<Option<String>>,
}

impl ElementPatch {
    /// An empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replace the whole style bag.
    #[must_use]
    pub fn styles(mut self, styles: StyleMap) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Set one style key on top of `current`, replacing the bag with the result.
    #[must_use]
    pub fn merge_style(
        mut self,
        current: &StyleMap,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut styles = self.styles.take().unwrap_or_else(|| current.clone());
        styles.insert(key.into(), value.into());
        self.styles = Some(styles);
        self
    }

    /// Replace the position.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Replace the size.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Replace the list items.
    #[must_use]
    pub fn list_items(mut self, items: Vec<String>) -> Self {
        self.list_items = Some(items);
        self
    }

    /// Replace the link target.
    #[must_use]
    pub fn link(mut self, link: Option<String>) -> Self {
        self.link = Some(link);
        self
    }

    /// Replace the alternative text.
    #[must_use]
    pub fn alt(mut self, alt: Option<String>) -> Self {
        self.alt = Some(alt);
        self
    }

    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch into `element`, clamping geometry to the floors.
    ///
    /// Returns `true` if any field of the element actually changed.
    pub fn apply(&self, element: &mut Element) -> bool {
        let before = element.clone();
        if let Some(content) = &self.content {
            element.content.clone_from(content);
        }
        if let Some(styles) = &self.styles {
            element.styles.clone_from(styles);
        }
        if let Some(position) = self.position {
            element.position = position.clamped();
        }
        if let Some(size) = self.size {
            element.size = size.clamped();
        }
        if let Some(items) = &self.list_items {
            element.list_items = Some(items.clone());
        }
        if let Some(link) = &self.link {
            element.link.clone_from(link);
        }
        if let Some(alt) = &self.alt {
            element.alt.clone_from(alt);
        }
        *element != before
    }
}
