//! Serialized form of a saved design.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "elements": [ { "id": "…", "type": "button", "content": "Click Me", … } ],
//!   "viewportClass": "desktop",
//!   "savedAt": 1760000000000
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{BuilderError, BuilderResult};

/// Version written into new documents.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Display class chosen by the viewport host.
///
/// Only the preview width changes; element coordinates are absolute and
/// are not reflowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Full-width desktop canvas.
    #[default]
    Desktop,
    /// Tablet preview.
    Tablet,
    /// Phone preview.
    Mobile,
}

impl ViewportClass {
    /// Every class, widest first.
    pub const ALL: [ViewportClass; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Display width of the canvas in pixels.
    #[must_use]
    pub const fn width(self) -> f32 {
        match self {
            Self::Desktop => 1280.0,
            Self::Tablet => 768.0,
            Self::Mobile => 375.0,
        }
    }

    /// Lowercase name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewportClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "tablet" => Ok(Self::Tablet),
            "mobile" | "phone" => Ok(Self::Mobile),
            other => Err(format!(
                "unknown viewport class '{other}' (expected desktop, tablet or mobile)"
            )),
        }
    }
}

/// A saved design: the element collection plus viewport metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    /// Schema version.
    #[serde(default = "DesignDocument::default_version")]
    pub version: String,
    /// Elements in paint order.
    pub elements: Vec<Element>,
    /// Viewport class the design was last edited in.
    #[serde(default)]
    pub viewport_class: ViewportClass,
    /// Save time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub saved_at: u64,
}

impl DesignDocument {
    fn default_version() -> String {
        DOCUMENT_VERSION.to_string()
    }

    /// Build a document stamped with the current time.
    #[must_use]
    pub fn new(elements: Vec<Element>, viewport_class: ViewportClass) -> Self {
        Self {
            version: Self::default_version(),
            elements,
            viewport_class,
            saved_at: current_timestamp_ms(),
        }
    }

    /// Parse and validate a document.
    ///
    /// Geometry below the floors is clamped; everything else must already
    /// be well formed.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the version is not `1.x`,
    /// or two elements share an id.
    pub fn from_json(json: &str) -> BuilderResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validated()
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> BuilderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BuilderResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the version and id uniqueness, clamping geometry.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::UnsupportedVersion`] or
    /// [`BuilderError::InvalidDocument`].
    pub fn validated(mut self) -> BuilderResult<Self> {
        let major = self.version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(BuilderError::UnsupportedVersion(self.version));
        }

        let mut seen = HashSet::new();
        let mut stack: Vec<&Element> = self.elements.iter().collect();
        while let Some(element) = stack.pop() {
            if !seen.insert(element.id) {
                return Err(BuilderError::InvalidDocument(format!(
                    "duplicate element id {}",
                    element.id
                )));
            }
            stack.extend(element.children.iter());
        }

        for element in &mut self.elements {
            clamp_geometry(element);
        }
        Ok(self)
    }
}

fn clamp_geometry(element: &mut Element) {
    element.position = element.position.clamped();
    element.size = element.size.clamped();
    for child in &mut element.children {
        clamp_geometry(child);
    }
}

/// Get the current Unix timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}
