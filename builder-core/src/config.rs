//! Tunable parameters of an editing session.

use serde::{Deserialize, Serialize};

use crate::element::Position;
use crate::error::BuilderResult;

/// Default number of snapshots kept by the undo history.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default distance (in canvas pixels) at which a resize handle is hit.
pub const DEFAULT_HANDLE_TOLERANCE: f32 = 8.0;

/// A displacement on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal displacement.
    pub dx: f32,
    /// Vertical displacement.
    pub dy: f32,
}

impl Offset {
    /// Create an offset.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    fn normalized(self) -> Self {
        let axis = |d: f32| if d.is_finite() { d.abs() } else { 0.0 };
        let (dx, dy) = (axis(self.dx), axis(self.dy));
        if dx > 0.0 || dy > 0.0 {
            Self { dx, dy }
        } else {
            BuilderConfig::default().duplicate_offset
        }
    }
}

/// Configuration for a [`Session`](crate::Session).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Maximum number of undo snapshots, including the current one.
    pub history_limit: usize,
    /// How far a duplicate is moved from its source.
    pub duplicate_offset: Offset,
    /// Where newly added elements are placed.
    pub drop_point: Position,
    /// Hit radius around resize handles.
    pub handle_tolerance: f32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            duplicate_offset: Offset::new(20.0, 20.0),
            drop_point: Position::new(100.0, 200.0),
            handle_tolerance: DEFAULT_HANDLE_TOLERANCE,
        }
    }
}

impl BuilderConfig {
    /// Parse a configuration from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value has the wrong type.
    pub fn from_json(json: &str) -> BuilderResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// This configuration with out-of-range values pulled back into range.
    ///
    /// The history keeps at least one snapshot, the drop point stays on the
    /// canvas and the handle tolerance is non-negative. The duplicate offset
    /// points down and right and is non-zero on at least one axis, so a copy
    /// never lands exactly on its source, even at the canvas origin.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.history_limit = self.history_limit.max(1);
        self.duplicate_offset = self.duplicate_offset.normalized();
        self.drop_point = self.drop_point.clamped();
        self.handle_tolerance = self.handle_tolerance.max(0.0);
        self
    }
}
