//! Input events delivered by the host UI.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Pointer capture lost (window blur, touch interrupted).
    Cancel,
}

/// A pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in canvas coordinates.
    pub x: f32,
    /// Y position in canvas coordinates.
    pub y: f32,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }

    /// A press at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, x, y)
    }

    /// A move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    /// A release at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, x, y)
    }

    /// A cancellation.
    #[must_use]
    pub const fn cancel() -> Self {
        Self::new(PointerPhase::Cancel, 0.0, 0.0)
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    #[serde(default)]
    pub shift: bool,
    /// Control key pressed.
    #[serde(default)]
    pub ctrl: bool,
    /// Alt/Option key pressed.
    #[serde(default)]
    pub alt: bool,
    /// Meta/Command key pressed.
    #[serde(default)]
    pub meta: bool,
}

impl KeyModifiers {
    /// Control on most platforms, Command on macOS.
    #[must_use]
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// All input events the session can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Pointer (mouse, pen or primary touch) event.
    Pointer(PointerEvent),

    /// Keyboard event.
    Key {
        /// Key name as reported by the browser (`"z"`, `"Delete"`, ...).
        key: String,
        /// Whether the key is pressed.
        pressed: bool,
        /// Active modifier keys.
        #[serde(default)]
        modifiers: KeyModifiers,
    },
}

impl InputEvent {
    /// A key press with the given modifiers.
    #[must_use]
    pub fn key(key: &str, modifiers: KeyModifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            pressed: true,
            modifiers,
        }
    }

    /// The editor command this event triggers, if any.
    ///
    /// Only key presses map to shortcuts; releases and pointer events
    /// return `None`.
    #[must_use]
    pub fn shortcut(&self) -> Option<Shortcut> {
        let Self::Key {
            key,
            pressed: true,
            modifiers,
        } = self
        else {
            return None;
        };
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "delete" | "backspace" => Some(Shortcut::Delete),
            "escape" | "esc" => Some(Shortcut::Escape),
            "z" if modifiers.command() && modifiers.shift => Some(Shortcut::Redo),
            "z" if modifiers.command() => Some(Shortcut::Undo),
            "y" if modifiers.command() => Some(Shortcut::Redo),
            "d" if modifiers.command() => Some(Shortcut::Duplicate),
            _ => None,
        }
    }
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shortcut {
    /// Delete the selected element.
    Delete,
    /// Undo the last change.
    Undo,
    /// Redo the last undone change.
    Redo,
    /// Duplicate the selected element.
    Duplicate,
    /// Cancel the gesture, or clear the selection when idle.
    Escape,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> KeyModifiers {
        KeyModifiers {
            ctrl: true,
            ..KeyModifiers::default()
        }
    }

    #[test]
    fn test_shortcut_mapping() {
        assert_eq!(
            InputEvent::key("Delete", KeyModifiers::default()).shortcut(),
            Some(Shortcut::Delete)
        );
        assert_eq!(
            InputEvent::key("Backspace", KeyModifiers::default()).shortcut(),
            Some(Shortcut::Delete)
        );
        assert_eq!(InputEvent::key("z", ctrl()).shortcut(), Some(Shortcut::Undo));
        assert_eq!(
            InputEvent::key(
                "Z",
                KeyModifiers {
                    shift: true,
                    meta: true,
                    ..KeyModifiers::default()
                }
            )
            .shortcut(),
            Some(Shortcut::Redo)
        );
        assert_eq!(InputEvent::key("y", ctrl()).shortcut(), Some(Shortcut::Redo));
        assert_eq!(InputEvent::key("d", ctrl()).shortcut(), Some(Shortcut::Duplicate));
        assert_eq!(
            InputEvent::key("Escape", KeyModifiers::default()).shortcut(),
            Some(Shortcut::Escape)
        );
    }

    #[test]
    fn test_plain_letters_and_releases_are_not_shortcuts() {
        assert_eq!(InputEvent::key("z", KeyModifiers::default()).shortcut(), None);
        let release = InputEvent::Key {
            key: "Delete".to_string(),
            pressed: false,
            modifiers: KeyModifiers::default(),
        };
        assert_eq!(release.shortcut(), None);
        assert_eq!(
            InputEvent::Pointer(PointerEvent::down(1.0, 1.0)).shortcut(),
            None
        );
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"type":"Pointer","data":{"phase":"down","x":10.0,"y":20.0}}"#;
        let event: InputEvent = serde_json::from_str(json).expect("parse");
        assert_eq!(event, InputEvent::Pointer(PointerEvent::down(10.0, 20.0)));

        let json = r#"{"type":"Key","data":{"key":"z","pressed":true,"modifiers":{"ctrl":true}}}"#;
        let event: InputEvent = serde_json::from_str(json).expect("parse");
        assert_eq!(event.shortcut(), Some(Shortcut::Undo));
    }
}
