//! # Page Builder Core
//!
//! Editing engine of a visual page builder: typed elements on an absolute
//! canvas, moved and resized by direct manipulation, with linear undo/redo.
//! Compiles to WASM for browser hosts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Session                    │
//! │  selection · keyboard shortcuts · editor    │
//! ├──────────────────────┬──────────────────────┤
//! │  Interaction Engine  │  History             │
//! │  - drag              │  - snapshot stack    │
//! │  - 8-handle resize   │  - undo / redo       │
//! ├──────────────────────┴──────────────────────┤
//! │  Element Store (copy-on-write snapshots)    │
//! ├─────────────────────────────────────────────┤
//! │  Registry: defaults · editor fields         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use builder_core::{ElementType, Session, Size};
//!
//! let mut session = Session::new();
//! let id = session.add_element(ElementType::Button);
//!
//! // Drag the bottom-right handle of the 150x40 button by (+50, +30).
//! session.pointer_down(250.0, 240.0);
//! session.pointer_move(300.0, 270.0);
//! session.pointer_up(300.0, 270.0);
//! assert_eq!(session.element(id).map(|e| e.size), Some(Size::new(200.0, 70.0)));
//!
//! session.undo();
//! assert_eq!(session.element(id).map(|e| e.size), Some(Size::new(150.0, 40.0)));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod blocks;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod history;
pub mod interaction;
pub mod persist;
pub mod registry;
pub mod schema;
pub mod session;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{BuilderConfig, Offset};
pub use element::{
    Element, ElementId, ElementPatch, ElementType, Position, Size, StyleMap, MIN_ELEMENT_SIZE,
};
pub use error::{BuilderError, BuilderResult};
pub use event::{InputEvent, KeyModifiers, PointerEvent, PointerPhase, Shortcut};
pub use history::History;
pub use interaction::{InteractionEngine, InteractionState, PointerDown, PointerTarget, ResizeHandle};
pub use persist::{DesignPersistence, JsonFilePersistence, MemoryPersistence};
pub use registry::{
    ElementDefaults, FieldKind, FieldTarget, PropertyField, Registry, RegistryEntry,
};
pub use schema::{DesignDocument, ViewportClass};
pub use session::Session;
pub use store::{ElementStore, Snapshot};

/// Builder core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
