//! # Page Builder Renderer
//!
//! Turns elements into a visual tree. Rendering is a pure function of an
//! element's type, content and styles; it never touches the editing state.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐   RenderRegistry   ┌─────────┐   to_html   ┌────────────┐
//! │  Element(s) │ ─────────────────▶ │  VNode  │ ──────────▶ │ HTML page  │
//! └─────────────┘  primitives/blocks └─────────┘  escaped    └────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use builder_core::{Element, ElementType};
//! use builder_renderer::render;
//!
//! let card = Element::new(ElementType::Card).with_content("");
//! let node = render(&card);
//! assert!(node.text_content().contains("Card Title"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod blocks;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod output;
pub mod primitives;
pub mod style;

pub use dispatch::{placeholder, render, render_canvas, render_positioned, RenderFn, RenderRegistry};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, HtmlExporter};
pub use output::{escape_html, VElement, VNode};

/// Renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
