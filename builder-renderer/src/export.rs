//! Standalone HTML export.
//!
//! Wraps the rendered canvas of a [`DesignDocument`] in a complete page with
//! a small reset stylesheet, suitable for publishing or previewing offline.

use std::fmt::Write;
use std::path::Path;

use builder_core::{DesignDocument, ViewportClass};

use crate::dispatch::RenderRegistry;
use crate::error::{RenderError, RenderResult};
use crate::output::escape_html;

/// Reset and base styles for exported pages.
const BASE_CSS: &str = "\
*,*::before,*::after{box-sizing:border-box}\
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;background:#f8fafc}\
.pb-canvas{margin:0 auto;background:#ffffff}\
.pb-element{margin:0}\
.pb-element img,.pb-element iframe,.pb-element video{display:block;max-width:100%}\
.pb-button{display:inline-block;text-decoration:none;cursor:pointer}\
.pb-links{list-style:none;display:flex;gap:16px;margin:0;padding:0}\
.pb-links a{color:inherit;text-decoration:none}";

/// Configuration for page export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Page title.
    pub title: String,
    /// Canvas width override; defaults to the document's viewport class.
    pub viewport: Option<ViewportClass>,
    /// Language attribute for the `<html>` element.
    pub lang: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Untitled page".to_string(),
            viewport: None,
            lang: "en".to_string(),
        }
    }
}

/// Exports a [`DesignDocument`] to a standalone HTML page.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    config: ExportConfig,
    registry: RenderRegistry,
}

impl HtmlExporter {
    /// Create an exporter with the given configuration and built-in renderers.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            registry: RenderRegistry::builtin(),
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Use a custom render table.
    #[must_use]
    pub fn with_registry(mut self, registry: RenderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The export configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Viewport class the page will be rendered at.
    #[must_use]
    pub fn viewport_for(&self, document: &DesignDocument) -> ViewportClass {
        self.config.viewport.unwrap_or(document.viewport_class)
    }

    /// Render the document to a complete HTML page.
    #[must_use]
    pub fn export(&self, document: &DesignDocument) -> String {
        let viewport = self.viewport_for(document);
        let canvas = self.registry.render_canvas(&document.elements, viewport);

        let mut html = String::with_capacity(4096);
        html.push_str("<!DOCTYPE html>\n");
        let _ = writeln!(html, "<html lang=\"{}\">", escape_html(&self.config.lang));
        html.push_str("<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(
            html,
            "<meta name=\"viewport\" content=\"width={}\">",
            viewport.width()
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.config.title));
        let _ = writeln!(html, "<style>{BASE_CSS}</style>");
        html.push_str("</head>\n<body>\n");
        html.push_str(&canvas.to_html());
        html.push_str("\n</body>\n</html>\n");

        tracing::debug!(
            elements = document.elements.len(),
            viewport = %viewport,
            bytes = html.len(),
            "Exported design to HTML"
        );
        html
    }

    /// Render the document and write the page to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export_to_file(&self, document: &DesignDocument, path: &Path) -> RenderResult<()> {
        let html = self.export(document);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, html).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Wrote exported page");
        Ok(())
    }

    /// Parse a saved design and render it to a page.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn export_json(&self, json: &str) -> RenderResult<String> {
        let document = DesignDocument::from_json(json)?;
        Ok(self.export(&document))
    }

    /// The rendered canvas tree as JSON, for hosts that build their own DOM.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_tree_json(&self, document: &DesignDocument) -> RenderResult<String> {
        let canvas = self
            .registry
            .render_canvas(&document.elements, self.viewport_for(document));
        Ok(serde_json::to_string(&canvas)?)
    }
}
