//! WebAssembly bindings for builder-core.
//!
//! Browser hosts drive a [`WasmSession`] with plain numbers and JSON
//! strings; element ids cross the boundary as UUID strings.

use wasm_bindgen::prelude::*;

use crate::{
    BuilderConfig, BuilderError, DesignDocument, ElementId, ElementPatch, ElementType, InputEvent,
    PropertyField, Session, ViewportClass,
};

/// Initialize the builder WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editing session exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

fn parse_id(id: &str) -> Result<ElementId, String> {
    ElementId::parse(id).map_err(|e| BuilderError::InvalidId(format!("'{id}' ({e})")).to_string())
}

#[wasm_bindgen]
impl WasmSession {
    /// Create an empty session with the default configuration.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Create a session from a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error string if the configuration is malformed.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmSession, String> {
        let config = BuilderConfig::from_json(config_json).map_err(|e| e.to_string())?;
        Ok(Self {
            session: Session::with_config(config),
        })
    }

    /// Add an element of the given type tag; returns its id.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, element_type: &str) -> String {
        self.session
            .add_element(ElementType::from(element_type))
            .to_string()
    }

    /// Apply a JSON [`ElementPatch`] to an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id or patch is malformed.
    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> Result<bool, String> {
        let id = parse_id(id)?;
        let patch: ElementPatch = serde_json::from_str(patch_json).map_err(|e| e.to_string())?;
        Ok(self.session.update_element(id, &patch))
    }

    /// Delete an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id is malformed.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> Result<bool, String> {
        Ok(self.session.delete_element(parse_id(id)?))
    }

    /// Duplicate an element; returns the copy's id, if the source exists.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id is malformed.
    #[wasm_bindgen(js_name = duplicateElement)]
    pub fn duplicate_element(&mut self, id: &str) -> Result<Option<String>, String> {
        Ok(self
            .session
            .duplicate_element(parse_id(id)?)
            .map(|copy| copy.to_string()))
    }

    /// Undo the last change.
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Select an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id is malformed.
    pub fn select(&mut self, id: &str) -> Result<bool, String> {
        Ok(self.session.select(parse_id(id)?))
    }

    /// Clear the selection.
    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// Id of the selected element.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.session.selected_id().map(|id| id.to_string())
    }

    /// Property-editor fields of the selected element as a JSON array.
    #[wasm_bindgen(js_name = selectedFieldsJson)]
    #[must_use]
    pub fn selected_fields_json(&self) -> String {
        serde_json::to_string(self.session.selected_fields()).unwrap_or_default()
    }

    /// Read one property-editor field of an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id or field is malformed.
    #[wasm_bindgen(js_name = fieldValue)]
    pub fn field_value(&self, id: &str, field_json: &str) -> Result<Option<String>, String> {
        let id = parse_id(id)?;
        let field: PropertyField = serde_json::from_str(field_json).map_err(|e| e.to_string())?;
        Ok(self.session.field_value(id, &field.target))
    }

    /// Write one property-editor field of an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the id or field is malformed.
    #[wasm_bindgen(js_name = applyField)]
    pub fn apply_field(&mut self, id: &str, field_json: &str, value: &str) -> Result<bool, String> {
        let id = parse_id(id)?;
        let field: PropertyField = serde_json::from_str(field_json).map_err(|e| e.to_string())?;
        Ok(self.session.apply_field(id, &field, value))
    }

    /// Pointer pressed at canvas coordinates.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> String {
        format!("{:?}", self.session.pointer_down(x, y))
    }

    /// Pointer moved.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.session.pointer_move(x, y)
    }

    /// Pointer released; `true` if a change was recorded.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.session.pointer_up(x, y)
    }

    /// Pointer capture lost.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> bool {
        self.session.pointer_cancel()
    }

    /// Handle a JSON [`InputEvent`].
    ///
    /// # Errors
    ///
    /// Returns an error string if the event is malformed.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<bool, String> {
        let event: InputEvent = serde_json::from_str(event_json).map_err(|e| e.to_string())?;
        Ok(self.session.handle_event(&event))
    }

    /// Set the preview viewport (`desktop`, `tablet` or `mobile`).
    ///
    /// # Errors
    ///
    /// Returns an error string for unknown viewport names.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, viewport: &str) -> Result<(), String> {
        self.session.set_viewport(viewport.parse::<ViewportClass>()?);
        Ok(())
    }

    /// Display width of the current viewport.
    #[wasm_bindgen(js_name = viewportWidth)]
    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.session.viewport().width()
    }

    /// Current elements as a JSON array.
    #[wasm_bindgen(js_name = getElementsJson)]
    #[must_use]
    pub fn get_elements_json(&self) -> String {
        serde_json::to_string(self.session.elements()).unwrap_or_default()
    }

    /// Current design as a document JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = getDocumentJson)]
    pub fn get_document_json(&self) -> Result<String, String> {
        self.session.document().to_json().map_err(|e| e.to_string())
    }

    /// Replace the design with a document JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error string if the document is malformed.
    #[wasm_bindgen(js_name = loadDocumentJson)]
    pub fn load_document_json(&mut self, json: &str) -> Result<(), String> {
        let document = DesignDocument::from_json(json).map_err(|e| e.to_string())?;
        self.session.load_document(document);
        Ok(())
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}
