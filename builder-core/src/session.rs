//! Editing session: one design, its history, selection and gesture state.
//!
//! [`Session`] is the surface host UIs talk to. Every user-visible change
//! goes through it so that exactly one history snapshot is recorded per
//! completed action, while live gesture frames bypass the history.

use serde_json::{Map, Value};

use crate::config::BuilderConfig;
use crate::element::{Element, ElementId, ElementPatch, ElementType, Position};
use crate::error::BuilderResult;
use crate::event::{InputEvent, PointerEvent, PointerPhase, Shortcut};
use crate::history::History;
use crate::interaction::{self, InteractionEngine, InteractionState, PointerDown};
use crate::persist::DesignPersistence;
use crate::registry::{FieldKind, FieldTarget, PropertyField, Registry};
use crate::schema::{DesignDocument, ViewportClass};
use crate::store::ElementStore;

/// A single-user editing session.
#[derive(Debug, Clone)]
pub struct Session {
    config: BuilderConfig,
    registry: Registry,
    store: ElementStore,
    history: History,
    selection: Option<ElementId>,
    interaction: InteractionEngine,
    viewport: ViewportClass,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Create an empty session with a custom configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        let config = config.normalized();
        let store = ElementStore::new();
        let history = History::with_limit(store.snapshot(), config.history_limit);
        Self {
            config,
            registry: Registry::builtin(),
            store,
            history,
            selection: None,
            interaction: InteractionEngine::new(),
            viewport: ViewportClass::default(),
        }
    }

    /// Replace the element registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Open a saved design. The history starts fresh from its contents.
    #[must_use]
    pub fn from_document(document: DesignDocument, config: BuilderConfig) -> Self {
        let mut session = Self::with_config(config);
        session.load_document(document);
        session
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Element registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Element registry, for registering additional types.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The element collection.
    #[must_use]
    pub const fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    /// Undo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Current gesture state.
    #[must_use]
    pub const fn interaction_state(&self) -> &InteractionState {
        self.interaction.state()
    }

    /// Viewport class used for previews.
    #[must_use]
    pub const fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    /// Switch the preview viewport. Element geometry is not touched.
    pub fn set_viewport(&mut self, viewport: ViewportClass) {
        self.viewport = viewport;
    }

    // -----------------------------------------------------------------------
    // Element operations
    // -----------------------------------------------------------------------

    /// Add a new element of `element_type` at the drop point and select it.
    pub fn add_element(&mut self, element_type: ElementType) -> ElementId {
        let defaults = self.registry.defaults(&element_type);
        let element = Element {
            content: defaults.content,
            styles: defaults.styles,
            list_items: defaults.list_items,
            link: defaults.link,
            alt: defaults.alt,
            ..Element::new(element_type)
        }
        .with_position(self.config.drop_point)
        .with_size(defaults.size);
        self.insert_element(element)
    }

    /// Add a prepared element on top and select it.
    ///
    /// The element keeps its id unless that id is already taken.
    pub fn insert_element(&mut self, element: Element) -> ElementId {
        self.settle_gesture();
        let element_type = element.element_type.clone();
        let id = self.store.add(element);
        self.selection = Some(id);
        self.commit();
        tracing::debug!(%id, %element_type, "Element added");
        id
    }

    /// Merge `patch` into an element.
    ///
    /// Returns `true` and records one history entry if something changed.
    /// Selection is left alone.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        self.settle_gesture();
        if !self.store.update(id, patch) {
            return false;
        }
        self.commit();
        tracing::debug!(%id, "Element updated");
        true
    }

    /// Delete an element, clearing the selection if it was selected.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.settle_gesture();
        if self.store.remove(id).is_none() {
            return false;
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.commit();
        tracing::debug!(%id, "Element deleted");
        true
    }

    /// Duplicate an element next to the original and select the copy.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        self.settle_gesture();
        let copy = self.store.duplicate(id, self.config.duplicate_offset)?;
        self.selection = Some(copy.id);
        self.commit();
        tracing::debug!(source = %id, id = %copy.id, "Element duplicated");
        Some(copy.id)
    }

    /// Delete the selected element, if any.
    pub fn delete_selected(&mut self) -> bool {
        self.selection.is_some_and(|id| self.delete_element(id))
    }

    /// Duplicate the selected element, if any.
    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        self.selection.and_then(|id| self.duplicate_element(id))
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Step back one change. Clears the selection on success.
    pub fn undo(&mut self) -> bool {
        self.settle_gesture();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.store.replace_all(&snapshot);
        self.selection = None;
        tracing::debug!(cursor = self.history.cursor(), "Undo");
        true
    }

    /// Step forward one change. Clears the selection on success.
    pub fn redo(&mut self) -> bool {
        self.settle_gesture();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.store.replace_all(&snapshot);
        self.selection = None;
        tracing::debug!(cursor = self.history.cursor(), "Redo");
        true
    }

    /// Whether there is a change to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is a change to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self) {
        self.history.push(self.store.snapshot());
    }

    /// Cancel any running gesture before a structural change.
    fn settle_gesture(&mut self) {
        if !self.interaction.is_idle() {
            self.interaction.cancel(&mut self.store);
        }
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// The selected element.
    #[must_use]
    pub fn selected(&self) -> Option<&Element> {
        self.selection.and_then(|id| self.store.get(id))
    }

    /// ID of the selected element.
    #[must_use]
    pub const fn selected_id(&self) -> Option<ElementId> {
        self.selection
    }

    /// Select an element. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selection = Some(id);
        true
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Property-editor fields for the selected element.
    #[must_use]
    pub fn selected_fields(&self) -> &[PropertyField] {
        match self.selected() {
            Some(element) => self.registry.fields(&element.element_type),
            None => &[],
        }
    }

    // -----------------------------------------------------------------------
    // Property editor
    // -----------------------------------------------------------------------

    /// Current value of one editor field, as the text the editor shows.
    ///
    /// Composite configuration keys missing from the element fall back to
    /// the registry's defaults. Returns `None` for unknown elements and
    /// unset properties.
    #[must_use]
    pub fn field_value(&self, id: ElementId, target: &FieldTarget) -> Option<String> {
        let element = self.store.get(id)?;
        match target {
            FieldTarget::Content => Some(element.content.clone()),
            FieldTarget::Style(key) => element.styles.get(key).cloned(),
            FieldTarget::Link => element.link.clone(),
            FieldTarget::Alt => element.alt.clone(),
            FieldTarget::ListItems => element.list_items.as_ref().map(|items| items.join("\n")),
            FieldTarget::Config(key) => config_object(&element.content)
                .and_then(|config| config.get(key).cloned())
                .or_else(|| {
                    self.registry
                        .config_defaults(&element.element_type)
                        .and_then(|defaults| defaults.get(key).cloned())
                })
                .map(|value| value_to_text(&value)),
        }
    }

    /// Write one editor field as a single committed update.
    ///
    /// Values are converted according to `field.kind`: numbers must parse,
    /// toggles accept `true`/`false`/`1`/`0`/`on`/`off`, and lines are split
    /// on newlines with blanks dropped. An empty value removes a style key
    /// or clears the link/alt text. Returns `true` if the element changed.
    pub fn apply_field(&mut self, id: ElementId, field: &PropertyField, value: &str) -> bool {
        let Some(element) = self.store.get(id) else {
            return false;
        };
        let patch = match &field.target {
            FieldTarget::Content => ElementPatch::new().content(value),
            FieldTarget::Style(key) => {
                let mut styles = element.styles.clone();
                if value.trim().is_empty() {
                    styles.remove(key);
                } else if field.kind == FieldKind::Number && value.trim().parse::<f64>().is_err() {
                    tracing::debug!(%id, key = %key, value, "Rejected non-numeric style value");
                    return false;
                } else {
                    styles.insert(key.clone(), value.trim().to_string());
                }
                ElementPatch::new().styles(styles)
            }
            FieldTarget::Link => ElementPatch::new().link(non_empty(value)),
            FieldTarget::Alt => ElementPatch::new().alt(non_empty(value)),
            FieldTarget::ListItems => ElementPatch::new().list_items(split_lines(value)),
            FieldTarget::Config(key) => {
                let Some(converted) = text_to_value(&field.kind, value) else {
                    tracing::debug!(%id, key = %key, value, "Rejected configuration value");
                    return false;
                };
                let mut config = config_object(&element.content).unwrap_or_default();
                config.insert(key.clone(), converted);
                ElementPatch::new().content(Value::Object(config).to_string())
            }
        };
        self.update_element(id, &patch)
    }

    // -----------------------------------------------------------------------
    // Pointer and keyboard input
    // -----------------------------------------------------------------------

    /// Handle a pointer press at canvas coordinates `(x, y)`.
    ///
    /// Handles of the selected element are hit first, then element bodies
    /// from the top down. Pressing a body selects it and starts a drag;
    /// pressing empty canvas clears the selection.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> PointerDown {
        let point = Position::new(x, y);
        let target = interaction::hit_test(
            &self.store,
            self.selection,
            point,
            self.config.handle_tolerance,
        );
        let outcome = self.interaction.pointer_down(target, point, &self.store);
        match outcome {
            PointerDown::DragStarted(id) => self.selection = Some(id),
            PointerDown::Canvas => self.selection = None,
            PointerDown::ResizeStarted(..) | PointerDown::Ignored => {}
        }
        outcome
    }

    /// Handle a pointer move. Returns `true` if geometry changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.interaction
            .pointer_move(Position::new(x, y), &mut self.store)
    }

    /// Handle a pointer release, committing the gesture if it moved
    /// anything. Returns `true` if a history entry was recorded.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.pointer_move(x, y);
        let Some(id) = self.interaction.pointer_up(&self.store) else {
            return false;
        };
        self.commit();
        tracing::debug!(%id, "Gesture committed");
        true
    }

    /// Abort the running gesture, restoring the element's start geometry.
    pub fn pointer_cancel(&mut self) -> bool {
        self.interaction.cancel(&mut self.store)
    }

    /// Route a pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => {
                !matches!(self.pointer_down(event.x, event.y), PointerDown::Ignored)
            }
            PointerPhase::Move => self.pointer_move(event.x, event.y),
            PointerPhase::Up => self.pointer_up(event.x, event.y),
            PointerPhase::Cancel => self.pointer_cancel(),
        }
    }

    /// Route any input event. Returns `true` if the session changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Pointer(pointer) = event {
            return self.handle_pointer(*pointer);
        }
        match event.shortcut() {
            Some(Shortcut::Delete) => self.delete_selected(),
            Some(Shortcut::Undo) => self.undo(),
            Some(Shortcut::Redo) => self.redo(),
            Some(Shortcut::Duplicate) => self.duplicate_selected().is_some(),
            Some(Shortcut::Escape) => {
                if self.interaction.is_idle() {
                    self.selection.take().is_some()
                } else {
                    self.pointer_cancel()
                }
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// The current design as a document stamped with the current time.
    #[must_use]
    pub fn document(&self) -> DesignDocument {
        DesignDocument::new(self.store.elements().to_vec(), self.viewport)
    }

    /// Replace the design with `document`, resetting history and selection.
    pub fn load_document(&mut self, document: DesignDocument) {
        self.settle_gesture();
        let count = document.elements.len();
        self.store = ElementStore::from_elements(document.elements);
        self.history.reset(self.store.snapshot());
        self.selection = None;
        self.viewport = document.viewport_class;
        tracing::debug!(elements = count, viewport = %self.viewport, "Design loaded");
    }

    /// Hand the current design to a persistence collaborator.
    pub fn save_to(&self, persistence: &dyn DesignPersistence) {
        persistence.save(&self.document());
    }

    /// Load the design stored by a persistence collaborator.
    ///
    /// Returns `false` and leaves the session untouched if nothing was
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored design cannot be read.
    pub fn load_from(&mut self, persistence: &dyn DesignPersistence) -> BuilderResult<bool> {
        let Some(document) = persistence.load()? else {
            return Ok(false);
        };
        self.load_document(document);
        Ok(true)
    }
}

fn config_object(content: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

fn text_to_value(kind: &FieldKind, text: &str) -> Option<Value> {
    let trimmed = text.trim();
    match kind {
        FieldKind::Number => {
            if let Ok(n) = trimmed.parse::<i64>() {
                Some(Value::from(n))
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
            }
        }
        FieldKind::Toggle => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(Value::Bool(true)),
            "false" | "0" | "off" | "no" | "" => Some(Value::Bool(false)),
            _ => None,
        },
        FieldKind::Lines => Some(Value::from(split_lines(text))),
        FieldKind::Text
        | FieldKind::TextArea
        | FieldKind::Url
        | FieldKind::Color
        | FieldKind::Select(_) => Some(Value::String(text.to_string())),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Size;
    use crate::event::KeyModifiers;
    use crate::interaction::ResizeHandle;
    use crate::persist::MemoryPersistence;

    fn ctrl() -> KeyModifiers {
        KeyModifiers {
            ctrl: true,
            ..KeyModifiers::default()
        }
    }

    #[test]
    fn test_add_element_uses_defaults_and_selects() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Button);
        let button = session.element(id).expect("added");
        assert_eq!(button.position, Position::new(100.0, 200.0));
        assert_eq!(button.size, Size::new(150.0, 40.0));
        assert_eq!(button.content, "Click Me");
        assert_eq!(session.selected_id(), Some(id));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_noop_operations_record_nothing() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Text);
        let len = session.history().len();
        let missing = ElementId::new();
        assert!(!session.update_element(missing, &ElementPatch::new().content("x")));
        assert!(!session.delete_element(missing));
        assert!(session.duplicate_element(missing).is_none());
        let content = session.element(id).map(|e| e.content.clone()).expect("exists");
        assert!(!session.update_element(id, &ElementPatch::new().content(content)));
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_updating_other_element_keeps_selection() {
        let mut session = Session::new();
        let first = session.add_element(ElementType::Text);
        let second = session.add_element(ElementType::Heading);
        assert_eq!(session.selected_id(), Some(second));
        assert!(session.update_element(first, &ElementPatch::new().content("changed")));
        assert_eq!(session.selected_id(), Some(second));
    }

    #[test]
    fn test_deleting_selected_clears_selection() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Image);
        assert!(session.delete_element(id));
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_undo_redo_clear_selection() {
        let mut session = Session::new();
        session.add_element(ElementType::Text);
        let second = session.add_element(ElementType::Text);
        assert!(session.undo());
        assert!(session.selected_id().is_none());
        assert!(session.element(second).is_none());
        assert!(session.redo());
        assert!(session.selected_id().is_none());
        assert!(session.element(second).is_some());
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Text);
        assert!(!session.select(ElementId::new()));
        assert_eq!(session.selected_id(), Some(id));
    }

    #[test]
    fn test_click_on_canvas_clears_selection() {
        let mut session = Session::new();
        session.add_element(ElementType::Button);
        assert_eq!(session.pointer_down(5.0, 5.0), PointerDown::Canvas);
        assert!(session.selected_id().is_none());
        assert!(!session.pointer_up(5.0, 5.0));
    }

    #[test]
    fn test_pointer_down_on_body_selects_and_drags() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Button);
        session.clear_selection();
        assert_eq!(session.pointer_down(120.0, 210.0), PointerDown::DragStarted(id));
        assert_eq!(session.selected_id(), Some(id));
        let len = session.history().len();
        session.pointer_move(150.0, 230.0);
        session.pointer_move(170.0, 250.0);
        assert_eq!(session.history().len(), len);
        assert!(session.pointer_up(170.0, 250.0));
        assert_eq!(session.history().len(), len + 1);
        assert_eq!(
            session.element(id).map(|e| e.position),
            Some(Position::new(150.0, 240.0))
        );
    }

    #[test]
    fn test_resize_via_handle_hit() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Button);
        assert_eq!(
            session.pointer_down(250.0, 240.0),
            PointerDown::ResizeStarted(id, ResizeHandle::BottomRight)
        );
        session.pointer_move(300.0, 270.0);
        assert!(session.pointer_up(300.0, 270.0));
        assert_eq!(session.element(id).map(|e| e.size), Some(Size::new(200.0, 70.0)));
    }

    #[test]
    fn test_structural_operation_cancels_gesture() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Button);
        session.pointer_down(120.0, 210.0);
        session.pointer_move(400.0, 400.0);
        let len = session.history().len();
        session.add_element(ElementType::Text);
        assert_eq!(session.history().len(), len + 1);
        assert_eq!(
            session.element(id).map(|e| e.position),
            Some(Position::new(100.0, 200.0))
        );
        assert!(matches!(session.interaction_state(), InteractionState::Idle));
    }

    #[test]
    fn test_escape_cancels_then_clears_selection() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Button);
        session.pointer_down(120.0, 210.0);
        session.pointer_move(300.0, 300.0);
        let escape = InputEvent::key("Escape", KeyModifiers::default());
        assert!(session.handle_event(&escape));
        assert_eq!(
            session.element(id).map(|e| e.position),
            Some(Position::new(100.0, 200.0))
        );
        assert_eq!(session.selected_id(), Some(id));
        assert!(session.handle_event(&escape));
        assert!(session.selected_id().is_none());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Text);
        assert!(session.handle_event(&InputEvent::key("d", ctrl())));
        assert_eq!(session.elements().len(), 2);
        assert!(session.handle_event(&InputEvent::key("Delete", KeyModifiers::default())));
        assert_eq!(session.elements().len(), 1);
        assert!(session.handle_event(&InputEvent::key("z", ctrl())));
        assert_eq!(session.elements().len(), 2);
        assert!(session.handle_event(&InputEvent::key("y", ctrl())));
        assert_eq!(session.elements().len(), 1);
        assert!(session.element(id).is_some());
    }

    #[test]
    fn test_selected_fields_follow_registry() {
        let mut session = Session::new();
        assert!(session.selected_fields().is_empty());
        session.add_element(ElementType::Card);
        assert!(session
            .selected_fields()
            .iter()
            .any(|field| field.target == FieldTarget::Config("title".into())));
    }

    #[test]
    fn test_field_value_falls_back_to_config_defaults() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Card);
        assert_eq!(
            session.field_value(id, &FieldTarget::Config("title".into())),
            Some("Card Title".to_string())
        );
        assert_eq!(session.field_value(id, &FieldTarget::Style("missing".into())), None);
    }

    #[test]
    fn test_apply_config_field() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::PricingCard);
        let features = PropertyField::config("Features", "features", FieldKind::Lines);
        assert!(session.apply_field(id, &features, "One\n\n Two \n"));
        let highlighted = PropertyField::config("Highlighted", "highlighted", FieldKind::Toggle);
        assert!(session.apply_field(id, &highlighted, "on"));

        let content = session.element(id).map(|e| e.content.clone()).expect("exists");
        let config: Value = serde_json::from_str(&content).expect("json");
        assert_eq!(config["features"], serde_json::json!(["One", "Two"]));
        assert_eq!(config["highlighted"], true);
        assert_eq!(
            session.field_value(id, &FieldTarget::Config("features".into())),
            Some("One\nTwo".to_string())
        );
    }

    #[test]
    fn test_apply_number_field_rejects_garbage() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Text);
        let opacity = PropertyField::style("Opacity", "opacity", FieldKind::Number);
        let len = session.history().len();
        assert!(!session.apply_field(id, &opacity, "very"));
        assert_eq!(session.history().len(), len);
        assert!(session.apply_field(id, &opacity, "0.5"));
        assert_eq!(
            session.field_value(id, &FieldTarget::Style("opacity".into())),
            Some("0.5".to_string())
        );
        assert!(session.apply_field(id, &opacity, ""));
        assert_eq!(session.field_value(id, &FieldTarget::Style("opacity".into())), None);
    }

    #[test]
    fn test_apply_config_on_malformed_content_starts_fresh() {
        let mut session = Session::new();
        let id = session.add_element(ElementType::Hero);
        session.update_element(id, &ElementPatch::new().content("not json"));
        let title = PropertyField::config("Title", "title", FieldKind::Text);
        assert!(session.apply_field(id, &title, "Launch"));
        assert_eq!(
            session.field_value(id, &FieldTarget::Config("title".into())),
            Some("Launch".to_string())
        );
    }

    #[test]
    fn test_document_round_trip_through_persistence() {
        let mut session = Session::new();
        session.add_element(ElementType::Heading);
        session.set_viewport(ViewportClass::Tablet);
        let persistence = MemoryPersistence::new();
        session.save_to(&persistence);

        let mut restored = Session::new();
        assert!(restored.load_from(&persistence).expect("load"));
        assert_eq!(restored.elements(), session.elements());
        assert_eq!(restored.viewport(), ViewportClass::Tablet);
        assert!(!restored.can_undo());
    }

    #[test]
    fn test_load_document_built_in_code_keeps_ids_unique_and_geometry_valid() {
        let original = Element::new(ElementType::Text)
            .with_position(Position::new(10.0, 10.0))
            .with_size(Size::new(100.0, 40.0));
        let mut tiny = Element::new(ElementType::Spacer);
        tiny.size = Size { width: 1.0, height: 1.0 };
        let document = DesignDocument::new(
            vec![original.clone(), original.clone(), tiny],
            ViewportClass::Desktop,
        );

        let mut session = Session::from_document(document, BuilderConfig::default());
        assert_eq!(session.elements().len(), 3);
        assert_ne!(session.elements()[0].id, session.elements()[1].id);
        assert!(session.elements().iter().all(Element::has_valid_geometry));

        assert!(session.delete_element(original.id));
        assert!(session.element(original.id).is_none());
        assert_eq!(session.elements().len(), 2);
    }

    #[test]
    fn test_load_from_empty_persistence_keeps_session() {
        let mut session = Session::new();
        session.add_element(ElementType::Text);
        assert!(!session.load_from(&MemoryPersistence::new()).expect("load"));
        assert_eq!(session.elements().len(), 1);
    }
}
