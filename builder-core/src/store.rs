//! Ordered element storage with copy-on-write snapshots.
//!
//! The [`ElementStore`] owns the canvas elements in paint order (last is
//! topmost). Its collection lives behind an [`Arc`], so taking a
//! [`Snapshot`] for the undo history is a reference-count bump, and the
//! first mutation after a snapshot clones the collection once.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Offset;
use crate::element::{Element, ElementId, ElementPatch, Position, Size};

/// Immutable copy of the full element collection.
///
/// Cloning a snapshot is cheap; two snapshots compare equal when their
/// elements do.
#[derive(Debug, Clone, Default)]
pub struct Snapshot(Arc<Vec<Element>>);

impl Snapshot {
    /// Wrap a collection.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self(Arc::new(elements))
    }

    /// The elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.0
    }

    /// Find an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.0.iter().find(|e| e.id == id)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether both snapshots share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Copy the elements out.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Element> {
        self.0.as_ref().clone()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl From<Vec<Element>> for Snapshot {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

/// The ordered element collection of one design.
///
/// Operations on unknown ids are silent no-ops. Geometry written through
/// the store is clamped to the position and size floors.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Arc<Vec<Element>>,
}

fn normalize_tree(element: &mut Element, seen: &mut HashSet<ElementId>) {
    if !seen.insert(element.id) {
        let previous = element.id;
        element.id = ElementId::new();
        seen.insert(element.id);
        tracing::debug!(%previous, id = %element.id, "Reassigned repeated element id");
    }
    element.position = element.position.clamped();
    element.size = element.size.clamped();
    for child in &mut element.children {
        normalize_tree(child, seen);
    }
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `elements` in the given order.
    ///
    /// Ids repeated anywhere in the tree are replaced with fresh ones and
    /// geometry is clamped, as [`add`](Self::add) does.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut seen = HashSet::with_capacity(elements.len());
        let elements = elements
            .into_iter()
            .map(|mut element| {
                normalize_tree(&mut element, &mut seen);
                element
            })
            .collect();
        Self {
            elements: Arc::new(elements),
        }
    }

    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Paint-order index of an element.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Append an element on top of the others.
    ///
    /// An element whose id is already taken gets a fresh one, so ids stay
    /// unique. Returns the id the element was stored under.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        if self.contains(element.id) {
            let previous = element.id;
            element.id = ElementId::new();
            tracing::debug!(%previous, id = %element.id, "Reassigned colliding element id");
        }
        element.position = element.position.clamped();
        element.size = element.size.clamped();
        let id = element.id;
        Arc::make_mut(&mut self.elements).push(element);
        id
    }

    /// Merge `patch` into the element with `id`.
    ///
    /// Returns `true` if the element exists and something changed.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut updated = self.elements[index].clone();
        if !patch.apply(&mut updated) {
            return false;
        }
        Arc::make_mut(&mut self.elements)[index] = updated;
        true
    }

    /// Remove an element, returning it.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(Arc::make_mut(&mut self.elements).remove(index))
    }

    /// Insert a deep copy of an element directly after it.
    ///
    /// The copy and all its descendants get fresh ids and the copy is moved
    /// by `offset`. Returns the copy.
    pub fn duplicate(&mut self, id: ElementId, offset: Offset) -> Option<Element> {
        let index = self.index_of(id)?;
        let mut copy = self.elements[index].deep_clone_with_new_ids();
        copy.position = copy.position.offset(offset.dx, offset.dy).clamped();
        Arc::make_mut(&mut self.elements).insert(index + 1, copy.clone());
        Some(copy)
    }

    /// Position and size of an element.
    #[must_use]
    pub fn geometry(&self, id: ElementId) -> Option<(Position, Size)> {
        self.get(id).map(|e| (e.position, e.size))
    }

    /// Overwrite an element's geometry without any bookkeeping.
    ///
    /// This is the live path used while a gesture is in progress. Returns
    /// `true` if the element exists and its geometry changed.
    pub fn set_geometry(&mut self, id: ElementId, position: Position, size: Size) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let position = position.clamped();
        let size = size.clamped();
        let current = &self.elements[index];
        if current.position == position && current.size == size {
            return false;
        }
        let element = &mut Arc::make_mut(&mut self.elements)[index];
        element.position = position;
        element.size = size;
        true
    }

    /// Topmost element containing the point, if any.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(|e| e.id)
    }

    /// Capture the current collection.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::clone(&self.elements))
    }

    /// Replace the whole collection with a snapshot.
    pub fn replace_all(&mut self, snapshot: &Snapshot) {
        self.elements = Arc::clone(&snapshot.0);
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements = Arc::new(Vec::new());
    }
}
