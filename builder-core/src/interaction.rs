//! Pointer-driven drag and resize state machine.
//!
//! A gesture starts on pointer-down, writes live geometry into the
//! [`ElementStore`] on every move without touching the history, and ends on
//! pointer-up. The engine tells the caller whether the finished gesture
//! needs to be committed; recording the snapshot is the session's job.
//!
//! ```text
//!            down on body              up / cancel
//!   Idle ─────────────────▶ Dragging ─────────────┐
//!    ▲ │                                          │
//!    │ │  down on handle                          │
//!    │ └────────────────▶ Resizing ───────────────┤
//!    └────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, Position, Size, MIN_ELEMENT_SIZE};
use crate::store::ElementStore;

/// One of the eight resize affordances around the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Middle of the right edge.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Middle of the bottom edge.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the left edge.
    Left,
}

impl ResizeHandle {
    /// All handles, corners first so they win hit tests over edges.
    pub const ALL: [ResizeHandle; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
    ];

    const fn moves_left_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    const fn moves_right_edge(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    const fn moves_top_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    const fn moves_bottom_edge(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// Canvas location of this handle on an element's bounds.
    #[must_use]
    pub fn anchor(self, position: Position, size: Size) -> Position {
        let x = if self.moves_left_edge() {
            position.x
        } else if self.moves_right_edge() {
            position.x + size.width
        } else {
            position.x + size.width / 2.0
        };
        let y = if self.moves_top_edge() {
            position.y
        } else if self.moves_bottom_edge() {
            position.y + size.height
        } else {
            position.y + size.height / 2.0
        };
        Position::new(x, y)
    }

    /// Geometry after dragging this handle by `(dx, dy)` from the start
    /// geometry.
    ///
    /// Width and height never drop below [`MIN_ELEMENT_SIZE`] and the origin
    /// never goes negative. When a floor is hit on a leading edge the
    /// trailing edge stays where it was.
    #[must_use]
    pub fn resize(self, position: Position, size: Size, dx: f32, dy: f32) -> (Position, Size) {
        let (x, width) = resize_axis(
            position.x,
            size.width,
            dx,
            self.moves_left_edge(),
            self.moves_right_edge(),
        );
        let (y, height) = resize_axis(
            position.y,
            size.height,
            dy,
            self.moves_top_edge(),
            self.moves_bottom_edge(),
        );
        (Position::new(x, y), Size::new(width, height))
    }
}

/// Resize along one axis, returning the new origin and extent.
fn resize_axis(origin: f32, extent: f32, delta: f32, leading: bool, trailing: bool) -> (f32, f32) {
    if trailing {
        return (origin.max(0.0), (extent + delta).max(MIN_ELEMENT_SIZE));
    }
    if !leading {
        return (origin.max(0.0), extent.max(MIN_ELEMENT_SIZE));
    }
    let far_edge = origin + extent;
    let extent = (extent - delta).max(MIN_ELEMENT_SIZE);
    let origin = far_edge - extent;
    if origin < 0.0 {
        // Pinned against the canvas edge: the far edge stays put.
        (0.0, far_edge.max(MIN_ELEMENT_SIZE))
    } else {
        (origin, extent)
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A resize handle of the selected element.
    Handle(ElementId, ResizeHandle),
    /// The body of an element.
    Element(ElementId),
    /// Empty canvas.
    Canvas,
}

/// Resolve the target of a pointer-down at `point`.
///
/// Handles of `selected` are checked first (within `tolerance` pixels),
/// then element bodies from the top down.
#[must_use]
pub fn hit_test(
    store: &ElementStore,
    selected: Option<ElementId>,
    point: Position,
    tolerance: f32,
) -> PointerTarget {
    if let Some((id, (position, size))) =
        selected.and_then(|id| store.geometry(id).map(|geometry| (id, geometry)))
    {
        let hit = ResizeHandle::ALL.into_iter().find(|handle| {
            let anchor = handle.anchor(position, size);
            (point.x - anchor.x).abs() <= tolerance && (point.y - anchor.y).abs() <= tolerance
        });
        if let Some(handle) = hit {
            return PointerTarget::Handle(id, handle);
        }
    }
    store
        .element_at(point.x, point.y)
        .map_or(PointerTarget::Canvas, PointerTarget::Element)
}

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an element.
    Dragging {
        /// Element being moved.
        id: ElementId,
        /// Pointer position at gesture start.
        start_pointer: Position,
        /// Element position at gesture start.
        start_position: Position,
        /// Element size at gesture start.
        start_size: Size,
    },
    /// Resizing an element.
    Resizing {
        /// Element being resized.
        id: ElementId,
        /// Handle being dragged.
        handle: ResizeHandle,
        /// Pointer position at gesture start.
        start_pointer: Position,
        /// Element size at gesture start.
        start_size: Size,
        /// Element position at gesture start.
        start_position: Position,
    },
}

impl InteractionState {
    /// Element the gesture acts on.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }

    fn start_geometry(&self) -> Option<(Position, Size)> {
        match *self {
            Self::Idle => None,
            Self::Dragging {
                start_position,
                start_size,
                ..
            }
            | Self::Resizing {
                start_position,
                start_size,
                ..
            } => Some((start_position, start_size)),
        }
    }
}

/// Result of a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// A gesture is already running; the press was dropped.
    Ignored,
    /// An element body was pressed and a drag began.
    DragStarted(ElementId),
    /// A handle was pressed and a resize began.
    ResizeStarted(ElementId, ResizeHandle),
    /// Empty canvas was pressed.
    Canvas,
}

/// Drag/resize state machine.
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine {
    state: InteractionState,
}

impl InteractionEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Begin a gesture on `target`.
    ///
    /// Presses while a gesture is active, and presses on elements that no
    /// longer exist, start nothing.
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        pointer: Position,
        store: &ElementStore,
    ) -> PointerDown {
        if !self.is_idle() {
            tracing::trace!("Pointer down ignored: gesture in progress");
            return PointerDown::Ignored;
        }
        match target {
            PointerTarget::Canvas => PointerDown::Canvas,
            PointerTarget::Element(id) => {
                let Some((start_position, start_size)) = store.geometry(id) else {
                    return PointerDown::Canvas;
                };
                self.state = InteractionState::Dragging {
                    id,
                    start_pointer: pointer,
                    start_position,
                    start_size,
                };
                tracing::trace!(%id, "Drag started");
                PointerDown::DragStarted(id)
            }
            PointerTarget::Handle(id, handle) => {
                let Some((start_position, start_size)) = store.geometry(id) else {
                    return PointerDown::Canvas;
                };
                self.state = InteractionState::Resizing {
                    id,
                    handle,
                    start_pointer: pointer,
                    start_size,
                    start_position,
                };
                tracing::trace!(%id, ?handle, "Resize started");
                PointerDown::ResizeStarted(id, handle)
            }
        }
    }

    /// Apply a pointer move as a live, uncommitted geometry update.
    ///
    /// Returns `true` if the element's geometry changed.
    pub fn pointer_move(&mut self, pointer: Position, store: &mut ElementStore) -> bool {
        let (id, position, size) = match self.state {
            InteractionState::Idle => return false,
            InteractionState::Dragging {
                id,
                start_pointer,
                start_position,
                start_size,
            } => {
                let position = start_position
                    .offset(pointer.x - start_pointer.x, pointer.y - start_pointer.y)
                    .clamped();
                (id, position, start_size)
            }
            InteractionState::Resizing {
                id,
                handle,
                start_pointer,
                start_size,
                start_position,
            } => {
                let (position, size) = handle.resize(
                    start_position,
                    start_size,
                    pointer.x - start_pointer.x,
                    pointer.y - start_pointer.y,
                );
                (id, position, size)
            }
        };
        let changed = store.set_geometry(id, position, size);
        if changed {
            tracing::trace!(%id, x = position.x, y = position.y, w = size.width, h = size.height, "Live geometry");
        }
        changed
    }

    /// Finish the gesture.
    ///
    /// Returns the element whose new geometry should be committed, or `None`
    /// when nothing was running, the element is gone, or it ended where it
    /// started.
    pub fn pointer_up(&mut self, store: &ElementStore) -> Option<ElementId> {
        let state = std::mem::take(&mut self.state);
        let id = state.element()?;
        let start = state.start_geometry()?;
        let current = store.geometry(id)?;
        (current != start).then_some(id)
    }

    /// Abort the gesture, putting the element back where it started.
    ///
    /// Returns `true` if a gesture was running.
    pub fn cancel(&mut self, store: &mut ElementStore) -> bool {
        let state = std::mem::take(&mut self.state);
        let (Some(id), Some((position, size))) = (state.element(), state.start_geometry()) else {
            return false;
        };
        store.set_geometry(id, position, size);
        tracing::debug!(%id, "Gesture cancelled");
        true
    }
}
