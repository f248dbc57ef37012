//! Transient interaction state.
//!
//! Drag, pan and text edit are mutually exclusive, so they live in one
//! `Gesture` value; selection, hover and the connect source are independent
//! of the gesture.

use mm_core::id::{ConnectionId, NodeId};

/// The one active pointer or editing gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving `node`; `offset` is pointer world position minus node origin
    /// at press time.
    Dragging { node: NodeId, offset: (f32, f32) },
    /// Panning the view; `last` is the previous client position.
    Panning { last: (f32, f32) },
    /// Editing the label of `node`; `buffer` holds the staged text.
    EditingText { node: NodeId, buffer: String },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        match self {
            Gesture::Dragging { node, .. } => Some(*node),
            _ => None,
        }
    }

    pub fn edited_node(&self) -> Option<NodeId> {
        match self {
            Gesture::EditingText { node, .. } => Some(*node),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Gesture::Panning { .. })
    }
}

/// Everything the session tracks between events besides the scene and the
/// viewport. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub gesture: Gesture,
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
    pub hovered_handle: Option<ConnectionId>,
    /// Source of an in-progress connection started with the connect
    /// shortcut.
    pub connect_source: Option<NodeId>,
    /// Last known pointer position in world space.
    pub pointer_world: Option<(f32, f32)>,
}

impl InteractionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.gesture, Gesture::EditingText { .. })
    }

    /// Drop every reference to `node`.
    pub fn forget_node(&mut self, node: NodeId) {
        if self.selected == Some(node) {
            self.selected = None;
        }
        if self.hovered == Some(node) {
            self.hovered = None;
        }
        if self.connect_source == Some(node) {
            self.connect_source = None;
        }
        if self.gesture.dragged_node() == Some(node) || self.gesture.edited_node() == Some(node) {
            self.gesture = Gesture::Idle;
        }
    }

    pub fn cancel_connect(&mut self) {
        self.connect_source = None;
    }
}
