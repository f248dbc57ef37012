//! Scene mutations produced by the interaction state machine.
//!
//! Every edit the session makes goes through [`SceneMutation::apply`], so a
//! read-only session can refuse them all in one place.

use mm_core::id::{ConnectionId, NodeId};
use mm_core::model::{Color, Node, NodePatch, SceneData, Shape};
use mm_core::SceneModel;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneMutation {
    AddNode {
        node: Box<Node>,
    },
    MoveNode {
        id: NodeId,
        x: f32,
        y: f32,
    },
    SetText {
        id: NodeId,
        text: String,
    },
    SetColor {
        id: NodeId,
        color: Color,
    },
    SetShape {
        id: NodeId,
        shape: Shape,
    },
    /// Remove a node and every connection touching it.
    RemoveNode {
        id: NodeId,
    },
    AddConnection {
        from: NodeId,
        to: NodeId,
    },
    RemoveConnection {
        id: ConnectionId,
    },
    ReplaceAll {
        data: SceneData,
    },
}

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Nothing matched; the scene is unchanged.
    Nothing,
    Changed,
    ConnectionAdded(ConnectionId),
}

impl Applied {
    pub fn changed(self) -> bool {
        !matches!(self, Applied::Nothing)
    }
}

impl SceneMutation {
    pub fn apply(self, scene: &mut SceneModel) -> Applied {
        let changed = |ok: bool| if ok { Applied::Changed } else { Applied::Nothing };
        match self {
            SceneMutation::AddNode { node } => {
                scene.add_node(*node);
                Applied::Changed
            }
            SceneMutation::MoveNode { id, x, y } => changed(scene.update_node(id, &NodePatch::position(x, y))),
            SceneMutation::SetText { id, text } => changed(scene.update_node(id, &NodePatch::text(text))),
            SceneMutation::SetColor { id, color } => changed(scene.update_node(id, &NodePatch::color(color))),
            SceneMutation::SetShape { id, shape } => changed(scene.update_node(id, &NodePatch::shape(shape))),
            SceneMutation::RemoveNode { id } => changed(scene.remove_node(id).is_some()),
            SceneMutation::AddConnection { from, to } => match scene.add_connection(from, to) {
                Some(id) => Applied::ConnectionAdded(id),
                None => Applied::Nothing,
            },
            SceneMutation::RemoveConnection { id } => changed(scene.remove_connection(id)),
            SceneMutation::ReplaceAll { data } => {
                scene.replace_all(data);
                Applied::Changed
            }
        }
    }
}
