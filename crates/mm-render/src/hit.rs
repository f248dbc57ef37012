//! Hit testing: world point → node or connection handle.
//!
//! Nodes are checked front-to-back (last painted = topmost) against their
//! shape outline. Nodes always win over connection delete handles, since
//! the handles are painted underneath them.

use crate::display::{HANDLE_RADIUS, drawable_connections};
use crate::geometry::{OutlineShape, point};
use kurbo::{Circle, Shape as _};
use mm_core::SceneModel;
use mm_core::id::{ConnectionId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Node(NodeId),
    DeleteHandle(ConnectionId),
    Canvas,
}

pub fn hit_test(scene: &SceneModel, wx: f32, wy: f32) -> Hit {
    if let Some(id) = node_at(scene, wx, wy) {
        return Hit::Node(id);
    }
    match handle_at(scene, wx, wy) {
        Some(id) => Hit::DeleteHandle(id),
        None => Hit::Canvas,
    }
}

/// Topmost node whose outline contains the world point.
pub fn node_at(scene: &SceneModel, wx: f32, wy: f32) -> Option<NodeId> {
    let pt = point(wx, wy);
    scene
        .nodes()
        .rev()
        .find(|node| OutlineShape::from(node.outline()).contains(pt))
        .map(|node| node.id)
}

/// Delete handle of a drawable connection under the world point.
/// The last-drawn connection wins where handles overlap.
pub fn handle_at(scene: &SceneModel, wx: f32, wy: f32) -> Option<ConnectionId> {
    let pt = point(wx, wy);
    drawable_connections(scene)
        .filter(|(_, line)| Circle::new(line.p0.midpoint(line.p1), HANDLE_RADIUS).contains(pt))
        .last()
        .map(|(id, _)| id)
}
