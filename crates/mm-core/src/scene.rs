//! The scene model: authoritative node and connection collections.
//!
//! Every mutation notifies the registered [`SceneObserver`] synchronously,
//! after the change is applied. Operations addressing an id that is not
//! present are no-ops.

use crate::config::CanvasConfig;
use crate::id::{ConnectionId, NodeId};
use crate::model::{Connection, Node, NodePatch, SceneData, Shape};
use indexmap::IndexMap;

/// Receives the full scene after every mutation.
pub trait SceneObserver {
    fn scene_changed(&mut self, scene: &SceneModel);
}

impl<F: FnMut(&SceneModel)> SceneObserver for F {
    fn scene_changed(&mut self, scene: &SceneModel) {
        self(scene)
    }
}

/// Node and connection collections. Nodes keep insertion order, which is
/// also paint order (later nodes draw on top).
#[derive(Default)]
pub struct SceneModel {
    nodes: IndexMap<NodeId, Node>,
    connections: Vec<Connection>,
    observer: Option<Box<dyn SceneObserver>>,
    /// Bumped on every notification.
    revision: u64,
}

impl std::fmt::Debug for SceneModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneModel")
            .field("nodes", &self.nodes.len())
            .field("connections", &self.connections.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from loaded data. Later duplicates of a node id replace
    /// earlier ones in place.
    pub fn from_data(data: SceneData) -> Self {
        let mut model = Self::new();
        model.load(data);
        model
    }

    /// A scene holding only the configured root node.
    pub fn with_root(config: &CanvasConfig) -> Self {
        let (x, y) = config.root_position;
        let root = Node {
            id: NodeId::intern("1"),
            x,
            y,
            width: config.node_width,
            height: config.node_height,
            text: config.root_text.clone(),
            color: config.root_color,
            shape: Shape::Rectangle,
        };
        Self::from_data(SceneData {
            nodes: vec![root],
            connections: Vec::new(),
        })
    }

    pub fn set_observer(&mut self, observer: impl SceneObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    fn notify(&mut self) {
        self.revision += 1;
        if let Some(mut observer) = self.observer.take() {
            observer.scene_changed(self);
            // An observer installed during the callback wins.
            if self.observer.is_none() {
                self.observer = Some(observer);
            }
        }
    }

    fn load(&mut self, data: SceneData) {
        self.nodes = data.nodes.into_iter().map(|n| (n.id, n)).collect();
        self.connections = data.connections;
        let dangling = self.dangling_connections().count();
        if dangling > 0 {
            log::warn!("loaded {dangling} connection(s) with a missing endpoint; they will not be drawn");
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Connections with at least one endpoint that does not resolve. Only
    /// loaded data can contain them, since node removal cascades.
    pub fn dangling_connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(|c| !self.nodes.contains_key(&c.from) || !self.nodes.contains_key(&c.to))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in paint order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Both endpoints of a connection, if they resolve.
    pub fn endpoints(&self, connection: &Connection) -> Option<(&Node, &Node)> {
        Some((self.node(connection.from)?, self.node(connection.to)?))
    }

    /// The current authoritative state.
    pub fn snapshot(&self) -> SceneData {
        SceneData {
            nodes: self.nodes.values().cloned().collect(),
            connections: self.connections.clone(),
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Append a node. A node with the same id is replaced in place.
    pub fn add_node(&mut self, node: Node) {
        log::debug!("add node {} at ({}, {})", node.id, node.x, node.y);
        self.nodes.insert(node.id, node);
        self.notify();
    }

    /// Apply a partial update. Returns `false` (and does not notify) when
    /// the id is absent.
    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        patch.apply(node);
        self.notify();
        true
    }

    /// Remove a node and every connection referencing it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&id)?;
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        log::debug!(
            "remove node {id} (+{} connections)",
            before - self.connections.len()
        );
        self.notify();
        Some(removed)
    }

    /// Connect two existing nodes. Parallel connections between the same
    /// pair are allowed. Returns `None` when an endpoint is missing or the
    /// connection would be a self-loop.
    pub fn add_connection(&mut self, from: NodeId, to: NodeId) -> Option<ConnectionId> {
        if from == to {
            log::debug!("refusing self-loop on {from}");
            return None;
        }
        if !self.contains_node(from) || !self.contains_node(to) {
            return None;
        }
        let id = ConnectionId::generate();
        log::debug!("connect {from} -> {to} as {id}");
        self.connections.push(Connection { id, from, to });
        self.notify();
        Some(id)
    }

    /// Remove one connection. Nodes are untouched.
    pub fn remove_connection(&mut self, id: ConnectionId) -> bool {
        let Some(pos) = self.connections.iter().position(|c| c.id == id) else {
            return false;
        };
        self.connections.remove(pos);
        self.notify();
        true
    }

    /// Replace everything with loaded data.
    pub fn replace_all(&mut self, data: SceneData) {
        log::debug!(
            "replace scene: {} nodes, {} connections",
            data.nodes.len(),
            data.connections.len()
        );
        self.load(data);
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn node(id: &str, x: f32, y: f32) -> Node {
        Node {
            id: NodeId::intern(id),
            x,
            y,
            width: 120.0,
            height: 60.0,
            text: id.to_string(),
            color: Color::BLACK,
            shape: Shape::Rectangle,
        }
    }

    #[test]
    fn remove_node_cascades_to_connections() {
        let mut scene = SceneModel::new();
        scene.add_node(node("a", 0.0, 0.0));
        scene.add_node(node("b", 200.0, 0.0));
        scene.add_node(node("c", 400.0, 0.0));
        let (a, b, c) = (NodeId::intern("a"), NodeId::intern("b"), NodeId::intern("c"));
        scene.add_connection(a, b).unwrap();
        scene.add_connection(b, c).unwrap();
        let ac = scene.add_connection(a, c).unwrap();

        scene.remove_node(b);
        assert_eq!(scene.connections().len(), 1);
        assert_eq!(scene.connections()[0].id, ac);
        assert!(scene.connections().iter().all(|conn| !conn.touches(b)));
    }

    #[test]
    fn parallel_connections_are_kept() {
        let mut scene = SceneModel::new();
        scene.add_node(node("p1", 0.0, 0.0));
        scene.add_node(node("p2", 200.0, 0.0));
        let (a, b) = (NodeId::intern("p1"), NodeId::intern("p2"));
        let first = scene.add_connection(a, b).unwrap();
        let second = scene.add_connection(a, b).unwrap();
        assert_ne!(first, second);
        assert_eq!(scene.connections().len(), 2);
    }

    #[test]
    fn self_loops_and_dangling_endpoints_are_refused() {
        let mut scene = SceneModel::new();
        scene.add_node(node("solo", 0.0, 0.0));
        let solo = NodeId::intern("solo");
        assert_eq!(scene.add_connection(solo, solo), None);
        assert_eq!(scene.add_connection(solo, NodeId::intern("ghost")), None);
        assert!(scene.connections().is_empty());
    }

    #[test]
    fn dangling_connections_survive_load_but_not_removal() {
        let mut scene = SceneModel::from_data(SceneData {
            nodes: vec![node("dl-a", 0.0, 0.0), node("dl-b", 200.0, 0.0)],
            connections: vec![
                Connection {
                    id: ConnectionId::intern("dl-ab"),
                    from: NodeId::intern("dl-a"),
                    to: NodeId::intern("dl-b"),
                },
                Connection {
                    id: ConnectionId::intern("dl-ax"),
                    from: NodeId::intern("dl-a"),
                    to: NodeId::intern("dl-gone"),
                },
            ],
        });
        let dangling: Vec<_> = scene.dangling_connections().map(|c| c.id).collect();
        assert_eq!(dangling, vec![ConnectionId::intern("dl-ax")]);

        scene.remove_node(NodeId::intern("dl-b"));
        assert_eq!(scene.connections().len(), 1);
        assert_eq!(scene.dangling_connections().count(), 1);
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut scene = SceneModel::new();
        let ghost = NodeId::intern("ghost");
        assert!(!scene.update_node(ghost, &NodePatch::text("x")));
        assert!(scene.remove_node(ghost).is_none());
        assert!(!scene.remove_connection(ConnectionId::intern("ghost")));
        assert_eq!(scene.revision(), 0);
    }

    #[test]
    fn observer_sees_every_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut scene = SceneModel::new();
        scene.set_observer(move |s: &SceneModel| {
            sink.borrow_mut()
                .push((s.node_count(), s.connections().len()));
        });

        scene.add_node(node("o1", 0.0, 0.0));
        scene.add_node(node("o2", 10.0, 0.0));
        scene.add_connection(NodeId::intern("o1"), NodeId::intern("o2"));
        scene.update_node(NodeId::intern("o1"), &NodePatch::position(5.0, 5.0));
        scene.remove_node(NodeId::intern("o2"));

        assert_eq!(
            *seen.borrow(),
            vec![(1, 0), (2, 0), (2, 1), (2, 1), (1, 0)]
        );
        assert_eq!(scene.revision(), 5);
    }

    #[test]
    fn snapshot_replace_roundtrip() {
        let mut scene = SceneModel::with_root(&CanvasConfig::default());
        scene.add_node(node("r2", 500.0, 100.0));
        scene.add_connection(NodeId::intern("1"), NodeId::intern("r2"));
        let snap = scene.snapshot();

        let mut other = SceneModel::new();
        other.replace_all(snap.clone());
        assert_eq!(other.snapshot(), snap);
    }

    #[test]
    fn removal_keeps_paint_order() {
        let mut scene = SceneModel::new();
        for id in ["z1", "z2", "z3"] {
            scene.add_node(node(id, 0.0, 0.0));
        }
        scene.remove_node(NodeId::intern("z2"));
        let order: Vec<&str> = scene.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["z1", "z3"]);
    }
}
