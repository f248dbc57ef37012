//! Integration tests: scene model invariants and the collaborator formats.

use mm_core::model::{Color, Node, SceneData, Shape};
use mm_core::share::{self, SharePayload};
use mm_core::{CanvasConfig, MapStore, NodeId, SceneModel, Viewport};
use pretty_assertions::assert_eq;

fn node(id: &str, x: f32) -> Node {
    Node {
        id: NodeId::intern(id),
        x,
        y: 0.0,
        width: 120.0,
        height: 60.0,
        text: id.to_string(),
        color: Color::BLACK,
        shape: Shape::Rectangle,
    }
}

fn no_dangling(scene: &SceneModel) -> bool {
    scene
        .connections()
        .iter()
        .all(|c| scene.contains_node(c.from) && scene.contains_node(c.to))
}

#[test]
fn removal_never_leaves_dangling_connections() {
    let ids: Vec<String> = (0..8).map(|i| format!("sm-{i}")).collect();
    let mut scene = SceneModel::new();
    for (i, id) in ids.iter().enumerate() {
        scene.add_node(node(id, i as f32 * 150.0));
    }
    // Densely connect, including parallel pairs.
    for a in &ids {
        for b in &ids {
            if a != b {
                scene.add_connection(NodeId::intern(a), NodeId::intern(b));
            }
        }
    }
    assert_eq!(scene.connections().len(), 8 * 7);

    // Interleave removals with re-adds in a fixed but irregular order.
    for (step, idx) in [3usize, 0, 7, 3, 5, 1, 6, 2, 4].into_iter().enumerate() {
        let id = NodeId::intern(&ids[idx]);
        if scene.contains_node(id) {
            scene.remove_node(id);
        } else {
            scene.add_node(node(&ids[idx], step as f32));
            scene.add_connection(id, NodeId::intern(&ids[(idx + 1) % ids.len()]));
        }
        assert!(no_dangling(&scene), "dangling connection after step {step}");
    }
}

#[test]
fn snapshot_replace_all_is_identity() {
    let mut scene = SceneModel::with_root(&CanvasConfig::default());
    scene.add_node(node("sm-x", 700.0));
    scene.add_connection(NodeId::intern("1"), NodeId::intern("sm-x"));
    let snapshot = scene.snapshot();
    scene.replace_all(snapshot.clone());
    assert_eq!(scene.snapshot(), snapshot);
}

#[test]
fn zoom_about_then_inverse_restores_view() {
    let mut vp = Viewport::default();
    vp.origin_x = -37.5;
    vp.origin_y = 12.25;
    for (px, py, factor) in [(0.0, 0.0, 1.2), (600.0, 400.0, 0.8), (13.0, 777.0, 2.5)] {
        let before = vp;
        vp.zoom_about(px, py, factor);
        vp.zoom_about(px, py, 1.0 / factor);
        assert!((vp.zoom() - before.zoom()).abs() < 1e-5);
        assert!((vp.origin_x - before.origin_x).abs() < 1e-3);
        assert!((vp.origin_y - before.origin_y).abs() < 1e-3);
    }
}

#[test]
fn shared_link_opens_as_saved_map() {
    let scene = SceneModel::with_root(&CanvasConfig::default()).snapshot();
    let url = share::share_url("https://maps.example/", &SharePayload::new("Trip", scene.clone()));
    let segment = url.rsplit('/').next().unwrap();
    let payload = share::decode(segment).unwrap();
    assert_eq!(payload.title, "Trip");

    let dir = tempfile::tempdir().unwrap();
    let store = MapStore::open(dir.path().join("maps.json"));
    let saved = store.save(payload.title, payload.scene).unwrap();
    let reopened = MapStore::open(dir.path().join("maps.json"));
    assert_eq!(reopened.get(&saved.id).unwrap().unwrap().scene, scene);
    assert_eq!(reopened.current_id().unwrap(), Some(saved.id));
}

#[test]
fn empty_data_is_empty() {
    let scene = SceneModel::from_data(SceneData::default());
    assert!(scene.is_empty());
}
