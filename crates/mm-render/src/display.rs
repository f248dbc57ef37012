//! Scene → display list.
//!
//! `render` is a pure projection of the scene, the viewport and the
//! transient UI state into a flat list of draw items in paint order:
//! connection lines and their delete handles first, then for each node its
//! halos, body and label, then the connect preview on top. Items carry a
//! [`Role`] so callers can strip the interaction-only ones (export does).

use crate::geometry::{self, OutlineShape};
use kurbo::{Circle, Line, Point, Rect};
use mm_core::id::{ConnectionId, NodeId};
use mm_core::model::{Color, Node};
use mm_core::{SceneModel, Viewport};

pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const LABEL_FONT_WEIGHT: u16 = 500;
pub const CONNECTION_WIDTH: f64 = 2.0;
/// Radius of the delete target at a connection's midpoint.
pub const HANDLE_RADIUS: f64 = 8.0;
pub const SELECTION_INFLATE: f32 = 4.0;
pub const HOVER_INFLATE: f32 = 2.0;
pub const SELECTION_DASH: [f64; 2] = [5.0, 5.0];

// ─── Theme ───────────────────────────────────────────────────────────────

/// Theme-dependent colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub grid: Color,
    pub connection: Color,
    pub delete_handle: Color,
    pub selection: Color,
    pub hover: Color,
    pub label: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::rgb8(0xe4, 0xe4, 0xe7).with_alpha(0.3),
            connection: Color::rgb8(0x15, 0x80, 0x3d),
            delete_handle: Color::rgb8(0xef, 0x44, 0x44),
            selection: Color::rgb8(0x15, 0x80, 0x3d),
            hover: Color::rgb8(0x84, 0xcc, 0x16),
            label: Color::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1c, 0x1c, 0x1e),
            grid: Color::rgb8(0x3f, 0x3f, 0x46).with_alpha(0.3),
            connection: Color::rgb8(0x22, 0xc5, 0x5e),
            delete_handle: Color::rgb8(0xf8, 0x71, 0x71),
            selection: Color::rgb8(0x22, 0xc5, 0x5e),
            hover: Color::rgb8(0xa3, 0xe6, 0x35),
            label: Color::WHITE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

// ─── Display list ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        line: Line,
        stroke: StrokeStyle,
    },
    Outline {
        shape: OutlineShape,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Circle {
        circle: Circle,
        fill: Color,
    },
    /// Single-line label centered on `anchor`. Never wrapped or clipped.
    Label {
        anchor: Point,
        text: String,
        size: f64,
        weight: u16,
        color: Color,
    },
}

/// What a draw item depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Connection(ConnectionId),
    DeleteHandle(ConnectionId),
    SelectionHalo(NodeId),
    HoverHalo(NodeId),
    NodeBody(NodeId),
    NodeLabel(NodeId),
    ConnectPreview,
}

impl Role {
    /// Decorations that only make sense while interacting.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Role::DeleteHandle(_) | Role::SelectionHalo(_) | Role::HoverHalo(_) | Role::ConnectPreview
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub role: Role,
    pub primitive: Primitive,
}

/// Background reference grid, tiled in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub spacing: f64,
    pub color: Color,
    pub width: f64,
}

/// In-progress text edit, drawn by the host as an input overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOverlay {
    pub node: NodeId,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    /// Visible world rectangle.
    pub view: Rect,
    pub background: Color,
    pub grid: Option<Grid>,
    pub items: Vec<DrawItem>,
    pub edit: Option<EditOverlay>,
}

impl DisplayList {
    /// Drop interaction-only decorations, the edit overlay and, unless
    /// `keep_grid`, the background grid.
    pub fn into_static(mut self, keep_grid: bool) -> Self {
        self.items.retain(|item| !item.role.is_interactive());
        self.edit = None;
        if !keep_grid {
            self.grid = None;
        }
        self
    }

    pub fn items_with_role(&self, pred: impl Fn(&Role) -> bool) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |item| pred(&item.role))
    }
}

// ─── Inputs ──────────────────────────────────────────────────────────────

/// Transient UI state the renderer reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
    pub hovered_handle: Option<ConnectionId>,
    /// Connect source and the pointer's world position.
    pub connect_preview: Option<(NodeId, (f32, f32))>,
    pub editing: Option<EditOverlay>,
}

impl Decorations {
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub theme: Theme,
    pub grid_spacing: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            grid_spacing: 20.0,
        }
    }
}

// ─── Render ──────────────────────────────────────────────────────────────

/// Connections whose endpoints both resolve, with their line segments.
/// Connections with a missing endpoint are skipped.
pub fn drawable_connections(scene: &SceneModel) -> impl Iterator<Item = (ConnectionId, Line)> + '_ {
    scene.connections().iter().filter_map(move |conn| {
        let Some((from, to)) = scene.endpoints(conn) else {
            log::trace!("skipping connection {} with a dangling endpoint", conn.id);
            return None;
        };
        Some((conn.id, Line::new(geometry::center(from), geometry::center(to))))
    })
}

pub fn render(
    scene: &SceneModel,
    viewport: &Viewport,
    deco: &Decorations,
    style: &RenderStyle,
) -> DisplayList {
    let theme = &style.theme;
    let (vx, vy, vw, vh) = viewport.visible_rect();
    let mut items = Vec::with_capacity(scene.node_count() * 3 + scene.connections().len() * 2);

    for (id, line) in drawable_connections(scene) {
        items.push(DrawItem {
            role: Role::Connection(id),
            primitive: Primitive::Line {
                line,
                stroke: StrokeStyle {
                    color: theme.connection,
                    width: CONNECTION_WIDTH,
                    dash: None,
                },
            },
        });
        // Invisible until hovered, but always present as a target.
        let alpha = if deco.hovered_handle == Some(id) { 1.0 } else { 0.0 };
        items.push(DrawItem {
            role: Role::DeleteHandle(id),
            primitive: Primitive::Circle {
                circle: Circle::new(line.p0.midpoint(line.p1), HANDLE_RADIUS),
                fill: theme.delete_handle.with_alpha(alpha),
            },
        });
    }

    for node in scene.nodes() {
        push_node(&mut items, node, deco, theme);
    }

    if let Some((source, (px, py))) = deco.connect_preview
        && let Some(node) = scene.node(source)
    {
        items.push(DrawItem {
            role: Role::ConnectPreview,
            primitive: Primitive::Line {
                line: Line::new(geometry::center(node), geometry::point(px, py)),
                stroke: StrokeStyle {
                    color: theme.selection,
                    width: CONNECTION_WIDTH,
                    dash: Some(SELECTION_DASH),
                },
            },
        });
    }

    DisplayList {
        view: Rect::from_origin_size((vx as f64, vy as f64), (vw as f64, vh as f64)),
        background: theme.background,
        grid: Some(Grid {
            spacing: style.grid_spacing,
            color: theme.grid,
            width: 0.5,
        }),
        items,
        edit: deco.editing.clone(),
    }
}

fn push_node(items: &mut Vec<DrawItem>, node: &Node, deco: &Decorations, theme: &Theme) {
    let selected = deco.selected == Some(node.id);
    if selected {
        items.push(DrawItem {
            role: Role::SelectionHalo(node.id),
            primitive: Primitive::Outline {
                shape: node.halo(SELECTION_INFLATE).into(),
                fill: None,
                stroke: Some(StrokeStyle {
                    color: theme.selection,
                    width: 2.0,
                    dash: Some(SELECTION_DASH),
                }),
            },
        });
    }

    // A hovered node other than the selection is a valid connect target.
    let connect_target = deco.hovered == Some(node.id)
        && deco.selected.is_some_and(|sel| sel != node.id);
    if connect_target {
        items.push(DrawItem {
            role: Role::HoverHalo(node.id),
            primitive: Primitive::Outline {
                shape: node.halo(HOVER_INFLATE).into(),
                fill: None,
                stroke: Some(StrokeStyle {
                    color: theme.hover,
                    width: 1.5,
                    dash: None,
                }),
            },
        });
    }

    items.push(DrawItem {
        role: Role::NodeBody(node.id),
        primitive: Primitive::Outline {
            shape: node.outline().into(),
            fill: Some(node.color),
            stroke: None,
        },
    });

    items.push(DrawItem {
        role: Role::NodeLabel(node.id),
        primitive: Primitive::Label {
            anchor: geometry::center(node),
            text: node.text.clone(),
            size: LABEL_FONT_SIZE,
            weight: LABEL_FONT_WEIGHT,
            color: theme.label,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::model::{Connection, SceneData, Shape};
    use pretty_assertions::assert_eq;

    fn node(id: &str, x: f32, shape: Shape) -> Node {
        Node {
            id: NodeId::intern(id),
            x,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            text: id.to_string(),
            color: Color::BLACK,
            shape,
        }
    }

    fn scene() -> SceneModel {
        SceneModel::from_data(SceneData {
            nodes: vec![
                node("ra", 0.0, Shape::Rectangle),
                node("rb", 200.0, Shape::Ellipse),
            ],
            connections: vec![
                Connection {
                    id: ConnectionId::intern("rc1"),
                    from: NodeId::intern("ra"),
                    to: NodeId::intern("rb"),
                },
                Connection {
                    id: ConnectionId::intern("rc-dangling"),
                    from: NodeId::intern("ra"),
                    to: NodeId::intern("gone"),
                },
            ],
        })
    }

    fn roles(list: &DisplayList) -> Vec<Role> {
        list.items.iter().map(|item| item.role).collect()
    }

    #[test]
    fn dangling_connections_are_not_drawn() {
        let list = render(&scene(), &Viewport::default(), &Decorations::none(), &RenderStyle::default());
        let conns: Vec<_> = list
            .items_with_role(|r| matches!(r, Role::Connection(_)))
            .collect();
        assert_eq!(conns.len(), 1);
        match &conns[0].primitive {
            Primitive::Line { line, .. } => {
                assert_eq!(line.p0, Point::new(50.0, 25.0));
                assert_eq!(line.p1, Point::new(250.0, 25.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn paint_order_is_connections_then_nodes() {
        let list = render(&scene(), &Viewport::default(), &Decorations::none(), &RenderStyle::default());
        let (ra, rb) = (NodeId::intern("ra"), NodeId::intern("rb"));
        let c = ConnectionId::intern("rc1");
        assert_eq!(
            roles(&list),
            vec![
                Role::Connection(c),
                Role::DeleteHandle(c),
                Role::NodeBody(ra),
                Role::NodeLabel(ra),
                Role::NodeBody(rb),
                Role::NodeLabel(rb),
            ]
        );
    }

    #[test]
    fn selection_halo_is_shape_dependent() {
        let deco = Decorations {
            selected: Some(NodeId::intern("rb")),
            ..Decorations::none()
        };
        let list = render(&scene(), &Viewport::default(), &deco, &RenderStyle::default());
        let halo = list
            .items_with_role(|r| matches!(r, Role::SelectionHalo(_)))
            .next()
            .unwrap();
        match &halo.primitive {
            Primitive::Outline {
                shape: OutlineShape::Circle(circle),
                stroke: Some(stroke),
                fill: None,
            } => {
                assert_eq!(circle.radius, 54.0);
                assert_eq!(stroke.dash, Some(SELECTION_DASH));
            }
            other => panic!("expected dashed circle halo, got {other:?}"),
        }
    }

    #[test]
    fn hover_halo_only_marks_other_nodes_when_something_is_selected() {
        let ra = NodeId::intern("ra");
        let rb = NodeId::intern("rb");

        let hover_only = Decorations {
            hovered: Some(ra),
            ..Decorations::none()
        };
        let list = render(&scene(), &Viewport::default(), &hover_only, &RenderStyle::default());
        assert!(!roles(&list).contains(&Role::HoverHalo(ra)));

        let hover_self = Decorations {
            hovered: Some(ra),
            selected: Some(ra),
            ..Decorations::none()
        };
        let list = render(&scene(), &Viewport::default(), &hover_self, &RenderStyle::default());
        assert!(!roles(&list).contains(&Role::HoverHalo(ra)));

        let hover_target = Decorations {
            hovered: Some(ra),
            selected: Some(rb),
            ..Decorations::none()
        };
        let list = render(&scene(), &Viewport::default(), &hover_target, &RenderStyle::default());
        assert!(roles(&list).contains(&Role::HoverHalo(ra)));
    }

    #[test]
    fn into_static_strips_interaction_items() {
        let deco = Decorations {
            selected: Some(NodeId::intern("ra")),
            hovered: Some(NodeId::intern("rb")),
            connect_preview: Some((NodeId::intern("ra"), (400.0, 400.0))),
            editing: Some(EditOverlay {
                node: NodeId::intern("ra"),
                buffer: "draft".into(),
            }),
            ..Decorations::none()
        };
        let list = render(&scene(), &Viewport::default(), &deco, &RenderStyle::default())
            .into_static(false);
        assert!(list.items.iter().all(|item| !item.role.is_interactive()));
        assert_eq!(list.items.len(), 5);
        assert!(list.grid.is_none());
        assert!(list.edit.is_none());
    }

    #[test]
    fn view_follows_viewport() {
        let mut vp = Viewport::default();
        vp.origin_x = 10.0;
        vp.set_zoom(2.0);
        let list = render(&SceneModel::new(), &vp, &Decorations::none(), &RenderStyle::default());
        assert_eq!(list.view, Rect::new(10.0, 0.0, 610.0, 400.0));
        assert!(list.items.is_empty());
    }
}
