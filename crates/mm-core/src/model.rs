//! Mind-map data model: nodes, connections, and the scene snapshot.
//!
//! Positions and sizes are world-space `f32`s. The wire format (used for
//! saved maps, share links and the initial-data contract) is camelCase JSON:
//! `{ id, x, y, width, height, text, color: "#rrggbb", shape }` for nodes and
//! `{ id, fromNodeId, toNodeId }` for connections.

use crate::id::{ConnectionId, NodeId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            let v = hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?;
            Some(v as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// The closed set of node shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rectangle,
    /// Drawn as a circle of radius `max(width, height) / 2` around the center.
    #[serde(rename = "circle", alias = "ellipse")]
    Ellipse,
}

/// Bounding geometry of a node, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    /// Axis-aligned box with a corner radius.
    Box {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
    },
    Circle { cx: f32, cy: f32, radius: f32 },
}

/// Corner radius of a rectangle node's body.
pub const NODE_CORNER_RADIUS: f32 = 8.0;

impl Shape {
    /// Outline of a node of this shape occupying `(x, y, width, height)`,
    /// grown outward by `inflate` on every side.
    ///
    /// Rectangle halos grow their corner radius with the inflation so the
    /// outline stays concentric with the node body.
    pub fn outline(&self, x: f32, y: f32, width: f32, height: f32, inflate: f32) -> Outline {
        match self {
            Shape::Rectangle => Outline::Box {
                x: x - inflate,
                y: y - inflate,
                width: width + inflate * 2.0,
                height: height + inflate * 2.0,
                corner_radius: NODE_CORNER_RADIUS + inflate,
            },
            Shape::Ellipse => Outline::Circle {
                cx: x + width / 2.0,
                cy: y + height / 2.0,
                radius: width.max(height) / 2.0 + inflate,
            },
        }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A labeled shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// World-space top-left corner.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub color: Color,
    #[serde(default)]
    pub shape: Shape,
}

impl Node {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Hit-test geometry.
    pub fn outline(&self) -> Outline {
        self.shape.outline(self.x, self.y, self.width, self.height, 0.0)
    }

    /// Outline grown by `inflate`, used for selection and hover halos.
    pub fn halo(&self, inflate: f32) -> Outline {
        self.shape
            .outline(self.x, self.y, self.width, self.height, inflate)
    }
}

/// Partial update for [`Node`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub text: Option<String>,
    pub color: Option<Color>,
    pub shape: Option<Shape>,
}

impl NodePatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn shape(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    /// Apply the patch. Sizes must stay positive and coordinates finite;
    /// offending fields are skipped.
    pub fn apply(&self, node: &mut Node) {
        if let Some(x) = self.x.filter(|v| v.is_finite()) {
            node.x = x;
        }
        if let Some(y) = self.y.filter(|v| v.is_finite()) {
            node.y = y;
        }
        match self.width {
            Some(w) if w.is_finite() && w > 0.0 => node.width = w,
            Some(w) => log::warn!("ignoring non-positive width {w} for node {}", node.id),
            None => {}
        }
        match self.height {
            Some(h) if h.is_finite() && h > 0.0 => node.height = h,
            Some(h) => log::warn!("ignoring non-positive height {h} for node {}", node.id),
            None => {}
        }
        if let Some(text) = &self.text {
            node.text = text.clone();
        }
        if let Some(color) = self.color {
            node.color = color;
        }
        if let Some(shape) = self.shape {
            node.shape = shape;
        }
    }
}

// ─── Connections ─────────────────────────────────────────────────────────

/// An edge between two nodes. Stored with a direction, drawn undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    #[serde(rename = "fromNodeId")]
    pub from: NodeId,
    #[serde(rename = "toNodeId")]
    pub to: NodeId,
}

impl Connection {
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// The authoritative `{nodes, connections}` state handed across the
/// boundary: initial data, snapshots, saved maps and share payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl SceneData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }
}
