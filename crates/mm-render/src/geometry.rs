//! Conversions from model geometry to `kurbo` shapes.

use kurbo::{Circle, Point, Rect, RoundedRect, Shape as _};
use mm_core::model::{Node, Outline};

/// A node outline as a concrete `kurbo` shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineShape {
    Box(RoundedRect),
    Circle(Circle),
}

impl OutlineShape {
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            OutlineShape::Box(rect) => rect.contains(pt),
            OutlineShape::Circle(circle) => circle.contains(pt),
        }
    }
}

impl From<Outline> for OutlineShape {
    fn from(outline: Outline) -> Self {
        match outline {
            Outline::Box {
                x,
                y,
                width,
                height,
                corner_radius,
            } => OutlineShape::Box(
                Rect::from_origin_size((x as f64, y as f64), (width as f64, height as f64))
                    .to_rounded_rect(corner_radius as f64),
            ),
            Outline::Circle { cx, cy, radius } => {
                OutlineShape::Circle(Circle::new((cx as f64, cy as f64), radius as f64))
            }
        }
    }
}

pub fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}

pub fn center(node: &Node) -> Point {
    let (cx, cy) = node.center();
    point(cx, cy)
}
