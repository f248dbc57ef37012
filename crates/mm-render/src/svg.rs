//! Display list → standalone SVG document.
//!
//! The outer `<svg>` is the padded output surface filled with the
//! background color; a nested `<svg>` maps the display list's world view
//! onto the unpadded frame, so the grid pattern and every shape scale with
//! the world rather than the screen.

use crate::display::{DisplayList, Primitive, StrokeStyle};
use crate::geometry::OutlineShape;
use mm_core::model::Color;

pub const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Frame size in output units, excluding padding.
    pub width: f64,
    pub height: f64,
    /// Margin on every side, filled with the background.
    pub padding: f64,
}

impl SvgOptions {
    /// Frame matching the display list's view one-to-one.
    pub fn for_view(list: &DisplayList) -> Self {
        Self {
            width: list.view.width(),
            height: list.view.height(),
            padding: 0.0,
        }
    }

    pub fn outer_size(&self) -> (f64, f64) {
        (
            self.width + self.padding * 2.0,
            self.height + self.padding * 2.0,
        )
    }
}

/// `fill="#rrggbb"`, plus `fill-opacity` when the colour is translucent.
fn color_attrs(name: &str, color: Color) -> String {
    let hex = color.with_alpha(1.0).to_hex();
    let [.., a] = color.to_rgba8();
    if a == 255 {
        format!("{name}=\"{hex}\"")
    } else {
        format!("{name}=\"{hex}\" {name}-opacity=\"{}\"", a as f32 / 255.0)
    }
}

fn stroke_attrs(stroke: &StrokeStyle) -> String {
    let mut out = format!("{} stroke-width=\"{}\"", color_attrs("stroke", stroke.color), stroke.width);
    if let Some([on, off]) = stroke.dash {
        out.push_str(&format!(" stroke-dasharray=\"{on} {off}\""));
    }
    out
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

pub fn to_svg(list: &DisplayList, opts: &SvgOptions) -> String {
    let (outer_w, outer_h) = opts.outer_size();
    let view = list.view;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{outer_w}\" height=\"{outer_h}\" viewBox=\"0 0 {outer_w} {outer_h}\">\n"
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{outer_w}\" height=\"{outer_h}\" {}/>\n",
        color_attrs("fill", list.background)
    ));
    svg.push_str(&format!(
        "<svg x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\" overflow=\"hidden\">\n",
        opts.padding,
        opts.padding,
        opts.width,
        opts.height,
        view.x0,
        view.y0,
        view.width(),
        view.height()
    ));

    if let Some(grid) = list.grid {
        let s = grid.spacing;
        svg.push_str("<defs>\n");
        svg.push_str(&format!(
            "  <pattern id=\"grid\" width=\"{s}\" height=\"{s}\" patternUnits=\"userSpaceOnUse\">\n"
        ));
        svg.push_str(&format!(
            "    <path d=\"M {s} 0 L 0 0 0 {s}\" fill=\"none\" {} stroke-width=\"{}\"/>\n",
            color_attrs("stroke", grid.color),
            grid.width
        ));
        svg.push_str("  </pattern>\n</defs>\n");
        svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"url(#grid)\"/>\n",
            view.x0,
            view.y0,
            view.width(),
            view.height()
        ));
    }

    for item in &list.items {
        push_primitive(&mut svg, &item.primitive);
    }

    svg.push_str("</svg>\n</svg>\n");
    svg
}

fn push_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Line { line, stroke } => {
            out.push_str(&format!(
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>\n",
                line.p0.x,
                line.p0.y,
                line.p1.x,
                line.p1.y,
                stroke_attrs(stroke)
            ));
        }
        Primitive::Outline {
            shape,
            fill,
            stroke,
        } => {
            let paint = match (fill, stroke) {
                (Some(fill), Some(stroke)) => format!("{} {}", color_attrs("fill", *fill), stroke_attrs(stroke)),
                (Some(fill), None) => color_attrs("fill", *fill),
                (None, Some(stroke)) => format!("fill=\"none\" {}", stroke_attrs(stroke)),
                (None, None) => "fill=\"none\"".to_string(),
            };
            match shape {
                OutlineShape::Box(rr) => {
                    let rect = rr.rect();
                    let r = rr.radii().top_left;
                    out.push_str(&format!(
                        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" {paint}/>\n",
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height()
                    ));
                }
                OutlineShape::Circle(circle) => {
                    out.push_str(&format!(
                        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" {paint}/>\n",
                        circle.center.x, circle.center.y, circle.radius
                    ));
                }
            }
        }
        Primitive::Circle { circle, fill } => {
            out.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>\n",
                circle.center.x,
                circle.center.y,
                circle.radius,
                color_attrs("fill", *fill)
            ));
        }
        Primitive::Label {
            anchor,
            text,
            size,
            weight,
            color,
        } => {
            out.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{size}\" font-weight=\"{weight}\" text-anchor=\"middle\" dominant-baseline=\"central\" {}>{}</text>\n",
                anchor.x,
                anchor.y,
                color_attrs("fill", *color),
                escape_xml(text)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Decorations, RenderStyle, render};
    use mm_core::model::{Node, SceneData, Shape};
    use mm_core::{NodeId, SceneModel, Viewport};
    use pretty_assertions::assert_eq;

    fn scene_with(text: &str, shape: Shape) -> SceneModel {
        SceneModel::from_data(SceneData {
            nodes: vec![Node {
                id: NodeId::intern("sv1"),
                x: 10.0,
                y: 20.0,
                width: 120.0,
                height: 60.0,
                text: text.to_string(),
                color: Color::from_hex("#15803d").unwrap(),
                shape,
            }],
            connections: vec![],
        })
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        let list = render(
            &scene_with("<script>", Shape::Rectangle),
            &Viewport::default(),
            &Decorations::none(),
            &RenderStyle::default(),
        );
        let svg = to_svg(&list, &SvgOptions::for_view(&list));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn padded_frame_wraps_world_view() {
        let list = render(
            &scene_with("Idea", Shape::Rectangle),
            &Viewport::canonical(1200.0, 800.0),
            &Decorations::none(),
            &RenderStyle::default(),
        )
        .into_static(false);
        let opts = SvgOptions {
            width: 1200.0,
            height: 800.0,
            padding: 20.0,
        };
        assert_eq!(opts.outer_size(), (1240.0, 840.0));
        let svg = to_svg(&list, &opts);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1240\" height=\"840\""));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"1240\" height=\"840\" fill=\"#ffffff\"/>"));
        assert!(svg.contains("viewBox=\"0 0 1200 800\""));
        assert!(svg.contains("<rect x=\"10\" y=\"20\" width=\"120\" height=\"60\" rx=\"8\" ry=\"8\" fill=\"#15803d\"/>"));
        assert!(svg.contains(">Idea</text>"));
        assert!(!svg.contains("pattern"));
    }

    #[test]
    fn translucent_colors_split_into_hex_and_opacity() {
        assert_eq!(color_attrs("fill", Color::from_hex("#15803d").unwrap()), "fill=\"#15803d\"");
        let grid = Color::from_hex("#e4e4e7").unwrap().with_alpha(0.4);
        assert_eq!(
            color_attrs("stroke", grid),
            "stroke=\"#e4e4e7\" stroke-opacity=\"0.4\""
        );
    }

    #[test]
    fn grid_and_dashes_are_emitted() {
        let deco = Decorations {
            selected: Some(NodeId::intern("sv1")),
            ..Decorations::none()
        };
        let list = render(
            &scene_with("Idea", Shape::Ellipse),
            &Viewport::default(),
            &deco,
            &RenderStyle::default(),
        );
        let svg = to_svg(&list, &SvgOptions::for_view(&list));
        assert!(svg.contains("patternUnits=\"userSpaceOnUse\""));
        assert!(svg.contains("stroke-dasharray=\"5 5\""));
        assert!(svg.contains("<circle cx=\"70\" cy=\"50\" r=\"64\" fill=\"none\""));
    }
}
