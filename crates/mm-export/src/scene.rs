//! Canonical static scene: the renderer's output for the fixed export frame
//! with every interaction-only decoration stripped.

use crate::config::ExportConfig;
use mm_core::model::SceneData;
use mm_core::{SceneModel, Viewport};
use mm_render::display::{Decorations, RenderStyle, Theme, render};
use mm_render::svg::{SvgOptions, to_svg};

/// A deterministic, viewport-independent SVG of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticScene {
    pub svg: String,
    /// Padded size in frame units.
    pub width: f32,
    pub height: f32,
}

pub fn build_static_scene(data: &SceneData, cfg: &ExportConfig) -> StaticScene {
    let scene = SceneModel::from_data(data.clone());
    let viewport = Viewport::canonical(cfg.frame_width, cfg.frame_height);
    let style = RenderStyle {
        theme: Theme {
            background: cfg.background,
            ..Theme::light()
        },
        ..RenderStyle::default()
    };
    let list = render(&scene, &viewport, &Decorations::none(), &style).into_static(cfg.include_grid);
    let opts = SvgOptions {
        width: cfg.frame_width as f64,
        height: cfg.frame_height as f64,
        padding: cfg.padding as f64,
    };
    let (width, height) = cfg.outer_size();
    log::debug!(
        "static scene: {} nodes, {} draw items, {width}x{height}",
        scene.node_count(),
        list.items.len()
    );
    StaticScene {
        svg: to_svg(&list, &opts),
        width,
        height,
    }
}
