pub mod display;
pub mod geometry;
pub mod hit;
pub mod svg;

pub use display::{Decorations, DisplayList, DrawItem, EditOverlay, Primitive, RenderStyle, Role, Theme, render};
pub use hit::{Hit, hit_test};
pub use svg::{SvgOptions, to_svg};
