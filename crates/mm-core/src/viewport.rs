//! Viewport geometry: the pannable, zoomable window into world space.
//!
//! Screen coordinates are relative to the rendering surface's top-left
//! corner. At zoom `z` a screen point `(px, py)` shows the world point
//! `(origin_x + px / z, origin_y + py / z)`.

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 3.0;

/// Nominal visible extent at zoom 1.
pub const DEFAULT_VIEW_WIDTH: f32 = 1200.0;
pub const DEFAULT_VIEW_HEIGHT: f32 = 800.0;

/// Screen-space bounding rectangle of the rendering surface.
///
/// Pointer events arrive in client coordinates; the surface rectangle turns
/// them into surface-local screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn to_local(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        (client_x - self.left, client_y - self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World coordinate shown at the surface's top-left corner.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Nominal visible extent in world units at zoom 1.
    pub width: f32,
    pub height: f32,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width,
            height,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Override the zoom clamp range. The current zoom is re-clamped.
    pub fn with_zoom_limits(mut self, min: f32, max: f32) -> Self {
        self.min_zoom = min.min(max);
        self.max_zoom = max.max(min);
        self.zoom = self.clamp_zoom(self.zoom);
        self
    }

    /// The fixed frame used by export: origin (0, 0), zoom 1.
    pub fn canonical(width: f32, height: f32) -> Self {
        Self::new(width, height)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom, clamped to the configured range. Origin is unchanged.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.clamp_zoom(zoom);
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        if zoom.is_finite() {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.zoom
        }
    }

    pub fn screen_to_world(&self, px: f32, py: f32) -> (f32, f32) {
        (
            self.origin_x + px / self.zoom,
            self.origin_y + py / self.zoom,
        )
    }

    pub fn world_to_screen(&self, wx: f32, wy: f32) -> (f32, f32) {
        (
            (wx - self.origin_x) * self.zoom,
            (wy - self.origin_y) * self.zoom,
        )
    }

    /// Multiply the zoom by `factor`, keeping the world point under the
    /// screen point `(px, py)` fixed.
    pub fn zoom_about(&mut self, px: f32, py: f32, factor: f32) {
        let (wx, wy) = self.screen_to_world(px, py);
        self.zoom = self.clamp_zoom(self.zoom * factor);
        self.origin_x = wx - px / self.zoom;
        self.origin_y = wy - py / self.zoom;
    }

    /// Shift the view by a screen-space drag delta. Dragging right moves the
    /// visible world left.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.origin_x -= dx / self.zoom;
        self.origin_y -= dy / self.zoom;
    }

    /// Zoom 1, origin (0, 0), nominal extent restored to `width × height`.
    pub fn reset(&mut self, width: f32, height: f32) {
        self.origin_x = 0.0;
        self.origin_y = 0.0;
        self.width = width;
        self.height = height;
        self.zoom = self.clamp_zoom(1.0);
    }

    /// Visible world rectangle `(x, y, width, height)`.
    pub fn visible_rect(&self) -> (f32, f32, f32, f32) {
        (
            self.origin_x,
            self.origin_y,
            self.width / self.zoom,
            self.height / self.zoom,
        )
    }

    /// Zoom as a rounded percentage for the zoom readout.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn screen_to_world_applies_origin_and_zoom() {
        let mut vp = Viewport::default();
        vp.origin_x = 100.0;
        vp.origin_y = 50.0;
        vp.set_zoom(2.0);
        assert_eq!(vp.screen_to_world(200.0, 100.0), (200.0, 100.0));
        assert_eq!(vp.world_to_screen(200.0, 100.0), (200.0, 100.0));
    }

    #[test]
    fn zoom_is_clamped_on_write() {
        let mut vp = Viewport::default();
        vp.set_zoom(10.0);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);
        vp.zoom_about(0.0, 0.0, 1000.0);
        assert_eq!(vp.zoom(), MAX_ZOOM);
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut vp = Viewport::default();
        vp.origin_x = 30.0;
        vp.origin_y = -12.0;
        let before = vp.screen_to_world(300.0, 200.0);
        vp.zoom_about(300.0, 200.0, 1.1);
        let after = vp.screen_to_world(300.0, 200.0);
        assert!(approx(before.0, after.0) && approx(before.1, after.1));
    }

    #[test]
    fn zoom_then_inverse_restores_view() {
        let mut vp = Viewport::default();
        vp.origin_x = 42.0;
        vp.origin_y = 17.0;
        vp.zoom_about(640.0, 360.0, 1.25);
        vp.zoom_about(640.0, 360.0, 1.0 / 1.25);
        assert!(approx(vp.zoom(), 1.0));
        assert!(approx(vp.origin_x, 42.0));
        assert!(approx(vp.origin_y, 17.0));
    }

    #[test]
    fn pan_is_inverse_of_drag_scaled_by_zoom() {
        let mut vp = Viewport::default();
        vp.set_zoom(2.0);
        vp.pan(40.0, -20.0);
        assert_eq!((vp.origin_x, vp.origin_y), (-20.0, 10.0));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut vp = Viewport::new(640.0, 480.0);
        vp.pan(10.0, 10.0);
        vp.set_zoom(2.5);
        vp.reset(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT);
        assert_eq!(vp, Viewport::default());
        assert_eq!(vp.visible_rect(), (0.0, 0.0, 1200.0, 800.0));
    }

    #[test]
    fn surface_rect_localizes_client_points() {
        let surface = SurfaceRect::new(10.0, 64.0, 1200.0, 800.0);
        assert_eq!(surface.to_local(110.0, 164.0), (100.0, 100.0));
    }
}
