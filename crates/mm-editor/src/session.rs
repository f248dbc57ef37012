//! Canvas session: one open document's scene, viewport and interaction
//! state, driven by [`InputEvent`]s.
//!
//! Each event is handled to completion before the next; the session is
//! confined to the UI thread. Exports are started with
//! [`CanvasHandle::begin_export`], run off-thread by the host, and handed
//! back with [`CanvasHandle::finish_export`], so input keeps flowing while
//! an export is in flight.

use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::mutation::{Applied, SceneMutation};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::state::{Gesture, InteractionState};
use mm_core::id::{ConnectionId, NodeId};
use mm_core::model::{Color, Node, SceneData, Shape};
use mm_core::{CanvasConfig, SceneModel, SceneObserver, SurfaceRect, Viewport};
use mm_export::{ExportArtifact, ExportConfig, ExportError, ExportJob, ExportKind, ExportServices};
use mm_render::display::{Decorations, DisplayList, EditOverlay, RenderStyle, Theme, render};
use mm_render::hit::{Hit, hit_test, handle_at, node_at};
use std::cell::OnceCell;
use std::sync::Arc;

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub redraw: bool,
    /// Suppress the platform default (page scroll, browser shortcut).
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: EventOutcome = EventOutcome {
        redraw: false,
        prevent_default: false,
    };

    pub const REDRAW: EventOutcome = EventOutcome {
        redraw: true,
        prevent_default: false,
    };

    fn redraw_if(changed: bool) -> Self {
        Self {
            redraw: changed,
            prevent_default: false,
        }
    }

    fn consumed(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// Commands a host issues to its canvas.
pub trait CanvasHandle {
    /// Snapshot the scene for an export. Fails while another export is in
    /// flight.
    fn begin_export(&mut self, kind: ExportKind) -> Result<ExportJob, ExportError>;

    /// Hand back the outcome of a job from `begin_export`, leaving the
    /// exporting state.
    fn finish_export(
        &mut self,
        result: Result<ExportArtifact, ExportError>,
    ) -> Result<ExportArtifact, ExportError>;

    fn current_data(&self) -> SceneData;

    /// Replace the whole scene and reset all interaction state.
    fn load_data(&mut self, data: SceneData);
}

pub struct CanvasSession {
    scene: SceneModel,
    viewport: Viewport,
    state: InteractionState,
    config: CanvasConfig,
    style: RenderStyle,
    surface: Option<SurfaceRect>,
    read_only: bool,
    title: Option<String>,
    exporting: bool,
    export_config: ExportConfig,
    export_services: OnceCell<Arc<ExportServices>>,
}

impl CanvasSession {
    /// Open a session on `initial`, or on a single root node when `None`.
    pub fn new(config: CanvasConfig, initial: Option<SceneData>) -> Self {
        let scene = match initial {
            Some(data) => SceneModel::from_data(data),
            None => SceneModel::with_root(&config),
        };
        let viewport = Viewport::new(config.view_width, config.view_height)
            .with_zoom_limits(config.min_zoom, config.max_zoom);
        let style = RenderStyle {
            theme: Theme::light(),
            grid_spacing: config.grid_spacing as f64,
        };
        Self {
            scene,
            viewport,
            state: InteractionState::default(),
            config,
            style,
            surface: None,
            read_only: false,
            title: None,
            exporting: false,
            export_config: ExportConfig::default(),
            export_services: OnceCell::new(),
        }
    }

    /// A viewer for shared maps: view controls and hover work, edits are
    /// ignored.
    pub fn read_only(config: CanvasConfig, data: SceneData) -> Self {
        let mut session = Self::new(config, Some(data));
        session.read_only = true;
        session
    }

    pub fn with_export_config(mut self, config: ExportConfig) -> Self {
        self.export_config = config;
        self.export_services = OnceCell::new();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.style.theme = theme;
        self
    }

    pub fn set_observer(&mut self, observer: impl SceneObserver + 'static) {
        self.scene.set_observer(observer);
    }

    /// Screen rectangle of the rendering surface. Pointer events are ignored
    /// until it is known.
    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = Some(surface);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.state.selected.and_then(|id| self.scene.node(id))
    }

    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    /// Rasterizer and composer, created on first use.
    pub fn export_services(&self) -> Arc<ExportServices> {
        Arc::clone(
            self.export_services
                .get_or_init(|| Arc::new(ExportServices::new(self.export_config.clone()))),
        )
    }

    pub fn render(&self) -> DisplayList {
        let deco = Decorations {
            selected: self.state.selected,
            hovered: self.state.hovered,
            hovered_handle: self.state.hovered_handle,
            connect_preview: self.state.connect_source.zip(self.state.pointer_world),
            editing: match &self.state.gesture {
                Gesture::EditingText { node, buffer } => Some(EditOverlay {
                    node: *node,
                    buffer: buffer.clone(),
                }),
                _ => None,
            },
        };
        render(&self.scene, &self.viewport, &deco, &self.style)
    }

    // ─── View controls ───────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        let z = self.viewport.zoom() * self.config.zoom_in_step;
        self.viewport.set_zoom(z);
    }

    pub fn zoom_out(&mut self) {
        let z = self.viewport.zoom() * self.config.zoom_out_step;
        self.viewport.set_zoom(z);
    }

    pub fn reset_view(&mut self) {
        self.viewport
            .reset(self.config.view_width, self.config.view_height);
    }

    // ─── Property panel ──────────────────────────────────────────────────

    pub fn set_selected_color(&mut self, color: Color) -> bool {
        let Some(id) = self.state.selected else {
            return false;
        };
        self.apply(SceneMutation::SetColor { id, color }).changed()
    }

    pub fn set_selected_shape(&mut self, shape: Shape) -> bool {
        let Some(id) = self.state.selected else {
            return false;
        };
        self.apply(SceneMutation::SetShape { id, shape }).changed()
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.state.selected else {
            return false;
        };
        self.remove_node(id)
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    pub fn handle(&mut self, event: &InputEvent) -> EventOutcome {
        log::trace!("event {event:?}");
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(*x, *y, *button, modifiers),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp { .. } => self.end_gesture(),
            InputEvent::PointerLeave => {
                let hover = self.state.hovered.take().is_some() | self.state.hovered_handle.take().is_some();
                let ended = self.end_gesture();
                EventOutcome::redraw_if(hover || ended.redraw)
            }
            InputEvent::Click {
                x,
                y,
                button: PointerButton::Primary,
                modifiers,
            } => self.click(*x, *y, modifiers),
            InputEvent::Click { .. } => EventOutcome::IGNORED,
            InputEvent::DoubleClick { x, y } => self.double_click(*x, *y),
            InputEvent::Wheel { x, y, delta_y } => self.wheel(*x, *y, *delta_y),
            InputEvent::Key { key, modifiers } => self.key(key, modifiers),
            InputEvent::EditText { text } => match &mut self.state.gesture {
                Gesture::EditingText { buffer, .. } => {
                    buffer.clone_from(text);
                    EventOutcome::REDRAW
                }
                _ => EventOutcome::IGNORED,
            },
            InputEvent::FocusLost => EventOutcome::redraw_if(self.commit_edit()),
        }
    }

    fn local(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        Some(self.surface?.to_local(x, y))
    }

    fn world(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (px, py) = self.local(x, y)?;
        Some(self.viewport.screen_to_world(px, py))
    }

    fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton, modifiers: &Modifiers) -> EventOutcome {
        let Some((wx, wy)) = self.world(x, y) else {
            return EventOutcome::IGNORED;
        };
        self.commit_edit();
        let hit = hit_test(&self.scene, wx, wy);

        match (button, hit) {
            (PointerButton::Primary, Hit::Node(id)) => {
                if self.read_only || self.press_completes_connection(id, modifiers) {
                    return EventOutcome::IGNORED;
                }
                let Some(node) = self.scene.node(id) else {
                    return EventOutcome::IGNORED;
                };
                let offset = (wx - node.x, wy - node.y);
                log::debug!("drag {id} with offset {offset:?}");
                self.state.gesture = Gesture::Dragging { node: id, offset };
                self.state.selected = Some(id);
                EventOutcome::REDRAW
            }
            (PointerButton::Middle, _) => self.start_pan(x, y),
            (PointerButton::Primary, Hit::Canvas) if modifiers.ctrl => self.start_pan(x, y),
            _ => EventOutcome::IGNORED,
        }
    }

    fn start_pan(&mut self, x: f32, y: f32) -> EventOutcome {
        self.state.gesture = Gesture::Panning { last: (x, y) };
        EventOutcome::IGNORED.consumed()
    }

    /// A press that the following click turns into a connection must not
    /// move the node or steal the selection.
    fn press_completes_connection(&self, id: NodeId, modifiers: &Modifiers) -> bool {
        if self.state.connect_source.is_some_and(|src| src != id) {
            return true;
        }
        modifiers.shift && self.state.selected.is_some_and(|sel| sel != id)
    }

    fn pointer_move(&mut self, x: f32, y: f32) -> EventOutcome {
        if let Gesture::Panning { last } = &mut self.state.gesture {
            let (dx, dy) = (x - last.0, y - last.1);
            *last = (x, y);
            self.viewport.pan(dx, dy);
            self.state.pointer_world = self.world(x, y);
            return EventOutcome::REDRAW;
        }

        let Some((wx, wy)) = self.world(x, y) else {
            return EventOutcome::IGNORED;
        };
        self.state.pointer_world = Some((wx, wy));
        let mut redraw = self.state.connect_source.is_some();

        if let Gesture::Dragging { node, offset } = self.state.gesture {
            // Reconstructed from the pointer each time, never accumulated.
            let (nx, ny) = (wx - offset.0, wy - offset.1);
            log::trace!("drag {node} to ({nx}, {ny})");
            redraw |= self
                .apply(SceneMutation::MoveNode {
                    id: node,
                    x: nx,
                    y: ny,
                })
                .changed();
        }

        let hovered = node_at(&self.scene, wx, wy);
        let hovered_handle = match hovered {
            Some(_) => None,
            None => handle_at(&self.scene, wx, wy),
        };
        if hovered != self.state.hovered || hovered_handle != self.state.hovered_handle {
            self.state.hovered = hovered;
            self.state.hovered_handle = hovered_handle;
            redraw = true;
        }
        EventOutcome::redraw_if(redraw)
    }

    fn end_gesture(&mut self) -> EventOutcome {
        match self.state.gesture {
            Gesture::Dragging { .. } | Gesture::Panning { .. } => {
                self.state.gesture = Gesture::Idle;
                EventOutcome::REDRAW
            }
            _ => EventOutcome::IGNORED,
        }
    }

    fn click(&mut self, x: f32, y: f32, modifiers: &Modifiers) -> EventOutcome {
        let Some((wx, wy)) = self.world(x, y) else {
            return EventOutcome::IGNORED;
        };
        match hit_test(&self.scene, wx, wy) {
            Hit::Node(id) => {
                if let Some(source) = self.state.connect_source.take() {
                    if source != id {
                        self.connect(source, id);
                    }
                    return EventOutcome::REDRAW;
                }
                match self.state.selected {
                    Some(sel) if modifiers.shift && sel != id => self.connect(sel, id),
                    _ => self.state.selected = Some(id),
                }
                EventOutcome::REDRAW
            }
            Hit::DeleteHandle(id) => {
                let removed = self.remove_connection(id);
                EventOutcome::redraw_if(removed)
            }
            Hit::Canvas => {
                self.state.selected = None;
                self.state.cancel_connect();
                EventOutcome::REDRAW
            }
        }
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        if let Applied::ConnectionAdded(id) = self.apply(SceneMutation::AddConnection { from, to }) {
            log::debug!("connected {from} -> {to} ({id})");
        }
        self.state.selected = None;
    }

    fn double_click(&mut self, x: f32, y: f32) -> EventOutcome {
        let Some((wx, wy)) = self.world(x, y) else {
            return EventOutcome::IGNORED;
        };
        if self.read_only {
            return EventOutcome::IGNORED;
        }
        match hit_test(&self.scene, wx, wy) {
            Hit::Node(id) => EventOutcome::redraw_if(self.begin_edit(id)),
            Hit::Canvas => {
                self.commit_edit();
                let cfg = &self.config;
                let node = Node {
                    id: NodeId::generate(),
                    x: wx - cfg.node_width / 2.0,
                    y: wy - cfg.node_height / 2.0,
                    width: cfg.node_width,
                    height: cfg.node_height,
                    text: cfg.new_node_text.clone(),
                    color: cfg.new_node_color,
                    shape: Shape::Rectangle,
                };
                let id = node.id;
                self.apply(SceneMutation::AddNode { node: Box::new(node) });
                self.state.selected = Some(id);
                EventOutcome::REDRAW
            }
            Hit::DeleteHandle(_) => EventOutcome::IGNORED,
        }
    }

    fn wheel(&mut self, x: f32, y: f32, delta_y: f32) -> EventOutcome {
        let factor = if delta_y > 0.0 {
            self.config.wheel_zoom_out
        } else {
            self.config.wheel_zoom_in
        };
        match self.local(x, y) {
            Some((px, py)) => self.viewport.zoom_about(px, py, factor),
            None => {
                let z = self.viewport.zoom() * factor;
                self.viewport.set_zoom(z);
            }
        }
        EventOutcome::REDRAW.consumed()
    }

    fn key(&mut self, key: &str, modifiers: &Modifiers) -> EventOutcome {
        if self.state.is_editing() {
            return match key {
                "Enter" => EventOutcome::redraw_if(self.commit_edit()).consumed(),
                "Escape" => {
                    self.state.gesture = Gesture::Idle;
                    EventOutcome::REDRAW.consumed()
                }
                _ => EventOutcome::IGNORED,
            };
        }

        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return EventOutcome::IGNORED;
        };
        log::debug!("shortcut {key} -> {action:?}");
        match action {
            ShortcutAction::ZoomIn => {
                self.zoom_in();
                EventOutcome::REDRAW.consumed()
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
                EventOutcome::REDRAW.consumed()
            }
            ShortcutAction::ResetView => {
                self.reset_view();
                EventOutcome::REDRAW.consumed()
            }
            ShortcutAction::Deselect => {
                let had = self.state.selected.take().is_some() | self.state.connect_source.take().is_some();
                EventOutcome::redraw_if(had)
            }
            node_action => {
                let Some(id) = self.state.selected.filter(|id| self.scene.contains_node(*id)) else {
                    return EventOutcome::IGNORED;
                };
                if self.read_only {
                    return EventOutcome::IGNORED;
                }
                match node_action {
                    ShortcutAction::Delete => EventOutcome::redraw_if(self.remove_node(id)),
                    ShortcutAction::EditText => EventOutcome::redraw_if(self.begin_edit(id)).consumed(),
                    ShortcutAction::Duplicate => EventOutcome::redraw_if(self.duplicate(id)).consumed(),
                    ShortcutAction::StartConnect => {
                        self.state.connect_source = Some(id);
                        EventOutcome::REDRAW
                    }
                    _ => EventOutcome::IGNORED,
                }
            }
        }
    }

    // ─── Operations ──────────────────────────────────────────────────────

    fn apply(&mut self, mutation: SceneMutation) -> Applied {
        if self.read_only {
            log::debug!("read-only session, ignoring {mutation:?}");
            return Applied::Nothing;
        }
        mutation.apply(&mut self.scene)
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        let removed = self.apply(SceneMutation::RemoveNode { id }).changed();
        if removed {
            self.state.forget_node(id);
            self.state.hovered_handle = None;
        }
        removed
    }

    fn remove_connection(&mut self, id: ConnectionId) -> bool {
        let removed = self.apply(SceneMutation::RemoveConnection { id }).changed();
        if removed && self.state.hovered_handle == Some(id) {
            self.state.hovered_handle = None;
        }
        removed
    }

    fn duplicate(&mut self, id: NodeId) -> bool {
        let Some(original) = self.scene.node(id) else {
            return false;
        };
        let (dx, dy) = self.config.duplicate_offset;
        let copy = Node {
            id: NodeId::generate(),
            x: original.x + dx,
            y: original.y + dy,
            text: format!("{}{}", original.text, self.config.copy_suffix),
            ..original.clone()
        };
        let copy_id = copy.id;
        if !self.apply(SceneMutation::AddNode { node: Box::new(copy) }).changed() {
            return false;
        }
        self.state.selected = Some(copy_id);
        true
    }

    fn begin_edit(&mut self, id: NodeId) -> bool {
        if self.read_only {
            return false;
        }
        self.commit_edit();
        let Some(node) = self.scene.node(id) else {
            return false;
        };
        log::debug!("edit text of {id}");
        self.state.gesture = Gesture::EditingText {
            node: id,
            buffer: node.text.clone(),
        };
        true
    }

    /// Commit the staged text if it is not blank after trimming. The edit
    /// ends either way. Returns whether an edit was active.
    fn commit_edit(&mut self) -> bool {
        let Gesture::EditingText { node, buffer } = std::mem::take(&mut self.state.gesture) else {
            return false;
        };
        let text = buffer.trim();
        if !text.is_empty() {
            self.apply(SceneMutation::SetText {
                id: node,
                text: text.to_string(),
            });
        }
        true
    }
}

impl CanvasHandle for CanvasSession {
    fn begin_export(&mut self, kind: ExportKind) -> Result<ExportJob, ExportError> {
        if self.exporting {
            return Err(ExportError::AlreadyExporting);
        }
        self.exporting = true;
        log::info!("exporting {} nodes as {kind:?}", self.scene.node_count());
        let job = ExportJob::new(kind, self.scene.snapshot());
        Ok(match &self.title {
            Some(title) => job.with_title(title.clone()),
            None => job,
        })
    }

    fn finish_export(
        &mut self,
        result: Result<ExportArtifact, ExportError>,
    ) -> Result<ExportArtifact, ExportError> {
        self.exporting = false;
        if let Err(err) = &result {
            log::error!("export failed: {err}");
        }
        result
    }

    fn current_data(&self) -> SceneData {
        self.scene.snapshot()
    }

    /// Applied even to read-only sessions: the host swaps whole maps.
    fn load_data(&mut self, data: SceneData) {
        SceneMutation::ReplaceAll { data }.apply(&mut self.scene);
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> CanvasSession {
        let mut s = CanvasSession::new(CanvasConfig::default(), None);
        s.set_surface(SurfaceRect::new(0.0, 0.0, 1200.0, 800.0));
        s
    }

    fn root() -> NodeId {
        NodeId::intern("1")
    }

    #[test]
    fn theme_drives_the_rendered_palette() {
        let light = session().render();
        assert_eq!(light.background, Theme::light().background);
        let dark = session().with_theme(Theme::dark()).render();
        assert_eq!(dark.background, Theme::dark().background);
        assert_ne!(dark.background, light.background);
    }

    #[test]
    fn starts_with_root_node() {
        let s = session();
        let node = s.scene().node(root()).unwrap();
        assert_eq!(node.text, "Central Idea");
        assert_eq!((node.x, node.y, node.width, node.height), (400.0, 300.0, 120.0, 60.0));
    }

    #[test]
    fn pointer_events_need_a_surface() {
        let mut s = CanvasSession::new(CanvasConfig::default(), None);
        let out = s.handle(&InputEvent::DoubleClick { x: 10.0, y: 10.0 });
        assert_eq!(out, EventOutcome::IGNORED);
        assert_eq!(s.scene().node_count(), 1);
    }

    #[test]
    fn surface_offset_is_subtracted() {
        let mut s = CanvasSession::new(CanvasConfig::default(), None);
        s.set_surface(SurfaceRect::new(100.0, 50.0, 1200.0, 800.0));
        s.handle(&InputEvent::DoubleClick { x: 200.0, y: 150.0 });
        let id = s.state().selected.unwrap();
        let node = s.scene().node(id).unwrap();
        assert_eq!((node.x, node.y), (40.0, 70.0));
    }

    #[test]
    fn wheel_always_prevents_default() {
        let mut s = session();
        let out = s.handle(&InputEvent::Wheel {
            x: 600.0,
            y: 400.0,
            delta_y: 120.0,
        });
        assert!(out.prevent_default);
        assert!((s.viewport().zoom() - 0.9).abs() < 1e-6);
        s.handle(&InputEvent::Wheel {
            x: 600.0,
            y: 400.0,
            delta_y: -120.0,
        });
        assert!((s.viewport().zoom() - 0.99).abs() < 1e-5);
    }

    #[test]
    fn ctrl_press_on_canvas_pans() {
        let mut s = session();
        s.handle(&InputEvent::primary_down(10.0, 10.0, Modifiers::CTRL));
        assert!(s.state().gesture.is_panning());
        s.handle(&InputEvent::PointerMove { x: 60.0, y: 30.0 });
        assert_eq!((s.viewport().origin_x, s.viewport().origin_y), (-50.0, -20.0));
        s.handle(&InputEvent::primary_up(60.0, 30.0));
        assert!(s.state().gesture.is_idle());
    }

    #[test]
    fn middle_press_pans_even_over_a_node() {
        let mut s = session();
        s.handle(&InputEvent::PointerDown {
            x: 410.0,
            y: 310.0,
            button: PointerButton::Middle,
            modifiers: Modifiers::NONE,
        });
        assert!(s.state().gesture.is_panning());
        assert_eq!(s.state().selected, None);
    }

    #[test]
    fn panning_takes_priority_over_drag() {
        let mut s = session();
        s.handle(&InputEvent::PointerDown {
            x: 10.0,
            y: 10.0,
            button: PointerButton::Middle,
            modifiers: Modifiers::NONE,
        });
        s.handle(&InputEvent::PointerMove { x: 20.0, y: 10.0 });
        let node = s.scene().node(root()).unwrap();
        assert_eq!((node.x, node.y), (400.0, 300.0));
    }

    #[test]
    fn escape_cancels_edit_without_committing() {
        let mut s = session();
        s.handle(&InputEvent::DoubleClick { x: 450.0, y: 320.0 });
        assert!(s.state().is_editing());
        s.handle(&InputEvent::EditText { text: "Changed".into() });
        s.handle(&InputEvent::key("Escape", Modifiers::NONE));
        assert!(!s.state().is_editing());
        assert_eq!(s.scene().node(root()).unwrap().text, "Central Idea");
    }

    #[test]
    fn keys_during_edit_do_not_trigger_shortcuts() {
        let mut s = session();
        s.handle(&InputEvent::primary_click(450.0, 320.0, Modifiers::NONE));
        s.handle(&InputEvent::key("Enter", Modifiers::NONE));
        assert!(s.state().is_editing());
        s.handle(&InputEvent::key("Backspace", Modifiers::NONE));
        assert_eq!(s.scene().node_count(), 1);
    }

    #[test]
    fn view_controls_step_and_reset() {
        let mut s = session();
        s.zoom_in();
        assert_eq!(s.zoom_percent(), 120);
        s.zoom_out();
        assert_eq!(s.zoom_percent(), 96);
        for _ in 0..30 {
            s.zoom_in();
        }
        assert_eq!(s.viewport().zoom(), 3.0);
        s.handle(&InputEvent::key("0", Modifiers::CTRL));
        assert_eq!(s.viewport().zoom(), 1.0);
        assert_eq!((s.viewport().origin_x, s.viewport().origin_y), (0.0, 0.0));
    }
}
