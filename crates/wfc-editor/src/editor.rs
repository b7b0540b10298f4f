//! Workflow editor controller.
//!
//! Holds the history, the interaction state machine and the configuration.
//! All interaction from the host goes through this struct: raw input events,
//! toolbar commands, property-panel edits, execution status reports and
//! save/load. Every graph change is routed through the history.

use crate::config::EditorConfig;
use crate::hit::{Hit, hit_test, node_rect};
use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::interaction::{CanvasEffect, CanvasTool, Interaction};
use crate::minimap::{MinimapMarker, MinimapProjection};
use crate::palette::{DragPayload, Palette};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use wfc_core::{
    AlignDirection, ConnectionId, DocumentError, DocumentMetadata, GroupId, LintDiagnostic,
    NodeId, NodeStatus, NodeType, NodeUpdate, Point, Rect, Size, Viewport, WorkflowDocument,
    WorkflowState, lint_workflow,
};

pub struct WorkflowEditor {
    history: History,
    interaction: Interaction,
    palette: Palette,
    config: EditorConfig,
    canvas_size: Size,
    metadata: DocumentMetadata,
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl WorkflowEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: History::new(WorkflowState::default(), config.history_capacity),
            interaction: Interaction::new(&config),
            palette: Palette::new(),
            canvas_size: config.canvas_size,
            config,
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        self.history.current()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// The host canvas changed size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas_size = Size::new(width, height);
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle one input event. Returns `true` if the snapshot changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key { key, modifiers } => self.handle_key(key, *modifiers),
            InputEvent::Drop { x, y, payload } => {
                self.drop_payload(Point::new(*x, *y), payload).is_some()
            }
            _ => {
                let hit = match event.position() {
                    Some(screen) => self.hit_at(screen),
                    None => Hit::Canvas,
                };
                let effects = self.interaction.handle(event, hit, self.history.current());
                self.apply_effects(effects)
            }
        }
    }

    /// What lies under a screen point.
    pub fn hit_at(&self, screen: Point) -> Hit {
        let state = self.state();
        let viewport = state.viewport();
        hit_test(
            state,
            viewport.screen_to_world(screen),
            self.config.pin_hit_radius / viewport.zoom,
        )
    }

    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match ShortcutMap::resolve(key, modifiers) {
            Some(action) => self.run_action(action),
            None => false,
        }
    }

    /// Execute a shortcut action. Returns `true` if the snapshot changed.
    pub fn run_action(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::SelectAll => {
                let patch = self.state().select_all();
                self.history.commit(patch)
            }
            ShortcutAction::Group => self.group_selected().is_some(),
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::Cancel => self.cancel(),
            ShortcutAction::ZoomIn => self.zoom_in(),
            ShortcutAction::ZoomOut => self.zoom_out(),
            ShortcutAction::ZoomToFit => self.fit_view(),
            ShortcutAction::ToolSelect => {
                self.interaction.set_tool(CanvasTool::Select);
                false
            }
            ShortcutAction::ToolPan => {
                self.interaction.set_tool(CanvasTool::Pan);
                false
            }
        }
    }

    pub fn set_tool(&mut self, tool: CanvasTool) {
        self.interaction.set_tool(tool);
    }

    fn apply_effects(&mut self, effects: Vec<CanvasEffect>) -> bool {
        let mut changed = false;
        for effect in effects {
            match effect {
                CanvasEffect::BeginGesture => self.history.begin_batch(),
                CanvasEffect::Update(patch) => changed |= self.history.update_gesture(patch),
                CanvasEffect::EndGesture => self.history.end_batch(),
                CanvasEffect::AbortGesture => changed |= self.history.abort_batch(),
            }
        }
        changed
    }

    /// Escape: abandon the gesture in progress and clear the selection.
    pub fn cancel(&mut self) -> bool {
        let effects = self.interaction.cancel();
        let aborted = self.apply_effects(effects);
        let patch = self.state().clear_selection();
        self.history.commit(patch) || aborted
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Undo one step, abandoning any gesture in progress first.
    pub fn undo(&mut self) -> bool {
        let effects = self.interaction.cancel();
        let aborted = self.apply_effects(effects);
        self.history.undo() || aborted
    }

    pub fn redo(&mut self) -> bool {
        let effects = self.interaction.cancel();
        let aborted = self.apply_effects(effects);
        self.history.redo() || aborted
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Graph edits ─────────────────────────────────────────────────────

    /// Add a node at a world position.
    pub fn add_node(&mut self, kind: NodeType, world: Point) -> NodeId {
        let (id, patch) = self.state().add_node(kind, world);
        self.history.update_state(patch);
        id
    }

    /// Palette click: add a node at the world point under the canvas centre.
    pub fn add_node_at_center(&mut self, kind: NodeType) -> NodeId {
        let centre = Point::new(self.canvas_size.width / 2.0, self.canvas_size.height / 2.0);
        let world = self.state().viewport().screen_to_world(centre);
        self.add_node(kind, world)
    }

    /// External drop at a screen point. Payloads without a known node type
    /// are ignored.
    pub fn drop_payload(&mut self, screen: Point, payload: &DragPayload) -> Option<NodeId> {
        let kind = payload.node_type()?;
        let world = self.state().viewport().screen_to_world(screen);
        Some(self.add_node(kind, world))
    }

    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) -> bool {
        let patch = self.state().update_node(id, update);
        self.history.commit(patch)
    }

    /// Execution report sink. Accepts any status sequence.
    pub fn set_node_status(
        &mut self,
        id: NodeId,
        status: NodeStatus,
        execution_time: Option<f32>,
    ) -> bool {
        self.update_node(id, NodeUpdate::status(status, execution_time))
    }

    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> bool {
        let patch = self.state().delete_nodes(ids);
        self.history.commit(patch)
    }

    pub fn delete_selected(&mut self) -> bool {
        let selected = self.state().selected_nodes().to_vec();
        if selected.is_empty() {
            return false;
        }
        self.delete_nodes(&selected)
    }

    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Option<ConnectionId> {
        let (id, patch) = self.state().add_connection(source, target)?;
        self.history.update_state(patch);
        Some(id)
    }

    pub fn delete_connection(&mut self, id: ConnectionId) -> bool {
        let patch = self.state().delete_connection(id);
        self.history.commit(patch)
    }

    /// Group the current selection; needs at least two selected nodes.
    pub fn group_selected(&mut self) -> Option<GroupId> {
        let selected = self.state().selected_nodes().to_vec();
        if selected.len() < 2 {
            return None;
        }
        let (id, patch) = self.state().create_group(&selected)?;
        self.history.update_state(patch);
        Some(id)
    }

    pub fn align_selected(&mut self, direction: AlignDirection) -> bool {
        let selected = self.state().selected_nodes().to_vec();
        let patch = self.state().align_nodes(&selected, direction);
        self.history.commit(patch)
    }

    pub fn select_nodes(&mut self, ids: &[NodeId], additive: bool) -> bool {
        let patch = self.state().select_nodes(ids, additive);
        self.history.commit(patch)
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let clamped = Viewport {
            zoom: self.config.zoom.clamp(viewport.zoom),
            ..viewport
        };
        let patch = self.state().set_viewport(clamped);
        self.history.commit(patch)
    }

    fn zoom_about_centre(&mut self, factor: f32) -> bool {
        let centre = Point::new(self.canvas_size.width / 2.0, self.canvas_size.height / 2.0);
        let next = self
            .state()
            .viewport()
            .zoom_at(centre, factor, self.config.zoom);
        self.set_viewport(next)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_about_centre(self.config.keyboard_zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_about_centre(1.0 / self.config.keyboard_zoom_step)
    }

    /// Fit every node on the canvas; back to the identity viewport when the
    /// graph is empty.
    pub fn fit_view(&mut self) -> bool {
        let state = self.state();
        let corners = state.nodes().iter().flat_map(|n| {
            let r = node_rect(n);
            [Point::new(r.min_x(), r.min_y()), Point::new(r.max_x(), r.max_y())]
        });
        let viewport = match Rect::enclosing(corners) {
            Some(bounds) => Viewport::fit(
                bounds,
                self.canvas_size,
                self.config.zoom,
                self.config.fit_padding,
            ),
            None => Viewport::default(),
        };
        self.set_viewport(viewport)
    }

    // ─── Minimap ─────────────────────────────────────────────────────────

    pub fn minimap(&self) -> MinimapProjection {
        MinimapProjection::new(self.state(), self.config.minimap_size)
    }

    pub fn minimap_markers(&self) -> Vec<MinimapMarker> {
        self.minimap().markers(self.state())
    }

    pub fn minimap_viewport_rect(&self) -> Rect {
        self.minimap()
            .viewport_rect(self.state().viewport(), self.canvas_size)
    }

    /// Centre the canvas on the world point under a minimap click.
    pub fn minimap_click(&mut self, mini: Point) -> bool {
        let viewport =
            self.minimap()
                .click_to_viewport(mini, self.state().viewport(), self.canvas_size);
        self.set_viewport(viewport)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn set_name(&mut self, name: &str) {
        self.metadata.name = name.to_owned();
    }

    pub fn save(&self) -> WorkflowDocument {
        WorkflowDocument::from_state(self.state(), self.metadata.clone())
    }

    /// Replace the workflow and start a fresh history. On error the editor
    /// is left untouched.
    pub fn load(&mut self, document: WorkflowDocument) -> Result<(), DocumentError> {
        let metadata = document.metadata.clone();
        let state = document.into_state()?;
        self.interaction.cancel();
        self.history.reset(state);
        self.metadata = metadata;
        log::debug!(
            "loaded workflow `{}` with {} nodes",
            self.metadata.name,
            self.state().nodes().len()
        );
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.save().to_json_pretty()
    }

    pub fn load_json(&mut self, input: &str) -> Result<(), DocumentError> {
        self.load(WorkflowDocument::from_json(input)?)
    }

    /// Structural warnings for the current snapshot.
    pub fn lint(&self) -> Vec<LintDiagnostic> {
        lint_workflow(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::NODE_TYPE_MIME;

    fn ctrl(key: &str) -> InputEvent {
        InputEvent::key(key, Modifiers::CTRL)
    }

    #[test]
    fn new_editor_is_empty() {
        let editor = WorkflowEditor::default();
        assert!(editor.state().nodes().is_empty());
        assert!(!editor.can_undo());
        assert_eq!(editor.canvas_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn click_to_add_uses_canvas_centre() {
        let mut editor = WorkflowEditor::default();
        editor.set_viewport(Viewport::new(100.0, 0.0, 2.0));
        let id = editor.add_node_at_center(NodeType::Webhook);
        let node = editor.state().node(id).unwrap();
        assert_eq!(node.position, Point::new(150.0, 150.0));
    }

    #[test]
    fn drop_converts_screen_to_world() {
        let mut editor = WorkflowEditor::default();
        editor.set_viewport(Viewport::new(-50.0, 20.0, 0.5));
        let dropped = editor.handle(&InputEvent::Drop {
            x: 150.0,
            y: 120.0,
            payload: DragPayload::node(NodeType::Filter),
        });
        assert!(dropped);
        let node = &editor.state().nodes()[0];
        assert_eq!(node.kind, NodeType::Filter);
        assert_eq!(node.position, Point::new(400.0, 200.0));
    }

    #[test]
    fn drop_without_type_is_ignored() {
        let mut editor = WorkflowEditor::default();
        let mut payload = DragPayload::default();
        payload.set(NODE_TYPE_MIME, "");
        assert!(!editor.handle(&InputEvent::Drop {
            x: 0.0,
            y: 0.0,
            payload,
        }));
        assert!(editor.state().nodes().is_empty());
    }

    #[test]
    fn delete_with_empty_selection_is_noop() {
        let mut editor = WorkflowEditor::default();
        editor.add_node(NodeType::Code, Point::ORIGIN);
        let before = editor.history().len();
        assert!(!editor.handle(&InputEvent::key("Delete", Modifiers::NONE)));
        assert_eq!(editor.history().len(), before);
    }

    #[test]
    fn group_shortcut_needs_two_selected() {
        let mut editor = WorkflowEditor::default();
        let a = editor.add_node(NodeType::Http, Point::new(0.0, 0.0));
        let b = editor.add_node(NodeType::Email, Point::new(300.0, 0.0));
        editor.select_nodes(&[a], false);
        assert!(!editor.handle(&ctrl("g")));
        editor.select_nodes(&[b], true);
        assert!(editor.handle(&ctrl("g")));
        assert_eq!(editor.state().groups().len(), 1);
    }

    #[test]
    fn tool_shortcuts_switch_mode() {
        let mut editor = WorkflowEditor::default();
        assert!(!editor.handle(&InputEvent::key("h", Modifiers::NONE)));
        assert_eq!(editor.interaction().tool(), CanvasTool::Pan);
        editor.handle(&InputEvent::key("v", Modifiers::NONE));
        assert_eq!(editor.interaction().tool(), CanvasTool::Select);
    }

    #[test]
    fn keyboard_zoom_is_clamped() {
        let mut editor = WorkflowEditor::default();
        for _ in 0..20 {
            editor.handle(&ctrl("="));
        }
        assert_eq!(editor.state().viewport().zoom, 3.0);
        for _ in 0..40 {
            editor.handle(&ctrl("-"));
        }
        assert!((editor.state().viewport().zoom - 0.1).abs() < 0.001);
    }

    #[test]
    fn fit_view_shows_all_nodes() {
        let mut editor = WorkflowEditor::default();
        editor.add_node(NodeType::Trigger, Point::new(-400.0, -300.0));
        editor.add_node(NodeType::Merge, Point::new(1200.0, 900.0));
        assert!(editor.handle(&ctrl("0")));
        let visible = editor
            .state()
            .viewport()
            .visible_world_rect(editor.canvas_size());
        assert!(visible.contains(Point::new(-400.0, -300.0)));
        assert!(visible.contains(Point::new(1400.0, 980.0)));
    }

    #[test]
    fn status_updates_accept_any_order() {
        let mut editor = WorkflowEditor::default();
        let id = editor.add_node(NodeType::Http, Point::ORIGIN);
        assert!(editor.set_node_status(id, NodeStatus::Success, Some(80.0)));
        assert!(editor.set_node_status(id, NodeStatus::Running, None));
        assert!(editor.set_node_status(id, NodeStatus::Error, Some(12.0)));
        assert!(!editor.set_node_status(NodeId::intern("ed_ghost"), NodeStatus::Idle, None));
        let data = &editor.state().node(id).unwrap().data;
        assert_eq!(data.status, NodeStatus::Error);
        assert_eq!(data.execution_time, Some(12.0));
    }

    #[test]
    fn minimap_click_recentres() {
        let mut editor = WorkflowEditor::default();
        assert!(editor.minimap_click(Point::new(100.0, 75.0)));
        let centre = editor
            .state()
            .viewport()
            .screen_to_world(Point::new(400.0, 300.0));
        assert!((centre.x - 500.0).abs() < 0.01 && (centre.y - 500.0).abs() < 0.01);
    }

    #[test]
    fn failed_load_keeps_current_workflow() {
        let mut editor = WorkflowEditor::default();
        editor.add_node(NodeType::Code, Point::ORIGIN);
        assert!(editor.load_json("{ not json").is_err());
        assert_eq!(editor.state().nodes().len(), 1);
        assert!(editor.can_undo());
    }
}
