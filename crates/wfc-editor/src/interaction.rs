//! Canvas interaction state machine.
//!
//! Pointer and wheel events are interpreted against the current snapshot
//! and turned into [`CanvasEffect`]s. The machine never mutates the graph
//! itself: every change is a [`StatePatch`] the editor routes through the
//! history, bracketed by gesture markers so one drag or pan is one undo
//! step.
//!
//! ## Gestures
//!
//! | Pointer down on | Gesture |
//! |-----------------|---------|
//! | node body | drag the node (and the rest of the selection) |
//! | pin | draw a connection |
//! | canvas, pan tool or Ctrl held | pan |
//! | canvas, select tool | rubber-band selection |

use crate::config::EditorConfig;
use crate::hit::{Hit, PinKind, nodes_in_rect};
use crate::input::{InputEvent, Modifiers};
use wfc_core::{NodeId, Point, Rect, StatePatch, WorkflowState, ZoomLimits};

/// The tool picked in the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CanvasTool {
    #[default]
    Select,
    Pan,
}

/// Effective canvas mode. `Connect` is only entered while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasMode {
    Select,
    Pan,
    Connect,
}

/// The one gesture in progress, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// `anchor` is the pointer minus the pan offset, in screen pixels.
    Panning { anchor: Point },
    /// Corners in world space, stored as dragged (not normalized).
    BoxSelecting { start: Point, end: Point },
    /// `offset` is the pointer minus the primary node's position, in world
    /// space.
    DraggingNodes { primary: NodeId, offset: (f32, f32) },
    /// `cursor` is the world point the rubber-band line follows.
    DrawingConnection {
        source: NodeId,
        from_output: bool,
        cursor: Point,
    },
}

/// What the editor should do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEffect {
    /// Open a history batch.
    BeginGesture,
    /// Route through the history.
    Update(StatePatch),
    /// Close the history batch.
    EndGesture,
    /// Close the batch and drop whatever it recorded.
    AbortGesture,
}

pub struct Interaction {
    tool: CanvasTool,
    gesture: Gesture,
    zoom: ZoomLimits,
    wheel_zoom_in: f32,
    wheel_zoom_out: f32,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Interaction {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            tool: CanvasTool::Select,
            gesture: Gesture::Idle,
            zoom: config.zoom,
            wheel_zoom_in: config.wheel_zoom_in,
            wheel_zoom_out: config.wheel_zoom_out,
        }
    }

    pub fn tool(&self) -> CanvasTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: CanvasTool) {
        self.tool = tool;
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn mode(&self) -> CanvasMode {
        match (&self.gesture, self.tool) {
            (Gesture::DrawingConnection { .. }, _) => CanvasMode::Connect,
            (_, CanvasTool::Pan) => CanvasMode::Pan,
            (_, CanvasTool::Select) => CanvasMode::Select,
        }
    }

    /// Normalized rubber band, while one is being dragged.
    pub fn selection_box(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::BoxSelecting { start, end } => Some(Rect::from_corners(start, end)),
            _ => None,
        }
    }

    /// `(source, from_output, cursor)` of the connection being drawn.
    pub fn pending_connection(&self) -> Option<(NodeId, bool, Point)> {
        match self.gesture {
            Gesture::DrawingConnection {
                source,
                from_output,
                cursor,
            } => Some((source, from_output, cursor)),
            _ => None,
        }
    }

    /// Interpret a pointer or wheel event. `hit` is what lies under the
    /// pointer in the current snapshot.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Hit,
        state: &WorkflowState,
    ) -> Vec<CanvasEffect> {
        match *event {
            InputEvent::PointerDown { x, y, modifiers } => {
                self.pointer_down(Point::new(x, y), modifiers, hit, state)
            }
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(x, y), state),
            InputEvent::PointerUp { .. } => self.pointer_up(hit, state),
            InputEvent::Wheel { x, y, delta_y, .. } => self.wheel(Point::new(x, y), delta_y, state),
            InputEvent::Key { .. } | InputEvent::Drop { .. } => Vec::new(),
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    fn pointer_down(
        &mut self,
        screen: Point,
        modifiers: Modifiers,
        hit: Hit,
        state: &WorkflowState,
    ) -> Vec<CanvasEffect> {
        let mut effects = Vec::new();
        if let Gesture::DrawingConnection { source, .. } = self.gesture {
            match hit {
                Hit::Pin { node, kind } if node != source => {
                    return self.end_connection(node, kind == PinKind::Input, state);
                }
                _ => effects.extend(self.cancel()),
            }
        } else if self.gesture != Gesture::Idle {
            // A lost pointer-up; close whatever was open.
            effects.extend(self.finish());
        }

        let world = state.viewport().screen_to_world(screen);
        match hit {
            Hit::Pin { node, kind } => {
                self.start_connection(node, kind == PinKind::Output, world);
            }
            Hit::Node(id) => {
                let Some(node) = state.node(id) else {
                    return effects;
                };
                self.gesture = Gesture::DraggingNodes {
                    primary: id,
                    offset: world.delta(node.position),
                };
                effects.push(CanvasEffect::BeginGesture);
                if !state.is_selected(id)
                    && let Some(patch) = state.select_nodes(&[id], modifiers.command())
                {
                    effects.push(CanvasEffect::Update(patch));
                }
            }
            Hit::Canvas if self.tool == CanvasTool::Pan || modifiers.ctrl => {
                let pan = state.viewport().pan();
                self.gesture = Gesture::Panning {
                    anchor: Point::new(screen.x - pan.x, screen.y - pan.y),
                };
                effects.push(CanvasEffect::BeginGesture);
            }
            Hit::Canvas => {
                self.gesture = Gesture::BoxSelecting {
                    start: world,
                    end: world,
                };
            }
        }
        effects
    }

    fn pointer_move(&mut self, screen: Point, state: &WorkflowState) -> Vec<CanvasEffect> {
        let viewport = state.viewport();
        let world = viewport.screen_to_world(screen);
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { anchor } => {
                let pan = Point::new(screen.x - anchor.x, screen.y - anchor.y);
                state
                    .set_viewport(viewport.panned_to(pan))
                    .map(CanvasEffect::Update)
                    .into_iter()
                    .collect()
            }
            Gesture::BoxSelecting { end, .. } => {
                *end = world;
                Vec::new()
            }
            Gesture::DraggingNodes { primary, offset } => {
                let Some(node) = state.node(*primary) else {
                    return Vec::new();
                };
                let target = Point::new(world.x - offset.0, world.y - offset.1);
                let (dx, dy) = target.delta(node.position);
                let ids: Vec<NodeId> =
                    if state.is_selected(*primary) && state.selected_nodes().len() >= 2 {
                        state.selected_nodes().to_vec()
                    } else {
                        vec![*primary]
                    };
                state
                    .move_nodes(&ids, dx, dy)
                    .map(CanvasEffect::Update)
                    .into_iter()
                    .collect()
            }
            Gesture::DrawingConnection { cursor, .. } => {
                *cursor = world;
                Vec::new()
            }
        }
    }

    fn pointer_up(&mut self, hit: Hit, state: &WorkflowState) -> Vec<CanvasEffect> {
        match self.gesture {
            Gesture::DrawingConnection { source, .. } => match hit {
                Hit::Pin { node, kind } if node != source => {
                    self.end_connection(node, kind == PinKind::Input, state)
                }
                // Released on the source: keep drawing until the next click.
                hit if hit.node() == Some(source) => Vec::new(),
                _ => self.cancel(),
            },
            Gesture::BoxSelecting { start, end } => {
                self.gesture = Gesture::Idle;
                let ids = nodes_in_rect(state, Rect::from_corners(start, end));
                state
                    .select_nodes(&ids, false)
                    .map(CanvasEffect::Update)
                    .into_iter()
                    .collect()
            }
            _ => self.finish(),
        }
    }

    // ─── Wheel ───────────────────────────────────────────────────────────

    fn wheel(&mut self, screen: Point, delta_y: f32, state: &WorkflowState) -> Vec<CanvasEffect> {
        if delta_y == 0.0 {
            return Vec::new();
        }
        let factor = if delta_y > 0.0 {
            self.wheel_zoom_out
        } else {
            self.wheel_zoom_in
        };
        let next = state.viewport().zoom_at(screen, factor, self.zoom);
        if let Gesture::Panning { anchor } = &mut self.gesture {
            *anchor = Point::new(screen.x - next.x, screen.y - next.y);
        }
        state
            .set_viewport(next)
            .map(CanvasEffect::Update)
            .into_iter()
            .collect()
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Begin drawing from one of `node`'s pins.
    pub fn start_connection(&mut self, node: NodeId, from_output: bool, cursor: Point) {
        self.gesture = Gesture::DrawingConnection {
            source: node,
            from_output,
            cursor,
        };
    }

    /// Finish on `node`. Creates the connection only when drawing started
    /// on an output pin and ends on another node's input pin; the pending
    /// connection is cleared either way.
    pub fn end_connection(
        &mut self,
        node: NodeId,
        is_input: bool,
        state: &WorkflowState,
    ) -> Vec<CanvasEffect> {
        let Gesture::DrawingConnection {
            source,
            from_output,
            ..
        } = std::mem::take(&mut self.gesture)
        else {
            return Vec::new();
        };
        if !(from_output && is_input) || node == source {
            return Vec::new();
        }
        state
            .add_connection(source, node)
            .map(|(_, patch)| CanvasEffect::Update(patch))
            .into_iter()
            .collect()
    }

    // ─── Cancellation ────────────────────────────────────────────────────

    /// Drop the current gesture without keeping its effect on the graph.
    pub fn cancel(&mut self) -> Vec<CanvasEffect> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Panning { .. } | Gesture::DraggingNodes { .. } => {
                vec![CanvasEffect::AbortGesture]
            }
            Gesture::Idle | Gesture::BoxSelecting { .. } | Gesture::DrawingConnection { .. } => {
                Vec::new()
            }
        }
    }

    /// End the current gesture, keeping what it did.
    fn finish(&mut self) -> Vec<CanvasEffect> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Panning { .. } | Gesture::DraggingNodes { .. } => {
                vec![CanvasEffect::EndGesture]
            }
            _ => Vec::new(),
        }
    }
}
