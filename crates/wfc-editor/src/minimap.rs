//! Minimap projection.
//!
//! A pure view over a snapshot: node anchors and the visible world region
//! are mapped into a fixed-size minimap through a per-axis linear scale, so
//! a wide graph gets squeezed horizontally rather than letterboxed.

use wfc_core::{NodeId, Point, Rect, Size, Viewport, WorkflowState};

/// World padding around the node anchors: left/top, right, bottom.
const PAD_MIN: f32 = 100.0;
const PAD_RIGHT: f32 = 300.0;
const PAD_BOTTOM: f32 = 200.0;

/// World extent shown when there are no nodes.
const EMPTY_EXTENT: f32 = 1000.0;

/// One node dot on the minimap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapMarker {
    pub id: NodeId,
    /// Minimap-space position of the node anchor.
    pub position: Point,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjection {
    /// World region covered by the minimap.
    pub bounds: Rect,
    /// Minimap size in pixels.
    pub size: Size,
}

impl MinimapProjection {
    pub fn new(state: &WorkflowState, size: Size) -> Self {
        let bounds = match Rect::enclosing(state.nodes().iter().map(|n| n.position)) {
            Some(r) => Rect::new(
                r.x - PAD_MIN,
                r.y - PAD_MIN,
                r.width + PAD_MIN + PAD_RIGHT,
                r.height + PAD_MIN + PAD_BOTTOM,
            ),
            None => Rect::new(0.0, 0.0, EMPTY_EXTENT, EMPTY_EXTENT),
        };
        Self { bounds, size }
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.size.width / self.bounds.width,
            self.size.height / self.bounds.height,
        )
    }

    pub fn project(&self, world: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (world.x - self.bounds.x) * sx,
            (world.y - self.bounds.y) * sy,
        )
    }

    pub fn unproject(&self, mini: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(mini.x / sx + self.bounds.x, mini.y / sy + self.bounds.y)
    }

    pub fn markers(&self, state: &WorkflowState) -> Vec<MinimapMarker> {
        state
            .nodes()
            .iter()
            .map(|n| MinimapMarker {
                id: n.id,
                position: self.project(n.position),
                selected: state.is_selected(n.id),
            })
            .collect()
    }

    /// The canvas's visible world region in minimap space, shrunk and
    /// shifted to stay inside the minimap.
    pub fn viewport_rect(&self, viewport: Viewport, canvas: Size) -> Rect {
        let (sx, sy) = self.scale();
        let visible = viewport.visible_world_rect(canvas);
        let origin = self.project(Point::new(visible.x, visible.y));
        let width = (visible.width * sx).min(self.size.width);
        let height = (visible.height * sy).min(self.size.height);
        Rect::new(
            origin.x.clamp(0.0, self.size.width - width),
            origin.y.clamp(0.0, self.size.height - height),
            width,
            height,
        )
    }

    /// Viewport that centres the canvas on the world point under a minimap
    /// click. Zoom is unchanged.
    pub fn click_to_viewport(&self, mini: Point, viewport: Viewport, canvas: Size) -> Viewport {
        viewport.centered_on(self.unproject(mini), canvas)
    }
}
