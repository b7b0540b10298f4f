//! Hit testing: world point → node or pin lookup.
//!
//! Walks the node list in reverse (last painted = topmost). Pins are tested
//! before bodies so a pin overhanging a neighbouring node still wins.

use wfc_core::{NODE_SIZE, Node, NodeId, Point, Rect, WorkflowState};

/// Which side of a node a pin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {
    Input,
    Output,
}

/// What lies under a world point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Canvas,
    Node(NodeId),
    Pin { node: NodeId, kind: PinKind },
}

impl Hit {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Hit::Canvas => None,
            Hit::Node(id) | Hit::Pin { node: id, .. } => Some(*id),
        }
    }
}

/// World-space body rectangle of a node.
pub fn node_rect(node: &Node) -> Rect {
    Rect::new(
        node.position.x,
        node.position.y,
        NODE_SIZE.width,
        NODE_SIZE.height,
    )
}

/// Anchor of a pin in world space, or `None` if the node has no such pin.
pub fn pin_position(node: &Node, kind: PinKind) -> Option<Point> {
    match kind {
        PinKind::Input => node.kind.accepts_input().then(|| node.input_pin()),
        PinKind::Output => Some(node.output_pin()),
    }
}

/// Find what is at `world`. `pin_radius` is in world units.
pub fn hit_test(state: &WorkflowState, world: Point, pin_radius: f32) -> Hit {
    let r2 = pin_radius * pin_radius;
    for node in state.nodes().iter().rev() {
        for kind in [PinKind::Output, PinKind::Input] {
            if let Some(pin) = pin_position(node, kind) {
                let (dx, dy) = world.delta(pin);
                if dx * dx + dy * dy <= r2 {
                    return Hit::Pin {
                        node: node.id,
                        kind,
                    };
                }
            }
        }
    }
    state
        .nodes()
        .iter()
        .rev()
        .find(|n| node_rect(n).contains(world))
        .map_or(Hit::Canvas, |n| Hit::Node(n.id))
}

/// Nodes whose top-left anchor lies inside `rect` (inclusive), in paint
/// order. Footprints are not considered.
pub fn nodes_in_rect(state: &WorkflowState, rect: Rect) -> Vec<NodeId> {
    state
        .nodes()
        .iter()
        .filter(|n| rect.contains(n.position))
        .map(|n| n.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfc_core::NodeType;

    fn state_with(specs: &[(NodeType, f32, f32)]) -> (WorkflowState, Vec<NodeId>) {
        let mut state = WorkflowState::new();
        let mut ids = Vec::new();
        for (kind, x, y) in specs {
            let (id, patch) = state.add_node(*kind, Point::new(*x, *y));
            state = state.apply(patch);
            ids.push(id);
        }
        (state, ids)
    }

    #[test]
    fn hit_body_and_background() {
        let (state, ids) = state_with(&[(NodeType::Http, 0.0, 0.0)]);
        assert_eq!(hit_test(&state, Point::new(100.0, 20.0), 10.0), Hit::Node(ids[0]));
        assert_eq!(hit_test(&state, Point::new(500.0, 500.0), 10.0), Hit::Canvas);
    }

    #[test]
    fn topmost_wins() {
        let (state, ids) = state_with(&[(NodeType::Http, 0.0, 0.0), (NodeType::Email, 50.0, 20.0)]);
        assert_eq!(hit_test(&state, Point::new(100.0, 50.0), 10.0), Hit::Node(ids[1]));
    }

    #[test]
    fn pins_before_bodies() {
        let (state, ids) = state_with(&[(NodeType::Http, 0.0, 0.0)]);
        assert_eq!(
            hit_test(&state, Point::new(198.0, 41.0), 10.0),
            Hit::Pin {
                node: ids[0],
                kind: PinKind::Output
            }
        );
        assert_eq!(
            hit_test(&state, Point::new(-4.0, 40.0), 10.0),
            Hit::Pin {
                node: ids[0],
                kind: PinKind::Input
            }
        );
    }

    #[test]
    fn trigger_has_no_input_pin() {
        let (state, ids) = state_with(&[(NodeType::Trigger, 0.0, 0.0)]);
        assert_eq!(hit_test(&state, Point::new(-4.0, 40.0), 10.0), Hit::Canvas);
        assert_eq!(hit_test(&state, Point::new(3.0, 40.0), 10.0), Hit::Node(ids[0]));
    }

    #[test]
    fn rect_membership_uses_anchor() {
        let (state, ids) = state_with(&[
            (NodeType::Http, 0.0, 0.0),
            (NodeType::Http, 50.0, 50.0),
            (NodeType::Http, 200.0, 200.0),
        ]);
        let rect = Rect::from_corners(Point::new(10.0, 10.0), Point::new(60.0, 60.0));
        assert_eq!(nodes_in_rect(&state, rect), vec![ids[1]]);
    }
}
