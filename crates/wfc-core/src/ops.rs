//! Edit operations on a [`WorkflowState`].
//!
//! Each operation reads the current snapshot and returns the [`StatePatch`]
//! that performs the edit, or `None` when the request is invalid or would
//! change nothing. Rejections are not errors: stale ids and impossible
//! connections arrive routinely from pointer-event streams, so they are
//! logged at `debug` and dropped.

use crate::geometry::{Point, Size, Viewport};
use crate::id::{ConnectionId, GroupId, NodeId};
use crate::model::{
    Connection, GROUP_NODE_FOOTPRINT, Group, Node, NodeStatus, StatePatch, WorkflowState,
};
use crate::registry::NodeType;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::HashSet;
use thiserror::Error;

/// Label given to new groups.
pub const GROUP_LABEL: &str = "Node Group";
/// Fill color given to new groups.
pub const GROUP_COLOR: &str = "#e2e8f0";

/// Padding between member footprints and the group border.
const GROUP_PAD_X: f32 = 20.0;
const GROUP_PAD_TOP: f32 = 40.0;
const GROUP_PAD_BOTTOM: f32 = 20.0;

/// Why a connection between two nodes is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectRejection {
    #[error("endpoint {0} does not exist")]
    MissingNode(NodeId),
    #[error("node {0} cannot connect to itself")]
    SelfLoop(NodeId),
    #[error("{0} already connects to {1}")]
    Duplicate(NodeId, NodeId),
    #[error("node {0} has no input pin")]
    NoInputPin(NodeId),
}

/// Shallow update of a node. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub position: Option<Point>,
    pub label: Option<String>,
    /// Replaces the whole parameter map.
    pub parameters: Option<Map<String, Value>>,
    pub status: Option<NodeStatus>,
    pub execution_time: Option<f32>,
}

impl NodeUpdate {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Execution report from an external run driver.
    pub fn status(status: NodeStatus, execution_time: Option<f32>) -> Self {
        Self {
            status: Some(status),
            execution_time,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignDirection {
    Left,
    Right,
    Top,
    Bottom,
    /// Shared vertical centre line (x axis).
    CenterH,
    /// Shared horizontal centre line (y axis).
    CenterV,
}

// ─── Nodes ───────────────────────────────────────────────────────────────

impl WorkflowState {
    /// Append a node of `kind` at `position`. Always succeeds.
    pub fn add_node(&self, kind: NodeType, position: Point) -> (NodeId, StatePatch) {
        let id = NodeId::fresh(|id| self.contains_node(id));
        let mut nodes = self.nodes().to_vec();
        nodes.push(Node::new(id, kind, position));
        let patch = StatePatch {
            nodes: Some(nodes),
            ..StatePatch::default()
        };
        (id, patch)
    }

    pub fn update_node(&self, id: NodeId, update: NodeUpdate) -> Option<StatePatch> {
        if !self.contains_node(id) {
            log::debug!("update_node: unknown node {id}");
            return None;
        }
        let nodes = self
            .nodes()
            .iter()
            .map(|n| {
                if n.id != id {
                    return n.clone();
                }
                let mut n = n.clone();
                if let Some(position) = update.position {
                    n.position = position;
                }
                if let Some(label) = &update.label {
                    n.data.label.clone_from(label);
                }
                if let Some(parameters) = &update.parameters {
                    n.data.parameters.clone_from(parameters);
                }
                if let Some(status) = update.status {
                    n.data.status = status;
                }
                if update.execution_time.is_some() {
                    n.data.execution_time = update.execution_time;
                }
                n
            })
            .collect();
        Some(StatePatch {
            nodes: Some(nodes),
            ..StatePatch::default()
        })
    }

    /// Remove nodes with their incident connections, selection entries and
    /// group memberships, as one patch.
    pub fn delete_nodes(&self, ids: &[NodeId]) -> Option<StatePatch> {
        let doomed: HashSet<NodeId> = ids
            .iter()
            .copied()
            .filter(|id| self.contains_node(*id))
            .collect();
        if doomed.is_empty() {
            return None;
        }

        let nodes = self
            .nodes()
            .iter()
            .filter(|n| !doomed.contains(&n.id))
            .cloned()
            .collect();
        let mut patch = StatePatch {
            nodes: Some(nodes),
            ..StatePatch::default()
        };
        if self
            .connections()
            .iter()
            .any(|c| doomed.contains(&c.source_id) || doomed.contains(&c.target_id))
        {
            patch.connections = Some(
                self.connections()
                    .iter()
                    .filter(|c| !doomed.contains(&c.source_id) && !doomed.contains(&c.target_id))
                    .cloned()
                    .collect(),
            );
        }
        if self.selected_nodes().iter().any(|id| doomed.contains(id)) {
            patch.selected_nodes = Some(
                self.selected_nodes()
                    .iter()
                    .copied()
                    .filter(|id| !doomed.contains(id))
                    .collect(),
            );
        }
        if self
            .groups()
            .iter()
            .any(|g| g.nodes.iter().any(|id| doomed.contains(id)))
        {
            patch.groups = Some(
                self.groups()
                    .iter()
                    .map(|g| {
                        let mut g = g.clone();
                        g.nodes.retain(|id| !doomed.contains(id));
                        g
                    })
                    .collect(),
            );
        }
        Some(patch)
    }

    /// Translate every listed node by the same delta.
    pub fn move_nodes(&self, ids: &[NodeId], dx: f32, dy: f32) -> Option<StatePatch> {
        if (dx == 0.0 && dy == 0.0) || !ids.iter().any(|id| self.contains_node(*id)) {
            return None;
        }
        let nodes = self
            .nodes()
            .iter()
            .map(|n| {
                let mut n = n.clone();
                if ids.contains(&n.id) {
                    n.position = n.position.offset(dx, dy);
                }
                n
            })
            .collect();
        Some(StatePatch {
            nodes: Some(nodes),
            ..StatePatch::default()
        })
    }

    /// Snap one axis of every listed node to the group's extremal or centre
    /// value. Needs at least two existing nodes.
    pub fn align_nodes(&self, ids: &[NodeId], direction: AlignDirection) -> Option<StatePatch> {
        let members: Vec<&Node> = self.nodes().iter().filter(|n| ids.contains(&n.id)).collect();
        if members.len() < 2 {
            log::debug!("align_nodes: need two nodes, got {}", members.len());
            return None;
        }
        let xs = members.iter().map(|n| n.position.x);
        let ys = members.iter().map(|n| n.position.y);
        let (min_x, max_x) = min_max(xs);
        let (min_y, max_y) = min_max(ys);

        let nodes = self
            .nodes()
            .iter()
            .map(|n| {
                let mut n = n.clone();
                if ids.contains(&n.id) {
                    match direction {
                        AlignDirection::Left => n.position.x = min_x,
                        AlignDirection::Right => n.position.x = max_x,
                        AlignDirection::Top => n.position.y = min_y,
                        AlignDirection::Bottom => n.position.y = max_y,
                        AlignDirection::CenterH => n.position.x = (min_x + max_x) / 2.0,
                        AlignDirection::CenterV => n.position.y = (min_y + max_y) / 2.0,
                    }
                }
                n
            })
            .collect();
        Some(StatePatch {
            nodes: Some(nodes),
            ..StatePatch::default()
        })
    }
}

// ─── Connections ─────────────────────────────────────────────────────────

impl WorkflowState {
    /// Endpoint checks that hold for any single connection.
    pub(crate) fn check_endpoints(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> Result<(), ConnectRejection> {
        if !self.contains_node(source) {
            return Err(ConnectRejection::MissingNode(source));
        }
        let target_node = self
            .node(target)
            .ok_or(ConnectRejection::MissingNode(target))?;
        if source == target {
            return Err(ConnectRejection::SelfLoop(source));
        }
        if !target_node.kind.accepts_input() {
            return Err(ConnectRejection::NoInputPin(target));
        }
        Ok(())
    }

    /// Whether `add_connection(source, target)` would succeed.
    pub fn can_connect(&self, source: NodeId, target: NodeId) -> Result<(), ConnectRejection> {
        self.check_endpoints(source, target)?;
        if self
            .connections()
            .iter()
            .any(|c| c.source_id == source && c.target_id == target)
        {
            return Err(ConnectRejection::Duplicate(source, target));
        }
        Ok(())
    }

    pub fn add_connection(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> Option<(ConnectionId, StatePatch)> {
        if let Err(reason) = self.can_connect(source, target) {
            log::debug!("add_connection rejected: {reason}");
            return None;
        }
        let id = ConnectionId::fresh(|id| self.connections().iter().any(|c| c.id == id));
        let mut connections = self.connections().to_vec();
        connections.push(Connection::new(id, source, target));
        let patch = StatePatch {
            connections: Some(connections),
            ..StatePatch::default()
        };
        Some((id, patch))
    }

    pub fn delete_connection(&self, id: ConnectionId) -> Option<StatePatch> {
        if !self.connections().iter().any(|c| c.id == id) {
            log::debug!("delete_connection: unknown connection {id}");
            return None;
        }
        Some(StatePatch {
            connections: Some(
                self.connections()
                    .iter()
                    .filter(|c| c.id != id)
                    .cloned()
                    .collect(),
            ),
            ..StatePatch::default()
        })
    }
}

// ─── Groups ──────────────────────────────────────────────────────────────

impl WorkflowState {
    /// Wrap at least two existing nodes in a new group whose box is fixed at
    /// creation time.
    pub fn create_group(&self, ids: &[NodeId]) -> Option<(GroupId, StatePatch)> {
        let mut members: SmallVec<[NodeId; 4]> = SmallVec::new();
        for id in ids {
            if self.contains_node(*id) && !members.contains(id) {
                members.push(*id);
            }
        }
        if members.len() < 2 {
            log::debug!("create_group: need two nodes, got {}", members.len());
            return None;
        }

        let positions: Vec<Point> = members
            .iter()
            .filter_map(|id| self.node(*id))
            .map(|n| n.position)
            .collect();
        let (min_x, _) = min_max(positions.iter().map(|p| p.x));
        let (min_y, _) = min_max(positions.iter().map(|p| p.y));
        let (_, max_x) = min_max(positions.iter().map(|p| p.x + GROUP_NODE_FOOTPRINT.width));
        let (_, max_y) = min_max(positions.iter().map(|p| p.y + GROUP_NODE_FOOTPRINT.height));

        let id = GroupId::fresh(|id| self.groups().iter().any(|g| g.id == id));
        let group = Group {
            id,
            label: GROUP_LABEL.to_owned(),
            position: Point::new(min_x - GROUP_PAD_X, min_y - GROUP_PAD_TOP),
            size: Size::new(
                max_x - min_x + 2.0 * GROUP_PAD_X,
                max_y - min_y + GROUP_PAD_TOP + GROUP_PAD_BOTTOM,
            ),
            color: GROUP_COLOR.to_owned(),
            nodes: members,
        };
        let mut groups = self.groups().to_vec();
        groups.push(group);
        Some((
            id,
            StatePatch {
                groups: Some(groups),
                ..StatePatch::default()
            },
        ))
    }
}

// ─── Selection & viewport ────────────────────────────────────────────────

impl WorkflowState {
    /// Replace the selection, or add to it when `additive`. Unknown ids are
    /// ignored. `None` when the selection would not change.
    pub fn select_nodes(&self, ids: &[NodeId], additive: bool) -> Option<StatePatch> {
        let mut selected: Vec<NodeId> = if additive {
            self.selected_nodes().to_vec()
        } else {
            Vec::new()
        };
        for id in ids {
            if self.contains_node(*id) && !selected.contains(id) {
                selected.push(*id);
            }
        }
        if same_members(&selected, self.selected_nodes()) {
            return None;
        }
        Some(StatePatch::selection(selected))
    }

    pub fn select_all(&self) -> Option<StatePatch> {
        let all: Vec<NodeId> = self.nodes().iter().map(|n| n.id).collect();
        self.select_nodes(&all, false)
    }

    pub fn clear_selection(&self) -> Option<StatePatch> {
        if self.selected_nodes().is_empty() {
            return None;
        }
        Some(StatePatch::selection(Vec::new()))
    }

    pub fn set_viewport(&self, viewport: Viewport) -> Option<StatePatch> {
        if viewport == self.viewport() || viewport.zoom.is_nan() || viewport.zoom <= 0.0 {
            return None;
        }
        Some(StatePatch::viewport(viewport))
    }
}

// ─── Gesture revert ──────────────────────────────────────────────────────

impl WorkflowState {
    /// Patch putting node positions, the selection and the viewport back to
    /// how they were in `earlier`, keeping every other difference. Nodes
    /// missing from either snapshot are left alone.
    pub fn restore_layout(&self, earlier: &WorkflowState) -> Option<StatePatch> {
        let mut patch = StatePatch::default();

        let moved = self.nodes().iter().any(|n| {
            earlier
                .node(n.id)
                .is_some_and(|old| old.position != n.position)
        });
        if moved {
            patch.nodes = Some(
                self.nodes()
                    .iter()
                    .map(|n| {
                        let mut n = n.clone();
                        if let Some(old) = earlier.node(n.id) {
                            n.position = old.position;
                        }
                        n
                    })
                    .collect(),
            );
        }

        let selected: Vec<NodeId> = earlier
            .selected_nodes()
            .iter()
            .copied()
            .filter(|id| self.contains_node(*id))
            .collect();
        if !same_members(&selected, self.selected_nodes()) {
            patch.selected_nodes = Some(selected);
        }

        if earlier.viewport() != self.viewport() {
            patch.viewport = Some(earlier.viewport());
        }
        (!patch.is_empty()).then_some(patch)
    }
}

fn min_max(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn same_members(a: &[NodeId], b: &[NodeId]) -> bool {
    a.len() == b.len() && a.iter().all(|id| b.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_nodes(specs: &[(NodeType, f32, f32)]) -> (WorkflowState, Vec<NodeId>) {
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
    fn add_node_defaults() {
        let (state, ids) = with_nodes(&[(NodeType::Email, 10.0, 20.0)]);
        let node = state.node(ids[0]).unwrap();
        assert_eq!(node.data.label, "Email");
        assert_eq!(node.data.status, NodeStatus::Idle);
        assert_eq!(node.position, Point::new(10.0, 20.0));
    }

    #[test]
    fn add_node_avoids_loaded_ids() {
        let (state, _) = with_nodes(&[(NodeType::Code, 0.0, 0.0)]);
        let (a, patch) = state.add_node(NodeType::Code, Point::ORIGIN);
        let state = state.apply(patch);
        let (b, _) = state.add_node(NodeType::Code, Point::ORIGIN);
        assert_ne!(a, b);
        assert!(!state.contains_node(b));
    }

    #[test]
    fn update_merges_only_given_fields() {
        let (state, ids) = with_nodes(&[(NodeType::Http, 0.0, 0.0)]);
        let patch = state
            .update_node(
                ids[0],
                NodeUpdate {
                    label: Some("Fetch orders".into()),
                    ..NodeUpdate::default()
                },
            )
            .unwrap();
        let state = state.apply(patch);
        let node = state.node(ids[0]).unwrap();
        assert_eq!(node.data.label, "Fetch orders");
        assert_eq!(node.data.parameters.get("method"), Some(&Value::from("GET")));
        assert_eq!(node.position, Point::ORIGIN);
    }

    #[test]
    fn update_status_sink() {
        let (state, ids) = with_nodes(&[(NodeType::Filter, 0.0, 0.0)]);
        let state = state.apply(
            state
                .update_node(ids[0], NodeUpdate::status(NodeStatus::Running, None))
                .unwrap(),
        );
        let state = state.apply(
            state
                .update_node(ids[0], NodeUpdate::status(NodeStatus::Success, Some(412.0)))
                .unwrap(),
        );
        let data = &state.node(ids[0]).unwrap().data;
        assert_eq!(data.status, NodeStatus::Success);
        assert_eq!(data.execution_time, Some(412.0));
    }

    #[test]
    fn update_unknown_is_noop() {
        let (state, _) = with_nodes(&[(NodeType::Http, 0.0, 0.0)]);
        let ghost = NodeId::intern("ops_ghost");
        assert!(state.update_node(ghost, NodeUpdate::position(Point::ORIGIN)).is_none());
    }

    #[test]
    fn delete_cascades_in_one_patch() {
        let (state, ids) = with_nodes(&[
            (NodeType::Trigger, 0.0, 0.0),
            (NodeType::Http, 300.0, 0.0),
            (NodeType::Email, 600.0, 0.0),
        ]);
        let state = state.apply(state.add_connection(ids[0], ids[1]).unwrap().1);
        let state = state.apply(state.add_connection(ids[1], ids[2]).unwrap().1);
        let state = state.apply(state.select_nodes(&ids[..2], false).unwrap());
        let state = state.apply(state.create_group(&ids).unwrap().1);

        let patch = state.delete_nodes(&[ids[1]]).unwrap();
        assert!(patch.connections.is_some());
        assert!(patch.selected_nodes.is_some());
        let state = state.apply(patch);

        assert_eq!(state.nodes().len(), 2);
        assert!(state.connections().is_empty());
        assert_eq!(state.selected_nodes(), &[ids[0]]);
        assert_eq!(state.groups()[0].nodes.as_slice(), &[ids[0], ids[2]]);
    }

    #[test]
    fn delete_nothing_is_noop() {
        let (state, _) = with_nodes(&[(NodeType::Http, 0.0, 0.0)]);
        assert!(state.delete_nodes(&[]).is_none());
        assert!(state.delete_nodes(&[NodeId::intern("ops_missing")]).is_none());
    }

    #[test]
    fn connection_rejections() {
        let (state, ids) = with_nodes(&[(NodeType::Trigger, 0.0, 0.0), (NodeType::Http, 200.0, 0.0)]);
        let (t, h) = (ids[0], ids[1]);
        assert_eq!(state.can_connect(t, t), Err(ConnectRejection::SelfLoop(t)));
        assert_eq!(state.can_connect(h, t), Err(ConnectRejection::NoInputPin(t)));
        let ghost = NodeId::intern("ops_nowhere");
        assert_eq!(state.can_connect(t, ghost), Err(ConnectRejection::MissingNode(ghost)));

        let state = state.apply(state.add_connection(t, h).unwrap().1);
        assert_eq!(state.can_connect(t, h), Err(ConnectRejection::Duplicate(t, h)));
        assert!(state.add_connection(t, h).is_none());
    }

    #[test]
    fn delete_connection_by_id() {
        let (state, ids) = with_nodes(&[(NodeType::Webhook, 0.0, 0.0), (NodeType::Code, 300.0, 0.0)]);
        let (cid, patch) = state.add_connection(ids[0], ids[1]).unwrap();
        let state = state.apply(patch);
        assert!(state.delete_connection(ConnectionId::intern("ops_nope")).is_none());
        let state = state.apply(state.delete_connection(cid).unwrap());
        assert!(state.connections().is_empty());
        assert_eq!(state.nodes().len(), 2);
    }

    #[test]
    fn group_bounding_box() {
        let (state, ids) = with_nodes(&[(NodeType::Http, 100.0, 100.0), (NodeType::Email, 400.0, 250.0)]);
        let (_, patch) = state.create_group(&ids).unwrap();
        let state = state.apply(patch);
        let g = &state.groups()[0];
        assert_eq!(g.position, Point::new(80.0, 60.0));
        assert_eq!(g.size, Size::new(540.0, 310.0));
        assert_eq!(g.label, GROUP_LABEL);
        assert_eq!(g.color, GROUP_COLOR);
    }

    #[test]
    fn group_needs_two_nodes() {
        let (state, ids) = with_nodes(&[(NodeType::Http, 0.0, 0.0)]);
        assert!(state.create_group(&ids).is_none());
        assert!(state.create_group(&[ids[0], ids[0]]).is_none());
    }

    #[test]
    fn selection_replace_and_add() {
        let (state, ids) = with_nodes(&[
            (NodeType::Http, 0.0, 0.0),
            (NodeType::Email, 0.0, 0.0),
            (NodeType::Code, 0.0, 0.0),
        ]);
        let state = state.apply(state.select_nodes(&[ids[0]], false).unwrap());
        let state = state.apply(state.select_nodes(&[ids[1], ids[0]], true).unwrap());
        assert_eq!(state.selected_nodes(), &[ids[0], ids[1]]);
        assert!(state.select_nodes(&[ids[1], ids[0]], false).is_none());

        let state = state.apply(state.select_all().unwrap());
        assert_eq!(state.selected_nodes().len(), 3);
        let state = state.apply(state.clear_selection().unwrap());
        assert!(state.clear_selection().is_none());
    }

    #[test]
    fn move_nodes_rigid() {
        let (state, ids) = with_nodes(&[(NodeType::Http, 0.0, 0.0), (NodeType::Email, 50.0, 80.0)]);
        let state = state.apply(state.move_nodes(&ids, 15.0, -5.0).unwrap());
        assert_eq!(state.node(ids[0]).unwrap().position, Point::new(15.0, -5.0));
        assert_eq!(state.node(ids[1]).unwrap().position, Point::new(65.0, 75.0));
        assert!(state.move_nodes(&ids, 0.0, 0.0).is_none());
    }

    #[test]
    fn align_all_directions() {
        let (state, ids) = with_nodes(&[(NodeType::Http, 10.0, 100.0), (NodeType::Email, 50.0, 20.0)]);
        let pos = |s: &WorkflowState, i: usize| s.node(ids[i]).unwrap().position;

        let left = state.apply(state.align_nodes(&ids, AlignDirection::Left).unwrap());
        assert_eq!((pos(&left, 0).x, pos(&left, 1).x), (10.0, 10.0));
        let right = state.apply(state.align_nodes(&ids, AlignDirection::Right).unwrap());
        assert_eq!((pos(&right, 0).x, pos(&right, 1).x), (50.0, 50.0));
        let top = state.apply(state.align_nodes(&ids, AlignDirection::Top).unwrap());
        assert_eq!((pos(&top, 0).y, pos(&top, 1).y), (20.0, 20.0));
        let bottom = state.apply(state.align_nodes(&ids, AlignDirection::Bottom).unwrap());
        assert_eq!((pos(&bottom, 0).y, pos(&bottom, 1).y), (100.0, 100.0));
        let ch = state.apply(state.align_nodes(&ids, AlignDirection::CenterH).unwrap());
        assert_eq!((pos(&ch, 0).x, pos(&ch, 1).x), (30.0, 30.0));
        let cv = state.apply(state.align_nodes(&ids, AlignDirection::CenterV).unwrap());
        assert_eq!((pos(&cv, 0).y, pos(&cv, 1).y), (60.0, 60.0));

        assert!(state.align_nodes(&ids[..1], AlignDirection::Left).is_none());
    }

    #[test]
    fn set_viewport_rejects_noop_and_bad_zoom() {
        let state = WorkflowState::new();
        assert!(state.set_viewport(Viewport::default()).is_none());
        assert!(state.set_viewport(Viewport::new(0.0, 0.0, 0.0)).is_none());
        assert!(state.set_viewport(Viewport::new(3.0, 4.0, 1.0)).is_some());
    }

    #[test]
    fn restore_layout_keeps_other_edits() {
        let (before, ids) = with_nodes(&[(NodeType::Http, 0.0, 0.0), (NodeType::Email, 300.0, 0.0)]);
        let after = before.apply(before.move_nodes(&ids[..1], 40.0, 10.0).unwrap());
        let after = after.apply(after.select_nodes(&ids[..1], false).unwrap());
        let after = after.apply(
            after
                .update_node(ids[1], NodeUpdate::status(NodeStatus::Success, Some(3.0)))
                .unwrap(),
        );
        let after = after.apply(StatePatch::viewport(Viewport::new(20.0, 0.0, 1.5)));

        let restored = after.apply(after.restore_layout(&before).unwrap());
        assert_eq!(restored.node(ids[0]).unwrap().position, Point::ORIGIN);
        assert!(restored.selected_nodes().is_empty());
        assert_eq!(restored.viewport(), Viewport::default());
        assert_eq!(restored.node(ids[1]).unwrap().data.status, NodeStatus::Success);
        assert!(restored.restore_layout(&before).is_none());
    }
}
