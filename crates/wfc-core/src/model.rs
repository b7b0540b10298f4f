//! Workflow graph data model.
//!
//! A [`WorkflowState`] is an immutable snapshot of the whole editing
//! aggregate: nodes, connections, groups, the selection set and the viewport.
//! Edits never mutate a snapshot; they describe a [`StatePatch`] and
//! [`WorkflowState::apply`] produces the next snapshot. Collections are
//! `Arc`-shared, so a snapshot that only changes the viewport reuses the
//! previous node, connection and group storage.
//!
//! `apply` is the mutation boundary: whatever a patch contains, the result
//! satisfies the graph invariants (unique node ids, connections between two
//! distinct existing nodes into an input pin, no parallel edges, selection
//! and group members referencing live nodes).

use crate::geometry::{Point, Size, Viewport};
use crate::id::{ConnectionId, GroupId, NodeId};
use crate::ops::{GROUP_COLOR, GROUP_LABEL};
use crate::registry::NodeType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::sync::Arc;

/// Node body size in world units, used for hit testing and pin placement.
pub const NODE_SIZE: Size = Size::new(200.0, 80.0);

/// Per-node extent assumed when computing a group's bounding box.
pub const GROUP_NODE_FOOTPRINT: Size = Size::new(200.0, 100.0);

// ─── Nodes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    pub parameters: Map<String, Value>,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    /// A fresh idle node labelled after its registry entry.
    pub fn new(id: NodeId, kind: NodeType, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            data: NodeData {
                label: kind.info().label.to_owned(),
                parameters: kind.default_parameters(),
                ..NodeData::default()
            },
        }
    }

    /// Input pin anchor in world space (left edge, vertical middle).
    pub fn input_pin(&self) -> Point {
        self.position.offset(0.0, NODE_SIZE.height / 2.0)
    }

    /// Output pin anchor in world space (right edge, vertical middle).
    pub fn output_pin(&self) -> Point {
        self.position.offset(NODE_SIZE.width, NODE_SIZE.height / 2.0)
    }
}

// ─── Connections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Active,
    Error,
}

/// Directed edge from `source_id`'s output pin to `target_id`'s input pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Blank when the document omitted it; loading assigns a fresh one.
    #[serde(default)]
    pub id: ConnectionId,
    #[serde(alias = "source")]
    pub source_id: NodeId,
    #[serde(alias = "target")]
    pub target_id: NodeId,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub status: ConnectionStatus,
}

impl Connection {
    pub fn new(id: ConnectionId, source_id: NodeId, target_id: NodeId) -> Self {
        Self {
            id,
            source_id,
            target_id,
            animated: false,
            status: ConnectionStatus::Idle,
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source_id == node || self.target_id == node
    }
}

// ─── Groups ──────────────────────────────────────────────────────────────

/// A labelled box around a set of nodes.
///
/// The box is computed once at creation and is not re-fitted when members
/// move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: GroupId,
    #[serde(default = "default_group_label")]
    pub label: String,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub size: Size,
    #[serde(default = "default_group_color")]
    pub color: String,
    #[serde(default)]
    pub nodes: SmallVec<[NodeId; 4]>,
}

fn default_group_label() -> String {
    GROUP_LABEL.to_owned()
}

fn default_group_color() -> String {
    GROUP_COLOR.to_owned()
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// Partial update: every `Some` field replaces the matching collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub nodes: Option<Vec<Node>>,
    pub connections: Option<Vec<Connection>>,
    pub groups: Option<Vec<Group>>,
    pub selected_nodes: Option<Vec<NodeId>>,
    pub viewport: Option<Viewport>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_none()
            && self.connections.is_none()
            && self.groups.is_none()
            && self.selected_nodes.is_none()
            && self.viewport.is_none()
    }

    pub fn viewport(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
            ..Self::default()
        }
    }

    pub fn selection(selected: Vec<NodeId>) -> Self {
        Self {
            selected_nodes: Some(selected),
            ..Self::default()
        }
    }
}

/// Immutable workflow snapshot. Node order is paint order: later nodes are
/// drawn on top.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    nodes: Arc<[Node]>,
    connections: Arc<[Connection]>,
    groups: Arc<[Group]>,
    selected: Arc<[NodeId]>,
    viewport: Viewport,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            nodes: Arc::from([]),
            connections: Arc::from([]),
            groups: Arc::from([]),
            selected: Arc::from([]),
            viewport: Viewport::default(),
        }
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw collections, dropping anything that breaks
    /// the graph invariants.
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>, groups: Vec<Group>) -> Self {
        Self::default().apply(StatePatch {
            nodes: Some(nodes),
            connections: Some(connections),
            groups: Some(groups),
            ..StatePatch::default()
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected nodes in paint order.
    pub fn selection(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| self.is_selected(n.id))
    }

    /// True when both snapshots share the same node storage.
    pub fn shares_nodes_with(&self, other: &WorkflowState) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// Merge a patch into a new snapshot. Untouched collections are shared.
    #[must_use]
    pub fn apply(&self, patch: StatePatch) -> WorkflowState {
        let mut next = self.clone();
        if let Some(nodes) = patch.nodes {
            next.nodes = Arc::from(nodes);
        }
        if let Some(connections) = patch.connections {
            next.connections = Arc::from(connections);
        }
        if let Some(groups) = patch.groups {
            next.groups = Arc::from(groups);
        }
        if let Some(selected) = patch.selected_nodes {
            next.selected = Arc::from(selected);
        }
        if let Some(viewport) = patch.viewport {
            next.viewport = viewport;
        }
        next.normalize();
        next
    }

    // ─── Invariants ──────────────────────────────────────────────────────

    fn normalize(&mut self) {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        if self.nodes.iter().any(|n| !seen.insert(n.id)) {
            let mut kept = HashSet::with_capacity(self.nodes.len());
            let nodes: Vec<Node> = self
                .nodes
                .iter()
                .filter(|n| {
                    let fresh = kept.insert(n.id);
                    if !fresh {
                        log::warn!("dropping duplicate node {}", n.id);
                    }
                    fresh
                })
                .cloned()
                .collect();
            self.nodes = Arc::from(nodes);
        }

        if self
            .connections
            .iter()
            .any(|c| self.check_endpoints(c.source_id, c.target_id).is_err())
            || has_duplicates(self.connections.iter().map(|c| (c.source_id, c.target_id)))
            || has_duplicates(self.connections.iter().map(|c| c.id))
        {
            let mut pairs = HashSet::new();
            let mut ids = HashSet::new();
            let connections: Vec<Connection> = self
                .connections
                .iter()
                .filter(|c| {
                    if let Err(reason) = self.check_endpoints(c.source_id, c.target_id) {
                        log::warn!("dropping connection {}: {reason}", c.id);
                        return false;
                    }
                    if !pairs.insert((c.source_id, c.target_id)) || !ids.insert(c.id) {
                        log::warn!("dropping duplicate connection {}", c.id);
                        return false;
                    }
                    true
                })
                .cloned()
                .collect();
            self.connections = Arc::from(connections);
        }

        if self.selected.iter().any(|id| !self.contains_node(*id))
            || has_duplicates(self.selected.iter().copied())
        {
            let mut seen = HashSet::new();
            let selected: Vec<NodeId> = self
                .selected
                .iter()
                .copied()
                .filter(|id| self.contains_node(*id) && seen.insert(*id))
                .collect();
            self.selected = Arc::from(selected);
        }

        if self
            .groups
            .iter()
            .any(|g| g.nodes.iter().any(|id| !self.contains_node(*id)))
        {
            let groups: Vec<Group> = self
                .groups
                .iter()
                .map(|g| {
                    let mut g = g.clone();
                    g.nodes.retain(|id| self.contains_node(*id));
                    g
                })
                .collect();
            self.groups = Arc::from(groups);
        }
    }
}

fn has_duplicates<T: Eq + std::hash::Hash>(mut items: impl Iterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    items.any(|item| !seen.insert(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, kind: NodeType, x: f32, y: f32) -> Node {
        Node::new(NodeId::intern(name), kind, Point::new(x, y))
    }

    fn conn(name: &str, from: &str, to: &str) -> Connection {
        Connection::new(
            ConnectionId::intern(name),
            NodeId::intern(from),
            NodeId::intern(to),
        )
    }

    #[test]
    fn new_node_uses_registry_label() {
        let n = node("m_http", NodeType::Http, 0.0, 0.0);
        assert_eq!(n.data.label, "HTTP Request");
        assert_eq!(n.data.status, NodeStatus::Idle);
        assert_eq!(n.input_pin(), Point::new(0.0, 40.0));
        assert_eq!(n.output_pin(), Point::new(200.0, 40.0));
    }

    #[test]
    fn viewport_patch_shares_collections() {
        let state = WorkflowState::from_parts(
            vec![node("m_a", NodeType::Trigger, 0.0, 0.0)],
            vec![],
            vec![],
        );
        let next = state.apply(StatePatch::viewport(Viewport::new(5.0, 5.0, 2.0)));
        assert!(next.shares_nodes_with(&state));
        assert_eq!(next.viewport().zoom, 2.0);
    }

    #[test]
    fn apply_drops_invalid_connections() {
        let state = WorkflowState::from_parts(
            vec![
                node("m_t", NodeType::Trigger, 0.0, 0.0),
                node("m_h", NodeType::Http, 200.0, 0.0),
            ],
            vec![
                conn("m_c1", "m_t", "m_h"),
                conn("m_c2", "m_t", "m_h"),
                conn("m_c3", "m_h", "m_t"),
                conn("m_c4", "m_h", "m_h"),
                conn("m_c5", "m_h", "m_ghost"),
            ],
            vec![],
        );
        let ids: Vec<&str> = state.connections().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["m_c1"]);
    }

    #[test]
    fn apply_drops_duplicate_nodes_and_stale_selection() {
        let state = WorkflowState::default().apply(StatePatch {
            nodes: Some(vec![
                node("m_dup", NodeType::Code, 0.0, 0.0),
                node("m_dup", NodeType::Email, 9.0, 9.0),
            ]),
            selected_nodes: Some(vec![
                NodeId::intern("m_dup"),
                NodeId::intern("m_dup"),
                NodeId::intern("m_gone"),
            ]),
            ..StatePatch::default()
        });
        assert_eq!(state.nodes().len(), 1);
        assert_eq!(state.nodes()[0].kind, NodeType::Code);
        assert_eq!(state.selected_nodes(), &[NodeId::intern("m_dup")]);
    }

    #[test]
    fn node_data_defaults_on_missing_fields() {
        let n: Node =
            serde_json::from_str(r#"{"id":"m_raw","type":"filter","position":{"x":1,"y":2}}"#)
                .unwrap();
        assert_eq!(n.data, NodeData::default());
        assert_eq!(n.position, Point::new(1.0, 2.0));
    }

    #[test]
    fn connection_accepts_short_endpoint_names() {
        let c: Connection =
            serde_json::from_str(r#"{"id":"m_e","source":"m_a","target":"m_b"}"#).unwrap();
        assert_eq!(c.source_id.as_str(), "m_a");
        assert_eq!(c.target_id.as_str(), "m_b");
        assert_eq!(c.status, ConnectionStatus::Idle);
    }
}
