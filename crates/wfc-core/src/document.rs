//! Persistence document: the save/load contract with storage layers.
//!
//! A [`WorkflowDocument`] carries nodes, connections and groups plus a small
//! metadata block. Viewport and selection are editing state and are not
//! saved. Loading is lenient about missing fields (everything defaults) and
//! strict about data that cannot be interpreted: unparseable input, unknown
//! node types and duplicate node ids are errors. Connections that violate
//! the graph invariants are dropped with a warning.

use crate::id::{ConnectionId, GroupId, NodeId};
use crate::model::{Connection, Group, Node, WorkflowState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Format version written by this crate.
pub const DOCUMENT_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid workflow JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid workflow MessagePack: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
    #[error("failed to encode workflow as MessagePack: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(NodeId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub name: String,
    pub version: String,
    /// Creation timestamp supplied by the storage layer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            name: "Untitled Workflow".to_owned(),
            version: DOCUMENT_VERSION.to_owned(),
            created: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowDocument {
    pub nodes: Vec<Node>,
    #[serde(alias = "edges")]
    pub connections: Vec<Connection>,
    pub groups: Vec<Group>,
    pub metadata: DocumentMetadata,
}

impl WorkflowDocument {
    /// Snapshot the persistent part of `state`.
    pub fn from_state(state: &WorkflowState, metadata: DocumentMetadata) -> Self {
        Self {
            nodes: state.nodes().to_vec(),
            connections: state.connections().to_vec(),
            groups: state.groups().to_vec(),
            metadata,
        }
    }

    /// Hydrate a fresh state (identity viewport, empty selection).
    pub fn into_state(self) -> Result<WorkflowState, DocumentError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        if let Some(dup) = self.nodes.iter().find(|n| !seen.insert(n.id)) {
            return Err(DocumentError::DuplicateNodeId(dup.id));
        }

        let nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .map(|mut n| {
                if n.data.label.is_empty() {
                    n.data.label = n.kind.info().label.to_owned();
                }
                n
            })
            .collect();

        let mut connections = self.connections;
        let mut taken: HashSet<ConnectionId> = connections.iter().map(|c| c.id).collect();
        for conn in connections.iter_mut().filter(|c| c.id.is_blank()) {
            conn.id = ConnectionId::fresh(|id| taken.contains(&id));
            taken.insert(conn.id);
        }
        let mut groups = self.groups;
        let mut taken: HashSet<GroupId> = groups.iter().map(|g| g.id).collect();
        for group in groups.iter_mut().filter(|g| g.id.is_blank()) {
            group.id = GroupId::fresh(|id| taken.contains(&id));
            taken.insert(group.id);
        }

        let connection_count = connections.len();
        let state = WorkflowState::from_parts(nodes, connections, groups);
        let dropped = connection_count - state.connections().len();
        if dropped > 0 {
            log::warn!("dropped {dropped} invalid connection(s) while loading");
        }
        Ok(state)
    }

    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, DocumentError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// Encode with field names so optional fields and aliases survive.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}
