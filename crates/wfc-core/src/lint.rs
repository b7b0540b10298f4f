//! Lint diagnostics for workflows.
//!
//! Reports structural issues without modifying the snapshot. Results feed
//! the host UI's problems panel; none of them block editing.

use crate::id::NodeId;
use crate::model::WorkflowState;
use crate::registry::{Category, NodeType};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Likely to break a run.
    Warning,
    /// Worth a look.
    Info,
}

/// A single lint diagnostic.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The node this diagnostic refers to; `None` for workflow-wide findings.
    pub node_id: Option<NodeId>,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "missing-trigger", "cycle").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all lint rules over a snapshot and return diagnostics.
#[must_use]
pub fn lint_workflow(state: &WorkflowState) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    if state.nodes().is_empty() {
        return diags;
    }
    let flow = FlowGraph::build(state);
    lint_missing_trigger(state, &mut diags);
    lint_disconnected(state, &flow, &mut diags);
    lint_unreachable(state, &flow, &mut diags);
    lint_cycles(&flow, &mut diags);
    lint_required_fields(state, &mut diags);
    diags
}

// ─── Graph view ──────────────────────────────────────────────────────────

struct FlowGraph {
    graph: DiGraph<NodeId, ()>,
    index: HashMap<NodeId, NodeIndex>,
}

impl FlowGraph {
    fn build(state: &WorkflowState) -> Self {
        let mut graph = DiGraph::with_capacity(state.nodes().len(), state.connections().len());
        let mut index = HashMap::with_capacity(state.nodes().len());
        for node in state.nodes() {
            index.insert(node.id, graph.add_node(node.id));
        }
        for c in state.connections() {
            if let (Some(&a), Some(&b)) = (index.get(&c.source_id), index.get(&c.target_id)) {
                graph.add_edge(a, b, ());
            }
        }
        Self { graph, index }
    }

    fn degree(&self, id: NodeId) -> usize {
        self.index
            .get(&id)
            .map_or(0, |&idx| self.graph.neighbors_undirected(idx).count())
    }
}

fn is_entry(kind: NodeType) -> bool {
    kind.info().category == Category::Triggers
}

// ─── Rules ───────────────────────────────────────────────────────────────

/// Warn when nothing can start the workflow.
fn lint_missing_trigger(state: &WorkflowState, diags: &mut Vec<LintDiagnostic>) {
    if !state.nodes().iter().any(|n| is_entry(n.kind)) {
        diags.push(LintDiagnostic {
            node_id: None,
            message: "Workflow has no trigger, webhook or schedule node to start it.".to_owned(),
            severity: LintSeverity::Warning,
            rule: "missing-trigger",
        });
    }
}

/// Flag nodes with no connections at all in a multi-node workflow.
fn lint_disconnected(state: &WorkflowState, flow: &FlowGraph, diags: &mut Vec<LintDiagnostic>) {
    if state.nodes().len() < 2 {
        return;
    }
    for node in state.nodes() {
        if flow.degree(node.id) == 0 {
            diags.push(LintDiagnostic {
                node_id: Some(node.id),
                message: format!("`{}` is not connected to anything.", node.data.label),
                severity: LintSeverity::Info,
                rule: "disconnected-node",
            });
        }
    }
}

/// Warn on connected nodes that no entry node can reach.
fn lint_unreachable(state: &WorkflowState, flow: &FlowGraph, diags: &mut Vec<LintDiagnostic>) {
    let entries: Vec<NodeIndex> = state
        .nodes()
        .iter()
        .filter(|n| is_entry(n.kind))
        .filter_map(|n| flow.index.get(&n.id).copied())
        .collect();
    if entries.is_empty() {
        return;
    }

    let mut reached = HashSet::new();
    for start in entries {
        let mut bfs = Bfs::new(&flow.graph, start);
        while let Some(idx) = bfs.next(&flow.graph) {
            reached.insert(idx);
        }
    }

    for node in state.nodes() {
        let Some(&idx) = flow.index.get(&node.id) else {
            continue;
        };
        if !reached.contains(&idx) && flow.degree(node.id) > 0 {
            diags.push(LintDiagnostic {
                node_id: Some(node.id),
                message: format!("`{}` can never run: no trigger leads to it.", node.data.label),
                severity: LintSeverity::Warning,
                rule: "unreachable-node",
            });
        }
    }
}

/// One warning per strongly connected component with more than one node.
fn lint_cycles(flow: &FlowGraph, diags: &mut Vec<LintDiagnostic>) {
    for scc in tarjan_scc(&flow.graph) {
        if scc.len() < 2 {
            continue;
        }
        let mut members: Vec<NodeId> = scc.iter().map(|&idx| flow.graph[idx]).collect();
        members.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let names: Vec<&str> = members.iter().map(|id| id.as_str()).collect();
        diags.push(LintDiagnostic {
            node_id: members.first().copied(),
            message: format!("Cycle between {}.", names.join(", ")),
            severity: LintSeverity::Warning,
            rule: "cycle",
        });
    }
}

/// Required registry fields left empty.
fn lint_required_fields(state: &WorkflowState, diags: &mut Vec<LintDiagnostic>) {
    for node in state.nodes() {
        for field in node.kind.info().fields.iter().filter(|f| f.required) {
            let filled = match node.data.parameters.get(field.name) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            };
            if !filled {
                diags.push(LintDiagnostic {
                    node_id: Some(node.id),
                    message: format!("`{}` needs a value for {}.", node.data.label, field.label),
                    severity: LintSeverity::Warning,
                    rule: "missing-required-field",
                });
            }
        }
    }
}
