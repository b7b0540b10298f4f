//! Integration tests: edit operations → snapshots → graph invariants.
//!
//! Drives `wfc-core` the way an editor does: every operation yields a patch
//! that is applied to produce the next snapshot.

use proptest::prelude::*;
use std::collections::HashSet;
use wfc_core::{NodeId, NodeType, Point, WorkflowState};

// ─── Scenario ────────────────────────────────────────────────────────────

#[test]
fn trigger_to_http_scenario() {
    let state = WorkflowState::new();
    let (trigger, patch) = state.add_node(NodeType::Trigger, Point::new(0.0, 0.0));
    let state = state.apply(patch);
    let (http, patch) = state.add_node(NodeType::Http, Point::new(200.0, 0.0));
    let state = state.apply(patch);

    let (_, patch) = state
        .add_connection(trigger, http)
        .expect("trigger → http should connect");
    let state = state.apply(patch);
    assert_eq!(state.connections().len(), 1);

    assert!(
        state.add_connection(http, trigger).is_none(),
        "trigger has no input pin"
    );

    let state = state.apply(state.delete_nodes(&[trigger]).expect("trigger exists"));
    assert!(state.connections().is_empty());
    assert_eq!(state.nodes().len(), 1);
}

// ─── Idempotent no-ops ───────────────────────────────────────────────────

#[test]
fn empty_delete_and_self_loop_leave_state_alone() {
    let state = WorkflowState::new();
    let (a, patch) = state.add_node(NodeType::Code, Point::ORIGIN);
    let state = state.apply(patch);

    assert!(state.delete_nodes(&[]).is_none());
    assert!(state.add_connection(a, a).is_none());
    assert!(state.create_group(&[a]).is_none());
}

// ─── Referential integrity ───────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add(usize, i16, i16),
    Delete(Vec<usize>),
    Connect(usize, usize),
    Group(Vec<usize>),
    Select(Vec<usize>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NodeType::ALL.len(), any::<i16>(), any::<i16>()).prop_map(|(k, x, y)| Op::Add(k, x, y)),
        prop::collection::vec(0usize..16, 0..3).prop_map(Op::Delete),
        (0usize..16, 0usize..16).prop_map(|(a, b)| Op::Connect(a, b)),
        prop::collection::vec(0usize..16, 0..4).prop_map(Op::Group),
        prop::collection::vec(0usize..16, 0..4).prop_map(Op::Select),
    ]
}

/// Resolve indices against every id ever created so stale ids get exercised.
fn pick(created: &[NodeId], idx: &[usize]) -> Vec<NodeId> {
    idx.iter()
        .filter_map(|i| created.get(*i % created.len().max(1)).copied())
        .collect()
}

fn assert_integrity(state: &WorkflowState) -> Result<(), TestCaseError> {
    let ids: HashSet<NodeId> = state.nodes().iter().map(|n| n.id).collect();
    prop_assert_eq!(ids.len(), state.nodes().len(), "node ids unique");
    let mut pairs = HashSet::new();
    for c in state.connections() {
        prop_assert!(ids.contains(&c.source_id), "dangling source {}", c.source_id);
        prop_assert!(ids.contains(&c.target_id), "dangling target {}", c.target_id);
        prop_assert_ne!(c.source_id, c.target_id);
        prop_assert!(pairs.insert((c.source_id, c.target_id)), "parallel edge");
        let target = state.node(c.target_id).map(|n| n.kind);
        prop_assert_ne!(target, Some(NodeType::Trigger));
    }
    for id in state.selected_nodes() {
        prop_assert!(ids.contains(id), "stale selection {id}");
    }
    for g in state.groups() {
        for id in &g.nodes {
            prop_assert!(ids.contains(id), "stale group member {id}");
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn integrity_holds_after_every_step(ops in prop::collection::vec(op(), 1..40)) {
        let mut state = WorkflowState::new();
        let mut created: Vec<NodeId> = Vec::new();
        for op in ops {
            match op {
                Op::Add(k, x, y) => {
                    let (id, patch) = state.add_node(NodeType::ALL[k], Point::new(x as f32, y as f32));
                    created.push(id);
                    state = state.apply(patch);
                }
                Op::Delete(idx) => {
                    if let Some(patch) = state.delete_nodes(&pick(&created, &idx)) {
                        state = state.apply(patch);
                    }
                }
                Op::Connect(a, b) => {
                    let picked = pick(&created, &[a, b]);
                    if let &[a, b] = picked.as_slice()
                        && let Some((_, patch)) = state.add_connection(a, b)
                    {
                        state = state.apply(patch);
                    }
                }
                Op::Group(idx) => {
                    if let Some((_, patch)) = state.create_group(&pick(&created, &idx)) {
                        state = state.apply(patch);
                    }
                }
                Op::Select(idx) => {
                    if let Some(patch) = state.select_nodes(&pick(&created, &idx), false) {
                        state = state.apply(patch);
                    }
                }
            }
            assert_integrity(&state)?;
        }
    }

    #[test]
    fn self_loops_never_added(x in -500i16..500, y in -500i16..500, kind in 0..NodeType::ALL.len()) {
        let state = WorkflowState::new();
        let (id, patch) = state.add_node(NodeType::ALL[kind], Point::new(x as f32, y as f32));
        let state = state.apply(patch);
        prop_assert!(state.add_connection(id, id).is_none());
    }
}
