//! Property-based invariant tests for the mutation engine and history.
//!
//! 1. Adding a fresh element then deleting it restores the tree.
//! 2. Ids stay unique under arbitrary add/update/delete sequences.
//! 3. n UNDOs followed by n REDOs restore the pre-undo state.
//! 4. A new action after UNDO discards the redo branch.
//! 5. Every reachable tree survives a JSON round trip.

use funnelcraft_common::IdGenerator;
use funnelcraft_editor::{
    add_element, delete_element, find_in, tree, EditorAction, EditorElement, EditorState,
    ElementContent, ElementId, ElementTemplate,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add { target: usize, template: usize },
    Update { target: usize, rename: String },
    Delete { target: usize },
    Load { duplicated: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), 0usize..ElementTemplate::ALL.len())
            .prop_map(|(target, template)| Op::Add { target, template }),
        (any::<usize>(), "[a-z]{1,8}").prop_map(|(target, rename)| Op::Update { target, rename }),
        any::<usize>().prop_map(|target| Op::Delete { target }),
        any::<bool>().prop_map(|duplicated| Op::Load { duplicated }),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..40)
}

fn all_ids(elements: &[EditorElement]) -> Vec<ElementId> {
    elements
        .iter()
        .flat_map(EditorElement::ids)
        .cloned()
        .collect()
}

fn pick(elements: &[EditorElement], target: usize) -> ElementId {
    let ids = all_ids(elements);
    ids[target % ids.len()].clone()
}

/// Map a generated op onto the current tree
fn to_action(state: &EditorState, op: &Op, ids: &mut IdGenerator) -> EditorAction {
    let elements = &state.editor().elements;
    match op {
        Op::Add { target, template } => EditorAction::AddElement {
            container_id: pick(elements, *target),
            element: ElementTemplate::ALL[*template].build(ids),
        },
        Op::Update { target, rename } => {
            let id = pick(elements, *target);
            let mut element = find_in(elements, &id).cloned().expect("picked id exists");
            element.name = rename.clone();
            EditorAction::UpdateElement { element }
        }
        Op::Delete { target } => EditorAction::DeleteElement {
            element: EditorElement::new(pick(elements, *target), "", ElementContent::ContactForm),
        },
        // Reload the current page, or a copy with every root doubled
        Op::Load { duplicated } => {
            let mut loaded = elements.clone();
            if *duplicated {
                loaded.extend(elements.iter().cloned());
            }
            EditorAction::LoadData {
                elements: Some(loaded),
                with_live: false,
            }
        }
    }
}

fn run(ops: &[Op]) -> EditorState {
    let mut state = EditorState::new();
    let mut ids = IdGenerator::sequential("p");
    for op in ops {
        let action = to_action(&state, op, &mut ids);
        state.dispatch(action);
    }
    state
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Add then delete is identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_then_delete_restores_tree(ops in ops_strategy(), target in any::<usize>(), template in 0usize..7) {
        let state = run(&ops);
        let elements = &state.editor().elements;

        let containers: Vec<ElementId> = elements
            .iter()
            .flat_map(EditorElement::ids)
            .filter(|id| find_in(elements, id).is_some_and(EditorElement::is_container))
            .cloned()
            .collect();
        let container_id = &containers[target % containers.len()];

        let mut fresh_ids = IdGenerator::sequential("fresh");
        let element = ElementTemplate::ALL[template].build(&mut fresh_ids);

        let added = add_element(elements, container_id, &element);
        prop_assert_eq!(tree::node_count(&added), tree::node_count(elements) + element.node_count());

        let restored = delete_element(&added, &element.id);
        prop_assert_eq!(&restored, elements);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Ids unique after any mutation sequence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ids_stay_unique(ops in ops_strategy()) {
        let state = run(&ops);
        prop_assert!(
            tree::validate(&state.editor().elements).is_ok(),
            "invalid tree after {:?}",
            ops
        );
        for snapshot in state.history().snapshots() {
            prop_assert!(tree::validate(&snapshot.elements).is_ok());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Undo^n then redo^n restores
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn undo_redo_restores(ops in ops_strategy(), n in 0usize..50) {
        let mut state = run(&ops);
        let before = state.editor().clone();
        let steps = n.min(state.history().current_index());

        for _ in 0..steps {
            state.dispatch(EditorAction::Undo);
        }
        prop_assert_eq!(state.history().redo_levels(), steps);

        for _ in 0..steps {
            state.dispatch(EditorAction::Redo);
        }
        prop_assert_eq!(state.editor(), &before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Undo, new action, redo: redo does nothing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn new_action_discards_redo(ops in ops_strategy(), extra in op_strategy()) {
        let mut state = run(&ops);
        state.dispatch(EditorAction::Undo);

        let mut ids = IdGenerator::sequential("late");
        let action = to_action(&state, &extra, &mut ids);
        state.dispatch(action);

        let after_action = state.clone();
        state.dispatch(EditorAction::Redo);
        prop_assert_eq!(state, after_action);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Storage encoding round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn json_round_trip_preserves_tree(ops in ops_strategy()) {
        let state = run(&ops);
        let elements = &state.editor().elements;

        let encoded = tree::to_json(elements).expect("encode");
        let decoded = tree::from_json(&encoded).expect("decode");
        prop_assert_eq!(&decoded, elements);
    }
}

#[test]
fn json_round_trip_covers_every_template() {
    let mut state = EditorState::new();
    let mut ids = IdGenerator::sequential("tpl");
    for template in ElementTemplate::ALL {
        state.dispatch(EditorAction::AddElement {
            container_id: funnelcraft_editor::BODY_ID.into(),
            element: template.build(&mut ids),
        });
    }

    let elements = &state.editor().elements;
    assert_eq!(tree::node_count(elements), 1 + ElementTemplate::ALL.len() + 2);

    let decoded = tree::from_json(&tree::to_json(elements).unwrap()).unwrap();
    assert_eq!(&decoded, elements);
}
