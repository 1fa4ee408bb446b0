use crate::models::BinderNode;

use super::{add_node_to_parent, find_node, find_parent_id, remove_node, siblings_of, subtree_contains};

/// Where a drop gesture wants to put the dragged node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MovePlan {
    /// `None` targets the root sequence.
    pub parent_id: Option<String>,
    /// Insertion index among the destination siblings once the dragged node
    /// has been taken out. This doubles as the persisted `order_index`.
    pub index: usize,
}

/// Turns "dropped `active` onto `over`" into a concrete destination.
///
/// Returns `None` for every gesture that must not move anything: dropping a
/// node onto itself, stale ids that no longer resolve, a folder dropped into
/// its own subtree, and drops that would leave the node exactly where it is.
pub(crate) fn plan_move(tree: &[BinderNode], active_id: &str, over_id: &str) -> Option<MovePlan> {
    if active_id == over_id {
        return None;
    }

    let active = find_node(tree, active_id)?;
    let over = find_node(tree, over_id)?;

    // A folder may never land inside its own subtree.
    if active.is_folder && subtree_contains(active, over_id) {
        return None;
    }

    let plan = if over.is_folder {
        // Dropping onto a folder appends to the end of its children.
        let count = over.children.iter().filter(|c| c.id != active_id).count();
        MovePlan {
            parent_id: Some(over.id.clone()),
            index: count,
        }
    } else {
        // Dropping onto a document inserts at that document's slot among its
        // siblings, with the dragged node taken out first (it is about to
        // leave its old position).
        let over_parent = find_parent_id(tree, over_id)?;
        let siblings = siblings_of(tree, over_parent.as_deref())?;
        let over_pos = siblings.iter().position(|s| s.id == over_id)?;
        let active_pos = siblings.iter().position(|s| s.id == active_id);
        let moving_down = matches!(active_pos, Some(a) if a < over_pos);
        let over_pos_excl = if moving_down { over_pos - 1 } else { over_pos };
        // A downward drag among the same siblings lands after the target.
        let index = if moving_down {
            over_pos_excl + 1
        } else {
            over_pos_excl
        };
        MovePlan {
            parent_id: over_parent,
            index,
        }
    };

    // Dropping a node where it already sits is a no-op; skip the backend
    // round-trip entirely.
    if is_stationary(tree, active_id, &plan) {
        return None;
    }

    Some(plan)
}

/// Executes a plan as a pure transform: clone the node out, remove it, then
/// insert at the planned slot. `None` means the tree no longer matches the
/// plan; callers abort without touching shared state.
pub(crate) fn apply_move(
    tree: &[BinderNode],
    active_id: &str,
    plan: &MovePlan,
) -> Option<Vec<BinderNode>> {
    let node = find_node(tree, active_id)?.clone();
    let without = remove_node(tree, active_id);
    add_node_to_parent(&without, node, plan.parent_id.as_deref(), plan.index)
}

/// Removal then reinsertion at the node's own index restores the original
/// order, so that combination is the identity move.
fn is_stationary(tree: &[BinderNode], active_id: &str, plan: &MovePlan) -> bool {
    let Some(current_parent) = find_parent_id(tree, active_id) else {
        return false;
    };
    if current_parent != plan.parent_id {
        return false;
    }
    let Some(siblings) = siblings_of(tree, current_parent.as_deref()) else {
        return false;
    };
    siblings.iter().position(|s| s.id == active_id) == Some(plan.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::test_support::{doc, folder};
    use crate::tree::{collect_ids, find_node};

    fn flat_chapters() -> Vec<BinderNode> {
        vec![
            doc("c1", "Chapter 1", 0),
            doc("c2", "Chapter 2", 0),
            doc("c3", "Chapter 3", 0),
        ]
    }

    fn act_tree() -> Vec<BinderNode> {
        vec![
            folder(
                "act-1",
                "Act I",
                vec![doc("c1", "Chapter 1", 0), doc("c2", "Chapter 2", 0)],
            ),
            doc("c3", "Chapter 3", 0),
        ]
    }

    #[test]
    fn test_drop_onto_folder_appends_to_its_children() {
        let tree = act_tree();
        let plan = plan_move(&tree, "c3", "act-1").expect("legal move");
        assert_eq!(plan.parent_id.as_deref(), Some("act-1"));
        assert_eq!(plan.index, 2);

        let next = apply_move(&tree, "c3", &plan).expect("apply should succeed");
        let act1 = find_node(&next, "act-1").expect("folder survives");
        let kids: Vec<&str> = act1.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(kids, vec!["c1", "c2", "c3"]);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_downward_sibling_drop_lands_after_target() {
        // [C1, C2, C3]: dragging C1 onto C3 reads as "put it after C3".
        let tree = flat_chapters();
        let plan = plan_move(&tree, "c1", "c3").expect("legal move");
        assert_eq!(plan.parent_id, None);
        assert_eq!(plan.index, 2);

        let next = apply_move(&tree, "c1", &plan).expect("apply should succeed");
        let order: Vec<&str> = next.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["c2", "c3", "c1"]);
    }

    #[test]
    fn test_upward_sibling_drop_lands_before_target() {
        let tree = flat_chapters();
        let plan = plan_move(&tree, "c3", "c1").expect("legal move");
        assert_eq!(plan.parent_id, None);
        assert_eq!(plan.index, 0);

        let next = apply_move(&tree, "c3", &plan).expect("apply should succeed");
        let order: Vec<&str> = next.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["c3", "c1", "c2"]);
    }

    #[test]
    fn test_folder_cannot_be_dropped_into_own_subtree() {
        let tree = vec![folder(
            "a",
            "Folder A",
            vec![folder("b", "Folder B", vec![doc("c", "Chapter", 0)])],
        )];
        assert!(plan_move(&tree, "a", "b").is_none());
        assert!(plan_move(&tree, "a", "c").is_none());
    }

    #[test]
    fn test_drop_onto_self_is_a_no_op() {
        let tree = flat_chapters();
        assert!(plan_move(&tree, "c2", "c2").is_none());
    }

    #[test]
    fn test_stale_ids_plan_nothing() {
        let tree = flat_chapters();
        assert!(plan_move(&tree, "ghost", "c1").is_none());
        assert!(plan_move(&tree, "c1", "ghost").is_none());
    }

    #[test]
    fn test_last_child_onto_own_parent_folder_is_a_no_op() {
        let tree = act_tree();
        assert!(plan_move(&tree, "c2", "act-1").is_none());
    }

    #[test]
    fn test_first_child_onto_own_parent_folder_moves_to_end() {
        let tree = act_tree();
        let plan = plan_move(&tree, "c1", "act-1").expect("legal move");
        assert_eq!(plan.index, 1);

        let next = apply_move(&tree, "c1", &plan).expect("apply should succeed");
        let act1 = find_node(&next, "act-1").expect("folder survives");
        let kids: Vec<&str> = act1.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(kids, vec!["c2", "c1"]);
    }

    #[test]
    fn test_cross_parent_drop_inserts_before_target() {
        let tree = act_tree();
        let plan = plan_move(&tree, "c3", "c2").expect("legal move");
        assert_eq!(plan.parent_id.as_deref(), Some("act-1"));
        assert_eq!(plan.index, 1);

        let next = apply_move(&tree, "c3", &plan).expect("apply should succeed");
        let act1 = find_node(&next, "act-1").expect("folder survives");
        let kids: Vec<&str> = act1.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(kids, vec!["c1", "c3", "c2"]);
    }

    #[test]
    fn test_nested_node_dropped_onto_root_document() {
        let tree = act_tree();
        let plan = plan_move(&tree, "c1", "c3").expect("legal move");
        assert_eq!(plan.parent_id, None);
        assert_eq!(plan.index, 1);

        let next = apply_move(&tree, "c1", &plan).expect("apply should succeed");
        let roots: Vec<&str> = next.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["act-1", "c1", "c3"]);
    }

    #[test]
    fn test_moves_never_duplicate_or_drop_ids() {
        let tree = act_tree();
        let plan = plan_move(&tree, "c2", "c3").expect("legal move");
        let next = apply_move(&tree, "c2", &plan).expect("apply should succeed");

        let mut before = collect_ids(&tree);
        let mut after = collect_ids(&next);
        before.sort();
        after.sort();
        assert_eq!(before, after);
        after.dedup();
        assert_eq!(after.len(), before.len());
    }

    #[test]
    fn test_planned_index_matches_final_position() {
        let tree = flat_chapters();
        let plan = plan_move(&tree, "c1", "c3").expect("legal move");
        let next = apply_move(&tree, "c1", &plan).expect("apply should succeed");
        assert_eq!(next.iter().position(|n| n.id == "c1"), Some(plan.index));
    }

    #[test]
    fn test_adjacent_swap_is_a_real_move() {
        let tree = flat_chapters();
        let plan = plan_move(&tree, "c2", "c1").expect("legal move");
        let next = apply_move(&tree, "c2", &plan).expect("apply should succeed");
        let order: Vec<&str> = next.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["c2", "c1", "c3"]);
    }
}
