use crate::models::BinderNode;

pub(crate) mod reorder;

/// Depth-first lookup of a node anywhere in the forest.
pub(crate) fn find_node<'a>(tree: &'a [BinderNode], id: &str) -> Option<&'a BinderNode> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Resolves which parent holds `id`.
///
/// `Some(Some(pid))` for a nested node, `Some(None)` for a root-level node,
/// `None` when the id is nowhere in the forest. Callers must keep the last
/// two apart: a vanished node aborts the operation instead of being treated
/// as a root move.
pub(crate) fn find_parent_id(tree: &[BinderNode], id: &str) -> Option<Option<String>> {
    for node in tree {
        if node.id == id {
            return Some(None);
        }
        if let Some(pid) = parent_within(node, id) {
            return Some(Some(pid));
        }
    }
    None
}

fn parent_within(node: &BinderNode, id: &str) -> Option<String> {
    for child in &node.children {
        if child.id == id {
            return Some(node.id.clone());
        }
        if let Some(pid) = parent_within(child, id) {
            return Some(pid);
        }
    }
    None
}

/// True when `id` names `node` itself or anything in its subtree. This is
/// the cycle guard for folder moves.
pub(crate) fn subtree_contains(node: &BinderNode, id: &str) -> bool {
    node.id == id || node.children.iter().any(|child| subtree_contains(child, id))
}

/// Copy of the forest with the matching node (and its embedded subtree)
/// removed. Unknown ids yield an equal forest. Sibling order elsewhere is
/// untouched; the input is never mutated.
pub(crate) fn remove_node(tree: &[BinderNode], id: &str) -> Vec<BinderNode> {
    tree.iter()
        .filter(|node| node.id != id)
        .map(|node| {
            let mut next = node.clone();
            next.children = remove_node(&node.children, id);
            next
        })
        .collect()
}

/// Copy of the forest with `node` inserted under `parent_id` at `index`
/// (clamped to the sibling count). `parent_id = None` targets the root
/// sequence. Returns `None` when the parent cannot be found so callers can
/// abort instead of silently re-rooting the node.
pub(crate) fn add_node_to_parent(
    tree: &[BinderNode],
    node: BinderNode,
    parent_id: Option<&str>,
    index: usize,
) -> Option<Vec<BinderNode>> {
    let Some(pid) = parent_id else {
        let mut next = tree.to_vec();
        next.insert(index.min(tree.len()), node);
        return Some(next);
    };
    find_node(tree, pid)?;
    Some(insert_under(tree, &node, pid, index))
}

fn insert_under(tree: &[BinderNode], node: &BinderNode, pid: &str, index: usize) -> Vec<BinderNode> {
    tree.iter()
        .map(|current| {
            let mut next = current.clone();
            if current.id == pid {
                let at = index.min(next.children.len());
                next.children.insert(at, node.clone());
            } else {
                next.children = insert_under(&current.children, node, pid, index);
            }
            next
        })
        .collect()
}

/// The sibling list a parent id denotes: the root sequence for `None`, the
/// folder's children otherwise. `None` when the folder cannot be found.
pub(crate) fn siblings_of<'a>(
    tree: &'a [BinderNode],
    parent_id: Option<&str>,
) -> Option<&'a [BinderNode]> {
    match parent_id {
        None => Some(tree),
        Some(pid) => find_node(tree, pid).map(|n| n.children.as_slice()),
    }
}

/// Copy of the forest with one node's title replaced. `None` when the id is
/// not present.
pub(crate) fn set_node_title(tree: &[BinderNode], id: &str, title: &str) -> Option<Vec<BinderNode>> {
    find_node(tree, id)?;
    Some(retitle(tree, id, title))
}

fn retitle(tree: &[BinderNode], id: &str, title: &str) -> Vec<BinderNode> {
    tree.iter()
        .map(|current| {
            let mut next = current.clone();
            if current.id == id {
                next.title = title.to_string();
            } else {
                next.children = retitle(&current.children, id, title);
            }
            next
        })
        .collect()
}

/// Nodes in display order, parents before their children. Drives the flat
/// filtered rendering of the binder.
pub(crate) fn flatten_preorder(tree: &[BinderNode]) -> Vec<&BinderNode> {
    let mut out = Vec::new();
    push_preorder(tree, &mut out);
    out
}

fn push_preorder<'a>(tree: &'a [BinderNode], out: &mut Vec<&'a BinderNode>) {
    for node in tree {
        out.push(node);
        push_preorder(&node.children, out);
    }
}

/// Word count of a node including everything beneath it. Folders display
/// this rollup instead of their own (always zero) count.
pub(crate) fn subtree_word_count(node: &BinderNode) -> u64 {
    u64::from(node.word_count)
        + node
            .children
            .iter()
            .map(subtree_word_count)
            .sum::<u64>()
}

/// Every id in the forest, in display order.
pub(crate) fn collect_ids(tree: &[BinderNode]) -> Vec<String> {
    flatten_preorder(tree)
        .into_iter()
        .map(|node| node.id.clone())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::{doc, folder, sample_tree};
    use super::*;

    #[test]
    fn test_find_node_at_root() {
        let tree = sample_tree();
        let node = find_node(&tree, "c3").expect("root-level node should be found");
        assert_eq!(node.title, "Chapter 3");
    }

    #[test]
    fn test_find_node_nested() {
        let tree = sample_tree();
        let node = find_node(&tree, "c4").expect("nested node should be found");
        assert_eq!(node.title, "Chapter 4");
    }

    #[test]
    fn test_find_node_missing() {
        let tree = sample_tree();
        assert!(find_node(&tree, "ghost").is_none());
    }

    #[test]
    fn test_find_parent_of_root_node_is_explicit_root() {
        let tree = sample_tree();
        assert_eq!(find_parent_id(&tree, "c3"), Some(None));
    }

    #[test]
    fn test_find_parent_three_levels_deep() {
        // Act II > Part 1 > Chapter 4: the immediate parent wins.
        let tree = sample_tree();
        assert_eq!(
            find_parent_id(&tree, "c4"),
            Some(Some("part-1".to_string()))
        );
    }

    #[test]
    fn test_find_parent_missing_id_is_distinct_from_root() {
        let tree = sample_tree();
        assert_eq!(find_parent_id(&tree, "ghost"), None);
    }

    #[test]
    fn test_subtree_contains_self_and_descendants() {
        let tree = sample_tree();
        let act2 = find_node(&tree, "act-2").expect("fixture folder");
        assert!(subtree_contains(act2, "act-2"));
        assert!(subtree_contains(act2, "part-1"));
        assert!(subtree_contains(act2, "c4"));
    }

    #[test]
    fn test_subtree_contains_rejects_outsiders() {
        let tree = sample_tree();
        let act2 = find_node(&tree, "act-2").expect("fixture folder");
        assert!(!subtree_contains(act2, "c1"));
        assert!(!subtree_contains(act2, "act-1"));
    }

    #[test]
    fn test_remove_root_node_keeps_sibling_order() {
        let tree = sample_tree();
        let next = remove_node(&tree, "c3");
        let roots: Vec<&str> = next.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["act-1", "act-2"]);
    }

    #[test]
    fn test_remove_nested_node_takes_subtree_along() {
        let tree = sample_tree();
        let next = remove_node(&tree, "part-1");
        assert!(find_node(&next, "part-1").is_none());
        assert!(find_node(&next, "c4").is_none());
        // Siblings elsewhere untouched.
        assert!(find_node(&next, "c1").is_some());
    }

    #[test]
    fn test_remove_unknown_id_returns_equal_forest() {
        let tree = sample_tree();
        assert_eq!(remove_node(&tree, "ghost"), tree);
    }

    #[test]
    fn test_remove_leaves_input_untouched() {
        let tree = sample_tree();
        let _ = remove_node(&tree, "c1");
        assert!(find_node(&tree, "c1").is_some());
    }

    #[test]
    fn test_add_to_root_at_index() {
        let tree = sample_tree();
        let next = add_node_to_parent(&tree, doc("c5", "Chapter 5", 0), None, 1)
            .expect("root insert should succeed");
        let roots: Vec<&str> = next.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["act-1", "c5", "c3", "act-2"]);
    }

    #[test]
    fn test_add_into_nested_folder() {
        let tree = sample_tree();
        let next = add_node_to_parent(&tree, doc("c5", "Chapter 5", 0), Some("part-1"), 0)
            .expect("nested insert should succeed");
        let part1 = find_node(&next, "part-1").expect("folder survives");
        let kids: Vec<&str> = part1.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(kids, vec!["c5", "c4"]);
    }

    #[test]
    fn test_add_index_past_end_appends() {
        let tree = sample_tree();
        let next = add_node_to_parent(&tree, doc("c5", "Chapter 5", 0), Some("act-1"), 99)
            .expect("insert should clamp");
        let act1 = find_node(&next, "act-1").expect("folder survives");
        let kids: Vec<&str> = act1.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(kids, vec!["c1", "c2", "c5"]);
    }

    #[test]
    fn test_add_unresolvable_parent_returns_none() {
        let tree = sample_tree();
        assert!(add_node_to_parent(&tree, doc("c5", "Chapter 5", 0), Some("ghost"), 0).is_none());
    }

    #[test]
    fn test_remove_then_add_preserves_id_set() {
        let tree = sample_tree();
        let moved = find_node(&tree, "c1").expect("fixture node").clone();
        let without = remove_node(&tree, "c1");
        let next = add_node_to_parent(&without, moved, Some("act-2"), 0)
            .expect("reinsert should succeed");

        let mut before = collect_ids(&tree);
        let mut after = collect_ids(&next);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_set_node_title_nested() {
        let tree = sample_tree();
        let next = set_node_title(&tree, "c4", "Chapter 4: The Storm");
        let next = next.expect("rename should resolve");
        assert_eq!(
            find_node(&next, "c4").expect("node survives").title,
            "Chapter 4: The Storm"
        );
        // Untouched elsewhere.
        assert_eq!(find_node(&next, "c1").expect("node survives").title, "Chapter 1");
    }

    #[test]
    fn test_set_node_title_missing_returns_none() {
        let tree = sample_tree();
        assert!(set_node_title(&tree, "ghost", "x").is_none());
    }

    #[test]
    fn test_siblings_of_root_and_folder() {
        let tree = sample_tree();
        let roots = siblings_of(&tree, None).expect("root always resolves");
        assert_eq!(roots.len(), 3);
        let act1 = siblings_of(&tree, Some("act-1")).expect("folder resolves");
        assert_eq!(act1.len(), 2);
        assert!(siblings_of(&tree, Some("ghost")).is_none());
    }

    #[test]
    fn test_flatten_preorder_parents_before_children() {
        let tree = sample_tree();
        let flat: Vec<&str> = flatten_preorder(&tree).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(flat, vec!["act-1", "c1", "c2", "c3", "act-2", "part-1", "c4"]);
    }

    #[test]
    fn test_subtree_word_count_rolls_up() {
        let tree = sample_tree();
        let act1 = find_node(&tree, "act-1").expect("fixture folder");
        assert_eq!(subtree_word_count(act1), 2000);
        let act2 = find_node(&tree, "act-2").expect("fixture folder");
        assert_eq!(subtree_word_count(act2), 2000);
        let leaf = find_node(&tree, "c3").expect("fixture doc");
        assert_eq!(subtree_word_count(leaf), 450);
    }

    #[test]
    fn test_folder_helper_builds_folders() {
        let f = folder("f", "F", vec![]);
        assert!(f.is_folder);
        assert_eq!(f.children.len(), 0);
    }
}
