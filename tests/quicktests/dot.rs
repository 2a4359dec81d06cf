use bst_ipl::{dot, Tree};

use quickcheck_macros::quickcheck;

#[quickcheck]
fn every_node_shows_two_edges(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let dot = dot::to_dot(&tree);
    // n nodes have n + 1 empty links, and an empty tree draws none.
    let sentinels = if xs.is_empty() { 0 } else { xs.len() + 1 };

    dot.matches(" -> ").count() == 2 * xs.len()
        && dot.matches("[shape=point]").count() == sentinels
        && dot.starts_with("digraph BST {\n")
        && dot.ends_with("}\n")
}

#[test]
fn export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("walk_through.dot");
    let tree: Tree<_> = [10, 5, 15, 2, 7, 20].into_iter().collect();

    tree.save_dot(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, dot::to_dot(&tree));
    assert!(written.contains("n0 [label=\"10\"];"));
}

#[test]
fn empty_tree_draws_no_sentinels() {
    let dot = dot::to_dot(&Tree::<i8>::new());

    assert_eq!(dot.matches("[shape=point]").count(), 0);
    assert_eq!(dot.matches(" -> ").count(), 0);
}

#[test]
fn export_to_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let tree: Tree<i32> = Tree::new();

    let err = tree.save_dot(dir.path()).unwrap_err();

    assert!(matches!(err, bst_ipl::ExportError::Persist { .. }));
    assert!(dir.path().is_dir());
}
