use bst_ipl::Tree;

use quickcheck_macros::quickcheck;

fn build(xs: &[i8]) -> Tree<i8> {
    xs.iter().copied().collect()
}

#[quickcheck]
fn traversal_is_non_decreasing(xs: Vec<i8>) -> bool {
    let tree = build(&xs);
    let keys: Vec<_> = tree.traverse().collect();

    keys.windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn traversal_is_the_sorted_input(xs: Vec<i8>) -> bool {
    let tree = build(&xs);
    let mut sorted = xs;
    sorted.sort_unstable();

    tree.traverse().copied().eq(sorted) && tree.len() == tree.traverse().count()
}

#[quickcheck]
fn traversal_restarts(xs: Vec<i8>) -> bool {
    let tree = build(&xs);

    tree.traverse().eq(tree.traverse()) && tree.traverse().eq(&tree)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = build(&xs);

    xs.iter().all(|x| tree.search(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = build(&xs);

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| !tree.search(x))
}

#[quickcheck]
fn duplicate_insert_adds_a_node(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = build(&xs);
    tree.insert(x);
    let before = tree.len();
    tree.insert(x);

    tree.len() == before + 1 && tree.traverse().filter(|k| **k == x).count() >= 2
}

#[quickcheck]
fn delete_then_search(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = build(&xs);
    let copies = xs.iter().filter(|k| **k == x).count();

    let deleted = tree.delete(&x);

    deleted == (copies > 0) && tree.search(&x) == (copies > 1)
}

#[quickcheck]
fn delete_removes_exactly_one(xs: Vec<i8>, i: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let victim = xs[i % xs.len()];
    let mut tree = build(&xs);

    let mut expected = xs.clone();
    expected.sort_unstable();
    let at = expected.iter().position(|k| *k == victim).unwrap();
    expected.remove(at);

    tree.delete(&victim) && tree.len() == xs.len() - 1 && tree.traverse().copied().eq(expected)
}

#[quickcheck]
fn delete_missing_is_noop(xs: Vec<i8>, x: i8) -> bool {
    if xs.contains(&x) {
        return true;
    }
    let mut tree = build(&xs);
    let before = tree.clone();

    !tree.delete(&x) && tree == before
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = build(&xs);
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // Each delete removes one copy.
        if let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }
    still_present.sort_unstable();

    tree.traverse().copied().eq(still_present.iter().copied())
        && still_present.iter().all(|x| tree.search(x))
}

#[quickcheck]
fn ipl_of_sorted_input_is_triangular(n: u8) -> bool {
    let n = usize::from(n);
    let tree: Tree<_> = (0..n).collect();

    tree.ipl() == n * n.saturating_sub(1) / 2
}

#[quickcheck]
fn ipl_does_not_mutate(xs: Vec<i8>) -> bool {
    let tree = build(&xs);
    let before = tree.clone();
    let first = tree.ipl();

    tree.ipl() == first && tree == before
}

#[test]
fn ipl_of_walk_through_tree() {
    let tree = build(&[10, 5, 15, 2, 7, 20]);

    assert_eq!(tree.ipl(), 8);
}
