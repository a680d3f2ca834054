use super::*;

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

/// Root at [1, 1] with children [2, 1], [3, 1], [4, 1]; each child has a
/// single leaf [2, 2].
fn three_level_tree() -> MoveTree {
    let mut tree = MoveTree::new(sq(1, 1));
    for i in 0..3 {
        tree.root_mut().add_child(sq(i + 2, 1)).add_child(sq(2, 2));
    }
    tree
}

#[test]
fn test_add_child_accepts_square_or_node() {
    let mut node = MoveTreeNode::new(sq(0, 0));
    node.add_child(sq(1, 2));
    node.add_child(MoveTreeNode::new(sq(2, 1)));
    node.add_child((3, 3));

    let locs: Vec<Square> = node.children().iter().map(|c| c.loc).collect();
    assert_eq!(locs, vec![sq(1, 2), sq(2, 1), sq(3, 3)]);
}

#[test]
fn test_remove_child_returns_removed_node() {
    let mut node = MoveTreeNode::new(sq(0, 0));
    node.add_child(sq(1, 2)).add_child(sq(2, 4));

    let removed = node.remove_child(sq(1, 2)).expect("child present");
    assert_eq!(removed, MoveTreeNode::new(sq(1, 2)));
    assert_eq!(removed.children().len(), 1);
    assert!(node.is_leaf());

    assert!(node.remove_child(sq(1, 2)).is_none());
}

#[test]
fn test_node_equality_ignores_children() {
    let mut a = MoveTreeNode::new(sq(3, 3));
    a.add_child(sq(4, 4));
    let b = MoveTreeNode::new(sq(3, 3));
    assert_eq!(a, b);
    assert_ne!(a, MoveTreeNode::new(sq(3, 4)));
}

#[test]
fn test_clone_is_independent() {
    let tree = three_level_tree();
    let mut copy = tree.clone();
    copy.root_mut().add_child(sq(1, 2));
    copy.trim_branch(sq(2, 1));

    assert_eq!(tree.root().children().len(), 3);
    assert_eq!(tree.node_count(), 7);
    assert_eq!(copy.root().children().len(), 3);
    assert_eq!(copy.node_count(), 6);
}

#[test]
fn test_iter_is_level_order() {
    let tree = three_level_tree();
    let locs: Vec<Square> = tree.iter().map(|n| n.loc).collect();
    assert_eq!(
        locs,
        vec![
            sq(1, 1),
            sq(2, 1),
            sq(3, 1),
            sq(4, 1),
            sq(2, 2),
            sq(2, 2),
            sq(2, 2),
        ]
    );
}

#[test]
fn test_to_list_skips_root() {
    let tree = three_level_tree();
    let list = tree.to_list();
    assert_eq!(list.len(), 6);
    assert!(!list.contains(&sq(1, 1)));
}

#[test]
fn test_trim_branch_single_node() {
    let mut tree = MoveTree::new(sq(1, 1));
    for i in 0..3 {
        tree.root_mut().add_child(sq(i + 2, 1));
    }
    tree.root_mut().add_child(sq(6, 6));

    assert_eq!(tree.trim_branch(sq(3, 1)), Some(sq(3, 1)));
    assert_eq!(tree.root().children().len(), 3);
}

#[test]
fn test_trim_branch_removes_descendants() {
    let mut tree = MoveTree::new(sq(0, 0));
    tree.root_mut().add_child(MoveTreeNode::ray(sq(1, 0), 7));
    tree.root_mut().add_child(MoveTreeNode::ray(sq(0, 1), 7));

    // Cutting the ray at its third square drops the last five.
    assert_eq!(tree.trim_branch(sq(3, 0)), Some(sq(3, 0)));
    assert_eq!(tree.to_list().len(), 2 + 7);
    assert!(!tree.to_list().contains(&sq(7, 0)));
}

#[test]
fn test_trim_branch_accepts_node() {
    let mut tree = three_level_tree();
    let target = MoveTreeNode::new(sq(4, 1));
    assert_eq!(tree.trim_branch(&target), Some(sq(4, 1)));
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn test_trim_branch_missing_returns_none() {
    let mut tree = three_level_tree();
    assert_eq!(tree.trim_branch(sq(7, 7)), None);
    assert_eq!(tree.node_count(), 7);
}

#[test]
fn test_ray_is_a_chain() {
    let ray = MoveTreeNode::ray(sq(-1, 1), 3);
    assert_eq!(ray.loc, sq(-1, 1));
    assert_eq!(ray.children().len(), 1);
    assert_eq!(ray.children()[0].loc, sq(-2, 2));
    assert_eq!(ray.children()[0].children()[0].loc, sq(-3, 3));
    assert!(ray.children()[0].children()[0].is_leaf());
}

#[test]
fn test_translate_and_prune() {
    let mut tree = MoveTree::new(sq(0, 0));
    tree.root_mut().add_child(MoveTreeNode::ray(sq(1, 1), 7));
    tree.root_mut().add_child(MoveTreeNode::ray(sq(-1, -1), 7));
    tree.translate(sq(5, 5));
    tree.prune(Square::in_bounds);

    assert_eq!(tree.root().loc, sq(5, 5));
    assert_eq!(
        tree.to_list(),
        vec![sq(6, 6), sq(4, 4), sq(7, 7), sq(3, 3), sq(2, 2), sq(1, 1), sq(0, 0)]
    );
}
