//! Tree-shaped move templates.
//!
//! A node's children are the squares reachable *if that node's square is
//! empty*. Sliding pieces encode each ray as a chain; fixed-step pieces hang
//! every destination directly off the root.

use std::collections::VecDeque;

use crate::types::Square;

/// One square of a move template plus the squares it unlocks.
///
/// Equality compares `loc` only, never the children.
#[derive(Clone, Debug)]
pub struct MoveTreeNode {
    pub loc: Square,
    children: Vec<MoveTreeNode>,
}

impl PartialEq for MoveTreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.loc == other.loc
    }
}

impl Eq for MoveTreeNode {}

impl From<Square> for MoveTreeNode {
    fn from(loc: Square) -> Self {
        MoveTreeNode::new(loc)
    }
}

impl From<(i8, i8)> for MoveTreeNode {
    fn from(loc: (i8, i8)) -> Self {
        MoveTreeNode::new(loc.into())
    }
}

impl From<&MoveTreeNode> for Square {
    fn from(node: &MoveTreeNode) -> Square {
        node.loc
    }
}

impl MoveTreeNode {
    pub fn new(loc: Square) -> Self {
        Self {
            loc,
            children: Vec::new(),
        }
    }

    /// Appends a child and returns a handle to it so chains can be built.
    pub fn add_child(&mut self, child: impl Into<MoveTreeNode>) -> &mut MoveTreeNode {
        self.children.push(child.into());
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Removes the first direct child at `loc`, returning it with its subtree.
    pub fn remove_child(&mut self, loc: impl Into<Square>) -> Option<MoveTreeNode> {
        let loc = loc.into();
        let idx = self.children.iter().position(|c| c.loc == loc)?;
        Some(self.children.remove(idx))
    }

    pub fn children(&self) -> &[MoveTreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Builds a ray of `len` nodes stepping by `step`, each the only child
    /// of the previous one.
    pub fn ray(step: Square, len: i8) -> MoveTreeNode {
        let mut head = MoveTreeNode::new(Square::new(step.row * len, step.col * len));
        for k in (1..len).rev() {
            let mut node = MoveTreeNode::new(Square::new(step.row * k, step.col * k));
            node.children.push(head);
            head = node;
        }
        head
    }

    fn retain_recursive(&mut self, keep: &impl Fn(Square) -> bool) {
        self.children.retain(|c| keep(c.loc));
        for child in &mut self.children {
            child.retain_recursive(keep);
        }
    }
}

/// A move template rooted at the piece's own square.
///
/// `Clone` is a deep copy: nodes own their children, so a clone shares no
/// structure with its source and can be pruned freely.
#[derive(Clone, Debug)]
pub struct MoveTree {
    root: MoveTreeNode,
}

impl MoveTree {
    pub fn new(root: Square) -> Self {
        Self {
            root: MoveTreeNode::new(root),
        }
    }

    pub fn root(&self) -> &MoveTreeNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut MoveTreeNode {
        &mut self.root
    }

    /// Level-order iterator, root first.
    pub fn iter(&self) -> LevelOrder<'_> {
        LevelOrder {
            queue: VecDeque::from([&self.root]),
        }
    }

    /// Visits every node mutably in level order, root first.
    pub fn each_mut(&mut self, mut f: impl FnMut(&mut MoveTreeNode)) {
        let mut queue: VecDeque<&mut MoveTreeNode> = VecDeque::from([&mut self.root]);
        while let Some(node) = queue.pop_front() {
            f(node);
            queue.extend(node.children.iter_mut());
        }
    }

    /// Every non-root square in level order. The root ("stay put") is never
    /// a move.
    pub fn to_list(&self) -> Vec<Square> {
        self.iter().skip(1).map(|node| node.loc).collect()
    }

    /// Removes the first node (level order) at `target` together with all of
    /// its descendants. Returns the removed square, or `None` if absent.
    pub fn trim_branch(&mut self, target: impl Into<Square>) -> Option<Square> {
        let target = target.into();
        let mut queue: VecDeque<&mut MoveTreeNode> = VecDeque::from([&mut self.root]);
        while let Some(node) = queue.pop_front() {
            if let Some(removed) = node.remove_child(target) {
                return Some(removed.loc);
            }
            queue.extend(node.children.iter_mut());
        }
        None
    }

    /// Cuts every branch whose node fails `keep`. Everything below a cut node
    /// goes with it, so a ray stops at its first rejected square.
    pub fn prune(&mut self, keep: impl Fn(Square) -> bool) {
        self.root.retain_recursive(&keep);
    }

    /// Rewrites relative offsets into absolute squares around `origin`.
    pub fn translate(&mut self, origin: Square) {
        self.each_mut(|node| node.loc = node.loc.offset_from(origin));
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

pub struct LevelOrder<'a> {
    queue: VecDeque<&'a MoveTreeNode>,
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = &'a MoveTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a MoveTree {
    type Item = &'a MoveTreeNode;
    type IntoIter = LevelOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "move_tree_tests.rs"]
mod move_tree_tests;
