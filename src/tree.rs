//! Node arena and the structural primitives shared by both heap variants
//!
//! A heap is a single multiway tree in min-heap order. Every node carries three
//! structural references and nothing else: no rank, no size, no parent pointer.
//!
//! - `right`: next sibling in a circular list of siblings
//! - `left`: previous sibling, except on the leftmost child, where it points at
//!   the parent instead
//! - `rightmost`: the last child, or `None` for a leaf
//!
//! The leftmost child of a node is therefore `rightmost.right`, and a leftmost
//! child is the only way up the tree. The dual role of `left` is made explicit
//! with the [`Left`] tag instead of being inferred from pointer patterns.
//!
//! Nodes live in a [`SlotMap`], so a key that outlives its node is detected
//! rather than silently aliasing whatever node is allocated next.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::{smallvec, SmallVec};

use crate::stats::Stats;
use crate::traits::StructureError;

new_key_type! {
    /// Generation-checked reference to a node in a [`crate::Forest`]
    ///
    /// A `NodeKey` names a node, and a tree is named by the key of its root.
    pub struct NodeKey;
}

/// Contents of a node's `left` slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Left {
    /// Previous sibling (or the node itself when isolated)
    Sibling(NodeKey),
    /// The node is the leftmost child of this parent
    Parent(NodeKey),
    /// First element of an open sequence during delete-min
    Open,
}

#[derive(Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) item: T,
    pub(crate) priority: P,
    pub(crate) left: Left,
    pub(crate) right: Option<NodeKey>,
    pub(crate) rightmost: Option<NodeKey>,
}

/// Storage for the nodes of one or more trees
///
/// Only reachable through [`crate::Forest`]; restructuring strategies receive it
/// to perform their link surgery.
#[derive(Debug)]
pub struct NodeArena<T, P> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    stats: Stats,
}

impl<T, P> Default for NodeArena<T, P> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            stats: Stats::default(),
        }
    }
}

impl<T, P> NodeArena<T, P> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            stats: Stats::default(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn stats(&self) -> Stats {
        self.stats
    }

    pub(crate) fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Allocates an isolated node: `left == right == self`, no children.
    pub(crate) fn alloc(&mut self, priority: P, item: T) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            left: Left::Sibling(key),
            right: Some(key),
            rightmost: None,
        })
    }

    pub(crate) fn free(&mut self, key: NodeKey) -> Option<(P, T)> {
        self.nodes.remove(key).map(|node| (node.priority, node.item))
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T, P>> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<T, P>> {
        self.nodes.get_mut(key)
    }

    pub(crate) fn left(&self, key: NodeKey) -> Left {
        self.nodes[key].left
    }

    pub(crate) fn right(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].right
    }

    /// True for roots and for nodes not yet attached anywhere.
    pub(crate) fn is_isolated(&self, key: NodeKey) -> bool {
        let node = &self.nodes[key];
        node.left == Left::Sibling(key) && node.right == Some(key)
    }

    pub(crate) fn make_singleton(&mut self, key: NodeKey) {
        let node = &mut self.nodes[key];
        node.left = Left::Sibling(key);
        node.right = Some(key);
    }

    /// Attaches `child` as the new rightmost child of `parent` and returns `parent`.
    ///
    /// The child's own subtree travels with it. Heap order is the caller's
    /// business.
    pub(crate) fn link(&mut self, parent: NodeKey, child: NodeKey) -> NodeKey {
        self.stats.links += 1;
        match self.nodes[parent].rightmost {
            None => {
                let c = &mut self.nodes[child];
                c.left = Left::Parent(parent);
                c.right = Some(child);
            }
            Some(rm) => {
                let first = self.nodes[rm].right;
                let c = &mut self.nodes[child];
                c.right = first;
                c.left = Left::Sibling(rm);
                self.nodes[rm].right = Some(child);
            }
        }
        self.nodes[parent].rightmost = Some(child);
        parent
    }

    /// Attaches `child` as the new leftmost child of `parent` and returns `parent`.
    ///
    /// `rightmost` is untouched unless `parent` was a leaf.
    pub(crate) fn link_leftmost(&mut self, parent: NodeKey, child: NodeKey) -> NodeKey {
        let Some(rm) = self.nodes[parent].rightmost else {
            return self.link(parent, child);
        };
        self.stats.links += 1;
        let first = self.nodes[rm].right;
        let c = &mut self.nodes[child];
        c.left = Left::Parent(parent);
        c.right = first;
        if let Some(first) = first {
            self.nodes[first].left = Left::Sibling(child);
        }
        self.nodes[rm].right = Some(child);
        parent
    }

    /// Compares two priorities, counting the comparison.
    pub(crate) fn less(&mut self, a: NodeKey, b: NodeKey) -> bool
    where
        P: Ord,
    {
        self.stats.comparisons += 1;
        self.nodes[a].priority < self.nodes[b].priority
    }

    /// Detaches `node` from its sibling list, leaving its subtree in place,
    /// and resets it to isolated shape.
    pub(crate) fn cut(&mut self, node: NodeKey) {
        let (left, right) = {
            let n = &self.nodes[node];
            (n.left, n.right)
        };
        match (left, right) {
            // only child
            (Left::Parent(parent), Some(right)) if right == node => {
                self.nodes[parent].rightmost = None;
            }
            // leftmost of several: the next sibling takes over the back-reference
            (Left::Parent(parent), Some(right)) => {
                if let Some(rm) = self.nodes[parent].rightmost {
                    self.nodes[rm].right = Some(right);
                }
                self.nodes[right].left = Left::Parent(parent);
            }
            (Left::Sibling(left), Some(right)) if left != node => {
                self.nodes[left].right = Some(right);
                match self.nodes[right].left {
                    // `right` is the leftmost child, so `node` was the rightmost
                    Left::Parent(parent) => self.nodes[parent].rightmost = Some(left),
                    _ => self.nodes[right].left = Left::Sibling(left),
                }
            }
            _ => {}
        }
        self.make_singleton(node);
    }

    /// Removes all children of `root` and returns the leftmost one as the head
    /// of an open sequence (`left == Open` on the head, `right == None` on the tail).
    pub(crate) fn open_children(&mut self, root: NodeKey) -> Option<NodeKey> {
        let rm = self.nodes[root].rightmost.take()?;
        let first = self.nodes[rm].right.take()?;
        self.nodes[first].left = Left::Open;
        Some(first)
    }

    /// Places `node` between `left` and `right` in an open sequence.
    pub(crate) fn splice(&mut self, node: NodeKey, left: Left, right: Option<NodeKey>) {
        let n = &mut self.nodes[node];
        n.left = left;
        n.right = right;
        if let Left::Sibling(l) = left {
            self.nodes[l].right = Some(node);
        }
        if let Some(r) = right {
            self.nodes[r].left = Left::Sibling(node);
        }
    }

    /// Replaces two neighbours `a`, `b` of an open sequence by `join(a, b)`.
    pub(crate) fn join_adjacent<F>(&mut self, a: NodeKey, b: NodeKey, join: F) -> NodeKey
    where
        F: FnOnce(&mut Self, NodeKey, NodeKey) -> NodeKey,
    {
        let outer_left = self.nodes[a].left;
        let outer_right = self.nodes[b].right;
        let joined = join(self, a, b);
        self.splice(joined, outer_left, outer_right);
        joined
    }

    /// Moves every node of `other` into this arena and returns the key mapping.
    pub(crate) fn absorb(&mut self, mut other: NodeArena<T, P>) -> SecondaryMap<NodeKey, NodeKey> {
        let mut remap = SecondaryMap::with_capacity(other.nodes.len());
        let mut moved = Vec::with_capacity(other.nodes.len());
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }
        for key in moved {
            let node = &mut self.nodes[key];
            node.left = match node.left {
                Left::Sibling(k) => Left::Sibling(remap[k]),
                Left::Parent(k) => Left::Parent(remap[k]),
                Left::Open => Left::Open,
            };
            node.right = node.right.map(|k| remap[k]);
            node.rightmost = node.rightmost.map(|k| remap[k]);
        }
        remap
    }

    pub(crate) fn preorder(&self, root: Option<NodeKey>) -> Preorder<'_, T, P> {
        Preorder {
            arena: self,
            stack: root.into_iter().collect(),
        }
    }

    /// Checks every structural invariant of the tree rooted at `root` and
    /// returns its node count.
    pub(crate) fn validate(&self, root: NodeKey) -> Result<usize, StructureError>
    where
        P: Ord,
    {
        let node = |key: NodeKey| self.nodes.get(key).ok_or(StructureError::Dangling(key));

        let r = node(root)?;
        if r.left != Left::Sibling(root) || r.right != Some(root) {
            return Err(StructureError::RootShape(root));
        }

        let limit = self.nodes.len();
        let mut count = 0;
        let mut stack: SmallVec<[NodeKey; 32]> = smallvec![root];
        while let Some(parent) = stack.pop() {
            count += 1;
            if count > limit {
                return Err(StructureError::Cycle);
            }
            let p = node(parent)?;
            let Some(rm) = p.rightmost else {
                continue;
            };
            let first = node(rm)?.right.ok_or(StructureError::SiblingRing(rm))?;
            if node(first)?.left != Left::Parent(parent) {
                return Err(StructureError::BackReference(first));
            }

            let mut prev: Option<NodeKey> = None;
            let mut child = first;
            let mut steps = 0;
            loop {
                let c = node(child)?;
                if c.priority < p.priority {
                    return Err(StructureError::HeapOrder { parent, child });
                }
                if let Some(prev) = prev {
                    if c.left != Left::Sibling(prev) {
                        return Err(StructureError::SiblingRing(child));
                    }
                }
                steps += 1;
                if steps > limit {
                    return Err(StructureError::Cycle);
                }
                stack.push(child);
                let next = c.right.ok_or(StructureError::SiblingRing(child))?;
                if child == rm {
                    if next != first {
                        return Err(StructureError::SiblingRing(rm));
                    }
                    break;
                }
                if next == first {
                    return Err(StructureError::SiblingRing(child));
                }
                prev = Some(child);
                child = next;
            }
        }
        Ok(count)
    }
}

/// Preorder walk over the priorities of a tree: root, then each child subtree
/// from left to right.
///
/// Created by [`crate::Forest::preorder`]. A diagnostic view only; the order is
/// a property of the current shape, which every operation changes.
pub struct Preorder<'a, T, P> {
    arena: &'a NodeArena<T, P>,
    stack: SmallVec<[NodeKey; 32]>,
}

impl<'a, T, P> Iterator for Preorder<'a, T, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        let key = self.stack.pop()?;
        let node = self.arena.nodes.get(key)?;
        // push right to left so the leftmost child is visited first
        if let Some(rm) = node.rightmost {
            let mut child = rm;
            loop {
                self.stack.push(child);
                match self.arena.nodes.get(child).map(|c| c.left) {
                    Some(Left::Sibling(prev)) if prev != child => child = prev,
                    _ => break,
                }
            }
        }
        Some(&node.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with(priorities: &[i32]) -> (NodeArena<(), i32>, Vec<NodeKey>) {
        let mut arena = NodeArena::default();
        let keys = priorities.iter().map(|&p| arena.alloc(p, ())).collect();
        (arena, keys)
    }

    fn keys_of(arena: &NodeArena<(), i32>, root: NodeKey) -> Vec<i32> {
        arena.preorder(Some(root)).copied().collect()
    }

    #[test]
    fn test_alloc_is_isolated() {
        let (arena, keys) = arena_with(&[7]);
        assert!(arena.is_isolated(keys[0]));
        assert_eq!(arena.get(keys[0]).unwrap().rightmost, None);
        assert_eq!(arena.validate(keys[0]), Ok(1));
    }

    #[test]
    fn test_link_appends_rightmost() {
        let (mut arena, k) = arena_with(&[1, 2, 3, 4]);
        arena.link(k[0], k[1]);
        arena.link(k[0], k[2]);
        arena.link(k[0], k[3]);
        assert_eq!(keys_of(&arena, k[0]), vec![1, 2, 3, 4]);
        assert_eq!(arena.get(k[0]).unwrap().rightmost, Some(k[3]));
        assert_eq!(arena.left(k[1]), Left::Parent(k[0]));
        assert_eq!(arena.right(k[3]), Some(k[1]));
        assert_eq!(arena.validate(k[0]), Ok(4));
        assert_eq!(arena.stats().links, 3);
    }

    #[test]
    fn test_link_leftmost_prepends() {
        let (mut arena, k) = arena_with(&[1, 2, 3, 4]);
        arena.link_leftmost(k[0], k[1]);
        arena.link_leftmost(k[0], k[2]);
        arena.link_leftmost(k[0], k[3]);
        assert_eq!(keys_of(&arena, k[0]), vec![1, 4, 3, 2]);
        assert_eq!(arena.get(k[0]).unwrap().rightmost, Some(k[1]));
        assert_eq!(arena.validate(k[0]), Ok(4));
    }

    #[test]
    fn test_link_carries_subtree() {
        let (mut arena, k) = arena_with(&[1, 5, 6, 7]);
        arena.link(k[1], k[2]);
        arena.link(k[1], k[3]);
        arena.link(k[0], k[1]);
        assert_eq!(keys_of(&arena, k[0]), vec![1, 5, 6, 7]);
        assert_eq!(arena.validate(k[0]), Ok(4));
    }

    fn family() -> (NodeArena<(), i32>, Vec<NodeKey>) {
        let (mut arena, k) = arena_with(&[0, 1, 2, 3, 4]);
        for &child in &k[1..] {
            arena.link(k[0], child);
        }
        (arena, k)
    }

    #[test]
    fn test_cut_only_child() {
        let (mut arena, k) = arena_with(&[0, 1, 2]);
        arena.link(k[0], k[1]);
        arena.link(k[1], k[2]);
        arena.cut(k[1]);
        assert_eq!(arena.get(k[0]).unwrap().rightmost, None);
        assert!(arena.is_isolated(k[1]));
        assert_eq!(keys_of(&arena, k[1]), vec![1, 2]);
        assert_eq!(arena.validate(k[0]), Ok(1));
        assert_eq!(arena.validate(k[1]), Ok(2));
    }

    #[test]
    fn test_cut_rightmost() {
        let (mut arena, k) = family();
        arena.cut(k[4]);
        assert_eq!(arena.get(k[0]).unwrap().rightmost, Some(k[3]));
        assert_eq!(keys_of(&arena, k[0]), vec![0, 1, 2, 3]);
        assert_eq!(arena.validate(k[0]), Ok(4));
    }

    #[test]
    fn test_cut_leftmost() {
        let (mut arena, k) = family();
        arena.cut(k[1]);
        assert_eq!(arena.left(k[2]), Left::Parent(k[0]));
        assert_eq!(keys_of(&arena, k[0]), vec![0, 2, 3, 4]);
        assert_eq!(arena.validate(k[0]), Ok(4));
    }

    #[test]
    fn test_cut_interior() {
        let (mut arena, k) = family();
        arena.cut(k[2]);
        assert_eq!(arena.left(k[3]), Left::Sibling(k[1]));
        assert_eq!(keys_of(&arena, k[0]), vec![0, 1, 3, 4]);
        assert_eq!(arena.validate(k[0]), Ok(4));
    }

    #[test]
    fn test_open_children() {
        let (mut arena, k) = family();
        let first = arena.open_children(k[0]);
        assert_eq!(first, Some(k[1]));
        assert_eq!(arena.left(k[1]), Left::Open);
        assert_eq!(arena.right(k[4]), None);
        assert_eq!(arena.get(k[0]).unwrap().rightmost, None);
    }

    #[test]
    fn test_join_adjacent_resplices() {
        let (mut arena, k) = family();
        arena.open_children(k[0]);
        let joined = arena.join_adjacent(k[2], k[3], |arena, a, b| arena.link(a, b));
        assert_eq!(joined, k[2]);
        assert_eq!(arena.right(k[1]), Some(k[2]));
        assert_eq!(arena.left(k[2]), Left::Sibling(k[1]));
        assert_eq!(arena.right(k[2]), Some(k[4]));
        assert_eq!(arena.left(k[4]), Left::Sibling(k[2]));
    }

    #[test]
    fn test_validate_detects_heap_order() {
        let (mut arena, k) = arena_with(&[5, 1]);
        arena.link(k[0], k[1]);
        assert_eq!(
            arena.validate(k[0]),
            Err(StructureError::HeapOrder {
                parent: k[0],
                child: k[1]
            })
        );
    }

    #[test]
    fn test_validate_detects_broken_back_reference() {
        let (mut arena, k) = family();
        arena.get_mut(k[1]).unwrap().left = Left::Sibling(k[4]);
        assert_eq!(
            arena.validate(k[0]),
            Err(StructureError::BackReference(k[1]))
        );
    }

    #[test]
    fn test_validate_rejects_non_root() {
        let (arena, k) = family();
        assert_eq!(arena.validate(k[2]), Err(StructureError::RootShape(k[2])));
    }

    #[test]
    fn test_absorb_remaps_links() {
        let (mut a, ka) = arena_with(&[1]);
        let (mut b, kb) = arena_with(&[2, 3]);
        b.link(kb[0], kb[1]);
        let remap = a.absorb(b);
        let root = remap[kb[0]];
        assert_eq!(a.len(), 3);
        assert_eq!(keys_of(&a, root), vec![2, 3]);
        assert_eq!(a.validate(root), Ok(2));
        assert_eq!(a.validate(ka[0]), Ok(1));
    }
}
