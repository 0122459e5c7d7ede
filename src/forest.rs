//! Linear-handle heap API
//!
//! A [`Forest`] owns the storage for any number of heaps. There is no heap
//! object as such: a heap is named by the [`NodeKey`] of its root, and the
//! empty heap is `None`. Every mutating operation takes the current heap
//! handle and returns the new one; the old handle must not be used again,
//! because the old root may have moved below another node or been freed.
//!
//! | Operation        | Time                      |
//! |------------------|---------------------------|
//! | `insert`         | O(1) worst-case           |
//! | `merge`          | O(1) worst-case           |
//! | `find_min`       | O(1) worst-case           |
//! | `decrease_key`   | O(log n) amortized        |
//! | `delete_min`     | O(log n) amortized        |
//! | `delete`         | O(log n) amortized        |
//!
//! Membership is not checked: passing a node that lives in a different tree of
//! the same forest than the heap handle corrupts both trees. Stale keys (nodes
//! already removed) are detected and rejected.
//!
//! # Example
//!
//! ```rust
//! use self_adjusting_heaps::smooth::SmoothForest;
//!
//! let mut forest: SmoothForest<(), i32> = SmoothForest::new();
//! let mut heap = None;
//! for key in [10, 20, 5] {
//!     heap = Some(forest.insert(key, (), heap).unwrap());
//! }
//! let node = forest.make_node(25, ());
//! heap = Some(forest.insert_node(node, heap).unwrap());
//!
//! heap = Some(forest.decrease_key(node, heap, 1).unwrap());
//! assert_eq!(forest.find_min(heap), Some((&1, &())));
//!
//! let extracted = forest.delete_min(heap).unwrap();
//! assert_eq!(extracted.priority, 1);
//! assert_eq!(forest.find_min(extracted.root), Some((&5, &())));
//! ```

use std::marker::PhantomData;

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::restructure::Restructure;
use crate::stats::Stats;
use crate::traits::{HeapError, StructureError};
use crate::tree::{NodeArena, NodeKey, Preorder};

/// Result of removing a node from a heap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T, P> {
    /// The new heap handle (`None` if the heap became empty)
    pub root: Option<NodeKey>,
    /// Priority of the removed node
    pub priority: P,
    /// Item of the removed node
    pub item: T,
}

/// Storage and operations for self-adjusting heaps sharing one node arena
///
/// `S` selects the restructuring strategy: [`crate::slim::Slim`] or
/// [`crate::smooth::Smooth`].
#[derive(Debug)]
pub struct Forest<T, P, S> {
    arena: NodeArena<T, P>,
    _strategy: PhantomData<S>,
}

impl<T, P: Ord, S: Restructure> Default for Forest<T, P, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord, S: Restructure> Forest<T, P, S> {
    /// Creates an empty forest
    pub fn new() -> Self {
        Self {
            arena: NodeArena::default(),
            _strategy: PhantomData,
        }
    }

    /// Creates an empty forest with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            _strategy: PhantomData,
        }
    }

    /// Number of live nodes across all heaps in this forest
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the forest holds no nodes
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Returns true if `node` has not been removed
    pub fn contains(&self, node: NodeKey) -> bool {
        self.arena.get(node).is_some()
    }

    /// Current priority of `node`
    pub fn priority(&self, node: NodeKey) -> Option<&P> {
        self.arena.get(node).map(|n| &n.priority)
    }

    /// Item stored in `node`
    pub fn item(&self, node: NodeKey) -> Option<&T> {
        self.arena.get(node).map(|n| &n.item)
    }

    /// Mutable access to the item stored in `node`
    pub fn item_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        self.arena.get_mut(node).map(|n| &mut n.item)
    }

    /// Comparison and link counts accumulated so far
    pub fn stats(&self) -> Stats {
        self.arena.stats()
    }

    /// Zeroes the comparison and link counts
    pub fn reset_stats(&mut self) {
        self.arena.reset_stats();
    }

    /// Creates a detached single-node heap.
    ///
    /// Use this together with [`insert_node`](Self::insert_node) when the node
    /// key is needed later for `decrease_key` or `delete`.
    pub fn make_node(&mut self, priority: P, item: T) -> NodeKey {
        self.arena.alloc(priority, item)
    }

    /// Inserts a new node into `heap` and returns the new heap handle.
    pub fn insert(
        &mut self,
        priority: P,
        item: T,
        heap: Option<NodeKey>,
    ) -> Result<NodeKey, HeapError> {
        if let Some(root) = heap {
            self.check_root(root)?;
        }
        let node = self.arena.alloc(priority, item);
        Ok(self.attach(node, heap))
    }

    /// Inserts a detached node created by [`make_node`](Self::make_node).
    pub fn insert_node(
        &mut self,
        node: NodeKey,
        heap: Option<NodeKey>,
    ) -> Result<NodeKey, HeapError> {
        if self.arena.get(node).is_none() {
            return Err(HeapError::InvalidHandle);
        }
        if !self.arena.is_isolated(node) {
            return Err(HeapError::NodeAttached);
        }
        if let Some(root) = heap {
            self.check_root(root)?;
            if root == node {
                return Ok(root);
            }
        }
        Ok(self.attach(node, heap))
    }

    /// Melds two heaps and returns the handle of the result.
    ///
    /// Merging a heap with itself returns it unchanged. When both roots have
    /// the same priority the root of `h2` becomes the root of the result.
    pub fn merge(
        &mut self,
        h1: Option<NodeKey>,
        h2: Option<NodeKey>,
    ) -> Result<Option<NodeKey>, HeapError> {
        for root in h1.into_iter().chain(h2) {
            self.check_root(root)?;
        }
        Ok(self.meld_roots(h1, h2))
    }

    /// Returns the minimum of `heap` without removing it
    pub fn find_min(&self, heap: Option<NodeKey>) -> Option<(&P, &T)> {
        heap.and_then(|root| self.arena.get(root))
            .map(|n| (&n.priority, &n.item))
    }

    /// Lowers the priority of `node` (a member of `heap`) to `priority`.
    ///
    /// A node that is not the root is cut from its siblings, keeping its
    /// subtree, and melded with the root. An equal priority is accepted.
    ///
    /// # Errors
    /// `EmptyHeap` if `heap` is `None`, `InvalidHandle` for removed nodes,
    /// `PriorityIncreased` if `priority` is above the current one.
    pub fn decrease_key(
        &mut self,
        node: NodeKey,
        heap: Option<NodeKey>,
        priority: P,
    ) -> Result<NodeKey, HeapError> {
        let root = heap.ok_or(HeapError::EmptyHeap)?;
        self.check_root(root)?;
        let n = self.arena.get_mut(node).ok_or(HeapError::InvalidHandle)?;
        if priority > n.priority {
            return Err(HeapError::PriorityIncreased);
        }
        n.priority = priority;
        if node == root {
            return Ok(root);
        }
        self.arena.cut(node);
        Ok(S::meld(&mut self.arena, root, node))
    }

    /// Removes the root of `heap` and restructures its children into a new tree.
    ///
    /// This is the only operation that frees a node.
    pub fn delete_min(&mut self, heap: Option<NodeKey>) -> Result<Extracted<T, P>, HeapError> {
        let root = heap.ok_or(HeapError::EmptyHeap)?;
        self.check_root(root)?;

        let before = self.arena.stats();
        let new_root = self
            .arena
            .open_children(root)
            .map(|first| S::combine(&mut self.arena, first));
        let (priority, item) = self.arena.free(root).ok_or(HeapError::InvalidHandle)?;

        let spent = self.arena.stats() - before;
        trace!(
            strategy = S::NAME,
            comparisons = spent.comparisons,
            links = spent.links,
            "delete_min restructured"
        );

        Ok(Extracted {
            root: new_root,
            priority,
            item,
        })
    }

    /// Removes `node` from `heap`.
    ///
    /// Equivalent to decreasing the priority of `node` below every other and
    /// then deleting the minimum, without reserving any priority value for it.
    pub fn delete(
        &mut self,
        node: NodeKey,
        heap: Option<NodeKey>,
    ) -> Result<Extracted<T, P>, HeapError> {
        let root = heap.ok_or(HeapError::EmptyHeap)?;
        self.check_root(root)?;
        if self.arena.get(node).is_none() {
            return Err(HeapError::InvalidHandle);
        }
        if node != root {
            self.arena.cut(node);
            S::hoist(&mut self.arena, root, node);
        }
        self.delete_min(Some(node))
    }

    /// Priorities of `heap` in preorder: root, then each child subtree left to right
    pub fn preorder(&self, heap: Option<NodeKey>) -> Preorder<'_, T, P> {
        self.arena.preorder(heap)
    }

    /// Checks heap order and every link invariant of `heap`, returning its size.
    pub fn validate(&self, heap: Option<NodeKey>) -> Result<usize, StructureError> {
        match heap {
            None => Ok(0),
            Some(root) => self.arena.validate(root),
        }
    }

    /// Moves every node of `other` into this forest.
    ///
    /// Returns the mapping from keys issued by `other` to their new keys here.
    /// Costs O(m) for m moved nodes.
    pub fn absorb(&mut self, other: Forest<T, P, S>) -> SecondaryMap<NodeKey, NodeKey> {
        let moved = other.len();
        let remap = self.arena.absorb(other.arena);
        debug!(strategy = S::NAME, moved, total = self.len(), "absorbed forest");
        remap
    }

    /// Attaches an isolated node to a heap: below the root if its priority is
    /// not smaller, otherwise as the new root above it.
    pub(crate) fn attach(&mut self, node: NodeKey, heap: Option<NodeKey>) -> NodeKey {
        match heap {
            None => node,
            Some(root) => {
                if self.arena.less(node, root) {
                    self.arena.link(node, root)
                } else {
                    self.arena.link(root, node)
                }
            }
        }
    }

    pub(crate) fn meld_roots(
        &mut self,
        h1: Option<NodeKey>,
        h2: Option<NodeKey>,
    ) -> Option<NodeKey> {
        match (h1, h2) {
            (None, h) | (h, None) => h,
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), Some(b)) => Some(S::meld(&mut self.arena, a, b)),
        }
    }

    fn check_root(&self, root: NodeKey) -> Result<(), HeapError> {
        if self.arena.get(root).is_none() {
            return Err(HeapError::InvalidHandle);
        }
        if !self.arena.is_isolated(root) {
            return Err(HeapError::NotARoot);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::Slim;
    use crate::smooth::Smooth;

    fn build<S: Restructure>(forest: &mut Forest<(), i32, S>, keys: &[i32]) -> Option<NodeKey> {
        let mut heap = None;
        for &key in keys {
            heap = Some(forest.insert(key, (), heap).unwrap());
        }
        heap
    }

    fn drain<S: Restructure>(
        forest: &mut Forest<(), i32, S>,
        mut heap: Option<NodeKey>,
    ) -> Vec<i32> {
        let mut out = Vec::new();
        while heap.is_some() {
            forest.validate(heap).unwrap();
            let extracted = forest.delete_min(heap).unwrap();
            out.push(extracted.priority);
            heap = extracted.root;
        }
        out
    }

    fn check_merge_identity<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let heap = build(&mut forest, &[3, 1, 2]);
        assert_eq!(forest.merge(heap, None), Ok(heap));
        assert_eq!(forest.merge(None, heap), Ok(heap));
        assert_eq!(forest.merge(heap, heap), Ok(heap));
        assert_eq!(forest.merge(None, None), Ok(None));
        assert_eq!(forest.validate(heap), Ok(3));
    }

    #[test]
    fn test_merge_identity() {
        check_merge_identity::<Slim>();
        check_merge_identity::<Smooth>();
    }

    fn check_merge_tie<S: Restructure>() {
        let mut forest: Forest<&str, i32, S> = Forest::new();
        let a = forest.make_node(4, "a");
        let b = forest.make_node(4, "b");
        let root = forest.merge(Some(a), Some(b)).unwrap();
        assert_eq!(root, Some(b));
        assert_eq!(forest.find_min(root), Some((&4, &"b")));
    }

    #[test]
    fn test_merge_tie_favours_second() {
        check_merge_tie::<Slim>();
        check_merge_tie::<Smooth>();
    }

    fn check_insert_smaller_becomes_root<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let heap = build(&mut forest, &[10, 20, 5]);
        assert_eq!(forest.find_min(heap), Some((&5, &())));
        assert_eq!(forest.preorder(heap).copied().collect::<Vec<_>>(), vec![5, 10, 20]);
        assert_eq!(forest.validate(heap), Ok(3));
    }

    #[test]
    fn test_insert_smaller_becomes_root() {
        check_insert_smaller_becomes_root::<Slim>();
        check_insert_smaller_becomes_root::<Smooth>();
    }

    fn check_decrease_key_on_root<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let heap = build(&mut forest, &[5, 7, 9]);
        let before: Vec<i32> = forest.preorder(heap).copied().collect();
        let root = heap.unwrap();
        let after_root = forest.decrease_key(root, heap, 2).unwrap();
        assert_eq!(after_root, root);
        let after: Vec<i32> = forest.preorder(Some(after_root)).copied().collect();
        assert_eq!(after[0], 2);
        assert_eq!(&after[1..], &before[1..]);
    }

    #[test]
    fn test_decrease_key_on_root_keeps_shape() {
        check_decrease_key_on_root::<Slim>();
        check_decrease_key_on_root::<Smooth>();
    }

    fn check_decrease_key_errors<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let heap = build(&mut forest, &[5]);
        let node = forest.make_node(8, ());
        let heap = Some(forest.insert_node(node, heap).unwrap());

        assert_eq!(forest.decrease_key(node, heap, 9), Err(HeapError::PriorityIncreased));
        assert_eq!(forest.decrease_key(node, None, 1), Err(HeapError::EmptyHeap));
        assert_eq!(forest.decrease_key(node, Some(node), 1), Err(HeapError::NotARoot));
        assert_eq!(forest.priority(node), Some(&8));
        assert_eq!(forest.decrease_key(node, heap, 8), heap.ok_or(HeapError::EmptyHeap));
        assert_eq!(forest.validate(heap), Ok(2));
    }

    #[test]
    fn test_decrease_key_errors() {
        check_decrease_key_errors::<Slim>();
        check_decrease_key_errors::<Smooth>();
    }

    fn check_stale_handles<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let heap = build(&mut forest, &[1, 2]);
        let old_root = heap.unwrap();
        let heap = forest.delete_min(heap).unwrap().root;
        assert!(!forest.contains(old_root));
        assert_eq!(forest.delete_min(Some(old_root)), Err(HeapError::InvalidHandle));
        assert_eq!(forest.decrease_key(old_root, heap, 0), Err(HeapError::InvalidHandle));
        assert_eq!(forest.delete(old_root, heap), Err(HeapError::InvalidHandle));
        assert_eq!(forest.insert_node(old_root, heap), Err(HeapError::InvalidHandle));
        assert_eq!(forest.delete_min(None), Err(HeapError::EmptyHeap));
    }

    #[test]
    fn test_stale_handles_rejected() {
        check_stale_handles::<Slim>();
        check_stale_handles::<Smooth>();
    }

    fn check_insert_node_attached<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let node = forest.make_node(3, ());
        let heap = build(&mut forest, &[1]);
        let heap = Some(forest.insert_node(node, heap).unwrap());
        assert_eq!(forest.insert_node(node, heap), Err(HeapError::NodeAttached));
        assert_eq!(forest.validate(heap), Ok(2));
    }

    #[test]
    fn test_insert_node_rejects_attached() {
        check_insert_node_attached::<Slim>();
        check_insert_node_attached::<Smooth>();
    }

    fn check_sorted<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let heap = build(&mut forest, &[10, 20, 5, 25, 30, 9]);
        assert_eq!(drain(&mut forest, heap), vec![5, 9, 10, 20, 25, 30]);
        assert!(forest.is_empty());
    }

    #[test]
    fn test_delete_min_sorts() {
        check_sorted::<Slim>();
        check_sorted::<Smooth>();
    }

    fn check_delete<S: Restructure>() {
        let mut forest: Forest<(), i32, S> = Forest::new();
        let mut heap = build(&mut forest, &[10, 20, 5]);
        let node = forest.make_node(25, ());
        heap = Some(forest.insert_node(node, heap).unwrap());
        heap = build_onto(&mut forest, heap, &[30, 9, 50]);

        let extracted = forest.delete(node, heap).unwrap();
        assert_eq!(extracted.priority, 25);
        assert!(!forest.contains(node));
        assert_eq!(forest.validate(extracted.root), Ok(6));
        assert_eq!(drain(&mut forest, extracted.root), vec![5, 9, 10, 20, 30, 50]);
    }

    fn build_onto<S: Restructure>(
        forest: &mut Forest<(), i32, S>,
        mut heap: Option<NodeKey>,
        keys: &[i32],
    ) -> Option<NodeKey> {
        for &key in keys {
            heap = Some(forest.insert(key, (), heap).unwrap());
        }
        heap
    }

    #[test]
    fn test_delete_arbitrary_node() {
        check_delete::<Slim>();
        check_delete::<Smooth>();
    }

    #[test]
    fn test_delete_counts_work() {
        let mut forest: Forest<(), i32, Smooth> = Forest::new();
        let heap = build(&mut forest, &[4, 3, 2, 1]);
        assert_eq!(forest.stats().comparisons, 3);
        assert_eq!(forest.stats().links, 3);
        forest.reset_stats();
        let extracted = forest.delete_min(heap).unwrap();
        assert_eq!(extracted.priority, 1);
        assert!(forest.stats().links > 0);
    }
}
