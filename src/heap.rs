//! Owned heap objects
//!
//! [`SelfAdjustingHeap`] wraps a [`Forest`] holding exactly one tree, and
//! implements [`Heap`], [`MergeableHeap`] and [`DecreaseKeyHeap`] on top of
//! it. Use [`crate::slim::SlimHeap`] or [`crate::smooth::SmoothHeap`] rather
//! than naming the strategy directly.

use crate::forest::Forest;
use crate::restructure::Restructure;
use crate::stats::Stats;
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError, MergeableHeap, StructureError};
use crate::tree::{NodeKey, Preorder};

/// Handle to an element in a [`SelfAdjustingHeap`]
///
/// The handle stays valid until its element is popped or deleted, and is
/// rejected with [`HeapError::InvalidHandle`] afterwards. It is tied to the
/// heap that issued it: using it on another heap addresses an unrelated
/// element, and handles of a heap consumed by `merge` are not carried over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapHandle {
    node: NodeKey,
}

impl HeapHandle {
    /// The node key inside the heap's forest
    pub fn key(&self) -> NodeKey {
        self.node
    }
}

impl Handle for HeapHandle {}

/// A single self-adjusting heap with restructuring strategy `S`
pub struct SelfAdjustingHeap<T, P: Ord, S: Restructure> {
    forest: Forest<T, P, S>,
    root: Option<NodeKey>,
}

impl<T, P: Ord, S: Restructure> Default for SelfAdjustingHeap<T, P, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord, S: Restructure> Heap<T, P> for SelfAdjustingHeap<T, P, S> {
    fn new() -> Self {
        Self {
            forest: Forest::new(),
            root: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        self.forest.len()
    }

    fn push(&mut self, priority: P, item: T) {
        let _ = self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.forest.find_min(self.root)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        let extracted = self.forest.delete_min(self.root).ok()?;
        self.root = extracted.root;
        Some((extracted.priority, extracted.item))
    }
}

impl<T, P: Ord, S: Restructure> MergeableHeap<T, P> for SelfAdjustingHeap<T, P, S> {
    /// Moves the nodes of `other` into this heap's arena, then melds the roots.
    ///
    /// O(m) in the size of `other`; melding trees that already share a forest
    /// is O(1), see [`Forest::merge`]. The nodes always move into this arena,
    /// even when this heap is empty, so handles to elements removed from it
    /// earlier stay invalid.
    fn merge(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }

        let remap = self.forest.absorb(other.forest);
        let other_root = other.root.and_then(|root| remap.get(root).copied());
        self.root = self.forest.meld_roots(self.root, other_root);
    }
}

impl<T, P: Ord, S: Restructure> DecreaseKeyHeap<T, P> for SelfAdjustingHeap<T, P, S> {
    type Handle = HeapHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        let node = self.forest.make_node(priority, item);
        self.root = Some(self.forest.attach(node, self.root));
        HeapHandle { node }
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        if !self.forest.contains(handle.node) {
            return Err(HeapError::InvalidHandle);
        }
        let root = self.forest.decrease_key(handle.node, self.root, new_priority)?;
        self.root = Some(root);
        Ok(())
    }
}

impl<T, P: Ord, S: Restructure> SelfAdjustingHeap<T, P, S> {
    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forest: Forest::with_capacity(capacity),
            root: None,
        }
    }

    /// Priority and item of the element behind `handle`
    pub fn get(&self, handle: &HeapHandle) -> Option<(&P, &T)> {
        Some((self.forest.priority(handle.node)?, self.forest.item(handle.node)?))
    }

    /// Removes the element behind `handle` and returns it
    pub fn delete(&mut self, handle: &HeapHandle) -> Result<(P, T), HeapError> {
        if !self.forest.contains(handle.node) {
            return Err(HeapError::InvalidHandle);
        }
        let extracted = self.forest.delete(handle.node, self.root)?;
        self.root = extracted.root;
        Ok((extracted.priority, extracted.item))
    }

    /// Priorities in preorder, for inspection
    pub fn preorder(&self) -> Preorder<'_, T, P> {
        self.forest.preorder(self.root)
    }

    /// Checks every structural invariant, returning the number of elements
    pub fn validate(&self) -> Result<usize, StructureError> {
        self.forest.validate(self.root)
    }

    /// Comparison and link counts accumulated so far
    pub fn stats(&self) -> Stats {
        self.forest.stats()
    }

    /// Zeroes the comparison and link counts
    pub fn reset_stats(&mut self) {
        self.forest.reset_stats();
    }
}
