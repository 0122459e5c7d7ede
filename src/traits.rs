//! Common traits for heap data structures
//!
//! This module provides the trait hierarchy shared by the heap types in this crate:
//!
//! - [`Heap`]: Base trait with `push`/`peek`/`pop`, compatible with `BinaryHeap` patterns
//! - [`MergeableHeap`]: Adds melding of two whole heaps
//! - [`DecreaseKeyHeap`]: Adds handle-based `decrease_key`
//!
//! Algorithms such as [`crate::dijkstra::shortest_paths`] are written against these
//! traits, so either restructuring strategy can be plugged in.

use std::fmt;

use crate::tree::NodeKey;

/// Error type for heap operations
///
/// Every variant is a violated precondition on the caller's side. None of them
/// leave the heap in a modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    PriorityIncreased,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
    /// The operation needs a non-empty heap
    EmptyHeap,
    /// The heap handle does not refer to the root of a tree
    NotARoot,
    /// The node is already attached below some parent
    NodeAttached,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PriorityIncreased => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::EmptyHeap => write!(f, "operation requires a non-empty heap"),
            HeapError::NotARoot => write!(f, "heap handle does not refer to a tree root"),
            HeapError::NodeAttached => write!(f, "node is already attached to a tree"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Reasons a tree can fail structural validation
///
/// Returned by [`crate::Forest::validate`]. In a correct build none of these can be
/// produced through the public API; they exist so tests can pin down exactly which
/// link went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureError {
    /// A reference points at a node that is not in the arena
    Dangling(NodeKey),
    /// A child has a smaller priority than its parent
    HeapOrder { parent: NodeKey, child: NodeKey },
    /// A sibling ring is not a consistent circular doubly linked list
    SiblingRing(NodeKey),
    /// A leftmost child does not point back at its parent
    BackReference(NodeKey),
    /// The root is not in isolated shape (it has siblings)
    RootShape(NodeKey),
    /// More nodes were reached than the arena holds
    Cycle,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::Dangling(k) => write!(f, "dangling reference to {:?}", k),
            StructureError::HeapOrder { parent, child } => {
                write!(f, "heap order violated between {:?} and child {:?}", parent, child)
            }
            StructureError::SiblingRing(k) => write!(f, "broken sibling ring at {:?}", k),
            StructureError::BackReference(k) => {
                write!(f, "leftmost child {:?} does not point at its parent", k)
            }
            StructureError::RootShape(k) => write!(f, "root {:?} has siblings", k),
            StructureError::Cycle => write!(f, "traversal revisited nodes"),
        }
    }
}

impl std::error::Error for StructureError {}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::Heap;
/// use self_adjusting_heaps::smooth::SmoothHeap;
///
/// let mut heap = SmoothHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Time Complexity
    /// O(1) worst-case for the heaps in this crate.
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Heaps that can absorb another heap of the same type
pub trait MergeableHeap<T, P: Ord>: Heap<T, P> {
    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::{Heap, DecreaseKeyHeap};
/// use self_adjusting_heaps::slim::SlimHeap;
///
/// let mut heap = SlimHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::PriorityIncreased` if the new priority is greater
    /// than the current one, and `HeapError::InvalidHandle` if the element
    /// has already been removed.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
