//! Smooth and Slim Heaps for Rust
//!
//! This crate implements two self-adjusting heaps from the pairing heap
//! family. Neither stores any balance information in its nodes: all of the
//! work happens when the root is deleted and its children are recombined.
//!
//! # Features
//!
//! - **Smooth Heap**: order-preserving melds; O(1) insert and merge, O(log n)
//!   amortized delete-min and decrease-key
//! - **Slim Heap**: the link-based variant with the same bounds and simpler
//!   restructuring
//!
//! Both are available through two APIs:
//!
//! - [`SelfAdjustingHeap`] (as [`SmoothHeap`] or [`SlimHeap`]) owns one heap
//!   and implements [`Heap`], [`MergeableHeap`] and [`DecreaseKeyHeap`].
//! - [`Forest`] stores any number of heaps in one arena and addresses them by
//!   root handle, so merging two heaps in the same forest is O(1).
//!
//! # Example
//!
//! ```rust
//! use self_adjusting_heaps::smooth::SmoothHeap;
//! use self_adjusting_heaps::{DecreaseKeyHeap, Heap};
//!
//! let mut heap = SmoothHeap::new();
//! let handle1 = heap.push_with_handle(5, "item1");
//! heap.push(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek(), Some((&1, &"item1")));
//! ```

pub mod dijkstra;
pub mod forest;
pub mod heap;
pub mod restructure;
pub mod slim;
pub mod smooth;
pub mod sorting;
pub mod stats;
pub mod traits;
mod tree;

pub use forest::{Extracted, Forest};
pub use heap::{HeapHandle, SelfAdjustingHeap};
pub use restructure::Restructure;
pub use slim::{Slim, SlimForest, SlimHeap};
pub use smooth::{Smooth, SmoothForest, SmoothHeap};
pub use stats::Stats;
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError, MergeableHeap, StructureError};
pub use tree::{NodeKey, Preorder};
