//! Slim heap
//!
//! The slim heap is the link-based variant of the smooth heap. Melding links
//! the larger root below the smaller one as its new rightmost child, and the
//! delete-min sweeps call the link primitive directly with the parent chosen
//! by the sweep itself.
//!
//! | Operation      | Complexity           |
//! |----------------|----------------------|
//! | `push`         | O(1) worst-case      |
//! | `pop`          | O(log n) amortized   |
//! | `peek`         | O(1) worst-case      |
//! | `decrease_key` | O(log n) amortized   |
//! | `merge`        | O(1) worst-case      |
//!
//! # References
//!
//! - Hartmann, M., Kozma, L., Sinnamon, C., Tarjan, R.E. (2021). "Analysis of
//!   Smooth Heaps and Slim Heaps." *ICALP 2021*.

use crate::forest::Forest;
use crate::heap::SelfAdjustingHeap;
use crate::restructure::Restructure;
use crate::tree::{Left, NodeArena, NodeKey};

/// Link-based restructuring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Slim;

/// Slim heap owning its nodes
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::slim::SlimHeap;
/// use self_adjusting_heaps::{DecreaseKeyHeap, Heap};
///
/// let mut heap = SlimHeap::new();
/// let handle = heap.push_with_handle(5, "item");
/// heap.push(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.pop(), Some((1, "item")));
/// assert_eq!(heap.pop(), Some((3, "other")));
/// ```
pub type SlimHeap<T, P> = SelfAdjustingHeap<T, P, Slim>;

/// Slim heaps sharing one arena, addressed by root handles
pub type SlimForest<T, P> = Forest<T, P, Slim>;

impl Restructure for Slim {
    const NAME: &'static str = "slim";

    fn meld<T, P: Ord>(arena: &mut NodeArena<T, P>, h1: NodeKey, h2: NodeKey) -> NodeKey {
        if arena.less(h1, h2) {
            arena.link(h1, h2)
        } else {
            arena.link(h2, h1)
        }
    }

    fn combine<T, P: Ord>(arena: &mut NodeArena<T, P>, first: NodeKey) -> NodeKey {
        let mut x = first;
        while let Some(r) = arena.right(x) {
            if arena.less(x, r) {
                x = r;
                continue;
            }
            // x is a local maximum
            while let Left::Sibling(l) = arena.left(x) {
                if !arena.less(r, l) {
                    break;
                }
                x = arena.join_adjacent(l, x, |a, l, x| a.link(l, x));
            }
            x = arena.join_adjacent(x, r, |a, x, r| a.link(r, x));
        }

        // the sequence is now sorted; fold it from the right
        while let Left::Sibling(l) = arena.left(x) {
            x = arena.join_adjacent(l, x, |a, l, x| a.link(l, x));
        }
        arena.make_singleton(x);
        x
    }

    fn hoist<T, P: Ord>(arena: &mut NodeArena<T, P>, root: NodeKey, node: NodeKey) -> NodeKey {
        arena.link(node, root)
    }
}
