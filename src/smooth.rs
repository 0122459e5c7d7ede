//! Smooth heap
//!
//! A smooth heap is a self-adjusting heap in the pairing heap family that
//! keeps no balance information at all. Delete-min treats the children of the
//! removed root as a sequence and repeatedly melds each local maximum with the
//! larger of its two neighbours, which makes the sequence sorted; a final
//! right-to-left pass then folds it into one tree.
//!
//! Melding is order-preserving: when the left tree wins it gains the right
//! tree as its rightmost child, and when the right tree wins it gains the left
//! tree as its leftmost child. The children of every node therefore keep the
//! left-to-right order they had in the delete-min sequence.
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
//! - Kozma, L., Saranurak, T. (2020). "Smooth Heaps and a Dual View of
//!   Self-Adjusting Data Structures." *SIAM J. Comput.* 49(5).
//!   [arXiv:1802.05471](https://arxiv.org/abs/1802.05471)
//! - Hartmann, M., Kozma, L., Sinnamon, C., Tarjan, R.E. (2021). "Analysis of
//!   Smooth Heaps and Slim Heaps." *ICALP 2021*.

use crate::forest::Forest;
use crate::heap::SelfAdjustingHeap;
use crate::restructure::Restructure;
use crate::tree::{Left, NodeArena, NodeKey};

/// Merge-based, order-preserving restructuring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Smooth;

/// Smooth heap owning its nodes
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::smooth::SmoothHeap;
/// use self_adjusting_heaps::{Heap, MergeableHeap};
///
/// let mut heap1 = SmoothHeap::new();
/// heap1.push(4, "four");
/// heap1.push(8, "eight");
///
/// let mut heap2 = SmoothHeap::new();
/// heap2.push(3, "three");
///
/// heap1.merge(heap2);
/// assert_eq!(heap1.pop(), Some((3, "three")));
/// assert_eq!(heap1.pop(), Some((4, "four")));
/// ```
pub type SmoothHeap<T, P> = SelfAdjustingHeap<T, P, Smooth>;

/// Smooth heaps sharing one arena, addressed by root handles
pub type SmoothForest<T, P> = Forest<T, P, Smooth>;

impl Restructure for Smooth {
    const NAME: &'static str = "smooth";

    fn meld<T, P: Ord>(arena: &mut NodeArena<T, P>, h1: NodeKey, h2: NodeKey) -> NodeKey {
        if arena.less(h1, h2) {
            arena.link(h1, h2)
        } else {
            arena.link_leftmost(h2, h1)
        }
    }

    fn combine<T, P: Ord>(arena: &mut NodeArena<T, P>, first: NodeKey) -> NodeKey {
        let mut x = first;
        while let Some(r) = arena.right(x) {
            if arena.less(x, r) {
                x = r;
                continue;
            }
            // x is a local maximum; r tracks its current right neighbour
            let mut r = r;
            while let Left::Sibling(l) = arena.left(x) {
                if arena.less(r, l) {
                    x = arena.join_adjacent(l, x, |a, l, x| Self::meld(a, l, x));
                } else {
                    r = arena.join_adjacent(x, r, |a, x, r| Self::meld(a, x, r));
                    x = l;
                    break;
                }
            }
            x = arena.join_adjacent(x, r, |a, x, r| Self::meld(a, x, r));
        }

        while let Left::Sibling(l) = arena.left(x) {
            x = arena.join_adjacent(l, x, |a, l, x| Self::meld(a, l, x));
        }
        arena.make_singleton(x);
        x
    }

    fn hoist<T, P: Ord>(arena: &mut NodeArena<T, P>, root: NodeKey, node: NodeKey) -> NodeKey {
        arena.link_leftmost(node, root)
    }
}
