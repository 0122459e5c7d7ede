//! Heap sort with operation counts
//!
//! Sorting by repeated delete-min is the usual way to compare restructuring
//! strategies: the input is inserted into one tree and drained again, and
//! the [`Stats`] of the run tell how much work each strategy spent.

use crate::forest::Forest;
use crate::restructure::Restructure;
use crate::stats::Stats;

/// Sorts `values` ascending through a single heap using strategy `S`.
///
/// Equal values keep no particular order. Returns the sorted values and the
/// comparisons and links spent on inserting and extracting them.
///
/// ```rust
/// use self_adjusting_heaps::slim::Slim;
/// use self_adjusting_heaps::sorting::heap_sort;
///
/// let (sorted, stats) = heap_sort::<Slim, _>([10, 20, 5, 25, 30, 9]);
/// assert_eq!(sorted, vec![5, 9, 10, 20, 25, 30]);
/// assert!(stats.comparisons > 0);
/// ```
pub fn heap_sort<S, P>(values: impl IntoIterator<Item = P>) -> (Vec<P>, Stats)
where
    S: Restructure,
    P: Ord,
{
    let values = values.into_iter();
    let mut forest: Forest<(), P, S> = Forest::with_capacity(values.size_hint().0);
    let mut heap = None;
    for value in values {
        let node = forest.make_node(value, ());
        heap = Some(forest.attach(node, heap));
    }

    let mut sorted = Vec::with_capacity(forest.len());
    while let Ok(extracted) = forest.delete_min(heap) {
        sorted.push(extracted.priority);
        heap = extracted.root;
    }
    (sorted, forest.stats())
}
