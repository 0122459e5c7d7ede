//! Restructuring strategies
//!
//! Smooth heaps and slim heaps share the node representation, insertion and
//! decrease-key. They differ in how two trees are melded and in how
//! delete-min recombines the children of the removed root. Both are
//! expressed through [`Restructure`], and a [`crate::Forest`] picks one as a
//! type parameter.
//!
//! Delete-min hands the strategy an open sequence of sibling subtrees: the
//! leftmost has no left neighbour and the rightmost no right neighbour. The
//! strategy runs a
//! left-to-right sweep that leaves the sequence sorted by root priority, then
//! a right-to-left sweep that folds it into a single tree.

use crate::tree::{NodeArena, NodeKey};

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::slim::Slim {}
    impl Sealed for crate::smooth::Smooth {}
}

/// A way of combining heap-ordered trees
///
/// This trait is sealed; the implementations are [`crate::slim::Slim`] and
/// [`crate::smooth::Smooth`].
pub trait Restructure: sealed::Sealed + Default + Copy {
    /// Short name for logs and benchmark labels
    const NAME: &'static str;

    /// Melds two distinct isolated roots into one tree and returns its root.
    ///
    /// The root with the strictly smaller priority becomes the parent. On a tie
    /// `h2` becomes the parent.
    fn meld<T, P: Ord>(arena: &mut NodeArena<T, P>, h1: NodeKey, h2: NodeKey) -> NodeKey;

    /// Folds the open sequence starting at `first` into one tree and returns
    /// its root in isolated shape.
    fn combine<T, P: Ord>(arena: &mut NodeArena<T, P>, first: NodeKey) -> NodeKey;

    /// Puts `root` below the detached node `node` without comparing them, as
    /// if `node` had a priority below every other. Returns `node`.
    fn hoist<T, P: Ord>(arena: &mut NodeArena<T, P>, root: NodeKey, node: NodeKey) -> NodeKey;
}
