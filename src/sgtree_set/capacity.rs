use super::SGTreeSet;
use crate::balance_factor::BalanceFactor;
use crate::raw::RawSGTree;

impl<T, B: BalanceFactor> SGTreeSet<T, B> {
    /// Creates an empty set with room for at least `capacity` elements before
    /// the node arena reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set: SGTreeSet<i32> = SGTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SGTreeSet {
            tree: RawSGTree::with_capacity(capacity),
        }
    }

    /// Returns the current capacity for the set.
    ///
    /// Insertions reuse slots freed by removals. Once removals shrink the set
    /// enough to rebuild it whole, the capacity drops to the remaining length.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set: SGTreeSet<i32> = SGTreeSet::with_capacity(32);
    /// assert_eq!(set.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
