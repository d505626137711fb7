use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::balance_factor::{BalanceFactor, DefaultBalance};
use crate::error::BuildError;
use crate::raw::{RawIter, RawSGTree};

mod capacity;

/// An ordered set based on a scapegoat tree.
///
/// A scapegoat tree is a binary search tree that keeps near-logarithmic height
/// without storing any balance data in its nodes. Instead, an insertion that
/// lands too deep rebuilds the nearest ancestor subtree that has grown
/// lopsided (the "scapegoat"), and once enough elements have been removed the
/// whole tree is rebuilt. Both costs amortize to O(log n) per operation.
///
/// The balance factor is chosen per type through `B`; see [`BalanceFactor`].
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `SGTreeSet` that observed the logic error and not result in undefined behavior. This could
/// include panics, incorrect results, aborts, memory leaks, and non-termination.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use sgtree::SGTreeSet;
///
/// let mut books = SGTreeSet::new();
///
/// // Add some books.
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything.
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `SGTreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use sgtree::SGTreeSet;
///
/// let set = SGTreeSet::from([1, 2, 3]);
/// ```
pub struct SGTreeSet<T, B = DefaultBalance> {
    tree: RawSGTree<T, B>,
}

/// An iterator over the items of a `SGTreeSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`SGTreeSet`].
/// See its documentation for more.
///
/// [`iter`]: SGTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: RawIter<'a, T>,
}

/// An owning iterator over the items of a `SGTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`SGTreeSet`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// # Examples
///
/// ```
/// use sgtree::SGTreeSet;
///
/// let set = SGTreeSet::from([1, 2, 3]);
/// let mut iter = set.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: SGTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> SGTreeSet<T> {
    /// Makes a new, empty `SGTreeSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::new();
    ///
    /// // entries can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// Sets with another [`BalanceFactor`] are created through [`Default`].
    #[must_use]
    pub const fn new() -> SGTreeSet<T> {
        SGTreeSet { tree: RawSGTree::new() }
    }
}

impl<T, B: BalanceFactor> SGTreeSet<T, B> {
    /// The balance factor `alpha` this set type was configured with.
    pub const ALPHA: f64 = RawSGTree::<T, B>::ALPHA;

    /// Builds a perfectly balanced set from values already in strictly
    /// ascending order.
    ///
    /// The order is not checked. Feeding unsorted or duplicated values
    /// produces a set whose lookups and iteration order are unspecified; use
    /// [`try_from_sorted`](Self::try_from_sorted) when the input is not
    /// trusted.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set: SGTreeSet<_> = SGTreeSet::from_sorted([1, 2, 3, 4, 5]);
    /// assert_eq!(set.height(), 3);
    /// assert_eq!(set.to_vec(), [1, 2, 3, 4, 5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn from_sorted<I>(values: I) -> SGTreeSet<T, B>
    where
        I: IntoIterator<Item = T>,
    {
        SGTreeSet {
            tree: RawSGTree::from_sorted(values.into_iter().collect()),
        }
    }

    /// Like [`from_sorted`](Self::from_sorted), but first checks that the
    /// values are strictly ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotStrictlyAscending`] naming the first value
    /// that does not order strictly after its predecessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::{BuildError, SGTreeSet};
    ///
    /// let set: SGTreeSet<_> = SGTreeSet::try_from_sorted([1, 2, 3]).unwrap();
    /// assert_eq!(set.len(), 3);
    ///
    /// let err = SGTreeSet::<_>::try_from_sorted([1, 3, 3]).unwrap_err();
    /// assert_eq!(err, BuildError::NotStrictlyAscending { index: 2 });
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn try_from_sorted<I>(values: I) -> Result<SGTreeSet<T, B>, BuildError>
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let values: Vec<T> = values.into_iter().collect();
        if let Some(position) = values.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(BuildError::NotStrictlyAscending { index: position + 1 });
        }
        Ok(SGTreeSet {
            tree: RawSGTree::from_sorted(values),
        })
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut v = SGTreeSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns `true` if the set contains a value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set = SGTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the value in the set, if any, that is equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set = SGTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.get(value)
    }

    /// Returns a reference to the first value in the set, if any.
    /// This value is always the minimum of all values in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the last value in the set, if any.
    /// This value is always the maximum of all values in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned, and
    ///   the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized; a single call may rebuild a subtree in linear time.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(value)
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::new();
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized; once the set has shrunk below `ALPHA` times its
    /// peak size the whole tree is rebuilt.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Gets an iterator that visits the elements in the `SGTreeSet` in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set = SGTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create; O(n) to exhaust.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.tree.iter() }
    }

    /// Returns every element, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set = SGTreeSet::from([5, 1, 3]);
    /// assert_eq!(set.to_vec(), [1, 3, 5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut v = SGTreeSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut v = SGTreeSet::new();
    /// assert!(v.is_empty());
    /// v.insert(1);
    /// assert!(!v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of levels in the underlying tree, zero when empty.
    ///
    /// Every element sits within `log(peak) / -log(ALPHA) + 2` edges of the
    /// root, where `peak` is the largest size the set has reached since its
    /// last whole-tree rebuild.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let mut set = SGTreeSet::new();
    /// for i in 0..1000 {
    ///     set.insert(i);
    /// }
    /// assert!(set.height() < 40);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

impl<T: Hash, B: BalanceFactor> Hash for SGTreeSet<T, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: PartialEq, B: BalanceFactor> PartialEq for SGTreeSet<T, B> {
    fn eq(&self, other: &SGTreeSet<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, B: BalanceFactor> Eq for SGTreeSet<T, B> {}

impl<T: Clone, B: BalanceFactor> Clone for SGTreeSet<T, B> {
    fn clone(&self) -> Self {
        SGTreeSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: fmt::Debug, B: BalanceFactor> fmt::Debug for SGTreeSet<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, B: BalanceFactor> Default for SGTreeSet<T, B> {
    fn default() -> Self {
        SGTreeSet { tree: RawSGTree::new() }
    }
}

impl<T: Ord, B: BalanceFactor> FromIterator<T> for SGTreeSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SGTreeSet::default();
        set.extend(iter);
        set
    }
}

impl<T: Ord, B: BalanceFactor> Extend<T> for SGTreeSet<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy, B: BalanceFactor> Extend<&'a T> for SGTreeSet<T, B> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SGTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, B: BalanceFactor> IntoIterator for SGTreeSet<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `SGTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::SGTreeSet;
    ///
    /// let set = SGTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, T, B: BalanceFactor> IntoIterator for &'a SGTreeSet<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `sgtree_set::IntoIter`.
    ///
    /// ```
    /// use sgtree::sgtree_set;
    ///
    /// let iter: sgtree_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
