use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::{Ordering, max};
use core::iter::FusedIterator;
use core::marker::PhantomData;

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::balance::{alpha_height, alpha_weight, should_shrink};
use super::handle::Handle;
use super::node::{Node, Side};
use crate::balance_factor::{BalanceFactor, CheckedBalance};

/// The scapegoat tree backing `SGTreeSet`.
pub(crate) struct RawSGTree<T, B> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of elements in the tree.
    len: usize,
    /// Largest `len` since the last whole-tree rebuild.
    max_len: usize,
    balance: PhantomData<fn() -> B>,
}

/// One level of a root-to-node descent.
#[derive(Clone, Copy, Debug)]
struct Step {
    /// The node passed through.
    node: Handle,
    /// The child link taken out of it.
    side: Side,
}

/// Descent from the root, nearest ancestor last. Tree depth is only bounded
/// by `log(max_len) / -log(alpha)`, which grows without limit as `alpha`
/// approaches one, so walks never recurse.
type Path = SmallVec<[Step; 32]>;

impl<T, B: BalanceFactor> RawSGTree<T, B> {
    pub(crate) const ALPHA: f64 = B::CHECKED_ALPHA;

    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        let _alpha = Self::ALPHA;
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            max_len: 0,
            balance: PhantomData,
        }
    }

    /// Creates a new, empty tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let _alpha = Self::ALPHA;
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            max_len: 0,
            balance: PhantomData,
        }
    }

    /// Builds a perfectly balanced tree from values the caller guarantees are
    /// strictly ascending.
    pub(crate) fn from_sorted(values: Vec<T>) -> Self {
        let len = values.len();
        let mut tree = Self::with_capacity(len);
        tree.root = tree.build(&mut values.into_iter(), len);
        tree.len = len;
        tree.max_len = len;
        tree
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.max_len = 0;
    }

    /// Number of levels in the tree; zero when empty.
    pub(crate) fn height(&self) -> usize {
        let mut pending: SmallVec<[(Handle, usize); 32]> = self.root.map(|root| (root, 1)).into_iter().collect();
        let mut height = 0;
        while let Some((handle, level)) = pending.pop() {
            height = max(height, level);
            let node = self.nodes.get(handle);
            for child in [node.left, node.right].into_iter().flatten() {
                pending.push((child, level + 1));
            }
        }
        height
    }

    /// Counts the nodes of a subtree. Linear in the subtree's size.
    fn subtree_len(&self, link: Option<Handle>) -> usize {
        let mut pending: SmallVec<[Handle; 32]> = link.into_iter().collect();
        let mut count = 0;
        while let Some(handle) = pending.pop() {
            count += 1;
            let node = self.nodes.get(handle);
            pending.extend(node.left);
            pending.extend(node.right);
        }
        count
    }

    /// Stores `link` in the child slot the last step of `path` went through,
    /// or in the root slot when `path` is empty.
    fn attach(&mut self, path: &[Step], link: Option<Handle>) {
        match path.last() {
            Some(step) => self.nodes.get_mut(step.node).set_child(step.side, link),
            None => self.root = link,
        }
    }

    /// Builds a perfectly balanced subtree of `len` nodes from the next `len`
    /// ascending values. The middle value becomes the root; on even lengths
    /// the left half gets the extra element.
    fn build<I>(&mut self, values: &mut I, len: usize) -> Option<Handle>
    where
        I: Iterator<Item = T>,
    {
        if len == 0 {
            return None;
        }

        let left_len = len / 2;
        let left = self.build(values, left_len);
        let value = values.next().expect("`RawSGTree::build()` - fewer values than `len`!");
        let right = self.build(values, len - left_len - 1);
        Some(self.nodes.insert(Node::with_children(value, left, right)))
    }

    /// Destroys a subtree, moving its values into `out` in ascending order.
    fn drain_subtree(&mut self, link: Option<Handle>, out: &mut Vec<T>) {
        // Ancestors whose left subtree is being drained, nearest last.
        let mut pending: SmallVec<[Handle; 32]> = SmallVec::new();
        let mut current = link;
        loop {
            while let Some(handle) = current {
                pending.push(handle);
                current = self.nodes.get(handle).left;
            }
            let Some(handle) = pending.pop() else {
                return;
            };
            let Node { value, right, .. } = self.nodes.remove(handle);
            out.push(value);
            current = right;
        }
    }

    /// Replaces a subtree of `len` nodes with a perfectly balanced copy and
    /// returns the new subtree root.
    fn rebuild(&mut self, link: Option<Handle>, len: usize) -> Option<Handle> {
        let mut values = Vec::with_capacity(len);
        self.drain_subtree(link, &mut values);
        assert_eq!(values.len(), len, "`RawSGTree::rebuild()` - subtree size mismatch!");
        self.build(&mut values.into_iter(), len)
    }

    /// Rebuilds the whole tree into a freshly sized arena and resets the
    /// peak size, so slots left over from the peak are released.
    fn rebuild_all(&mut self) {
        let mut values = Vec::with_capacity(self.len);
        self.drain_subtree(self.root, &mut values);
        assert_eq!(values.len(), self.len, "`RawSGTree::rebuild_all()` - tree size mismatch!");
        self.nodes = Arena::with_capacity(self.len);
        self.root = self.build(&mut values.into_iter(), self.len);
        self.max_len = self.len;
    }

    /// Moves every value out of the tree in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        self.drain_subtree(self.root, &mut values);
        values
    }

    /// Detaches the leftmost node of the subtree at `handle` without
    /// destroying it. Returns the remaining subtree and the detached node.
    fn pop_front(&mut self, handle: Handle) -> (Option<Handle>, Handle) {
        let mut parent = None;
        let mut first = handle;
        while let Some(left) = self.nodes.get(first).left {
            parent = Some(first);
            first = left;
        }

        let rest = self.nodes.get(first).right;
        match parent {
            None => (rest, first),
            Some(parent) => {
                self.nodes.get_mut(parent).left = rest;
                (Some(handle), first)
            }
        }
    }

    /// Destroys the node at `handle` and returns the subtree that takes its
    /// place, along with its value. The in-order successor, if any, is moved
    /// up into the vacated position.
    fn splice_out(&mut self, handle: Handle) -> (Option<Handle>, T) {
        let Node { value, left, right } = self.nodes.remove(handle);
        let Some(right) = right else {
            return (left, value);
        };

        let (rest, successor) = self.pop_front(right);
        let node = self.nodes.get_mut(successor);
        node.left = left;
        node.right = rest;
        (Some(successor), value)
    }

    pub(crate) fn iter(&self) -> RawIter<'_, T> {
        RawIter::new(&self.nodes, self.root, self.len)
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.extreme(Side::Left)
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&T> {
        let mut node = self.nodes.get(self.root?);
        while let Some(child) = node.child(side) {
            node = self.nodes.get(child);
        }
        Some(&node.value)
    }
}

impl<T: Ord, B: BalanceFactor> RawSGTree<T, B> {
    /// Searches for a key and returns the handle of the node holding it.
    fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.value.borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| &self.nodes.get(handle).value)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts `value` if absent. Returns `true` if the tree changed.
    ///
    /// # Panics
    ///
    /// Panics if no ancestor of a too-deep leaf fails the weight check, which
    /// means the balance invariants were already broken before this call.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let mut path: Path = SmallVec::new();
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match value.cmp(&node.value) {
                Ordering::Equal => return false,
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            path.push(Step { node: handle, side });
            current = node.child(side);
        }

        let leaf = self.nodes.insert(Node::leaf(value));
        self.attach(&path, Some(leaf));
        self.len += 1;
        self.max_len = max(self.max_len, self.len);

        if alpha_height::<B>(path.len(), self.max_len) {
            return true;
        }

        // Climb towards the root; the subtree just left is always counted
        // already, so only the sibling needs a walk.
        let mut weight = 1;
        while let Some(Step { node, side }) = path.pop() {
            let sibling = self.nodes.get(node).child(side.opposite());
            let child_weight = weight;
            let sibling_weight = self.subtree_len(sibling);
            weight = child_weight + 1 + sibling_weight;

            if !alpha_weight::<B>(child_weight, sibling_weight) {
                trace!("rebuilding scapegoat subtree of {weight} nodes at depth {}", path.len());
                let root = self.rebuild(Some(node), weight);
                self.attach(&path, root);
                return true;
            }
        }

        panic!("`RawSGTree::insert()` - no scapegoat found in a tree of {weight} nodes!")
    }

    /// Removes the element matching `key`, if any, and returns it.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path: Path = SmallVec::new();
        let mut current = self.root;
        let target = loop {
            let handle = current?;
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.value.borrow()) {
                Ordering::Equal => break handle,
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            path.push(Step { node: handle, side });
            current = node.child(side);
        };

        let (replacement, removed) = self.splice_out(target);
        self.attach(&path, replacement);
        self.len -= 1;

        if should_shrink::<B>(self.len, self.max_len) {
            debug!("rebuilding whole tree: {} elements left of {} at peak", self.len, self.max_len);
            self.rebuild_all();
        }

        debug_assert_eq!(self.nodes.len(), self.len, "`RawSGTree::remove()` - leaked or lost nodes!");
        Some(removed)
    }
}

impl<T: Clone, B> Clone for RawSGTree<T, B> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            max_len: self.max_len,
            balance: PhantomData,
        }
    }
}

/// In-order traversal state: the stack holds the ancestors still to be
/// visited, nearest last.
pub(crate) struct RawIter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    stack: SmallVec<[Handle; 32]>,
    remaining: usize,
}

impl<'a, T> RawIter<'a, T> {
    fn new(nodes: &'a Arena<Node<T>>, root: Option<Handle>, len: usize) -> Self {
        let mut iter = Self {
            nodes,
            stack: SmallVec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.nodes.get(handle).left;
        }
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.stack.pop()?;
        let node = self.nodes.get(handle);
        self.descend_left(node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RawIter<'_, T> {}

impl<T> FusedIterator for RawIter<'_, T> {}

impl<T> Clone for RawIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
