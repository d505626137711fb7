use super::handle::Handle;

/// A binary search tree node.
///
/// Nodes carry no balance metadata and no parent link; a node is owned by the
/// single parent link (or root slot) that holds its handle.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a node with no children.
    pub(crate) const fn leaf(value: T) -> Self {
        Self::with_children(value, None, None)
    }

    pub(crate) const fn with_children(value: T, left: Option<Handle>, right: Option<Handle>) -> Self {
        Self { value, left, right }
    }

    /// Returns the child link on the given side.
    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Overwrites the child link on the given side.
    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Which child link a descent follows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
