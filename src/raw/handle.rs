use core::num::NonZero;

// Narrow in tests so the slot limit is reachable.
#[cfg(test)]
type Packed = u16;
#[cfg(not(test))]
type Packed = u32;

/// Names one node slot in the arena.
///
/// Stored as `slot + 1` in a `NonZero`, so an empty child link
/// (`Option<Handle>`) takes no more room than a full one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Packed>);

impl Handle {
    /// Highest slot number a handle can name.
    pub(crate) const MAX: usize = (Packed::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::new()` - `slot` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let packed = (slot + 1) as Packed;
        match NonZero::new(packed) {
            Some(packed) => Self(packed),
            None => panic!("`Handle::new()` - slot number wrapped to zero!"),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}
