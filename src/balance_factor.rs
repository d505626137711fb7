/// The balance factor `alpha` of a scapegoat tree, fixed per type.
///
/// A tree with factor `alpha` keeps every node's heavier child at most
/// `alpha` times the node's weight, and every node within
/// `log(max_size) / -log(alpha) + 2` levels of the root. Lower values give a
/// shallower tree at the cost of more frequent rebuilds.
///
/// `ALPHA` must lie strictly between `0.5` and `1`. The bound is checked at
/// compile time: a tree instantiated with an out-of-range factor does not
/// build.
///
/// # Examples
///
/// ```
/// use sgtree::{BalanceFactor, SGTreeSet};
///
/// struct Loose;
///
/// impl BalanceFactor for Loose {
///     const ALPHA: f64 = 0.9;
/// }
///
/// let mut set: SGTreeSet<u32, Loose> = SGTreeSet::default();
/// set.insert(1);
/// assert_eq!(SGTreeSet::<u32, Loose>::ALPHA, 0.9);
/// ```
///
/// ```compile_fail
/// use sgtree::{Ratio, SGTreeSet};
///
/// // alpha = 0.5 is outside the open interval (0.5, 1).
/// let mut set: SGTreeSet<u32, Ratio<1, 2>> = SGTreeSet::default();
/// set.insert(1);
/// ```
pub trait BalanceFactor {
    /// The configured `alpha`, in `(0.5, 1)`.
    const ALPHA: f64;
}

/// `alpha = NUM / DEN`.
///
/// # Examples
///
/// ```
/// use sgtree::{Ratio, SGTreeSet};
///
/// let set: SGTreeSet<i32, Ratio<3, 4>> = SGTreeSet::from_sorted([1, 2, 3]);
/// assert_eq!(set.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Ratio<const NUM: u32, const DEN: u32>;

impl<const NUM: u32, const DEN: u32> BalanceFactor for Ratio<NUM, DEN> {
    const ALPHA: f64 = NUM as f64 / DEN as f64;
}

/// `alpha = pi / 4`, roughly `0.785`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct DefaultBalance;

impl BalanceFactor for DefaultBalance {
    const ALPHA: f64 = core::f64::consts::FRAC_PI_4;
}

/// Compile-time gate on a [`BalanceFactor`].
///
/// Reading `CHECKED_ALPHA` forces the range check during monomorphisation.
pub(crate) trait CheckedBalance: BalanceFactor {
    const CHECKED_ALPHA: f64 = {
        assert!(
            Self::ALPHA > 0.5 && Self::ALPHA < 1.0,
            "`BalanceFactor::ALPHA` must lie strictly between 0.5 and 1"
        );
        Self::ALPHA
    };
}

impl<B: BalanceFactor> CheckedBalance for B {}
