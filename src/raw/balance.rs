//! Balance oracle: the two predicates that decide when a scapegoat tree must
//! rebuild.

use core::cmp::max;

use crate::balance_factor::{BalanceFactor, CheckedBalance};

/// Returns `true` if a node at `depth` (root = 0) satisfies the alpha-height
/// bound `depth <= log(max_size) / -log(alpha) + 2`.
///
/// The bound is taken against `max_size`, the largest size since the last
/// full rebuild, not the current size.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn alpha_height<B: BalanceFactor>(depth: usize, max_size: usize) -> bool {
    let alpha = B::CHECKED_ALPHA;
    // Rearranged to `max_size * alpha^(depth - 2) >= 1`, which needs no logarithm.
    let mut reach = max_size as f64;
    for _ in 2..depth {
        reach *= alpha;
        if reach < 1.0 {
            return false;
        }
    }
    reach >= 1.0
}

/// Returns `true` if a node whose children weigh `left` and `right` satisfies
/// the alpha-weight bound: neither child outweighs `alpha` times the node.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn alpha_weight<B: BalanceFactor>(left: usize, right: usize) -> bool {
    let weight = left + right + 1;
    B::CHECKED_ALPHA * weight as f64 >= max(left, right) as f64
}

/// Returns `true` once deletions have shrunk the tree below `alpha * max_size`,
/// the point at which the whole tree is rebuilt.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn should_shrink<B: BalanceFactor>(size: usize, max_size: usize) -> bool {
    (size as f64) < B::CHECKED_ALPHA * max_size as f64
}
