//! Scapegoat tree ordered set for Rust.
//!
//! This crate provides [`SGTreeSet`], an ordered set backed by a scapegoat
//! tree: a weight-balanced binary search tree that keeps near-logarithmic
//! height without any per-node balance data (no colors, heights, or parent
//! links).
//!
//! # Example
//!
//! ```
//! use sgtree::{Ratio, SGTreeSet};
//!
//! let mut set = SGTreeSet::new();
//! for i in 1..=7 {
//!     set.insert(i);
//! }
//! assert!(set.contains(&4));
//! assert_eq!(set.len(), 7);
//!
//! set.remove(&4);
//! assert_eq!(set.to_vec(), [1, 2, 3, 5, 6, 7]);
//!
//! // The balance factor is part of the type.
//! let strict: SGTreeSet<i32, Ratio<3, 5>> = (0..100).collect();
//! assert!(strict.height() <= 12);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Compile-time balance factor** - `alpha` is checked to lie in `(0.5, 1)` when the type is used
//! - **Amortized O(log n)** insert and remove, worst-case O(log n) lookup
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their children by index. An insertion
//! that lands deeper than `log(max_size) / -log(alpha) + 2` rebuilds the
//! nearest ancestor whose subtree violates the alpha-weight bound; a removal
//! that leaves fewer than `alpha * max_size` elements rebuilds the whole tree.
//! Rebuilds flatten the subtree in order and rebuild it perfectly balanced in
//! linear time.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod balance_factor;
mod error;
mod raw;

pub mod sgtree_set;

pub use balance_factor::{BalanceFactor, DefaultBalance, Ratio};
pub use error::BuildError;
pub use sgtree_set::SGTreeSet;
