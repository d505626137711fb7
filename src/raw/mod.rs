mod arena;
mod balance;
mod handle;
mod node;
mod raw_sgtree;

pub(crate) use raw_sgtree::{RawIter, RawSGTree};
