//! Repositories over the key-value store.
//!
//! The store is the only shared mutable state; every repository is a cheap
//! handle around it and holds nothing in process memory.

mod admin;
mod ledger;
mod polls;

pub use admin::*;
pub use ledger::*;
pub use polls::*;
