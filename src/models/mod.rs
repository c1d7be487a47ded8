//! Data models for the poll backend.
//!
//! Field names follow the JSON contract of the web client and frame protocol.

mod admin;
mod frame;
mod poll;
mod results;

pub use admin::*;
pub use frame::*;
pub use poll::*;
pub use results::*;
