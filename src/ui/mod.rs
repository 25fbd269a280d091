//! User interface
//!
//! `view` turns game state into a `Node` tree. `patch` plans how to move the
//! page from one tree to the next and `dom` (wasm only) carries that out and
//! decodes clicks back into actions.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod node;
pub mod patch;
pub mod view;

pub use node::{ACTION_ATTR, Action, Node};
pub use view::{format_clock, render};
