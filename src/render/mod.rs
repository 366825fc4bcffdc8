//! Reconciliation renderer: full renders and in-place patches of a live tree.

pub mod dom;
mod reconcile;

pub use dom::{parse_fragment, NodeRef};
pub use reconcile::{Container, PatchStats};
