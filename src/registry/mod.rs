//! Item registry orchestrator.
//!
//! The ordered item collection and selection live in the private `core`
//! module; callers import the public types from here.

mod core;

pub use self::core::{Item, ItemId, LayoutItemStore};
