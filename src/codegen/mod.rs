//! Code generation orchestrator.
//!
//! Serialises the item store and breakpoint table into static markup and a
//! three-breakpoint stylesheet. Output is deterministic and follows store
//! order; class names are positional (`item-1`, `item-2`, ...).

mod core;

pub use self::core::{
    Combined, ExportKind, GRID_CLASS, ITEM_CLASS, Markup, Stylesheet, generate, generate_combined,
    generate_markup, generate_stylesheet, item_class, write_artifact,
};
