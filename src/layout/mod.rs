//! Layout module orchestrator.
//!
//! Downstream code imports the responsive grid model from here: breakpoints
//! and their grid configuration live in `breakpoint`, the per-item span model
//! and its clamping rules live in `span`.

pub mod breakpoint;
pub mod span;

pub use breakpoint::{
    Breakpoint, BreakpointConfig, BreakpointTable, ConfigPatch, MOBILE_MAX_WIDTH,
    TABLET_MAX_WIDTH, parse_count, parse_gap,
};
pub use span::{Axis, Span, SpanDelta, SpanSet, StepDirection, compute_span};
