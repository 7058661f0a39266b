//! Core of the bento grid editor: a responsive span model, drag-to-resize,
//! and deterministic markup/stylesheet generation across the desktop, tablet
//! and mobile breakpoints.
//!
//! Drawing, button wiring and clipboard access belong to the presentation
//! layer, which drives an [`EditorState`] and displays what it returns.

pub mod codegen;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod resize;

pub use codegen::{ExportKind, generate, write_artifact};
pub use editor::{
    EditorConfig, EditorEvent, EditorState, EventFlow, InspectorView, RenderableItem,
    RenderableState,
};
pub use error::{EditorError, Result};
pub use geometry::{BoxSize, Point};
pub use layout::{
    Axis, Breakpoint, BreakpointConfig, BreakpointTable, ConfigPatch, Span, StepDirection,
    compute_span,
};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{EditorMetrics, MetricSnapshot};
pub use registry::{Item, ItemId, LayoutItemStore};
pub use resize::{CellGeometry, DragAnchor, ResizeController, ResizeOutcome, ResizeState};
