//! Drag-to-resize state machine.
//!
//! A gesture starts on the resize handle of the selected item and ends on
//! pointer release. While dragging, every move is converted into whole grid
//! units using the cell size derived from the item's rendered box at gesture
//! start, so the same conversion holds for any container width, column count
//! or item aspect.
//!
//! ```
//! use bento_grid::geometry::{BoxSize, Point};
//! use bento_grid::layout::{Breakpoint, Span};
//! use bento_grid::registry::ItemId;
//! use bento_grid::resize::{CellGeometry, DragAnchor};
//!
//! // A 1x1 item rendered at 200x100 with a 16px gap.
//! let geometry = CellGeometry::measure(BoxSize::new(200.0, 100.0), 16, Span::UNIT);
//! let anchor = DragAnchor::new(ItemId::new(1), Breakpoint::Desktop, Point::new(0.0, 0.0), Span::UNIT, geometry);
//! let span = anchor.span_at(Point::new(216.0, 0.0), 4);
//! assert_eq!(span, Span { col: 2, row: 1 });
//! ```

use crate::geometry::{BoxSize, Point};
use crate::layout::{Breakpoint, Span, SpanDelta, compute_span};
use crate::registry::ItemId;

/// Per-unit cell size captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub unit_width: f64,
    pub unit_height: f64,
    pub gap: f64,
}

impl CellGeometry {
    /// Derive the size of one grid unit from a box spanning `span` cells.
    pub fn measure(item_box: BoxSize, gap: u32, span: Span) -> Self {
        let gap = f64::from(gap);
        Self {
            unit_width: unit_size(item_box.width, span.col, gap),
            unit_height: unit_size(item_box.height, span.row, gap),
            gap,
        }
    }

    /// Convert a pixel offset into whole-unit deltas.
    pub fn unit_delta(&self, dx: f64, dy: f64) -> SpanDelta {
        SpanDelta::new(
            steps(dx, self.unit_width + self.gap),
            steps(dy, self.unit_height + self.gap),
        )
    }
}

fn unit_size(extent: f64, cells: u32, gap: f64) -> f64 {
    let cells = f64::from(cells.max(1));
    (extent - (cells - 1.0) * gap) / cells
}

// Rounds halves toward positive infinity.
fn steps(pixels: f64, stride: f64) -> i64 {
    if !stride.is_finite() || stride <= 0.0 || !pixels.is_finite() {
        return 0;
    }
    (pixels / stride + 0.5).floor() as i64
}

/// Everything captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub item: ItemId,
    pub breakpoint: Breakpoint,
    pub origin: Point,
    pub start_span: Span,
    pub geometry: CellGeometry,
}

impl DragAnchor {
    pub fn new(
        item: ItemId,
        breakpoint: Breakpoint,
        origin: Point,
        start_span: Span,
        geometry: CellGeometry,
    ) -> Self {
        Self {
            item,
            breakpoint,
            origin,
            start_span,
            geometry,
        }
    }

    /// Span implied by the pointer being at `position`.
    pub fn span_at(&self, position: Point, max_columns: u32) -> Span {
        let (dx, dy) = position.delta_from(self.origin);
        compute_span(self.start_span, self.geometry.unit_delta(dx, dy), max_columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Dragging(DragAnchor),
}

/// Result of feeding a pointer move to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// No gesture in progress.
    Ignored,
    /// The computed span equals the stored one; nothing to write.
    Unchanged,
    /// A new span should be written for the anchored item.
    Commit {
        item: ItemId,
        breakpoint: Breakpoint,
        span: Span,
    },
}

/// Owns the `Idle`/`Dragging` state. The editor supplies the current stored
/// span on every move so the controller can skip redundant writes.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    state: ResizeState,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Dragging(_))
    }

    pub fn anchor(&self) -> Option<&DragAnchor> {
        match &self.state {
            ResizeState::Dragging(anchor) => Some(anchor),
            ResizeState::Idle => None,
        }
    }

    /// Enter `Dragging`. A gesture already in progress is replaced.
    pub fn begin(&mut self, anchor: DragAnchor) {
        self.state = ResizeState::Dragging(anchor);
    }

    /// Translate a move into an outcome against the currently stored span.
    pub fn on_move(&self, position: Point, current: Span, max_columns: u32) -> ResizeOutcome {
        let ResizeState::Dragging(anchor) = &self.state else {
            return ResizeOutcome::Ignored;
        };
        let next = anchor.span_at(position, max_columns);
        if next == current {
            return ResizeOutcome::Unchanged;
        }
        ResizeOutcome::Commit {
            item: anchor.item,
            breakpoint: anchor.breakpoint,
            span: next,
        }
    }

    /// Leave `Dragging`, returning the finished anchor if there was one.
    pub fn release(&mut self) -> Option<DragAnchor> {
        match std::mem::take(&mut self.state) {
            ResizeState::Dragging(anchor) => Some(anchor),
            ResizeState::Idle => None,
        }
    }
}
