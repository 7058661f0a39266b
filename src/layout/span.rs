//! Per-breakpoint span model.
//!
//! Every write goes through a clamp: column spans stay within
//! `[1, columns(breakpoint)]` and row spans stay `>= 1`. Out-of-range input is
//! bounded silently, never rejected.

use serde::{Deserialize, Serialize};

use super::breakpoint::Breakpoint;

/// Number of grid columns/rows an item occupies at one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub col: u32,
    pub row: u32,
}

impl Default for Span {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Span {
    pub const UNIT: Span = Span { col: 1, row: 1 };

    /// Build a span already bounded by `max_columns`.
    pub fn clamped(col: u32, row: u32, max_columns: u32) -> Self {
        Self {
            col: col.clamp(1, max_columns.max(1)),
            row: row.max(1),
        }
    }

    pub fn is_unit(&self) -> bool {
        *self == Self::UNIT
    }

    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Column => self.col,
            Axis::Row => self.row,
        }
    }
}

/// Signed change in whole grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanDelta {
    pub col: i64,
    pub row: i64,
}

impl SpanDelta {
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    pub fn is_zero(&self) -> bool {
        self.col == 0 && self.row == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Column,
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increase,
    Decrease,
}

impl StepDirection {
    pub const fn sign(self) -> i64 {
        match self {
            StepDirection::Increase => 1,
            StepDirection::Decrease => -1,
        }
    }
}

/// Apply `delta` to `start` and bound the result.
///
/// Columns land in `[1, max_columns]`, rows in `[1, u32::MAX]`.
pub fn compute_span(start: Span, delta: SpanDelta, max_columns: u32) -> Span {
    let max_columns = i64::from(max_columns.max(1));
    let col = (i64::from(start.col).saturating_add(delta.col)).clamp(1, max_columns);
    let row = (i64::from(start.row).saturating_add(delta.row)).clamp(1, i64::from(u32::MAX));
    Span {
        col: col as u32,
        row: row as u32,
    }
}

/// One span per breakpoint, all starting at `{1, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanSet {
    spans: [Span; 3],
}

impl SpanSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(desktop: Span, tablet: Span, mobile: Span) -> Self {
        Self {
            spans: [desktop, tablet, mobile],
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Span {
        self.spans[breakpoint.index()]
    }

    /// Store a clamped span for one breakpoint. Returns `true` if it changed.
    pub fn set(&mut self, breakpoint: Breakpoint, col: u32, row: u32, max_columns: u32) -> bool {
        self.replace(breakpoint, Span::clamped(col, row, max_columns))
    }

    /// Increment or decrement one axis by a single unit, clamped.
    pub fn step(
        &mut self,
        breakpoint: Breakpoint,
        axis: Axis,
        direction: StepDirection,
        max_columns: u32,
    ) -> bool {
        let delta = match axis {
            Axis::Column => SpanDelta::new(direction.sign(), 0),
            Axis::Row => SpanDelta::new(0, direction.sign()),
        };
        let next = compute_span(self.get(breakpoint), delta, max_columns);
        self.replace(breakpoint, next)
    }

    /// Re-bound the column span after the breakpoint lost columns.
    pub fn clamp_columns(&mut self, breakpoint: Breakpoint, max_columns: u32) -> bool {
        let current = self.get(breakpoint);
        self.replace(breakpoint, Span::clamped(current.col, current.row, max_columns))
    }

    pub(crate) fn replace(&mut self, breakpoint: Breakpoint, span: Span) -> bool {
        let slot = &mut self.spans[breakpoint.index()];
        if *slot == span {
            return false;
        }
        *slot = span;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_span_adds_delta() {
        let next = compute_span(Span { col: 1, row: 1 }, SpanDelta::new(2, 3), 4);
        assert_eq!(next, Span { col: 3, row: 4 });
    }

    #[test]
    fn compute_span_clamps_columns_to_bounds() {
        let start = Span { col: 2, row: 2 };
        assert_eq!(compute_span(start, SpanDelta::new(10, 0), 4).col, 4);
        assert_eq!(compute_span(start, SpanDelta::new(-10, 0), 4).col, 1);
    }

    #[test]
    fn compute_span_rows_have_no_ceiling() {
        let next = compute_span(Span { col: 1, row: 1 }, SpanDelta::new(0, 40), 4);
        assert_eq!(next.row, 41);
        let floor = compute_span(Span { col: 1, row: 3 }, SpanDelta::new(0, -9), 4);
        assert_eq!(floor.row, 1);
    }

    #[test]
    fn compute_span_survives_extreme_deltas() {
        let next = compute_span(Span { col: 3, row: 3 }, SpanDelta::new(i64::MIN, i64::MAX), 4);
        assert_eq!(next, Span { col: 1, row: u32::MAX });
    }

    #[test]
    fn clamped_treats_zero_columns_as_one() {
        assert_eq!(Span::clamped(5, 0, 0), Span { col: 1, row: 1 });
        assert_eq!(Span::clamped(0, 7, 3), Span { col: 1, row: 7 });
    }

    #[test]
    fn set_is_independent_per_breakpoint() {
        let mut spans = SpanSet::new();
        assert!(spans.set(Breakpoint::Tablet, 2, 3, 2));
        assert_eq!(spans.get(Breakpoint::Tablet), Span { col: 2, row: 3 });
        assert_eq!(spans.get(Breakpoint::Desktop), Span::UNIT);
        assert_eq!(spans.get(Breakpoint::Mobile), Span::UNIT);
    }

    #[test]
    fn set_reports_unchanged_writes() {
        let mut spans = SpanSet::new();
        assert!(!spans.set(Breakpoint::Desktop, 1, 1, 4));
        assert!(spans.set(Breakpoint::Desktop, 9, 1, 4));
        assert!(!spans.set(Breakpoint::Desktop, 4, 1, 4));
    }

    #[test]
    fn step_clamps_at_ceiling_and_floor() {
        let mut spans = SpanSet::new();
        for _ in 0..4 {
            spans.step(Breakpoint::Desktop, Axis::Column, StepDirection::Increase, 4);
        }
        assert_eq!(spans.get(Breakpoint::Desktop).col, 4);
        assert!(!spans.step(Breakpoint::Desktop, Axis::Column, StepDirection::Increase, 4));
        assert_eq!(spans.get(Breakpoint::Desktop).col, 4);

        let mut fresh = SpanSet::new();
        assert!(!fresh.step(Breakpoint::Mobile, Axis::Column, StepDirection::Decrease, 1));
        assert!(!fresh.step(Breakpoint::Mobile, Axis::Row, StepDirection::Decrease, 1));
        assert_eq!(fresh.get(Breakpoint::Mobile), Span::UNIT);
    }

    #[test]
    fn clamp_columns_shrinks_over_range_span() {
        let mut spans = SpanSet::from_spans(Span { col: 4, row: 2 }, Span::UNIT, Span::UNIT);
        assert!(spans.clamp_columns(Breakpoint::Desktop, 2));
        assert_eq!(spans.get(Breakpoint::Desktop), Span { col: 2, row: 2 });
        assert!(!spans.clamp_columns(Breakpoint::Desktop, 6));
    }
}
