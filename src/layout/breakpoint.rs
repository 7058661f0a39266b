//! Responsive breakpoints and their grid configuration.
//!
//! The three breakpoints form a closed set, so per-breakpoint data is stored
//! in fixed arrays indexed by [`Breakpoint::index`] rather than in a map.
//!
//! # Example
//! ```
//! use bento_grid::layout::{Breakpoint, BreakpointTable, ConfigPatch};
//!
//! let mut table = BreakpointTable::default();
//! table.apply(Breakpoint::Tablet, ConfigPatch::new().columns(3));
//! assert_eq!(table.columns(Breakpoint::Tablet), 3);
//! assert_eq!(table.get(Breakpoint::Tablet).gap, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Media query ceiling for the tablet block of the generated stylesheet.
pub const TABLET_MAX_WIDTH: u32 = 1024;

/// Media query ceiling for the mobile block of the generated stylesheet.
pub const MOBILE_MAX_WIDTH: u32 = 600;

/// Responsive design target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub const fn index(self) -> usize {
        match self {
            Breakpoint::Desktop => 0,
            Breakpoint::Tablet => 1,
            Breakpoint::Mobile => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    /// Capitalised name shown next to the canvas.
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "Desktop",
            Breakpoint::Tablet => "Tablet",
            Breakpoint::Mobile => "Mobile",
        }
    }

    /// Canvas width used when previewing this breakpoint.
    pub const fn preview_max_width(self) -> u32 {
        match self {
            Breakpoint::Desktop => 1000,
            Breakpoint::Tablet => 768,
            Breakpoint::Mobile => 375,
        }
    }

    /// Media query ceiling, `None` for the unconditional desktop base.
    pub const fn media_max_width(self) -> Option<u32> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(TABLET_MAX_WIDTH),
            Breakpoint::Mobile => Some(MOBILE_MAX_WIDTH),
        }
    }
}

/// Grid settings for a single breakpoint.
///
/// `rows` is advisory only: rows auto-flow and never bound a row span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointConfig {
    pub columns: u32,
    pub rows: u32,
    pub gap: u32,
}

impl BreakpointConfig {
    /// Build a config, lifting zero columns/rows to 1.
    pub fn new(columns: u32, rows: u32, gap: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            gap,
        }
    }
}

/// Partial update for a [`BreakpointConfig`]; omitted fields stay unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub columns: Option<u32>,
    pub rows: Option<u32>,
    pub gap: Option<u32>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Build a patch from raw control values. Unparseable text falls back to
    /// the field's safe default instead of failing.
    pub fn from_inputs(columns: Option<&str>, rows: Option<&str>, gap: Option<&str>) -> Self {
        Self {
            columns: columns.map(parse_count),
            rows: rows.map(parse_count),
            gap: gap.map(parse_gap),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_none() && self.rows.is_none() && self.gap.is_none()
    }
}

/// Coerce control text into a count `>= 1` (columns, rows, spans).
pub fn parse_count(text: &str) -> u32 {
    leading_integer(text).map(|n| n.max(1)).unwrap_or(1) as u32
}

/// Coerce control text into a pixel gap `>= 0`.
pub fn parse_gap(text: &str) -> u32 {
    leading_integer(text).map(|n| n.max(0)).unwrap_or(0) as u32
}

// Integer prefix of the trimmed text ("12px" -> 12), saturated into u32 range.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .parse::<i64>()
        .unwrap_or(i64::from(u32::MAX))
        .min(i64::from(u32::MAX));
    Some(sign * magnitude)
}

/// Configuration for all three breakpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointTable {
    entries: [BreakpointConfig; 3],
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::new(
            BreakpointConfig::new(4, 4, 16),
            BreakpointConfig::new(2, 4, 16),
            BreakpointConfig::new(1, 4, 12),
        )
    }
}

impl BreakpointTable {
    pub fn new(desktop: BreakpointConfig, tablet: BreakpointConfig, mobile: BreakpointConfig) -> Self {
        Self {
            entries: [desktop, tablet, mobile],
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> &BreakpointConfig {
        &self.entries[breakpoint.index()]
    }

    pub fn columns(&self, breakpoint: Breakpoint) -> u32 {
        self.get(breakpoint).columns
    }

    pub fn gap(&self, breakpoint: Breakpoint) -> u32 {
        self.get(breakpoint).gap
    }

    /// Apply a partial update, enforcing `columns >= 1` and `rows >= 1`.
    /// Returns the previous entry.
    pub fn apply(&mut self, breakpoint: Breakpoint, patch: ConfigPatch) -> BreakpointConfig {
        let entry = &mut self.entries[breakpoint.index()];
        let previous = *entry;
        if let Some(columns) = patch.columns {
            entry.columns = columns.max(1);
        }
        if let Some(rows) = patch.rows {
            entry.rows = rows.max(1);
        }
        if let Some(gap) = patch.gap {
            entry.gap = gap;
        }
        previous
    }
}
