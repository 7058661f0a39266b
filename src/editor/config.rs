use crate::layout::{Breakpoint, BreakpointTable};
use crate::logging::Logger;

pub const DEFAULT_METRICS_TARGET: &str = "bento::editor.metrics";

/// Configuration knobs for a new [`EditorState`](super::EditorState).
#[derive(Clone)]
pub struct EditorConfig {
    /// Initial grid settings for every breakpoint.
    pub breakpoints: BreakpointTable,
    /// Breakpoint shown and edited first.
    pub active_breakpoint: Breakpoint,
    /// Seed the five-item starter layout instead of an empty canvas.
    pub seed_starter_layout: bool,
    /// Optional structured logger used by the editor.
    pub logger: Option<Logger>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::default(),
            active_breakpoint: Breakpoint::Desktop,
            seed_starter_layout: true,
            logger: None,
            metrics_target: DEFAULT_METRICS_TARGET.to_string(),
        }
    }
}

impl EditorConfig {
    /// Default breakpoints with an empty canvas.
    pub fn blank() -> Self {
        Self {
            seed_starter_layout: false,
            ..Self::default()
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: BreakpointTable) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_active_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.active_breakpoint = breakpoint;
        self
    }

    pub fn with_metrics_target(mut self, target: impl Into<String>) -> Self {
        self.metrics_target = target.into();
        self
    }
}
