use crate::logging::{LogEvent, LogFields, LogLevel, json_kv};

/// Counters describing editor activity.
#[derive(Debug, Default, Clone)]
pub struct EditorMetrics {
    events: u64,
    render_requests: u64,
    span_commits: u64,
    skipped_moves: u64,
    drag_gestures: u64,
    exports: u64,
}

impl EditorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_render_request(&mut self) {
        self.render_requests = self.render_requests.saturating_add(1);
    }

    pub fn record_span_commit(&mut self) {
        self.span_commits = self.span_commits.saturating_add(1);
    }

    pub fn record_skipped_move(&mut self) {
        self.skipped_moves = self.skipped_moves.saturating_add(1);
    }

    pub fn record_drag_gesture(&mut self) {
        self.drag_gestures = self.drag_gestures.saturating_add(1);
    }

    pub fn record_export(&mut self) {
        self.exports = self.exports.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            events: self.events,
            render_requests: self.render_requests,
            span_commits: self.span_commits,
            skipped_moves: self.skipped_moves,
            drag_gestures: self.drag_gestures,
            exports: self.exports,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub events: u64,
    pub render_requests: u64,
    pub span_commits: u64,
    pub skipped_moves: u64,
    pub drag_gestures: u64,
    pub exports: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        [
            json_kv("events", self.events),
            json_kv("render_requests", self.render_requests),
            json_kv("span_commits", self.span_commits),
            json_kv("skipped_moves", self.skipped_moves),
            json_kv("drag_gestures", self.drag_gestures),
            json_kv("exports", self.exports),
        ]
        .into_iter()
        .collect()
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "editor_metrics", self.as_fields())
    }
}
