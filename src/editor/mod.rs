//! Editor state and the operations the presentation layer drives.
//!
//! [`EditorState`] owns the item store, breakpoint table, active breakpoint,
//! selection and the resize state machine. All mutation goes through
//! `&mut self`; there is no shared or global editor state, so independent
//! editors can coexist and tests can build one per case.
//!
//! Mutations that change what is on screen raise a render request, which the
//! presentation layer drains with [`EditorState::take_render_request`].
//!
//! # Example
//! ```
//! use bento_grid::{EditorConfig, EditorState, ExportKind};
//! use bento_grid::layout::{Axis, StepDirection};
//!
//! let mut editor = EditorState::new(EditorConfig::blank());
//! let id = editor.add_item();
//! editor.step_span(id, Axis::Column, StepDirection::Increase);
//!
//! let css = editor.generate(ExportKind::Stylesheet);
//! assert!(css.contains(".item-1 {\n    grid-column: span 2;\n}"));
//! ```

mod config;
mod events;

pub use config::{DEFAULT_METRICS_TARGET, EditorConfig};
pub use events::{EditorEvent, EventFlow, is_delete_key};

use std::io::Write;

use crossterm::event::KeyEvent;
use serde::Serialize;
use serde_json::Value;

use crate::codegen::{self, ExportKind};
use crate::error::Result;
use crate::geometry::{BoxSize, Point};
use crate::layout::{
    Axis, Breakpoint, BreakpointConfig, BreakpointTable, ConfigPatch, Span, StepDirection,
};
use crate::logging::{LogLevel, Logger, json_kv};
use crate::metrics::{EditorMetrics, MetricSnapshot};
use crate::registry::{Item, ItemId, LayoutItemStore};
use crate::resize::{CellGeometry, DragAnchor, ResizeController, ResizeOutcome, ResizeState};

const LOG_TARGET: &str = "bento::editor";
const RESIZE_LOG_TARGET: &str = "bento::editor.resize";

/// One item as the renderer should draw it at the active breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderableItem {
    pub id: ItemId,
    pub span: Span,
    pub selected: bool,
}

/// Snapshot consumed by the renderer to draw the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderableState {
    pub breakpoint: Breakpoint,
    pub columns: u32,
    pub gap: u32,
    pub preview_max_width: u32,
    pub items: Vec<RenderableItem>,
}

impl RenderableState {
    pub fn selected(&self) -> Option<&RenderableItem> {
        self.items.iter().find(|item| item.selected)
    }
}

/// Inspector read-out for the selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InspectorView {
    pub id: ItemId,
    pub breakpoint: Breakpoint,
    pub span: Span,
}

pub struct EditorState {
    store: LayoutItemStore,
    breakpoints: BreakpointTable,
    active: Breakpoint,
    resize: ResizeController,
    logger: Option<Logger>,
    metrics: EditorMetrics,
    metrics_target: String,
    render_requested: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let EditorConfig {
            breakpoints,
            active_breakpoint,
            seed_starter_layout,
            logger,
            metrics_target,
        } = config;

        let mut store = if seed_starter_layout {
            LayoutItemStore::starter()
        } else {
            LayoutItemStore::new()
        };
        // Seeded spans must respect whatever column counts were configured.
        for item in store.iter_mut() {
            for breakpoint in Breakpoint::ALL {
                item.spans
                    .clamp_columns(breakpoint, breakpoints.columns(breakpoint));
            }
        }

        let editor = Self {
            store,
            breakpoints,
            active: active_breakpoint,
            resize: ResizeController::new(),
            logger,
            metrics: EditorMetrics::new(),
            metrics_target,
            render_requested: true,
        };
        editor.log(
            LogLevel::Info,
            "editor_started",
            [
                json_kv("items", editor.store.len()),
                json_kv("breakpoint", editor.active.as_str()),
            ],
        );
        editor
    }

    /// Default breakpoints, empty canvas.
    pub fn blank() -> Self {
        Self::new(EditorConfig::blank())
    }

    pub fn store(&self) -> &LayoutItemStore {
        &self.store
    }

    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    pub fn breakpoint_config(&self, breakpoint: Breakpoint) -> &BreakpointConfig {
        self.breakpoints.get(breakpoint)
    }

    pub fn active_breakpoint(&self) -> Breakpoint {
        self.active
    }

    pub fn selection(&self) -> Option<ItemId> {
        self.store.selection()
    }

    pub fn resize_state(&self) -> &ResizeState {
        self.resize.state()
    }

    pub fn metrics_snapshot(&self) -> MetricSnapshot {
        self.metrics.snapshot()
    }

    /// Push a metrics snapshot through the configured logger.
    pub fn emit_metrics(&self) {
        if let Some(logger) = self.logger.as_ref() {
            let event = self.metrics.snapshot().to_log_event(&self.metrics_target);
            let _ = logger.log_event(event);
        }
    }

    /// Returns `true` once per batch of visible changes.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    // --- span model ---

    pub fn get_span(&self, id: ItemId, breakpoint: Breakpoint) -> Option<Span> {
        self.store.find(id).map(|item| item.spans.get(breakpoint))
    }

    /// Store a span for one breakpoint, clamped to that breakpoint's columns.
    /// Returns `true` if the stored value changed.
    pub fn set_span(&mut self, id: ItemId, breakpoint: Breakpoint, col: u32, row: u32) -> bool {
        let max_columns = self.breakpoints.columns(breakpoint);
        let Some(item) = self.store.find_mut(id) else {
            return false;
        };
        let changed = item.spans.set(breakpoint, col, row, max_columns);
        if changed {
            let span = item.spans.get(breakpoint);
            self.on_span_written(LOG_TARGET, id, breakpoint, span);
        }
        changed
    }

    /// Increment or decrement one axis at the active breakpoint.
    pub fn step_span(&mut self, id: ItemId, axis: Axis, direction: StepDirection) -> bool {
        let breakpoint = self.active;
        let max_columns = self.breakpoints.columns(breakpoint);
        let Some(item) = self.store.find_mut(id) else {
            return false;
        };
        let changed = item.spans.step(breakpoint, axis, direction, max_columns);
        if changed {
            let span = item.spans.get(breakpoint);
            self.on_span_written(LOG_TARGET, id, breakpoint, span);
        }
        changed
    }

    fn on_span_written(&mut self, target: &str, id: ItemId, breakpoint: Breakpoint, span: Span) {
        self.metrics.record_span_commit();
        self.request_render();
        self.log_to(
            target,
            LogLevel::Debug,
            "span_committed",
            [
                json_kv("item", id.get()),
                json_kv("breakpoint", breakpoint.as_str()),
                json_kv("col", span.col),
                json_kv("row", span.row),
            ],
        );
    }

    // --- breakpoint configuration ---

    /// Partially update a breakpoint. Shrinking its column count re-clamps
    /// every stored span at that breakpoint. Returns `true` if anything
    /// changed.
    pub fn set_breakpoint_config(&mut self, breakpoint: Breakpoint, patch: ConfigPatch) -> bool {
        let previous = self.breakpoints.apply(breakpoint, patch);
        let current = *self.breakpoints.get(breakpoint);
        if current == previous {
            return false;
        }

        let mut reclamped = 0usize;
        if current.columns < previous.columns {
            for item in self.store.iter_mut() {
                if item.spans.clamp_columns(breakpoint, current.columns) {
                    reclamped += 1;
                }
            }
        }

        if breakpoint == self.active {
            self.request_render();
        }
        self.log(
            LogLevel::Debug,
            "breakpoint_configured",
            [
                json_kv("breakpoint", breakpoint.as_str()),
                json_kv("columns", current.columns),
                json_kv("rows", current.rows),
                json_kv("gap", current.gap),
                json_kv("reclamped", reclamped),
            ],
        );
        true
    }

    /// Change the breakpoint being edited. An in-flight drag ends here since
    /// its handle is redrawn for the new breakpoint.
    pub fn switch_breakpoint(&mut self, breakpoint: Breakpoint) -> bool {
        if breakpoint == self.active {
            return false;
        }
        self.release_drag("breakpoint_switched");
        self.active = breakpoint;
        self.request_render();
        self.log(
            LogLevel::Debug,
            "breakpoint_switched",
            [json_kv("breakpoint", breakpoint.as_str())],
        );
        true
    }

    // --- item store ---

    pub fn add_item(&mut self) -> ItemId {
        let id = self.store.add();
        self.request_render();
        self.log(
            LogLevel::Debug,
            "item_added",
            [json_kv("item", id.get()), json_kv("items", self.store.len())],
        );
        id
    }

    /// Remove an item; a no-op for unknown ids. Clears the selection when it
    /// pointed at the removed item.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let was_selected = self.store.is_selected(id);
        let removed = self.store.remove(id);
        if removed || was_selected {
            self.request_render();
        }
        if removed {
            self.log(
                LogLevel::Debug,
                "item_removed",
                [json_kv("item", id.get()), json_kv("items", self.store.len())],
            );
        }
        removed
    }

    /// Remove whatever is selected and clear the selection.
    pub fn delete_selected(&mut self) -> bool {
        match self.store.selection() {
            Some(id) => {
                self.remove_item(id);
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.store.clear();
        self.request_render();
        self.log(LogLevel::Debug, "items_cleared", [json_kv("removed", removed)]);
        removed
    }

    pub fn select(&mut self, id: Option<ItemId>) {
        if self.store.selection() == id {
            return;
        }
        self.store.select(id);
        self.request_render();
        self.log(
            LogLevel::Trace,
            "selection_changed",
            [json_kv("item", id.map(ItemId::get))],
        );
    }

    pub fn background_click(&mut self) -> bool {
        let had_selection = self.store.selection().is_some();
        self.select(None);
        had_selection
    }

    /// Delete/Backspace removes the selection unless focus is in a text
    /// input, where the key belongs to the input.
    pub fn handle_key(&mut self, event: &KeyEvent, in_text_input: bool) -> EventFlow {
        if in_text_input || !is_delete_key(event) {
            return EventFlow::Continue;
        }
        EventFlow::from_handled(self.delete_selected())
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.store.find(id)
    }

    pub fn inspector(&self) -> Option<InspectorView> {
        self.store.selected().map(|item| InspectorView {
            id: item.id(),
            breakpoint: self.active,
            span: item.spans.get(self.active),
        })
    }

    // --- drag to resize ---

    /// Begin a resize gesture on the selected item's handle. Returns `false`
    /// (and stays idle) for unknown or unselected items.
    pub fn pointer_down_on_handle(&mut self, id: ItemId, position: Point, item_box: BoxSize) -> bool {
        if !self.store.is_selected(id) {
            return false;
        }
        let breakpoint = self.active;
        let Some(start_span) = self.get_span(id, breakpoint) else {
            return false;
        };
        let geometry = CellGeometry::measure(item_box, self.breakpoints.gap(breakpoint), start_span);
        self.resize
            .begin(DragAnchor::new(id, breakpoint, position, start_span, geometry));
        self.metrics.record_drag_gesture();
        self.log_to(
            RESIZE_LOG_TARGET,
            LogLevel::Debug,
            "drag_started",
            [
                json_kv("item", id.get()),
                json_kv("breakpoint", breakpoint.as_str()),
                json_kv("unit_width", geometry.unit_width),
                json_kv("unit_height", geometry.unit_height),
            ],
        );
        true
    }

    /// Feed a pointer move into the active gesture, writing the new span
    /// only when it differs from the stored one.
    pub fn pointer_move(&mut self, position: Point) -> ResizeOutcome {
        let Some(anchor) = self.resize.anchor().copied() else {
            return ResizeOutcome::Ignored;
        };
        let Some(current) = self.get_span(anchor.item, anchor.breakpoint) else {
            return ResizeOutcome::Ignored;
        };
        let max_columns = self.breakpoints.columns(anchor.breakpoint);
        let outcome = self.resize.on_move(position, current, max_columns);
        match outcome {
            ResizeOutcome::Commit {
                item,
                breakpoint,
                span,
            } => {
                if let Some(entry) = self.store.find_mut(item) {
                    entry.spans.replace(breakpoint, span);
                    self.on_span_written(RESIZE_LOG_TARGET, item, breakpoint, span);
                }
            }
            ResizeOutcome::Unchanged => self.metrics.record_skipped_move(),
            ResizeOutcome::Ignored => {}
        }
        outcome
    }

    /// End the gesture; the last committed span stands.
    pub fn pointer_release(&mut self) -> bool {
        self.release_drag("drag_finished")
    }

    fn release_drag(&mut self, message: &str) -> bool {
        let Some(anchor) = self.resize.release() else {
            return false;
        };
        let final_span = self.get_span(anchor.item, anchor.breakpoint);
        self.log_to(
            RESIZE_LOG_TARGET,
            LogLevel::Debug,
            message,
            [
                json_kv("item", anchor.item.get()),
                json_kv("col", final_span.map(|span| span.col)),
                json_kv("row", final_span.map(|span| span.row)),
            ],
        );
        true
    }

    // --- read side ---

    pub fn renderable_state(&self) -> RenderableState {
        let config = self.breakpoints.get(self.active);
        let items = self
            .store
            .iter()
            .map(|item| {
                let span = item.spans.get(self.active);
                RenderableItem {
                    id: item.id(),
                    span: Span {
                        col: span.col.min(config.columns),
                        row: span.row,
                    },
                    selected: self.store.is_selected(item.id()),
                }
            })
            .collect();
        RenderableState {
            breakpoint: self.active,
            columns: config.columns,
            gap: config.gap,
            preview_max_width: self.active.preview_max_width(),
            items,
        }
    }

    pub fn renderable_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.renderable_state())?)
    }

    pub fn generate(&self, kind: ExportKind) -> String {
        codegen::generate(kind, &self.store, &self.breakpoints)
    }

    /// Stream an export to `writer` (clipboard or file glue).
    pub fn write_export(&mut self, writer: &mut impl Write, kind: ExportKind) -> Result<()> {
        codegen::write_artifact(writer, kind, &self.store, &self.breakpoints)?;
        self.metrics.record_export();
        self.log(
            LogLevel::Info,
            "export_written",
            [
                json_kv("kind", kind.as_str()),
                json_kv("items", self.store.len()),
            ],
        );
        Ok(())
    }

    // --- event entry points ---

    pub fn dispatch(&mut self, event: EditorEvent) -> EventFlow {
        let name = event.name();
        let flow = match event {
            EditorEvent::PointerDown {
                item,
                position,
                item_box,
            } => EventFlow::from_handled(self.pointer_down_on_handle(item, position, item_box)),
            EditorEvent::PointerMove(position) => {
                EventFlow::from_handled(self.pointer_move(position) != ResizeOutcome::Ignored)
            }
            EditorEvent::PointerUp => EventFlow::from_handled(self.pointer_release()),
            EditorEvent::BackgroundClick => EventFlow::from_handled(self.background_click()),
            EditorEvent::Key {
                event,
                in_text_input,
            } => self.handle_key(&event, in_text_input),
            EditorEvent::AddItem => {
                self.add_item();
                EventFlow::Consumed
            }
            EditorEvent::RemoveItem(id) => EventFlow::from_handled(self.remove_item(id)),
            EditorEvent::DeleteSelected => EventFlow::from_handled(self.delete_selected()),
            EditorEvent::ClearAll => {
                self.clear_all();
                EventFlow::Consumed
            }
            EditorEvent::Select(id) => {
                self.select(id);
                EventFlow::Consumed
            }
            EditorEvent::StepSpan {
                item,
                axis,
                direction,
            } => EventFlow::from_handled(self.step_span(item, axis, direction)),
            EditorEvent::SetConfig { breakpoint, patch } => {
                EventFlow::from_handled(self.set_breakpoint_config(breakpoint, patch))
            }
            EditorEvent::SwitchBreakpoint(breakpoint) => {
                EventFlow::from_handled(self.switch_breakpoint(breakpoint))
            }
        };
        self.metrics.record_event();
        self.log(
            LogLevel::Trace,
            "event_dispatched",
            [
                json_kv("event", name),
                json_kv("consumed", flow.is_consumed()),
            ],
        );
        flow
    }

    /// Dispatch events in delivery order, returning how many were consumed.
    pub fn run_scripted<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = EditorEvent>,
    {
        events
            .into_iter()
            .map(|event| self.dispatch(event))
            .filter(|flow| flow.is_consumed())
            .count()
    }

    fn request_render(&mut self) {
        self.render_requested = true;
        self.metrics.record_render_request();
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.log_to(LOG_TARGET, level, message, fields);
    }

    fn log_to<I>(&self, target: &str, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_with_fields(level, target, message, fields);
        }
    }
}

#[cfg(test)]
mod tests;
