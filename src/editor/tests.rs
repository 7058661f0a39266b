use super::*;
use crate::logging::MemorySink;
use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::json;

fn editor_with_item() -> (EditorState, ItemId) {
    let mut editor = EditorState::blank();
    let id = editor.add_item();
    editor.take_render_request();
    (editor, id)
}

// A 1x1 desktop item is 200x100 with a 16px gap: strides of 216 / 116.
fn start_drag(editor: &mut EditorState, id: ItemId) {
    editor.select(Some(id));
    assert!(editor.pointer_down_on_handle(id, Point::new(0.0, 0.0), BoxSize::new(200.0, 100.0)));
    editor.take_render_request();
}

#[test]
fn spans_stay_within_bounds_after_any_write() {
    let (mut editor, id) = editor_with_item();
    editor.set_span(id, Breakpoint::Desktop, 0, 0);
    editor.set_span(id, Breakpoint::Tablet, 99, 5);
    editor.set_span(id, Breakpoint::Mobile, 3, 0);
    for _ in 0..10 {
        editor.step_span(id, Axis::Column, StepDirection::Increase);
        editor.step_span(id, Axis::Row, StepDirection::Decrease);
    }
    for breakpoint in Breakpoint::ALL {
        let span = editor.get_span(id, breakpoint).unwrap();
        assert!(span.col >= 1);
        assert!(span.col <= editor.breakpoints().columns(breakpoint));
        assert!(span.row >= 1);
    }
    assert_eq!(editor.get_span(id, Breakpoint::Tablet), Some(Span { col: 2, row: 5 }));
}

#[test]
fn breakpoints_are_independent() {
    let (mut editor, id) = editor_with_item();
    editor.set_span(id, Breakpoint::Tablet, 2, 3);
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span::UNIT));
    assert_eq!(editor.get_span(id, Breakpoint::Mobile), Some(Span::UNIT));

    editor.switch_breakpoint(Breakpoint::Mobile);
    editor.step_span(id, Axis::Row, StepDirection::Increase);
    assert_eq!(editor.get_span(id, Breakpoint::Mobile), Some(Span { col: 1, row: 2 }));
    assert_eq!(editor.get_span(id, Breakpoint::Tablet), Some(Span { col: 2, row: 3 }));
}

#[test]
fn stepping_columns_saturates_at_ceiling_and_floor() {
    let (mut editor, id) = editor_with_item();
    let columns = editor.breakpoints().columns(Breakpoint::Desktop);
    for _ in 0..columns {
        editor.step_span(id, Axis::Column, StepDirection::Increase);
    }
    assert_eq!(editor.get_span(id, Breakpoint::Desktop).unwrap().col, columns);
    assert!(!editor.step_span(id, Axis::Column, StepDirection::Increase));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop).unwrap().col, columns);

    editor.set_span(id, Breakpoint::Desktop, 1, 3);
    assert!(!editor.step_span(id, Axis::Column, StepDirection::Decrease));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 1, row: 3 }));
}

#[test]
fn step_span_on_unknown_item_is_noop() {
    let (mut editor, _) = editor_with_item();
    assert!(!editor.step_span(ItemId::new(77), Axis::Row, StepDirection::Increase));
    assert!(!editor.take_render_request());
}

#[test]
fn sub_unit_drag_commits_nothing() {
    let (mut editor, id) = editor_with_item();
    start_drag(&mut editor, id);

    for x in [10.0, 50.0, 90.0, 107.0] {
        assert_eq!(editor.pointer_move(Point::new(x, 40.0)), ResizeOutcome::Unchanged);
    }
    assert!(!editor.take_render_request());
    assert_eq!(editor.metrics_snapshot().span_commits, 0);
    assert_eq!(editor.metrics_snapshot().skipped_moves, 4);

    let outcome = editor.pointer_move(Point::new(108.0, 40.0));
    assert!(matches!(outcome, ResizeOutcome::Commit { .. }));
    assert!(editor.take_render_request());
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 2, row: 1 }));
    assert_eq!(editor.metrics_snapshot().span_commits, 1);
}

#[test]
fn drag_updates_live_and_release_keeps_last_value() {
    let (mut editor, id) = editor_with_item();
    start_drag(&mut editor, id);

    editor.pointer_move(Point::new(450.0, 0.0));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 3, row: 1 }));
    editor.pointer_move(Point::new(9000.0, 240.0));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 4, row: 3 }));
    editor.pointer_move(Point::new(220.0, 120.0));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 2, row: 2 }));

    assert!(editor.pointer_release());
    assert!(matches!(editor.resize_state(), ResizeState::Idle));
    assert_eq!(editor.pointer_move(Point::new(0.0, 0.0)), ResizeOutcome::Ignored);
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 2, row: 2 }));
}

#[test]
fn drag_from_wide_item_uses_derived_unit_size() {
    let (mut editor, id) = editor_with_item();
    editor.set_span(id, Breakpoint::Desktop, 2, 1);
    editor.select(Some(id));
    // Two columns at 208px plus one 16px gap.
    editor.pointer_down_on_handle(id, Point::new(500.0, 0.0), BoxSize::new(432.0, 100.0));
    editor.pointer_move(Point::new(500.0 - 224.0, 0.0));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 1, row: 1 }));
}

#[test]
fn drag_respects_active_breakpoint_columns() {
    let (mut editor, id) = editor_with_item();
    editor.switch_breakpoint(Breakpoint::Tablet);
    start_drag(&mut editor, id);
    editor.pointer_move(Point::new(5000.0, 0.0));
    assert_eq!(editor.get_span(id, Breakpoint::Tablet), Some(Span { col: 2, row: 1 }));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span::UNIT));
}

#[test]
fn handle_requires_selected_item() {
    let (mut editor, id) = editor_with_item();
    assert!(!editor.pointer_down_on_handle(id, Point::new(0.0, 0.0), BoxSize::new(10.0, 10.0)));
    editor.select(Some(ItemId::new(99)));
    assert!(!editor.pointer_down_on_handle(
        ItemId::new(99),
        Point::new(0.0, 0.0),
        BoxSize::new(10.0, 10.0)
    ));
    assert!(matches!(editor.resize_state(), ResizeState::Idle));
}

#[test]
fn removing_dragged_item_ignores_further_moves() {
    let (mut editor, id) = editor_with_item();
    start_drag(&mut editor, id);
    editor.remove_item(id);
    assert_eq!(editor.pointer_move(Point::new(500.0, 0.0)), ResizeOutcome::Ignored);
    assert!(editor.pointer_release());
}

#[test]
fn switching_breakpoint_ends_drag() {
    let (mut editor, id) = editor_with_item();
    start_drag(&mut editor, id);
    assert!(editor.switch_breakpoint(Breakpoint::Mobile));
    assert!(matches!(editor.resize_state(), ResizeState::Idle));
    assert!(!editor.switch_breakpoint(Breakpoint::Mobile));
}

#[test]
fn removing_selected_item_clears_selection() {
    let (mut editor, id) = editor_with_item();
    let other = editor.add_item();
    editor.select(Some(id));
    assert!(editor.remove_item(id));
    assert_eq!(editor.selection(), None);
    let state = editor.renderable_state();
    assert!(state.selected().is_none());
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, other);
}

#[test]
fn background_click_and_clear_drop_selection() {
    let (mut editor, id) = editor_with_item();
    editor.select(Some(id));
    assert!(editor.background_click());
    assert_eq!(editor.selection(), None);
    assert!(!editor.background_click());

    editor.select(Some(id));
    assert_eq!(editor.clear_all(), 1);
    assert_eq!(editor.selection(), None);
    assert!(editor.store().is_empty());
}

#[test]
fn delete_key_removes_selection_outside_text_inputs() {
    let (mut editor, id) = editor_with_item();
    let delete = KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE);
    let backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);

    assert_eq!(editor.handle_key(&delete, false), EventFlow::Continue);

    editor.select(Some(id));
    assert_eq!(editor.handle_key(&backspace, true), EventFlow::Continue);
    assert!(editor.find(id).is_some());

    assert_eq!(editor.handle_key(&backspace, false), EventFlow::Consumed);
    assert!(editor.find(id).is_none());
    assert_eq!(editor.selection(), None);
}

#[test]
fn unknown_selection_shows_empty_inspector() {
    let (mut editor, id) = editor_with_item();
    editor.select(Some(ItemId::new(1234)));
    assert!(editor.inspector().is_none());
    assert!(editor.renderable_state().selected().is_none());

    editor.select(Some(id));
    editor.set_span(id, Breakpoint::Desktop, 3, 2);
    assert_eq!(
        editor.inspector(),
        Some(InspectorView {
            id,
            breakpoint: Breakpoint::Desktop,
            span: Span { col: 3, row: 2 },
        })
    );
}

#[test]
fn config_patch_leaves_omitted_fields() {
    let (mut editor, _) = editor_with_item();
    assert!(editor.set_breakpoint_config(Breakpoint::Tablet, ConfigPatch::new().gap(4)));
    let tablet = editor.breakpoint_config(Breakpoint::Tablet);
    assert_eq!((tablet.columns, tablet.rows, tablet.gap), (2, 4, 4));
    assert!(!editor.set_breakpoint_config(Breakpoint::Tablet, ConfigPatch::new().gap(4)));
    assert!(!editor.set_breakpoint_config(Breakpoint::Tablet, ConfigPatch::new()));
}

#[test]
fn shrinking_columns_reclamps_stored_spans() {
    let (mut editor, id) = editor_with_item();
    editor.set_span(id, Breakpoint::Desktop, 4, 2);
    editor.set_span(id, Breakpoint::Tablet, 2, 1);
    editor.set_breakpoint_config(Breakpoint::Desktop, ConfigPatch::new().columns(2));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 2, row: 2 }));
    assert_eq!(editor.get_span(id, Breakpoint::Tablet), Some(Span { col: 2, row: 1 }));

    // Growing again does not restore the old span.
    editor.set_breakpoint_config(Breakpoint::Desktop, ConfigPatch::new().columns(6));
    assert_eq!(editor.get_span(id, Breakpoint::Desktop), Some(Span { col: 2, row: 2 }));
}

#[test]
fn renderable_state_reflects_active_breakpoint() {
    let mut editor = EditorState::new(EditorConfig::default());
    editor.switch_breakpoint(Breakpoint::Tablet);
    let state = editor.renderable_state();
    assert_eq!(state.breakpoint, Breakpoint::Tablet);
    assert_eq!(state.columns, 2);
    assert_eq!(state.gap, 16);
    assert_eq!(state.preview_max_width, 768);
    let spans: Vec<_> = state.items.iter().map(|item| (item.span.col, item.span.row)).collect();
    assert_eq!(spans, vec![(1, 1), (2, 1), (1, 1), (1, 1), (2, 1)]);
}

#[test]
fn renderable_json_is_serializable() {
    let (mut editor, id) = editor_with_item();
    editor.select(Some(id));
    let value: Value = serde_json::from_str(&editor.renderable_json().unwrap()).unwrap();
    assert_eq!(value["breakpoint"], json!("desktop"));
    assert_eq!(value["items"][0]["selected"], json!(true));
    assert_eq!(value["items"][0]["span"], json!({ "col": 1, "row": 1 }));
}

#[test]
fn starter_layout_respects_configured_columns() {
    let mut breakpoints = BreakpointTable::default();
    breakpoints.apply(Breakpoint::Desktop, ConfigPatch::new().columns(1));
    let editor = EditorState::new(EditorConfig::default().with_breakpoints(breakpoints));
    for item in editor.store().iter() {
        assert_eq!(item.spans.get(Breakpoint::Desktop).col, 1);
    }
}

#[test]
fn generate_covers_all_items_in_order() {
    let mut editor = EditorState::blank();
    for _ in 0..4 {
        editor.add_item();
    }
    let markup = editor.generate(ExportKind::Markup);
    assert_eq!(markup.matches("class=\"bento-item").count(), 4);
    let positions: Vec<_> = (1..=4)
        .map(|n| markup.find(&format!("item-{n}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn example_scenario_clamps_tablet_block() {
    let (mut editor, id) = editor_with_item();
    editor.set_span(id, Breakpoint::Desktop, 3, 1);
    editor.set_span(id, Breakpoint::Tablet, 3, 1);
    let css = editor.generate(ExportKind::Stylesheet);
    let (base, rest) = css.split_once("@media (max-width: 1024px)").unwrap();
    assert!(base.contains(".item-1 {\n    grid-column: span 3;\n}"));
    let (tablet, _) = rest.split_once("@media (max-width: 600px)").unwrap();
    assert!(tablet.contains("grid-column: span 2;"));
}

#[test]
fn write_export_records_metrics_and_logs() {
    let sink = MemorySink::new();
    let mut editor = EditorState::new(EditorConfig::blank().with_logger(Logger::new(sink.clone())));
    editor.add_item();
    let mut buffer = Vec::new();
    editor.write_export(&mut buffer, ExportKind::Combined).unwrap();
    assert!(String::from_utf8(buffer).unwrap().starts_with("<style>\n"));
    assert_eq!(editor.metrics_snapshot().exports, 1);

    let messages = sink.messages();
    assert_eq!(messages.first().map(String::as_str), Some("editor_started"));
    assert!(messages.iter().any(|m| m == "item_added"));
    assert!(messages.iter().any(|m| m == "export_written"));

    editor.emit_metrics();
    let last = sink.events().pop().unwrap();
    assert_eq!(last.target, DEFAULT_METRICS_TARGET);
    assert_eq!(last.field("exports"), Some(&json!(1)));
}

#[test]
fn resize_logs_use_resize_target() {
    let sink = MemorySink::new();
    let mut editor = EditorState::new(EditorConfig::blank().with_logger(Logger::new(sink.clone())));
    let id = editor.add_item();
    start_drag(&mut editor, id);
    editor.pointer_move(Point::new(216.0, 0.0));
    editor.pointer_release();
    let resize: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|event| event.target == "bento::editor.resize")
        .map(|event| event.message)
        .collect();
    assert_eq!(resize, vec!["drag_started", "span_committed", "drag_finished"]);
}

#[test]
fn scripted_session_drives_editor() {
    let mut editor = EditorState::blank();
    let first = ItemId::new(1);
    let consumed = editor.run_scripted([
        EditorEvent::AddItem,
        EditorEvent::AddItem,
        EditorEvent::Select(Some(first)),
        EditorEvent::PointerDown {
            item: first,
            position: Point::new(0.0, 0.0),
            item_box: BoxSize::new(200.0, 100.0),
        },
        EditorEvent::PointerMove(Point::new(20.0, 0.0)),
        EditorEvent::PointerMove(Point::new(230.0, 0.0)),
        EditorEvent::PointerUp,
        EditorEvent::StepSpan {
            item: first,
            axis: Axis::Row,
            direction: StepDirection::Increase,
        },
        EditorEvent::SetConfig {
            breakpoint: Breakpoint::Desktop,
            patch: ConfigPatch::from_inputs(None, None, Some("abc")),
        },
        EditorEvent::BackgroundClick,
        EditorEvent::BackgroundClick,
    ]);
    assert_eq!(consumed, 11 - 1);
    assert_eq!(editor.get_span(first, Breakpoint::Desktop), Some(Span { col: 2, row: 2 }));
    assert_eq!(editor.breakpoint_config(Breakpoint::Desktop).gap, 0);
    assert_eq!(editor.metrics_snapshot().events, 11);
}
