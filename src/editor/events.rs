use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::geometry::{BoxSize, Point};
use crate::layout::{Axis, Breakpoint, ConfigPatch, StepDirection};
use crate::registry::ItemId;

/// Input delivered to the editor by the presentation layer.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// Pointer pressed on the resize handle of `item`, whose box is rendered
    /// at `item_box`.
    PointerDown {
        item: ItemId,
        position: Point,
        item_box: BoxSize,
    },
    PointerMove(Point),
    PointerUp,
    /// Click outside the grid, inspector and dialogs.
    BackgroundClick,
    Key {
        event: KeyEvent,
        in_text_input: bool,
    },
    AddItem,
    RemoveItem(ItemId),
    DeleteSelected,
    ClearAll,
    Select(Option<ItemId>),
    StepSpan {
        item: ItemId,
        axis: Axis,
        direction: StepDirection,
    },
    SetConfig {
        breakpoint: Breakpoint,
        patch: ConfigPatch,
    },
    SwitchBreakpoint(Breakpoint),
}

impl EditorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditorEvent::PointerDown { .. } => "pointer_down",
            EditorEvent::PointerMove(_) => "pointer_move",
            EditorEvent::PointerUp => "pointer_up",
            EditorEvent::BackgroundClick => "background_click",
            EditorEvent::Key { .. } => "key",
            EditorEvent::AddItem => "add_item",
            EditorEvent::RemoveItem(_) => "remove_item",
            EditorEvent::DeleteSelected => "delete_selected",
            EditorEvent::ClearAll => "clear_all",
            EditorEvent::Select(_) => "select",
            EditorEvent::StepSpan { .. } => "step_span",
            EditorEvent::SetConfig { .. } => "set_config",
            EditorEvent::SwitchBreakpoint(_) => "switch_breakpoint",
        }
    }
}

/// Whether the editor acted on an event or left it for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

impl EventFlow {
    pub fn from_handled(handled: bool) -> Self {
        if handled {
            EventFlow::Consumed
        } else {
            EventFlow::Continue
        }
    }

    pub fn is_consumed(self) -> bool {
        matches!(self, EventFlow::Consumed)
    }
}

/// Delete and Backspace presses remove the selected item.
pub fn is_delete_key(event: &KeyEvent) -> bool {
    matches!(event.code, KeyCode::Delete | KeyCode::Backspace)
        && matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}
