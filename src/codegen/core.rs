use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{Breakpoint, BreakpointTable, Span};
use crate::registry::LayoutItemStore;

pub const GRID_CLASS: &str = "bento-grid";
pub const ITEM_CLASS: &str = "bento-item";
const HEADER_COMMENT: &str = "/* Bento Grid - Generated by BentoBlocks */";
const INDENT: &str = "    ";

/// Artifact kinds offered by the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Markup,
    Stylesheet,
    Combined,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Markup, ExportKind::Stylesheet, ExportKind::Combined];

    pub const fn as_str(self) -> &'static str {
        match self {
            ExportKind::Markup => "markup",
            ExportKind::Stylesheet => "stylesheet",
            ExportKind::Combined => "combined",
        }
    }
}

/// Positional class for the item at zero-based `index`.
pub fn item_class(index: usize) -> String {
    format!("item-{}", index + 1)
}

/// Markup artifact: one block element per item, in store order.
pub struct Markup<'a> {
    items: &'a LayoutItemStore,
}

impl<'a> Markup<'a> {
    pub fn new(items: &'a LayoutItemStore) -> Self {
        Self { items }
    }
}

impl fmt::Display for Markup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<div class=\"{GRID_CLASS}\">")?;
        for (index, _item) in self.items.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{INDENT}<div class=\"{ITEM_CLASS} {}\"></div>", item_class(index))?;
        }
        write!(f, "\n</div>")
    }
}

/// Stylesheet artifact covering all three breakpoints.
///
/// Desktop is the unconditional base: only items deviating from `{1, 1}` get
/// an override there. Tablet and mobile restate every item explicitly.
pub struct Stylesheet<'a> {
    items: &'a LayoutItemStore,
    config: &'a BreakpointTable,
}

impl<'a> Stylesheet<'a> {
    pub fn new(items: &'a LayoutItemStore, config: &'a BreakpointTable) -> Self {
        Self { items, config }
    }

    fn spans(&self, breakpoint: Breakpoint) -> impl Iterator<Item = (usize, Span)> + '_ {
        let columns = self.config.columns(breakpoint);
        self.items.iter().enumerate().map(move |(index, item)| {
            let span = item.spans.get(breakpoint);
            (
                index,
                Span {
                    col: span.col.min(columns),
                    row: span.row,
                },
            )
        })
    }

    fn write_base(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desktop = self.config.get(Breakpoint::Desktop);
        write!(f, "{HEADER_COMMENT}\n\n")?;
        writeln!(f, ".{GRID_CLASS} {{")?;
        writeln!(f, "{INDENT}display: grid;")?;
        writeln!(f, "{INDENT}/* Desktop (Default) */")?;
        writeln!(f, "{INDENT}grid-template-columns: repeat({}, 1fr);", desktop.columns)?;
        writeln!(f, "{INDENT}gap: {}px;", desktop.gap)?;
        writeln!(f, "{INDENT}width: 100%;")?;
        writeln!(f, "{INDENT}max-width: 1200px;")?;
        write!(f, "}}\n\n")?;

        writeln!(f, ".{ITEM_CLASS} {{")?;
        writeln!(f, "{INDENT}background: #f0f0f0;")?;
        writeln!(f, "{INDENT}border-radius: 16px;")?;
        writeln!(f, "{INDENT}min-height: 100px;")?;
        write!(f, "}}\n\n")?;

        for (index, span) in self.spans(Breakpoint::Desktop) {
            if span.is_unit() {
                continue;
            }
            writeln!(f, ".{} {{", item_class(index))?;
            if span.col > 1 {
                writeln!(f, "{INDENT}grid-column: span {};", span.col)?;
            }
            if span.row > 1 {
                writeln!(f, "{INDENT}grid-row: span {};", span.row)?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }

    fn write_media_block(
        &self,
        f: &mut fmt::Formatter<'_>,
        breakpoint: Breakpoint,
        max_width: u32,
    ) -> fmt::Result {
        let config = self.config.get(breakpoint);
        write!(f, "\n/* {} */\n", breakpoint.label())?;
        writeln!(f, "@media (max-width: {max_width}px) {{")?;
        writeln!(f, "{INDENT}.{GRID_CLASS} {{")?;
        writeln!(
            f,
            "{INDENT}{INDENT}grid-template-columns: repeat({}, 1fr);",
            config.columns
        )?;
        writeln!(f, "{INDENT}{INDENT}gap: {}px;", config.gap)?;
        writeln!(f, "{INDENT}}}")?;
        for (index, span) in self.spans(breakpoint) {
            writeln!(f, "{INDENT}.{} {{", item_class(index))?;
            writeln!(f, "{INDENT}{INDENT}grid-column: span {};", span.col)?;
            writeln!(f, "{INDENT}{INDENT}grid-row: span {};", span.row)?;
            writeln!(f, "{INDENT}}}")?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_base(f)?;
        for breakpoint in [Breakpoint::Tablet, Breakpoint::Mobile] {
            if let Some(max_width) = breakpoint.media_max_width() {
                self.write_media_block(f, breakpoint, max_width)?;
            }
        }
        Ok(())
    }
}

/// Stylesheet embedded in a `<style>` block ahead of the markup.
pub struct Combined<'a> {
    markup: Markup<'a>,
    stylesheet: Stylesheet<'a>,
}

impl<'a> Combined<'a> {
    pub fn new(items: &'a LayoutItemStore, config: &'a BreakpointTable) -> Self {
        Self {
            markup: Markup::new(items),
            stylesheet: Stylesheet::new(items, config),
        }
    }
}

impl fmt::Display for Combined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<style>\n{}</style>\n\n{}", self.stylesheet, self.markup)
    }
}

pub fn generate_markup(items: &LayoutItemStore) -> String {
    Markup::new(items).to_string()
}

pub fn generate_stylesheet(items: &LayoutItemStore, config: &BreakpointTable) -> String {
    Stylesheet::new(items, config).to_string()
}

pub fn generate_combined(items: &LayoutItemStore, config: &BreakpointTable) -> String {
    Combined::new(items, config).to_string()
}

/// Render one artifact kind to text.
pub fn generate(kind: ExportKind, items: &LayoutItemStore, config: &BreakpointTable) -> String {
    match kind {
        ExportKind::Markup => generate_markup(items),
        ExportKind::Stylesheet => generate_stylesheet(items, config),
        ExportKind::Combined => generate_combined(items, config),
    }
}

/// Stream one artifact kind into `writer`.
pub fn write_artifact(
    writer: &mut impl Write,
    kind: ExportKind,
    items: &LayoutItemStore,
    config: &BreakpointTable,
) -> Result<()> {
    match kind {
        ExportKind::Markup => write!(writer, "{}", Markup::new(items))?,
        ExportKind::Stylesheet => write!(writer, "{}", Stylesheet::new(items, config))?,
        ExportKind::Combined => write!(writer, "{}", Combined::new(items, config))?,
    }
    writer.flush()?;
    Ok(())
}
