use super::grid::DayCell;
use ratatui::text::{Line, Span, Text};
use std::fmt;
use time::Date;

/// Produces renderable content for a single date.
///
/// Any `Fn(Date) -> Text<'static>` closure implements this trait.
pub trait DateContent {
    fn content(&self, date: Date) -> Text<'static>;
}

impl<F> DateContent for F
where
    F: Fn(Date) -> Text<'static>,
{
    fn content(&self, date: Date) -> Text<'static> {
        self(date)
    }
}

/// Optional per-date overrides consulted for every cell of the grid
#[derive(Default)]
pub struct CellHooks {
    date_render: Option<Box<dyn DateContent>>,
    date_inner_content: Option<Box<dyn DateContent>>,
}

impl CellHooks {
    pub fn new(
        date_render: Option<Box<dyn DateContent>>,
        date_inner_content: Option<Box<dyn DateContent>>,
    ) -> CellHooks {
        CellHooks {
            date_render,
            date_inner_content,
        }
    }

    pub fn has_date_render(&self) -> bool {
        self.date_render.is_some()
    }

    pub fn has_date_inner_content(&self) -> bool {
        self.date_inner_content.is_some()
    }

    /// Returns the content to draw for `cell`.
    ///
    /// If a full-cell override is installed, its output is returned as-is and
    /// `label` is ignored.  Otherwise the result is `label` on the first line
    /// followed by any supplementary content.
    pub fn cell_text(&self, cell: &DayCell, label: Span<'static>) -> Text<'static> {
        if let Some(render) = &self.date_render {
            return render.content(cell.date);
        }
        let mut text = Text::from(Line::from(label));
        if let Some(inner) = &self.date_inner_content {
            text.extend(inner.content(cell.date));
        }
        text
    }
}

impl fmt::Debug for CellHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellHooks")
            .field("date_render", &self.has_date_render())
            .field("date_inner_content", &self.has_date_inner_content())
            .finish()
    }
}
