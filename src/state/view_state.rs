//! Read-only snapshot of the navigation state handed to the renderer.
//!
//! A new `ViewState` is built after every processed action. Row data is shared
//! with the controller through `Arc`, so a snapshot is cheap to build and stays
//! consistent even if the controller moves on.

use std::sync::Arc;

use crate::data::data_view::FilteredView;
use crate::data::datatable::Row;
use crate::search_filter::SearchMode;
use crate::selection_model::DetailSnapshot;
use crate::state::error::NavError;
use crate::state::focus::FocusState;
use crate::ui::viewport::VisibleColumn;

/// Rows of chrome (title, badge, divider, hint, table header, borders, footer)
const CHROME_ROWS: u16 = 12;

/// Terminal geometry from the last resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

impl Viewport {
    /// Rows moved by page up/down
    pub fn page_size(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS).max(1) as usize
    }
}

/// Query state for display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatus {
    pub mode: SearchMode,
    /// Committed query in effect
    pub query: String,
    /// Buffer being edited
    pub pending: String,
    /// Edit cursor within `pending`, in characters
    pub pending_cursor: usize,
}

impl SearchStatus {
    pub fn is_editing(&self) -> bool {
        self.mode == SearchMode::Editing
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

/// The selected table as seen in RowBrowse and RowDetail
#[derive(Debug, Clone)]
pub struct BrowseView {
    pub table: String,
    pub rows: FilteredView,
    /// Visible column slice, starting at `scroll_offset`
    pub columns: Vec<VisibleColumn>,
    pub scroll_offset: usize,
    pub column_count: usize,
    /// Highlighted row within `rows`, `None` when `rows` is empty
    pub cursor: Option<usize>,
    /// First row of the grid window
    pub row_offset: usize,
    pub search: SearchStatus,
    pub row_limit: usize,
}

impl BrowseView {
    /// Rows in the unfiltered dataset
    pub fn total_rows(&self) -> usize {
        self.rows.source().row_count()
    }

    pub fn filtered_rows(&self) -> usize {
        self.rows.row_count()
    }

    /// Whether the provider's row cap may have cut the table short
    pub fn is_truncated(&self) -> bool {
        self.rows.source().is_truncated()
    }

    /// Cells of `row` for the visible column slice; missing cells are empty
    pub fn visible_cells<'a>(&self, row: &'a Row) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|c| row.get(c.index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    /// `(n rows)` plus a cap marker when truncated
    pub fn row_count_label(&self) -> String {
        if self.is_truncated() {
            format!("({} rows, first {} shown)", self.total_rows(), self.row_limit)
        } else {
            format!("({} rows)", self.total_rows())
        }
    }

    /// `(n/m rows)` when a query is active
    pub fn filter_label(&self) -> Option<String> {
        self.search
            .has_query()
            .then(|| format!("({}/{} rows)", self.filtered_rows(), self.total_rows()))
    }

    /// Status line under the search bar, if any
    pub fn status_message(&self) -> Option<&'static str> {
        if self.rows.is_empty() && self.search.has_query() {
            Some("No matching results. Press Ctrl+X to clear filter.")
        } else if self.total_rows() == 0 {
            Some("Empty table")
        } else {
            None
        }
    }
}

/// Everything the renderer needs after an event
#[derive(Debug, Clone)]
pub struct ViewState {
    pub focus: FocusState,
    pub tables: Arc<[String]>,
    pub table_cursor: Option<usize>,
    pub browse: Option<BrowseView>,
    /// Present only in RowDetail
    pub detail: Option<DetailSnapshot>,
    /// Pending user-visible error
    pub error: Option<NavError>,
    pub show_help: bool,
    /// Connection badge text
    pub connection: String,
    pub viewport: Viewport,
}

impl ViewState {
    pub fn context_hint(&self) -> &'static str {
        let has_rows = self
            .browse
            .as_ref()
            .map(|b| !b.rows.is_empty())
            .unwrap_or(false);
        self.focus.context_hint(has_rows)
    }

    pub fn selected_table(&self) -> Option<&str> {
        self.browse.as_ref().map(|b| b.table.as_str())
    }

    pub fn is_editing_search(&self) -> bool {
        self.browse
            .as_ref()
            .map(|b| b.search.is_editing())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datatable::Dataset;

    fn browse(rows: usize, query: &str) -> BrowseView {
        let dataset = Arc::new(Dataset::new(
            "t",
            vec!["a".to_string(), "b".to_string()],
            (0..rows).map(|i| vec![i.to_string()]).collect(),
        ));
        BrowseView {
            table: "t".to_string(),
            rows: FilteredView::with_rows(dataset, Vec::new()),
            columns: vec![
                VisibleColumn {
                    index: 0,
                    name: "a".to_string(),
                    width: 16,
                },
                VisibleColumn {
                    index: 1,
                    name: "b".to_string(),
                    width: 16,
                },
            ],
            scroll_offset: 0,
            column_count: 2,
            cursor: None,
            row_offset: 0,
            search: SearchStatus {
                query: query.to_string(),
                ..SearchStatus::default()
            },
            row_limit: 1000,
        }
    }

    #[test]
    fn test_page_size_has_floor() {
        assert_eq!(Viewport { width: 80, height: 5 }.page_size(), 1);
        assert_eq!(Viewport { width: 80, height: 40 }.page_size(), 28);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            browse(3, "zzz").status_message(),
            Some("No matching results. Press Ctrl+X to clear filter.")
        );
        assert_eq!(browse(0, "").status_message(), Some("Empty table"));
        assert_eq!(browse(3, "zzz").filter_label().as_deref(), Some("(0/3 rows)"));
        assert_eq!(browse(3, "").filter_label(), None);
    }

    #[test]
    fn test_visible_cells_pad_short_rows() {
        let view = browse(1, "");
        let row = vec!["only".to_string()];
        assert_eq!(view.visible_cells(&row), vec!["only", ""]);
    }
}
