// Table rendering context that encapsulates all data needed for rendering
// This decouples the grid renderer from the navigation state

use std::ops::Range;

use crate::data::datatable::is_null;
use crate::selection_model::window_start;
use crate::state::view_state::BrowseView;
use crate::ui::viewport::column_width_calculator::truncate_cell;

/// All the data needed to render the row grid, collected in one place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRenderContext {
    /// Rows in the filtered view
    pub row_count: usize,

    /// Rows of the filtered view inside the viewport (start..end)
    pub row_viewport: Range<usize>,

    /// Cell text for the viewport, already truncated for display
    pub data_rows: Vec<Vec<String>>,

    /// Headers of the visible column slice
    pub column_headers: Vec<String>,

    /// Widths matching `column_headers`
    pub column_widths: Vec<u16>,

    /// Highlighted row (absolute index in the filtered view)
    pub selected_row: Option<usize>,

    /// Committed query, for match highlighting
    pub query: Option<String>,
}

impl TableRenderContext {
    /// Collect the viewport of `browse` for a grid with `available_height`
    /// body rows.
    ///
    /// The viewport starts at the browse window's first row, shifted only as
    /// far as needed to keep the cursor row on screen at this height.
    pub fn from_browse(browse: &BrowseView, available_height: usize, max_cell_width: usize) -> Self {
        let row_count = browse.filtered_rows();
        let height = available_height.max(1);
        let start = window_start(browse.row_offset, browse.cursor, height);
        let end = (start + height).min(row_count);

        let data_rows = browse
            .rows
            .slice(start, end.saturating_sub(start))
            .into_iter()
            .map(|row| {
                browse
                    .visible_cells(row)
                    .into_iter()
                    .map(|cell| truncate_cell(cell, max_cell_width))
                    .collect()
            })
            .collect();

        Self {
            row_count,
            row_viewport: start..end.max(start),
            data_rows,
            column_headers: browse.columns.iter().map(|c| c.name.clone()).collect(),
            column_widths: browse.columns.iter().map(|c| c.width).collect(),
            selected_row: browse.cursor,
            query: browse
                .search
                .has_query()
                .then(|| browse.search.query.clone()),
        }
    }

    /// Check if a given row is the currently selected row
    pub fn is_selected_row(&self, viewport_row_index: usize) -> bool {
        self.selected_row == Some(self.row_viewport.start + viewport_row_index)
    }

    /// Selected row relative to the viewport
    pub fn selected_viewport_row(&self) -> Option<usize> {
        self.selected_row
            .filter(|row| self.row_viewport.contains(row))
            .map(|row| row - self.row_viewport.start)
    }

    /// Check if a cell value matches the committed query
    pub fn cell_matches_query(&self, cell_value: &str) -> bool {
        match &self.query {
            Some(query) => cell_value.to_lowercase().contains(&query.to_lowercase()),
            None => false,
        }
    }

    pub fn is_null_cell(&self, cell_value: &str) -> bool {
        is_null(cell_value)
    }
}
