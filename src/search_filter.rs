use std::sync::Arc;
use tracing::{debug, info};
use tui_input::{Input, InputRequest};

use crate::data::data_view::FilteredView;
use crate::data::datatable::Dataset;

/// Default maximum length of a pending query
pub const DEFAULT_CHAR_LIMIT: usize = 50;

/// Derive a filtered view of a dataset from a query.
///
/// A row is kept iff at least one of its cells contains the query as a
/// case-insensitive substring. The empty query keeps every row. Relative
/// order is always preserved.
pub fn filter_rows(dataset: &Arc<Dataset>, query: &str) -> FilteredView {
    if query.is_empty() {
        return FilteredView::new(Arc::clone(dataset));
    }

    let needle = query.to_lowercase();
    let matching = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| cell.to_lowercase().contains(&needle)))
        .map(|(idx, _)| idx)
        .collect();

    FilteredView::with_rows(Arc::clone(dataset), matching)
}

/// Whether the query text is being composed or the last commit is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Idle,
    Editing,
}

/// Edits applied to the pending query buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEdit {
    InsertChar(char),
    DeletePrevChar,
    DeleteNextChar,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    ClearLine,
}

/// Text filter over one Dataset.
///
/// Owns the committed query, the pending edit buffer and the FilteredView
/// derived from the committed query.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    mode: SearchMode,
    pending: Input,
    query: String,
    view: FilteredView,
    char_limit: usize,
}

impl SearchFilter {
    /// Start with an empty query over the full dataset
    pub fn new(dataset: Arc<Dataset>, char_limit: usize) -> Self {
        Self {
            mode: SearchMode::Idle,
            pending: Input::default(),
            query: String::new(),
            view: FilteredView::new(dataset),
            char_limit,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == SearchMode::Editing
    }

    /// The committed query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The pending query buffer
    pub fn pending(&self) -> &str {
        self.pending.value()
    }

    /// Edit cursor position within the pending buffer, in characters
    pub fn pending_cursor(&self) -> usize {
        self.pending.cursor()
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        self.view.source()
    }

    /// Enter editing; only possible when the dataset has rows.
    ///
    /// The buffer starts from the committed query. Returns false when the
    /// mode did not change.
    pub fn begin_editing(&mut self) -> bool {
        if self.is_editing() || self.dataset().is_empty() {
            return false;
        }
        self.pending = Input::new(self.query.clone());
        self.mode = SearchMode::Editing;
        debug!(target: "search", "Editing query, buffer = '{}'", self.query);
        true
    }

    /// Apply an edit to the pending buffer; ignored when idle
    pub fn edit(&mut self, edit: SearchEdit) -> bool {
        if !self.is_editing() {
            return false;
        }

        let request = match edit {
            SearchEdit::InsertChar(c) => {
                if c.is_control() || self.pending.value().chars().count() >= self.char_limit {
                    return false;
                }
                InputRequest::InsertChar(c)
            }
            SearchEdit::DeletePrevChar => InputRequest::DeletePrevChar,
            SearchEdit::DeleteNextChar => InputRequest::DeleteNextChar,
            SearchEdit::CursorLeft => InputRequest::GoToPrevChar,
            SearchEdit::CursorRight => InputRequest::GoToNextChar,
            SearchEdit::CursorStart => InputRequest::GoToStart,
            SearchEdit::CursorEnd => InputRequest::GoToEnd,
            SearchEdit::ClearLine => InputRequest::DeleteLine,
        };
        let _ = self.pending.handle(request);
        true
    }

    /// Copy the buffer into the committed query and rescan.
    ///
    /// Returns true when the resulting FilteredView differs from the
    /// previous one.
    pub fn commit(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.mode = SearchMode::Idle;
        self.query = self.pending.value().to_string();
        self.rescan()
    }

    /// Reset the committed query and view to the full dataset.
    ///
    /// Returns false when there was no committed query to clear.
    pub fn clear(&mut self) -> bool {
        if self.is_editing() || self.query.is_empty() {
            return false;
        }
        info!(target: "search", "Clearing query '{}'", self.query);
        self.query.clear();
        self.pending.reset();
        self.view = FilteredView::new(Arc::clone(self.dataset()));
        true
    }

    /// Recompute the view from the committed query
    fn rescan(&mut self) -> bool {
        let view = filter_rows(self.dataset(), &self.query);
        let changed = view != self.view;
        info!(
            target: "search",
            "Query '{}' matched {}/{} rows",
            self.query,
            view.row_count(),
            self.dataset().row_count()
        );
        self.view = view;
        changed
    }
}
