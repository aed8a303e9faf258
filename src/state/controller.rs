//! Top-level navigation state machine.
//!
//! `NavigationController` is the only entry point for the input layer: every
//! decoded `Action` goes through `handle`, which routes it according to the
//! current `FocusState`, then replaces the published `ViewState` snapshot.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::config::Config;
use crate::data::data_provider::DataProvider;
use crate::data::datatable::Dataset;
use crate::search_filter::{SearchEdit, SearchFilter, DEFAULT_CHAR_LIMIT};
use crate::selection_model::{DetailSnapshot, SelectionModel};
use crate::state::error::NavError;
use crate::state::focus::FocusState;
use crate::state::view_state::{BrowseView, SearchStatus, ViewState, Viewport};
use crate::ui::actions::{Action, ActionResult, NavigateAction};
use crate::ui::viewport::ColumnWindow;

/// Knobs the controller takes from the application settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub search_char_limit: usize,
    pub show_help: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            search_char_limit: DEFAULT_CHAR_LIMIT,
            show_help: false,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            search_char_limit: config.behavior.search_char_limit,
            show_help: config.display.show_help_on_start,
        }
    }
}

/// State that exists only while a table is selected
#[derive(Debug)]
struct BrowseSession {
    search: SearchFilter,
    columns: ColumnWindow,
    cursor: SelectionModel,
}

impl BrowseSession {
    fn new(dataset: Arc<Dataset>, char_limit: usize) -> Self {
        let column_count = dataset.column_count();
        let row_count = dataset.row_count();
        Self {
            search: SearchFilter::new(dataset, char_limit),
            columns: ColumnWindow::new(column_count),
            cursor: SelectionModel::new(row_count),
        }
    }

    fn dataset(&self) -> &Arc<Dataset> {
        self.search.dataset()
    }

    fn visible_len(&self) -> usize {
        self.search.view().row_count()
    }
}

pub struct NavigationController {
    provider: Box<dyn DataProvider>,
    options: ControllerOptions,
    focus: FocusState,
    tables: Arc<[String]>,
    table_list: SelectionModel,
    session: Option<BrowseSession>,
    detail: Option<DetailSnapshot>,
    error: Option<NavError>,
    show_help: bool,
    viewport: Viewport,
    view: Arc<ViewState>,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("provider", &self.provider)
            .field("focus", &self.focus)
            .field("tables", &self.tables.len())
            .field("error", &self.error)
            .finish()
    }
}

impl NavigationController {
    /// Create the controller and load the table list.
    ///
    /// A failed listing is recorded as the pending error; the list stays
    /// empty until `Reload` succeeds.
    pub fn new(provider: Box<dyn DataProvider>, options: ControllerOptions) -> Self {
        let mut controller = Self {
            provider,
            options,
            focus: FocusState::TableSelect,
            tables: Arc::from(Vec::new()),
            table_list: SelectionModel::new(0),
            session: None,
            detail: None,
            error: None,
            show_help: options.show_help,
            viewport: Viewport::default(),
            view: Arc::new(ViewState {
                focus: FocusState::TableSelect,
                tables: Arc::from(Vec::new()),
                table_cursor: None,
                browse: None,
                detail: None,
                error: None,
                show_help: options.show_help,
                connection: String::new(),
                viewport: Viewport::default(),
            }),
        };
        if let Err(err) = controller.reload_tables() {
            warn!(target: "fetch", "{}", err);
            controller.error = Some(err);
        }
        controller.publish();
        controller
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// Latest published snapshot
    pub fn view(&self) -> Arc<ViewState> {
        Arc::clone(&self.view)
    }

    /// Pending user-visible error, if any
    pub fn error(&self) -> Option<&NavError> {
        self.error.as_ref()
    }

    /// Process one action to completion and publish a new snapshot
    pub fn handle(&mut self, action: Action) -> ActionResult {
        trace!(target: "navigation", "{:?} in {}", action, self.focus);
        let result = match self.dispatch(&action) {
            Ok(result) => result,
            Err(err) if err.is_user_visible() => {
                warn!(target: "navigation", "{}", err);
                self.error = Some(err);
                ActionResult::Handled
            }
            Err(err) => {
                debug!(target: "navigation", "Ignored: {}", err);
                ActionResult::NotHandled
            }
        };
        self.publish();
        result
    }

    /// Select a table by name, fetching its rows.
    ///
    /// Only valid in `TableSelect`. On failure the controller stays in
    /// `TableSelect` with the error recorded.
    pub fn select(&mut self, table: &str) -> ActionResult {
        let result = match self.select_table(table) {
            Ok(()) => ActionResult::Handled,
            Err(err) if err.is_user_visible() => {
                warn!(target: "navigation", "{}", err);
                self.error = Some(err);
                ActionResult::Handled
            }
            Err(err) => {
                debug!(target: "navigation", "Ignored: {}", err);
                ActionResult::NotHandled
            }
        };
        self.publish();
        result
    }

    fn dispatch(&mut self, action: &Action) -> Result<ActionResult, NavError> {
        match action {
            Action::Quit | Action::ForceQuit => {
                info!(target: "navigation", "Quit from {}", self.focus);
                return Ok(ActionResult::Exit);
            }
            Action::Resize { width, height } => {
                self.viewport = Viewport {
                    width: *width,
                    height: *height,
                };
                return Ok(ActionResult::Handled);
            }
            _ => {}
        }

        if self.is_editing() {
            return self.dispatch_editing(action);
        }

        match (self.focus, action) {
            (_, Action::ToggleHelp) => {
                self.show_help = !self.show_help;
                Ok(ActionResult::Handled)
            }
            (FocusState::TableSelect, Action::Navigate(nav)) => {
                let page = self.viewport.page_size();
                apply_navigation(&mut self.table_list, *nav, page);
                Ok(ActionResult::Handled)
            }
            (FocusState::TableSelect, Action::Select) => {
                let table = self
                    .table_list
                    .cursor()
                    .and_then(|i| self.tables.get(i).cloned())
                    .ok_or_else(|| self.invalid(action))?;
                self.select_table(&table)?;
                Ok(ActionResult::Handled)
            }
            (FocusState::TableSelect, Action::Reload) => {
                self.error = None;
                self.reload_tables()?;
                Ok(ActionResult::Handled)
            }
            (FocusState::TableSelect, Action::Back) => {
                if self.error.take().is_none() {
                    return Err(self.invalid(action));
                }
                Ok(ActionResult::Handled)
            }
            (FocusState::RowBrowse, Action::Navigate(nav)) => {
                let page = self.viewport.page_size();
                let session = self.session_mut(action)?;
                apply_navigation(&mut session.cursor, *nav, page);
                Ok(ActionResult::Handled)
            }
            (FocusState::RowBrowse, Action::Back) => {
                if let Some(session) = self.session.take() {
                    info!(target: "navigation", "Leaving {}", session.dataset().name());
                }
                self.focus = FocusState::TableSelect;
                Ok(ActionResult::Handled)
            }
            (FocusState::RowBrowse, Action::ViewDetails) => {
                let snapshot = self.capture_detail().ok_or_else(|| self.invalid(action))?;
                debug!(
                    target: "navigation",
                    "Detail of row {} in {}",
                    snapshot.row_index(),
                    snapshot.table()
                );
                self.detail = Some(snapshot);
                self.focus = FocusState::RowDetail;
                Ok(ActionResult::Handled)
            }
            (FocusState::RowBrowse, Action::StartSearch) => {
                let session = self.session_mut(action)?;
                if !session.search.begin_editing() {
                    return Err(self.invalid(action));
                }
                Ok(ActionResult::Handled)
            }
            (FocusState::RowBrowse, Action::ClearSearch) => {
                let session = self.session_mut(action)?;
                if !session.search.clear() {
                    return Err(self.invalid(action));
                }
                session.columns.reset();
                let len = session.visible_len();
                session.cursor.reset(len);
                Ok(ActionResult::Handled)
            }
            (FocusState::RowBrowse, Action::ScrollColumns(direction)) => {
                let session = self.session_mut(action)?;
                if !session.columns.scroll(*direction) {
                    return Ok(ActionResult::NotHandled);
                }
                Ok(ActionResult::Handled)
            }
            (FocusState::RowDetail, Action::Back) => {
                self.detail = None;
                self.focus = FocusState::RowBrowse;
                Ok(ActionResult::Handled)
            }
            _ => Err(self.invalid(action)),
        }
    }

    /// While a query is being composed only buffer edits and commit apply
    fn dispatch_editing(&mut self, action: &Action) -> Result<ActionResult, NavError> {
        match action {
            Action::EditSearch(edit) => {
                let edit: SearchEdit = *edit;
                let session = self.session_mut(action)?;
                if !session.search.edit(edit) {
                    return Ok(ActionResult::NotHandled);
                }
                Ok(ActionResult::Handled)
            }
            Action::CommitSearch => {
                let session = self.session_mut(action)?;
                let len_before = session.visible_len();
                if session.search.commit() {
                    session.cursor.reset(session.visible_len());
                } else {
                    session.cursor.resize(session.visible_len());
                }
                debug!(
                    target: "search",
                    "Committed '{}': {} -> {} rows",
                    session.search.query(),
                    len_before,
                    session.visible_len()
                );
                Ok(ActionResult::Handled)
            }
            _ => Err(self.invalid(action)),
        }
    }

    fn select_table(&mut self, table: &str) -> Result<(), NavError> {
        if self.focus != FocusState::TableSelect {
            return Err(NavError::invalid(Action::Select.name(), self.focus));
        }

        self.error = None;
        info!(target: "fetch", "Fetching rows of {}", table);
        let data = self
            .provider
            .fetch_rows(table)
            .map_err(|e| NavError::fetch_failed(format!("fetch rows of {}", table), &e))?;

        let row_limit = self.provider.row_limit();
        let dataset = Arc::new(Dataset::new(table, data.columns, data.rows).with_row_cap(row_limit));
        info!(
            target: "fetch",
            "Loaded {}: {} columns, {} rows",
            table,
            dataset.column_count(),
            dataset.row_count()
        );

        if let Some(i) = self.tables.iter().position(|t| t == table) {
            self.table_list.set_cursor(i);
        }
        self.session = Some(BrowseSession::new(dataset, self.options.search_char_limit));
        self.detail = None;
        self.focus = FocusState::RowBrowse;
        Ok(())
    }

    fn reload_tables(&mut self) -> Result<(), NavError> {
        let tables = self
            .provider
            .list_tables()
            .map_err(|e| NavError::fetch_failed("list tables", &e))?;
        info!(target: "fetch", "Found {} tables", tables.len());
        self.table_list.resize(tables.len());
        self.tables = Arc::from(tables);
        Ok(())
    }

    fn capture_detail(&self) -> Option<DetailSnapshot> {
        let session = self.session.as_ref()?;
        let index = session.cursor.cursor()?;
        let row = session.search.view().get_row(index)?;
        let dataset = session.dataset();
        Some(DetailSnapshot::capture(
            dataset.name(),
            index,
            dataset.column_names(),
            row,
        ))
    }

    fn is_editing(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.search.is_editing())
            .unwrap_or(false)
    }

    fn session_mut(&mut self, action: &Action) -> Result<&mut BrowseSession, NavError> {
        let focus = self.focus;
        self.session
            .as_mut()
            .ok_or_else(|| NavError::invalid(action.name(), focus))
    }

    fn invalid(&self, action: &Action) -> NavError {
        NavError::invalid(action.name(), self.focus)
    }

    /// Replace the published snapshot
    fn publish(&mut self) {
        let page = self.viewport.page_size();
        if let Some(session) = self.session.as_mut() {
            session.cursor.scroll_into_view(page);
        }

        let row_limit = self.provider.row_limit();
        let browse = self.session.as_ref().map(|session| {
            let dataset = session.dataset();
            BrowseView {
                table: dataset.name().to_string(),
                rows: session.search.view().clone(),
                columns: session.columns.visible_columns(dataset.column_names()),
                scroll_offset: session.columns.offset(),
                column_count: session.columns.column_count(),
                cursor: session.cursor.cursor(),
                row_offset: session.cursor.top(),
                search: SearchStatus {
                    mode: session.search.mode(),
                    query: session.search.query().to_string(),
                    pending: session.search.pending().to_string(),
                    pending_cursor: session.search.pending_cursor(),
                },
                row_limit,
            }
        });

        self.view = Arc::new(ViewState {
            focus: self.focus,
            tables: Arc::clone(&self.tables),
            table_cursor: self.table_list.cursor(),
            browse,
            detail: self.detail.clone(),
            error: self.error.clone(),
            show_help: self.show_help,
            connection: self.provider.describe(),
            viewport: self.viewport,
        });
    }
}

fn apply_navigation(selection: &mut SelectionModel, nav: NavigateAction, page: usize) {
    match nav {
        NavigateAction::Up(n) => selection.move_up_by(n),
        NavigateAction::Down(n) => selection.move_down_by(n),
        NavigateAction::PageUp => selection.move_up_by(page),
        NavigateAction::PageDown => selection.move_down_by(page),
        NavigateAction::Home => selection.home(),
        NavigateAction::End => selection.end(),
    }
}
