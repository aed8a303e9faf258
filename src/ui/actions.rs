// Action system for UI operations
// Key events are mapped to actions; the navigation controller consumes them.

use crate::search_filter::SearchEdit;
use crate::state::focus::FocusState;
use crate::ui::viewport::ScrollDirection;

/// All possible actions that can be triggered in the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation actions (table list or row cursor, depending on focus)
    Navigate(NavigateAction),

    // Focus transitions
    Select,
    Back,
    ViewDetails,
    Reload,

    // Search operations
    StartSearch,
    EditSearch(SearchEdit),
    CommitSearch,
    ClearSearch,

    // Column window
    ScrollColumns(ScrollDirection),

    // View operations
    ToggleHelp,
    ToggleDebug,
    Resize { width: u16, height: u16 },

    // Application control
    Quit,
    ForceQuit,
}

/// Cursor movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateAction {
    Up(usize),
    Down(usize),
    PageUp,
    PageDown,
    Home,
    End,
}

/// Context needed to map keys to actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionContext {
    pub focus: FocusState,
    pub editing_search: bool,
}

/// Result of handling an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Action was handled successfully
    Handled,
    /// Action was not applicable in current context
    NotHandled,
    /// Action should cause application exit
    Exit,
}

impl Action {
    /// Short name used in logs and transition errors
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::Select => "select",
            Action::Back => "back",
            Action::ViewDetails => "view-details",
            Action::Reload => "reload",
            Action::StartSearch => "start-search",
            Action::EditSearch(_) => "edit-search",
            Action::CommitSearch => "commit-search",
            Action::ClearSearch => "clear-search",
            Action::ScrollColumns(_) => "scroll-columns",
            Action::ToggleHelp => "toggle-help",
            Action::ToggleDebug => "toggle-debug",
            Action::Resize { .. } => "resize",
            Action::Quit => "quit",
            Action::ForceQuit => "force-quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_action_creation() {
        let action = Action::Navigate(NavigateAction::Down(5));
        assert_eq!(action, Action::Navigate(NavigateAction::Down(5)));
        assert_eq!(action.name(), "navigate");
    }

    #[test]
    fn test_action_names_are_distinct() {
        let actions = [
            Action::Select,
            Action::Back,
            Action::ViewDetails,
            Action::StartSearch,
            Action::CommitSearch,
            Action::ClearSearch,
            Action::Quit,
        ];
        let mut names: Vec<&str> = actions.iter().map(Action::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), actions.len());
    }
}
