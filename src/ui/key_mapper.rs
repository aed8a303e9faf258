// Maps terminal input to actions
// The navigation controller never sees raw key events.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use tracing::trace;

use crate::search_filter::SearchEdit;
use crate::state::focus::FocusState;
use crate::ui::actions::{Action, ActionContext, NavigateAction};
use crate::ui::viewport::ScrollDirection;

type KeyCombo = (KeyCode, KeyModifiers);

/// Maps keyboard input to actions based on context
pub struct KeyMapper {
    /// Always active, even while editing a query
    global_mappings: HashMap<KeyCombo, Action>,

    /// Active in every focus state unless editing a query
    command_mappings: HashMap<KeyCombo, Action>,

    /// Focus-specific mappings
    focus_mappings: HashMap<FocusState, HashMap<KeyCombo, Action>>,
}

impl KeyMapper {
    pub fn new() -> Self {
        let mut mapper = Self {
            global_mappings: HashMap::new(),
            command_mappings: HashMap::new(),
            focus_mappings: HashMap::new(),
        };

        mapper.init_global_mappings();
        mapper.init_focus_mappings();
        mapper
    }

    fn init_global_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        // Force quit
        self.global_mappings
            .insert((Char('c'), Mod::CONTROL), Action::ForceQuit);

        self.command_mappings
            .insert((Char('q'), Mod::NONE), Action::Quit);
        self.command_mappings
            .insert((Char('?'), Mod::NONE), Action::ToggleHelp);
        self.command_mappings
            .insert((F(5), Mod::NONE), Action::ToggleDebug);
    }

    fn init_focus_mappings(&mut self) {
        self.init_table_select_mappings();
        self.init_row_browse_mappings();
        self.init_row_detail_mappings();
    }

    /// Cursor keys shared by the table list and the row grid
    fn navigation_mappings() -> HashMap<KeyCombo, Action> {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();
        mappings.insert((Up, Mod::NONE), Action::Navigate(NavigateAction::Up(1)));
        mappings.insert((Down, Mod::NONE), Action::Navigate(NavigateAction::Down(1)));
        mappings.insert((Char('k'), Mod::NONE), Action::Navigate(NavigateAction::Up(1)));
        mappings.insert((Char('j'), Mod::NONE), Action::Navigate(NavigateAction::Down(1)));
        mappings.insert(
            (PageUp, Mod::NONE),
            Action::Navigate(NavigateAction::PageUp),
        );
        mappings.insert(
            (PageDown, Mod::NONE),
            Action::Navigate(NavigateAction::PageDown),
        );
        mappings.insert((Home, Mod::NONE), Action::Navigate(NavigateAction::Home));
        mappings.insert((End, Mod::NONE), Action::Navigate(NavigateAction::End));
        mappings
    }

    fn init_table_select_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = Self::navigation_mappings();

        mappings.insert((Enter, Mod::NONE), Action::Select);
        mappings.insert((Right, Mod::NONE), Action::Select);
        mappings.insert((Char('l'), Mod::NONE), Action::Select);

        mappings.insert((Char('r'), Mod::NONE), Action::Reload);

        // Dismiss a pending error
        mappings.insert((Esc, Mod::NONE), Action::Back);

        self.focus_mappings.insert(FocusState::TableSelect, mappings);
    }

    fn init_row_browse_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = Self::navigation_mappings();

        mappings.insert((Enter, Mod::NONE), Action::ViewDetails);
        mappings.insert((Char('v'), Mod::NONE), Action::ViewDetails);
        mappings.insert((Char(' '), Mod::NONE), Action::ViewDetails);

        // Search
        mappings.insert((Char('/'), Mod::NONE), Action::StartSearch);
        mappings.insert((Char('x'), Mod::CONTROL), Action::ClearSearch);

        // Horizontal scroll
        mappings.insert(
            (Left, Mod::SHIFT),
            Action::ScrollColumns(ScrollDirection::Left),
        );
        mappings.insert(
            (Right, Mod::SHIFT),
            Action::ScrollColumns(ScrollDirection::Right),
        );
        mappings.insert(
            (Char('H'), Mod::NONE),
            Action::ScrollColumns(ScrollDirection::Left),
        );
        mappings.insert(
            (Char('L'), Mod::NONE),
            Action::ScrollColumns(ScrollDirection::Right),
        );

        // Back to the table list
        mappings.insert((Esc, Mod::NONE), Action::Back);
        mappings.insert((Left, Mod::NONE), Action::Back);
        mappings.insert((Char('h'), Mod::NONE), Action::Back);

        self.focus_mappings.insert(FocusState::RowBrowse, mappings);
    }

    fn init_row_detail_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();
        mappings.insert((Esc, Mod::NONE), Action::Back);
        mappings.insert((Left, Mod::NONE), Action::Back);
        mappings.insert((Char('h'), Mod::NONE), Action::Back);

        self.focus_mappings.insert(FocusState::RowDetail, mappings);
    }

    /// Map any terminal event; key releases and repeats are dropped
    pub fn map_event(&self, event: &Event, context: &ActionContext) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.map_key(*key, context),
            Event::Resize(width, height) => Some(Action::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }

    /// Map a key event to an action based on current context
    pub fn map_key(&self, key: KeyEvent, context: &ActionContext) -> Option<Action> {
        let key_combo = normalize(key);
        trace!(target: "input", "Key {:?} in {:?}", key_combo, context);

        if let Some(action) = self.global_mappings.get(&key_combo) {
            return Some(action.clone());
        }

        if context.editing_search {
            return map_editing_key(key_combo);
        }

        if let Some(action) = self.command_mappings.get(&key_combo) {
            return Some(action.clone());
        }

        self.focus_mappings
            .get(&context.focus)
            .and_then(|mappings| mappings.get(&key_combo))
            .cloned()
    }
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift is part of the character itself ('H', '?'), so it is dropped for
/// character keys
fn normalize(key: KeyEvent) -> KeyCombo {
    match key.code {
        KeyCode::Char(c) => (
            KeyCode::Char(if key.modifiers.contains(KeyModifiers::CONTROL) {
                c.to_ascii_lowercase()
            } else {
                c
            }),
            key.modifiers.difference(KeyModifiers::SHIFT),
        ),
        code => (code, key.modifiers),
    }
}

/// Keys while a query is being composed
fn map_editing_key((code, modifiers): KeyCombo) -> Option<Action> {
    let edit = match (code, modifiers) {
        (KeyCode::Enter, _) | (KeyCode::Esc, _) => return Some(Action::CommitSearch),
        (KeyCode::Char('u'), m) if m == KeyModifiers::CONTROL => SearchEdit::ClearLine,
        (KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            SearchEdit::InsertChar(c)
        }
        (KeyCode::Backspace, _) => SearchEdit::DeletePrevChar,
        (KeyCode::Delete, _) => SearchEdit::DeleteNextChar,
        (KeyCode::Left, _) => SearchEdit::CursorLeft,
        (KeyCode::Right, _) => SearchEdit::CursorRight,
        (KeyCode::Home, _) => SearchEdit::CursorStart,
        (KeyCode::End, _) => SearchEdit::CursorEnd,
        _ => return None,
    };
    Some(Action::EditSearch(edit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(focus: FocusState) -> ActionContext {
        ActionContext {
            focus,
            editing_search: false,
        }
    }

    fn editing() -> ActionContext {
        ActionContext {
            focus: FocusState::RowBrowse,
            editing_search: true,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_navigation_mapping() {
        let mapper = KeyMapper::new();
        for focus in [FocusState::TableSelect, FocusState::RowBrowse] {
            let ctx = context(focus);
            assert_eq!(
                mapper.map_key(key(KeyCode::Down), &ctx),
                Some(Action::Navigate(NavigateAction::Down(1)))
            );
            assert_eq!(
                mapper.map_key(key(KeyCode::Char('k')), &ctx),
                Some(Action::Navigate(NavigateAction::Up(1)))
            );
        }
        assert_eq!(
            mapper.map_key(key(KeyCode::Down), &context(FocusState::RowDetail)),
            None
        );
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let mapper = KeyMapper::new();
        assert_eq!(
            mapper.map_key(key(KeyCode::Enter), &context(FocusState::TableSelect)),
            Some(Action::Select)
        );
        assert_eq!(
            mapper.map_key(key(KeyCode::Enter), &context(FocusState::RowBrowse)),
            Some(Action::ViewDetails)
        );
        assert_eq!(
            mapper.map_key(key(KeyCode::Enter), &editing()),
            Some(Action::CommitSearch)
        );
    }

    #[test]
    fn test_shifted_scroll_keys() {
        let mapper = KeyMapper::new();
        let ctx = context(FocusState::RowBrowse);
        let shift_left = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        let shift_l = KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert_eq!(
            mapper.map_key(shift_left, &ctx),
            Some(Action::ScrollColumns(ScrollDirection::Left))
        );
        assert_eq!(
            mapper.map_key(shift_l, &ctx),
            Some(Action::ScrollColumns(ScrollDirection::Right))
        );
        assert_eq!(mapper.map_key(key(KeyCode::Left), &ctx), Some(Action::Back));
    }

    #[test]
    fn test_editing_captures_text() {
        let mapper = KeyMapper::new();
        let ctx = editing();
        assert_eq!(
            mapper.map_key(key(KeyCode::Char('q')), &ctx),
            Some(Action::EditSearch(SearchEdit::InsertChar('q')))
        );
        assert_eq!(
            mapper.map_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT), &ctx),
            Some(Action::EditSearch(SearchEdit::InsertChar('?')))
        );
        assert_eq!(
            mapper.map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &ctx),
            Some(Action::EditSearch(SearchEdit::ClearLine))
        );
        assert_eq!(mapper.map_key(key(KeyCode::Esc), &ctx), Some(Action::CommitSearch));
        assert_eq!(mapper.map_key(key(KeyCode::F(5)), &ctx), None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mapper = KeyMapper::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(mapper.map_key(ctrl_c, &editing()), Some(Action::ForceQuit));
        assert_eq!(
            mapper.map_key(ctrl_c, &context(FocusState::RowDetail)),
            Some(Action::ForceQuit)
        );
    }

    #[test]
    fn test_commands_outside_editing() {
        let mapper = KeyMapper::new();
        let ctx = context(FocusState::RowDetail);
        assert_eq!(mapper.map_key(key(KeyCode::Char('q')), &ctx), Some(Action::Quit));
        assert_eq!(
            mapper.map_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT), &ctx),
            Some(Action::ToggleHelp)
        );
        assert_eq!(mapper.map_key(key(KeyCode::F(5)), &ctx), Some(Action::ToggleDebug));
        assert_eq!(
            mapper.map_key(
                KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                &context(FocusState::RowBrowse)
            ),
            Some(Action::ClearSearch)
        );
    }

    #[test]
    fn test_events() {
        let mapper = KeyMapper::new();
        let ctx = context(FocusState::TableSelect);
        assert_eq!(
            mapper.map_event(&Event::Resize(120, 40), &ctx),
            Some(Action::Resize {
                width: 120,
                height: 40
            })
        );

        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(mapper.map_event(&Event::Key(release), &ctx), None);
        assert_eq!(
            mapper.map_event(&Event::Key(key(KeyCode::Char('q'))), &ctx),
            Some(Action::Quit)
        );
    }
}
