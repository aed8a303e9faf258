use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::state::focus::FocusState;

/// Key help shown in the footer
pub struct HelpText;

impl HelpText {
    fn heading(text: &'static str) -> Line<'static> {
        Line::from(text).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }

    /// Help lines for the given focus state
    pub fn for_focus(focus: FocusState) -> Vec<Line<'static>> {
        let mut lines = match focus {
            FocusState::TableSelect => vec![
                Self::heading("TABLES"),
                Line::from("  ↑/k ↓/j PgUp PgDn Home End - Move    Enter/→/l - Open table"),
                Line::from("  r - Reload table list    Esc - Dismiss error"),
            ],
            FocusState::RowBrowse => vec![
                Self::heading("ROWS"),
                Line::from("  ↑/k ↓/j PgUp PgDn Home End - Move    Enter/v/Space - Row details"),
                Line::from("  / - Search (Enter/Esc applies)    Ctrl+X - Clear search"),
                Line::from("  Shift+←/H Shift+→/L - Scroll columns    Esc/←/h - Back to tables"),
            ],
            FocusState::RowDetail => vec![
                Self::heading("ROW DETAILS"),
                Line::from("  Esc/←/h - Back to rows"),
            ],
        };
        lines.push(Line::from("  ? - Toggle help    F5 - Debug log    q - Quit    Ctrl+C - Force quit"));
        lines
    }

    /// Height needed by the footer for `focus`, including borders
    pub fn height(focus: FocusState) -> u16 {
        Self::for_focus(focus).len() as u16 + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_focus_mentions_quit() {
        for focus in [
            FocusState::TableSelect,
            FocusState::RowBrowse,
            FocusState::RowDetail,
        ] {
            let text: String = HelpText::for_focus(focus)
                .iter()
                .map(|line| line.to_string())
                .collect();
            assert!(text.contains("q - Quit"));
        }
        assert_eq!(HelpText::height(FocusState::RowDetail), 5);
    }
}
