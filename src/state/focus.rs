use std::fmt;

/// Which navigation mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusState {
    /// Picking a table from the list
    #[default]
    TableSelect,
    /// Paging through the selected table's rows
    RowBrowse,
    /// Reading one row's fields
    RowDetail,
}

impl FocusState {
    /// One-line hint shown under the header for this state
    pub fn context_hint(&self, has_rows: bool) -> &'static str {
        match self {
            FocusState::TableSelect => "Select a table with Enter or → | ? for help",
            FocusState::RowBrowse if has_rows => {
                "Press v or Enter to view row details | / to search | ? for help"
            }
            FocusState::RowBrowse => "No data to display | Esc to go back | ? for help",
            FocusState::RowDetail => "Viewing row details | Esc to go back | ? for help",
        }
    }
}

impl fmt::Display for FocusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FocusState::TableSelect => "TableSelect",
            FocusState::RowBrowse => "RowBrowse",
            FocusState::RowDetail => "RowDetail",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_table_select() {
        assert_eq!(FocusState::default(), FocusState::TableSelect);
    }

    #[test]
    fn test_context_hint_depends_on_rows() {
        assert_ne!(
            FocusState::RowBrowse.context_hint(true),
            FocusState::RowBrowse.context_hint(false)
        );
        assert_eq!(FocusState::RowDetail.to_string(), "RowDetail");
    }
}
