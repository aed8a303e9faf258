use thiserror::Error;

use crate::state::focus::FocusState;

/// Errors produced by the navigation core.
///
/// Both kinds are terminal to the attempted action only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// Listing tables or fetching rows failed; shown to the operator
    #[error("{operation} failed: {message}")]
    FetchFailed { operation: String, message: String },

    /// Action not valid in the current focus state; never surfaced
    #[error("'{action}' is not valid in {focus}")]
    InvalidTransition {
        action: &'static str,
        focus: FocusState,
    },
}

impl NavError {
    pub fn fetch_failed(operation: impl Into<String>, err: &anyhow::Error) -> Self {
        NavError::FetchFailed {
            operation: operation.into(),
            message: format!("{:#}", err),
        }
    }

    pub fn invalid(action: &'static str, focus: FocusState) -> Self {
        NavError::InvalidTransition { action, focus }
    }

    pub fn is_user_visible(&self) -> bool {
        matches!(self, NavError::FetchFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_message_includes_cause_chain() {
        let err = anyhow::anyhow!("connection refused").context("failed to list tables");
        let nav = NavError::fetch_failed("list tables", &err);
        assert_eq!(
            nav.to_string(),
            "list tables failed: failed to list tables: connection refused"
        );
        assert!(nav.is_user_visible());
    }

    #[test]
    fn test_invalid_transition_is_hidden() {
        let nav = NavError::invalid("view-details", FocusState::TableSelect);
        assert!(!nav.is_user_visible());
        assert_eq!(nav.to_string(), "'view-details' is not valid in TableSelect");
    }
}
