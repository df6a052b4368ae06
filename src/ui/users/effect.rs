use std::fmt;

use crate::ui::mvi::Effect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEffect {
    /// Transient notice, optionally with an action button (e.g. "Undo").
    ShowNotification {
        message: String,
        action_label: Option<String>,
    },
}

impl Effect for UserEffect {}

impl UserEffect {
    pub fn notice(message: impl Into<String>) -> Self {
        Self::ShowNotification {
            message: message.into(),
            action_label: None,
        }
    }

    pub fn notice_with_action(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::ShowNotification {
            message: message.into(),
            action_label: Some(action.into()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ShowNotification { message, .. } => message,
        }
    }
}

impl fmt::Display for UserEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowNotification {
                message,
                action_label: Some(action),
            } => write!(f, "{message} [{action}]"),
            Self::ShowNotification { message, .. } => write!(f, "{message}"),
        }
    }
}
