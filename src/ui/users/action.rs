use crate::model::User;
use crate::ui::mvi::Action;

/// State transitions applied by [`UserReducer`](super::UserReducer).
///
/// Completion actions carry the loading flag to apply, because only the
/// dispatcher knows whether other repository calls are still queued.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    NameEdited(String),
    EmailEdited(String),
    /// A submit was rejected. Only the flags change; typed text stays.
    ValidationFailed { name_error: bool, email_error: bool },
    LoadingStarted,
    UsersLoaded(Vec<User>),
    /// A user was stored; also resets the form.
    UserAdded { users: Vec<User>, is_loading: bool },
    /// Result of a delete or clear.
    UsersChanged { users: Vec<User>, is_loading: bool },
    /// A repository call failed; the list keeps its last value.
    OperationFailed { is_loading: bool },
    SearchApplied(String),
    ImageSelected(Option<String>),
}

impl Action for UserAction {}
