use crate::ui::mvi::Reducer;
use crate::ui::users::action::UserAction;
use crate::ui::users::state::UserViewState;
use crate::ui::users::validation::{is_email_invalid, is_name_invalid};

pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserViewState;
    type Action = UserAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            UserAction::NameEdited(name) => UserViewState {
                name_error: is_name_invalid(&name),
                name,
                ..state
            },
            UserAction::EmailEdited(email) => UserViewState {
                email_error: is_email_invalid(&email),
                email,
                ..state
            },
            UserAction::ValidationFailed {
                name_error,
                email_error,
            } => UserViewState {
                name_error,
                email_error,
                ..state
            },
            UserAction::LoadingStarted => UserViewState {
                is_loading: true,
                ..state
            },
            UserAction::UsersLoaded(users) => UserViewState { users, ..state },
            UserAction::UserAdded { users, is_loading } => UserViewState {
                is_loading,
                users,
                name: String::new(),
                email: String::new(),
                name_error: false,
                email_error: false,
                selected_image_ref: None,
                ..state
            },
            UserAction::UsersChanged { users, is_loading } => UserViewState {
                is_loading,
                users,
                ..state
            },
            UserAction::OperationFailed { is_loading } => UserViewState {
                is_loading,
                ..state
            },
            UserAction::SearchApplied(query) => {
                let users = state
                    .users
                    .into_iter()
                    .filter(|user| user.matches(&query))
                    .collect();
                UserViewState {
                    users,
                    search_query: query,
                    ..state
                }
            }
            UserAction::ImageSelected(selected_image_ref) => UserViewState {
                selected_image_ref,
                ..state
            },
        }
    }
}
