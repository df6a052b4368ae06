use serde::Serialize;

use crate::model::User;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UserViewState {
    /// Set while an add, delete or clear is in flight.
    pub is_loading: bool,
    pub users: Vec<User>,
    pub name: String,
    pub email: String,
    pub name_error: bool,
    pub email_error: bool,
    pub search_query: String,
    pub selected_image_ref: Option<String>,
}

impl UiState for UserViewState {}
