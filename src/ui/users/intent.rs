use crate::model::{ImageData, User};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum UserIntent {
    LoadUsers,
    /// Submit the form. The image is required for a new user.
    AddUser {
        name: String,
        email: String,
        image: Option<ImageData>,
    },
    DeleteUser(User),
    ClearUsers,
    /// Narrow the current list. Does not widen it again; use `LoadUsers`.
    SearchUser(String),
    UpdateName(String),
    UpdateEmail(String),
    /// Restore the most recently deleted user under a fresh id.
    UndoDelete,
    /// Reference picked from the gallery.
    SelectImage(String),
    CaptureImage(ImageData),
}

impl Intent for UserIntent {}
