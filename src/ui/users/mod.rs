//! The user-management screen: add, list, delete, undo and search users.

mod action;
mod dispatcher;
mod effect;
mod intent;
mod reducer;
mod state;
pub mod validation;

pub use action::UserAction;
pub use dispatcher::{EffectStream, StateStream, UserDispatcher};
pub use effect::UserEffect;
pub use intent::UserIntent;
pub use reducer::UserReducer;
pub use state::UserViewState;
