//! Core of a single-screen user-management form.
//!
//! The screen follows Model-View-Intent: the view submits
//! [`UserIntent`](ui::users::UserIntent)s to a
//! [`UserDispatcher`](ui::users::UserDispatcher), renders the
//! [`UserViewState`](ui::users::UserViewState) it publishes, and shows
//! each [`UserEffect`](ui::users::UserEffect) once.

pub mod cli;
pub mod config;
pub mod images;
pub mod logging;
pub mod model;
pub mod repository;
pub mod ui;
