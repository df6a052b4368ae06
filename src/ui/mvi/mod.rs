//! Building blocks for the user screen's one-way data flow.
//!
//! ```text
//! Intent ──→ Dispatcher ──→ Action ──→ Reducer ──→ State ──→ View
//!    ↑            │                                          │
//!    │            └──→ Effect (one-shot) ──────────────────→ │
//!    └───────────────────────────────────────────────────────┘
//! ```
//!
//! The dispatcher is the only writer of state. Effects travel on their
//! own channel so re-reading the state never repeats a notification.

mod action;
mod effect;
mod intent;
mod reducer;
mod state;

pub use action::Action;
pub use effect::Effect;
pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
