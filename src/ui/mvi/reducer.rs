//! State transitions.

use super::action::Action;
use super::state::UiState;

/// Folds one action into the current state.
///
/// Implementations take no locks and do no I/O, so a transition can be
/// tested by calling `reduce` with a hand-built state.
pub trait Reducer {
    type State: UiState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
