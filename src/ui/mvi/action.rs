//! Base trait for reducer actions in MVI architecture.

/// Marker trait for state transitions.
///
/// Unlike intents, actions carry everything the reducer needs:
/// results of repository calls, validation outcomes, loading flags.
pub trait Action: Send + 'static {}
