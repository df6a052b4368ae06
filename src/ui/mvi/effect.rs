//! Base trait for one-shot effects in MVI architecture.

/// Marker trait for effect objects.
///
/// Effects are delivered to the view once and never become part of
/// the state, so re-reading the state never replays them.
pub trait Effect: Clone + Send + 'static {}
