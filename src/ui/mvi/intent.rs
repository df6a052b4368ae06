//! What the view asks for.

/// Marker for intents: one per button press, field edit or picked image.
///
/// A dispatcher validates an intent, runs whatever I/O it needs and
/// reports the outcome as [`Action`](super::Action)s.
pub trait Intent: Send + 'static {}
