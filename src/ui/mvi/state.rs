//! What the view renders.

/// Marker for screen state.
///
/// A state is a complete snapshot: the view can redraw from it alone.
/// `Default` is the screen before anything has loaded, and `PartialEq`
/// lets subscribers skip redundant redraws.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
