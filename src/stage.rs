//! Collaborators the controller drives but does not own the behaviour of.

use crate::layout::ItemTransform;

/// Render target for poster geometry.
///
/// All transforms for one frame are applied back to back from a single
/// `tick`, so an implementation may batch them.
pub trait Stage {
    fn apply_transform(&mut self, index: usize, transform: &ItemTransform);

    fn set_container_opacity(&mut self, opacity: f64);

    /// Called whenever the logical center changes.
    fn mark_centered(&mut self, _index: usize) {}
}

/// Background slideshow kept in step with the carousel.
pub trait Backdrop {
    fn total_images(&self) -> usize;

    /// Cross-fade to `index`, already wrapped into `0..total_images()`.
    fn set_background_image(&mut self, index: usize, transition_ms: f64);
}

/// A page without a backdrop behaves like a backdrop with no images.
impl<B: Backdrop> Backdrop for Option<B> {
    fn total_images(&self) -> usize {
        self.as_ref().map_or(0, Backdrop::total_images)
    }

    fn set_background_image(&mut self, index: usize, transition_ms: f64) {
        if let Some(backdrop) = self {
            backdrop.set_background_image(index, transition_ms);
        }
    }
}
