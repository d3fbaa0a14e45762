//! Viewport tracking: keeps the camera's aspect ratio and the drawable
//! surface in step with the host element size.

use log::debug;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::SurfaceSize;

/// Host viewport in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Non-finite or non-positive pixel ratios fall back to 1.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self { width, height, pixel_ratio }
    }

    /// A zero, negative or non-finite dimension. Such resizes are ignored.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::from_css(self.width, self.height, self.pixel_ratio)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

/// Set the camera aspect to the viewport's and rebuild its projection.
/// Returns the surface size the renderer should adopt, or `None` when the
/// viewport is degenerate and nothing was changed.
pub fn apply_resize(camera: &mut PerspectiveCamera, viewport: &Viewport) -> Option<SurfaceSize> {
    if viewport.is_degenerate() {
        debug!(
            "ignoring degenerate viewport {}x{}",
            viewport.width, viewport.height
        );
        return None;
    }
    camera.aspect = viewport.aspect();
    camera.update_projection_matrix();
    Some(viewport.surface_size())
}
