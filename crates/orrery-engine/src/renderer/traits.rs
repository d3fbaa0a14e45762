//! Renderer contract.
//!
//! The engine never draws. It hands a `FrameData` snapshot to whichever
//! backend the host provides (Canvas 2D in the browser bridge, a mock in
//! tests).

use super::camera::PerspectiveCamera;
use super::mesh_instance::MeshInstance;
use crate::components::mesh::Color;
use crate::systems::lighting::LightState;

/// Drawable size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// CSS size × device pixel ratio, rounded, at least 1×1.
    pub fn from_css(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let px = |v: f32| ((v * pixel_ratio).round().max(1.0)) as u32;
        Self {
            width: px(width),
            height: px(height),
        }
    }
}

/// Everything a backend needs for one frame.
pub struct FrameData<'a> {
    /// Draw records in scene order (backends sort as they need).
    pub instances: &'a [MeshInstance],
    pub camera: &'a PerspectiveCamera,
    pub lights: &'a LightState,
    pub background: Color,
    pub surface: SurfaceSize,
}

/// Rendering backend.
pub trait Renderer {
    /// Backend identifier (e.g. "canvas2d").
    fn backend(&self) -> &'static str;

    /// Resize the drawable to match the viewport. Called synchronously from
    /// every applied resize.
    fn resize(&mut self, size: SurfaceSize);

    /// Rasterize one frame.
    fn draw(&mut self, frame: &FrameData);
}
