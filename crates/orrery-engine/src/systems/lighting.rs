//! Scene lighting: one uniform ambient term plus point lights.
//!
//! Lights are persistent: they stay until explicitly removed.

use glam::Vec3;
use crate::components::mesh::Color;

/// Non-directional light applied equally to every lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }
}

/// Omnidirectional light at a point, no distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

/// Manages active lights and the ambient term for the scene.
///
/// The ambient light defaults to full-intensity white, which leaves lit
/// surfaces at their base color when no point lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: AmbientLight,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: AmbientLight::new(Color::WHITE, 1.0),
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of point lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, ambient: AmbientLight) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Lambert shading of a surface point with unit `normal`.
    /// Channels are clamped to 1.0.
    pub fn shade(&self, point: Vec3, normal: Vec3, base: Color) -> Color {
        let mut r = self.ambient.color.r * self.ambient.intensity;
        let mut g = self.ambient.color.g * self.ambient.intensity;
        let mut b = self.ambient.color.b * self.ambient.intensity;

        for light in &self.lights {
            let to_light = (light.position - point).normalize_or_zero();
            let diffuse = normal.dot(to_light).max(0.0) * light.intensity;
            r += light.color.r * diffuse;
            g += light.color.g * diffuse;
            b += light.color.b * diffuse;
        }

        Color::new(
            (base.r * r).min(1.0),
            (base.g * g).min(1.0),
            (base.b * b).min(1.0),
        )
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
