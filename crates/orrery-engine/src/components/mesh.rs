use serde::{Deserialize, Serialize};

/// Linear RGB color, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Pack back into `0xRRGGBB`, clamping out-of-range channels.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS hex notation, e.g. `#8c7c6e`.
    pub fn to_css_hex(self) -> String {
        format!("#{:06x}", self.to_hex())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Mesh primitive. Rings lie in their entity's local XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Sphere { radius: f32, segments: u32 },
    Ring { inner: f32, outer: f32, segments: u32 },
}

/// Whether a mesh responds to scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Ambient plus diffuse point-light contribution.
    Lit,
    /// Flat color, ignores lights (emissive bodies, decorations).
    Unlit,
}

/// Component for renderable meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: Color,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
    pub shading: Shading,
    pub double_sided: bool,
}

const DEFAULT_SPHERE_SEGMENTS: u32 = 32;
const DEFAULT_RING_SEGMENTS: u32 = 64;

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::Sphere { radius: 1.0, segments: DEFAULT_SPHERE_SEGMENTS },
            color: Color::default(),
            opacity: 1.0,
            shading: Shading::Lit,
            double_sided: false,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: MeshShape, color: Color) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(MeshShape::Sphere { radius, segments: DEFAULT_SPHERE_SEGMENTS }, color)
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self::new(MeshShape::Ring { inner, outer, segments: DEFAULT_RING_SEGMENTS }, color)
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn unlit(mut self) -> Self {
        self.shading = Shading::Unlit;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}
