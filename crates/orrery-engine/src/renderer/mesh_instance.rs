use glam::Vec3;
use crate::components::mesh::Color;

/// Per-instance draw record handed to renderers.
///
/// Rings lie in the world XZ plane around `position`; `radius` is the outer
/// radius and `inner_radius` the hole. Spheres ignore `inner_radius`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshInstance {
    pub position: Vec3,
    pub radius: f32,
    pub inner_radius: f32,
    /// Rotation about the world Y axis, radians.
    pub yaw: f32,
    pub color: Color,
    pub opacity: f32,
    pub ring: bool,
    /// Ignores lights.
    pub unlit: bool,
    pub double_sided: bool,
    pub segments: u32,
}

impl MeshInstance {
    /// Whether the visible face points at `eye`. A ring's front face looks
    /// up (+Y); its underside only shows when it is double-sided.
    pub fn faces(&self, eye: Vec3) -> bool {
        !self.ring || self.double_sided || eye.y >= self.position.y
    }
}

/// Per-frame list of draw records, rebuilt after every motion update.
#[derive(Debug, Default)]
pub struct DrawList {
    instances: Vec<MeshInstance>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sided_ring_hides_its_underside() {
        let ring = MeshInstance { ring: true, ..Default::default() };
        assert!(ring.faces(Vec3::new(0.0, 110.0, 50.0)));
        assert!(!ring.faces(Vec3::new(0.0, -20.0, 50.0)));

        let both = MeshInstance { double_sided: true, ..ring };
        assert!(both.faces(Vec3::new(0.0, -20.0, 50.0)));
    }

    #[test]
    fn spheres_face_every_eye() {
        let sphere = MeshInstance { radius: 1.0, ..Default::default() };
        assert!(sphere.faces(Vec3::new(0.0, -20.0, 0.0)));
    }
}
