use glam::{Mat4, Vec2, Vec3};
use crate::api::game::CameraConfig;

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance to the first surface point of a sphere in front of the origin.
    ///
    /// A ray starting inside the sphere hits at the exit point. Spheres
    /// entirely behind the origin are misses.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Perspective camera looking from `position` at `target`.
///
/// The projection matrix is cached: after changing `fov_y`, `aspect`,
/// `near` or `far`, call `update_projection_matrix`. The view matrix is
/// refreshed by `set_position` / `look_at`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height of the viewport.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
    view: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: fov_y_deg.to_radians(),
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera.update_view_matrix();
        camera
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov_y_deg, aspect, config.near, config.far);
        camera.position = Vec3::from(config.position);
        camera.look_at(Vec3::from(config.target));
        camera
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.update_view_matrix();
    }

    /// Rebuild the cached projection from fov/aspect/near/far.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far);
    }

    fn update_view_matrix(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.target, self.up);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Camera-space up and right axes in world coordinates.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }

    /// World point → normalized device coordinates (x, y in [-1, 1] when
    /// visible, z in [-1, 1] between near and far planes).
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let on_near_plane = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        Ray::new(self.position, on_near_plane - self.position)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_down() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
        camera.set_position(Vec3::new(0.0, 110.0, 50.0));
        camera.look_at(Vec3::ZERO);
        camera
    }

    #[test]
    fn target_projects_to_center() {
        let camera = top_down();
        let ndc = camera.project(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "ndc = {ndc:?}");
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = top_down();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - camera.forward()).length() < 1e-4);
    }

    #[test]
    fn ray_round_trips_projection() {
        let camera = top_down();
        let world = Vec3::new(20.0, 0.0, -12.0);
        let ndc = camera.project(world);
        let ray = camera.ray_from_ndc(Vec2::new(ndc.x, ndc.y));
        let t = (world - ray.origin).length();
        assert!((ray.origin + ray.direction * t - world).length() < 1e-2);
    }

    #[test]
    fn sphere_hit_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_is_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn ray_inside_sphere_hits_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_off_axis_is_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn projection_refresh_tracks_aspect() {
        let mut camera = top_down();
        let before = camera.projection_matrix();
        camera.aspect = 1.0;
        assert_eq!(camera.projection_matrix(), before);
        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }
}
