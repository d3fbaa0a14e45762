//! Pointer picking: screen point → world ray → nearest pickable sphere.

use glam::Vec2;
use log::debug;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::MeshShape;
use crate::renderer::camera::PerspectiveCamera;

/// The pickable entity a ray struck first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: EntityId,
    /// Distance from the camera to the surface point along the ray.
    pub distance: f32,
}

/// Screen pixels → normalized device coordinates. Y is flipped so that
/// screen-down maps to NDC-down. `None` for an empty viewport.
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}

/// Whether an entity takes part in hit testing: active, opted in, and a sphere.
pub fn is_pick_target(entity: &Entity) -> bool {
    entity.active
        && entity.pickable
        && matches!(entity.mesh.map(|m| m.shape), Some(MeshShape::Sphere { .. }))
}

/// Cast a ray through the click point and return the nearest pickable hit.
///
/// Entities that are not pick targets are ignored even if passed in, so
/// callers may hand over the whole scene. Equal distances keep the
/// earlier entity.
pub fn pick<'a>(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    camera: &PerspectiveCamera,
    entities: impl IntoIterator<Item = &'a Entity>,
) -> Option<PickHit> {
    let ndc = screen_to_ndc(x, y, width, height)?;
    let ray = camera.ray_from_ndc(ndc);

    let mut best: Option<PickHit> = None;
    for entity in entities {
        if !is_pick_target(entity) {
            continue;
        }
        let Some(MeshShape::Sphere { radius, .. }) = entity.mesh.map(|m| m.shape) else {
            continue;
        };
        let world_radius = radius * entity.scale.max_element();
        if let Some(distance) = ray.intersect_sphere(entity.position, world_radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PickHit { id: entity.id, distance });
            }
        }
    }

    debug!("pick ({x:.0}, {y:.0}) -> {:?}", best.map(|h| h.id));
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, MeshComponent};
    use glam::Vec3;

    /// Camera on +Z looking at the origin, square viewport.
    fn front_camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 1000.0);
        camera.set_position(Vec3::new(0.0, 0.0, 100.0));
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn planet(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_position(pos)
            .with_mesh(MeshComponent::sphere(radius, Color::WHITE))
            .pickable()
    }

    fn screen_of(camera: &PerspectiveCamera, world: Vec3, w: f32, h: f32) -> (f32, f32) {
        let ndc = camera.project(world);
        ((ndc.x + 1.0) / 2.0 * w, (1.0 - ndc.y) / 2.0 * h)
    }

    #[test]
    fn ndc_corners() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(screen_to_ndc(400.0, 300.0, 800.0, 600.0), Some(Vec2::ZERO));
        assert_eq!(screen_to_ndc(1.0, 1.0, 0.0, 600.0), None);
    }

    #[test]
    fn click_on_single_sphere_hits_it() {
        let camera = front_camera();
        let entities = vec![planet(1, Vec3::new(20.0, 0.0, 0.0), 2.0)];
        let (sx, sy) = screen_of(&camera, Vec3::new(20.0, 0.0, 0.0), 800.0, 800.0);
        let hit = pick(sx, sy, 800.0, 800.0, &camera, &entities).unwrap();
        assert_eq!(hit.id, EntityId(1));
        assert!((hit.distance - (Vec3::new(20.0, 0.0, 0.0).distance(camera.position) - 2.0)).abs() < 0.1);
    }

    #[test]
    fn click_on_empty_space_misses() {
        let camera = front_camera();
        let entities = vec![planet(1, Vec3::new(20.0, 0.0, 0.0), 2.0)];
        assert!(pick(10.0, 10.0, 800.0, 800.0, &camera, &entities).is_none());
    }

    #[test]
    fn nearest_of_overlapping_spheres_wins() {
        let camera = front_camera();
        // Both on the center ray; id 2 is closer to the camera
        let entities = vec![
            planet(1, Vec3::new(0.0, 0.0, -30.0), 3.0),
            planet(2, Vec3::new(0.0, 0.0, 30.0), 1.0),
        ];
        let hit = pick(400.0, 400.0, 800.0, 800.0, &camera, &entities).unwrap();
        assert_eq!(hit.id, EntityId(2));

        // Order of the candidates does not matter
        let reversed: Vec<Entity> = entities.into_iter().rev().collect();
        let hit = pick(400.0, 400.0, 800.0, 800.0, &camera, &reversed).unwrap();
        assert_eq!(hit.id, EntityId(2));
    }

    #[test]
    fn non_pickable_entities_are_ignored() {
        let camera = front_camera();
        let sun = Entity::new(EntityId(1))
            .with_mesh(MeshComponent::sphere(5.0, Color::WHITE).unlit());
        let ring = Entity::new(EntityId(2))
            .with_mesh(MeshComponent::ring(4.0, 6.0, Color::WHITE))
            .pickable();
        let mut hidden = planet(3, Vec3::ZERO, 5.0);
        hidden.active = false;

        let entities = vec![sun, ring, hidden];
        assert!(pick(400.0, 400.0, 800.0, 800.0, &camera, &entities).is_none());
    }

    #[test]
    fn scale_grows_the_pick_target() {
        let camera = front_camera();
        let small = planet(1, Vec3::new(20.0, 0.0, 0.0), 1.0);
        let (sx, sy) = screen_of(&camera, Vec3::new(22.5, 0.0, 0.0), 800.0, 800.0);
        assert!(pick(sx, sy, 800.0, 800.0, &camera, std::slice::from_ref(&small)).is_none());

        let big = small.with_scale(Vec3::splat(3.0));
        assert!(pick(sx, sy, 800.0, 800.0, &camera, std::slice::from_ref(&big)).is_some());
    }

    #[test]
    fn empty_viewport_is_a_miss() {
        let camera = front_camera();
        let entities = vec![planet(1, Vec3::ZERO, 50.0)];
        assert!(pick(0.0, 0.0, 0.0, 0.0, &camera, &entities).is_none());
    }
}
