use glam::EulerRot;
use crate::components::entity::Entity;
use crate::components::mesh::{MeshShape, Shading};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::mesh_instance::{DrawList, MeshInstance};

/// Build the draw list from entities with mesh components.
/// Sizes are scaled by the entity's largest world scale component.
pub fn build_draw_list<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    list: &mut DrawList,
) {
    list.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let scale = entity.scale.max_element();
        let (ring, radius, inner_radius, segments) = match mesh.shape {
            MeshShape::Sphere { radius, segments } => (false, radius * scale, 0.0, segments),
            MeshShape::Ring { inner, outer, segments } => {
                (true, outer * scale, inner * scale, segments)
            }
        };
        let (yaw, _, _) = entity.rotation.to_euler(EulerRot::YXZ);
        list.push(MeshInstance {
            position: entity.position,
            radius,
            inner_radius,
            yaw,
            color: mesh.color,
            opacity: mesh.opacity,
            ring,
            unlit: mesh.shading == Shading::Unlit,
            double_sided: mesh.double_sided,
            segments,
        });
    }
}

/// Painter's order for `instances`: every ring first, then the spheres,
/// each group farthest-first from the camera.
///
/// Rings lie flat in the orbital plane under the bodies and share centers
/// with them (orbits at the sun, a planet's ring at the planet), so a
/// center-distance sort alone would paint wide orbit rings over far planets.
pub fn back_to_front(instances: &[MeshInstance], camera: &PerspectiveCamera) -> Vec<usize> {
    let mut order: Vec<(usize, bool, f32)> = instances
        .iter()
        .enumerate()
        .map(|(i, inst)| (i, inst.ring, inst.position.distance_squared(camera.position)))
        .collect();
    order.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });
    order.into_iter().map(|(i, _, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{Color, MeshComponent};
    use glam::{Quat, Vec3};

    #[test]
    fn build_draw_list_from_entity_with_mesh() {
        let entity = Entity::new(EntityId(1))
            .with_position(Vec3::new(10.0, 0.0, -5.0))
            .with_rotation(Quat::from_rotation_y(0.5))
            .with_mesh(MeshComponent::sphere(1.6, Color::from_hex(0x6b93d6)));

        let entities = vec![entity];
        let mut list = DrawList::new();
        build_draw_list(entities.iter(), &mut list);

        assert_eq!(list.len(), 1);
        let inst = list.instances()[0];
        assert_eq!(inst.position, Vec3::new(10.0, 0.0, -5.0));
        assert_eq!(inst.radius, 1.6);
        assert!(!inst.ring);
        assert!(!inst.unlit);
        assert!((inst.yaw - 0.5).abs() < 1e-5);
    }

    #[test]
    fn build_draw_list_skips_inactive_and_no_mesh() {
        let e1 = Entity::new(EntityId(1)); // no mesh
        let mut e2 = Entity::new(EntityId(2)).with_mesh(MeshComponent::default());
        e2.active = false;
        let e3 = Entity::new(EntityId(3))
            .with_mesh(MeshComponent::ring(4.0, 6.0, Color::WHITE).unlit().double_sided());

        let entities = vec![e1, e2, e3];
        let mut list = DrawList::new();
        build_draw_list(entities.iter(), &mut list);

        assert_eq!(list.len(), 1);
        let ring = list.instances()[0];
        assert!(ring.ring && ring.unlit && ring.double_sided);
        assert_eq!(ring.segments, 64);
        assert_eq!((ring.inner_radius, ring.radius), (4.0, 6.0));
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let entities = vec![Entity::new(EntityId(1)).with_mesh(MeshComponent::default())];
        let mut list = DrawList::new();
        build_draw_list(entities.iter(), &mut list);
        build_draw_list(entities.iter(), &mut list);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn painter_order_is_farthest_first() {
        let camera = PerspectiveCamera::default();
        let near = MeshInstance { position: Vec3::new(0.0, 100.0, 0.0), ..Default::default() };
        let far = MeshInstance { position: Vec3::new(0.0, 0.0, -60.0), ..Default::default() };
        let order = back_to_front(&[near, far], &camera);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn orbit_rings_go_under_far_planets() {
        let camera = PerspectiveCamera::default();
        let neptune = MeshInstance {
            position: Vec3::new(0.0, 0.0, -90.0),
            radius: 1.5,
            ..Default::default()
        };
        let orbit = MeshInstance {
            radius: 90.1,
            inner_radius: 89.9,
            ring: true,
            ..Default::default()
        };
        let sun = MeshInstance { radius: 5.0, ..Default::default() };

        // Neptune is farther from the eye than the orbit's center
        assert_eq!(back_to_front(&[neptune, orbit, sun], &camera), vec![1, 0, 2]);
    }
}
