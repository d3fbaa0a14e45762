// extensions/transform.rs
//
// Satellite hierarchy: some entities ride along with another one
// (a ring on its planet). Keyed by EntityId and
// kept outside Scene, so unattached entities cost nothing.
//
// Roots own their world transform (whatever is written on the Entity).
// Attached entities are derived: world = parent_world * local, every propagate.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.attach(ring_id, planet_id, LocalTransform::new());
//   graph.propagate(&mut scene);  // ring follows planet

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Placement of an attached entity in its parent's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub offset: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose with a parent's world transform.
    fn under(&self, pos: Vec3, rot: Quat, scale: Vec3) -> (Vec3, Quat, Vec3) {
        (
            pos + rot * (self.offset * scale),
            rot * self.rotation,
            scale * self.scale,
        )
    }
}

#[derive(Debug, Clone)]
struct Link {
    parent: EntityId,
    local: LocalTransform,
}

#[derive(Debug, Default)]
pub struct TransformGraph {
    links: HashMap<EntityId, Link>,
    /// Attached entities per parent, in attach order.
    satellites: HashMap<EntityId, Vec<EntityId>>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `child` to `parent`, replacing any previous parent.
    /// Returns false, changing nothing, if the link would close a loop.
    pub fn attach(&mut self, child: EntityId, parent: EntityId, local: LocalTransform) -> bool {
        if child == parent || self.descends_from(parent, child) {
            return false;
        }
        self.unlink(child);
        self.links.insert(child, Link { parent, local });
        self.satellites.entry(parent).or_default().push(child);
        true
    }

    fn unlink(&mut self, child: EntityId) {
        let Some(old) = self.links.remove(&child) else { return };
        if let Some(siblings) = self.satellites.get_mut(&old.parent) {
            siblings.retain(|&c| c != child);
            if siblings.is_empty() {
                self.satellites.remove(&old.parent);
            }
        }
    }

    fn descends_from(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut cursor = self.parent_of(id);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.parent_of(p);
        }
        false
    }

    pub fn parent_of(&self, id: EntityId) -> Option<EntityId> {
        self.links.get(&id).map(|link| link.parent)
    }

    pub fn satellites_of(&self, id: EntityId) -> &[EntityId] {
        self.satellites.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Number of attached entities.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Rewrite the world transform of every attached entity from its
    /// root's current one, walking parents before children.
    pub fn propagate(&self, scene: &mut Scene) {
        let roots = self
            .satellites
            .keys()
            .filter(|id| !self.links.contains_key(id));
        for &root in roots {
            let Some(entity) = scene.get(root) else { continue };
            let frame = (entity.position, entity.rotation, entity.scale);
            self.place_satellites(root, frame, scene);
        }
    }

    fn place_satellites(&self, parent: EntityId, frame: (Vec3, Quat, Vec3), scene: &mut Scene) {
        for &child in self.satellites_of(parent) {
            let Some(link) = self.links.get(&child) else { continue };
            let world = link.local.under(frame.0, frame.1, frame.2);
            if let Some(entity) = scene.get_mut(child) {
                entity.position = world.0;
                entity.rotation = world.1;
                entity.scale = world.2;
            }
            self.place_satellites(child, world, scene);
        }
    }
}
