use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::systems::picking::is_pick_target;

/// Flat entity storage, kept in spawn order.
///
/// An orrery holds a few dozen bodies and decorations, so lookups are
/// linear scans; spawn order doubles as the draw order for equal depths.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities that pointer picking tests against.
    pub fn pick_targets(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| is_pick_target(e))
    }

    /// First entity whose tag equals `tag` (body names are tags).
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
