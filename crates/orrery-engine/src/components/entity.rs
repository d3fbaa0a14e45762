use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity: a single struct with optional components.
/// Position, rotation and scale are world-space; children in a
/// `TransformGraph` get theirs written by `TransformGraph::propagate`.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are neither drawn nor picked).
    pub active: bool,
    /// Position in world space.
    pub position: Vec3,
    /// Orientation in world space.
    pub rotation: Quat,
    /// Per-axis scale in world space.
    pub scale: Vec3,
    /// Renderable mesh (entities without one are invisible).
    pub mesh: Option<MeshComponent>,
    /// Whether pointer picking may select this entity.
    pub pickable: bool,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            mesh: None,
            pickable: false,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn pickable(mut self) -> Self {
        self.pickable = true;
        self
    }
}
