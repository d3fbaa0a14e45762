use serde::{Deserialize, Serialize};
use crate::api::error::InitError;
use crate::api::types::{EntityId, LegendEntry};
use crate::components::entity::Entity;
use crate::components::mesh::Color;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::lighting::LightState;

/// Initial camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 110.0, 50.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Configuration for the engine, provided by the game.
/// Hosts may override any field with a JSON document; missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub camera: CameraConfig,
    /// Clear color behind the scene.
    pub background: Color,
    /// Optional upper bound on the device pixel ratio of the drawable
    /// surface. Unset by default: the surface matches the device density.
    pub max_pixel_ratio: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            background: Color::BLACK,
            max_pixel_ratio: None,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self, InitError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply a JSON override on top of this configuration. Objects merge
    /// key by key; anything else replaces the current value.
    pub fn with_overrides(&self, json: &str) -> Result<Self, InitError> {
        let mut value = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        merge_json(&mut value, patch);
        Ok(serde_json::from_value(value)?)
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// The core contract every scene must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Spawn entities, lights and hierarchy links.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Advance the animation to wall-clock time `time_ms` (milliseconds).
    /// Positions must be a pure function of the timestamp.
    fn update(&mut self, ctx: &mut EngineContext, time_ms: f64);

    /// Display name for a picked entity, `None` if it is not selectable.
    fn pick_label(&self, id: EntityId) -> Option<&str>;

    /// Legend shown next to the view.
    fn legend(&self) -> Vec<LegendEntry> {
        Vec::new()
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub transforms: TransformGraph,
    pub lights: LightState,
    pub camera: PerspectiveCamera,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            transforms: TransformGraph::new(),
            lights: LightState::new(),
            camera: PerspectiveCamera::from_config(&config.camera, 1.0),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene. Returns its id.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Add an entity as a child of `parent`. Its world transform is derived
    /// from the parent's on every `sync_transforms`.
    pub fn attach(&mut self, child: Entity, parent: EntityId, local: LocalTransform) -> EntityId {
        let id = self.spawn(child);
        if !self.transforms.attach(id, parent, local) {
            log::warn!("entity {} not attached to {}: would form a loop", id.0, parent.0);
        }
        id
    }

    /// Push parent transforms down to attached children.
    pub fn sync_transforms(&mut self) {
        self.transforms.propagate(&mut self.scene);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
