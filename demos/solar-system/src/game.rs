//! Solar System: a lit sun-centered scene with eight planets on circular
//! orbits, faint orbit rings, and a ring attached to Saturn.
//!
//! Positions are a pure function of wall-clock time; only the axial spin
//! accumulates per frame.

use glam::{Quat, Vec3};
use orrery_engine::{
    AmbientLight, Color, EngineContext, Entity, EntityId, Game, GameConfig,
    LegendEntry, LocalTransform, MeshComponent, PointLight, Scene,
};

use crate::bodies::{self, PlanetDescriptor};
use crate::orbit;

/// Simulation metadata for one spawned planet, keyed by its entity id.
#[derive(Debug, Clone)]
struct PlanetBody {
    id: EntityId,
    name: &'static str,
    distance: f32,
    spin: f32,
}

pub struct SolarSystem {
    registry: Vec<PlanetDescriptor>,
    sun_id: Option<EntityId>,
    sun_spin: f32,
    planets: Vec<PlanetBody>,
    orbit_ring_ids: Vec<EntityId>,
    saturn_ring_id: Option<EntityId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_registry(bodies::PLANETS.to_vec())
    }

    /// Build from a custom planet table (the default is `bodies::PLANETS`).
    pub fn with_registry(registry: Vec<PlanetDescriptor>) -> Self {
        Self {
            registry,
            sun_id: None,
            sun_spin: 0.0,
            planets: Vec::new(),
            orbit_ring_ids: Vec::new(),
            saturn_ring_id: None,
        }
    }

    fn spawn_lights(ctx: &mut EngineContext) {
        ctx.lights
            .set_ambient(AmbientLight::new(Color::WHITE, bodies::AMBIENT_INTENSITY));
        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            Color::WHITE,
            bodies::SUN_LIGHT_INTENSITY,
        ));
    }

    fn spawn_sun(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        let mesh = MeshComponent::sphere(bodies::SUN_RADIUS, Color::from_hex(bodies::SUN_COLOR))
            .unlit();
        self.sun_id = Some(ctx.spawn(Entity::new(id).with_tag("Sun").with_mesh(mesh)));
    }

    fn spawn_planet(&mut self, ctx: &mut EngineContext, planet: &PlanetDescriptor) {
        let id = ctx.next_id();
        let (x, z) = orbit::orbital_position(planet.distance as f64, 0.0);
        ctx.spawn(
            Entity::new(id)
                .with_tag(planet.name)
                .with_position(Vec3::new(x as f32, 0.0, z as f32))
                .with_mesh(MeshComponent::sphere(planet.radius, Color::from_hex(planet.color)))
                .pickable(),
        );
        self.planets.push(PlanetBody {
            id,
            name: planet.name,
            distance: planet.distance,
            spin: 0.0,
        });

        let ring_id = ctx.next_id();
        let ring = MeshComponent::ring(
            planet.distance - bodies::ORBIT_RING_HALF_WIDTH,
            planet.distance + bodies::ORBIT_RING_HALF_WIDTH,
            Color::WHITE,
        )
        .with_opacity(bodies::ORBIT_RING_OPACITY)
        .double_sided()
        .unlit();
        self.orbit_ring_ids.push(ctx.spawn(
            Entity::new(ring_id)
                .with_tag(format!("{} orbit", planet.name))
                .with_mesh(ring),
        ));
    }

    /// Attach the decorative ring to the planet tagged `RINGED_PLANET`.
    /// Skipped with a warning when the registry has no such planet.
    fn attach_saturn_ring(&mut self, ctx: &mut EngineContext) {
        let Some(saturn) = ctx.scene.find_by_tag(bodies::RINGED_PLANET).map(|e| e.id) else {
            log::warn!("no planet named {}, skipping its ring", bodies::RINGED_PLANET);
            return;
        };
        let id = ctx.next_id();
        let ring = MeshComponent::ring(
            bodies::SATURN_RING_INNER,
            bodies::SATURN_RING_OUTER,
            Color::from_hex(bodies::SATURN_RING_COLOR),
        )
        .with_opacity(bodies::SATURN_RING_OPACITY)
        .double_sided()
        .unlit();
        let entity = Entity::new(id).with_tag("Saturn ring").with_mesh(ring);
        self.saturn_ring_id = Some(ctx.attach(entity, saturn, LocalTransform::new()));
    }

    /// Move every planet to its orbit position at `time_ms` and advance its
    /// axial spin by one step.
    pub fn update_positions(&mut self, scene: &mut Scene, time_ms: f64) {
        for body in &mut self.planets {
            let Some(entity) = scene.get_mut(body.id) else { continue };
            let (x, z) = orbit::orbital_position(body.distance as f64, time_ms);
            body.spin += orbit::PLANET_SPIN_STEP;
            entity.position = Vec3::new(x as f32, 0.0, z as f32);
            entity.rotation = Quat::from_rotation_y(body.spin);
        }
    }

    pub fn sun_id(&self) -> Option<EntityId> {
        self.sun_id
    }

    pub fn saturn_ring_id(&self) -> Option<EntityId> {
        self.saturn_ring_id
    }

    pub fn orbit_ring_ids(&self) -> &[EntityId] {
        &self.orbit_ring_ids
    }

    /// Entity id of the planet with `name`.
    pub fn planet_id(&self, name: &str) -> Option<EntityId> {
        self.planets.iter().find(|b| b.name == name).map(|b| b.id)
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        Self::spawn_lights(ctx);
        self.spawn_sun(ctx);
        let registry = self.registry.clone();
        for planet in &registry {
            self.spawn_planet(ctx, planet);
        }
        self.attach_saturn_ring(ctx);
        log::info!("solar system: {} planets", self.planets.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, time_ms: f64) {
        self.update_positions(&mut ctx.scene, time_ms);

        self.sun_spin += orbit::SUN_SPIN_STEP;
        if let Some(sun) = self.sun_id.and_then(|id| ctx.scene.get_mut(id)) {
            sun.rotation = Quat::from_rotation_y(self.sun_spin);
        }
    }

    fn pick_label(&self, id: EntityId) -> Option<&str> {
        self.planets.iter().find(|b| b.id == id).map(|b| b.name)
    }

    fn legend(&self) -> Vec<LegendEntry> {
        bodies::legend(&self.registry)
    }
}
