//! Planet registry - the fixed table the scene is built from.
//!
//! Sizes and distances are display units, not astronomical ones: the eight
//! planets are spread evenly enough to be told apart at a glance.

use orrery_engine::{Color, LegendEntry};

/// Immutable description of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDescriptor {
    pub name: &'static str,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub radius: f32,
    /// Radius of the circular orbit around the origin.
    pub distance: f32,
}

impl PlanetDescriptor {
    pub const fn new(name: &'static str, color: u32, radius: f32, distance: f32) -> Self {
        Self { name, color, radius, distance }
    }
}

pub const PLANET_COUNT: usize = 8;

/// Innermost first.
pub const PLANETS: [PlanetDescriptor; PLANET_COUNT] = [
    PlanetDescriptor::new("Mercury", 0x8c7c6e, 0.8, 10.0),
    PlanetDescriptor::new("Venus", 0xe6c389, 1.5, 15.0),
    PlanetDescriptor::new("Earth", 0x6b93d6, 1.6, 20.0),
    PlanetDescriptor::new("Mars", 0xc1440e, 1.2, 25.0),
    PlanetDescriptor::new("Jupiter", 0xd8ca9d, 3.5, 35.0),
    PlanetDescriptor::new("Saturn", 0xead6b8, 3.0, 45.0),
    PlanetDescriptor::new("Uranus", 0xc3d4d2, 2.5, 55.0),
    PlanetDescriptor::new("Neptune", 0x5b5ddf, 2.4, 65.0),
];

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 5.0;
pub const SUN_COLOR: u32 = 0xffdd00;

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const SUN_LIGHT_INTENSITY: f32 = 2.0;

// ── Orbit indicators ─────────────────────────────────────────────────

/// Half the width of an orbit ring, on each side of the orbit radius.
pub const ORBIT_RING_HALF_WIDTH: f32 = 0.1;
pub const ORBIT_RING_OPACITY: f32 = 0.2;

// ── Saturn's ring ────────────────────────────────────────────────────

pub const RINGED_PLANET: &str = "Saturn";
pub const SATURN_RING_INNER: f32 = 4.0;
pub const SATURN_RING_OUTER: f32 = 6.0;
pub const SATURN_RING_COLOR: u32 = 0xa49b72;
pub const SATURN_RING_OPACITY: f32 = 0.7;

/// Name + CSS color rows for the legend panel, in registry order.
pub fn legend(registry: &[PlanetDescriptor]) -> Vec<LegendEntry> {
    registry
        .iter()
        .map(|p| LegendEntry::new(p.name, Color::from_hex(p.color).to_css_hex()))
        .collect()
}
