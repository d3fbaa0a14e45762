//! Circular orbital motion - pure math, no engine dependencies.
//!
//! Uses f64 throughout: wall-clock milliseconds times the angular speed is
//! a large angle. Only convert to f32 when writing entity transforms.

/// Angular speed at unit distance, radians per millisecond.
pub const ORBIT_SPEED_K: f64 = 0.001;

/// Self-rotation added to every planet per frame (radians).
pub const PLANET_SPIN_STEP: f32 = 0.02;

/// Self-rotation added to the sun per frame (radians).
pub const SUN_SPIN_STEP: f32 = 0.002;

/// Radians per millisecond. Farther planets revolve more slowly
/// (k / sqrt(d), a qualitative nod to Kepler's third law).
pub fn angular_speed(distance: f64) -> f64 {
    ORBIT_SPEED_K / distance.sqrt()
}

/// Orbit angle at absolute time `time_ms`. Unbounded; trig wraps it.
pub fn orbit_angle(distance: f64, time_ms: f64) -> f64 {
    time_ms * angular_speed(distance)
}

/// Position (x, z) in the orbital plane at absolute time `time_ms`.
pub fn orbital_position(distance: f64, time_ms: f64) -> (f64, f64) {
    let angle = orbit_angle(distance, time_ms);
    (distance * angle.cos(), distance * angle.sin())
}
