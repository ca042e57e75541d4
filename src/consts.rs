// Scene and animation constants. Per-frame rates are radians per frame;
// time-driven speeds are radians per millisecond.

pub const SUN_RADIUS: f32 = 5.0;
pub const GLOW_RADIUS: f32 = 5.5;
pub const NEBULA_RADIUS: f32 = 500.0;

pub const MOON_RADIUS: f32 = 0.2;
// The moon orbits at twice its parent's radius
pub const MOON_ORBIT_SCALE: f32 = 2.0;
pub const MOON_ORBIT_SPEED: f64 = 0.001;

// Ring annulus, as multiples of the parent planet's radius
pub const RING_INNER_SCALE: f32 = 1.5;
pub const RING_OUTER_SCALE: f32 = 2.2;
pub const RING_SEGMENTS: u16 = 128;

// Base rate for planet self-rotation; each planet spins at this rate
// divided by (index + 1) in catalog order.
pub const PLANET_SPIN_RATE: f32 = 0.005;
pub const RING_SPIN_RATE: f32 = 0.001;
pub const SUN_SPIN_RATE: f32 = 0.001;
pub const STATION_SPIN_RATE: f32 = 0.001;
pub const STAR_SPIN_RATE: f32 = 0.00005;
pub const NEBULA_PHASE_RATE: f32 = 0.0001;
pub const NEBULA_TILT_AMPLITUDE: f32 = 0.1;

pub const GLOW_PULSE_SPEED: f64 = 0.001;
pub const GLOW_PULSE_AMPLITUDE: f32 = 0.1;

pub const STATION_ORBIT_RADIUS: f32 = 50.0;
pub const STATION_ORBIT_SPEED: f64 = 0.0002;
pub const STATION_BOB_SPEED: f64 = 0.0005;
pub const STATION_BOB_AMPLITUDE: f32 = 10.0;

pub const STAR_COUNT: usize = 15000;
pub const STAR_SPREAD: f32 = 2000.0;
