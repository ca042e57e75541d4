use nalgebra::Point3;

use crate::consts::*;

// Closed-form motion. Everything here is a pure function of a timestamp (in
// milliseconds), so the same frame can be recomputed for any instant without
// accumulating error.

/// Position on a circular orbit in the xz-plane.
pub fn orbit_position(time_ms: f64, speed: f64, distance: f32) -> Point3<f32> {
    let angle = time_ms * speed;
    Point3::new(
        angle.cos() as f32 * distance,
        0.0,
        angle.sin() as f32 * distance,
    )
}

/// Vertical bobbing offset, bounded by `amplitude`.
pub fn bob_height(time_ms: f64, speed: f64, amplitude: f32) -> f32 {
    (time_ms * speed).sin() as f32 * amplitude
}

/// Uniform scale factor pulsing around 1.
pub fn pulse_scale(time_ms: f64, speed: f64, amplitude: f32) -> f32 {
    1.0 + (time_ms * speed).sin() as f32 * amplitude
}

/// Tilt of the nebula backdrop around the x and y axes, driven by an
/// accumulated phase rather than the clock.
pub fn nebula_tilt(phase: f32) -> (f32, f32) {
    (
        phase.sin() * NEBULA_TILT_AMPLITUDE,
        phase.cos() * NEBULA_TILT_AMPLITUDE,
    )
}

/// Per-frame rotation accumulators for everything that spins in place.
///
/// Orbital positions are functions of the clock, but self-rotation advances by
/// a fixed step each frame, so it needs a little state.
#[derive(Debug, Clone)]
pub struct SpinState {
    pub planets: Vec<f32>,
    pub rings: Vec<f32>,
    pub sun: f32,
    pub station: f32,
    pub stars: f32,
    pub nebula_phase: f32,
}

impl SpinState {
    pub fn new(num_planets: usize) -> Self {
        SpinState {
            planets: vec![0.0; num_planets],
            rings: vec![0.0; num_planets],
            sun: 0.0,
            station: 0.0,
            stars: 0.0,
            nebula_phase: 0.0,
        }
    }

    /// Advance every accumulator by one frame. Outer planets spin slower:
    /// planet i advances by `PLANET_SPIN_RATE / (i + 1)`.
    pub fn advance(&mut self) {
        for (i, spin) in self.planets.iter_mut().enumerate() {
            *spin += PLANET_SPIN_RATE / (i + 1) as f32;
        }
        for spin in self.rings.iter_mut() {
            *spin += RING_SPIN_RATE;
        }
        self.sun += SUN_SPIN_RATE;
        self.station += STATION_SPIN_RATE;
        self.stars += STAR_SPIN_RATE;
        self.nebula_phase += NEBULA_PHASE_RATE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orbit_starts_on_x_axis() {
        let p = orbit_position(0.0, 0.0009, 20.0);
        assert_relative_eq!(p.x, 20.0);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_orbit_radius_is_constant() {
        for &t in &[0.0, 17.3, 4_000.0, 1.0e7, 8.64e7] {
            let p = orbit_position(t, 0.001422, 10.0);
            assert_relative_eq!(p.x * p.x + p.z * p.z, 100.0, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_pulse_scale_bounds() {
        for i in 0..1000 {
            let s = pulse_scale(i as f64 * 37.0, GLOW_PULSE_SPEED, GLOW_PULSE_AMPLITUDE);
            assert!(s >= 0.9 - 1e-6 && s <= 1.1 + 1e-6);
        }
    }

    #[test]
    fn test_bob_height_bounds() {
        for i in 0..1000 {
            let h = bob_height(i as f64 * 91.0, STATION_BOB_SPEED, STATION_BOB_AMPLITUDE);
            assert!(h.abs() <= STATION_BOB_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn test_nebula_tilt_bounds() {
        let (x, y) = nebula_tilt(0.35);
        assert!(x.abs() <= NEBULA_TILT_AMPLITUDE);
        assert!(y.abs() <= NEBULA_TILT_AMPLITUDE);
        // the two axes are a quarter-phase apart
        assert_relative_eq!(
            x * x + y * y,
            NEBULA_TILT_AMPLITUDE * NEBULA_TILT_AMPLITUDE,
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_spin_rate_scales_with_index() {
        let mut spins = SpinState::new(8);
        spins.advance();
        let first = spins.clone();
        spins.advance();

        for i in 0..8 {
            let delta = spins.planets[i] - first.planets[i];
            assert_relative_eq!(delta, PLANET_SPIN_RATE / (i + 1) as f32);
        }
        assert_relative_eq!(spins.rings[0] - first.rings[0], RING_SPIN_RATE);
        assert_relative_eq!(spins.sun - first.sun, SUN_SPIN_RATE);
        assert_relative_eq!(spins.stars - first.stars, STAR_SPIN_RATE);
    }
}
