use nalgebra::Point3;

// All the immutable info about a body. Consumed once when the scene is built;
// the animation only reads radii, distances and speeds from it afterwards.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f32,
    pub orbital_distance: f32,
    /// Orbital angular speed, in radians per millisecond of wall-clock time.
    pub orbital_speed: f64,
    /// Flat fill color for the surface texture.
    pub base_color: Point3<f32>,
    /// Speckle color for the surface texture.
    pub detail_color: Point3<f32>,
    /// Ring annulus color; `None` means no ring.
    pub ring_color: Option<Point3<f32>>,
    pub has_moon: bool,
}

/// The ordered body catalog. Order matters: a planet's self-rotation rate is
/// derived from its position in this list.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    pub bodies: Vec<CelestialBody>,
}

impl SolarSystem {
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        SolarSystem { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
