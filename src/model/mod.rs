pub mod body;
pub mod motion;

pub use self::body::{CelestialBody, SolarSystem};
pub use self::motion::SpinState;
