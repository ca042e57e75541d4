pub mod canvas;
pub mod procedural;

pub use self::canvas::{rgb, stop, Canvas, Compositing, GradientStop, TextureError};
pub use self::procedural::{
    nebula, planet, ring, solar_panel, sun, NEBULA_SIZE, PANEL_SIZE, PLANET_SIZE, RING_HEIGHT,
    RING_WIDTH, SUN_SIZE,
};
