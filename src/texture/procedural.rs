use std::f32::consts::TAU;

use nalgebra::Point3;
use rand::Rng;

use super::canvas::{rgb, stop, Canvas, Compositing};

pub const SUN_SIZE: u32 = 512;
pub const PLANET_SIZE: u32 = 512;
pub const RING_WIDTH: u32 = 512;
pub const RING_HEIGHT: u32 = 32;
pub const PANEL_SIZE: u32 = 256;
pub const NEBULA_SIZE: u32 = 1024;

const SUN_FLARES: usize = 20;
const PLANET_SPECKLES: usize = 5000;
const RING_BANDS: usize = 100;
const NEBULA_STARS: usize = 1000;
const NEBULA_BLOBS: usize = 5;
const NEBULA_WISPS: usize = 50;

/// Yellow-to-red radial gradient with additive flare strokes radiating past
/// the rim.
pub fn sun<R: Rng>(rng: &mut R) -> Canvas {
    let mut canvas = Canvas::new(SUN_SIZE, SUN_SIZE);
    let center = SUN_SIZE as f32 / 2.0;

    canvas.radial_gradient(
        center,
        center,
        center,
        &[
            stop(0.0, rgb(255, 255, 0), 1.0),
            stop(0.5, rgb(255, 165, 0), 1.0),
            stop(1.0, rgb(255, 69, 0), 1.0),
        ],
        Compositing::SourceOver,
    );

    let white = rgb(255, 255, 255);
    for _ in 0..SUN_FLARES {
        let angle = rng.gen::<f32>() * TAU;
        let length = rng.gen::<f32>() * 100.0 + 50.0;
        let alpha = rng.gen::<f32>() * 0.5 + 0.5;
        let width = rng.gen::<f32>() * 5.0 + 2.0;
        let (dx, dy) = (angle.cos(), angle.sin());
        canvas.stroke_line(
            center + dx * center,
            center + dy * center,
            center + dx * (center + length),
            center + dy * (center + length),
            width,
            white,
            alpha,
            Compositing::Additive,
        );
    }

    canvas
}

/// Flat base color, a few thousand translucent speckles of the detail color,
/// and a faint white rim composited in overlay mode as an atmosphere.
pub fn planet<R: Rng>(rng: &mut R, base: Point3<f32>, detail: Point3<f32>) -> Canvas {
    let mut canvas = Canvas::new(PLANET_SIZE, PLANET_SIZE);
    let size = PLANET_SIZE as f32;
    canvas.fill(base);

    for _ in 0..PLANET_SPECKLES {
        let x = rng.gen::<f32>() * size;
        let y = rng.gen::<f32>() * size;
        let radius = rng.gen::<f32>() * 3.0 + 1.0;
        let alpha = rng.gen::<f32>() * 0.5 + 0.5;
        canvas.fill_circle(x, y, radius, detail, alpha, Compositing::SourceOver);
    }

    let white = rgb(255, 255, 255);
    canvas.radial_gradient(
        size / 2.0,
        size / 2.0,
        size / 2.0,
        &[stop(0.0, white, 0.0), stop(1.0, white, 0.2)],
        Compositing::Overlay,
    );

    canvas
}

/// A horizontal band fading out at both edges, broken up by random
/// semi-transparent strips.
pub fn ring<R: Rng>(rng: &mut R, color: Point3<f32>) -> Canvas {
    let mut canvas = Canvas::new(RING_WIDTH, RING_HEIGHT);
    let (w, h) = (RING_WIDTH as f32, RING_HEIGHT as f32);

    canvas.linear_gradient(
        0.0,
        0.0,
        w,
        0.0,
        &[
            stop(0.0, color, 0.0),
            stop(0.4, color, 1.0),
            stop(0.6, color, 1.0),
            stop(1.0, color, 0.0),
        ],
        Compositing::SourceOver,
    );

    let white = rgb(255, 255, 255);
    for _ in 0..RING_BANDS {
        let x = rng.gen::<f32>() * w;
        let band = rng.gen::<f32>() * 10.0;
        let alpha = rng.gen::<f32>() * 0.5;
        canvas.fill_rect(x, 0.0, band, h, white, alpha, Compositing::Overlay);
    }

    canvas
}

/// Grid of photovoltaic cells on a dark backing, with a diagonal additive
/// highlight. The layout is fixed, so no randomness is involved.
pub fn solar_panel() -> Canvas {
    let mut canvas = Canvas::new(PANEL_SIZE, PANEL_SIZE);
    let size = PANEL_SIZE as f32;
    canvas.fill(rgb(26, 26, 26));

    let cell_color = rgb(65, 105, 225);
    let pitch = size / 8.0;
    for i in 0..8 {
        for j in 0..8 {
            canvas.fill_rect(
                i as f32 * pitch + 1.0,
                j as f32 * pitch + 1.0,
                pitch - 2.0,
                pitch - 2.0,
                cell_color,
                1.0,
                Compositing::SourceOver,
            );
        }
    }

    let white = rgb(255, 255, 255);
    canvas.linear_gradient(
        0.0,
        0.0,
        size,
        size,
        &[
            stop(0.0, white, 0.1),
            stop(0.5, white, 0.3),
            stop(1.0, white, 0.1),
        ],
        Compositing::Additive,
    );

    canvas
}

/// Deep-space backdrop: dim radial wash, a scattering of stars, a handful of
/// soft color blobs, and wispy strokes composited in screen mode.
pub fn nebula<R: Rng>(rng: &mut R) -> Canvas {
    let mut canvas = Canvas::new(NEBULA_SIZE, NEBULA_SIZE);
    let size = NEBULA_SIZE as f32;
    let center = size / 2.0;

    canvas.radial_gradient(
        center,
        center,
        center,
        &[
            stop(0.0, rgb(25, 25, 112), 0.2),
            stop(0.5, rgb(72, 61, 139), 0.2),
            stop(1.0, rgb(138, 43, 226), 0.2),
        ],
        Compositing::SourceOver,
    );

    let white = rgb(255, 255, 255);
    for _ in 0..NEBULA_STARS {
        let x = rng.gen::<f32>() * size;
        let y = rng.gen::<f32>() * size;
        let radius = rng.gen::<f32>() * 2.0;
        canvas.fill_circle(x, y, radius, white, 0.5, Compositing::SourceOver);
    }

    for _ in 0..NEBULA_BLOBS {
        let x = rng.gen::<f32>() * size;
        let y = rng.gen::<f32>() * size;
        let radius = rng.gen::<f32>() * 200.0 + 100.0;
        canvas.radial_gradient(
            x,
            y,
            radius,
            &[
                stop(0.0, rgb(255, 0, 255), 0.2),
                stop(0.5, rgb(0, 255, 255), 0.1),
                stop(1.0, rgb(0, 0, 0), 0.0),
            ],
            Compositing::SourceOver,
        );
    }

    for _ in 0..NEBULA_WISPS {
        let x = rng.gen::<f32>() * size;
        let y = rng.gen::<f32>() * size;
        let length = rng.gen::<f32>() * 200.0 + 50.0;
        let angle = rng.gen::<f32>() * TAU;
        let width = rng.gen::<f32>() * 3.0 + 1.0;
        let color = Point3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        canvas.stroke_line(
            x,
            y,
            x + angle.cos() * length,
            y + angle.sin() * length,
            width,
            color,
            0.1,
            Compositing::Screen,
        );
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sun_center_is_yellow() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let canvas = sun(&mut rng);
        let p = canvas.image().get_pixel(SUN_SIZE / 2, SUN_SIZE / 2);
        assert!(p[0] > 240 && p[1] > 200 && p[2] < 80);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_planet_is_opaque_everywhere() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let canvas = planet(&mut rng, rgb(65, 105, 225), rgb(34, 139, 34));
        for p in canvas.image().pixels() {
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn test_ring_fades_at_edges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let canvas = ring(&mut rng, rgb(255, 215, 0));
        let edge = canvas.image().get_pixel(0, 16);
        let middle = canvas.image().get_pixel(RING_WIDTH / 2, 16);
        // the band's heart is fully opaque; the rim never quite gets there
        assert_eq!(middle[3], 255);
        assert!(edge[3] < middle[3]);
    }

    #[test]
    fn test_solar_panel_grid_and_gaps() {
        let canvas = solar_panel();
        // Middle of the first cell is blueish, the gap between cells is dark
        let cell = canvas.image().get_pixel(16, 16);
        let gap = canvas.image().get_pixel(32, 16);
        assert!(cell[2] > cell[0]);
        assert!(gap[2] < cell[2]);
    }

    #[test]
    fn test_nebula_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let canvas = nebula(&mut rng);
        assert_eq!(canvas.width(), NEBULA_SIZE);
        assert_eq!(canvas.height(), NEBULA_SIZE);
    }
}
