use kiss3d::camera::Camera;
use kiss3d::renderer::{PointRenderer, Renderer};
use nalgebra::Point3;
use rand::Rng;

/// The distant star backdrop, drawn as raw GL points. Star positions are
/// fixed at generation time; the whole field rotates rigidly about the
/// vertical axis.
pub struct Starfield {
    stars: Vec<Point3<f32>>,
    angle: f32,
    renderer: PointRenderer,
}

impl Starfield {
    /// Scatter `count` stars through a box `spread` across, entirely behind
    /// the xy-plane so they read as a backdrop.
    pub fn generate<R: Rng>(rng: &mut R, count: usize, spread: f32) -> Self {
        let stars = (0..count)
            .map(|_| {
                Point3::new(
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                    -rng.gen::<f32>() * spread,
                )
            })
            .collect();

        Starfield {
            stars,
            angle: 0.0,
            renderer: PointRenderer::new(),
        }
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }
}

pub fn rotate_y(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(p.x * cos + p.z * sin, p.y, p.z * cos - p.x * sin)
}

impl Renderer for Starfield {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        let white = Point3::new(1.0, 1.0, 1.0);
        for star in &self.stars {
            self.renderer.draw_point(rotate_y(star, self.angle), white);
        }
        self.renderer.render(pass, camera);
    }
}
