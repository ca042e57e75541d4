use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use log::debug;
use rand::Rng;

use self::view::View;
use crate::clock::SimClock;
use crate::model::SolarSystem;
use crate::texture::TextureError;

mod camera;
mod starfield;
mod view;

/// The owned scene session: builds every renderable once, then mutates their
/// transforms from kiss3d's per-frame callback until the window closes.
pub struct Scene<C: SimClock> {
    view: View<C>,
    fps: FpsCounter,
}

impl<C: SimClock> Scene<C> {
    pub fn new<R: Rng>(
        system: SolarSystem,
        window: &mut Window,
        clock: C,
        rng: &mut R,
    ) -> Result<Self, TextureError> {
        Ok(Scene {
            view: View::new(system, window, clock, rng)?,
            fps: FpsCounter::new(1000),
        })
    }
}

impl<C: SimClock + 'static> State for Scene<C> {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, _: &mut Window) {
        self.view.update();
        if let Some(fps) = self.fps.tick() {
            debug!("{:.0} fps", fps);
        }
    }
}

struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
}

impl FpsCounter {
    fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            window_size_millis,
        }
    }

    /// Count a frame; yields the measured rate once per averaging window.
    fn tick(&mut self) -> Option<f64> {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            let fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.instant = Instant::now();
            self.counter = 0;
            Some(fps)
        } else {
            None
        }
    }
}
