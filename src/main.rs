use std::path::PathBuf;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use log::info;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use solar_orrery::clock::WallClock;
use solar_orrery::file::read_file;
use solar_orrery::gui::Scene;

/// Decorative animated solar system: procedural textures, closed-form orbits.
#[derive(Debug, Parser)]
struct Args {
    /// Body catalog to load
    #[arg(long, default_value = "planets.txt")]
    bodies: PathBuf,
    /// Initial window width
    #[arg(long, default_value_t = 1024)]
    width: u32,
    /// Initial window height
    #[arg(long, default_value_t = 768)]
    height: u32,
    /// Fix the texture RNG for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Render loop cap, in frames per second
    #[arg(long, default_value_t = 60)]
    fps: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let system = read_file(&args.bodies).expect("failed to load body catalog");
    info!("loaded {} bodies from {}", system.len(), args.bodies.display());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut window = Window::new_with_size("Solar System", args.width, args.height);
    // Light from the sun's position
    window.set_light(Light::Absolute(Point3::origin()));
    window.set_background_color(0.0, 0.0, 0.0);
    window.set_framerate_limit(Some(args.fps));

    let scene = Scene::new(system, &mut window, WallClock::new(), &mut rng)
        .expect("failed to generate textures");
    info!("scene built, entering render loop");

    window.render_loop(scene);
}
