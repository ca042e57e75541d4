use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use solar_orrery::file::read_file;
use solar_orrery::texture;
use solar_orrery::texture::Canvas;

/// Writes every procedurally generated scene texture out as PNG files, for
/// eyeballing them without spinning up a window.
#[derive(Debug, Parser)]
struct Args {
    /// Body catalog to load
    #[arg(long, default_value = "planets.txt")]
    bodies: PathBuf,
    /// Output directory
    #[arg(long, default_value = "texture-out")]
    out: PathBuf,
    /// Fix the RNG for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let system = read_file(&args.bodies).expect("failed to load body catalog");
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    fs::create_dir_all(&args.out).expect("failed to create output directory");

    let write = |name: String, canvas: Canvas| {
        let path = args.out.join(name).with_extension("png");
        let png = canvas.encode_png().expect("png encoding failed");
        fs::write(&path, png).expect("failed to write texture");
        println!("wrote {}", path.display());
    };

    write("sun".to_owned(), texture::sun(&mut rng));
    write("nebula".to_owned(), texture::nebula(&mut rng));
    write("solar-panel".to_owned(), texture::solar_panel());

    for body in &system.bodies {
        let name = body.name.to_lowercase();
        write(
            format!("planet-{}", name),
            texture::planet(&mut rng, body.base_color, body.detail_color),
        );
        if let Some(color) = body.ring_color {
            write(format!("ring-{}", name), texture::ring(&mut rng, color));
        }
    }
}
