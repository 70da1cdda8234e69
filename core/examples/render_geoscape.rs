// Generates a classifier-driven landscape, a painted land map and a
// land+water world, then saves a shaded top-down render of each.
//
//   cargo run -p geoscape --example render_geoscape -- [seed]

use geoscape::export::{DEFAULT_LIGHT, render_world, save_png};
use geoscape::{BiomeMap, GeneratorConfig, Geoscape, World};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> geoscape::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2018);
    let config = GeneratorConfig {
        rows: 200,
        cols: 200,
        noise_rows: 8,
        noise_cols: 8,
        seed,
        ..GeneratorConfig::default()
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let classified = Geoscape::new(&config).generate(&mut rng)?;
    save_png(&classified, format!("geoscape_{}.png", seed), DEFAULT_LIGHT)?;

    let map = BiomeMap::land(config.rows, config.cols)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let painted = Geoscape::new(&config)
        .with_biome_map(&map)
        .generate(&mut rng)?;
    save_png(&painted, format!("geoscape_land_{}.png", seed), DEFAULT_LIGHT)?;

    let world = World::land_and_water(config.rows, config.rows / 2, seed)?;
    let path = format!("geoscape_world_{}.png", seed);
    render_world(&world, DEFAULT_LIGHT).save(&path)?;
    info!("Saved {} to {}", world, path);
    Ok(())
}
