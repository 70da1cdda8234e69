use std::time::Instant;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::alias::AliasingPass;
use crate::biome_map::BiomeMap;
use crate::classify::BiomeClassifier;
use crate::config::{Bounds, GeneratorConfig};
use crate::error::Result;
use crate::grid::TerrainGrid;
use crate::noise::NoiseField;
use crate::texture::texture;

// One full generation run: every pass in order, from flat points to a Ready grid
pub struct Geoscape<'a> {
    pub config: &'a GeneratorConfig,
    // Painted biomes; without one the biomes come from the moisture/elevation classifier
    pub biome_map: Option<&'a BiomeMap>,
}

impl<'a> Geoscape<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            biome_map: None,
        }
    }

    pub fn with_biome_map(mut self, biome_map: &'a BiomeMap) -> Self {
        self.biome_map = Some(biome_map);
        self
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TerrainGrid> {
        let config = self.config;
        config.validate()?;
        let start = Instant::now();
        info!(
            "Generating {}x{} landscape on {}x{} noise",
            config.rows, config.cols, config.noise_rows, config.noise_cols
        );

        let mut grid = TerrainGrid::new(config.rows, config.cols, config.bounds)?;
        grid.init_points(config.base_elevation)?;

        let (rows, cols) = (config.rows, config.cols);
        match self.biome_map {
            Some(map) => {
                grid.assign_biomes(|row, col| map.biome_scaled(row, col, rows, cols))?;
            }
            None => {
                let classifier = BiomeClassifier::new(config.noise_rows, config.noise_cols, rng)?;
                grid.assign_biomes(|row, col| {
                    let u = col as f32 / (cols - 1) as f32;
                    let v = row as f32 / (rows - 1) as f32;
                    classifier.biome_at(u, v)
                })?;
            }
        }

        grid.init_triangles()?;

        let noise = NoiseField::new(config.noise_rows, config.noise_cols, rng)?;
        grid.apply_noise(&noise, config.blend_tolerance)?;
        AliasingPass::new(config.alias_distance).apply(&mut grid)?;
        texture(&mut grid, rng)?;
        grid.finish()?;

        info!(
            "Generated {} in {:.2} ms",
            grid,
            start.elapsed().as_secs_f32() * 1000.0
        );
        Ok(grid)
    }
}

// Generate a classifier-driven landscape from a seed alone
pub fn generate(
    rows: usize,
    cols: usize,
    bounds: Bounds,
    noise_resolution: (usize, usize),
    seed: u64,
) -> Result<TerrainGrid> {
    let config = GeneratorConfig {
        rows,
        cols,
        bounds,
        noise_rows: noise_resolution.0,
        noise_cols: noise_resolution.1,
        seed,
        ..GeneratorConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Geoscape::new(&config).generate(&mut rng)
}
