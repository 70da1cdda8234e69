use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::biome_map::BiomeMap;
use crate::config::{Bounds, GeneratorConfig};
use crate::error::Result;
use crate::grid::TerrainGrid;
use crate::pipeline::Geoscape;

// Base elevations of the two stacked grids; water sits just above the valleys
pub const LAND_BASE_ELEVATION: f32 = 0.06;
pub const WATER_BASE_ELEVATION: f32 = 0.015;

// Footprint shared by every layer of the default world
pub const WORLD_BOUNDS: Bounds = Bounds::new(-0.8, -0.8, 0.8, 0.8);

// One named grid of a world
#[derive(Clone, Debug)]
pub struct Layer {
    pub name: String,
    pub grid: TerrainGrid,
}

// Several terrain grids stacked over the same footprint, e.g. land with a
// water surface laid over it. Layers are kept in the order they were added.
#[derive(Clone, Debug)]
pub struct World {
    name: String,
    bounds: Bounds,
    layers: Vec<Layer>,
}

impl World {
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
            layers: Vec::new(),
        }
    }

    // Land painted from the land preset with a flat water surface over it,
    // both generated from one seed
    pub fn land_and_water(land_size: usize, water_size: usize, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut world = World::new("Geoscape", WORLD_BOUNDS);

        let land = GeneratorConfig {
            rows: land_size,
            cols: land_size,
            base_elevation: LAND_BASE_ELEVATION,
            seed,
            ..GeneratorConfig::default()
        };
        let map = BiomeMap::land(land_size, land_size)?;
        world.generate_layer("Land", &land, Some(&map), &mut rng)?;

        let water = GeneratorConfig {
            rows: water_size,
            cols: water_size,
            base_elevation: WATER_BASE_ELEVATION,
            seed,
            ..GeneratorConfig::default()
        };
        let map = BiomeMap::water(water_size, water_size)?;
        world.generate_layer("Water", &water, Some(&map), &mut rng)?;

        info!("Built {}", world);
        Ok(world)
    }

    // Generate a grid over the world's footprint and stack it on top
    pub fn generate_layer<R: Rng + ?Sized>(
        &mut self,
        name: impl Into<String>,
        config: &GeneratorConfig,
        biome_map: Option<&BiomeMap>,
        rng: &mut R,
    ) -> Result<()> {
        let config = GeneratorConfig {
            bounds: self.bounds,
            ..config.clone()
        };
        let mut geoscape = Geoscape::new(&config);
        if let Some(map) = biome_map {
            geoscape = geoscape.with_biome_map(map);
        }
        let grid = geoscape.generate(rng)?;
        self.add_layer(name, grid);
        Ok(())
    }

    pub fn add_layer(&mut self, name: impl Into<String>, grid: TerrainGrid) {
        self.layers.push(Layer {
            name: name.into(),
            grid,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&TerrainGrid> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| &layer.grid)
    }

    pub fn triangle_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.grid.triangles().len()).sum()
    }

    // Advance every layer's animation; authoritative elevations never change
    pub fn animate(&mut self, time: f64) {
        for layer in &mut self.layers {
            layer.grid.animate(time);
        }
    }
}

impl std::fmt::Display for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World \"{}\" ({} layers, {} triangles)",
            self.name,
            self.layers.len(),
            self.triangle_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LAND_BASE_ELEVATION, WATER_BASE_ELEVATION, WORLD_BOUNDS, World};
    use crate::biome::Biome;
    use crate::config::GeneratorConfig;
    use crate::grid::Stage;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn land_and_water_stack_two_layers() {
        let world = World::land_and_water(24, 12, 3).unwrap();
        let names: Vec<&str> = world.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Land", "Water"]);

        let land = world.layer("Land").unwrap();
        let water = world.layer("Water").unwrap();
        assert_eq!(land.rows(), 24);
        assert_eq!(water.rows(), 12);
        assert_eq!(land.base_elevation(), LAND_BASE_ELEVATION);
        assert_eq!(water.base_elevation(), WATER_BASE_ELEVATION);
        assert_eq!(land.bounds(), WORLD_BOUNDS);
        assert_eq!(water.bounds(), WORLD_BOUNDS);
        assert!(land.stage() == Stage::Ready && water.stage() == Stage::Ready);
        assert!(water.points().iter().all(|p| p.biome == Biome::Water));
        assert_eq!(world.triangle_count(), 2 * 23 * 23 + 2 * 11 * 11);
        assert!(world.layer("Sky").is_none());
    }

    #[test]
    fn animation_moves_water_but_no_heights() {
        let mut world = World::land_and_water(20, 12, 9).unwrap();
        let before: Vec<_> = world.layers().iter().map(|l| l.grid.heights()).collect();
        world.animate(0.5);
        world.animate(2.0);
        let after: Vec<_> = world.layers().iter().map(|l| l.grid.heights()).collect();
        assert_eq!(before, after);

        let water = world.layer("Water").unwrap();
        assert!(water.points().iter().any(|p| p.offset().z != 0.0));
    }

    #[test]
    fn layers_take_the_world_footprint() {
        let mut world = World::new("Test", WORLD_BOUNDS);
        let config = GeneratorConfig {
            rows: 6,
            cols: 6,
            noise_rows: 2,
            noise_cols: 2,
            ..GeneratorConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        world.generate_layer("Only", &config, None, &mut rng).unwrap();
        assert_eq!(world.layer("Only").unwrap().bounds(), WORLD_BOUNDS);
        assert_eq!(world.to_string(), "World \"Test\" (1 layers, 50 triangles)");
    }
}
