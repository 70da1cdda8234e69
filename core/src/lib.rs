// geoscape builds biome-aware landscape meshes: gradient noise, biome blending,
// aliasing and per-biome texturing over a triangulated grid of points
pub mod alias;
pub mod biome;
pub mod biome_map;
pub mod blend;
pub mod classify;
pub mod colour;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod mixture;
pub mod noise;
pub mod pipeline;
pub mod point;
pub mod texture;
pub mod triangle;
pub mod utils;
pub mod world;

pub use alias::AliasingPass;
pub use biome::{Biome, Surface};
pub use biome_map::BiomeMap;
pub use classify::{BiomeClassifier, classify};
pub use colour::Colour;
pub use config::{Bounds, GeneratorConfig};
pub use error::{GeoscapeError, Result};
pub use grid::{Stage, TerrainGrid};
pub use mixture::BiomeMixture;
pub use noise::NoiseField;
pub use pipeline::{Geoscape, generate};
pub use point::TerrainPoint;
pub use triangle::TerrainTriangle;
pub use world::{Layer, World};

// Noise sampled at normalized coordinates (u, v) ∈ [0, 1]², returning a value in [0, 1]
pub trait NoiseGenerator {
    fn get2(&self, u: f32, v: f32) -> f32;
}
