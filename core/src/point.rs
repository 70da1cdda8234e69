use glam::Vec3;
use rand::Rng;

use crate::biome::Biome;
use crate::colour::Colour;
use crate::mixture::BiomeMixture;

// A single vertex of the terrain grid.
// `position` is authoritative; `offset` is a transient render-time displacement
// written only by per-frame biome updates and never fed back into generation.
#[derive(Clone, Debug)]
pub struct TerrainPoint {
    pub position: Vec3,
    pub colour: Colour,
    pub biome: Biome,
    pub mixture: BiomeMixture,
    offset: Vec3,
}

impl TerrainPoint {
    pub fn new(biome: Biome, x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            colour: biome.colour(),
            biome,
            mixture: BiomeMixture::single(biome),
            offset: Vec3::ZERO,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn set_z(&mut self, z: f32) {
        self.position.z = z;
    }

    // Reassign the dominant biome, resetting colour and mixture to match it
    pub fn set_biome(&mut self, biome: Biome) {
        self.biome = biome;
        self.colour = biome.colour();
        self.mixture = BiomeMixture::single(biome);
    }

    // Jitter the elevation by a uniform amount in [-magnitude, magnitude)
    pub fn shift<R: Rng + ?Sized>(&mut self, magnitude: f32, rng: &mut R) {
        if magnitude > 0.0 {
            self.position.z += rng.random_range(-magnitude..magnitude);
        }
    }

    // Raise the point along a cosine wave running across the X axis.
    // The wave crest is bent along Y by a secondary cosine of the given
    // frequency and amplitude; `density` sets the spacing of crests.
    pub fn wave(&mut self, frequency: f32, amplitude: f32, density: f32, height: f32) {
        let reference = amplitude * (self.y() * frequency).cos();
        let dx = density * (self.x() - reference).abs();
        self.position.z += dx.cos() * height;
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn set_offset(&mut self, dz: f32) {
        self.offset = Vec3::new(0.0, 0.0, dz);
    }

    // Position to hand to a renderer: authoritative position plus transient offset
    pub fn render_position(&self) -> Vec3 {
        self.position + self.offset
    }
}

impl std::fmt::Display for TerrainPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TerrainPoint ({:.2}, {:.2}, {:.2}) {} with {}",
            self.x(),
            self.y(),
            self.z(),
            self.biome,
            self.colour
        )
    }
}
