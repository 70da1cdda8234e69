use glam::Vec3;

use crate::colour::Colour;
use crate::error::{GeoscapeError, Result};
use crate::point::TerrainPoint;

// How strongly the average elevation brightens a triangle's colour
const ELEVATION_GLOW: f32 = 0.5;

// A mesh face referencing three shared grid points by flat (row-major) index
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainTriangle {
    vertices: [usize; 3],
    colour: Colour,
    elevation: f32,
}

impl TerrainTriangle {
    pub fn new(vertices: [usize; 3]) -> Self {
        Self {
            vertices,
            colour: Colour::default(),
            elevation: 0.0,
        }
    }

    pub fn from_slice(vertices: &[usize]) -> Result<Self> {
        let vertices: [usize; 3] = vertices
            .try_into()
            .map_err(|_| GeoscapeError::VertexCount(vertices.len()))?;
        Ok(Self::new(vertices))
    }

    pub fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    // Recompute the derived colour from the current state of the corner points
    pub fn recolour(&mut self, points: &[TerrainPoint]) {
        let [a, b, c] = self.vertices.map(|i| &points[i]);
        self.elevation = (a.z() + b.z() + c.z()) / 3.0;
        self.colour = Colour::average(&[a.colour, b.colour, c.colour])
            .scaled(1.0 + ELEVATION_GLOW * self.elevation.max(0.0));
    }

    // Colour modulated by an external lighting scale
    pub fn shade(&self, light_scale: f32) -> Colour {
        self.colour.scaled(light_scale)
    }

    // Upward-facing unit normal (zero for degenerate faces)
    pub fn normal(&self, points: &[TerrainPoint]) -> Vec3 {
        let [a, b, c] = self.vertices.map(|i| points[i].position);
        (c - a).cross(b - a).normalize_or_zero()
    }

    pub fn centroid(&self, points: &[TerrainPoint]) -> Vec3 {
        let [a, b, c] = self.vertices.map(|i| points[i].position);
        (a + b + c) / 3.0
    }
}
