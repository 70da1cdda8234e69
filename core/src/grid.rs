use log::{debug, info};

use crate::biome::Biome;
use crate::blend::blend;
use crate::config::Bounds;
use crate::error::{GeoscapeError, Result};
use crate::noise::NoiseField;
use crate::point::TerrainPoint;
use crate::triangle::TerrainTriangle;
use crate::utils::{HeightMap2D, curve};

// Generation stages, in the only order the passes may run
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    PointsInitialized,
    Triangulated,
    NoiseApplied,
    Aliased,
    Textured,
    Ready,
}

// Surface of one landscape region: rows×cols points and the triangle strip over them
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    rows: usize,
    cols: usize,
    bounds: Bounds,
    points: Vec<TerrainPoint>, // row-major
    triangles: Vec<TerrainTriangle>,
    base_elevation: f32, // flat height the points start from
    stage: Stage,
}

impl TerrainGrid {
    pub fn new(rows: usize, cols: usize, bounds: Bounds) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(GeoscapeError::InvalidDimensions { rows, cols });
        }
        bounds.validate()?;
        Ok(Self {
            rows,
            cols,
            bounds,
            points: Vec::with_capacity(rows * cols),
            triangles: Vec::new(),
            base_elevation: 0.0,
            stage: Stage::Uninitialized,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn base_elevation(&self) -> f32 {
        self.base_elevation
    }

    // No point may end above the base elevation scaled by the steepest biome
    pub fn ceiling(&self) -> f32 {
        self.base_elevation * Biome::max_scale()
    }

    // Distance between neighbouring columns / rows in world units
    pub fn spacing_x(&self) -> f32 {
        self.bounds.width() / (self.cols - 1) as f32
    }

    pub fn spacing_y(&self) -> f32 {
        self.bounds.height() / (self.rows - 1) as f32
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn point(&self, row: usize, col: usize) -> &TerrainPoint {
        &self.points[self.index(row, col)]
    }

    pub fn point_mut(&mut self, row: usize, col: usize) -> &mut TerrainPoint {
        let i = self.index(row, col);
        &mut self.points[i]
    }

    pub fn points(&self) -> &[TerrainPoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [TerrainPoint] {
        &mut self.points
    }

    pub fn triangles(&self) -> &[TerrainTriangle] {
        &self.triangles
    }

    // The three points a triangle references
    pub fn triangle_points(&self, triangle: &TerrainTriangle) -> [&TerrainPoint; 3] {
        triangle.vertices().map(|i| &self.points[i])
    }

    pub(crate) fn expect_stage(&self, expected: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(GeoscapeError::StageOrder {
                expected,
                found: self.stage,
            })
        }
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        self.stage = stage;
    }

    // Snapshot of every elevation as a row-major height map
    pub fn heights(&self) -> HeightMap2D {
        self.points
            .chunks(self.cols)
            .map(|row| row.iter().map(TerrainPoint::z).collect())
            .collect()
    }

    // Lay the points out evenly across the bounding box at a flat elevation
    pub fn init_points(&mut self, base_elevation: f32) -> Result<()> {
        self.expect_stage(Stage::Uninitialized)?;
        self.base_elevation = base_elevation;
        let (dx, dy) = (self.spacing_x(), self.spacing_y());
        self.points = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                let x = self.bounds.min_x + col as f32 * dx;
                let y = self.bounds.min_y + row as f32 * dy;
                TerrainPoint::new(Biome::Void, x, y, base_elevation)
            })
            .collect();
        self.advance(Stage::PointsInitialized);
        Ok(())
    }

    // Set every point's dominant biome; allowed any time before the noise pass
    pub fn assign_biomes<F>(&mut self, mut biome_at: F) -> Result<()>
    where
        F: FnMut(usize, usize) -> Biome,
    {
        if self.stage != Stage::PointsInitialized && self.stage != Stage::Triangulated {
            return self.expect_stage(Stage::PointsInitialized);
        }
        let cols = self.cols;
        for (i, point) in self.points.iter_mut().enumerate() {
            point.set_biome(biome_at(i / cols, i % cols));
        }
        Ok(())
    }

    // Zig-zag strip between each pair of adjacent rows.
    // Forward and backward triangles alternate so every face winds the same way.
    pub fn init_triangles(&mut self) -> Result<()> {
        self.expect_stage(Stage::PointsInitialized)?;
        let mut triangles = Vec::with_capacity(2 * (self.rows - 1) * (self.cols - 1));
        for row in 0..self.rows - 1 {
            for p in 0..2 * (self.cols - 1) {
                let col = p / 2;
                let vertices = if p % 2 == 0 {
                    [
                        self.index(row, col),
                        self.index(row + 1, col),
                        self.index(row, col + 1),
                    ]
                } else {
                    [
                        self.index(row + 1, col + 1),
                        self.index(row, col + 1),
                        self.index(row + 1, col),
                    ]
                };
                let mut triangle = TerrainTriangle::new(vertices);
                triangle.recolour(&self.points);
                triangles.push(triangle);
            }
        }
        self.triangles = triangles;
        self.advance(Stage::Triangulated);
        Ok(())
    }

    // Displace every point with gradient noise scaled by the base elevation and
    // by its local biome mixture.
    // Each point also receives its blended colour and mixture here.
    // Within one noise cell of the grid edge, the elevation fades to zero along
    // the smoothing curve so neighbouring patches stitch without a seam.
    pub fn apply_noise(&mut self, noise: &NoiseField, tolerance: f32) -> Result<()> {
        self.expect_stage(Stage::Triangulated)?;
        info!(
            "Applying {}x{} gradient noise to {}x{} grid",
            noise.rows(),
            noise.cols(),
            self.rows,
            self.cols
        );

        let width = self.bounds.width();
        let height = self.bounds.height();
        let cell = (width / noise.cols() as f32).min(height / noise.rows() as f32);

        let total = self.points.len();
        let mut milestone = 10;
        let mut updates = Vec::with_capacity(total);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let point = self.point(row, col);
                let u = (point.x() - self.bounds.min_x) / width;
                let v = (point.y() - self.bounds.min_y) / height;

                let local = blend(self, row, col, tolerance);
                let dz = noise.sample_unit(u, v) * self.base_elevation * local.scale;
                let mut z = point.z() + dz;

                let border_x = (point.x() - self.bounds.min_x).min(self.bounds.max_x - point.x());
                let border_y = (point.y() - self.bounds.min_y).min(self.bounds.max_y - point.y());
                let border = border_x.min(border_y).max(0.0);
                if border < cell {
                    z *= curve(border / cell);
                }
                updates.push((z, local));

                while milestone <= 100 && updates.len() * 100 >= milestone * total {
                    info!("\tNoise applied to {}% of the grid", milestone);
                    milestone += 10;
                }
            }
        }

        for (point, (z, local)) in self.points.iter_mut().zip(updates) {
            point.set_z(z);
            point.colour = local.colour;
            point.mixture = local.mixture;
        }

        self.advance(Stage::NoiseApplied);
        info!("Finished applying gradient noise");
        Ok(())
    }

    // Keep every elevation between the ground and the ceiling, then refresh
    // triangle colours
    pub fn finish(&mut self) -> Result<()> {
        self.expect_stage(Stage::Textured)?;
        let ceiling = self.ceiling();
        debug!("Grounding {}x{} grid under {:.3}", self.rows, self.cols, ceiling);
        for point in &mut self.points {
            let z = point.z().min(ceiling).max(0.0);
            point.set_z(z);
        }
        self.recolour_triangles();
        self.advance(Stage::Ready);
        Ok(())
    }

    pub fn recolour_triangles(&mut self) {
        let points = &self.points;
        for triangle in &mut self.triangles {
            triangle.recolour(points);
        }
    }

    // Per-frame animation of a finished grid; only transient offsets change
    // Water is the only biome with an animation
    pub fn animate(&mut self, time: f64) {
        for point in &mut self.points {
            let weight = point.mixture.weight(Biome::Water);
            if weight > 0.0 {
                Biome::Water.update(point, time, weight);
            }
        }
    }
}

impl std::fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TerrainGrid {}x{} [({:.2}, {:.2}) to ({:.2}, {:.2})] {:?}",
            self.rows,
            self.cols,
            self.bounds.min_x,
            self.bounds.min_y,
            self.bounds.max_x,
            self.bounds.max_y,
            self.stage
        )
    }
}
