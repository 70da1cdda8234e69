use crate::error::{GeoscapeError, Result};

// Axis-aligned rectangle in the XY plane covered by a terrain grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn validate(&self) -> Result<()> {
        let ok = self.width() > 0.0
            && self.height() > 0.0
            && self.width().is_finite()
            && self.height().is_finite();
        if ok { Ok(()) } else { Err(GeoscapeError::InvalidBounds) }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(0.0, 0.0, 1.0, 1.0)
    }
}

// All knobs of one landscape generation run
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub rows: usize, // terrain grid resolution
    pub cols: usize,
    pub bounds: Bounds,
    pub noise_rows: usize, // gradient lattice resolution, independent of the grid
    pub noise_cols: usize,
    pub base_elevation: f32,  // flat starting height of every point
    pub blend_tolerance: f32, // neighbour search radius as a fraction of the grid
    pub alias_distance: usize, // Manhattan radius of the smoothing pass
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            bounds: Bounds::default(),
            noise_rows: 10,
            noise_cols: 10,
            base_elevation: 0.1,
            blend_tolerance: 0.05,
            alias_distance: 2,
            seed: 2018,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.cols < 2 {
            return Err(GeoscapeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.noise_rows == 0 || self.noise_cols == 0 {
            return Err(GeoscapeError::InvalidNoiseResolution {
                rows: self.noise_rows,
                cols: self.noise_cols,
            });
        }
        self.bounds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Bounds, GeneratorConfig};

    #[test]
    fn default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let mut c = GeneratorConfig {
            rows: 1,
            ..Default::default()
        };
        assert!(c.validate().is_err());
        c.rows = 10;
        c.noise_cols = 0;
        assert!(c.validate().is_err());
        c.noise_cols = 4;
        c.bounds = Bounds::new(1.0, 0.0, 1.0, 1.0);
        assert!(c.validate().is_err());
    }
}
