use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::NoiseGenerator;
use crate::error::{GeoscapeError, Result};
use crate::utils::{curve, lerp};

// Gradient noise over a fixed (rows+1)×(cols+1) lattice of unit vectors.
// Coordinates are expressed in lattice units: x ∈ [0, cols], y ∈ [0, rows].
pub struct NoiseField {
    rows: usize,
    cols: usize,
    gradients: Vec<Vec<Vec2>>, // [row][col], every vector has length 1
}

impl NoiseField {
    pub fn new<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GeoscapeError::InvalidNoiseResolution { rows, cols });
        }
        // One random direction per lattice corner
        let gradients = (0..=rows)
            .map(|_| {
                (0..=cols)
                    .map(|_| Vec2::from_angle(rng.random_range(0.0..TAU)))
                    .collect()
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            gradients,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn gradient(&self, row: usize, col: usize) -> Vec2 {
        self.gradients[row][col]
    }

    // Raw gradient noise at lattice coordinate (x, y)
    // Returns a value in [−√2/2, √2/2]; exactly 0 on every lattice corner.
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        // Which cell? Points on the far edges belong to the last cell.
        let col = (x.floor().max(0.0) as usize).min(self.cols - 1);
        let row = (y.floor().max(0.0) as usize).min(self.rows - 1);
        // Where within the cell?
        let fx = x - col as f32;
        let fy = y - row as f32;

        // Dot each corner gradient with the vector from that corner to the point
        let d00 = self.gradients[row][col].dot(Vec2::new(fx, fy));
        let d01 = self.gradients[row][col + 1].dot(Vec2::new(fx - 1.0, fy));
        let d10 = self.gradients[row + 1][col].dot(Vec2::new(fx, fy - 1.0));
        let d11 = self.gradients[row + 1][col + 1].dot(Vec2::new(fx - 1.0, fy - 1.0));

        // Cosine-smoothed bilinear blend, columns first then rows
        let u = curve(fx);
        let v = curve(fy);
        let top = lerp(d00, d01, u);
        let bottom = lerp(d10, d11, u);
        lerp(top, bottom, v)
    }

    // Sample using coordinates normalized to [0, 1] across the whole lattice
    pub fn sample_unit(&self, u: f32, v: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        self.evaluate(u * self.cols as f32, v * self.rows as f32)
    }
}

impl NoiseGenerator for NoiseField {
    // Noise remapped from [−1, 1] into [0, 1]
    fn get2(&self, u: f32, v: f32) -> f32 {
        ((self.sample_unit(u, v) + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::NoiseField;
    use crate::NoiseGenerator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field(seed: u64) -> NoiseField {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        NoiseField::new(8, 6, &mut rng).unwrap()
    }

    #[test]
    fn gradients_are_unit_vectors() {
        let f = field(1);
        for row in 0..=f.rows() {
            for col in 0..=f.cols() {
                assert!((f.gradient(row, col).length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn zero_on_lattice_corners() {
        let f = field(2);
        for row in 0..=f.rows() {
            for col in 0..=f.cols() {
                let v = f.evaluate(col as f32, row as f32);
                assert!(v.abs() < 1e-6, "corner ({row}, {col}) gave {v}");
            }
        }
    }

    #[test]
    fn determinism() {
        let a = field(1234);
        let b = field(1234);
        assert_eq!(a.evaluate(3.3, 1.7), b.evaluate(3.3, 1.7));
    }

    #[test]
    fn stays_within_theoretical_bound() {
        let f = field(3);
        let bound = std::f32::consts::FRAC_1_SQRT_2 + 1e-5;
        for i in 0..=60 {
            for j in 0..=80 {
                let v = f.evaluate(i as f32 * 0.1, j as f32 * 0.1);
                assert!(v.abs() <= bound);
            }
        }
    }

    #[test]
    fn continuity_within_a_cell() {
        let f = field(4);
        let (x, y) = (2.3, 4.6);
        let base = f.evaluate(x, y);
        // Lipschitz bound: the jump shrinks with the step
        for step in [0.2, 0.1, 0.05, 0.01, 0.001] {
            let diff = (f.evaluate(x + step, y + step) - base).abs();
            assert!(diff <= 12.0 * step, "jump {diff} too large for step {step}");
        }
    }

    #[test]
    fn far_edges_resolve_to_last_cell() {
        let f = field(5);
        // x = cols and y = rows land on the final corner, not out of bounds
        let v = f.evaluate(f.cols() as f32, f.rows() as f32);
        assert!(v.abs() < 1e-6);
    }

    #[test]
    fn get2_is_normalized() {
        let f = field(6);
        for i in 0..=20 {
            let v = f.get2(i as f32 / 20.0, 1.0 - i as f32 / 20.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn rejects_empty_resolution() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(NoiseField::new(0, 4, &mut rng).is_err());
    }
}
