use log::debug;

use crate::error::Result;
use crate::grid::{Stage, TerrainGrid};
use crate::utils::HeightMap2D;

// Smooths away the creases gradient noise leaves along lattice cell edges
pub struct AliasingPass {
    distance: usize, // Manhattan radius of the averaging window
}

impl AliasingPass {
    // distance - how far (in grid steps, Manhattan) to look for neighbours
    // Larger values flatten more detail.
    pub fn new(distance: usize) -> Self {
        Self { distance }
    }

    // Replace every height with the mean of all heights within the window.
    // Every mean is taken over the input map, never over partially smoothed
    // values, so the result does not depend on visiting order.
    pub fn smooth(&self, map: &HeightMap2D) -> HeightMap2D {
        let h = map.len();
        if h == 0 {
            return Vec::new();
        }
        let w = map[0].len();
        let d = self.distance as isize;

        // Accumulate sums and counts first, then divide
        let mut sums = vec![vec![0.0f32; w]; h];
        let mut counts = vec![vec![0u32; w]; h];

        for y in 0..h {
            for x in 0..w {
                for dy in -d..=d {
                    let reach = d - dy.abs();
                    for dx in -reach..=reach {
                        let ny = y as isize + dy;
                        let nx = x as isize + dx;
                        if ny >= 0 && ny < h as isize && nx >= 0 && nx < w as isize {
                            sums[y][x] += map[ny as usize][nx as usize];
                            counts[y][x] += 1;
                        }
                    }
                }
            }
        }

        sums.iter()
            .zip(&counts)
            .map(|(row, count)| {
                row.iter()
                    .zip(count)
                    .map(|(&sum, &n)| sum / n as f32)
                    .collect()
            })
            .collect()
    }

    // In-place apply the smoothing to a grid that has just received noise
    pub fn apply(&self, grid: &mut TerrainGrid) -> Result<()> {
        grid.expect_stage(Stage::NoiseApplied)?;
        debug!("Applying aliasing (distance {}) to {}", self.distance, grid);

        let smoothed = self.smooth(&grid.heights());
        let cols = grid.cols();
        for (i, point) in grid.points_mut().iter_mut().enumerate() {
            point.set_z(smoothed[i / cols][i % cols]);
        }

        grid.advance(Stage::Aliased);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AliasingPass;

    #[test]
    fn flat_map_is_unchanged() {
        let map = vec![vec![0.3f32; 7]; 5];
        let out = AliasingPass::new(2).smooth(&map);
        for row in &out {
            for &v in row {
                assert!((v - 0.3).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn spike_is_spread_over_the_diamond() {
        // 5×5 map with a spike in the centre; a radius-2 diamond holds 13 cells
        let mut map = vec![vec![0.0f32; 5]; 5];
        map[2][2] = 13.0;
        let out = AliasingPass::new(2).smooth(&map);
        assert!((out[2][2] - 1.0).abs() < 1e-6);
        // (0, 0) is 4 steps away so it never sees the spike
        assert_eq!(out[0][0], 0.0);
        // (0, 2) is exactly 2 steps away; its clipped diamond holds 9 cells
        assert!((out[0][2] - 13.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn order_independent() {
        let map: Vec<Vec<f32>> = (0..6)
            .map(|y| (0..6).map(|x| ((x * 7 + y * 3) % 5) as f32).collect())
            .collect();
        let pass = AliasingPass::new(2);
        let a = pass.smooth(&map);
        // Transposing, smoothing and transposing back must agree
        let transposed: Vec<Vec<f32>> = (0..6).map(|x| (0..6).map(|y| map[y][x]).collect()).collect();
        let b = pass.smooth(&transposed);
        for y in 0..6 {
            for x in 0..6 {
                assert!((a[y][x] - b[x][y]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn zero_distance_is_identity() {
        let map = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(AliasingPass::new(0).smooth(&map), map);
    }
}
