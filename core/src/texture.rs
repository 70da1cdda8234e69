use glam::Vec3;
use log::debug;
use rand::Rng;

use crate::biome::Surface;
use crate::error::Result;
use crate::grid::{Stage, TerrainGrid};

// Estimate the upward surface normal at (row, col) from the point and two of its
// neighbours, one along each axis (falling back to the opposite side at edges)
pub fn surface_at(grid: &TerrainGrid, row: usize, col: usize) -> Surface {
    let here = grid.point(row, col).position;
    let (side, flip_x) = if col + 1 < grid.cols() {
        (grid.point(row, col + 1).position, false)
    } else {
        (grid.point(row, col - 1).position, true)
    };
    let (ahead, flip_y) = if row + 1 < grid.rows() {
        (grid.point(row + 1, col).position, false)
    } else {
        (grid.point(row - 1, col).position, true)
    };

    let mut normal = (side - here).cross(ahead - here);
    // Mirrored neighbours flip the cross product; keep the normal pointing up
    if flip_x != flip_y {
        normal = -normal;
    }
    Surface {
        normal: normal.try_normalize().unwrap_or(Vec3::Z),
    }
}

// Apply every biome's texture to every point, weighted by the point's mixture.
// Surfaces are estimated from the untextured grid up front, so each rule only
// reads and writes its own point and the order of biomes in a mixture is free.
pub fn texture<R: Rng + ?Sized>(grid: &mut TerrainGrid, rng: &mut R) -> Result<()> {
    grid.expect_stage(Stage::Aliased)?;
    debug!("Applying textures to {}", grid);

    let view: &TerrainGrid = grid;
    let surfaces: Vec<Surface> = (0..view.rows())
        .flat_map(|row| (0..view.cols()).map(move |col| (row, col)))
        .map(|(row, col)| surface_at(view, row, col))
        .collect();

    for (point, surface) in grid.points_mut().iter_mut().zip(&surfaces) {
        let mixture = point.mixture.clone();
        for (biome, weight) in mixture.iter() {
            biome.texturize(point, weight, surface, rng);
        }
    }

    grid.advance(Stage::Textured);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{surface_at, texture};
    use crate::biome::Biome;
    use crate::config::Bounds;
    use crate::grid::{Stage, TerrainGrid};
    use crate::noise::NoiseField;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat(rows: usize, cols: usize) -> TerrainGrid {
        let mut grid = TerrainGrid::new(rows, cols, Bounds::default()).unwrap();
        grid.init_points(0.1).unwrap();
        grid.init_triangles().unwrap();
        grid
    }

    #[test]
    fn flat_surface_points_up_everywhere() {
        let grid = flat(4, 5);
        for row in 0..4 {
            for col in 0..5 {
                let n = surface_at(&grid, row, col).normal;
                assert!((n - Vec3::Z).length() < 1e-5, "({row}, {col}) -> {n}");
            }
        }
    }

    #[test]
    fn tilted_surface_leans_away_from_the_rise() {
        let mut grid = flat(4, 4);
        // Elevation grows with x
        for row in 0..4 {
            for col in 0..4 {
                let x = grid.point(row, col).x();
                grid.point_mut(row, col).set_z(x);
            }
        }
        let n = surface_at(&grid, 1, 1).normal;
        assert!(n.z > 0.0 && n.x < 0.0);
        let edge = surface_at(&grid, 3, 3).normal;
        assert!((edge - n).length() < 1e-5);
    }

    #[test]
    fn texture_requires_aliased_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut grid = flat(3, 3);
        assert!(texture(&mut grid, &mut rng).is_err());
    }

    #[test]
    fn void_mixture_flattens_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let noise = NoiseField::new(2, 2, &mut rng).unwrap();
        let mut grid = flat(6, 6);
        grid.apply_noise(&noise, 0.3).unwrap();
        crate::alias::AliasingPass::new(2).apply(&mut grid).unwrap();
        texture(&mut grid, &mut rng).unwrap();
        assert_eq!(grid.stage(), Stage::Textured);
        // Every point is pure Void, so weight 1 pulls everything to zero
        assert!(grid.points().iter().all(|p| p.z().abs() < 1e-6));
        assert!(grid.points().iter().all(|p| p.biome == Biome::Void));
    }
}
