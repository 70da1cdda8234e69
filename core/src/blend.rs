use log::debug;

use crate::colour::Colour;
use crate::grid::TerrainGrid;
use crate::mixture::BiomeMixture;
use crate::utils::curve;

// Shapes how far biome borders creep into each other
const FALLOFF_EXPONENT: f32 = 0.8;

// Influence of the neighbourhood around one grid point
#[derive(Clone, Debug)]
pub struct Blend {
    pub mixture: BiomeMixture,
    pub colour: Colour,
    pub scale: f32,
}

// Distance-to-weight falloff: (1 - f(d / tolerance))^0.8
#[inline]
pub fn falloff(distance: f32, tolerance: f32) -> f32 {
    let t = (distance / (tolerance + 1e-4)).clamp(0.0, 1.0);
    (1.0 - curve(t)).powf(FALLOFF_EXPONENT)
}

// Blend the biomes of every other point within `tolerance` of (row, col).
// `tolerance` is a fraction of the grid: the row reach is
// tolerance × min(rows, cols) and the distance limit is
// tolerance × min(width, height).
// With no neighbour in reach the point keeps its own biome at full weight.
pub fn blend(grid: &TerrainGrid, row: usize, col: usize, tolerance: f32) -> Blend {
    let centre = grid.point(row, col);
    let bounds = grid.bounds();
    let row_reach = (tolerance * grid.rows().min(grid.cols()) as f32) as usize;
    let max_distance = tolerance * bounds.width().min(bounds.height());

    let mut mixture = BiomeMixture::new();
    let mut weighted = Vec::new();

    let min_row = row.saturating_sub(row_reach);
    let max_row = (row + row_reach).min(grid.rows() - 1);
    for r in min_row..=max_row {
        // Horizontal half-width of the disc at this row
        let dy = r.abs_diff(row) as f32 * grid.spacing_y();
        let half_width = (max_distance * max_distance - dy * dy).max(0.0).sqrt();
        let col_reach = (half_width / grid.spacing_x()).ceil() as usize;

        let min_col = col.saturating_sub(col_reach);
        let max_col = (col + col_reach).min(grid.cols() - 1);
        for c in min_col..=max_col {
            if r == row && c == col {
                continue;
            }
            let other = grid.point(r, c);
            let distance = centre.position.truncate().distance(other.position.truncate());
            if distance <= max_distance {
                let weight = falloff(distance, max_distance);
                mixture.add(other.biome, weight);
                weighted.push((other.biome.colour(), weight));
            }
        }
    }

    let total = mixture.total();
    if !mixture.normalize() {
        debug!(
            "No neighbours within {:.3} of ({}, {}); keeping {}",
            max_distance, row, col, centre.biome
        );
        let mixture = BiomeMixture::single(centre.biome);
        return Blend {
            scale: mixture.scale(),
            colour: centre.biome.colour(),
            mixture,
        };
    }

    let mut colour = Colour::BLACK;
    for (biome_colour, weight) in weighted {
        colour.add(biome_colour.scaled(weight / total));
    }

    Blend {
        scale: mixture.scale(),
        colour,
        mixture,
    }
}

// Just the mixture part of `blend`
pub fn build_mixture(grid: &TerrainGrid, row: usize, col: usize, tolerance: f32) -> BiomeMixture {
    blend(grid, row, col, tolerance).mixture
}

#[cfg(test)]
mod tests {
    use super::{blend, build_mixture, falloff};
    use crate::biome::Biome;
    use crate::config::Bounds;
    use crate::grid::TerrainGrid;

    fn grid(rows: usize, cols: usize, biome_at: impl FnMut(usize, usize) -> Biome) -> TerrainGrid {
        let mut grid = TerrainGrid::new(rows, cols, Bounds::default()).unwrap();
        grid.init_points(0.1).unwrap();
        grid.assign_biomes(biome_at).unwrap();
        grid
    }

    #[test]
    fn falloff_shape() {
        assert!((falloff(0.0, 1.0) - 1.0).abs() < 1e-6);
        assert!(falloff(1.0, 1.0) < 1e-3);
        assert!(falloff(0.25, 1.0) > falloff(0.5, 1.0));
    }

    #[test]
    fn mixture_is_normalized() {
        let g = grid(40, 40, |r, c| if (r + c) % 3 == 0 { Biome::Desert } else { Biome::Taiga });
        for (row, col) in [(0, 0), (20, 20), (39, 5), (13, 39)] {
            let m = build_mixture(&g, row, col, 0.1);
            assert!((m.total() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn uniform_region_blends_to_itself() {
        let g = grid(30, 30, |_, _| Biome::Prairie);
        let b = blend(&g, 15, 15, 0.1);
        assert_eq!(b.mixture.len(), 1);
        assert!((b.scale - Biome::Prairie.scale()).abs() < 1e-5);
        let expected = Biome::Prairie.colour();
        assert!((b.colour.red - expected.red).abs() < 1e-4);
        assert!((b.colour.green - expected.green).abs() < 1e-4);
    }

    #[test]
    fn border_points_mix_both_sides() {
        let g = grid(40, 40, |_, c| if c < 20 { Biome::Desert } else { Biome::Deciduous });
        let m = build_mixture(&g, 20, 20, 0.1);
        assert!(m.weight(Biome::Desert) > 0.2);
        assert!(m.weight(Biome::Deciduous) > 0.2);
    }

    #[test]
    fn self_is_excluded() {
        // A lone island point only sees its neighbours
        let g = grid(30, 30, |r, c| if (r, c) == (15, 15) { Biome::Water } else { Biome::Barren });
        let m = build_mixture(&g, 15, 15, 0.1);
        assert_eq!(m.weight(Biome::Water), 0.0);
        assert!((m.weight(Biome::Barren) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn no_neighbours_falls_back_to_own_biome() {
        // 10x10 with tolerance 0.05: spacing 1/9 exceeds the 0.05 search radius
        let g = grid(10, 10, |_, _| Biome::Alpine);
        let b = blend(&g, 5, 5, 0.05);
        assert_eq!(b.mixture.len(), 1);
        assert!((b.mixture.weight(Biome::Alpine) - 1.0).abs() < 1e-6);
        assert_eq!(b.colour, Biome::Alpine.colour());
        assert!(b.scale.is_finite());
    }
}
