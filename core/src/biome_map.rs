use std::f32::consts::TAU;

use log::{debug, warn};

use crate::biome::Biome;
use crate::error::{GeoscapeError, Result};
use crate::utils::scale_index;

// Symbolic rows×cols map of biome codes, painted before generation consumes it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeMap {
    rows: usize,
    cols: usize,
    symbols: Vec<char>, // row-major
}

impl BiomeMap {
    // A map filled with the Void symbol
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(GeoscapeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            symbols: vec![Biome::Void.symbol(); rows * cols],
        })
    }

    // Rolling land: grassland base with clouds of prairie, desert, taiga and mountains
    pub fn land(rows: usize, cols: usize) -> Result<Self> {
        let mut map = Self::new(rows, cols)?;
        let (r, c) = (rows - 1, cols - 1);
        map.fill_rect(rows / 3, 0, r, c, Biome::Grasslands);
        map.fill_cloud(rows * 2 / 3, 0, r, cols / 3, 4, 4, Biome::Prairie);
        map.fill_cloud(rows * 2 / 3, cols * 2 / 3, r, c, 4, 4, Biome::Desert);
        map.fill_cloud(0, 0, rows / 3, cols / 4, 4, 4, Biome::Taiga);
        map.fill_cloud(rows / 4, cols * 2 / 3, rows * 2 / 3, c, 4, 4, Biome::Mountain);
        debug!("Painted land map\n{}", map);
        Ok(map)
    }

    pub fn water(rows: usize, cols: usize) -> Result<Self> {
        let mut map = Self::new(rows, cols)?;
        map.fill_rect(0, 0, rows - 1, cols - 1, Biome::Water);
        Ok(map)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn symbol(&self, row: usize, col: usize) -> char {
        self.symbols[row * self.cols + col]
    }

    pub fn set_symbol(&mut self, row: usize, col: usize, symbol: char) {
        if row < self.rows && col < self.cols {
            self.symbols[row * self.cols + col] = symbol;
        }
    }

    pub fn set(&mut self, row: usize, col: usize, biome: Biome) {
        self.set_symbol(row, col, biome.symbol());
    }

    // Resolve the symbol at (row, col); unknown symbols fall back to Void
    pub fn biome(&self, row: usize, col: usize) -> Biome {
        let symbol = self.symbol(row, col);
        Biome::from_symbol(symbol).unwrap_or_else(|err| {
            warn!("{} at ({}, {}); using {}", err, row, col, Biome::Void);
            Biome::Void
        })
    }

    // Resolve the symbol for a point of a grid with a different resolution
    pub fn biome_scaled(&self, row: usize, col: usize, rows: usize, cols: usize) -> Biome {
        let r = scale_index(row, rows, self.rows);
        let c = scale_index(col, cols, self.cols);
        self.biome(r, c)
    }

    // Paint an inclusive rectangle, clipped to the map
    pub fn fill_rect(&mut self, top: usize, left: usize, bottom: usize, right: usize, biome: Biome) {
        let bottom = bottom.min(self.rows - 1);
        let right = right.min(self.cols - 1);
        debug!(
            "Painting {} over rows {}..={} and cols {}..={}",
            biome, top, bottom, left, right
        );
        for row in top..=bottom {
            for col in left..=right {
                self.set(row, col, biome);
            }
        }
    }

    // Paint a rectangle whose walls bulge out along cosine waves and whose
    // corners are rounded off, so regions look like clouds instead of boxes.
    // `v_waves` / `h_waves` are the number of bulges along the vertical and
    // horizontal walls.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_cloud(
        &mut self,
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
        v_waves: usize,
        h_waves: usize,
        biome: Biome,
    ) {
        let bottom = bottom.min(self.rows - 1);
        let right = right.min(self.cols - 1);
        if top > bottom || left > right {
            return;
        }
        debug!("Painting a {} cloud with {}x{} waves", biome, v_waves, h_waves);
        self.fill_rect(top, left, bottom, right, biome);

        let height = bottom - top;
        let width = right - left;

        // Bulge size grows with the cloud
        let amplitude = height.min(width) / 8;
        if amplitude == 0 {
            return;
        }
        let peaks = 2 * amplitude;

        // Vertical walls
        let v_period = height as f32 / v_waves.max(1) as f32;
        for row in top..=bottom {
            let angle = TAU * (row - top) as f32 / v_period;
            let away = ((angle.cos() + 1.0) * amplitude as f32) as usize;
            for k in 1..=away {
                self.set(row, left.saturating_sub(k), biome);
                self.set(row, (right + k).min(self.cols - 1), biome);
            }
        }

        // Horizontal walls
        let h_period = width as f32 / h_waves.max(1) as f32;
        for col in left..=right {
            let angle = TAU * (col - left) as f32 / h_period;
            let away = ((angle.cos() + 1.0) * amplitude as f32) as usize;
            for k in 1..=away {
                self.set(top.saturating_sub(k), col, biome);
                self.set((bottom + k).min(self.rows - 1), col, biome);
            }
        }

        // Round corners: everything within `peaks` of a corner
        for (row, col) in [(top, left), (top, right), (bottom, left), (bottom, right)] {
            let r0 = row.saturating_sub(peaks);
            let r1 = (row + peaks).min(self.rows - 1);
            let c0 = col.saturating_sub(peaks);
            let c1 = (col + peaks).min(self.cols - 1);
            for r in r0..=r1 {
                for c in c0..=c1 {
                    let dr = r.abs_diff(row) as f32;
                    let dc = c.abs_diff(col) as f32;
                    if (dr * dr + dc * dc).sqrt() <= peaks as f32 {
                        self.set(r, c, biome);
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for BiomeMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BiomeMap ({} x {}):", self.rows, self.cols)?;
        for row in self.symbols.chunks(self.cols) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
