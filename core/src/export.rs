use std::path::Path;

use glam::Vec3;
use image::{Rgb, RgbImage};
use log::info;

use crate::colour::Colour;
use crate::error::Result;
use crate::grid::TerrainGrid;
use crate::texture::surface_at;
use crate::utils::scale_index;
use crate::world::World;

const AMBIENT: f32 = 0.35;
const SHININESS: i32 = 16;

// Light coming from the north-west at 45° elevation
pub const DEFAULT_LIGHT: Vec3 = Vec3::new(-0.5, -0.5, 0.70710677);

// Shade one pixel: Lambert diffuse over the point colour plus a highlight tinted
// by the biome's specular colour. The viewer looks straight down.
fn shade(colour: Colour, specular: Colour, normal: Vec3, light: Vec3) -> Colour {
    let diffuse = normal.dot(light).max(0.0);
    let halfway = (light + Vec3::Z).normalize_or_zero();
    let highlight = normal.dot(halfway).max(0.0).powi(SHININESS);

    let mut out = colour.scaled(AMBIENT + (1.0 - AMBIENT) * diffuse);
    out.add(specular.scaled(highlight));
    out
}

// Render a grid straight from above: one pixel per point, row 0 on top
pub fn render_top_down(grid: &TerrainGrid, light: Vec3) -> RgbImage {
    let light = light.try_normalize().unwrap_or(Vec3::Z);
    let mut img = RgbImage::new(grid.cols() as u32, grid.rows() as u32);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let point = grid.point(row, col);
            let normal = surface_at(grid, row, col).normal;
            let pixel = shade(point.colour, point.biome.specular(), normal, light);
            img.put_pixel(col as u32, row as u32, Rgb(pixel.to_rgb8()));
        }
    }
    img
}

// Render every layer of a world from above at the finest layer's resolution.
// Each pixel shows whichever layer is highest there, so water shows through
// wherever the land dips below it.
pub fn render_world(world: &World, light: Vec3) -> RgbImage {
    let light = light.try_normalize().unwrap_or(Vec3::Z);
    let rows = world.layers().iter().map(|l| l.grid.rows()).max().unwrap_or(0);
    let cols = world.layers().iter().map(|l| l.grid.cols()).max().unwrap_or(0);
    let mut img = RgbImage::new(cols as u32, rows as u32);
    for row in 0..rows {
        for col in 0..cols {
            let top = world
                .layers()
                .iter()
                .map(|layer| {
                    let grid = &layer.grid;
                    let r = scale_index(row, rows, grid.rows());
                    let c = scale_index(col, cols, grid.cols());
                    (grid, r, c)
                })
                .max_by(|(a, ar, ac), (b, br, bc)| {
                    let za = a.point(*ar, *ac).render_position().z;
                    let zb = b.point(*br, *bc).render_position().z;
                    za.total_cmp(&zb)
                });
            if let Some((grid, r, c)) = top {
                let point = grid.point(r, c);
                let normal = surface_at(grid, r, c).normal;
                let pixel = shade(point.colour, point.biome.specular(), normal, light);
                img.put_pixel(col as u32, row as u32, Rgb(pixel.to_rgb8()));
            }
        }
    }
    img
}

pub fn save_png<P: AsRef<Path>>(grid: &TerrainGrid, path: P, light: Vec3) -> Result<()> {
    let path = path.as_ref();
    render_top_down(grid, light).save(path)?;
    info!("Saved top-down render of {} to {:?}", grid, path);
    Ok(())
}
