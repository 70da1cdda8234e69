use std::f32::consts::PI;

// 2D elevation snapshot: row-major Vec<Vec<f32>> of size rows×cols
// access as `map[row][col]`.
pub type HeightMap2D = Vec<Vec<f32>>;

// Cosine smoothing curve f(x) = (1 - cos(πx)) / 2
// f(0) = 0, f(1) = 1 and the slope vanishes at both ends,
// so anything scaled by it fades in and out without a visible crease.
#[inline]
pub fn curve(x: f32) -> f32 {
    (1.0 - (PI * x).cos()) / 2.0
}

// Linear interpolation between a and b
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Map an index on an axis of length `from` onto an axis of length `to`
pub fn scale_index(i: usize, from: usize, to: usize) -> usize {
    if from <= 1 || to <= 1 {
        return 0;
    }
    let t = i as f32 / (from - 1) as f32;
    ((t * (to - 1) as f32).round() as usize).min(to - 1)
}
