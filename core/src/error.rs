use thiserror::Error;

use crate::grid::Stage;

// Errors surfaced by the generation pipeline and its collaborators
#[derive(Debug, Error)]
pub enum GeoscapeError {
    #[error("grid must be at least 2x2, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("noise grid must have at least one cell per axis, got {rows}x{cols}")]
    InvalidNoiseResolution { rows: usize, cols: usize },

    #[error("bounding box must have a positive width and height")]
    InvalidBounds,

    #[error("unknown biome symbol '{0}'")]
    UnknownBiomeSymbol(char),

    // Triangles are built from exactly three grid points
    #[error("a triangle needs exactly 3 vertices, got {0}")]
    VertexCount(usize),

    #[error("pass expects the grid to be {expected:?} but it is {found:?}")]
    StageOrder { expected: Stage, found: Stage },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, GeoscapeError>;
