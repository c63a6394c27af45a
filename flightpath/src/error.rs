use raster::RasterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightPathError {
    #[error("spacing must be positive, got {0}")]
    Spacing(f64),

    #[error("path length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Raster(#[from] RasterError),
}
