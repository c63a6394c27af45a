use geo::geometry::Coord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("grid dimensions {width}x{height} do not match {len} samples")]
    Dimensions {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("invalid grid header line {0:?}")]
    Header(String),

    #[error("grid is missing ncols/nrows header")]
    MissingHeader,

    #[error("invalid grid sample {0:?}")]
    Sample(String),

    #[error("coordinate ({}, {}) is outside the raster", .0.x, .0.y)]
    OutOfRange(Coord<f64>),
}
