//! In-memory elevation rasters and height sampling.
//!
//! A [`Grid`] is a read-only, row-major 2-D field of heights where the
//! row index is `y` and the column index is `x`. A [`Sampler`] turns
//! continuous pixel-space coordinates into heights using a
//! configurable [`SampleMode`]; every lookup is bounds checked.

mod error;

pub use crate::error::RasterError;
use geo::geometry::Coord;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Base floating point type used for all coordinates and samples.
///
/// Note: this _could_ be a generic parameter, but elevation grids are
/// small enough that the extra precision costs nothing measurable,
/// and a single concrete type keeps the API simple.
pub type C = f64;

/// A row-major grid of terrain heights.
pub struct Grid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Height samples, indexed `samples[row * width + col]`.
    samples: Box<[C]>,
}

impl Grid {
    /// Returns a Grid wrapping `samples`, which must contain exactly
    /// `width * height` values in row-major order.
    pub fn new(width: usize, height: usize, samples: Vec<C>) -> Result<Self, RasterError> {
        if samples.len() != width * height {
            return Err(RasterError::Dimensions {
                width,
                height,
                len: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples: samples.into_boxed_slice(),
        })
    }

    /// Returns a Grid of uniform height.
    pub fn flat(width: usize, height: usize, value: C) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height].into_boxed_slice(),
        }
    }

    /// Returns a Grid read from the ESRI ASCII grid file at `path`.
    pub fn from_ascii_grid<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let file = BufReader::new(File::open(path)?);
        Self::parse_ascii_grid(file)
    }

    /// Parses the ESRI ASCII grid format: `key value` header lines
    /// (of which `ncols` and `nrows` are required) followed by rows
    /// of whitespace-separated height samples, row 0 first.
    ///
    /// The georeferencing headers (`xllcorner`, `yllcorner`,
    /// `cellsize`, `nodata_value`) are accepted and ignored since all
    /// planning happens in pixel space.
    pub fn parse_ascii_grid<R: BufRead>(reader: R) -> Result<Self, RasterError> {
        let mut width = None;
        let mut height = None;
        let mut samples = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(first) = fields.next() else {
                continue;
            };
            if let Ok(sample) = first.parse::<C>() {
                samples.push(sample);
                for field in fields {
                    let sample = field
                        .parse::<C>()
                        .map_err(|_| RasterError::Sample(field.to_string()))?;
                    samples.push(sample);
                }
            } else {
                let value = fields.next().ok_or_else(|| RasterError::Header(line.clone()))?;
                match first.to_ascii_lowercase().as_str() {
                    "ncols" => {
                        width = Some(
                            value
                                .parse()
                                .map_err(|_| RasterError::Header(line.clone()))?,
                        );
                    }
                    "nrows" => {
                        height = Some(
                            value
                                .parse()
                                .map_err(|_| RasterError::Header(line.clone()))?,
                        );
                    }
                    "xllcorner" | "yllcorner" | "cellsize" | "nodata_value" => {}
                    _ => return Err(RasterError::Header(line.clone())),
                }
            }
        }

        let (Some(width), Some(height)) = (width, height) else {
            return Err(RasterError::MissingHeader);
        };
        Self::new(width, height, samples)
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of samples in this grid.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns the sample at the given cell, if it is in bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<C> {
        if col < self.width && row < self.height {
            Some(self.get_unchecked(col, row))
        } else {
            None
        }
    }

    fn get_unchecked(&self, col: usize, row: usize) -> C {
        self.samples[row * self.width + col]
    }
}

/// Source of terrain heights at continuous pixel coordinates.
///
/// This is the seam path construction programs against; anything that
/// can answer "how high is the ground at (x, y)" can drive a planning
/// call.
pub trait HeightSource {
    fn height(&self, coord: Coord<C>) -> Result<C, RasterError>;
}

/// How continuous coordinates select raster cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleMode {
    /// Nearest lower pixel: both coordinates are floored.
    #[default]
    Floor,

    /// Nearest pixel: both coordinates are rounded.
    Round,

    /// Distance-weighted average of the four surrounding cells,
    /// clamped at the raster's east/south edges.
    Bilinear,
}

/// Bounds-checked height lookup into a [`Grid`].
#[derive(Clone, Copy)]
pub struct Sampler<'a> {
    grid: &'a Grid,
    mode: SampleMode,
}

impl<'a> Sampler<'a> {
    pub fn new(grid: &'a Grid, mode: SampleMode) -> Self {
        Self { grid, mode }
    }
}

impl HeightSource for Sampler<'_> {
    /// Returns the terrain height at `coord`.
    ///
    /// Coordinates outside the raster, including negative ones, fail
    /// with [`RasterError::OutOfRange`].
    fn height(&self, coord: Coord<C>) -> Result<C, RasterError> {
        if coord.x < 0.0 || coord.y < 0.0 {
            return Err(RasterError::OutOfRange(coord));
        }
        match self.mode {
            SampleMode::Floor => self.cell(coord, coord.x.floor(), coord.y.floor()),
            SampleMode::Round => self.cell(coord, coord.x.round(), coord.y.round()),
            SampleMode::Bilinear => self.bilinear(coord),
        }
    }
}

/// Private API.
impl Sampler<'_> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cell(&self, coord: Coord<C>, x: C, y: C) -> Result<C, RasterError> {
        self.grid
            .get(x as usize, y as usize)
            .ok_or(RasterError::OutOfRange(coord))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn bilinear(&self, coord: Coord<C>) -> Result<C, RasterError> {
        let (x0, y0) = (coord.x.floor(), coord.y.floor());
        let (fx, fy) = (coord.x - x0, coord.y - y0);
        let (col, row) = (x0 as usize, y0 as usize);
        let v00 = self
            .grid
            .get(col, row)
            .ok_or(RasterError::OutOfRange(coord))?;
        let col1 = (col + 1).min(self.grid.width - 1);
        let row1 = (row + 1).min(self.grid.height - 1);
        let v10 = self.grid.get_unchecked(col1, row);
        let v01 = self.grid.get_unchecked(col, row1);
        let v11 = self.grid.get_unchecked(col1, row1);
        Ok((v00 * (1.0 - fx) + v10 * fx) * (1.0 - fy) + (v01 * (1.0 - fx) + v11 * fx) * fy)
    }
}
