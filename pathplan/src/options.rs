use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand, ValueEnum};
use geo::geometry::Coord;
use raster::SampleMode;
use std::{path::PathBuf, str::FromStr};

/// Generate terrain-following flight paths over an elevation raster.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Elevation raster in ESRI ASCII grid format.
    #[arg(short, long)]
    pub raster: PathBuf,

    /// Waypoint "x,y" in raster pixel coordinates; repeat in flight
    /// order.
    #[arg(short, long = "waypoint")]
    pub waypoints: Vec<Xy>,

    /// Arc-length distance between interpolated samples.
    #[arg(short, long, default_value_t = flightpath::DEFAULT_SPACING)]
    pub spacing: f64,

    /// Altitude margin held above terrain height.
    #[arg(short, long, default_value_t = flightpath::DEFAULT_CLEARANCE)]
    pub clearance: f64,

    /// How terrain heights are sampled under each path point.
    #[arg(long, value_enum, default_value_t = Sampling::Floor)]
    pub sampling: Sampling,

    /// Maximum altitude change between consecutive samples; repeat
    /// for multiple smoothing passes, applied in order (e.g. a coarse
    /// pass at 10 then a fine pass at 0.5).
    #[arg(short, long = "max-slope")]
    pub max_slopes: Vec<f64>,

    #[command(subcommand)]
    pub cmd: Command,
}

/// An "x,y" pixel-space coordinate pair.
#[derive(Clone, Copy, Debug)]
pub struct Xy(pub Coord<f64>);

impl FromStr for Xy {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let idx = s.find(',').ok_or_else(|| anyhow!("not a valid x,y pair"))?;
        let (x_str, y_str) = s.split_at(idx);
        let x = f64::from_str(x_str)?;
        let y = f64::from_str(&y_str[1..])?;
        Ok(Self(Coord { x, y }))
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Sampling {
    /// Nearest lower pixel.
    Floor,
    /// Nearest pixel.
    Round,
    /// Weighted average of the four surrounding cells.
    Bilinear,
}

impl From<Sampling> for SampleMode {
    fn from(sampling: Sampling) -> Self {
        match sampling {
            Sampling::Floor => SampleMode::Floor,
            Sampling::Round => SampleMode::Round,
            Sampling::Bilinear => SampleMode::Bilinear,
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print path samples as CSV to stdout.
    Csv,

    /// Print the path as JSON to stdout.
    Json,

    /// Plot the altitude profile to the terminal.
    Plot,
}
