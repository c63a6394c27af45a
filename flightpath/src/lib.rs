//! # Terrain-following flight paths
//!
//! `flightpath` walks straight lines between 2-D waypoints over an
//! elevation raster, holds a fixed clearance above the terrain under
//! each sample, and limits the climb/descent rate of the resulting
//! altitude profile.

mod error;
mod eval;
mod path;
mod smooth;
mod traverse;

pub use {
    crate::{
        error::FlightPathError,
        eval::{mean_squared_error, total_distance, with_noise},
        path::{FlightPath, FlightPathBuilder, PathPoint, DEFAULT_CLEARANCE, DEFAULT_SPACING},
        smooth::limit_slopes,
        traverse::GridLine,
    },
    geo, raster,
};
