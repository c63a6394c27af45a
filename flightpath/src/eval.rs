//! Path accuracy evaluation for simulated or real flights.

use crate::{error::FlightPathError, path::PathPoint};
use geo::geometry::Coord;
use rand::Rng;
use raster::C;

/// Returns the per-axis `[x, y, z]` mean squared error between a
/// planned path and the path actually flown.
///
/// The two paths must pair up sample for sample; a length mismatch is
/// an error. Two empty paths have zero error.
pub fn mean_squared_error(
    expected: &[PathPoint],
    actual: &[PathPoint],
) -> Result<[C; 3], FlightPathError> {
    if expected.len() != actual.len() {
        return Err(FlightPathError::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    if expected.is_empty() {
        return Ok([0.0; 3]);
    }

    let mut sums = [0.0; 3];
    for (e, a) in expected.iter().zip(actual) {
        sums[0] += (e.position.x - a.position.x).powi(2);
        sums[1] += (e.position.y - a.position.y).powi(2);
        sums[2] += (e.altitude - a.altitude).powi(2);
    }

    #[allow(clippy::cast_precision_loss)]
    let n = expected.len() as C;
    Ok(sums.map(|sum| sum / n))
}

/// Returns the total 3-D arc length of `points`.
pub fn total_distance(points: &[PathPoint]) -> C {
    points
        .windows(2)
        .map(|pair| point_distance(&pair[0], &pair[1]))
        .sum()
}

/// Euclidean 3-D distance between two path samples.
pub(crate) fn point_distance(a: &PathPoint, b: &PathPoint) -> C {
    let dx = b.position.x - a.position.x;
    let dy = b.position.y - a.position.y;
    let dz = b.altitude - a.altitude;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Returns a copy of `points` with uniform per-axis jitter in
/// `[-amplitude, amplitude]`, for exercising the error metrics
/// without a real flight log.
pub fn with_noise<R: Rng>(points: &[PathPoint], amplitude: C, rng: &mut R) -> Vec<PathPoint> {
    points
        .iter()
        .map(|point| PathPoint {
            position: Coord {
                x: point.position.x + rng.random_range(-amplitude..=amplitude),
                y: point.position.y + rng.random_range(-amplitude..=amplitude),
            },
            altitude: point.altitude + rng.random_range(-amplitude..=amplitude),
        })
        .collect()
}
