use crate::FlightPathError;
use geo::geometry::Coord;
use log::debug;
use raster::{HeightSource, C};

/// Default altitude margin held above terrain height.
pub const DEFAULT_CLEARANCE: C = 3.0;

/// Default arc-length distance between interpolated samples.
pub const DEFAULT_SPACING: C = 0.5;

/// One sample of a planned path: a pixel-space position and the
/// altitude to fly there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    pub position: Coord<C>,
    pub altitude: C,
}

/// A terrain-following path through an ordered list of waypoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlightPath {
    points: Vec<PathPoint>,
}

impl FlightPath {
    pub fn builder() -> FlightPathBuilder {
        FlightPathBuilder {
            waypoints: Vec::new(),
            spacing: DEFAULT_SPACING,
            clearance: DEFAULT_CLEARANCE,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathPoint> + '_ {
        self.points.iter()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Returns the altitude of every sample, in path order.
    pub fn altitudes(&self) -> Vec<C> {
        self.points.iter().map(|point| point.altitude).collect()
    }

    /// Returns the cumulative 3-D arc length at every sample, starting
    /// at zero.
    pub fn distances(&self) -> Vec<C> {
        let mut distances = Vec::with_capacity(self.points.len());
        if let Some(first) = self.points.first() {
            distances.push(0.0);
            let mut acc = 0.0;
            let mut last = first;
            for point in &self.points[1..] {
                acc += crate::eval::point_distance(last, point);
                distances.push(acc);
                last = point;
            }
        }
        distances
    }

    /// Returns the total 3-D arc length of the path.
    pub fn total_distance(&self) -> C {
        crate::eval::total_distance(&self.points)
    }

    /// Limits the altitude profile's climb/descent rate to
    /// `max_height_diff` per sample. See [`crate::limit_slopes`].
    pub fn smooth(&mut self, max_height_diff: C) {
        let mut altitudes = self.altitudes();
        crate::smooth::limit_slopes(&mut altitudes, max_height_diff);
        for (point, altitude) in self.points.iter_mut().zip(altitudes) {
            point.altitude = altitude;
        }
    }
}

impl From<Vec<PathPoint>> for FlightPath {
    fn from(points: Vec<PathPoint>) -> Self {
        Self { points }
    }
}

/// Builds a [`FlightPath`] from an ordered waypoint list and a height
/// source.
pub struct FlightPathBuilder {
    waypoints: Vec<Coord<C>>,

    /// Arc-length distance between interpolated samples.
    spacing: C,

    /// Altitude margin added above terrain height.
    clearance: C,
}

impl FlightPathBuilder {
    pub fn waypoint(mut self, coord: Coord<C>) -> Self {
        self.waypoints.push(coord);
        self
    }

    pub fn waypoints<I>(mut self, coords: I) -> Self
    where
        I: IntoIterator<Item = Coord<C>>,
    {
        self.waypoints.extend(coords);
        self
    }

    pub fn spacing(mut self, spacing: C) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn clearance(mut self, clearance: C) -> Self {
        self.clearance = clearance;
        self
    }

    /// Interpolates every consecutive waypoint pair and concatenates
    /// the segments, sampling `source` under each step.
    ///
    /// Fewer than two waypoints produce an empty path. Segment
    /// boundary points are deliberately not deduplicated: a segment's
    /// final point and the next segment's first point coincide.
    pub fn build<S: HeightSource>(&self, source: &S) -> Result<FlightPath, FlightPathError> {
        if self.spacing <= 0.0 {
            return Err(FlightPathError::Spacing(self.spacing));
        }
        if self.waypoints.len() < 2 {
            return Ok(FlightPath::default());
        }

        let mut points = Vec::new();
        for pair in self.waypoints.windows(2) {
            segment(
                source,
                pair[0],
                pair[1],
                self.spacing,
                self.clearance,
                &mut points,
            )?;
        }

        debug!(
            "path; waypoints: {}, points: {}",
            self.waypoints.len(),
            points.len()
        );

        Ok(FlightPath { points })
    }
}

/// Walks the straight line from `src` to `dst` at fixed `spacing`,
/// appending one [`PathPoint`] per step plus a final point exactly at
/// `dst`.
///
/// A zero-length segment appends the destination point only, so no
/// division by the segment length ever happens. The two final points
/// of a non-degenerate segment may be closer together than `spacing`.
fn segment<S: HeightSource>(
    source: &S,
    src: Coord<C>,
    dst: Coord<C>,
    spacing: C,
    clearance: C,
    points: &mut Vec<PathPoint>,
) -> Result<(), FlightPathError> {
    let delta = dst - src;
    let length = delta.x.hypot(delta.y);

    if length > 0.0 {
        let step = Coord {
            x: delta.x * spacing / length,
            y: delta.y * spacing / length,
        };
        let mut position = src;
        let mut travelled = 0.0;
        while travelled < length {
            points.push(PathPoint {
                position,
                altitude: source.height(position)? + clearance,
            });
            position = position + step;
            travelled += spacing;
        }
    }

    points.push(PathPoint {
        position: dst,
        altitude: source.height(dst)? + clearance,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Coord, FlightPath, FlightPathError, PathPoint};
    use approx::assert_relative_eq;
    use raster::{Grid, RasterError, SampleMode, Sampler};

    fn flat_sampler(grid: &Grid) -> Sampler<'_> {
        Sampler::new(grid, SampleMode::Floor)
    }

    #[test]
    fn test_flat_raster_path() {
        let grid = Grid::flat(10, 10, 0.0);
        let path = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 5.0, y: 0.0 })
            .spacing(1.0)
            .clearance(3.0)
            .build(&flat_sampler(&grid))
            .unwrap();

        assert_eq!(path.len(), 6);
        for (i, point) in path.iter().enumerate() {
            assert_relative_eq!(point.position.x, i as f64);
            assert_relative_eq!(point.position.y, 0.0);
            assert_relative_eq!(point.altitude, 3.0);
        }
    }

    #[test]
    fn test_point_count_and_exact_endpoint() {
        // L = 4.5 with spacing 1 gives ceil(4.5) + 1 = 6 points.
        let grid = Grid::flat(10, 10, 0.0);
        let path = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 0.0, y: 4.5 })
            .spacing(1.0)
            .build(&flat_sampler(&grid))
            .unwrap();

        assert_eq!(path.len(), 6);
        let last = path.points().last().unwrap();
        assert_eq!(last.position, Coord { x: 0.0, y: 4.5 });
    }

    #[test]
    fn test_altitude_is_terrain_plus_clearance() {
        // One row ramping from 0 to 5.
        let grid = Grid::new(6, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let path = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 5.0, y: 0.0 })
            .spacing(1.0)
            .clearance(3.0)
            .build(&flat_sampler(&grid))
            .unwrap();

        assert_eq!(path.altitudes(), vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_degenerate_segment_is_single_point() {
        let grid = Grid::flat(4, 4, 7.0);
        let path = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .build(&flat_sampler(&grid))
            .unwrap();

        assert_eq!(
            path.points(),
            &[PathPoint {
                position: Coord { x: 0.0, y: 0.0 },
                altitude: 10.0,
            }][..]
        );
    }

    #[test]
    fn test_too_few_waypoints_is_empty_path() {
        let grid = Grid::flat(4, 4, 0.0);
        let sampler = flat_sampler(&grid);
        let empty = FlightPath::builder().build(&sampler).unwrap();
        assert!(empty.is_empty());

        let single = FlightPath::builder()
            .waypoint(Coord { x: 1.0, y: 1.0 })
            .build(&sampler)
            .unwrap();
        assert!(single.is_empty());
    }

    #[test]
    fn test_segment_boundaries_are_duplicated() {
        let grid = Grid::flat(10, 10, 0.0);
        let path = FlightPath::builder()
            .waypoints([
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 2.0, y: 0.0 },
                Coord { x: 4.0, y: 0.0 },
            ])
            .spacing(1.0)
            .build(&flat_sampler(&grid))
            .unwrap();

        // Segments contribute 3 + 3 points; x = 2 appears twice.
        assert_eq!(path.len(), 7);
        assert_eq!(path.points()[2].position, path.points()[3].position);
    }

    #[test]
    fn test_out_of_range_waypoint_fails() {
        let grid = Grid::flat(10, 10, 0.0);
        let result = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 20.0, y: 0.0 })
            .build(&flat_sampler(&grid));
        assert!(matches!(
            result,
            Err(FlightPathError::Raster(RasterError::OutOfRange(_)))
        ));
    }

    #[test]
    fn test_nonpositive_spacing_fails() {
        let grid = Grid::flat(4, 4, 0.0);
        let result = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 1.0, y: 0.0 })
            .spacing(0.0)
            .build(&flat_sampler(&grid));
        assert!(matches!(result, Err(FlightPathError::Spacing(_))));
    }

    #[test]
    fn test_smooth_applies_to_altitudes() {
        let points: Vec<PathPoint> = [0.0, 3.0, 0.0]
            .iter()
            .enumerate()
            .map(|(i, &altitude)| PathPoint {
                position: Coord {
                    x: i as f64,
                    y: 0.0,
                },
                altitude,
            })
            .collect();
        let mut path = FlightPath::from(points);
        path.smooth(1.0);
        assert_eq!(path.altitudes(), vec![2.0, 3.0, 2.0]);
    }

    #[test]
    fn test_distances_accumulate_arc_length() {
        let grid = Grid::flat(10, 10, 0.0);
        let path = FlightPath::builder()
            .waypoint(Coord { x: 0.0, y: 0.0 })
            .waypoint(Coord { x: 4.0, y: 0.0 })
            .spacing(1.0)
            .build(&flat_sampler(&grid))
            .unwrap();

        let distances = path.distances();
        assert_eq!(distances, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(path.total_distance(), 4.0);
    }
}
