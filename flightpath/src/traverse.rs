use geo::geometry::Coord;

/// Enumerates the integer raster cells on the straight line between
/// two cells, both endpoints included.
///
/// After yielding the start cell, each step advances the axis that
/// has made the least fractional progress toward its total delta,
/// yielding `dx + dy + 1` cells overall. Intended as the substrate
/// for terrain-aware path pruning, which needs every cell a segment
/// crosses rather than fixed-spacing samples.
#[derive(Clone, Debug)]
pub struct GridLine {
    position: Coord<i64>,
    step: Coord<i64>,
    delta: Coord<i64>,
    travelled: Coord<i64>,
    started: bool,
}

impl GridLine {
    pub fn new(start: Coord<i64>, end: Coord<i64>) -> Self {
        Self {
            position: start,
            step: Coord {
                x: (end.x - start.x).signum(),
                y: (end.y - start.y).signum(),
            },
            delta: Coord {
                x: (end.x - start.x).abs(),
                y: (end.y - start.y).abs(),
            },
            travelled: Coord { x: 0, y: 0 },
            started: false,
        }
    }
}

impl Iterator for GridLine {
    type Item = Coord<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.position);
        }
        if self.travelled.x >= self.delta.x && self.travelled.y >= self.delta.y {
            return None;
        }
        // Compare (ix + 0.5) / dx against (iy + 0.5) / dy with the
        // divisions cross-multiplied away, which also means a
        // zero-length axis can never win a step.
        if (2 * self.travelled.x + 1) * self.delta.y < (2 * self.travelled.y + 1) * self.delta.x {
            self.position.x += self.step.x;
            self.travelled.x += 1;
        } else {
            self.position.y += self.step.y;
            self.travelled.y += 1;
        }
        Some(self.position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridLine {
    #[allow(clippy::cast_sign_loss)]
    fn len(&self) -> usize {
        let total = self.delta.x + self.delta.y + 1;
        let emitted = self.travelled.x + self.travelled.y + i64::from(self.started);
        (total - emitted) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{Coord, GridLine};

    fn trace(start: (i64, i64), end: (i64, i64)) -> Vec<(i64, i64)> {
        GridLine::new(
            Coord {
                x: start.0,
                y: start.1,
            },
            Coord { x: end.0, y: end.1 },
        )
        .map(|cell| (cell.x, cell.y))
        .collect()
    }

    #[test]
    fn test_steep_line() {
        let cells = trace((0, 0), (1, 7));
        assert_eq!(
            cells,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 4),
                (1, 5),
                (1, 6),
                (1, 7),
            ]
        );
    }

    #[test]
    fn test_cell_count_is_dx_plus_dy_plus_one() {
        for (start, end) in [
            ((0, 0), (3, 2)),
            ((5, 5), (0, 0)),
            ((-2, 1), (4, -3)),
            ((0, 0), (7, 7)),
        ] {
            let line = GridLine::new(
                Coord {
                    x: start.0,
                    y: start.1,
                },
                Coord { x: end.0, y: end.1 },
            );
            let expected =
                (end.0 - start.0).unsigned_abs() as usize + (end.1 - start.1).unsigned_abs() as usize + 1;
            assert_eq!(line.len(), expected);
            let cells: Vec<Coord<i64>> = line.collect();
            assert_eq!(cells.len(), expected);
            assert_eq!(cells[0], Coord { x: start.0, y: start.1 });
            assert_eq!(cells[cells.len() - 1], Coord { x: end.0, y: end.1 });
        }
    }

    #[test]
    fn test_horizontal_line() {
        let cells = trace((0, 0), (-3, 0));
        assert_eq!(cells, vec![(0, 0), (-1, 0), (-2, 0), (-3, 0)]);
    }

    #[test]
    fn test_vertical_line() {
        let cells = trace((2, 1), (2, 4));
        assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_single_cell() {
        let cells = trace((3, 3), (3, 3));
        assert_eq!(cells, vec![(3, 3)]);
    }

    #[test]
    fn test_len_counts_down() {
        let mut line = GridLine::new(Coord { x: 0, y: 0 }, Coord { x: 2, y: 1 });
        assert_eq!(line.len(), 4);
        line.next();
        assert_eq!(line.len(), 3);
        let rest: Vec<Coord<i64>> = line.collect();
        assert_eq!(rest.len(), 3);
    }
}
