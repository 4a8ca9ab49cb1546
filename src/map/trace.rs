//! Perimeter tracing: occupancy grid to ordered boundary polygon.
//!
//! Clockwise 4-connected contour walk starting at cell `(0,0)`. Only
//! verified for a single simply-connected region without holes; grids
//! with multiple components or donut topology are a precondition
//! violation and get best-effort output.

use hashbrown::HashSet;
use tracing::warn;

use crate::map::{MapError, OccupancyGrid, Polygon};
use crate::util::vec2::Vec2;

/// Neighbor offsets in clockwise order: right, down, left, up
const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Polygon produced by a perimeter trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceResult {
    pub polygon: Polygon,
    /// True when the bounded-walk safety valve fired and the polygon is
    /// only a partial perimeter
    pub truncated: bool,
}

/// Trace the perimeter of the occupied region, scaling grid coordinates
/// to world units
///
/// The walk keeps a heading and scans neighbors starting one step
/// clockwise before it, so it hugs the boundary by always preferring to
/// turn right. A vertex is emitted whenever the heading changes,
/// deduplicated per cell. The walk ends when it returns to `(0,0)`, or
/// after `4 * width * height` steps as a safety bound.
pub fn extract(grid: &OccupancyGrid, scale: f32) -> Result<TraceResult, MapError> {
    if !grid.is_occupied(0, 0) {
        return Err(MapError::DegenerateInput("cell (0,0) must be occupied"));
    }

    let start = (0i64, 0i64);
    let mut vertices = vec![scaled(start, scale)];
    let mut emitted: HashSet<(i64, i64)> = HashSet::new();
    emitted.insert(start);

    // First heading out of the start cell: scan clockwise from "right"
    let Some(first_direction) = (0..4usize).find(|&d| {
        let (dx, dy) = DIRECTIONS[d];
        grid.is_occupied(start.0 + dx, start.1 + dy)
    }) else {
        // Isolated start cell: the region is a single point
        return Ok(TraceResult {
            polygon: Polygon::new(vertices),
            truncated: false,
        });
    };

    let mut current = start;
    let mut heading = first_direction;
    let mut last_taken: Option<usize> = None;

    let max_steps = 4 * grid.width() * grid.height();
    let mut steps = 0;

    while steps < max_steps {
        steps += 1;

        // Prefer turning clockwise: start the scan one step before the
        // current heading
        let mut candidate = (heading + 3) % 4;
        let mut moved = false;

        for _ in 0..4 {
            let (dx, dy) = DIRECTIONS[candidate];
            let next = (current.0 + dx, current.1 + dy);

            if grid.is_occupied(next.0, next.1) {
                if last_taken != Some(candidate) && emitted.insert(current) {
                    vertices.push(scaled(current, scale));
                }

                current = next;
                last_taken = Some(candidate);
                heading = candidate;
                moved = true;

                if current == start {
                    return Ok(TraceResult {
                        polygon: Polygon::new(vertices),
                        truncated: false,
                    });
                }
                break;
            }

            candidate = (candidate + 1) % 4;
        }

        if !moved {
            // Dead end; cannot happen with symmetric 4-adjacency but kept
            // as a defensive exit
            if emitted.insert(current) {
                vertices.push(scaled(current, scale));
            }
            break;
        }
    }

    let truncated = steps >= max_steps;
    if truncated {
        warn!(
            steps,
            "perimeter trace hit the safety bound; polygon is partial"
        );
    }

    // Close the loop explicitly since the walk did not return to start
    if current != start {
        vertices.push(scaled(start, scale));
    }

    Ok(TraceResult {
        polygon: Polygon::new(vertices),
        truncated,
    })
}

#[inline]
fn scaled(cell: (i64, i64), scale: f32) -> Vec2 {
    Vec2::new(cell.0 as f32 * scale, cell.1 as f32 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_trace() {
        let grid = OccupancyGrid::filled(3, 2).unwrap();
        let result = extract(&grid, 2.0).unwrap();

        assert!(!result.truncated);
        assert_eq!(
            result.polygon.vertices(),
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 2.0),
                Vec2::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_rectangle_roundtrip_containment() {
        // Cell centers of the region interior re-rasterize strictly
        // inside the traced polygon, and the perimeter corners satisfy
        // the vertex rule.
        let grid = OccupancyGrid::filled(4, 3).unwrap();
        let result = extract(&grid, 5.0).unwrap();

        for y in 0..2 {
            for x in 0..3 {
                let center = Vec2::new((x as f32 + 0.5) * 5.0, (y as f32 + 0.5) * 5.0);
                assert!(
                    result.polygon.contains(center),
                    "interior cell ({}, {}) should rasterize inside",
                    x,
                    y
                );
            }
        }
        for corner in result.polygon.vertices() {
            assert!(result.polygon.contains(*corner));
        }
    }

    #[test]
    fn test_l_shape_trace() {
        let grid = OccupancyGrid::from_rows(&[
            vec![1, 1, 0],
            vec![1, 1, 1],
            vec![1, 1, 1],
        ])
        .unwrap();
        let result = extract(&grid, 1.0).unwrap();

        assert!(!result.truncated);
        assert_eq!(
            result.polygon.vertices(),
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(2.0, 2.0),
                Vec2::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_unoccupied_origin_is_degenerate() {
        let grid = OccupancyGrid::from_rows(&[vec![0, 1], vec![1, 1]]).unwrap();
        assert!(matches!(
            extract(&grid, 1.0),
            Err(MapError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_isolated_start_cell() {
        let grid = OccupancyGrid::from_rows(&[vec![1, 0], vec![0, 0]]).unwrap();
        let result = extract(&grid, 3.0).unwrap();

        assert!(!result.truncated);
        assert_eq!(result.polygon.vertices(), &[Vec2::ZERO]);
        assert!(result.polygon.is_degenerate());
    }

    #[test]
    fn test_horizontal_line_returns_to_start() {
        let grid = OccupancyGrid::from_rows(&[vec![1, 1, 1]]).unwrap();
        let result = extract(&grid, 1.0).unwrap();

        assert!(!result.truncated);
        // Out along the line, back along it: only the endpoints are
        // heading changes.
        assert_eq!(
            result.polygon.vertices(),
            &[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)]
        );
    }
}
