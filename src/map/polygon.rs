use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// Ordered closed polygon describing the playable region's perimeter
///
/// Vertices are in world units (grid coordinate times scale). The closing
/// edge back to the first vertex is implicit. A polygon with fewer than 3
/// vertices defines no region: `contains` is always false for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Build from the flat `[x1, y1, x2, y2, ...]` artifact layout
    ///
    /// A trailing unpaired value is dropped.
    pub fn from_flat(flat: &[f32]) -> Self {
        let vertices = flat
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
            .collect();
        Self { vertices }
    }

    /// Flatten to the `[x1, y1, x2, y2, ...]` artifact layout
    pub fn to_flat(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.vertices.len() * 2);
        for v in &self.vertices {
            flat.push(v.x);
            flat.push(v.y);
        }
        flat
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether this polygon defines no usable region
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Even-odd ray-cast containment test
    ///
    /// Called once per moving player per tick: O(vertex count), no
    /// allocation. Points exactly on a vertex or on a horizontal edge's
    /// span count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }

        for v in &self.vertices {
            if v.x == point.x && v.y == point.y {
                return true;
            }
        }

        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];

            // Point lying exactly on a horizontal edge's span
            if vi.y == vj.y
                && vi.y == point.y
                && point.x >= vi.x.min(vj.x)
                && point.x <= vi.x.max(vj.x)
            {
                return true;
            }

            // Toggle on each edge the horizontal ray crosses
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_intersect = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
                if point.x < x_intersect {
                    inside = !inside;
                }
            }

            j = i;
        }

        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_room() -> Polygon {
        Polygon::new(vec![
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 100.0),
            Vec2::new(300.0, 300.0),
            Vec2::new(100.0, 300.0),
        ])
    }

    #[test]
    fn test_square_room_interior() {
        let room = square_room();
        assert!(room.contains(Vec2::new(200.0, 200.0)));
        assert!(!room.contains(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_vertices_count_as_inside() {
        let room = square_room();
        for v in room.vertices() {
            assert!(room.contains(*v), "vertex {:?} should test inside", v);
        }
    }

    #[test]
    fn test_horizontal_edge_span_is_inside() {
        let room = square_room();
        assert!(room.contains(Vec2::new(150.0, 100.0)));
        assert!(room.contains(Vec2::new(250.0, 300.0)));
    }

    #[test]
    fn test_interior_translation_stays_inside() {
        let room = square_room();
        let center = Vec2::new(200.0, 200.0);
        for (dx, dy) in [(50.0, 0.0), (-50.0, 0.0), (0.0, 50.0), (-30.0, -70.0)] {
            assert!(room.contains(center + Vec2::new(dx, dy)));
        }
    }

    #[test]
    fn test_outside_all_sides() {
        let room = square_room();
        assert!(!room.contains(Vec2::new(200.0, 50.0)));
        assert!(!room.contains(Vec2::new(200.0, 350.0)));
        assert!(!room.contains(Vec2::new(50.0, 200.0)));
        assert!(!room.contains(Vec2::new(350.0, 200.0)));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        assert!(!Polygon::default().contains(Vec2::ZERO));
        let two = Polygon::new(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]);
        assert!(!two.contains(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_concave_polygon() {
        // L-shape: the notch at the top-right is outside
        let l_shape = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 50.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(50.0, 100.0),
            Vec2::new(0.0, 100.0),
        ]);
        assert!(l_shape.contains(Vec2::new(25.0, 75.0)));
        assert!(l_shape.contains(Vec2::new(75.0, 25.0)));
        assert!(!l_shape.contains(Vec2::new(75.0, 75.0)));
    }

    #[test]
    fn test_flat_roundtrip() {
        let room = square_room();
        let flat = room.to_flat();
        assert_eq!(flat.len(), 8);
        assert_eq!(Polygon::from_flat(&flat), room);
    }

    #[test]
    fn test_from_flat_drops_unpaired_tail() {
        let poly = Polygon::from_flat(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(poly.len(), 2);
    }
}
