use crate::map::MapError;

/// Binary occupancy grid decoded from the map bitmap
///
/// Row-major, origin at the top-left cell. Immutable once built; the
/// perimeter tracer and the artifact codec are the only consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Build a grid from rows of 0/1 values (the persisted artifact shape)
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MapError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(MapError::DegenerateInput("empty grid"));
        }
        let width = rows[0].len();
        if rows.iter().any(|row| row.len() != width) {
            return Err(MapError::DegenerateInput("ragged grid rows"));
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| v != 0))
            .collect();
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Fully-occupied rectangular grid
    pub fn filled(width: usize, height: usize) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::DegenerateInput("empty grid"));
        }
        Ok(Self {
            width,
            height,
            cells: vec![true; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at `(x, y)` is occupied; out-of-range is unoccupied
    #[inline]
    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    /// Re-encode as rows of 0/1 values for persistence
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&b| u8::from(b)).collect())
            .collect()
    }
}
