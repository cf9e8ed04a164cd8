use crate::map::MapGrid;

// =============================================================================
// NAVIGATION GRID
// =============================================================================
///
/// Boolean traversability projection of a [`MapGrid`].
///
/// Cheap to clone; the planner works on its own copy so a query never
/// changes what the next query sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl NavGrid {
    /// Every cell traversable.
    pub fn open(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self { width, height, cells: vec![true; size] }
    }

    /// Copy each cell's cached walkability. Void slots are not traversable.
    pub fn from_map<I>(map: &MapGrid<I>) -> Self {
        let width = map.width() as i32;
        let height = map.height() as i32;
        let mut cells = vec![false; (width * height) as usize];
        for ((x, y), cell) in map.cells() {
            cells[(y * width + x) as usize] = cell.walkable();
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// False for out-of-bounds coordinates.
    #[inline]
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cells[(y * self.width + x) as usize]
    }

    /// Patch one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, traversable: bool) {
        if self.in_bounds(x, y) {
            self.cells[(y * self.width + x) as usize] = traversable;
        }
    }
}
