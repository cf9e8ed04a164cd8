use glam::Vec2;

/// A drawable resting on a cell, possibly blocking movement.
#[derive(Clone, Debug)]
pub struct PlacedItem<I> {
    pub item_id: u32,
    pub image: I,
    pub blocks_movement: bool,
    /// Top-left draw position in world pixels (already footprint-aligned).
    pub world_pos: Vec2,
}

/// One written slot of the map grid.
#[derive(Clone, Debug)]
pub struct Cell<I> {
    pub ground: Option<I>,
    /// Insertion order is draw order.
    pub items: Vec<PlacedItem<I>>,
    walkable: bool,
}

impl<I> Cell<I> {
    pub(crate) fn empty() -> Self {
        Self { ground: None, items: Vec::new(), walkable: false }
    }

    /// Cached walkability: something to stand on and nothing in the way.
    #[inline]
    pub fn walkable(&self) -> bool {
        self.walkable
    }

    pub fn blocks_movement(&self) -> bool {
        self.items.iter().any(|item| item.blocks_movement)
    }

    pub(crate) fn refresh_walkable(&mut self) {
        let bare = self.ground.is_none() && self.items.is_empty();
        self.walkable = !bare && !self.blocks_movement();
    }
}

// =============================================================================
// MAP GRID
// =============================================================================
///
/// Fixed-size `width × height` grid, row-major. Slots never written by the map
/// document are `None` (void) and count as non-walkable.
#[derive(Clone, Debug)]
pub struct MapGrid<I> {
    width: u32,
    height: u32,
    tile_size: f32,
    cells: Vec<Option<Cell<I>>>,
}

impl<I> MapGrid<I> {
    pub(crate) fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let size = width as usize * height as usize;
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || None);
        Self { width, height, tile_size, cells }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn tile_size(&self) -> f32 { self.tile_size }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// The cell at `(x, y)`, or `None` when out of bounds or never written.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell<I>> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Writes through an in-bounds slot, creating an empty cell on first use.
    pub(crate) fn slot_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell<I>> {
        let i = self.index(x, y)?;
        Some(self.cells[i].get_or_insert_with(Cell::empty))
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Cell::walkable)
    }

    /// Every written cell with its coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = ((i32, i32), &Cell<I>)> {
        let w = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|c| (((i % w) as i32, (i / w) as i32), c))
        })
    }
}
