// =============================================================================
// GEOMETRY.RS - Grid math shared by the map, the planner and the controller
//
// - Distance on the cell grid (A* heuristic)
// - Conversions between cell coordinates and world pixels
// - Facing selection from a movement vector
// =============================================================================

use glam::Vec2;

/// Calculate Manhattan distance between two points.
/// Also known as "taxicab distance" - the distance traveling only
/// along grid axes (no diagonals).
///
/// Use for: 4-directional movement costs, the A* heuristic.
#[inline]
pub fn distance_manhattan(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    (x1 - x2).abs() + (y1 - y2).abs()
}

// =============================================================================
// CELL <-> WORLD
// =============================================================================

/// World-pixel position of a cell's top-left corner.
///
/// Ground images, item sprites and waypoints all anchor here.
#[inline]
pub fn cell_origin(cell: (i32, i32), tile_size: f32) -> Vec2 {
    Vec2::new(cell.0 as f32 * tile_size, cell.1 as f32 * tile_size)
}

/// Cell containing a world-pixel point (floor division).
#[inline]
pub fn cell_at(point: Vec2, tile_size: f32) -> (i32, i32) {
    (
        (point.x / tile_size).floor() as i32,
        (point.y / tile_size).floor() as i32,
    )
}

// =============================================================================
// DIRECTION HELPERS
// =============================================================================

/// The 4 cardinal directions as (dx, dy) offsets, in planner expansion order.
pub const CARDINALS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Cardinal direction an actor faces. Selects which sprite row is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Right, Facing::Down, Facing::Left];

    /// Unit grid offset (y grows downward).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Right => (1, 0),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
        }
    }

    /// Row in a four-row outfit sheet ordered top, right, bottom, left.
    pub fn sprite_row(self) -> usize {
        match self {
            Facing::Up => 0,
            Facing::Right => 1,
            Facing::Down => 2,
            Facing::Left => 3,
        }
    }
}

/// Pick a facing from a movement vector.
///
/// The dominant axis wins: horizontal when `|dx| > |dy|`, vertical otherwise
/// (so exact diagonals face up/down). Returns `None` for the zero vector so
/// callers keep the previous facing.
pub fn direction_from_vector(dx: f32, dy: f32) -> Option<Facing> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Facing::Right } else { Facing::Left })
    } else {
        Some(if dy > 0.0 { Facing::Down } else { Facing::Up })
    }
}
