mod astar;
mod nav_grid;

pub use astar::{find_path, find_path_bounded};
pub use nav_grid::NavGrid;
