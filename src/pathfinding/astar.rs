use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::geometry::{distance_manhattan, CARDINALS};
use crate::pathfinding::NavGrid;

// =============================================================================
// A* PATHFINDING
// =============================================================================
///
/// A* pathfinding over a [`NavGrid`]: four-directional, uniform step cost,
/// Manhattan heuristic.
///
/// Returns the cells to walk through, excluding `start` and including `goal`.
/// An empty Vec means "nothing to do": already at the goal, goal blocked or
/// out of bounds, or no route exists.
///
/// Equal-cost frontier entries are expanded in insertion order, so identical
/// queries always produce identical paths.
pub fn find_path(start: (i32, i32), goal: (i32, i32), grid: &NavGrid) -> Vec<(i32, i32)> {
    let cap = (grid.width().max(0) as usize) * (grid.height().max(0) as usize);
    find_path_bounded(start, goal, grid, cap)
}

/// [`find_path`] with an explicit cap on expanded nodes.
///
/// # Arguments
/// * `start` - Starting cell (x, y); need not be traversable itself
/// * `goal` - Target cell (x, y)
/// * `grid` - Traversability; cloned internally, never modified
/// * `max_iterations` - Maximum nodes to expand before giving up
pub fn find_path_bounded(
    start: (i32, i32),
    goal: (i32, i32),
    grid: &NavGrid,
    max_iterations: usize,
) -> Vec<(i32, i32)> {
    if start == goal || !grid.in_bounds(start.0, start.1) || !grid.is_traversable(goal.0, goal.1) {
        return Vec::new();
    }

    // Private copy: expanded cells are closed by marking them untraversable.
    let mut work = grid.clone();
    work.set(start.0, start.1, true);

    // Priority queue: (f_score, insertion seq, x, y) - use Reverse for min-heap
    let mut open: BinaryHeap<Reverse<(i32, u64, i32, i32)>> = BinaryHeap::new();
    let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
    let mut g_score: HashMap<(i32, i32), i32> = HashMap::new();
    let mut seq = 0u64;

    g_score.insert(start, 0);
    let h = distance_manhattan(start.0, start.1, goal.0, goal.1);
    open.push(Reverse((h, seq, start.0, start.1)));

    let mut iterations = 0;

    while let Some(Reverse((_, _, cx, cy))) = open.pop() {
        // Stale entry for a cell that was already expanded.
        if !work.is_traversable(cx, cy) {
            continue;
        }

        iterations += 1;
        if iterations > max_iterations {
            debug!(?start, ?goal, max_iterations, "path search gave up");
            return Vec::new();
        }

        let current = (cx, cy);

        // Reached goal, reconstruct path
        if current == goal {
            return reconstruct_path(&came_from, start, goal);
        }

        work.set(cx, cy, false);
        let current_g = g_score[&current];

        for (dx, dy) in CARDINALS {
            let next = (cx + dx, cy + dy);
            if !work.is_traversable(next.0, next.1) {
                continue;
            }

            let new_g = current_g + 1;
            let existing_g = g_score.get(&next).copied().unwrap_or(i32::MAX);

            if new_g < existing_g {
                g_score.insert(next, new_g);
                came_from.insert(next, current);
                let f = new_g + distance_manhattan(next.0, next.1, goal.0, goal.1);
                seq += 1;
                open.push(Reverse((f, seq, next.0, next.1)));
            }
        }
    }

    Vec::new() // No path found
}

/// Walk `came_from` back from the goal. The start cell is left out.
fn reconstruct_path(
    came_from: &HashMap<(i32, i32), (i32, i32)>,
    start: (i32, i32),
    goal: (i32, i32),
) -> Vec<(i32, i32)> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}
