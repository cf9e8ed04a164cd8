use std::collections::VecDeque;

use glam::Vec2;
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::geometry::{cell_at, cell_origin, direction_from_vector, Facing};
use crate::map::MapGrid;

/// The single controllable character.
#[derive(Clone, Debug)]
pub struct Actor {
    /// Top-left of the actor sprite in world pixels.
    pub position: Vec2,
    pub facing: Facing,
    /// Waypoints (cell origins in world pixels), consumed front to back.
    pub path: VecDeque<Vec2>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    FollowingPath,
    /// A keyboard step landed this frame; the next tick settles to `Idle`.
    SteppingDiscrete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Blocked,
}

/// Drives the actor either one tile per key press or continuously along a
/// planned path.
#[derive(Clone, Debug)]
pub struct MovementController {
    actor: Actor,
    mode: Mode,
    tile_size: f32,
    /// World pixels per second while following a path.
    speed: f32,
    allow_void_steps: bool,
}

impl MovementController {
    /// Spawn facing down at the origin of `cell`.
    pub fn new(cell: (i32, i32), config: &GameConfig) -> Self {
        Self {
            actor: Actor {
                position: cell_origin(cell, config.tile_size),
                facing: Facing::Down,
                path: VecDeque::new(),
            },
            mode: Mode::Idle,
            tile_size: config.tile_size,
            speed: config.walk_speed,
            allow_void_steps: config.allow_void_steps,
        }
    }

    pub fn actor(&self) -> &Actor { &self.actor }
    pub fn mode(&self) -> Mode { self.mode }
    pub fn position(&self) -> Vec2 { self.actor.position }
    pub fn facing(&self) -> Facing { self.actor.facing }

    /// Cell under the actor's anchor point.
    pub fn cell(&self) -> (i32, i32) {
        cell_at(self.actor.position, self.tile_size)
    }

    /// Move exactly one tile in `direction`.
    ///
    /// Only the destination cell is checked: it is rejected when it lies
    /// outside the map or holds a blocking item. A cell the map never wrote
    /// is enterable unless `allow_void_steps` is off. A rejected step changes
    /// nothing, not even the facing. An accepted step cancels any path.
    pub fn step<I>(&mut self, direction: Facing, map: &MapGrid<I>) -> StepOutcome {
        let (dx, dy) = direction.offset();
        let target = self.actor.position + Vec2::new(dx as f32, dy as f32) * self.tile_size;
        let (cx, cy) = cell_at(target, self.tile_size);

        let open = map.in_bounds(cx, cy)
            && match map.get(cx, cy) {
                None => self.allow_void_steps,
                Some(cell) => !cell.blocks_movement(),
            };
        if !open {
            debug!(?direction, cell = ?(cx, cy), "step blocked");
            return StepOutcome::Blocked;
        }

        self.actor.position = target;
        self.actor.facing = direction;
        self.actor.path.clear();
        self.mode = Mode::SteppingDiscrete;
        StepOutcome::Moved
    }

    /// Replace the queued path with the given cells.
    ///
    /// An empty slice clears the path and stops in place.
    pub fn set_path(&mut self, cells: &[(i32, i32)]) {
        self.actor.path = cells.iter().map(|&c| cell_origin(c, self.tile_size)).collect();
        self.mode = if self.actor.path.is_empty() { Mode::Idle } else { Mode::FollowingPath };
    }

    pub fn clear_path(&mut self) {
        self.set_path(&[]);
    }

    /// Advance along the path by `speed * dt` world pixels.
    ///
    /// Each tick either moves toward the front waypoint or, when it is within
    /// reach, lands on it and drops it. Returns true if the position changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(&waypoint) = self.actor.path.front() else {
            self.mode = Mode::Idle;
            return false;
        };
        if dt <= 0.0 {
            return false;
        }

        let travel = self.speed * dt;
        let delta = waypoint - self.actor.position;
        let distance = delta.length();

        if let Some(facing) = direction_from_vector(delta.x, delta.y) {
            self.actor.facing = facing;
        }

        if distance > travel {
            self.actor.position += delta / distance * travel;
        } else {
            self.actor.position = waypoint;
            self.actor.path.pop_front();
            trace!(?waypoint, remaining = self.actor.path.len(), "waypoint reached");
        }

        self.mode = if self.actor.path.is_empty() { Mode::Idle } else { Mode::FollowingPath };
        true
    }
}
