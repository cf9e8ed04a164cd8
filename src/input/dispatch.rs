use glam::Vec2;

use crate::engine::Simulation;
use crate::geometry::Facing;
use crate::input::{Action, ActionMap, InputState};

/// A pointer press in progress.
#[derive(Copy, Clone, Debug)]
struct Press {
    origin: Vec2,
    dragged: bool,
}

/// Turns one frame of [`InputState`] into simulation calls.
///
/// Holds only gesture bookkeeping; every decision about the world is made by
/// the [`Simulation`] it is handed.
#[derive(Debug)]
pub struct InputDispatcher {
    bindings: ActionMap<Action>,
    /// Pointer travel in screen pixels that turns a press into a drag.
    click_slop: f32,
    press: Option<Press>,
}

impl InputDispatcher {
    pub fn new(bindings: ActionMap<Action>, click_slop: f32) -> Self {
        Self { bindings, click_slop, press: None }
    }

    pub fn dispatch<I>(&mut self, input: &InputState, sim: &mut Simulation<I>) {
        // One step per key-down edge; held keys do not repeat.
        for facing in Facing::ALL {
            if self.bindings.is_pressed(Action::Step(facing), input) {
                sim.step(facing);
            }
        }

        let pointer = Vec2::from(input.mouse_pos);

        if self.bindings.is_pressed(Action::Pointer, input) {
            sim.camera_mut().begin_drag(pointer);
            self.press = Some(Press { origin: pointer, dragged: false });
        }

        if let Some(press) = self.press.as_mut() {
            if self.bindings.is_held(Action::Pointer, input) {
                if !press.dragged && pointer.distance(press.origin) > self.click_slop {
                    press.dragged = true;
                }
                if press.dragged {
                    sim.camera_mut().drag_to(pointer);
                }
            }
        }

        if self.bindings.is_released(Action::Pointer, input) {
            if let Some(press) = self.press.take() {
                if !press.dragged {
                    sim.walk_to_screen(pointer);
                }
            }
            sim.camera_mut().end_drag();
        }

        if input.mouse_wheel != 0.0 {
            // winit reports scroll-up as positive; the camera takes DOM deltas.
            sim.camera_mut().zoom(pointer, -input.mouse_wheel);
        }
    }
}
