mod dispatch;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use dispatch::InputDispatcher;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::geometry::Facing;

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw hardware state for a single frame.
///
/// The host fills this from window events; `*_pressed` and `*_released` are
/// edges and only last until `clear_frame_state`.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    pub mouse_pos: [f32; 2],
    /// Wheel lines this frame; positive scrolls up (winit convention).
    pub mouse_wheel: f32,
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_wheel = 0.0;
    }

    /// Record a key going down. OS auto-repeat does not produce a new edge.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }
}

/// Maps logical actions (defined by the game) to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::Mouse(b) => input.is_mouse_held(*b),
            })
        })
    }

    /// Returns true if any bound source was released this frame.
    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_released(*k),
                InputSource::Mouse(b) => input.is_mouse_released(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Actions ──────────────────────────────────────────────────────────────────

/// Everything the player can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Step(Facing),
    /// Primary pointer: drag pans, click walks.
    Pointer,
}

impl ActionMap<Action> {
    /// WASD and arrow keys step; the left mouse button drives the pointer.
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        for (facing, keys) in [
            (Facing::Up, [KeyCode::KeyW, KeyCode::ArrowUp]),
            (Facing::Right, [KeyCode::KeyD, KeyCode::ArrowRight]),
            (Facing::Down, [KeyCode::KeyS, KeyCode::ArrowDown]),
            (Facing::Left, [KeyCode::KeyA, KeyCode::ArrowLeft]),
        ] {
            for key in keys {
                map.bind(Action::Step(facing), InputSource::Key(key));
            }
        }
        map.bind(Action::Pointer, InputSource::Mouse(MouseButton::Left));
        map
    }
}
