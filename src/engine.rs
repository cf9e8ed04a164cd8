use std::time::Instant;

use glam::Vec2;
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::camera::Camera;
use crate::config::{GameConfig, WindowConfig};
use crate::geometry::{cell_at, Facing};
use crate::input::{ActionMap, InputDispatcher, InputState};
use crate::map::MapGrid;
use crate::movement::{MovementController, StepOutcome};
use crate::pathfinding::{find_path, NavGrid};
use crate::renderer::{RenderSink, SpriteRegistration};

// ── Simulation ──────────────────────────────────────────────────────────────

/// Owns the loaded map and everything that moves over it.
///
/// Scheduling contract: the host calls [`Simulation::tick`] once per frame;
/// nothing in here keeps its own timers.
pub struct Simulation<I> {
    map: MapGrid<I>,
    nav: NavGrid,
    mover: MovementController,
    camera: Camera,
}

impl<I> Simulation<I> {
    /// Spawn the actor at `spawn` and centre the camera on it.
    pub fn new(map: MapGrid<I>, spawn: (i32, i32), viewport: Vec2, config: &GameConfig) -> Self {
        let nav = NavGrid::from_map(&map);
        let mover = MovementController::new(spawn, config);
        let camera = Camera::new(mover.position(), viewport, &config.camera);
        Self { map, nav, mover, camera }
    }

    pub fn map(&self) -> &MapGrid<I> { &self.map }
    pub fn nav(&self) -> &NavGrid { &self.nav }
    pub fn controller(&self) -> &MovementController { &self.mover }
    pub fn camera(&self) -> &Camera { &self.camera }
    pub fn camera_mut(&mut self) -> &mut Camera { &mut self.camera }

    /// Keyboard step. An accepted step recentres the camera on the actor.
    pub fn step(&mut self, direction: Facing) -> StepOutcome {
        let outcome = self.mover.step(direction, &self.map);
        if outcome == StepOutcome::Moved {
            self.camera.follow(self.mover.position());
        }
        outcome
    }

    /// Plan from the actor's cell to `goal` and start walking.
    ///
    /// Returns the number of cells queued; zero means there was nowhere to go
    /// and any previous path was dropped.
    pub fn walk_to_cell(&mut self, goal: (i32, i32)) -> usize {
        let start = self.mover.cell();
        let path = find_path(start, goal, &self.nav);
        debug!(?start, ?goal, len = path.len(), "path planned");
        self.mover.set_path(&path);
        path.len()
    }

    /// Walk to the cell under a screen point.
    pub fn walk_to_screen(&mut self, screen: Vec2) -> usize {
        let world = self.camera.screen_to_world(screen);
        let goal = cell_at(world, self.map.tile_size());
        self.walk_to_cell(goal)
    }

    /// Advance movement by `dt` seconds; the camera follows a moving actor.
    pub fn tick(&mut self, dt: f32) {
        if self.mover.tick(dt) {
            self.camera.follow(self.mover.position());
        }
    }

    /// Push per-frame state to the renderer.
    pub fn present<S: RenderSink<I>>(&mut self, sink: &mut S) {
        if let Some(transform) = self.camera.take_changed() {
            sink.set_transform(transform);
        }
        sink.set_actor(self.mover.facing(), self.mover.position());
    }
}

// ── Host ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// Open a window and drive `sim` until it is closed.
///
/// Static sprites are registered with `sink` up front; afterwards the sink
/// receives the camera transform and actor state every frame.
pub fn run<I, S>(
    sim: Simulation<I>,
    sprites: Vec<SpriteRegistration<I>>,
    mut sink: S,
    config: &GameConfig,
) -> Result<(), HostError>
where
    S: RenderSink<I>,
{
    let count = sprites.len();
    for sprite in sprites {
        sink.register(sprite);
    }
    info!(sprites = count, "registered map sprites");

    let event_loop = EventLoop::new()?;
    let mut app = App {
        window_config: config.window.clone(),
        sim,
        sink,
        dispatcher: InputDispatcher::new(ActionMap::default_bindings(), config.click_slop),
        input: InputState::new(),
        window: None,
        failure: None,
        last_instant: None,
        accumulator: 0.0,
        fixed_dt: 1.0 / 60.0,
    };
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App<I, S> {
    window_config: WindowConfig,
    sim: Simulation<I>,
    sink: S,
    dispatcher: InputDispatcher,
    input: InputState,
    window: Option<Window>,
    failure: Option<HostError>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
}

impl<I, S: RenderSink<I>> ApplicationHandler for App<I, S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let mut attributes = Window::default_attributes()
            .with_title(&self.window_config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        if self.window_config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.sim.camera_mut().set_viewport(size.width as f32, size.height as f32);
                self.window = Some(window);
            }
            Err(err) => {
                error!("failed to create window: {err}");
                self.failure = Some(err.into());
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                self.sim.camera_mut().set_viewport(size.width as f32, size.height as f32);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => self.input.press_mouse(button),
                ElementState::Released => self.input.release_mouse(button),
            },

            WindowEvent::MouseWheel { delta, .. } => {
                self.input.mouse_wheel += match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 100.0) as f32,
                };
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => self.input.press_key(code),
                ElementState::Released => self.input.release_key(code),
            },

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;

                self.dispatcher.dispatch(&self.input, &mut self.sim);

                while self.accumulator >= self.fixed_dt {
                    self.sim.tick(self.fixed_dt);
                    self.accumulator -= self.fixed_dt;
                }

                self.sim.present(&mut self.sink);

                // End of frame cleanup
                self.input.clear_frame_state();
            }

            _ => {}
        }
    }
}
