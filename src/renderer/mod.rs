use glam::Vec2;
use tracing::{debug, trace};

use crate::camera::ViewTransform;
use crate::geometry::Facing;

/// Depth hint for ground tiles.
pub const GROUND_Z: u32 = 0;
/// Depth hint for items; items sharing it draw in registration order.
pub const ITEM_Z: u32 = 10;

// ── SpriteRegistration ───────────────────────────────────────────────────────

/// One static drawable handed to the renderer at load time.
#[derive(Clone, Debug)]
pub struct SpriteRegistration<I> {
    pub image: I,
    /// Top-left corner in world pixels.
    pub world_pos: Vec2,
    pub z: u32,
    /// 1.0 = opaque.
    pub alpha: f32,
}

impl<I> SpriteRegistration<I> {
    pub fn new(image: I, world_pos: Vec2, z: u32) -> Self {
        Self { image, world_pos, z, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

// ── RenderSink ───────────────────────────────────────────────────────────────

/// The drawing side of the host. The core never paints; it only tells the
/// sink what exists and where the camera and actor are.
pub trait RenderSink<I> {
    /// Called once per static sprite after the map is built.
    fn register(&mut self, sprite: SpriteRegistration<I>);

    /// Called whenever the camera moved or zoomed.
    fn set_transform(&mut self, transform: ViewTransform);

    /// Called every frame with the actor's facing and world position. The
    /// actor draws above every registered sprite.
    fn set_actor(&mut self, facing: Facing, position: Vec2);
}

/// Headless sink that reports through `tracing`.
#[derive(Debug, Default)]
pub struct TraceSink {
    pub registered: usize,
    pub last_transform: Option<ViewTransform>,
    pub last_actor: Option<(Facing, Vec2)>,
}

impl<I> RenderSink<I> for TraceSink {
    fn register(&mut self, sprite: SpriteRegistration<I>) {
        self.registered += 1;
        trace!(pos = ?sprite.world_pos, z = sprite.z, alpha = sprite.alpha, "sprite registered");
    }

    fn set_transform(&mut self, transform: ViewTransform) {
        debug!(offset = ?transform.offset, scale = transform.scale, "camera transform");
        self.last_transform = Some(transform);
    }

    fn set_actor(&mut self, facing: Facing, position: Vec2) {
        if self.last_actor != Some((facing, position)) {
            trace!(?facing, row = facing.sprite_row(), ?position, "actor moved");
        }
        self.last_actor = Some((facing, position));
    }
}
