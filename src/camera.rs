use glam::Vec2;

use crate::config::CameraConfig;

/// World → screen mapping handed to the renderer:
/// `screen = world * scale + offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    /// Screen-space translation, `viewport / 2 - focus * scale`.
    pub offset: Vec2,
    pub scale: f32,
}

impl ViewTransform {
    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }
}

/// Camera uniform for GPU renderers: the combined view-projection matrix.
///
/// Layout (column-major, matching WGSL `mat4x4<f32>`):
/// ```text
/// col0: [sx,  0,   0,  0]
/// col1: [0,   sy,  0,  0]
/// col2: [0,   0,   1,  0]
/// col3: [tx,  ty,  0,  1]
/// ```
/// where `sx = 2s/w`, `sy = -2s/h`, and `tx`, `ty` fold in the transform
/// offset so that screen pixel `(0, 0)` lands on the top-left of clip space.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Column-major 4×4 view-projection matrix sent to the vertex shader.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Derivation (y-down pixel space → NDC):
    /// ```text
    /// screen = world * s + offset
    /// x_ndc  = 2 * screen_x / w - 1
    /// y_ndc  = 1 - 2 * screen_y / h
    /// ```
    pub fn from_transform(t: &ViewTransform, width: f32, height: f32) -> Self {
        let sx = 2.0 * t.scale / width;
        let sy = -2.0 * t.scale / height;
        let tx = 2.0 * t.offset.x / width - 1.0;
        let ty = 1.0 - 2.0 * t.offset.y / height;

        Self {
            view_proj: [
                [sx,  0.0, 0.0, 0.0], // col0
                [0.0, sy,  0.0, 0.0], // col1
                [0.0, 0.0, 1.0, 0.0], // col2
                [tx,  ty,  0.0, 1.0], // col3
            ],
        }
    }
}

/// 2D camera: a world point pinned to the screen centre plus a uniform scale.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World-space pixel position shown at screen centre.
    pub(crate) focus: Vec2,
    /// Zoom level (1.0 = 1:1, >1 zooms in, <1 zooms out).
    pub(crate) scale: f32,
    /// Screen size in pixels.
    pub(crate) viewport: Vec2,
    zoom_step: f32,
    min_scale: f32,
    max_scale: f32,
    /// Last pointer sample of the current drag gesture.
    drag_last: Option<Vec2>,
    /// Set whenever focus, scale or viewport change; cleared by `take_changed`.
    changed: bool,
}

impl Camera {
    pub fn new(focus: Vec2, viewport: Vec2, config: &CameraConfig) -> Self {
        let min_scale = config.min_scale.max(f32::EPSILON);
        let max_scale = config.max_scale.max(min_scale);
        Self {
            focus,
            scale: config.initial_scale.clamp(min_scale, max_scale),
            viewport,
            zoom_step: config.zoom_step,
            min_scale,
            max_scale,
            drag_last: None,
            changed: true,
        }
    }

    pub fn focus(&self) -> Vec2 { self.focus }
    pub fn scale(&self) -> f32 { self.scale }
    pub fn viewport(&self) -> Vec2 { self.viewport }
    pub fn is_dragging(&self) -> bool { self.drag_last.is_some() }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.changed = true;
    }

    /// Centre the view on `point`.
    pub fn follow(&mut self, point: Vec2) {
        if self.focus != point {
            self.focus = point;
            self.changed = true;
        }
    }

    /// Move the view by a screen-space delta, so that the world under the
    /// pointer moves with it.
    pub fn pan(&mut self, delta_screen: Vec2) {
        if delta_screen != Vec2::ZERO {
            self.focus -= delta_screen / self.scale;
            self.changed = true;
        }
    }

    /// Start a drag gesture. The first sample only sets the reference point.
    pub fn begin_drag(&mut self, screen: Vec2) {
        self.drag_last = Some(screen);
    }

    /// Pan by the motion since the previous sample of this gesture.
    pub fn drag_to(&mut self, screen: Vec2) {
        let Some(last) = self.drag_last else { return };
        self.drag_last = Some(screen);
        self.pan(screen - last);
    }

    pub fn end_drag(&mut self) {
        self.drag_last = None;
    }

    /// Zoom around a screen point.
    ///
    /// `wheel_delta` follows the DOM convention: positive scrolls down and
    /// zooms out. The world point under `anchor` stays under `anchor`.
    pub fn zoom(&mut self, anchor: Vec2, wheel_delta: f32) {
        let pinned = self.screen_to_world(anchor);
        let factor = 1.0 + (-wheel_delta).clamp(-1.0, 1.0) * self.zoom_step;
        let scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if scale == self.scale {
            return;
        }
        self.scale = scale;
        self.focus = pinned - (anchor - self.viewport * 0.5) / self.scale;
        self.changed = true;
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            offset: self.viewport * 0.5 - self.focus * self.scale,
            scale: self.scale,
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.transform().screen_to_world(screen)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.transform().world_to_screen(world)
    }

    /// The current transform if anything moved since the last call.
    pub fn take_changed(&mut self) -> Option<ViewTransform> {
        std::mem::take(&mut self.changed).then(|| self.transform())
    }
}
