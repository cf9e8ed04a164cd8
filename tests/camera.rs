use glam::Vec2;
use tilewalk::camera::{Camera, CameraUniform, ViewTransform};
use tilewalk::config::CameraConfig;

fn camera() -> Camera {
    let config = CameraConfig { initial_scale: 2.0, ..CameraConfig::default() };
    Camera::new(Vec2::new(100.0, 50.0), Vec2::new(800.0, 600.0), &config)
}

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-3
}

// ── Transform ─────────────────────────────────────────────────────────────────

#[test]
fn focus_maps_to_screen_centre() {
    let cam = camera();
    assert!(close(cam.world_to_screen(cam.focus()), Vec2::new(400.0, 300.0)));
    let t = cam.transform();
    assert!(close(t.offset, Vec2::new(400.0 - 200.0, 300.0 - 100.0)));
    assert_eq!(t.scale, 2.0);
}

#[test]
fn screen_world_roundtrip() {
    let cam = camera();
    for p in [Vec2::ZERO, Vec2::new(123.0, 456.0), Vec2::new(799.0, 1.0)] {
        assert!(close(cam.world_to_screen(cam.screen_to_world(p)), p));
    }
}

#[test]
fn follow_recentres() {
    let mut cam = camera();
    cam.follow(Vec2::new(320.0, 64.0));
    assert_eq!(cam.focus(), Vec2::new(320.0, 64.0));
    assert!(close(cam.world_to_screen(Vec2::new(320.0, 64.0)), Vec2::new(400.0, 300.0)));
}

// ── Zoom ──────────────────────────────────────────────────────────────────────

#[test]
fn zoom_keeps_world_point_under_anchor() {
    for (anchor, delta) in [
        (Vec2::new(10.0, 20.0), -1.0),
        (Vec2::new(700.0, 550.0), 1.0),
        (Vec2::new(400.0, 300.0), -0.5),
        (Vec2::new(0.0, 599.0), 3.0),
    ] {
        let mut cam = camera();
        let before = cam.screen_to_world(anchor);
        cam.zoom(anchor, delta);
        assert!(
            close(cam.world_to_screen(before), anchor),
            "anchor {anchor:?} drifted after zoom {delta}"
        );
    }
}

#[test]
fn wheel_delta_is_clamped_to_one_step() {
    let mut cam = camera();
    cam.zoom(Vec2::new(400.0, 300.0), -10.0);
    assert!((cam.scale() - 2.2).abs() < 1e-5, "scale {}", cam.scale());

    let mut cam = camera();
    cam.zoom(Vec2::new(400.0, 300.0), 10.0);
    assert!((cam.scale() - 1.8).abs() < 1e-5, "scale {}", cam.scale());
}

#[test]
fn zoom_respects_scale_limits() {
    let config = CameraConfig { initial_scale: 1.0, min_scale: 0.9, max_scale: 1.05, zoom_step: 0.1 };
    let mut cam = Camera::new(Vec2::ZERO, Vec2::new(100.0, 100.0), &config);
    cam.zoom(Vec2::new(10.0, 10.0), -1.0);
    assert_eq!(cam.scale(), 1.05);
    for _ in 0..5 {
        cam.zoom(Vec2::new(10.0, 10.0), 1.0);
    }
    assert_eq!(cam.scale(), 0.9);
}

// ── Drag ──────────────────────────────────────────────────────────────────────

#[test]
fn first_drag_sample_only_sets_reference() {
    let mut cam = camera();
    let focus = cam.focus();
    cam.begin_drag(Vec2::new(200.0, 200.0));
    assert!(cam.is_dragging());
    assert_eq!(cam.focus(), focus);
}

#[test]
fn drag_moves_world_with_pointer() {
    let mut cam = camera();
    let grabbed = cam.screen_to_world(Vec2::new(200.0, 200.0));
    cam.begin_drag(Vec2::new(200.0, 200.0));
    cam.drag_to(Vec2::new(260.0, 180.0));
    cam.drag_to(Vec2::new(300.0, 150.0));
    // Focus shifts by the screen delta divided by scale.
    assert!(close(cam.focus(), Vec2::new(100.0 - 50.0, 50.0 + 25.0)));
    // The grabbed world point stays under the pointer.
    assert!(close(cam.world_to_screen(grabbed), Vec2::new(300.0, 150.0)));
}

#[test]
fn drag_without_gesture_is_ignored() {
    let mut cam = camera();
    cam.drag_to(Vec2::new(50.0, 50.0));
    assert_eq!(cam.focus(), Vec2::new(100.0, 50.0));

    cam.begin_drag(Vec2::new(0.0, 0.0));
    cam.end_drag();
    cam.drag_to(Vec2::new(50.0, 50.0));
    assert_eq!(cam.focus(), Vec2::new(100.0, 50.0));
}

// ── Change tracking ──────────────────────────────────────────────────────────

#[test]
fn transform_is_reported_only_after_changes() {
    let mut cam = camera();
    assert!(cam.take_changed().is_some());
    assert!(cam.take_changed().is_none());

    cam.follow(cam.focus());
    assert!(cam.take_changed().is_none());

    cam.pan(Vec2::new(4.0, 0.0));
    assert!(cam.take_changed().is_some());

    cam.set_viewport(1024.0, 768.0);
    let t = cam.take_changed().unwrap();
    assert!(close(cam.world_to_screen(cam.focus()), Vec2::new(512.0, 384.0)));
    assert_eq!(t, cam.transform());
}

// ── CameraUniform ────────────────────────────────────────────────────────────

#[test]
fn uniform_maps_focus_to_clip_origin() {
    let cam = camera();
    let u = CameraUniform::from_transform(&cam.transform(), 800.0, 600.0);
    let m = u.view_proj;
    let f = cam.focus();
    let x_ndc = m[0][0] * f.x + m[3][0];
    let y_ndc = m[1][1] * f.y + m[3][1];
    assert!(x_ndc.abs() < 1e-5 && y_ndc.abs() < 1e-5, "({x_ndc}, {y_ndc})");
}

#[test]
fn uniform_maps_screen_corner_to_clip_corner() {
    let t = ViewTransform { offset: Vec2::new(-40.0, 30.0), scale: 1.5 };
    let u = CameraUniform::from_transform(&t, 800.0, 600.0);
    let world = t.screen_to_world(Vec2::ZERO);
    let x_ndc = u.view_proj[0][0] * world.x + u.view_proj[3][0];
    let y_ndc = u.view_proj[1][1] * world.y + u.view_proj[3][1];
    assert!((x_ndc + 1.0).abs() < 1e-5);
    assert!((y_ndc - 1.0).abs() < 1e-5);
    assert_eq!(bytemuck::bytes_of(&u).len(), 64);
}
