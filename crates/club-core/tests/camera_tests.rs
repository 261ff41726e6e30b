// Host-side tests for the desktop orbit camera.

mod common;

use club_core::*;
use common::*;
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

fn near(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-4
}

#[test]
fn default_orbit_reproduces_the_standing_view() {
    let view = OrbitView::default();
    assert!(approx(view.distance, 5.0, 1e-6));
    assert!(approx(view.yaw, 0.0, 1e-6));
    assert!(approx(view.pitch, 0.0, 1e-6));

    let cam = Camera::orbit(Vec3::ZERO, &view, 1.5);
    assert!(near(cam.eye, Vec3::new(0.0, 1.6, 5.0)));
    assert!(near(cam.target, Vec3::new(0.0, 1.6, 0.0)));
}

#[test]
fn orbit_offset_follows_yaw_and_pitch() {
    let mut view = OrbitView {
        yaw: FRAC_PI_2,
        ..Default::default()
    };
    assert!(near(view.offset(), Vec3::new(5.0, 0.0, 0.0)));

    view.yaw = 0.0;
    view.pitch = std::f32::consts::FRAC_PI_6;
    let o = view.offset();
    assert!(approx(o.y, 2.5, 1e-4));
    assert!(approx(o.length(), view.distance, 1e-4));
}

#[test]
fn drag_rotates_and_pitch_is_clamped() {
    let mut view = OrbitView::default();
    let before = view.offset();
    // dragging right swings the eye towards -X
    view.rotate(100.0, 0.0);
    assert!(view.offset().x < 0.0);
    assert!(approx(view.offset().length(), before.length(), 1e-4));

    view.rotate(0.0, 1.0e6);
    assert_eq!(view.pitch, ORBIT_PITCH_LIMIT);
    view.rotate(0.0, -1.0e6);
    assert_eq!(view.pitch, -ORBIT_PITCH_LIMIT);
}

#[test]
fn wheel_zoom_stays_within_limits() {
    let mut view = OrbitView::default();
    view.zoom(100.0);
    assert!(approx(view.distance, 5.0 * 1.1, 1e-4));
    view.zoom(-100.0);
    assert!(view.distance < 5.5);

    for _ in 0..200 {
        view.zoom(500.0);
    }
    assert_eq!(view.distance, ORBIT_MAX_DISTANCE);
    for _ in 0..200 {
        view.zoom(-500.0);
    }
    assert_eq!(view.distance, ORBIT_MIN_DISTANCE);
}

#[test]
fn orbit_keeps_the_target_centred_on_screen() {
    let mut view = OrbitView::default();
    view.rotate(-240.0, 80.0);
    view.zoom(-300.0);
    let cam = Camera::orbit(Vec3::new(2.0, 0.0, -3.0), &view, 1.0);
    let (origin, dir) = cam.ndc_ray(0.0, 0.0);
    assert!(near(origin, cam.eye));
    let to_target = (cam.target - cam.eye).normalize();
    assert!(dir.dot(to_target) > 0.9999);
}
