// Host-side tests for the per-frame session tick.

mod common;

use club_core::*;
use common::*;
use glam::{Mat4, Quat, Vec3};

fn session(level_byte: u8) -> ClubSession<FakeStream> {
    ClubSession::new(
        ClubConfig::default(),
        FakeStream::autoplaying(vec![level_byte; 1024]),
    )
    .expect("default config is valid")
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = ClubConfig {
        fft_size: 3000,
        ..Default::default()
    };
    assert!(matches!(
        ClubSession::new(cfg, FakeStream::default()),
        Err(ClubError::Config(ConfigError::FftSize { .. }))
    ));
}

#[test]
fn silent_until_started_then_reactive() {
    let mut s = session(153);
    assert!(s.frame(0.5));
    assert_eq!(s.effects.floor.uniforms().audio_level, 0.0);
    assert_eq!(s.effects.floor.uniforms().time, 0.5);

    s.start_audio();
    assert!(s.frame(1.0));
    assert!(approx(s.effects.floor.uniforms().audio_level, 0.6, 1e-6));
    assert_eq!(s.audio.stream().contexts_created, 1);
}

#[test]
fn lost_surface_suspends_updates_until_restored() {
    let mut s = session(0);
    s.frame(1.0);
    s.on_surface_lost();
    assert!(s.is_suspended());
    assert!(!s.frame(2.0));
    assert_eq!(s.effects.floor.uniforms().time, 1.0);
    assert_eq!(s.frames(), 1);

    s.on_surface_restored();
    assert!(s.frame(3.0));
    assert_eq!(s.effects.floor.uniforms().time, 3.0);
    assert_eq!(s.surface_state(), SurfaceState::Active);
}

#[test]
fn floor_overlay_is_the_teleport_surface() {
    let mut s = session(0);
    let rot = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4);
    s.set_controller_pose(0, Mat4::from_rotation_translation(rot, Vec3::new(0.0, 1.55, 0.0)));
    s.controller_event(0, ControllerEvent::SelectStart);
    s.frame(0.0);
    let p = s.locomotion.marker().position().expect("marker");
    assert!(approx(p.y, FLOOR_OVERLAY_HEIGHT, 1e-4));
    assert!(approx(p.z, -1.5, 1e-3));
    assert_eq!(s.controller_event(0, ControllerEvent::SelectEnd), Some(p));
    assert_eq!(s.locomotion.rig().position, p);
}

#[test]
fn lighting_follows_configured_intensities() {
    let cfg = ClubConfig {
        ambient_intensity: 0.5,
        spotlight_intensity: 3.0,
        ..Default::default()
    };
    let s = ClubSession::new(cfg, FakeStream::default()).expect("valid");
    assert!(s.lighting().ambient.distance(Vec3::splat(0.5)) < 1e-6);
    assert!(s.lighting().spot_color.distance(Vec3::new(3.0, 0.0, 3.0)) < 1e-6);
}

#[test]
fn desktop_camera_orbits_around_the_rig() {
    let mut s = session(0);
    s.locomotion.set_rig_position(Vec3::new(3.0, 0.0, -2.0));
    let cam = s.desktop_camera(1.0);
    assert!(cam.target.distance(Vec3::new(3.0, 1.6, -2.0)) < 1e-5);
    assert!(cam.eye.distance(Vec3::new(3.0, 1.6, 3.0)) < 1e-5);

    s.view.zoom(-500.0);
    let closer = s.desktop_camera(1.0);
    assert!(closer.eye.distance(closer.target) < cam.eye.distance(cam.target));
}
