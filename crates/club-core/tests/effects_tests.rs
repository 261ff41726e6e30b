// Host-side tests for the floor pulse, particle field and laser array.

mod common;

use club_core::*;
use common::*;
use glam::Vec2;

/// Amplitude source with a fixed reading.
struct Fixed(f32);

impl AmplitudeSource for Fixed {
    fn sample_average_amplitude(&mut self) -> f32 {
        self.0
    }
}

fn director() -> (VisualEffectsDirector, SceneGraph) {
    let cfg = ClubConfig::default();
    let mut scene = SceneGraph::new();
    let mut d = VisualEffectsDirector::new(&cfg);
    d.setup(&mut scene);
    (d, scene)
}

#[test]
fn floor_alpha_end_to_end_scenario() {
    let p = pulse(1.0, 0.0);
    assert!(approx(p, 2.0_f32.sin() * 0.5 + 0.5, 1e-6));
    assert!(approx(p, 0.4546, 1e-4));
    let alpha = floor_alpha(1.0, 0.0, 1.0, 0.6);
    assert!(approx(alpha, 0.3 + 0.3 * p + 0.5 * 0.6, 1e-6));
    assert!(approx(alpha, 0.7364, 1e-4));
    assert_eq!(edge_fade(0.0), 1.0);
}

#[test]
fn floor_alpha_is_monotonic_in_audio_level() {
    for &time in &[0.0_f32, 0.7, 3.3, 100.0] {
        for &dist in &[0.0_f32, 0.1, 0.35, 0.45, 0.6] {
            for &grid in &[0.0_f32, 1.0] {
                let mut prev = floor_alpha(time, dist, grid, 0.0);
                for step in 1..=20 {
                    let a = floor_alpha(time, dist, grid, step as f32 / 20.0);
                    assert!(a >= prev, "t={time} d={dist} g={grid}");
                    prev = a;
                }
            }
        }
    }
}

#[test]
fn floor_edge_fade_reaches_zero_past_radius() {
    assert_eq!(edge_fade(0.3), 1.0);
    assert!(edge_fade(0.4) > 0.0 && edge_fade(0.4) < 1.0);
    assert_eq!(edge_fade(0.5), 0.0);
    assert_eq!(floor_alpha(2.0, 0.55, 1.0, 1.0), 0.0);
}

#[test]
fn grid_mask_marks_cell_borders_only() {
    // fract(0.0495 * 20) = 0.99 → on a line
    assert_eq!(grid_mask(Vec2::new(0.0495, 0.3)), 1.0);
    // both fractions well inside a cell
    assert_eq!(grid_mask(Vec2::new(0.025, 0.025)), 0.0);
    assert_eq!(floor_alpha_at_uv(Vec2::new(0.525, 0.525), 1.0, 1.0), 0.0);
}

#[test]
fn floor_pushes_time_and_level_each_frame() {
    let (mut d, _) = director();
    assert!(d.update(Some(&mut Fixed(127.5)), 12.5));
    let u = d.floor.uniforms();
    assert_eq!(u.time, 12.5);
    assert!(approx(u.audio_level, 0.5, 1e-6));
    assert_eq!(u.color, FLOOR_COLOR);
}

#[test]
fn floor_setup_registers_walkable_overlay() {
    let (_, scene) = director();
    let overlay = scene.find("floor-overlay").expect("overlay collider");
    let hit = overlay
        .shape
        .intersect(glam::Vec3::new(1.0, 2.0, 1.0), glam::Vec3::NEG_Y)
        .expect("hit");
    assert!(approx(hit.point.y, FLOOR_OVERLAY_HEIGHT, 1e-6));
    assert_eq!(hit.normal, glam::Vec3::Y);
}

#[test]
fn floor_overlay_spans_the_platform() {
    let (d, scene) = director();
    let size = ClubConfig::default().platform_size;
    assert_eq!(d.floor.size(), size);
    assert_eq!(d.floor.uniforms().half_size, size * 0.5);
    let overlay = scene.find("floor-overlay").expect("overlay collider");
    let down = glam::Vec3::NEG_Y;
    let edge = size * 0.5 - 0.01;
    assert!(overlay
        .shape
        .intersect(glam::Vec3::new(edge, 2.0, -edge), down)
        .is_some());
    assert!(overlay
        .shape
        .intersect(glam::Vec3::new(size * 0.5 + 0.5, 2.0, 0.0), down)
        .is_none());
}

#[test]
fn missing_audio_source_freezes_effects() {
    let (mut d, _) = director();
    d.update(Some(&mut Fixed(255.0)), 1.0);
    let floor_before = *d.floor.uniforms();
    let lasers_before = d.lasers.beams().to_vec();
    let spin_before = d.particles.rotation_y();

    assert!(!d.update(None, 5.0));
    assert_eq!(*d.floor.uniforms(), floor_before);
    assert_eq!(d.lasers.beams(), &lasers_before[..]);
    assert_eq!(d.particles.rotation_y(), spin_before);
}

#[test]
fn particles_are_generated_once_within_platform() {
    let (d, _) = director();
    let positions = d.particles.positions();
    assert_eq!(positions.len(), PARTICLE_COUNT);
    assert_eq!(d.particles.scales().len(), PARTICLE_COUNT);
    let radius = ClubConfig::default().platform_size * 0.5;
    for p in positions {
        assert!(glam::Vec2::new(p.x, p.z).length() <= radius + 1e-4);
        assert!((0.0..=PARTICLE_MAX_HEIGHT).contains(&p.y));
    }
}

#[test]
fn particle_spin_accumulates_without_audio_coupling() {
    let (mut d, _) = director();
    for _ in 0..10 {
        d.update(Some(&mut Fixed(0.0)), 0.0);
    }
    let quiet = d.particles.rotation_y();
    assert!(approx(quiet, 10.0 * PARTICLE_SPIN_PER_FRAME, 1e-6));

    let (mut loud, _) = director();
    for _ in 0..10 {
        loud.update(Some(&mut Fixed(255.0)), 0.0);
    }
    assert_eq!(loud.particles.rotation_y(), quiet);
}

#[test]
fn laser_phase_offsets_are_quarter_turns() {
    let (d, _) = director();
    let beams = d.lasers.beams();
    assert_eq!(beams.len(), LASER_COUNT);
    for (i, b) in beams.iter().enumerate() {
        assert_eq!(b.index, i);
        assert!(approx(b.phase_offset, i as f32 * std::f32::consts::FRAC_PI_2, 1e-6));
    }
}

#[test]
fn laser_opacity_follows_flicker_sign() {
    let (mut d, _) = director();
    let mut t = 0.013_f32;
    while t < 4.0 {
        d.update(Some(&mut Fixed(0.0)), t);
        for b in d.lasers.beams() {
            let s = (10.0 * t + b.index as f32).sin();
            if s.abs() < 1e-4 {
                continue; // boundary is a don't-care
            }
            let expected = if s > 0.0 {
                LASER_OPACITY_HIGH
            } else {
                LASER_OPACITY_LOW
            };
            assert_eq!(b.opacity, expected, "t={t} beam={}", b.index);
        }
        t += 0.037;
    }
}

#[test]
fn laser_sweep_matches_phase_formula() {
    let (mut d, _) = director();
    let t = 2.25_f32;
    d.update(Some(&mut Fixed(0.0)), t);
    for b in d.lasers.beams() {
        let offset = b.index as f32 * std::f32::consts::FRAC_PI_2;
        assert!(approx(b.rotation_y, (t + offset).sin() * 0.5, 1e-6));
        assert!(approx(b.rotation_z, (2.0 * t + offset).cos() * 0.2, 1e-6));
        // all beams share the emitter
        let origin = b.model_matrix().transform_point3(glam::Vec3::ZERO);
        assert!(origin.distance(LASER_EMITTER) < 1e-5);
    }
}

#[test]
fn laser_beams_extend_forward_from_the_emitter() {
    let (mut d, _) = director();
    d.update(Some(&mut Fixed(0.0)), 1.3);
    for b in d.lasers.beams() {
        let m = b.beam_matrix();
        let near = m.transform_point3(glam::Vec3::ZERO);
        let far = m.transform_point3(glam::Vec3::Z);
        assert!(near.distance(LASER_EMITTER) < 1e-4, "beam={}", b.index);
        let expected = LASER_EMITTER + b.direction() * LASER_LENGTH;
        assert!(far.distance(expected) < 1e-3, "beam={}", b.index);
        // nothing of the beam lies behind the emitter
        let mid = m.transform_point3(glam::Vec3::new(0.0, 0.0, 0.5));
        assert!((mid - LASER_EMITTER).dot(b.direction()) > 0.0);
    }
}

#[test]
fn setup_is_one_time() {
    let (mut d, mut scene) = director();
    let colliders = scene.len();
    d.setup(&mut scene);
    assert_eq!(scene.len(), colliders);
}
