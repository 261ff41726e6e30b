// Host-side tests for collider intersection and the club layout.

mod common;

use club_core::*;
use common::*;
use glam::Vec3;

#[test]
fn rect_hit_from_above_and_below_reports_up_normal() {
    let rect = Shape::rect(Vec3::new(0.0, 0.05, 0.0), 20.0, 20.0);
    let down = rect.intersect(Vec3::new(1.0, 3.0, 2.0), Vec3::NEG_Y).expect("hit");
    assert!(approx(down.distance, 2.95, 1e-5));
    assert_eq!(down.normal, Vec3::Y);
    let up = rect.intersect(Vec3::new(1.0, -1.0, 2.0), Vec3::Y).expect("hit");
    assert_eq!(up.normal, Vec3::Y);
    assert!(rect.intersect(Vec3::new(11.0, 3.0, 0.0), Vec3::NEG_Y).is_none());
    assert!(rect.intersect(Vec3::new(0.0, 3.0, 0.0), Vec3::X).is_none());
}

#[test]
fn cuboid_faces_report_outward_normals() {
    let b = Shape::cuboid(Vec3::new(0.0, 0.5, -8.0), Vec3::new(4.0, 1.0, 1.5), 0.0);
    let front = b.intersect(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Z).expect("front");
    assert!(approx(front.distance, 7.25, 1e-5));
    assert!(front.normal.distance(Vec3::Z) < 1e-6);
    let top = b.intersect(Vec3::new(0.0, 5.0, -8.0), Vec3::NEG_Y).expect("top");
    assert!(approx(top.point.y, 1.0, 1e-5));
    assert!(top.normal.distance(Vec3::Y) < 1e-6);
}

#[test]
fn rotated_cuboid_normal_is_rotated() {
    let yaw = 0.5_f32;
    let b = Shape::cuboid(Vec3::new(-6.0, 0.75, -8.0), Vec3::splat(1.5), yaw);
    let face_normal = glam::Quat::from_rotation_y(yaw) * Vec3::Z;
    let start = Vec3::new(-6.0, 0.75, -8.0) + face_normal * 5.0;
    let h = b.intersect(start, -face_normal).expect("hit");
    assert!(h.normal.distance(face_normal) < 1e-5);
    assert!(approx(h.distance, 5.0 - 0.75, 1e-4));
}

#[test]
fn ray_starting_inside_a_box_passes_out() {
    let b = Shape::cuboid(Vec3::ZERO, Vec3::splat(2.0), 0.0);
    assert!(b.intersect(Vec3::ZERO, Vec3::X).is_none());
}

#[test]
fn cylinder_cap_and_side() {
    let c = Shape::cylinder(Vec3::new(0.0, -0.1, 0.0), 20.0, 0.2);
    let cap = c.intersect(Vec3::new(3.0, 2.0, 3.0), Vec3::NEG_Y).expect("cap");
    assert!(approx(cap.point.y, 0.0, 1e-5));
    assert_eq!(cap.normal, Vec3::Y);
    let side = c.intersect(Vec3::new(30.0, -0.1, 0.0), Vec3::NEG_X).expect("side");
    assert!(approx(side.distance, 10.0, 1e-4));
    assert!(side.normal.distance(Vec3::X) < 1e-5);
    assert!(c.intersect(Vec3::new(30.0, 5.0, 0.0), Vec3::NEG_X).is_none());
}

#[test]
fn scene_hits_are_sorted_nearest_first() {
    let mut scene = SceneGraph::new();
    scene.add("far", Shape::rect(Vec3::new(0.0, -5.0, 0.0), 4.0, 4.0));
    scene.add("near", Shape::rect(Vec3::new(0.0, -1.0, 0.0), 4.0, 4.0));
    let hits = scene.raycast(Vec3::ZERO, Vec3::NEG_Y);
    assert_eq!(hits.len(), 2);
    assert!(hits[0].distance < hits[1].distance);
    assert!(approx(hits[0].point.y, -1.0, 1e-6));
}

#[test]
fn club_environment_has_platform_booth_and_speakers() {
    let scene = club_environment(&ClubConfig::default());
    for name in [
        "platform",
        "dj-desk",
        "dj-mixer",
        "speaker-left-sub",
        "speaker-right-top",
    ] {
        assert!(scene.find(name).is_some(), "missing {name}");
    }
    // looking straight at the booth from the dance floor hits the desk front
    let hits = scene.raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Z);
    let first = hits.first().expect("desk");
    assert!(first.normal.y < FLOOR_NORMAL_MIN_Y);
}

#[test]
fn booth_pillars_stand_under_the_desk() {
    let scene = club_environment(&ClubConfig::default());
    for (name, x) in [("dj-pillar-left", -1.8), ("dj-pillar-right", 1.8)] {
        let pillar = scene.find(name).expect(name);
        // straight down onto the pillar top, inside the desk volume
        let hit = pillar
            .shape
            .intersect(Vec3::new(x, 5.0, DJ_BOOTH_Z), Vec3::NEG_Y)
            .expect("pillar cap");
        assert!((hit.point.y - 1.0).abs() < 1e-5);
    }
}

#[test]
fn speaker_cones_face_the_dance_floor() {
    let scene = club_environment(&ClubConfig::default());
    let cones = speaker_cones();
    assert_eq!(cones.len(), 4);
    for cone in &cones {
        // facing towards the centre line and the audience
        assert!(cone.normal().x * cone.center.x < 0.0);
        assert!(cone.normal().z > 0.0);
        // sitting on the front face of a cabinet
        let outside = cone.center + cone.normal() * 2.0;
        let hits = scene.raycast(outside, -cone.normal());
        let front = hits.first().expect("cabinet front");
        assert!(front.point.distance(cone.center) < 0.05);
        // unit disc edge lands on the cone rim
        let rim = cone.model_matrix().transform_point3(Vec3::X);
        assert!((rim.distance(cone.center) - SPEAKER_CONE_RADIUS).abs() < 1e-4);
    }
}

#[test]
fn floor_grid_covers_twice_the_platform() {
    let cfg = ClubConfig::default();
    let lines = floor_grid(&cfg);
    assert_eq!(lines.len(), (GRID_DIVISIONS + 1) * 2);
    let half = cfg.platform_size;
    for line in &lines {
        assert_eq!(line.from.y, GRID_HEIGHT);
        assert!((line.from.distance(line.to) - half * 2.0).abs() < 1e-4);
    }
    let centre: Vec<_> = lines
        .iter()
        .filter(|l| l.color == GRID_CENTER_COLOR)
        .collect();
    assert_eq!(centre.len(), 2);
    for l in centre {
        assert!(((l.from + l.to) * 0.5).length() < 1e-4);
    }
}
