//! Static environment colliders and the raycast query locomotion runs every
//! frame.

use glam::Vec3;
use smallvec::SmallVec;

mod layout;
mod shapes;

pub use layout::{club_environment, floor_grid, speaker_cones, GridLine, SpeakerCone};
pub use shapes::Shape;

/// One ray/surface intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Unit outward normal of the surface that was hit.
    pub normal: Vec3,
    pub distance: f32,
}

pub type RayHits = SmallVec<[RayHit; 4]>;

/// Scene query used by the locomotion controller.
pub trait Raycast {
    /// All hits along the ray, nearest first. `direction` must be unit length.
    fn raycast(&self, origin: Vec3, direction: Vec3) -> RayHits;
}

#[derive(Clone, Debug)]
pub struct Collider {
    pub name: &'static str,
    pub shape: Shape,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    colliders: Vec<Collider>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &'static str, shape: Shape) {
        self.colliders.push(Collider { name, shape });
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn find(&self, name: &str) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl Raycast for SceneGraph {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> RayHits {
        let mut hits: RayHits = self
            .colliders
            .iter()
            .filter_map(|c| c.shape.intersect(origin, direction))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
