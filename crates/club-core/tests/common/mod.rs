// Test doubles shared by the integration tests.
#![allow(dead_code)]

use club_core::*;
use glam::Vec3;
use std::collections::VecDeque;

/// Scripted audio stream: play requests are answered by whatever the test
/// queues, magnitudes come from `data`.
#[derive(Default)]
pub struct FakeStream {
    pub contexts_created: usize,
    pub play_requests: usize,
    pub pauses: usize,
    pub reads: usize,
    pub data: Vec<u8>,
    pub events: VecDeque<PlaybackEvent>,
    pub fail_context: Option<String>,
    /// Answer every play request with `Started` automatically.
    pub autoplay: bool,
}

impl FakeStream {
    pub fn autoplaying(data: Vec<u8>) -> Self {
        Self {
            data,
            autoplay: true,
            ..Default::default()
        }
    }
}

impl AudioStream for FakeStream {
    fn create_context(&mut self, fft_size: u32) -> Result<usize, ClubError> {
        if let Some(reason) = &self.fail_context {
            return Err(ClubError::AnalysisUnavailable(reason.clone()));
        }
        self.contexts_created += 1;
        let bins = (fft_size / 2) as usize;
        if self.data.len() != bins {
            self.data.resize(bins, 0);
        }
        Ok(bins)
    }

    fn request_play(&mut self) {
        self.play_requests += 1;
        if self.autoplay {
            self.events.push_back(PlaybackEvent::Started);
        }
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn read_byte_frequency_data(&mut self, out: &mut [u8]) {
        self.reads += 1;
        let n = out.len().min(self.data.len());
        out[..n].copy_from_slice(&self.data[..n]);
    }

    fn poll_event(&mut self) -> Option<PlaybackEvent> {
        self.events.pop_front()
    }
}

/// Raycast stub that answers per ray origin: rays starting near `origin`
/// get the registered hits.
#[derive(Default)]
pub struct ScriptedScene {
    pub answers: Vec<(Vec3, RayHits)>,
}

impl ScriptedScene {
    pub fn with(mut self, origin: Vec3, hits: &[RayHit]) -> Self {
        self.answers.push((origin, hits.iter().copied().collect()));
        self
    }
}

impl Raycast for ScriptedScene {
    fn raycast(&self, origin: Vec3, _direction: Vec3) -> RayHits {
        self.answers
            .iter()
            .find(|(o, _)| o.distance(origin) < 1e-4)
            .map(|(_, h)| h.clone())
            .unwrap_or_default()
    }
}

pub fn hit(point: Vec3, normal: Vec3, distance: f32) -> RayHit {
    RayHit {
        point,
        normal,
        distance,
    }
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
