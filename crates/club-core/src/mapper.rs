//! Raw magnitudes → normalized control signals.
//!
//! Instantaneous, no smoothing: effects shape the signal themselves.

use crate::audio::{average_amplitude, AmplitudeSource};
use crate::constants::MAX_BYTE_MAGNITUDE;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlSignals {
    /// Mean magnitude scaled to [0, 1].
    pub audio_level: f32,
}

#[inline]
pub fn audio_level_from_amplitude(average: f32) -> f32 {
    (average / MAX_BYTE_MAGNITUDE).clamp(0.0, 1.0)
}

#[inline]
pub fn audio_level(sample: &[u8]) -> f32 {
    audio_level_from_amplitude(average_amplitude(sample))
}

pub fn map_signals(source: &mut dyn AmplitudeSource) -> ControlSignals {
    ControlSignals {
        audio_level: audio_level_from_amplitude(source.sample_average_amplitude()),
    }
}
