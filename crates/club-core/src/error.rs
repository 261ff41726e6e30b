//! Error kinds surfaced by the core.
//!
//! None of these are fatal: audio failures leave the club silent, a lost
//! render surface freezes the effects until it is restored.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClubError {
    /// The platform refused autoplay; retry `start()` after a user gesture.
    #[error("playback blocked until user interaction: {0}")]
    PlaybackBlocked(String),

    /// Network or decoding failure on the audio stream.
    #[error("audio stream unavailable: {0}")]
    StreamUnavailable(String),

    /// The analysis context could not be created on this platform.
    #[error("audio analysis context unavailable: {0}")]
    AnalysisUnavailable(String),

    #[error("render surface lost")]
    RenderSurfaceLost,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stream_url must not be empty")]
    EmptyStreamUrl,

    #[error("fft_size must be a power of two in {min}..={max}, got {got}")]
    FftSize { got: u32, min: u32, max: u32 },

    #[error("platform_size must be positive and finite, got {0}")]
    PlatformSize(f32),

    #[error("{name} must be non-negative and finite, got {value}")]
    Intensity { name: &'static str, value: f32 },

    #[error("malformed configuration: {0}")]
    Parse(String),
}
