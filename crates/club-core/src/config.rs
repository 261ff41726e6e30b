//! User-facing configuration.
//!
//! Every field has a default so a page can pass a partial JSON object (or
//! nothing at all). Query-string overrides are applied on top by the web
//! frontend through [`ClubConfig::apply_override`].

use crate::constants::*;
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClubConfig {
    /// Network-addressable continuous audio source.
    pub stream_url: String,
    /// Analyser transform window; must be a power of two.
    pub fft_size: u32,
    pub platform_size: f32,
    pub ambient_intensity: f32,
    pub spotlight_intensity: f32,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            stream_url: DEFAULT_STREAM_URL.to_string(),
            fft_size: DEFAULT_FFT_SIZE,
            platform_size: DEFAULT_PLATFORM_SIZE,
            ambient_intensity: DEFAULT_AMBIENT_INTENSITY,
            spotlight_intensity: DEFAULT_SPOTLIGHT_INTENSITY,
        }
    }
}

impl ClubConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: ClubConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stream_url.trim().is_empty() {
            return Err(ConfigError::EmptyStreamUrl);
        }
        if !self.fft_size.is_power_of_two()
            || self.fft_size < MIN_FFT_SIZE
            || self.fft_size > MAX_FFT_SIZE
        {
            return Err(ConfigError::FftSize {
                got: self.fft_size,
                min: MIN_FFT_SIZE,
                max: MAX_FFT_SIZE,
            });
        }
        if !(self.platform_size.is_finite() && self.platform_size > 0.0) {
            return Err(ConfigError::PlatformSize(self.platform_size));
        }
        for (name, value) in [
            ("ambient_intensity", self.ambient_intensity),
            ("spotlight_intensity", self.spotlight_intensity),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Intensity { name, value });
            }
        }
        Ok(())
    }

    /// Number of magnitude samples the analyser produces per read.
    pub fn frequency_bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }

    /// Apply a single `key=value` override (URL query parameters).
    ///
    /// Returns `Ok(false)` for keys that are not configuration.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let parse_f32 = |v: &str| {
            v.parse::<f32>()
                .map_err(|e| ConfigError::Parse(format!("{key}={v}: {e}")))
        };
        match key {
            "stream" | "streamUrl" => self.stream_url = value.to_string(),
            "fft" | "fftSize" => {
                self.fft_size = value
                    .parse::<u32>()
                    .map_err(|e| ConfigError::Parse(format!("{key}={value}: {e}")))?
            }
            "platform" | "platformSize" => self.platform_size = parse_f32(value)?,
            "ambient" | "ambientIntensity" => self.ambient_intensity = parse_f32(value)?,
            "spot" | "spotlightIntensity" => self.spotlight_intensity = parse_f32(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
