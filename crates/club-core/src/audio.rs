//! Streaming audio input and frequency-domain sampling.
//!
//! The platform side (HTML media element + analyser on the web) sits behind
//! [`AudioStream`]; [`AudioAnalysisSource`] owns the playback state machine
//! and the magnitude buffer that is refreshed in place every frame.

use crate::error::ClubError;
use crate::resource::LoadState;

/// Outcome of an asynchronous play request, or a stream failure noticed by
/// the platform at any time.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    Started,
    Blocked(String),
    StreamFailed(String),
}

/// Platform audio collaborator.
pub trait AudioStream {
    /// Create the analysis context for `fft_size`. Returns the number of
    /// frequency bins the analyser produces.
    fn create_context(&mut self, fft_size: u32) -> Result<usize, ClubError>;
    /// Ask the platform to start playback. Completion arrives later through
    /// [`AudioStream::poll_event`].
    fn request_play(&mut self);
    fn pause(&mut self);
    /// Copy the current byte magnitudes into `out` (same length as the bin
    /// count returned from `create_context`).
    fn read_byte_frequency_data(&mut self, out: &mut [u8]);
    fn poll_event(&mut self) -> Option<PlaybackEvent>;
}

/// Anything that can report a single 0–255 amplitude per frame.
pub trait AmplitudeSource {
    fn sample_average_amplitude(&mut self) -> f32;
}

/// Arithmetic mean of byte magnitudes; 0 for an empty sample.
pub fn average_amplitude(sample: &[u8]) -> f32 {
    if sample.is_empty() {
        return 0.0;
    }
    let sum: u64 = sample.iter().map(|&b| b as u64).sum();
    (sum as f64 / sample.len() as f64) as f32
}

pub struct AudioAnalysisSource<S: AudioStream> {
    stream: S,
    fft_size: u32,
    /// `None` until the first `start()`; created at most once per session.
    context: Option<LoadState<usize, ClubError>>,
    buffer: Vec<u8>,
    is_playing: bool,
    play_requested: bool,
    last_error: Option<ClubError>,
}

impl<S: AudioStream> AudioAnalysisSource<S> {
    pub fn new(stream: S, fft_size: u32) -> Self {
        Self {
            stream,
            fft_size,
            context: None,
            buffer: Vec::new(),
            is_playing: false,
            play_requested: false,
            last_error: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// A play request is outstanding and has not been answered yet.
    pub fn is_starting(&self) -> bool {
        self.play_requested && !self.is_playing
    }

    pub fn has_context(&self) -> bool {
        matches!(self.context, Some(LoadState::Ready(_)))
    }

    pub fn last_error(&self) -> Option<&ClubError> {
        self.last_error.as_ref()
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Begin (or retry) playback. Must be reachable from a user gesture on
    /// platforms that gate autoplay.
    pub fn start(&mut self) {
        if self.is_playing {
            return;
        }
        if let Err(e) = self.ensure_context() {
            log::error!("[audio] cannot start: {}", e);
            self.last_error = Some(e);
            return;
        }
        if self.play_requested {
            log::debug!("[audio] start already in flight");
            return;
        }
        self.play_requested = true;
        self.last_error = None;
        self.stream.request_play();
    }

    /// Pause playback. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.is_playing && !self.play_requested {
            return;
        }
        self.stream.pause();
        self.is_playing = false;
        self.play_requested = false;
        log::info!("[audio] stopped");
    }

    /// Apply platform playback notifications. Called once per frame before
    /// sampling.
    pub fn poll_playback(&mut self) {
        while let Some(event) = self.stream.poll_event() {
            match event {
                PlaybackEvent::Started if self.play_requested => {
                    self.is_playing = true;
                    log::info!("[audio] playing");
                }
                PlaybackEvent::Started => {
                    // stop() won the race with an in-flight play request
                    self.stream.pause();
                }
                PlaybackEvent::Blocked(reason) if self.play_requested => {
                    self.is_playing = false;
                    self.play_requested = false;
                    log::warn!("[audio] play failed (waiting for interaction): {}", reason);
                    self.last_error = Some(ClubError::PlaybackBlocked(reason));
                }
                PlaybackEvent::Blocked(reason) => {
                    log::debug!("[audio] ignoring late rejection after stop: {}", reason);
                }
                PlaybackEvent::StreamFailed(reason) => {
                    self.is_playing = false;
                    self.play_requested = false;
                    log::error!("[audio] stream unavailable: {}", reason);
                    self.last_error = Some(ClubError::StreamUnavailable(reason));
                }
            }
        }
    }

    /// Current magnitudes, refreshed in place. `None` while not playing.
    pub fn sample_frequency_domain(&mut self) -> Option<&[u8]> {
        if !self.is_playing || self.buffer.is_empty() {
            return None;
        }
        self.stream.read_byte_frequency_data(&mut self.buffer);
        Some(self.buffer.as_slice())
    }

    fn ensure_context(&mut self) -> Result<(), ClubError> {
        match &self.context {
            Some(LoadState::Ready(_)) | Some(LoadState::Pending) => return Ok(()),
            Some(LoadState::Failed(e)) => return Err(e.clone()),
            None => {}
        }
        self.context = Some(LoadState::Pending);
        match self.stream.create_context(self.fft_size) {
            Ok(bins) => {
                self.buffer = vec![0; bins];
                self.context = Some(LoadState::Ready(bins));
                log::info!("[audio] analysis context ready: fft={} bins={}", self.fft_size, bins);
                Ok(())
            }
            Err(e) => {
                self.context = Some(LoadState::Failed(e.clone()));
                Err(e)
            }
        }
    }
}

impl<S: AudioStream> AmplitudeSource for AudioAnalysisSource<S> {
    fn sample_average_amplitude(&mut self) -> f32 {
        self.sample_frequency_domain()
            .map(average_amplitude)
            .unwrap_or(0.0)
    }
}
