// Host-side tests for the audio analysis source and the parameter mapper.

mod common;

use club_core::*;
use common::*;

fn source_with(data: Vec<u8>, fft: u32) -> AudioAnalysisSource<FakeStream> {
    AudioAnalysisSource::new(FakeStream::autoplaying(data), fft)
}

#[test]
fn average_matches_arithmetic_mean() {
    let data: Vec<u8> = (0..1024).map(|i| (i * 7 % 256) as u8).collect();
    let expected = data.iter().map(|&b| b as f64).sum::<f64>() / data.len() as f64;
    let mut src = source_with(data, 2048);
    src.start();
    src.poll_playback();
    let avg = src.sample_average_amplitude();
    assert!(approx(avg, expected as f32, 1e-3), "avg={avg} expected={expected}");
    assert!((0.0..=255.0).contains(&avg));
}

#[test]
fn average_of_extremes_stays_in_byte_range() {
    assert_eq!(average_amplitude(&[255; 64]), 255.0);
    assert_eq!(average_amplitude(&[0; 64]), 0.0);
    assert_eq!(average_amplitude(&[]), 0.0);
    assert!(approx(average_amplitude(&[0, 255]), 127.5, 1e-6));
}

#[test]
fn inactive_playback_yields_no_data_and_zero_level() {
    let mut src = source_with(vec![200; 1024], 2048);
    assert!(src.sample_frequency_domain().is_none());
    assert_eq!(src.sample_average_amplitude(), 0.0);

    // Requested but not yet confirmed by the platform.
    src.start();
    assert!(src.is_starting());
    assert!(src.sample_frequency_domain().is_none());
    assert_eq!(src.sample_average_amplitude(), 0.0);
}

#[test]
fn sample_length_is_half_the_window_and_buffer_is_reused() {
    let mut src = source_with(vec![9; 256], 512);
    src.start();
    src.poll_playback();
    let first_ptr = {
        let s = src.sample_frequency_domain().expect("playing");
        assert_eq!(s.len(), 256);
        s.as_ptr()
    };
    src.stream_mut().data[0] = 42;
    let s = src.sample_frequency_domain().expect("playing");
    assert_eq!(s.as_ptr(), first_ptr);
    assert_eq!(s[0], 42);
}

#[test]
fn context_is_created_once_across_restarts() {
    let mut src = source_with(vec![1; 1024], 2048);
    src.start();
    src.poll_playback();
    src.stop();
    src.start();
    src.poll_playback();
    assert!(src.is_playing());
    assert_eq!(src.stream().contexts_created, 1);
    assert_eq!(src.stream().play_requests, 2);
}

#[test]
fn context_is_deferred_until_first_start() {
    let src = source_with(vec![], 2048);
    assert!(!src.has_context());
    assert_eq!(src.stream().contexts_created, 0);
}

#[test]
fn blocked_autoplay_is_reported_and_retry_succeeds() {
    let mut src = AudioAnalysisSource::new(FakeStream::default(), 2048);
    src.start();
    src.stream_mut()
        .events
        .push_back(PlaybackEvent::Blocked("NotAllowedError".into()));
    src.poll_playback();
    assert!(!src.is_playing());
    assert!(matches!(src.last_error(), Some(ClubError::PlaybackBlocked(_))));

    // user gesture → retry
    src.start();
    src.stream_mut().events.push_back(PlaybackEvent::Started);
    src.poll_playback();
    assert!(src.is_playing());
    assert!(src.last_error().is_none());
    assert_eq!(src.stream().play_requests, 2);
}

#[test]
fn duplicate_start_while_pending_sends_one_request() {
    let mut src = AudioAnalysisSource::new(FakeStream::default(), 2048);
    src.start();
    src.start();
    assert_eq!(src.stream().play_requests, 1);
}

#[test]
fn stream_failure_resets_to_stopped() {
    let mut src = source_with(vec![100; 1024], 2048);
    src.start();
    src.poll_playback();
    assert!(src.is_playing());
    src.stream_mut()
        .events
        .push_back(PlaybackEvent::StreamFailed("network".into()));
    src.poll_playback();
    assert!(!src.is_playing());
    assert!(matches!(src.last_error(), Some(ClubError::StreamUnavailable(_))));
    assert_eq!(src.sample_average_amplitude(), 0.0);
}

#[test]
fn stop_is_idempotent() {
    let mut src = source_with(vec![1; 1024], 2048);
    src.stop();
    assert_eq!(src.stream().pauses, 0);
    src.start();
    src.poll_playback();
    src.stop();
    src.stop();
    assert!(!src.is_playing());
    assert_eq!(src.stream().pauses, 1);
}

#[test]
fn stop_before_confirmation_wins_the_race() {
    let mut src = source_with(vec![1; 1024], 2048);
    src.start(); // Started queued
    src.stop();
    src.poll_playback();
    assert!(!src.is_playing());
    // late confirmation is answered with another pause
    assert_eq!(src.stream().pauses, 2);
}

#[test]
fn rejection_after_stop_is_not_reported() {
    let mut src = AudioAnalysisSource::new(FakeStream::default(), 2048);
    src.start();
    src.stop();
    src.stream_mut()
        .events
        .push_back(PlaybackEvent::Blocked("AbortError".into()));
    src.poll_playback();
    assert!(!src.is_playing());
    assert!(src.last_error().is_none());

    // the next gesture still sends a fresh request
    src.start();
    assert_eq!(src.stream().play_requests, 2);
}

#[test]
fn failed_context_is_sticky_and_logged() {
    let stream = FakeStream {
        fail_context: Some("no WebAudio".into()),
        ..Default::default()
    };
    let mut src = AudioAnalysisSource::new(stream, 2048);
    src.start();
    src.start();
    assert!(matches!(
        src.last_error(),
        Some(ClubError::AnalysisUnavailable(_))
    ));
    assert_eq!(src.stream().play_requests, 0);
}

#[test]
fn mapper_normalizes_to_unit_range() {
    assert_eq!(audio_level(&[255; 16]), 1.0);
    assert_eq!(audio_level(&[0; 16]), 0.0);
    assert!(approx(audio_level(&[51; 16]), 0.2, 1e-6));

    let mut src = source_with(vec![153; 1024], 2048);
    src.start();
    src.poll_playback();
    let signals = map_signals(&mut src);
    assert!(approx(signals.audio_level, 0.6, 1e-6));
}
