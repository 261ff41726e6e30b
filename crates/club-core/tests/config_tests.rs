// Host-side tests for configuration parsing and validation.

use club_core::*;

#[test]
fn defaults_are_valid() {
    let cfg = ClubConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.fft_size, 2048);
    assert_eq!(cfg.frequency_bin_count(), 1024);
    assert_eq!(cfg.platform_size, 20.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = ClubConfig::from_json(r#"{ "fftSize": 512, "spotlightIntensity": 1.5 }"#)
        .expect("valid config");
    assert_eq!(cfg.fft_size, 512);
    assert_eq!(cfg.spotlight_intensity, 1.5);
    assert_eq!(cfg.stream_url, DEFAULT_STREAM_URL);
    assert_eq!(cfg.frequency_bin_count(), 256);
}

#[test]
fn non_power_of_two_fft_is_rejected() {
    let err = ClubConfig::from_json(r#"{ "fftSize": 1000 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::FftSize { got: 1000, .. }));
    let err = ClubConfig::from_json(r#"{ "fftSize": 16 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::FftSize { got: 16, .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        ClubConfig::from_json("{ fftSize: }"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn bad_scene_values_are_rejected() {
    let mut cfg = ClubConfig::default();
    cfg.platform_size = 0.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::PlatformSize(_))));

    let mut cfg = ClubConfig::default();
    cfg.ambient_intensity = f32::NAN;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::Intensity {
            name: "ambient_intensity",
            ..
        })
    ));

    let mut cfg = ClubConfig::default();
    cfg.stream_url = "  ".into();
    assert_eq!(cfg.validate(), Err(ConfigError::EmptyStreamUrl));
}

#[test]
fn query_overrides_apply_known_keys_only() {
    let mut cfg = ClubConfig::default();
    assert_eq!(cfg.apply_override("fft", "4096"), Ok(true));
    assert_eq!(cfg.apply_override("stream", "http://localhost/live"), Ok(true));
    assert_eq!(cfg.apply_override("debug", "1"), Ok(false));
    assert!(cfg.apply_override("ambient", "lots").is_err());
    assert_eq!(cfg.fft_size, 4096);
    assert_eq!(cfg.stream_url, "http://localhost/live");
}
