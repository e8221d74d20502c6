use super::*;

fn short_cfg() -> AudioConfig {
    AudioConfig {
        sample_rate: 8_000,
        duration_secs: 0.5,
        ..AudioConfig::default()
    }
}

#[test]
fn default_clip_length_and_peak() {
    let (_, wave) = synthesize("giant scary dragon", &RuleTable::default(), &AudioConfig::default())
        .unwrap();
    assert_eq!(wave.sample_rate, 44_100);
    assert_eq!(wave.samples.len(), 132_300);
    assert_eq!(wave.peak(), 26_213);
    assert!((wave.duration_secs() - 3.0).abs() < 1e-9);
}

#[test]
fn envelope_starts_and_ends_silent() {
    let (_, wave) = synthesize("toad", &RuleTable::default(), &short_cfg()).unwrap();
    assert_eq!(wave.samples.len(), 4_000);
    assert_eq!(wave.samples[0], 0);
    assert_eq!(*wave.samples.last().unwrap(), 0);
    assert_eq!(wave.peak(), 26_213);
}

#[test]
fn same_text_same_samples() {
    let rules = RuleTable::default();
    let a = synthesize("toad, variation 1", &rules, &short_cfg()).unwrap();
    let b = synthesize("toad, variation 1", &rules, &short_cfg()).unwrap();
    assert_eq!(a, b);
    let c = synthesize("toad, variation 2", &rules, &short_cfg()).unwrap();
    assert_ne!(a.1, c.1);
}

#[test]
fn peak_fraction_scales_output() {
    let cfg = AudioConfig {
        peak_fraction: 0.5,
        ..short_cfg()
    };
    let (_, wave) = synthesize("toad", &RuleTable::default(), &cfg).unwrap();
    assert_eq!(wave.peak(), 16_383);
}

#[test]
fn empty_clip_is_rejected() {
    let cfg = AudioConfig {
        sample_rate: 1,
        duration_secs: 0.5,
        ..AudioConfig::default()
    };
    assert!(synthesize("toad", &RuleTable::default(), &cfg).is_err());
}

#[test]
fn ramp_includes_both_ends() {
    assert_eq!(ramp(0.0, 1.0, 0, 5), 0.0);
    assert_eq!(ramp(0.0, 1.0, 4, 5), 1.0);
    assert_eq!(ramp(1.0, 0.0, 2, 5), 0.5);
    assert_eq!(ramp(1.0, 0.0, 0, 1), 1.0);
}

#[test]
fn silent_profile_renders_zeros() {
    let profile = AudioProfile {
        base_freq_hz: 200,
        harmonics: vec![],
        noise_level: 0.0,
        vibrato_rate_hz: 5.0,
        vibrato_depth: 0.05,
    };
    let mut rng = Rng64::new(1);
    let wave = render(&profile, &short_cfg(), &mut rng).unwrap();
    assert!(wave.samples.iter().all(|s| *s == 0));
}

#[test]
fn clip_shorter_than_ramps_still_fades_to_zero() {
    let cfg = AudioConfig {
        duration_secs: 0.25,
        ..AudioConfig::default()
    };
    let (_, wave) = synthesize("toad", &RuleTable::default(), &cfg).unwrap();
    assert_eq!(wave.samples.len(), 11_025);
    assert_eq!(wave.samples[0], 0);
    assert_eq!(*wave.samples.last().unwrap(), 0);
    assert_eq!(wave.peak(), 26_213);
}
