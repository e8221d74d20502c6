use std::f64::consts::TAU;

use crate::{
    audio::profile::AudioProfile,
    foundation::config::AudioConfig,
    foundation::error::{BeastError, BeastResult},
    foundation::rng::{Rng64, Stream},
    text::{features::extract_features, rules::RuleTable, seed::derive_seed},
};

/// Mono 16-bit PCM clip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Waveform {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl Waveform {
    pub fn peak(&self) -> i16 {
        self.samples
            .iter()
            .map(|s| s.saturating_abs())
            .max()
            .unwrap_or(0)
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Synthesize the clip for `text`. The audio stream of its seed supplies the profile draws
/// followed by one noise draw per sample.
#[tracing::instrument(skip(rules, cfg))]
pub fn synthesize(
    text: &str,
    rules: &RuleTable,
    cfg: &AudioConfig,
) -> BeastResult<(AudioProfile, Waveform)> {
    let mut rng = Rng64::for_stream(derive_seed(text), Stream::Audio);
    let features = extract_features(text, rules);
    let profile = AudioProfile::draw(&features, &mut rng);
    tracing::debug!(
        base_freq_hz = profile.base_freq_hz,
        tone = ?features.tone,
        size = ?features.size,
        "resolved audio profile"
    );
    let wave = render(&profile, cfg, &mut rng)?;
    Ok((profile, wave))
}

/// Render `profile` into PCM, drawing the noise from `rng`.
pub fn render(
    profile: &AudioProfile,
    cfg: &AudioConfig,
    rng: &mut Rng64,
) -> BeastResult<Waveform> {
    let n = cfg.total_samples();
    if n == 0 {
        return Err(BeastError::validation(format!(
            "audio clip of {}s at {} Hz has no samples",
            cfg.duration_secs, cfg.sample_rate
        )));
    }

    let step = if n > 1 {
        cfg.duration_secs / (n - 1) as f64
    } else {
        0.0
    };
    let base = f64::from(profile.base_freq_hz);
    let mut signal: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 * step;
            let tone: f64 = profile
                .harmonics
                .iter()
                .enumerate()
                .map(|(k, h)| 0.3 / (k + 1) as f64 * (TAU * base * h * t).sin())
                .sum();
            let vibrato = 1.0 + profile.vibrato_depth * (TAU * profile.vibrato_rate_hz * t).sin();
            tone * vibrato + rng.standard_normal() * profile.noise_level
        })
        .collect();

    apply_envelope(&mut signal, cfg);

    let peak = signal.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let scale = if peak > 0.0 {
        f64::from(i16::MAX) * cfg.peak_fraction / peak
    } else {
        0.0
    };
    let samples = signal.iter().map(|v| (v * scale) as i16).collect();

    Ok(Waveform {
        sample_rate: cfg.sample_rate,
        samples,
    })
}

/// Linear fade-in over the attack samples, then linear fade-out over the release samples.
/// The fade-out wins where the two overlap.
fn apply_envelope(signal: &mut [f64], cfg: &AudioConfig) {
    let rate = f64::from(cfg.sample_rate);
    let n = signal.len();
    let attack = ((cfg.attack_secs * rate).floor() as usize).min(n);
    let release = ((cfg.release_secs * rate).floor() as usize).min(n);

    for (j, v) in signal[..attack].iter_mut().enumerate() {
        *v *= ramp(0.0, 1.0, j, attack);
    }
    for (j, v) in signal[n - release..].iter_mut().enumerate() {
        *v *= ramp(1.0, 0.0, j, release);
    }
}

/// Value `j` of `len` evenly spaced points from `from` to `to`, both ends included.
fn ramp(from: f64, to: f64, j: usize, len: usize) -> f64 {
    if len <= 1 {
        return from;
    }
    from + (to - from) * j as f64 / (len - 1) as f64
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
