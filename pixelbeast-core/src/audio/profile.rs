use crate::{
    foundation::rng::Rng64,
    text::features::FeatureSet,
    text::rules::{SizeCategory, ToneCategory},
};

/// Harmonic multipliers and noise amplitude for one tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timbre {
    pub harmonics: &'static [f64],
    pub noise_level: f64,
}

pub fn timbre(tone: ToneCategory) -> Timbre {
    match tone {
        ToneCategory::Scary => Timbre {
            harmonics: &[1.0, 1.5, 2.5, 3.5],
            noise_level: 0.3,
        },
        ToneCategory::Cute => Timbre {
            harmonics: &[1.0, 2.0, 3.0],
            noise_level: 0.1,
        },
        ToneCategory::Magical => Timbre {
            harmonics: &[1.0, 1.5, 2.0, 3.0, 4.0],
            noise_level: 0.15,
        },
        ToneCategory::Neutral => Timbre {
            harmonics: &[1.0, 2.0, 2.5, 3.0],
            noise_level: 0.2,
        },
    }
}

/// Base frequency band in Hz, half-open.
pub fn frequency_band(size: SizeCategory) -> (i32, i32) {
    match size {
        SizeCategory::Large => (80, 150),
        SizeCategory::Small => (400, 800),
        SizeCategory::Medium => (150, 400),
    }
}

/// Synthesis parameters for one clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioProfile {
    pub base_freq_hz: u32,
    pub harmonics: Vec<f64>,
    pub noise_level: f64,
    pub vibrato_rate_hz: f64,
    pub vibrato_depth: f64,
}

impl AudioProfile {
    /// Draws base frequency, then vibrato rate, then vibrato depth.
    pub fn draw(features: &FeatureSet, rng: &mut Rng64) -> Self {
        let (lo, hi) = frequency_band(features.size);
        let base_freq_hz = rng.range_i32(lo, hi - 1) as u32;
        let vibrato_rate_hz = rng.uniform(4.0, 8.0);
        let vibrato_depth = rng.uniform(0.02, 0.08);
        let t = timbre(features.tone);
        Self {
            base_freq_hz,
            harmonics: t.harmonics.to_vec(),
            noise_level: t.noise_level,
            vibrato_rate_hz,
            vibrato_depth,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/profile.rs"]
mod tests;
