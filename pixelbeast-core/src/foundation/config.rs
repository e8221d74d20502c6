use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use crate::foundation::error::{BeastError, BeastResult};

/// Engine-wide settings. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Side length in pixels of every encoded output image.
    pub output_size: u32,
    /// Audio synthesis constants.
    pub audio: AudioConfig,
    /// Batch scheduling controls.
    pub threading: BatchThreading,
    /// Upper bound on a single external-acceleration attempt.
    pub external_timeout_ms: u64,
    /// Accept `""` as a description and produce generic artifacts for it.
    pub allow_empty_description: bool,
    /// Largest accepted `quantity` per request.
    pub max_quantity: u32,
    /// Optional JSON keyword rule table replacing the built-in vocabulary.
    pub rules_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_size: 512,
            audio: AudioConfig::default(),
            threading: BatchThreading::default(),
            external_timeout_ms: 60_000,
            allow_empty_description: true,
            max_quantity: 16,
            rules_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub duration_secs: f64,
    /// Fraction of i16 full scale the loudest sample is normalized to.
    pub peak_fraction: f64,
    pub attack_secs: f64,
    pub release_secs: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            duration_secs: 3.0,
            peak_fraction: 0.8,
            attack_secs: 0.1,
            release_secs: 0.3,
        }
    }
}

impl AudioConfig {
    /// Number of samples in one clip: `floor(duration × sample_rate)`.
    pub fn total_samples(&self) -> usize {
        (self.duration_secs * f64::from(self.sample_rate)).floor() as usize
    }
}

/// Threading controls for batch generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchThreading {
    /// Generate artifacts on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl EngineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BeastResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| BeastError::validation(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BeastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BeastError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> BeastResult<()> {
        if self.output_size == 0 || self.output_size > u32::from(u16::MAX) {
            return Err(BeastError::validation(
                "output_size must be in 1..=65535",
            ));
        }
        if self.max_quantity == 0 {
            return Err(BeastError::validation("max_quantity must be >= 1"));
        }
        if let Some(0) = self.threading.threads {
            return Err(BeastError::validation(
                "threading.threads must be >= 1 when set",
            ));
        }
        let a = &self.audio;
        if a.sample_rate == 0 {
            return Err(BeastError::validation("audio.sample_rate must be > 0"));
        }
        if !a.duration_secs.is_finite() || a.duration_secs <= 0.0 {
            return Err(BeastError::validation("audio.duration_secs must be > 0"));
        }
        if !(a.peak_fraction > 0.0 && a.peak_fraction <= 1.0) {
            return Err(BeastError::validation(
                "audio.peak_fraction must be in (0, 1]",
            ));
        }
        // Ramps longer than the clip are clamped when the envelope is applied.
        if !(a.attack_secs >= 0.0 && a.release_secs >= 0.0)
            || !a.attack_secs.is_finite()
            || !a.release_secs.is_finite()
        {
            return Err(BeastError::validation(
                "audio attack/release must be finite and >= 0",
            ));
        }
        if a.total_samples() < 2 {
            return Err(BeastError::validation(
                "audio clip must contain at least 2 samples",
            ));
        }
        Ok(())
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_millis(self.external_timeout_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
