use std::{fmt, str::FromStr};

use crate::foundation::{
    config::EngineConfig,
    error::{BeastError, BeastResult},
};

/// Logical canvas side, also the pixelation block size for externally generated images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PixelSize {
    #[default]
    Px32,
    Px64,
    Px128,
}

impl PixelSize {
    pub const ALL: [PixelSize; 3] = [Self::Px32, Self::Px64, Self::Px128];

    pub fn px(self) -> u32 {
        match self {
            Self::Px32 => 32,
            Self::Px64 => 64,
            Self::Px128 => 128,
        }
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.px())
    }
}

/// Accepts `"32px"` as well as a bare `"32"`.
impl FromStr for PixelSize {
    type Err = BeastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
        let n: u32 = digits
            .parse()
            .map_err(|_| BeastError::validation(format!("unknown pixel size '{s}'")))?;
        Self::ALL
            .into_iter()
            .find(|p| p.px() == n)
            .ok_or_else(|| {
                BeastError::validation(format!(
                    "unsupported pixel size '{s}' (expected 32px, 64px or 128px)"
                ))
            })
    }
}

impl TryFrom<String> for PixelSize {
    type Error = BeastError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PixelSize> for String {
    fn from(p: PixelSize) -> Self {
        p.to_string()
    }
}

fn default_quantity() -> u32 {
    4
}

/// One generation call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Free-text creature description. `None` is always rejected.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "pixelBlockSize")]
    pub pixel_size: PixelSize,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl GenerateRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            pixel_size: PixelSize::default(),
            quantity: default_quantity(),
        }
    }

    pub fn with_pixel_size(mut self, pixel_size: PixelSize) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Check the request against engine limits and return the description.
    pub fn validate<'a>(&'a self, cfg: &EngineConfig) -> BeastResult<&'a str> {
        let description = self
            .description
            .as_deref()
            .ok_or_else(|| BeastError::validation("description is required"))?;
        if description.trim().is_empty() && !cfg.allow_empty_description {
            return Err(BeastError::validation("description must not be empty"));
        }
        if self.quantity == 0 {
            return Err(BeastError::validation("quantity must be >= 1"));
        }
        if self.quantity > cfg.max_quantity {
            return Err(BeastError::validation(format!(
                "quantity {} exceeds the limit of {}",
                self.quantity, cfg.max_quantity
            )));
        }
        Ok(description)
    }
}

/// `procedural` when every artifact came from the local engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    Procedural,
    Accelerated,
}

/// Per-index bookkeeping returned alongside the artifacts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMeta {
    pub index: u32,
    pub style: String,
    pub pose: String,
    /// Augmented prompt the image was drawn from.
    pub prompt: String,
    /// Text the audio clip was synthesized from.
    pub audio_text: String,
    pub external_image: bool,
    pub external_audio: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// `data:image/png;base64,…`, one per variant.
    pub images: Vec<String>,
    /// `data:audio/wav;base64,…`, one per variant.
    pub audios: Vec<String>,
    pub prompt_echo: String,
    pub method: GenerationMethod,
    pub variants: Vec<VariantMeta>,
}

impl GenerateResponse {
    pub fn to_json_pretty(&self) -> BeastResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BeastError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/request.rs"]
mod tests;
