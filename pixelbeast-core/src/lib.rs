//! Pixelbeast turns a free-text creature description into a pixel-art sprite and a matching
//! sound effect, deterministically and without any generative model.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: `description -> Seed` (SHA-256, low 32 bits)
//! 2. **Extract**: `description + RuleTable -> FeatureSet` (keyword flags, theme, size, tone)
//! 3. **Style**: `Seed + FeatureSet -> Palette` (five HSV-derived color roles)
//! 4. **Compose**: `FeatureSet -> ShapePlan`, then ordered layers onto a `RasterCanvas`
//! 5. **Rasterize**: nearest-neighbor upscale of the logical canvas, PNG encode
//! 6. **Audio**: `description -> AudioProfile -> Waveform -> WAV` (additive synthesis)
//!
//! [`Engine::generate`] runs the whole batch for a [`GenerateRequest`], optionally trying an
//! [`ExternalGenerator`] first and always falling back to the procedural path.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Bit-reproducible**: the same description always yields the same bytes. Randomness comes
//!   from per-call [`Rng64`] values, one stream per purpose; there is no global RNG.
//! - **Data-driven vocabulary**: keywords and tie-break priorities live in a serde
//!   [`RuleTable`] that can be replaced from JSON.
#![forbid(unsafe_code)]

mod audio;
mod batch;
mod foundation;
mod render;
mod shape;
mod style;
mod text;

pub use audio::profile::{AudioProfile, Timbre, frequency_band, timbre};
pub use audio::synth::{Waveform, render as render_waveform, synthesize};
pub use audio::wav::{encode_wav, wav_data_uri};
pub use batch::orchestrator::{
    Engine, ExternalGenerator, POSES, STYLES, audio_text, augmented_prompt,
    external_audio_prompt, external_image_prompt, pose_for, style_for,
};
pub use batch::request::{
    GenerateRequest, GenerateResponse, GenerationMethod, PixelSize, VariantMeta,
};
pub use foundation::config::{AudioConfig, BatchThreading, EngineConfig};
pub use foundation::core::{BezPath, LogicalImage, Point, Rect, Rgb8, Rgba8};
pub use foundation::data_uri;
pub use foundation::error::{BeastError, BeastResult};
pub use foundation::rng::{Rng64, Stream};
pub use render::canvas::{Px, RasterCanvas};
pub use render::raster::{
    decode_image, downsample_area, encode_png, pixelate, png_data_uri, rasterize,
    upscale_nearest,
};
pub use shape::compositor::{
    ComposedCreature, Layer, Mark, MarkKind, compose_creature, layers, plan_marks,
};
pub use shape::plan::{Appendage, REFERENCE_SIDE, ShapePlan, plan_shape};
pub use style::palette::{Palette, generate_palette, hsv_to_rgb8};
pub use text::features::{FeatureSet, extract_features};
pub use text::rules::{
    BodyArchetype, FaceStyle, FeatureFlag, FlagRule, HueRange, KeywordRule, RuleTable,
    SizeCategory, ThemeCategory, ThemeSpec, ToneCategory, first_flag_match, first_keyword_match,
};
pub use text::seed::{Seed, derive_seed, derive_seed_with_suffix};
