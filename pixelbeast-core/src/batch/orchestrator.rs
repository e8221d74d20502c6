use std::{
    sync::{Arc, mpsc},
    time::Duration,
};

use rayon::prelude::*;

use crate::{
    audio::{synth::synthesize, wav},
    batch::request::{GenerateRequest, GenerateResponse, GenerationMethod, PixelSize, VariantMeta},
    foundation::{
        config::EngineConfig,
        error::{BeastError, BeastResult},
    },
    render::raster,
    shape::compositor::compose_creature,
    text::rules::RuleTable,
};

/// Style tags cycled by variant index.
pub const STYLES: [&str; 4] = [
    "cute and friendly",
    "scary and menacing",
    "mysterious and magical",
    "funny and quirky",
];

/// Pose tags cycled by variant index.
pub const POSES: [&str; 4] = ["standing pose", "action pose", "side view", "dynamic pose"];

/// Seed spacing between variants on the external path.
const EXTERNAL_SEED_STRIDE: u64 = 12_345;

pub fn style_for(index: usize) -> &'static str {
    STYLES[index % STYLES.len()]
}

pub fn pose_for(index: usize) -> &'static str {
    POSES[index % POSES.len()]
}

/// `"<description>, <style>, <pose>"` for variant `index`.
pub fn augmented_prompt(description: &str, index: usize) -> String {
    format!("{description}, {}, {}", style_for(index), pose_for(index))
}

/// `"<description>, variation <index + 1>"`.
pub fn audio_text(description: &str, index: usize) -> String {
    format!("{description}, variation {}", index + 1)
}

/// Optional hosted generator tried before the local engine.
///
/// Implementations may block; every call runs on a helper thread bounded by
/// [`EngineConfig::external_timeout_ms`]. Any error, timeout or undecodable payload makes
/// the engine fall back to procedural output for that artifact.
pub trait ExternalGenerator: Send + Sync {
    /// Encoded image bytes (any format the `image` crate decodes).
    fn generate_image(&self, prompt: &str, seed: u64) -> BeastResult<Vec<u8>>;

    /// WAV bytes.
    fn generate_audio(&self, prompt: &str) -> BeastResult<Vec<u8>>;
}

/// Prompt sent to an external image model.
pub fn external_image_prompt(prompt: &str) -> String {
    format!("pixel art style, {prompt}, retro game art, 8-bit style")
}

/// Prompt sent to an external audio model.
pub fn external_audio_prompt(prompt: &str) -> String {
    format!("creature sound, {prompt}, sound effect, short")
}

/// One generated variant before assembly into a response.
#[derive(Clone, Debug)]
struct Artifact {
    image_uri: String,
    audio_uri: String,
    meta: VariantMeta,
}

/// The generation engine: rule table, config, and the optional external seam.
pub struct Engine {
    config: EngineConfig,
    rules: RuleTable,
    external: Option<Arc<dyn ExternalGenerator>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("external", &self.external.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Validate `config` and load its rule table (or the built-in one).
    pub fn new(config: EngineConfig) -> BeastResult<Self> {
        let rules = match &config.rules_path {
            Some(path) => RuleTable::from_path(path)?,
            None => RuleTable::default(),
        };
        Self::with_rules(config, rules)
    }

    pub fn with_rules(config: EngineConfig, rules: RuleTable) -> BeastResult<Self> {
        config.validate()?;
        rules.validate()?;
        Ok(Self {
            config,
            rules,
            external: None,
        })
    }

    pub fn with_external(mut self, external: Arc<dyn ExternalGenerator>) -> Self {
        self.external = Some(external);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Produce `quantity` image/audio pairs. Fails as a whole if any local step fails.
    #[tracing::instrument(
        skip(self, req),
        fields(quantity = req.quantity, pixel_size = %req.pixel_size)
    )]
    pub fn generate(&self, req: &GenerateRequest) -> BeastResult<GenerateResponse> {
        let description = req.validate(&self.config)?;
        let n = req.quantity as usize;
        let jitter_base = wall_clock_ms();

        let results: Vec<BeastResult<Artifact>> = if self.config.threading.parallel {
            let pool = build_thread_pool(self.config.threading.threads)?;
            pool.install(|| {
                (0..n)
                    .into_par_iter()
                    .map(|i| self.artifact(description, i, req.pixel_size, jitter_base))
                    .collect()
            })
        } else {
            (0..n)
                .map(|i| self.artifact(description, i, req.pixel_size, jitter_base))
                .collect()
        };

        let mut images = Vec::with_capacity(n);
        let mut audios = Vec::with_capacity(n);
        let mut variants = Vec::with_capacity(n);
        for item in results {
            let a = item?;
            images.push(a.image_uri);
            audios.push(a.audio_uri);
            variants.push(a.meta);
        }

        let accelerated = variants
            .iter()
            .any(|v| v.external_image || v.external_audio);
        Ok(GenerateResponse {
            images,
            audios,
            prompt_echo: description.to_owned(),
            method: if accelerated {
                GenerationMethod::Accelerated
            } else {
                GenerationMethod::Procedural
            },
            variants,
        })
    }

    /// Procedural PNG for `prompt` at the configured output size.
    pub fn generate_image(&self, prompt: &str, pixel_size: PixelSize) -> BeastResult<Vec<u8>> {
        let creature = compose_creature(prompt, &self.rules, pixel_size.px())?;
        let img = raster::rasterize(&creature.image, self.config.output_size)?;
        raster::encode_png(&img)
    }

    /// Procedural WAV for `text`.
    pub fn generate_audio(&self, text: &str) -> BeastResult<Vec<u8>> {
        let (_, wave) = synthesize(text, &self.rules, &self.config.audio)?;
        wav::encode_wav(&wave)
    }

    fn artifact(
        &self,
        description: &str,
        index: usize,
        pixel_size: PixelSize,
        jitter_base: u64,
    ) -> BeastResult<Artifact> {
        let prompt = augmented_prompt(description, index);
        let audio_text = audio_text(description, index);
        let external_seed = jitter_base.wrapping_add(index as u64 * EXTERNAL_SEED_STRIDE);

        let external_png = self.try_external_image(&prompt, external_seed, pixel_size);
        let (png, external_image) = match external_png {
            Some(png) => (png, true),
            None => (self.generate_image(&prompt, pixel_size)?, false),
        };
        let (wav_bytes, external_audio) = match self.try_external_audio(&audio_text) {
            Some(bytes) => (bytes, true),
            None => (self.generate_audio(&audio_text)?, false),
        };

        Ok(Artifact {
            image_uri: raster::png_data_uri(&png),
            audio_uri: wav::wav_data_uri(&wav_bytes),
            meta: VariantMeta {
                index: index as u32,
                style: style_for(index).to_owned(),
                pose: pose_for(index).to_owned(),
                prompt,
                audio_text,
                external_image,
                external_audio,
            },
        })
    }

    fn try_external_image(
        &self,
        prompt: &str,
        seed: u64,
        pixel_size: PixelSize,
    ) -> Option<Vec<u8>> {
        let ext = Arc::clone(self.external.as_ref()?);
        let ext_prompt = external_image_prompt(prompt);
        let out = call_with_timeout(self.config.external_timeout(), move || {
            ext.generate_image(&ext_prompt, seed)
        })
        .and_then(|bytes| self.restyle_external(&bytes, pixel_size));
        recovered(out, "image", prompt)
    }

    fn try_external_audio(&self, text: &str) -> Option<Vec<u8>> {
        let ext = Arc::clone(self.external.as_ref()?);
        let ext_prompt = external_audio_prompt(text);
        let out = call_with_timeout(self.config.external_timeout(), move || {
            ext.generate_audio(&ext_prompt)
        })
        .and_then(|bytes| {
            hound::WavReader::new(std::io::Cursor::new(&bytes))
                .map_err(|e| BeastError::external(format!("external audio is not WAV: {e}")))?;
            Ok(bytes)
        });
        recovered(out, "audio", text)
    }

    /// Resize an external image to the output size and give it the blocky look.
    fn restyle_external(&self, bytes: &[u8], pixel_size: PixelSize) -> BeastResult<Vec<u8>> {
        let decoded = raster::decode_image(bytes)
            .map_err(|e| BeastError::external(format!("external image: {e}")))?;
        let size = self.config.output_size;
        let resized = image::imageops::resize(
            &decoded,
            size,
            size,
            image::imageops::FilterType::Lanczos3,
        );
        let pixelated = raster::pixelate(&resized, pixel_size.px())?;
        raster::encode_png(&pixelated)
    }
}

fn recovered(out: BeastResult<Vec<u8>>, what: &str, prompt: &str) -> Option<Vec<u8>> {
    match out {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(error = %e, prompt, "external {what} failed; using procedural engine");
            None
        }
    }
}

/// Run `f` on a helper thread and wait at most `timeout` for its result.
///
/// A call that times out is abandoned, not cancelled.
fn call_with_timeout<T, F>(timeout: Duration, f: F) -> BeastResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> BeastResult<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("pixelbeast-external".to_owned())
        .spawn(move || {
            let _ = tx.send(f());
        })
        .map_err(|e| BeastError::external(format!("spawn external worker: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(BeastError::external(format!(
            "external call timed out after {} ms",
            timeout.as_millis()
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(BeastError::external("external worker exited without a result"))
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> BeastResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BeastError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BeastError::generation(format!("failed to build rayon thread pool: {e}")))
}

fn wall_clock_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
