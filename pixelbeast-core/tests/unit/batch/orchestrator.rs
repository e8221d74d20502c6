use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::foundation::{config::AudioConfig, data_uri};

fn small_config() -> EngineConfig {
    EngineConfig {
        output_size: 64,
        audio: AudioConfig {
            sample_rate: 8_000,
            duration_secs: 0.25,
            ..AudioConfig::default()
        },
        external_timeout_ms: 2_000,
        ..EngineConfig::default()
    }
}

fn engine() -> Engine {
    Engine::new(small_config()).unwrap()
}

struct AlwaysFails {
    calls: AtomicUsize,
}

impl ExternalGenerator for AlwaysFails {
    fn generate_image(&self, _prompt: &str, _seed: u64) -> BeastResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BeastError::external("service unavailable"))
    }

    fn generate_audio(&self, _prompt: &str) -> BeastResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BeastError::external("service unavailable"))
    }
}

struct Garbage;

impl ExternalGenerator for Garbage {
    fn generate_image(&self, _prompt: &str, _seed: u64) -> BeastResult<Vec<u8>> {
        Ok(b"<html>rate limited</html>".to_vec())
    }

    fn generate_audio(&self, _prompt: &str) -> BeastResult<Vec<u8>> {
        Ok(b"not a wav".to_vec())
    }
}

struct Slow;

impl ExternalGenerator for Slow {
    fn generate_image(&self, _prompt: &str, _seed: u64) -> BeastResult<Vec<u8>> {
        std::thread::sleep(Duration::from_millis(500));
        Err(BeastError::external("too late"))
    }

    fn generate_audio(&self, _prompt: &str) -> BeastResult<Vec<u8>> {
        std::thread::sleep(Duration::from_millis(500));
        Err(BeastError::external("too late"))
    }
}

/// Returns a flat 20×10 image and a tiny valid WAV, recording the prompts it saw.
struct Working {
    prompts: std::sync::Mutex<Vec<String>>,
}

impl ExternalGenerator for Working {
    fn generate_image(&self, prompt: &str, _seed: u64) -> BeastResult<Vec<u8>> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        let img = image::RgbaImage::from_pixel(20, 10, image::Rgba([10, 200, 30, 255]));
        raster::encode_png(&img)
    }

    fn generate_audio(&self, prompt: &str) -> BeastResult<Vec<u8>> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        wav::encode_wav(&crate::audio::synth::Waveform {
            sample_rate: 8_000,
            samples: vec![0, 100, -100, 0],
        })
    }
}

fn decode_png_uri(uri: &str) -> image::RgbaImage {
    let (mime, bytes) = data_uri::parse(uri).unwrap();
    assert_eq!(mime, "image/png");
    raster::decode_image(&bytes).unwrap()
}

#[test]
fn tags_cycle_with_period_four() {
    assert_eq!(
        augmented_prompt("slime", 0),
        "slime, cute and friendly, standing pose"
    );
    assert_eq!(
        augmented_prompt("slime", 5),
        "slime, scary and menacing, action pose"
    );
    assert_eq!(audio_text("slime", 0), "slime, variation 1");
    assert_eq!(style_for(7), STYLES[3]);
    assert_eq!(pose_for(8), POSES[0]);
}

#[test]
fn external_prompts_are_decorated() {
    assert_eq!(
        external_image_prompt("imp"),
        "pixel art style, imp, retro game art, 8-bit style"
    );
    assert_eq!(
        external_audio_prompt("imp"),
        "creature sound, imp, sound effect, short"
    );
}

#[test]
fn cardinality_holds_when_external_always_fails() {
    let failing = Arc::new(AlwaysFails {
        calls: AtomicUsize::new(0),
    });
    let engine = engine().with_external(failing.clone());
    for n in 1..=5 {
        let resp = engine
            .generate(&GenerateRequest::new("bat").with_quantity(n))
            .unwrap();
        assert_eq!(resp.images.len(), n as usize);
        assert_eq!(resp.audios.len(), n as usize);
        assert_eq!(resp.variants.len(), n as usize);
        assert_eq!(resp.method, GenerationMethod::Procedural);
    }
    // Image and audio were each attempted once per variant.
    assert_eq!(failing.calls.load(Ordering::SeqCst), 2 * (1 + 2 + 3 + 4 + 5));
}

#[test]
fn malformed_external_payloads_fall_back() {
    let engine = engine().with_external(Arc::new(Garbage));
    let resp = engine.generate(&GenerateRequest::new("bat").with_quantity(2)).unwrap();
    assert_eq!(resp.method, GenerationMethod::Procedural);
    assert!(resp.variants.iter().all(|v| !v.external_image && !v.external_audio));
    assert_eq!(decode_png_uri(&resp.images[0]).dimensions(), (64, 64));
}

#[test]
fn slow_external_times_out() {
    let mut cfg = small_config();
    cfg.external_timeout_ms = 20;
    let engine = Engine::new(cfg).unwrap().with_external(Arc::new(Slow));
    let resp = engine.generate(&GenerateRequest::new("bat").with_quantity(1)).unwrap();
    assert_eq!(resp.method, GenerationMethod::Procedural);
    assert_eq!(resp.images.len(), 1);
}

#[test]
fn working_external_is_resized_and_marked_accelerated() {
    let working = Arc::new(Working {
        prompts: std::sync::Mutex::new(Vec::new()),
    });
    let engine = engine().with_external(working.clone());
    let resp = engine
        .generate(&GenerateRequest::new("imp").with_pixel_size(PixelSize::Px32).with_quantity(1))
        .unwrap();
    assert_eq!(resp.method, GenerationMethod::Accelerated);
    assert!(resp.variants[0].external_image);
    assert!(resp.variants[0].external_audio);

    let img = decode_png_uri(&resp.images[0]);
    assert_eq!(img.dimensions(), (64, 64));
    let prompts = working.prompts.lock().unwrap().clone();
    assert_eq!(
        prompts,
        vec![
            "pixel art style, imp, cute and friendly, standing pose, retro game art, 8-bit style"
                .to_owned(),
            "creature sound, imp, variation 1, sound effect, short".to_owned(),
        ]
    );
}

#[test]
fn local_output_is_deterministic() {
    let engine = engine();
    let req = GenerateRequest::new("crystal bat").with_quantity(3);
    let a = engine.generate(&req).unwrap();
    let b = engine.generate(&req).unwrap();
    assert_eq!(a.images, b.images);
    assert_eq!(a.audios, b.audios);
    assert_ne!(a.images[0], a.images[1]);
    assert_ne!(a.audios[0], a.audios[1]);
}

#[test]
fn parallel_batch_matches_sequential() {
    let mut cfg = small_config();
    cfg.threading.parallel = true;
    cfg.threading.threads = Some(2);
    let parallel = Engine::new(cfg).unwrap();
    let req = GenerateRequest::new("ghost").with_quantity(4);
    let a = parallel.generate(&req).unwrap();
    let b = engine().generate(&req).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_requests_fail_before_generation() {
    let engine = engine();
    assert!(matches!(
        engine.generate(&GenerateRequest::new("x").with_quantity(0)),
        Err(BeastError::Validation(_))
    ));
    let mut cfg = small_config();
    cfg.threading.threads = Some(0);
    assert!(Engine::new(cfg).is_err());
}

#[test]
fn timeout_helper_returns_fast_results() {
    let out = call_with_timeout(Duration::from_secs(5), || Ok(7)).unwrap();
    assert_eq!(out, 7);
    let err = call_with_timeout(Duration::from_millis(10), || {
        std::thread::sleep(Duration::from_millis(300));
        Ok(1)
    });
    assert!(matches!(err, Err(BeastError::External(_))));
}
