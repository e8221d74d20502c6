use std::io::Cursor;

use anyhow::Context;

use crate::{audio::synth::Waveform, foundation::data_uri, foundation::error::BeastResult};

/// Encode as a mono 16-bit PCM WAV file.
pub fn encode_wav(wave: &Waveform) -> BeastResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: wave.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut buf = Vec::new();
    let mut writer =
        hound::WavWriter::new(Cursor::new(&mut buf), spec).context("create wav writer")?;
    for &s in &wave.samples {
        writer.write_sample(s).context("write wav sample")?;
    }
    writer.finalize().context("finalize wav")?;
    Ok(buf)
}

pub fn wav_data_uri(wav: &[u8]) -> String {
    data_uri::encode("audio/wav", wav)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/wav.rs"]
mod tests;
