//! Waveform type and transport encodings.
//!
//! The model produces mono f32 samples at a fixed 16 kHz. The two encoders
//! here are pure transforms of a [`Waveform`]: a 16-bit PCM WAV byte stream
//! for direct file delivery, and the same bytes base64-wrapped with metadata
//! for JSON transport. Decoding the base64 field of the structured payload
//! must yield exactly the bytes of the binary encoding.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::errors::{AppError, AppResult};

/// Sample rate of the SpeechT5 HiFi-GAN vocoder output.
pub const SAMPLE_RATE: u32 = 16_000;

/// Mono floating-point audio produced by one synthesis call.
///
/// Created fresh per request and dropped with the response; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Amplitude samples, nominally in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Samples per second
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Structured audio payload for the JSON endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AudioPayload {
    pub audio_base64: String,
    pub sample_rate: u32,
    pub format: &'static str,
}

impl AudioPayload {
    /// Encode a waveform as base64 WAV with transport metadata.
    pub fn from_waveform(waveform: &Waveform) -> AppResult<Self> {
        let bytes = wav_bytes(waveform)?;
        Ok(Self {
            audio_base64: BASE64.encode(bytes),
            sample_rate: waveform.sample_rate,
            format: "wav",
        })
    }
}

/// Serialize a waveform as a mono 16-bit PCM WAV container.
pub fn wav_bytes(waveform: &Waveform) -> AppResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| AppError::Encoding(e.to_string()))?;
        for &sample in &waveform.samples {
            // Clamp before scaling; the vocoder can overshoot [-1, 1] slightly
            let scaled = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(scaled)
                .map_err(|e| AppError::Encoding(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AppError::Encoding(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_waveform() -> Waveform {
        let samples: Vec<f32> = (0..1600)
            .map(|i| (i as f32 / 16.0 * std::f32::consts::TAU).sin() * 0.5)
            .collect();
        Waveform::new(samples, SAMPLE_RATE)
    }

    #[test]
    fn wav_bytes_is_mono_pcm16_at_source_rate() {
        let bytes = wav_bytes(&test_waveform()).unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.len(), 1600);
    }

    #[test]
    fn structured_payload_wraps_identical_wav_bytes() {
        let waveform = test_waveform();

        let binary = wav_bytes(&waveform).unwrap();
        let payload = AudioPayload::from_waveform(&waveform).unwrap();

        assert_eq!(payload.sample_rate, SAMPLE_RATE);
        assert_eq!(payload.format, "wav");
        let decoded = BASE64.decode(payload.audio_base64).unwrap();
        assert_eq!(decoded, binary);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let waveform = Waveform::new(vec![2.0, -2.0], SAMPLE_RATE);
        let bytes = wav_bytes(&waveform).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }

    #[test]
    fn empty_waveform_still_encodes_a_valid_container() {
        let bytes = wav_bytes(&Waveform::new(Vec::new(), SAMPLE_RATE)).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.len(), 0);
    }

    #[test]
    fn duration_reflects_sample_count() {
        let waveform = Waveform::new(vec![0.0; 8000], SAMPLE_RATE);
        assert!((waveform.duration_secs() - 0.5).abs() < f32::EPSILON);
    }
}
