//! Completion tone synthesis
//!
//! Produces a short sine beep as a 16-bit mono PCM WAV file. The gain decays
//! exponentially over the tone's length.

use std::f64::consts::PI;

const WAV_HEADER_SIZE: usize = 44;

/// Parameters of a synthesized beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f64,
    pub duration_secs: f64,
    pub sample_rate: u32,
    /// Gain at the start of the tone
    pub start_gain: f64,
    /// Gain reached at the end of the tone
    pub end_gain: f64,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: 800.0,
            duration_secs: 0.5,
            sample_rate: 44_100,
            start_gain: 0.1,
            end_gain: 0.01,
        }
    }
}

impl ToneSpec {
    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).round() as usize
    }

    /// Gain at sample `i`
    fn gain_at(&self, i: usize) -> f64 {
        let n = self.sample_count().max(1) as f64;
        let t = i as f64 / n;
        self.start_gain * (self.end_gain / self.start_gain).powf(t)
    }

    pub fn samples(&self) -> Vec<i16> {
        let rate = self.sample_rate as f64;
        (0..self.sample_count())
            .map(|i| {
                let phase = 2.0 * PI * self.frequency_hz * i as f64 / rate;
                let value = phase.sin() * self.gain_at(i);
                (value * i16::MAX as f64).round() as i16
            })
            .collect()
    }

    /// Encode the tone as a complete WAV file
    pub fn to_wav(&self) -> Vec<u8> {
        let samples = self.samples();
        let data_len = (samples.len() * 2) as u32;
        let byte_rate = self.sample_rate * 2;

        let mut wav = Vec::with_capacity(WAV_HEADER_SIZE + samples.len() * 2);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&self.sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes()); // block align
        wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        for sample in samples {
            wav.extend_from_slice(&sample.to_le_bytes());
        }
        wav
    }
}
