//! Save-state snapshot of the PSG register file
//!
//! Captures the six mixed voices and the global registers by field name. The
//! pending write queue is frame-scoped and never saved, so snapshots belong at
//! frame boundaries.

use serde::{Deserialize, Serialize};

use super::chip::{Psg, FIRST_NOISE_VOICE, MIXED_VOICES};
use super::registers::{FREQUENCY_MASK, VOICE_VOLUME_MASK};
use super::tables::WAVE_LENGTH;
use crate::{PsgError, Result};

/// Noise registers, present only for the noise-capable voices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSnapshot {
    /// Noise enable flag
    pub noise_channel: bool,
    /// Derived noise playback frequency
    pub noise_freq: u16,
}

/// Saved state of one voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSnapshot {
    /// 12-bit tone period
    pub frequency: u16,
    /// Panning byte
    pub panning: u8,
    /// 5-bit volume selector
    pub volume: u8,
    /// Key-on flag
    pub enabled: bool,
    /// Noise registers (voices 4 and 5 only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseSnapshot>,
    /// Direct audio flag
    pub dda: bool,
    /// Direct audio sample
    pub dda_value: i16,
    /// Fractional play position
    pub sample_offset: f32,
    /// Wavetable contents
    pub wave: Vec<i16>,
}

/// Saved state of the whole PSG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsgState {
    /// Master volume, left selector
    pub main_volume_left: u8,
    /// Master volume, right selector
    pub main_volume_right: u8,
    /// Voice select latch
    pub voice_latch: u8,
    /// Wavetable upload cursor
    pub wave_write_cursor: u8,
    /// Mixed voices 0-5
    pub voices: Vec<VoiceSnapshot>,
}

impl PsgState {
    /// Encode as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<()> {
        if self.voices.len() != MIXED_VOICES {
            return Err(PsgError::StateMismatch(format!(
                "expected {MIXED_VOICES} voices, found {}",
                self.voices.len()
            )));
        }
        for (index, voice) in self.voices.iter().enumerate() {
            if voice.wave.len() != WAVE_LENGTH {
                return Err(PsgError::StateMismatch(format!(
                    "voice {index}: expected {WAVE_LENGTH} wave samples, found {}",
                    voice.wave.len()
                )));
            }
            let noise_capable = index >= FIRST_NOISE_VOICE;
            if voice.noise.is_some() != noise_capable {
                return Err(PsgError::StateMismatch(format!(
                    "voice {index}: noise registers {}",
                    if noise_capable { "missing" } else { "not supported" }
                )));
            }
        }
        Ok(())
    }
}

impl Psg {
    /// Snapshot the register file
    pub fn save_state(&self) -> PsgState {
        let voices = self.voices[..MIXED_VOICES]
            .iter()
            .enumerate()
            .map(|(index, voice)| VoiceSnapshot {
                frequency: voice.frequency,
                panning: voice.panning,
                volume: voice.volume,
                enabled: voice.enabled,
                noise: (index >= FIRST_NOISE_VOICE).then_some(NoiseSnapshot {
                    noise_channel: voice.noise_channel,
                    noise_freq: voice.noise_freq,
                }),
                dda: voice.dda,
                dda_value: voice.dda_value,
                sample_offset: voice.sample_offset,
                wave: voice.wave.to_vec(),
            })
            .collect();

        PsgState {
            main_volume_left: self.main_volume_left,
            main_volume_right: self.main_volume_right,
            voice_latch: self.voice_latch,
            wave_write_cursor: self.wave_write_offset,
            voices,
        }
    }

    /// Restore a snapshot taken by [`Psg::save_state`]
    ///
    /// Fails without touching the PSG if the snapshot's layout differs from
    /// this build. Pending writes are discarded. Voices 6 and 7 and the user
    /// mute mask are left as they are.
    pub fn load_state(&mut self, state: &PsgState) -> Result<()> {
        state.validate()?;

        if !self.commands.is_empty() {
            log::warn!(
                "PSG state restored mid-frame; dropping {} queued writes",
                self.commands.len()
            );
            self.commands.clear();
        }

        self.main_volume_left = state.main_volume_left & 0x0F;
        self.main_volume_right = state.main_volume_right & 0x0F;
        self.voice_latch = state.voice_latch & 0x07;
        self.wave_write_offset = state.wave_write_cursor % WAVE_LENGTH as u8;

        for (index, (voice, saved)) in self.voices.iter_mut().zip(&state.voices).enumerate() {
            voice.frequency = saved.frequency & FREQUENCY_MASK;
            voice.panning = saved.panning;
            voice.volume = saved.volume & VOICE_VOLUME_MASK;
            voice.enabled = saved.enabled;
            if index >= FIRST_NOISE_VOICE {
                if let Some(noise) = saved.noise {
                    voice.noise_channel = noise.noise_channel;
                    voice.noise_freq = noise.noise_freq;
                }
            }
            voice.dda = saved.dda;
            voice.dda_value = saved.dda_value;
            voice.sample_offset = saved.sample_offset;
            voice.wave.copy_from_slice(&saved.wave);
        }
        Ok(())
    }
}
