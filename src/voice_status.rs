//! Voice status extraction for debuggers and visualizers.
//!
//! Turns the PSG register file into display-ready values: what each voice is
//! playing, at which pitch, and how loud it reaches each output channel.
//!
//! # Example
//!
//! ```
//! use huc6280_psg::Psg;
//!
//! let mut psg = Psg::new();
//! psg.write_register_immediate(2, 0xFE);
//! psg.write_register_immediate(4, 0x9F);
//!
//! let status = psg.voice_statuses();
//! for voice in status.voices.iter().filter(|v| v.is_active()) {
//!     println!("Voice {}: {:?} {:?}", voice.index, voice.mode, voice.note_name);
//! }
//! ```

use crate::huc6280::{Psg, Voice, VoiceMode, MIXED_VOICES};

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Display state of a single voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceStatus {
    /// Voice number (0-5).
    pub index: usize,
    /// Output mode.
    pub mode: VoiceMode,
    /// Tone period register (12-bit).
    pub tone_period: u16,
    /// Tone pitch in Hz (None unless the voice is playing an audible tone).
    pub frequency_hz: Option<f32>,
    /// Musical note name (e.g., "A4", "C#5").
    pub note_name: Option<String>,
    /// Noise playback frequency (None unless in noise mode).
    pub noise_freq: Option<u16>,
    /// Volume selector (0-31).
    pub volume: u8,
    /// Left panning selector (0-15).
    pub pan_left: u8,
    /// Right panning selector (0-15).
    pub pan_right: u8,
    /// Effective left level after master volume (0-31).
    pub level_left: u8,
    /// Effective right level after master volume (0-31).
    pub level_right: u8,
    /// Direct audio sample.
    pub dda_value: i16,
    /// Muted by the host.
    pub muted: bool,
}

impl VoiceStatus {
    /// Derive the status of `voice` at the given master clock.
    ///
    /// Levels are left at zero; [`Psg::voice_statuses`] fills them in
    /// because they depend on the master volume.
    pub fn from_voice(index: usize, voice: &Voice, master_clock: u32) -> Self {
        let mode = voice.mode();
        let frequency_hz = match mode {
            VoiceMode::Tone if voice.frequency() > 1 => {
                Some(master_clock as f32 / (32.0 * f32::from(voice.frequency())))
            }
            _ => None,
        };

        VoiceStatus {
            index,
            mode,
            tone_period: voice.frequency(),
            frequency_hz,
            note_name: frequency_hz.and_then(frequency_to_note),
            noise_freq: (mode == VoiceMode::Noise).then_some(voice.noise_freq()),
            volume: voice.volume(),
            pan_left: voice.panning() >> 4,
            pan_right: voice.panning() & 0x0F,
            level_left: 0,
            level_right: 0,
            dda_value: voice.dda_value(),
            muted: false,
        }
    }

    /// Whether the voice reaches the output at all.
    pub fn is_active(&self) -> bool {
        self.mode != VoiceMode::Disabled
            && !self.muted
            && (self.level_left > 0 || self.level_right > 0)
    }
}

/// Display state of all mixed voices plus the global registers.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceStatuses {
    /// Voices 0-5.
    pub voices: Vec<VoiceStatus>,
    /// Voice select latch.
    pub voice_latch: u8,
    /// Master volume selectors (left, right).
    pub main_volume: (u8, u8),
    /// Wavetable upload cursor; returns to 0 when a new DDA note starts.
    pub wave_write_cursor: u8,
}

impl Psg {
    /// Extract display state for the six mixed voices.
    pub fn voice_statuses(&self) -> VoiceStatuses {
        let master_clock = self.config().master_clock;
        let voices = self.voices[..MIXED_VOICES]
            .iter()
            .enumerate()
            .map(|(index, voice)| {
                let (left, right) = self.stereo_levels(voice);
                VoiceStatus {
                    level_left: left as u8,
                    level_right: right as u8,
                    muted: self.is_voice_muted(index),
                    ..VoiceStatus::from_voice(index, voice, master_clock)
                }
            })
            .collect();

        VoiceStatuses {
            voices,
            voice_latch: self.voice_latch(),
            main_volume: self.main_volume(),
            wave_write_cursor: self.wave_write_cursor(),
        }
    }
}

/// Convert frequency to a note label, `None` outside the audible MIDI range.
fn frequency_to_note(freq: f32) -> Option<String> {
    if !(20.0..=20000.0).contains(&freq) {
        return None;
    }

    // MIDI note number: 69 = A4 = 440Hz
    let midi = (12.0 * (freq / 440.0).log2() + 69.0).round() as i32;
    if !(0..=127).contains(&midi) {
        return None;
    }
    let octave = midi / 12 - 1;
    Some(format!("{}{}", NOTE_NAMES[(midi % 12) as usize], octave))
}
