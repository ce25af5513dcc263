//! Per-voice register file

use super::tables::WAVE_LENGTH;

/// What a voice is currently producing.
///
/// Derived from the raw register flags, which are kept as written because the
/// decoder consults them individually (R6 checks DDA even on a disabled voice,
/// and the noise flag survives a key-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceMode {
    /// Key off: contributes nothing
    Disabled,
    /// Stepping through the voice's own wavetable
    Tone,
    /// Holding the last directly written sample
    DirectAudio,
    /// Stepping through the shared noise waveform
    Noise,
}

/// One of the eight PSG voices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub(crate) frequency: u16,
    pub(crate) panning: u8,
    pub(crate) volume: u8,
    pub(crate) enabled: bool,
    pub(crate) noise_channel: bool,
    pub(crate) dda: bool,
    pub(crate) noise_freq: u16,
    pub(crate) dda_value: i16,
    pub(crate) wave: [i16; WAVE_LENGTH],
    /// Fractional play position into whichever waveform the voice reads
    pub(crate) sample_offset: f32,
}

impl Voice {
    /// A silent voice in its power-on state
    pub const fn new() -> Self {
        Self {
            frequency: 0,
            panning: 0,
            volume: 0,
            enabled: false,
            noise_channel: false,
            dda: false,
            noise_freq: 0,
            dda_value: 0,
            wave: [0; WAVE_LENGTH],
            sample_offset: 0.0,
        }
    }

    /// Current output mode
    ///
    /// DDA outranks noise: a noise voice in DDA mode outputs its direct
    /// sample while still advancing through the noise waveform.
    pub fn mode(&self) -> VoiceMode {
        if !self.enabled {
            VoiceMode::Disabled
        } else if self.dda {
            VoiceMode::DirectAudio
        } else if self.noise_channel {
            VoiceMode::Noise
        } else {
            VoiceMode::Tone
        }
    }

    /// 12-bit tone period divisor
    pub fn frequency(&self) -> u16 {
        self.frequency
    }

    /// Panning byte: high nibble left, low nibble right
    pub fn panning(&self) -> u8 {
        self.panning
    }

    /// 5-bit volume selector
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Key-on flag
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Direct audio flag
    pub fn dda(&self) -> bool {
        self.dda
    }

    /// Noise flag (only ever set on voices 4 and 5)
    pub fn noise_channel(&self) -> bool {
        self.noise_channel
    }

    /// Noise playback frequency derived from the R7 selector
    pub fn noise_freq(&self) -> u16 {
        self.noise_freq
    }

    /// Last direct audio sample
    pub fn dda_value(&self) -> i16 {
        self.dda_value
    }

    /// Wavetable contents
    pub fn wave(&self) -> &[i16; WAVE_LENGTH] {
        &self.wave
    }

    /// Fractional playback position
    pub fn sample_offset(&self) -> f32 {
        self.sample_offset
    }

    /// Tone playback frequency in Hz, `None` when the period is too short to sound
    pub fn tone_frequency(&self, master_clock: u32) -> Option<u32> {
        if self.frequency <= 1 {
            None
        } else {
            Some(master_clock / (32 * u32::from(self.frequency)))
        }
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self::new()
    }
}
