//! HuC6280 PSG engine: frame controller and register decoder
//!
//! Register writes are never applied when they are made. `write_register`
//! logs them with a cycle offset; `get_samples` replays the log while mixing
//! so every write is heard from the sample position matching its cycle.

use super::registers::{
    LfoControlFlags, NoiseControlFlags, Register, VoiceControlFlags, FREQUENCY_MASK,
    NOISE_FREQ_MASK, VOICE_VOLUME_MASK,
};
use super::tables::WAVE_LENGTH;
use super::timing::{CommandQueue, FrameWindow, QueuedCommand};
use super::voice::Voice;
use crate::config::PsgConfig;
use crate::Result;

/// Addressable voices
pub const VOICE_COUNT: usize = 8;

/// Voices that reach the output
pub const MIXED_VOICES: usize = 6;

/// First voice able to play noise
pub const FIRST_NOISE_VOICE: usize = 4;

/// Voice silenced while the LFO is engaged
const LFO_VOICE: usize = 1;

/// HuC6280 programmable sound generator
#[derive(Clone)]
pub struct Psg {
    pub(crate) config: PsgConfig,
    pub(crate) voices: [Voice; VOICE_COUNT],
    pub(crate) user_mute: [bool; VOICE_COUNT],
    pub(crate) voice_latch: u8,
    pub(crate) wave_write_offset: u8,
    pub(crate) main_volume_left: u8,
    pub(crate) main_volume_right: u8,
    pub(crate) commands: CommandQueue,
    pub(crate) frame: FrameWindow,
}

impl Psg {
    /// Create a PSG with the reference clocks (3.58 MHz, 44.1 kHz output)
    pub fn new() -> Self {
        Self::build(PsgConfig::default())
    }

    /// Create a PSG with a custom configuration
    pub fn with_config(config: PsgConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PsgConfig) -> Self {
        Self {
            config,
            voices: [Voice::new(); VOICE_COUNT],
            user_mute: [false; VOICE_COUNT],
            voice_latch: 0,
            wave_write_offset: 0,
            main_volume_left: 0,
            main_volume_right: 0,
            commands: CommandQueue::new(),
            frame: FrameWindow::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PsgConfig {
        &self.config
    }

    /// Return to power-on state
    ///
    /// Pending writes are dropped. The user mute mask and configuration are kept.
    pub fn reset(&mut self) {
        self.voices = [Voice::new(); VOICE_COUNT];
        self.voice_latch = 0;
        self.wave_write_offset = 0;
        self.main_volume_left = 0;
        self.main_volume_right = 0;
        self.commands.clear();
        self.frame = FrameWindow::default();
    }

    /// Start a frame at `cycle`
    ///
    /// Anything still queued from the previous frame is applied immediately
    /// in issue order before the new origin is recorded.
    pub fn begin_frame(&mut self, cycle: u64) {
        if !self.commands.is_empty() {
            log::debug!(
                "PSG flushing {} writes left over from previous frame",
                self.commands.len()
            );
        }
        while let Some(cmd) = self.commands.pop() {
            self.write_register_immediate(cmd.register, cmd.value);
        }
        self.frame.start = cycle;
    }

    /// End the frame at `cycle`
    pub fn end_frame(&mut self, cycle: u64) {
        self.frame.stop = cycle;
        log::debug!(
            "PSG frame {}..{} with {} queued writes",
            self.frame.start,
            self.frame.stop,
            self.commands.len()
        );
    }

    /// Record a register write made at `cycle`; it takes effect during sample generation
    pub fn write_register(&mut self, register: u8, value: u8, cycle: u64) {
        self.commands.push(QueuedCommand {
            register,
            value,
            time: self.frame.offset_of(cycle),
        });
    }

    /// Apply a register write to the register file now
    pub fn write_register_immediate(&mut self, register: u8, value: u8) {
        let Some(reg) = Register::from_addr(register) else {
            log::trace!("PSG write to unmapped register {register:#03X}: {value:02X}");
            return;
        };
        log::trace!("PSG write {reg}: {value:02X}");

        let latch = self.voice_latch as usize;
        match reg {
            Register::VoiceSelect => {
                self.voice_latch = value & 0x07;
            }
            Register::MainVolume => {
                self.main_volume_left = (value >> 4) & 0x0F;
                self.main_volume_right = value & 0x0F;
            }
            Register::FreqLo => {
                let voice = &mut self.voices[latch];
                voice.frequency = (voice.frequency & 0xFF00) | u16::from(value);
            }
            Register::FreqHi => {
                let voice = &mut self.voices[latch];
                voice.frequency =
                    ((voice.frequency & 0x00FF) | (u16::from(value) << 8)) & FREQUENCY_MASK;
            }
            Register::VoiceControl => {
                let flags = VoiceControlFlags::from_bits_truncate(value);
                let voice = &mut self.voices[latch];
                voice.volume = value & VOICE_VOLUME_MASK;
                voice.enabled = flags.contains(VoiceControlFlags::ENABLE);
                voice.dda = flags.contains(VoiceControlFlags::DDA);
                if !voice.enabled && voice.dda {
                    // Likely start of a new note; restart the upload cursor for the debugger view.
                    self.wave_write_offset = 0;
                }
            }
            Register::Panning => {
                self.voices[latch].panning = value;
            }
            Register::WaveData => {
                // Bit-truncating cast: the chip only sends 5-bit data, wider values wrap.
                let sample = (i32::from(value) * 2047 - 32767) as i16;
                let voice = &mut self.voices[latch];
                if voice.dda {
                    voice.dda_value = sample;
                } else {
                    voice.wave[self.wave_write_offset as usize] = sample;
                    self.wave_write_offset = (self.wave_write_offset + 1) % WAVE_LENGTH as u8;
                }
            }
            Register::NoiseControl => {
                let flags = NoiseControlFlags::from_bits_truncate(value);
                let mut selector = value & NOISE_FREQ_MASK;
                if selector == NOISE_FREQ_MASK {
                    selector -= 1;
                }
                let divisor = 64 * (u32::from(NOISE_FREQ_MASK) - u32::from(selector));
                let voice = &mut self.voices[latch];
                voice.noise_channel =
                    flags.contains(NoiseControlFlags::ENABLE) && latch >= FIRST_NOISE_VOICE;
                voice.noise_freq =
                    (self.config.master_clock / divisor).min(u32::from(u16::MAX)) as u16;
            }
            Register::LfoFreq => {
                // LFO frequency modulation is not emulated.
            }
            Register::LfoControl => {
                let engaged = LfoControlFlags::from_bits_truncate(value).engages_modulation();
                if engaged {
                    log::debug!("PSG LFO engaged (control {value:02X}); muting voice {LFO_VOICE}");
                }
                self.voices[LFO_VOICE].enabled = !engaged;
            }
        }
    }

    /// Drop this frame's audio; queued writes stay queued for the next flush
    pub fn discard_samples(&mut self) {
        log::trace!(
            "PSG frame discarded, {} writes remain queued",
            self.commands.len()
        );
    }

    /// Mute or unmute a voice in the mix (0-7)
    pub fn set_voice_mute(&mut self, voice: usize, mute: bool) {
        if let Some(slot) = self.user_mute.get_mut(voice) {
            *slot = mute;
        }
    }

    /// Check if a voice is muted in the mix
    pub fn is_voice_muted(&self, voice: usize) -> bool {
        self.user_mute.get(voice).copied().unwrap_or(false)
    }

    /// Voice register file (0-7)
    pub fn voice(&self, index: usize) -> Option<&Voice> {
        self.voices.get(index)
    }

    /// Voice targeted by per-voice registers
    pub fn voice_latch(&self) -> u8 {
        self.voice_latch
    }

    /// Master volume selectors (left, right)
    pub fn main_volume(&self) -> (u8, u8) {
        (self.main_volume_left, self.main_volume_right)
    }

    /// Position of the next wavetable upload
    pub fn wave_write_cursor(&self) -> u8 {
        self.wave_write_offset
    }

    /// Writes recorded but not yet applied
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Change the output amplitude ceiling
    pub fn set_max_volume(&mut self, max_volume: i16) {
        self.config.max_volume = max_volume;
    }
}

impl Default for Psg {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Psg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Psg")
            .field("voice_latch", &self.voice_latch)
            .field("main_volume_left", &self.main_volume_left)
            .field("main_volume_right", &self.main_volume_right)
            .field("wave_write_offset", &self.wave_write_offset)
            .field("pending_commands", &self.commands.len())
            .field("frame", &self.frame)
            .finish()
    }
}
