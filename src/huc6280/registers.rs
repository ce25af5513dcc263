//! HuC6280 PSG Register Definitions
//!
//! The PSG decodes the low nibble of the bus address into ten registers.
//! Everything except the master volume and LFO registers acts on the voice
//! selected by the latch in register 0.

use std::fmt;

use bitflags::bitflags;

/// PSG Register Address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Voice select latch - R0
    VoiceSelect = 0x00,
    /// Master volume, left/right nibbles - R1
    MainVolume = 0x01,
    /// Latched voice frequency (low byte) - R2
    FreqLo = 0x02,
    /// Latched voice frequency (high nibble) - R3
    FreqHi = 0x03,
    /// Latched voice enable / DDA / volume - R4
    VoiceControl = 0x04,
    /// Latched voice panning, left/right nibbles - R5
    Panning = 0x05,
    /// Wavetable data or direct sample - R6
    WaveData = 0x06,
    /// Noise enable and frequency (voices 4-5 only) - R7
    NoiseControl = 0x07,
    /// LFO frequency - R8
    LfoFreq = 0x08,
    /// LFO control - R9
    LfoControl = 0x09,
}

impl Register {
    /// Convert a raw register number to Register enum
    ///
    /// Only the low nibble is decoded; indices 10-15 have no register behind them.
    pub fn from_addr(addr: u8) -> Option<Self> {
        match addr & 0x0F {
            0x00 => Some(Register::VoiceSelect),
            0x01 => Some(Register::MainVolume),
            0x02 => Some(Register::FreqLo),
            0x03 => Some(Register::FreqHi),
            0x04 => Some(Register::VoiceControl),
            0x05 => Some(Register::Panning),
            0x06 => Some(Register::WaveData),
            0x07 => Some(Register::NoiseControl),
            0x08 => Some(Register::LfoFreq),
            0x09 => Some(Register::LfoControl),
            _ => None,
        }
    }

    /// Get the register address value
    pub fn addr(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::VoiceSelect => write!(f, "R0 (Voice Select)"),
            Register::MainVolume => write!(f, "R1 (Main Volume)"),
            Register::FreqLo => write!(f, "R2 (Frequency Low)"),
            Register::FreqHi => write!(f, "R3 (Frequency High)"),
            Register::VoiceControl => write!(f, "R4 (Voice Control)"),
            Register::Panning => write!(f, "R5 (Panning)"),
            Register::WaveData => write!(f, "R6 (Wave Data)"),
            Register::NoiseControl => write!(f, "R7 (Noise Control)"),
            Register::LfoFreq => write!(f, "R8 (LFO Frequency)"),
            Register::LfoControl => write!(f, "R9 (LFO Control)"),
        }
    }
}

/// Volume field of the voice control register (R4)
pub const VOICE_VOLUME_MASK: u8 = 0x1F;

/// Frequency selector field of the noise control register (R7)
pub const NOISE_FREQ_MASK: u8 = 0x1F;

/// Tone period width
pub const FREQUENCY_MASK: u16 = 0x0FFF;

bitflags! {
    /// Voice Control Register (R4) flag bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VoiceControlFlags: u8 {
        /// Direct audio (DDA) mode
        const DDA = 0x40;
        /// Voice enable (key on)
        const ENABLE = 0x80;
    }
}

bitflags! {
    /// Noise Control Register (R7) flag bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NoiseControlFlags: u8 {
        /// Noise output enable
        const ENABLE = 0x80;
    }
}

bitflags! {
    /// LFO Control Register (R9) bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LfoControlFlags: u8 {
        /// Modulation depth / mode (0 = off)
        const MODE = 0x03;
        /// LFO halt/reset
        const RESET = 0x80;
    }
}

impl LfoControlFlags {
    /// Whether this control value engages frequency modulation of voice 0 by voice 1
    pub fn engages_modulation(&self) -> bool {
        !self.contains(LfoControlFlags::RESET) && self.intersects(LfoControlFlags::MODE)
    }
}
