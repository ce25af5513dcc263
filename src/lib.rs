//! HuC6280 PSG Emulator for the PC Engine
//!
//! An emulation of the programmable sound generator embedded in the HuC6280
//! CPU of the PC Engine / TurboGrafx-16 / SuperGrafx. Six mixed voices play
//! user-programmed 32-step wavetables, direct (DDA) samples, or noise.
//!
//! Register writes arrive stamped with the CPU cycle they happened on and are
//! replayed during sample generation, so a write halfway through a frame is
//! heard halfway through that frame's audio buffer.
//!
//! # Features
//! - Deferred, cycle-timestamped register writes spliced into the frame buffer
//! - 6 mixed voices (8 addressable), noise on voices 4 and 5
//! - Stereo output with master and per-voice panning through the chip's volume curves
//! - Save-state snapshot/restore with JSON encoding
//! - WAV export of rendered frames
//!
//! # Quick start
//! ```no_run
//! use huc6280_psg::{Psg, SoundProvider};
//!
//! let mut psg = Psg::new();
//! psg.begin_frame(0);
//! psg.write_register(0, 0x00, 10); // select voice 0
//! psg.write_register(2, 0xFE, 20); // frequency low
//! psg.write_register(4, 0x9F, 30); // enable, full volume
//! psg.end_frame(119_318);
//!
//! let mut buffer = vec![0i16; 735 * 2];
//! psg.get_samples(&mut buffer);
//! ```

#![warn(missing_docs)]

pub mod backend; // Host audio pull interface
pub mod config;
pub mod export; // WAV rendering
pub mod huc6280; // HuC6280 PSG emulation (core)
pub mod voice_status;

/// Error types for PSG emulator operations
///
/// Emulation itself never fails; only configuration, save-state restore and
/// file output can.
#[derive(thiserror::Error, Debug)]
pub enum PsgError {
    /// Save state does not match this build's voice or wavetable layout
    #[error("State mismatch: {0}")]
    StateMismatch(String),

    /// Save state could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV writer error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, PsgError>;

// Public API exports
pub use backend::SoundProvider;
pub use config::PsgConfig;
pub use export::WavRecorder;
pub use huc6280::{Psg, PsgState, Register, Voice, VoiceMode};
pub use voice_status::{VoiceStatus, VoiceStatuses};
