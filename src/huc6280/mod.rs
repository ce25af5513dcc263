//! HuC6280 PSG Emulation Domain
//!
//! The sound generator built into the PC Engine's HuC6280 CPU: eight
//! wavetable voices (six audible), noise on voices 4-5, direct sample output,
//! and stereo master/voice panning.
//!
//! Implementation:
//! - `chip` - Frame controller and register decoder
//! - `mixer` - Timestamp-spliced sample generation
//! - `timing` - Deferred write queue and frame bounds

// Internal modules
pub mod chip;
pub mod mixer;
pub mod registers;
pub mod state;
pub mod tables;
pub mod timing;
pub mod voice;

// Re-export public API
pub use chip::{Psg, MIXED_VOICES, VOICE_COUNT};
pub use registers::Register;
pub use state::{NoiseSnapshot, PsgState, VoiceSnapshot};
pub use timing::QueuedCommand;
pub use voice::{Voice, VoiceMode};
