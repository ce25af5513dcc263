//! Audio export
//!
//! Records interleaved stereo frames from the PSG to disk.

pub mod wav;

pub use wav::WavRecorder;
