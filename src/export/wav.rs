//! WAV file export functionality

use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const CHANNELS: u16 = 2;

/// Streams PSG frames into a 16-bit stereo WAV file
///
/// # Examples
///
/// ```no_run
/// use huc6280_psg::{Psg, WavRecorder};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut psg = Psg::new();
/// let mut recorder = WavRecorder::create("out.wav", 44_100)?;
///
/// let mut buffer = vec![0i16; 735 * 2];
/// psg.begin_frame(0);
/// psg.end_frame(119_318);
/// psg.get_samples(&mut buffer);
/// recorder.write_frame(&buffer)?;
///
/// recorder.finalize()?;
/// # Ok(())
/// # }
/// ```
pub struct WavRecorder {
    writer: hound::WavWriter<BufWriter<File>>,
    sample_rate: u32,
    frames_written: u64,
}

impl WavRecorder {
    /// Create the file at `path`, replacing any existing one
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self> {
        let spec = hound::WavSpec {
            channels: CHANNELS,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let writer = hound::WavWriter::create(path, spec)?;
        Ok(Self {
            writer,
            sample_rate,
            frames_written: 0,
        })
    }

    /// Append an interleaved stereo buffer
    ///
    /// A trailing unpaired sample is dropped.
    pub fn write_frame(&mut self, samples: &[i16]) -> Result<()> {
        if samples.len() % 2 != 0 {
            log::warn!(
                "WAV frame of {} samples is not stereo-aligned; dropping last sample",
                samples.len()
            );
        }
        for pair in samples.chunks_exact(2) {
            self.writer.write_sample(pair[0])?;
            self.writer.write_sample(pair[1])?;
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Frames appended so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Output sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration written so far, in seconds
    pub fn duration_secs(&self) -> f32 {
        self.writer.duration() as f32 / self.sample_rate as f32
    }

    /// Write the header and close the file
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize()?;
        Ok(())
    }
}
