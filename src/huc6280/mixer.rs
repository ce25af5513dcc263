//! HuC6280 PSG Output Mixer
//!
//! Splices a frame's output buffer at each queued write's sample position and
//! mixes every segment under the register state valid for it.
//!
//! Per voice and output channel, three attenuations are combined: master
//! volume and panning (both through [`VOLUME_REDUCTION`]) and the voice volume.
//! The remaining level selects a gain from [`LOG_SCALE`]. Voices are summed
//! into the buffer, never overwritten.

use super::chip::{Psg, MIXED_VOICES};
use super::tables::{LOG_SCALE, NOISE_WAVE, VOLUME_REDUCTION, WAVE_LENGTH};
use super::voice::Voice;
use crate::backend::SoundProvider;
use crate::config::PsgConfig;

/// Highest combined volume level
const MAX_LEVEL: i32 = 0x1F;

/// Per-voice headroom so six full-scale voices sum without clipping
const HEADROOM: f32 = 6.0;

/// Full scale of [`LOG_SCALE`]
const GAIN_SCALE: f32 = 255.0;

impl Psg {
    /// Mix the frame into an interleaved stereo buffer, applying queued writes at their positions
    ///
    /// The buffer is accumulated into, so callers normally pass a zeroed buffer.
    /// The frame must have been closed with `end_frame`.
    pub fn get_samples(&mut self, samples: &mut [i16]) {
        let len = samples.len();
        let mut start = 0;
        while let Some(cmd) = self.commands.pop() {
            let pos = self.frame.sample_position(cmd.time, len, start);
            self.mix_samples(&mut samples[start..pos]);
            start = pos;
            self.write_register_immediate(cmd.register, cmd.value);
        }
        self.mix_samples(&mut samples[start..]);
    }

    fn mix_samples(&mut self, segment: &mut [i16]) {
        if segment.is_empty() {
            return;
        }
        let config = self.config;
        for index in 0..MIXED_VOICES {
            if self.user_mute[index] {
                continue;
            }
            let levels = self.stereo_levels(&self.voices[index]);
            mix_voice(&mut self.voices[index], levels, segment, &config);
        }
    }

    /// Combined left/right volume levels (0-31) of a voice under the current master volume
    pub(crate) fn stereo_levels(&self, voice: &Voice) -> (usize, usize) {
        let reduction = |selector: u8| i32::from(VOLUME_REDUCTION[usize::from(selector & 0x0F)]);

        let global_left = reduction(self.main_volume_left);
        let global_right = reduction(self.main_volume_right);
        let pan_left = reduction(voice.panning >> 4);
        let pan_right = reduction(voice.panning & 0x0F);
        let volume_factor = MAX_LEVEL - i32::from(voice.volume);

        let left = (MAX_LEVEL - global_left - pan_left - volume_factor).clamp(0, MAX_LEVEL);
        let right = (MAX_LEVEL - global_right - pan_right - volume_factor).clamp(0, MAX_LEVEL);
        (left as usize, right as usize)
    }
}

/// Mix one voice into `segment` and advance its play position
fn mix_voice(
    voice: &mut Voice,
    levels: (usize, usize),
    segment: &mut [i16],
    config: &PsgConfig,
) {
    if !voice.enabled {
        return;
    }
    if !voice.dda && voice.volume == 0 {
        return;
    }

    let (wave, freq): (&[i16], u32) = if voice.noise_channel {
        (&NOISE_WAVE[..], u32::from(voice.noise_freq))
    } else if voice.dda {
        (&voice.wave[..], 0)
    } else {
        if voice.frequency <= 1 {
            return;
        }
        (&voice.wave[..], config.master_clock / (32 * u32::from(voice.frequency)))
    };

    // Noise frequency counts whole noise periods; tone frequency counts wavetable periods.
    // A zero frequency makes the period infinite and the step zero.
    let sample_rate = config.sample_rate as f32;
    let period_in_samples = if voice.noise_channel {
        sample_rate / (freq as f32 / (WAVE_LENGTH * 128) as f32)
    } else {
        sample_rate / freq as f32
    };
    let wave_len = wave.len() as f32;
    let step = wave_len / period_in_samples;

    let gain_left = LOG_SCALE[levels.0];
    let gain_right = LOG_SCALE[levels.1];
    let max_volume = f32::from(config.max_volume);

    let mut offset = voice.sample_offset;
    for pair in segment.chunks_exact_mut(2) {
        offset %= wave_len;
        let value = if voice.dda {
            voice.dda_value
        } else {
            wave[offset as usize]
        };

        pair[0] = pair[0].wrapping_add(scale_sample(value, gain_left, max_volume));
        pair[1] = pair[1].wrapping_add(scale_sample(value, gain_right, max_volume));

        offset += step;
        offset %= wave_len;
    }
    voice.sample_offset = offset;
}

/// Apply gain, headroom and the amplitude ceiling to one sample
#[inline]
fn scale_sample(value: i16, gain: u8, max_volume: f32) -> i16 {
    let product = (i32::from(value) * i32::from(gain)) as f32;
    (product / GAIN_SCALE / HEADROOM * max_volume / f32::from(i16::MAX)) as i16
}

impl SoundProvider for Psg {
    fn get_samples(&mut self, samples: &mut [i16]) {
        Psg::get_samples(self, samples)
    }

    fn discard_samples(&mut self) {
        Psg::discard_samples(self)
    }

    fn max_volume(&self) -> i16 {
        self.config.max_volume
    }

    fn set_max_volume(&mut self, max_volume: i16) {
        Psg::set_max_volume(self, max_volume)
    }
}
