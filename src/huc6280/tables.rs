//! HuC6280 PSG lookup tables
//!
//! Chip-accurate constants shared read-only by every engine instance. Output
//! parity with reference recordings depends on these exact values.

/// Samples in one voice wavetable period
pub const WAVE_LENGTH: usize = 32;

/// Samples in the shared noise waveform
pub const NOISE_WAVE_LENGTH: usize = WAVE_LENGTH * 128;

/// Attenuation amount for a 4-bit master volume or panning selector.
///
/// Selector 15 is no reduction, selector 0 removes the full 5-bit range.
pub const VOLUME_REDUCTION: [u8; 16] = [
    0x1F, 0x1D, 0x1B, 0x19, 0x17, 0x15, 0x13, 0x10, 0x0F, 0x0D, 0x0B, 0x09, 0x07, 0x05, 0x03, 0x00,
];

/// Perceptual gain (out of 255) for a combined 0-31 volume level.
///
/// Adjacent pairs share a value; the curve roughly doubles every eight steps.
pub const LOG_SCALE: [u8; 32] = [
    0, 0, 10, 10, 13, 13, 16, 16, 20, 20, 26, 26, 32, 32, 40, 40, 51, 51, 64, 64, 81, 81, 102, 102,
    128, 128, 161, 161, 203, 203, 255, 255,
];

/// Shared pseudo-random noise waveform played by noise-enabled voices
pub static NOISE_WAVE: [i16; NOISE_WAVE_LENGTH] = build_noise_wave();

/// 18-bit LFSR with taps at bits 0, 1, 11, 12 and 17, seeded with 1.
/// Each output bit becomes a full-scale or silent sample.
const fn build_noise_wave() -> [i16; NOISE_WAVE_LENGTH] {
    let mut wave = [0i16; NOISE_WAVE_LENGTH];
    let mut lfsr: u32 = 1;
    let mut i = 0;
    while i < NOISE_WAVE_LENGTH {
        if lfsr & 1 != 0 {
            wave[i] = i16::MAX;
        }
        let feedback = (lfsr ^ (lfsr >> 1) ^ (lfsr >> 11) ^ (lfsr >> 12) ^ (lfsr >> 17)) & 1;
        lfsr = (lfsr >> 1) | (feedback << 17);
        i += 1;
    }
    wave
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_reduction_monotonic_decreasing() {
        for i in 1..VOLUME_REDUCTION.len() {
            assert!(
                VOLUME_REDUCTION[i] < VOLUME_REDUCTION[i - 1],
                "VOLUME_REDUCTION[{}] ({}) >= VOLUME_REDUCTION[{}] ({})",
                i,
                VOLUME_REDUCTION[i],
                i - 1,
                VOLUME_REDUCTION[i - 1]
            );
        }
        assert_eq!(VOLUME_REDUCTION[0], 0x1F);
        assert_eq!(VOLUME_REDUCTION[15], 0x00);
    }

    #[test]
    fn test_log_scale_pairs() {
        for pair in LOG_SCALE.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
        assert_eq!(LOG_SCALE[0], 0);
        assert_eq!(LOG_SCALE[24], 128);
        assert_eq!(LOG_SCALE[31], 255);
    }

    #[test]
    fn test_noise_wave_is_two_level_and_mixed() {
        assert!(NOISE_WAVE.iter().all(|&s| s == 0 || s == i16::MAX));
        let high = NOISE_WAVE.iter().filter(|&&s| s == i16::MAX).count();
        assert!(
            (NOISE_WAVE_LENGTH / 4..NOISE_WAVE_LENGTH * 3 / 4).contains(&high),
            "noise waveform badly unbalanced: {high} high samples"
        );
        assert_eq!(NOISE_WAVE[0], i16::MAX);
    }
}
