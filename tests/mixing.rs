//! Voice mixing: silence conditions, noise gating, additivity and determinism

use huc6280_psg::{Psg, VoiceMode};

const FRAME_CYCLES: u64 = 119_437;

fn select(psg: &mut Psg, voice: u8) {
    psg.write_register_immediate(0, voice);
}

/// Square wavetable tone at full volume, panned center
fn tone_voice(psg: &mut Psg, voice: u8, period: u16) {
    psg.write_register_immediate(1, 0xFF);
    select(psg, voice);
    for i in 0..32u8 {
        psg.write_register_immediate(6, if i < 16 { 31 } else { 0 });
    }
    psg.write_register_immediate(2, (period & 0xFF) as u8);
    psg.write_register_immediate(3, (period >> 8) as u8);
    psg.write_register_immediate(5, 0xFF);
    psg.write_register_immediate(4, 0x9F);
}

fn dda_voice(psg: &mut Psg, voice: u8, level: u8) {
    psg.write_register_immediate(1, 0xFF);
    select(psg, voice);
    psg.write_register_immediate(5, 0xDD);
    psg.write_register_immediate(4, 0xDA);
    psg.write_register_immediate(6, level);
}

fn render(psg: &mut Psg, len: usize) -> Vec<i16> {
    let mut buffer = vec![0i16; len];
    psg.begin_frame(0);
    psg.end_frame(FRAME_CYCLES);
    psg.get_samples(&mut buffer);
    buffer
}

fn is_silent(buffer: &[i16]) -> bool {
    buffer.iter().all(|&s| s == 0)
}

#[test]
fn fresh_psg_is_silent() {
    let mut psg = Psg::new();
    assert!(is_silent(&render(&mut psg, 1470)));
}

#[test]
fn disabled_voice_is_silent() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 0, 0x100);
    psg.write_register_immediate(4, 0x1F);
    assert!(is_silent(&render(&mut psg, 512)));
}

#[test]
fn zero_volume_tone_is_silent() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 0, 0x100);
    psg.write_register_immediate(4, 0x80);
    assert!(is_silent(&render(&mut psg, 512)));
}

#[test]
fn zero_master_volume_is_silent() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 0, 0x100);
    psg.write_register_immediate(1, 0x00);
    assert!(is_silent(&render(&mut psg, 512)));
}

#[test]
fn voices_six_and_seven_are_not_mixed() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 6, 0x100);
    tone_voice(&mut psg, 7, 0x100);
    assert_eq!(psg.voice(6).map(|v| v.mode()), Some(VoiceMode::Tone));
    assert!(is_silent(&render(&mut psg, 512)));
}

#[test]
fn lfo_engagement_mutes_voice_one() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 1, 0x100);
    assert!(!is_silent(&render(&mut psg, 512)));

    psg.write_register_immediate(9, 0x02);
    assert!(is_silent(&render(&mut psg, 512)));
}

#[test]
fn noise_request_ignored_below_voice_four() {
    let mut plain = Psg::new();
    tone_voice(&mut plain, 3, 0x80);

    let mut noisy = Psg::new();
    tone_voice(&mut noisy, 3, 0x80);
    noisy.write_register_immediate(7, 0x9F);

    assert_eq!(noisy.voice(3).map(|v| v.mode()), Some(VoiceMode::Tone));
    assert_eq!(render(&mut plain, 1024), render(&mut noisy, 1024));
}

#[test]
fn noise_voice_plays_binary_levels() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 4, 0x80);
    psg.write_register_immediate(7, 0x9F);
    assert_eq!(psg.voice(4).map(|v| v.mode()), Some(VoiceMode::Noise));

    let buffer = render(&mut psg, 2048);
    // i16::MAX through full gain and six-voice headroom
    let high = 5461;
    assert!(buffer.iter().all(|&s| s == 0 || s == high));
    assert!(buffer.contains(&0));
    assert!(buffer.contains(&high));
}

#[test]
fn voices_sum_into_the_buffer() {
    let mut tone_only = Psg::new();
    tone_voice(&mut tone_only, 0, 0x90);

    let mut dda_only = Psg::new();
    dda_voice(&mut dda_only, 3, 24);

    let mut both = Psg::new();
    tone_voice(&mut both, 0, 0x90);
    dda_voice(&mut both, 3, 24);

    let a = render(&mut tone_only, 1470);
    let b = render(&mut dda_only, 1470);
    let mixed = render(&mut both, 1470);

    for ((&x, &y), &sum) in a.iter().zip(&b).zip(&mixed) {
        assert_eq!(x.wrapping_add(y), sum);
    }
    assert!(!is_silent(&b));
}

#[test]
fn panning_splits_channels() {
    let mut psg = Psg::new();
    tone_voice(&mut psg, 0, 0x100);
    // Left full, right muted
    psg.write_register_immediate(5, 0xF0);
    let buffer = render(&mut psg, 1024);
    assert!(buffer.chunks(2).all(|pair| pair[1] == 0));
    assert!(buffer.chunks(2).any(|pair| pair[0] != 0));
}

#[test]
fn rendering_is_deterministic() {
    let script = |psg: &mut Psg| {
        tone_voice(psg, 0, 0x123);
        tone_voice(psg, 5, 0x80);
        psg.write_register_immediate(7, 0x8C);
        dda_voice(psg, 2, 7);
    };

    let mut first = Psg::new();
    let mut second = Psg::new();
    script(&mut first);
    script(&mut second);

    for _ in 0..4 {
        assert_eq!(render(&mut first, 1470), render(&mut second, 1470));
    }
}

#[test]
fn wavetable_upload_wraps_after_32_writes() {
    let mut psg = Psg::new();
    for _ in 0..32 {
        psg.write_register_immediate(6, 5);
    }
    psg.write_register_immediate(6, 20);

    let wave = psg.voice(0).map(|v| *v.wave()).unwrap_or([0; 32]);
    assert_eq!(wave[0], (20i32 * 2047 - 32767) as i16);
    assert_eq!(wave[1], 5 * 2047 - 32767);
    assert_eq!(psg.wave_write_cursor(), 1);
}

#[test]
fn direct_audio_on_noise_voice_holds_sample_and_advances_noise_phase() {
    let mut psg = Psg::new();
    psg.write_register_immediate(1, 0xFF);
    select(&mut psg, 5);
    psg.write_register_immediate(5, 0xFF);
    psg.write_register_immediate(7, 0x9F);
    psg.write_register_immediate(4, 0xDF);
    psg.write_register_immediate(6, 31);

    let voice = psg.voice(5).copied().unwrap_or_default();
    assert_eq!(voice.mode(), VoiceMode::DirectAudio);
    assert!(voice.noise_channel());
    assert_eq!(voice.dda_value(), (31i32 * 2047 - 32767) as i16);

    let buffer = render(&mut psg, 1024);
    assert!(buffer[0] > 0);
    assert!(buffer.iter().all(|&s| s == buffer[0]));
    assert!(psg.voice(5).map_or(0.0, |v| v.sample_offset()) > 0.0);
}
