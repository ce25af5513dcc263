//! psg-render: render a scripted HuC6280 PSG demo to a WAV file
//!
//! Usage: `psg-render <out.wav> [frames]`

use std::env;
use std::process;

use anyhow::{bail, Context, Result};
use huc6280_psg::{Psg, PsgConfig, Register, WavRecorder};

/// NTSC PC Engine CPU clock
const CPU_CLOCK_HZ: u64 = 7_159_090;
const FRAME_RATE: f64 = 59.94;
const DEFAULT_FRAMES: u32 = 300;

/// Tone periods for an A minor arpeggio (A4, C5, E5, A5)
const ARPEGGIO: [u16; 4] = [254, 214, 170, 127];
const NOTE_FRAMES: u32 = 15;

/// Direct audio writes per frame on the DDA voice
const DDA_WRITES_PER_FRAME: u64 = 16;

const TONE_VOICE: u8 = 0;
const DDA_VOICE: u8 = 2;
const NOISE_VOICE: u8 = 4;

/// Queues writes for one frame, addressing voices through the select latch
struct FrameScript<'a> {
    psg: &'a mut Psg,
    latch: Option<u8>,
}

impl FrameScript<'_> {
    fn write(&mut self, register: Register, value: u8, cycle: u64) {
        self.psg.write_register(register.addr(), value, cycle);
    }

    fn voice(&mut self, voice: u8, register: Register, value: u8, cycle: u64) {
        if self.latch != Some(voice) {
            self.write(Register::VoiceSelect, voice, cycle);
            self.latch = Some(voice);
        }
        self.write(register, value, cycle);
    }
}

fn parse_args() -> Result<(String, u32)> {
    let mut args = env::args().skip(1);
    let Some(output) = args.next() else {
        bail!("missing output path");
    };
    let frames = match args.next() {
        Some(value) => value
            .parse::<u32>()
            .with_context(|| format!("invalid frame count: {value}"))?,
        None => DEFAULT_FRAMES,
    };
    if args.next().is_some() {
        bail!("too many arguments");
    }
    Ok((output, frames))
}

/// Triangle wave in 5-bit wavetable steps
fn triangle_wave() -> impl Iterator<Item = u8> {
    (0..32u8).map(|i| if i < 16 { i * 2 } else { (31 - i) * 2 + 1 })
}

fn setup(script: &mut FrameScript<'_>, cycle: u64) {
    script.write(Register::MainVolume, 0xFF, cycle);

    script.voice(TONE_VOICE, Register::VoiceControl, 0x00, cycle);
    for sample in triangle_wave() {
        script.voice(TONE_VOICE, Register::WaveData, sample, cycle);
    }
    script.voice(TONE_VOICE, Register::Panning, 0xFC, cycle);
    script.voice(TONE_VOICE, Register::VoiceControl, 0x9C, cycle);

    script.voice(DDA_VOICE, Register::Panning, 0xCF, cycle);
    script.voice(DDA_VOICE, Register::VoiceControl, 0xD4, cycle);

    script.voice(NOISE_VOICE, Register::Panning, 0xEE, cycle);
    script.voice(NOISE_VOICE, Register::NoiseControl, 0x80 | 0x18, cycle);
}

fn script_frame(script: &mut FrameScript<'_>, frame: u32, start: u64, length: u64) {
    if frame % NOTE_FRAMES == 0 {
        let period = ARPEGGIO[(frame / NOTE_FRAMES) as usize % ARPEGGIO.len()];
        let mid = start + length / 2;
        script.voice(TONE_VOICE, Register::FreqLo, (period & 0xFF) as u8, mid);
        script.voice(TONE_VOICE, Register::FreqHi, (period >> 8) as u8, mid);
    }

    // Short noise hit on every beat
    match frame % (NOTE_FRAMES * 2) {
        0 => script.voice(NOISE_VOICE, Register::VoiceControl, 0x98, start),
        4 => script.voice(NOISE_VOICE, Register::VoiceControl, 0x00, start),
        _ => {}
    }

    // Slow sawtooth through the direct audio port
    for step in 0..DDA_WRITES_PER_FRAME {
        let cycle = start + length * step / DDA_WRITES_PER_FRAME;
        let value = ((u64::from(frame) * DDA_WRITES_PER_FRAME + step) % 32) as u8;
        script.voice(DDA_VOICE, Register::WaveData, value, cycle);
    }
}

fn run() -> Result<()> {
    let (output, frames) = parse_args()?;

    let config = PsgConfig::default();
    let mut psg = Psg::with_config(config).context("invalid PSG configuration")?;
    let mut recorder = WavRecorder::create(&output, config.sample_rate)
        .with_context(|| format!("cannot create {output}"))?;

    let cycles_per_frame = (CPU_CLOCK_HZ as f64 / FRAME_RATE) as u64;
    let samples_per_frame = f64::from(config.sample_rate) / FRAME_RATE;

    println!("HuC6280 PSG Renderer");
    println!("====================\n");
    println!(
        "Rendering {} frames ({:.1}s) at {} Hz to {}...",
        frames,
        f64::from(frames) / FRAME_RATE,
        config.sample_rate,
        output
    );

    let mut cycle = 0u64;
    let mut sample_debt = 0.0f64;
    let mut buffer = Vec::new();
    for frame in 0..frames {
        psg.begin_frame(cycle);
        {
            let mut script = FrameScript {
                psg: &mut psg,
                latch: None,
            };
            if frame == 0 {
                setup(&mut script, cycle);
            }
            script_frame(&mut script, frame, cycle, cycles_per_frame);
        }
        cycle += cycles_per_frame;
        psg.end_frame(cycle);

        sample_debt += samples_per_frame;
        let pairs = sample_debt as usize;
        sample_debt -= pairs as f64;

        buffer.clear();
        buffer.resize(pairs * 2, 0);
        psg.get_samples(&mut buffer);
        recorder.write_frame(&buffer)?;

        if (frame + 1) % 60 == 0 {
            println!("  {} / {} frames", frame + 1, frames);
        }
    }

    let duration = recorder.duration_secs();
    recorder.finalize()?;
    println!("\nWrote {duration:.2}s of audio. Export complete!");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        eprintln!("Usage: psg-render <out.wav> [frames]");
        process::exit(1);
    }
}
