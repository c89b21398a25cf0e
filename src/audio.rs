use std::f32::consts::TAU;

use ggez::audio;
use ggez::{Context, GameResult};

/// The two effects the game plays: a short high beep on eating and a low
/// beep on game over. Tones are synthesized at startup so the binary ships
/// no sound assets.
pub struct Sounds {
    pub eat: audio::Source,
    pub game_over: audio::Source,
}

impl Sounds {
    pub fn new(ctx: &mut Context, volume: f32) -> GameResult<Self> {
        Ok(Sounds {
            eat: source_from_tone(ctx, 880.0, 0.08, 0.35 * volume)?,
            game_over: source_from_tone(ctx, 110.0, 0.25, 0.6 * volume)?,
        })
    }
}

fn source_from_tone(
    ctx: &mut Context,
    frequency_hz: f32,
    duration_s: f32,
    volume: f32,
) -> GameResult<audio::Source> {
    let data = audio::SoundData::from_bytes(&tone(frequency_hz, duration_s, volume));
    audio::Source::from_data(ctx, data)
}

// PCM16 mono WAV at 44.1 kHz.
fn tone(frequency_hz: f32, duration_s: f32, volume: f32) -> Vec<u8> {
    const SAMPLE_RATE: u32 = 44_100;
    let sample_count = (duration_s * SAMPLE_RATE as f32) as u32;
    let data_len = sample_count * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * f32::from(i16::MAX);
    for n in 0..sample_count {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = (amplitude * (TAU * frequency_hz * t).sin()) as i16;
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}
