use std::f32::consts::PI;

/// Mono sine tone
pub fn sine(freq_hz: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Interleaved signal with a different tone on each channel
/// Channel `c` carries `freqs_hz[c]`
#[allow(dead_code)]
pub fn tone_per_channel(freqs_hz: &[f32], sample_rate: u32, frames: usize) -> Vec<f32> {
    let tones: Vec<Vec<f32>> = freqs_hz
        .iter()
        .map(|&f| sine(f, sample_rate, frames))
        .collect();

    let mut samples = Vec::with_capacity(frames * freqs_hz.len());
    for i in 0..frames {
        for tone in &tones {
            samples.push(tone[i]);
        }
    }
    samples
}

/// 0, 1, 2, .. as floats
#[allow(dead_code)]
pub fn ramp(len: usize) -> Vec<f32> {
    (0..len).map(|i| i as f32).collect()
}
