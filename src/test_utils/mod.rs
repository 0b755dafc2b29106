use std::f32::consts::PI;

/// Interleaved sine tone at full scale, identical on every channel
pub fn sine_interleaved(freq_hz: f32, sample_rate: u32, channels: u16, frames: usize) -> Vec<f32> {
    let mut samples = Vec::with_capacity(frames * channels as usize);
    for i in 0..frames {
        let value = (2.0 * PI * freq_hz * i as f32 / sample_rate as f32).sin();
        for _ in 0..channels {
            samples.push(value);
        }
    }
    samples
}
