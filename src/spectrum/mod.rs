//! Spectrum analysis helpers
//!
//! A [`SpectrumTransform`] turns one fixed-size real frame into the same
//! number of frequency bins. Bin `k` of an `n`-point frame sampled at
//! `sample_rate` Hz sits at `k * sample_rate / n` Hz; only bins up to `n / 2`
//! (Nyquist) carry distinct information for real input.

pub mod transform;

pub use transform::{FftTransform, SpectrumTransform};

/// Centre frequency in Hz of `bin` for an `size`-point transform
pub fn bin_frequency(bin: usize, sample_rate: u32, size: usize) -> f32 {
    bin as f32 * sample_rate as f32 / size as f32
}

/// Strongest bin between the first non-DC bin and Nyquist
///
/// Returns `(bin, value)`, or `None` when the frame has no bins above DC.
pub fn peak_bin(frame: &[f32]) -> Option<(usize, f32)> {
    let nyquist = frame.len() / 2;
    if nyquist == 0 {
        return None;
    }

    frame[1..=nyquist]
        .iter()
        .enumerate()
        .map(|(i, &v)| (i + 1, v))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Root mean square of a sample slice (0 for an empty slice)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}
