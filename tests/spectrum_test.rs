mod test_signals;

use approx::assert_relative_eq;

use pcmbuf::config::SpectrumScale;
use pcmbuf::constants::FFT_BUFFER_SIZE;
use pcmbuf::spectrum::{FftTransform, SpectrumTransform, bin_frequency, peak_bin};
use pcmbuf::{BufferError, SampleBuffer};

/// Wraps a transform and counts invocations
struct CountingTransform {
    inner: FftTransform,
    calls: usize,
}

impl CountingTransform {
    fn new(size: usize) -> Self {
        Self {
            inner: FftTransform::new(size, SpectrumScale::Power),
            calls: 0,
        }
    }
}

impl SpectrumTransform for CountingTransform {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn transform(&mut self, input: &[f32], output: &mut [f32]) {
        self.calls += 1;
        self.inner.transform(input, output);
    }
}

fn direct(samples: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0; samples.len()];
    FftTransform::new(samples.len(), SpectrumScale::Power).transform(samples, &mut out);
    out
}

fn assert_frames_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(*a, *e, epsilon = 1e-2, max_relative = 1e-4);
    }
}

#[test]
fn test_fft_fails_with_too_few_frames() {
    // 2000 stereo samples = 1000 frames < 1024
    let mut buffer = SampleBuffer::new();
    buffer.copy(&test_signals::ramp(2000));
    let before = buffer.as_slice().to_vec();

    let mut transform = CountingTransform::new(1024);
    let mut output = vec![7.0; 1024];
    let result = buffer.fft_with(&mut transform, 0, &mut output);

    assert!(matches!(
        result,
        Err(BufferError::InsufficientData {
            needed: 1024,
            available: 1000
        })
    ));
    assert_eq!(transform.calls, 0);
    assert!(output.iter().all(|&v| v == 7.0));
    assert_eq!(buffer.as_slice(), before.as_slice());
}

#[test]
fn test_fft_fails_with_wrong_output_size() {
    let mut buffer = SampleBuffer::new();
    buffer.copy(&vec![0.1; FFT_BUFFER_SIZE * 4]);

    let mut output = vec![0.0; FFT_BUFFER_SIZE * 2];
    assert!(matches!(
        buffer.fft(&mut output),
        Err(BufferError::FrameSizeMismatch { .. })
    ));
    assert!(output.iter().all(|&v| v == 0.0));
}

#[test]
fn test_single_window_is_direct_transform_of_first_channel() {
    let sample_rate = 44100;
    let left = bin_frequency(10, sample_rate, FFT_BUFFER_SIZE);
    let right = bin_frequency(60, sample_rate, FFT_BUFFER_SIZE);
    let interleaved = test_signals::tone_per_channel(&[left, right], sample_rate, FFT_BUFFER_SIZE);

    let mut buffer = SampleBuffer::new();
    buffer.copy(&interleaved);

    let mut output = vec![0.0; FFT_BUFFER_SIZE];
    buffer.fft(&mut output).unwrap();

    let channel0: Vec<f32> = interleaved.iter().step_by(2).copied().collect();
    assert_frames_close(&output, &direct(&channel0));
    assert_eq!(peak_bin(&output).map(|(bin, _)| bin), Some(10));
}

#[test]
fn test_fft_channel_selects_channel() {
    let sample_rate = 48000;
    let size = 256;
    let freqs = [
        bin_frequency(5, sample_rate, size),
        bin_frequency(17, sample_rate, size),
        bin_frequency(40, sample_rate, size),
    ];

    let mut buffer = SampleBuffer::new();
    buffer.set_channels(3).unwrap();
    buffer.copy(&test_signals::tone_per_channel(&freqs, sample_rate, size * 2));

    let mut transform = FftTransform::new(size, SpectrumScale::Magnitude);
    let mut output = vec![0.0; size];
    for (channel, bin) in [5, 17, 40].into_iter().enumerate() {
        buffer.fft_with(&mut transform, channel, &mut output).unwrap();
        assert_eq!(peak_bin(&output).map(|(b, _)| b), Some(bin));
    }
}

#[test]
fn test_windows_fold_with_running_pairwise_average() {
    // Later windows weigh more: ((A + B) / 2 + C) / 2, not (A + B + C) / 3
    let size = 64;
    let a = test_signals::sine(bin_frequency(3, 8000, size), 8000, size);
    let b: Vec<f32> = test_signals::sine(bin_frequency(9, 8000, size), 8000, size)
        .iter()
        .map(|v| v * 0.5)
        .collect();
    let c = test_signals::ramp(size);

    let mut buffer = SampleBuffer::new();
    buffer.set_channels(1).unwrap();
    buffer.copy(&a);
    buffer.append(&b);
    buffer.append(&c);

    let mut transform = CountingTransform::new(size);
    let mut output = vec![0.0; size];
    buffer.fft_with(&mut transform, 0, &mut output).unwrap();

    let (fa, fb, fc) = (direct(&a), direct(&b), direct(&c));
    let expected: Vec<f32> = (0..size)
        .map(|j| ((fa[j] + fb[j]) / 2.0 + fc[j]) / 2.0)
        .collect();

    assert_eq!(transform.calls, 3);
    assert_frames_close(&output, &expected);
}

#[test]
fn test_partial_trailing_window_is_ignored() {
    let size = 32;
    let mut buffer = SampleBuffer::new();
    buffer.set_channels(1).unwrap();
    buffer.copy(&test_signals::sine(500.0, 8000, size * 2 + size / 2));

    let mut transform = CountingTransform::new(size);
    let mut output = vec![0.0; size];
    buffer.fft_with(&mut transform, 0, &mut output).unwrap();

    assert_eq!(transform.calls, 2);
}

#[test]
fn test_stereo_multiple_windows_fills_whole_frame() {
    let sample_rate = 44100;
    let freq = bin_frequency(32, sample_rate, FFT_BUFFER_SIZE);
    let interleaved =
        test_signals::tone_per_channel(&[freq, freq], sample_rate, FFT_BUFFER_SIZE * 3);

    let mut buffer = SampleBuffer::new();
    buffer.copy(&interleaved);
    assert_eq!(buffer.samples(), 2 * FFT_BUFFER_SIZE * 3);

    let mut output = vec![-1.0; FFT_BUFFER_SIZE];
    buffer.fft(&mut output).unwrap();

    assert!(output.iter().all(|&v| v >= 0.0));
    assert_eq!(peak_bin(&output).map(|(bin, _)| bin), Some(32));
}
