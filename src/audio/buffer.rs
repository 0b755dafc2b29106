use std::ops::Range;
use std::sync::{Arc, Mutex};

use crate::config::{FormatConfig, SpectrumScale};
use crate::constants::{BYTES_PER_SAMPLE, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, FFT_BUFFER_SIZE};
use crate::error::{BufferError, Result};
use crate::spectrum::{FftTransform, SpectrumTransform};

/// Shared handle used to pass buffers between pipeline stages
pub type BufferPtr = Arc<Mutex<SampleBuffer>>;

/// Interleaved 32-bit float PCM samples with format and playback position
///
/// The buffer tracks a logical length ([`samples`](Self::samples)) separately
/// from the size of its backing store ([`capacity`](Self::capacity)). The
/// backing store only ever grows, so a buffer that is refilled repeatedly
/// settles at the largest size it has held and stops reallocating.
///
/// Samples are interleaved by channel: frame 0 is `[ch0, ch1, ..]`, frame 1
/// follows, and so on. Changing the channel count does not reinterleave
/// existing content.
///
/// # Example
/// ```
/// use pcmbuf::audio::SampleBuffer;
///
/// let mut buffer = SampleBuffer::new();
/// buffer.copy(&[0.1, 0.2, 0.3, 0.4]);
/// buffer.append(&[0.5, 0.6]);
///
/// assert_eq!(buffer.samples(), 6);
/// assert_eq!(buffer.bytes(), 24);
/// assert_eq!(buffer.frames(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Backing store; its length is the capacity
    storage: Vec<f32>,
    /// Logical sample count, never larger than `storage.len()`
    len: usize,
    sample_rate: u32,
    channels: u16,
    position: f64,
}

impl SampleBuffer {
    /// Create an empty buffer with the default format (44.1 kHz stereo)
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            len: 0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            position: 0.0,
        }
    }

    /// Create an empty buffer behind a shared handle
    pub fn create() -> BufferPtr {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Create an empty buffer with the given format
    pub fn from_format(format: &FormatConfig) -> Result<Self> {
        let mut buffer = Self::new();
        buffer.set_sample_rate(format.sample_rate)?;
        buffer.set_channels(format.channels)?;
        Ok(buffer)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(BufferError::InvalidFormat(
                "sample rate must be positive".to_string(),
            ));
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Set the channel count and make sure the backing store covers the
    /// current logical length. Existing samples are not reinterleaved.
    pub fn set_channels(&mut self, channels: u16) -> Result<()> {
        if channels == 0 {
            return Err(BufferError::InvalidFormat(
                "channel count must be positive".to_string(),
            ));
        }
        self.channels = channels;
        self.resize_buffer();
        Ok(())
    }

    /// Logical number of samples (all channels)
    pub fn samples(&self) -> usize {
        self.len
    }

    /// Set the logical length, growing the backing store if needed
    ///
    /// Growing through this call discards the previous contents; only
    /// [`copy`](Self::copy) and [`append`](Self::append) define sample values.
    /// Callers that grow a buffer this way are expected to fill it through
    /// [`buffer_mut`](Self::buffer_mut) or [`as_mut_slice`](Self::as_mut_slice).
    pub fn set_samples(&mut self, samples: usize) {
        self.len = samples;
        self.resize_buffer();
    }

    /// Playback timestamp, in caller-defined units (usually seconds)
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    /// Number of samples the backing store can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Logical size in bytes; the backing store may be larger
    pub fn bytes(&self) -> usize {
        self.len * BYTES_PER_SAMPLE
    }

    /// Number of complete interleaved frames
    pub fn frames(&self) -> usize {
        self.len / self.channels as usize
    }

    /// Duration of the complete frames in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Logical content
    pub fn as_slice(&self) -> &[f32] {
        &self.storage[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.storage[..self.len]
    }

    /// The whole backing store, up to [`capacity`](Self::capacity)
    ///
    /// Used by decoders that write directly into the buffer after sizing it
    /// with [`set_samples`](Self::set_samples). The borrow ends before any
    /// call that could reallocate.
    pub fn buffer_mut(&mut self) -> &mut [f32] {
        &mut self.storage
    }

    /// Copy channel count and sample rate from `other`; samples are untouched
    pub fn copy_format(&mut self, other: &SampleBuffer) {
        self.channels = other.channels;
        self.sample_rate = other.sample_rate;
    }

    /// Drop the logical content, keeping the backing store
    pub fn clear(&mut self) {
        self.len = 0;
    }

    fn resize_buffer(&mut self) {
        if self.len > self.storage.len() {
            log::debug!(
                "Reallocating sample buffer: {} -> {} samples",
                self.storage.len(),
                self.len
            );
            self.storage = vec![0.0; self.len];
        }
    }

    /// Replace the logical content with `src`
    pub fn copy(&mut self, src: &[f32]) {
        if src.len() > self.storage.len() {
            log::debug!(
                "Reallocating sample buffer for copy: {} -> {} samples",
                self.storage.len(),
                src.len()
            );
            self.storage = src.to_vec();
        } else {
            self.storage[..src.len()].copy_from_slice(src);
        }

        self.len = src.len();
    }

    /// Replace the logical content with `range` of this buffer's own backing
    /// store. Source and destination may overlap.
    pub fn copy_within(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.storage.len() {
            return Err(BufferError::OutOfRange {
                start: range.start,
                end: range.end,
                capacity: self.storage.len(),
            });
        }

        let count = range.len();
        self.storage.copy_within(range, 0);
        self.len = count;
        Ok(())
    }

    /// Extend the logical content with `src`
    pub fn append(&mut self, src: &[f32]) {
        let new_len = self.len + src.len();

        if new_len > self.storage.len() {
            log::debug!(
                "Reallocating sample buffer for append: {} -> {} samples",
                self.storage.len(),
                new_len
            );
            let mut storage = Vec::with_capacity(new_len);
            storage.extend_from_slice(&self.storage[..self.len]);
            storage.extend_from_slice(src);
            self.storage = storage;
        } else {
            self.storage[self.len..new_len].copy_from_slice(src);
        }

        self.len = new_len;
    }

    fn channel_iter(&self, channel: usize) -> impl Iterator<Item = f32> + '_ {
        let channels = self.channels as usize;
        self.storage[..self.frames() * channels]
            .iter()
            .skip(channel)
            .step_by(channels)
            .copied()
    }

    /// Channel-major copy of all complete frames
    ///
    /// Returns channel 0's samples, then channel 1's, and so on. A trailing
    /// partial frame is ignored.
    pub fn deinterleave(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames() * self.channels as usize);
        for channel in 0..self.channels as usize {
            out.extend(self.channel_iter(channel));
        }
        out
    }

    /// Spectrum of the first channel using an [`FFT_BUFFER_SIZE`]-point
    /// power transform
    ///
    /// `output` must hold exactly [`FFT_BUFFER_SIZE`] values and the buffer
    /// must contain at least that many frames. On failure neither the buffer
    /// nor `output` is modified.
    pub fn fft(&self, output: &mut [f32]) -> Result<()> {
        self.fft_channel(0, output)
    }

    /// Like [`fft`](Self::fft) for an arbitrary channel
    pub fn fft_channel(&self, channel: usize, output: &mut [f32]) -> Result<()> {
        self.check_spectrum_request(FFT_BUFFER_SIZE, channel, output.len())?;
        let mut transform = FftTransform::new(FFT_BUFFER_SIZE, SpectrumScale::Power);
        self.fft_with(&mut transform, channel, output)
    }

    /// Average spectrum of one channel using a caller-held transform
    ///
    /// The channel is split into `frames / size` consecutive windows. The
    /// first window is transformed straight into `output`; every further
    /// window is transformed into scratch space and folded in with
    /// `output[j] = (scratch[j] + output[j]) / 2`. This is a running pairwise
    /// average, so later windows weigh more than earlier ones.
    pub fn fft_with<T>(&self, transform: &mut T, channel: usize, output: &mut [f32]) -> Result<()>
    where
        T: SpectrumTransform + ?Sized,
    {
        let size = transform.size();
        self.check_spectrum_request(size, channel, output.len())?;

        let count = self.frames() / size;
        let window: Vec<f32> = self.channel_iter(channel).take(count * size).collect();
        let (first, rest) = window.split_at(size);

        transform.transform(first, output);

        if count > 1 {
            let mut scratch = vec![0.0; size];
            for segment in rest.chunks_exact(size) {
                transform.transform(segment, &mut scratch);
                for (out, &bin) in output.iter_mut().zip(&scratch) {
                    *out = (bin + *out) / 2.0;
                }
            }
        }

        log::trace!(
            "Spectrum of channel {} over {} windows of {} frames",
            channel,
            count,
            size
        );

        Ok(())
    }

    fn check_spectrum_request(&self, size: usize, channel: usize, output_len: usize) -> Result<()> {
        if output_len != size {
            return Err(BufferError::FrameSizeMismatch {
                expected: size,
                actual: output_len,
            });
        }
        if channel >= self.channels as usize {
            return Err(BufferError::InvalidChannel {
                channel,
                channels: self.channels,
            });
        }
        let available = self.frames();
        if size == 0 || available < size {
            return Err(BufferError::InsufficientData {
                needed: size,
                available,
            });
        }
        Ok(())
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
