//! Format and transform constants
//!
//! Defaults shared by the buffer, the configuration layer and the spectrum
//! analysis code.

/// Number of samples per channel consumed by one spectrum computation.
/// Must be a power of two.
pub const FFT_BUFFER_SIZE: usize = 512;

/// Sample rate assigned to a freshly constructed buffer, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Channel count assigned to a freshly constructed buffer.
pub const DEFAULT_CHANNELS: u16 = 2;

/// Size of one stored sample in bytes.
pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f32>();

/// Minimum RMS considered non-silent when reporting levels.
pub const MIN_RMS_THRESHOLD: f32 = 1e-6;
