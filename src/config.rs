//! Configuration for buffers, spectrum analysis and the decode pipeline.
//!
//! Every section has sensible defaults, so a TOML file only needs the keys it
//! wants to override:
//!
//! ```toml
//! [format]
//! sample_rate = 48000
//!
//! [spectrum]
//! transform_size = 1024
//! scale = "magnitude"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, FFT_BUFFER_SIZE};
use crate::error::{BufferError, Result};

/// How each frequency bin is reported by the spectrum transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpectrumScale {
    /// Squared magnitude `re² + im²` (bin intensity)
    #[default]
    Power,
    /// Magnitude `sqrt(re² + im²)`
    Magnitude,
}

/// Top-level configuration
///
/// # Example
/// ```
/// use pcmbuf::config::PcmConfig;
///
/// let config = PcmConfig::from_toml_str("[format]\nchannels = 1\n").unwrap();
/// assert_eq!(config.format.channels, 1);
/// assert_eq!(config.format.sample_rate, 44100);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PcmConfig {
    /// Sample format assigned to new buffers
    pub format: FormatConfig,
    /// Spectrum analysis parameters
    pub spectrum: SpectrumConfig,
    /// Decode pipeline sizing
    pub pipeline: PipelineConfig,
}

/// Sample format of a buffer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
}

/// Spectrum analysis configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Samples per channel consumed by one transform (power of two)
    pub transform_size: usize,
    /// Output scaling of each bin
    pub scale: SpectrumScale,
}

/// Decoder-to-consumer pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Frames decoded into each buffer
    pub chunk_frames: usize,
    /// Number of buffers kept for recycling
    pub pool_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            transform_size: FFT_BUFFER_SIZE,
            scale: SpectrumScale::Power,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_frames: 2048,
            pool_size: 8,
        }
    }
}

impl PcmConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| BufferError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.format.sample_rate == 0 {
            return Err(BufferError::Config("sample_rate must be positive".into()));
        }
        if self.format.channels == 0 {
            return Err(BufferError::Config("channels must be positive".into()));
        }
        let size = self.spectrum.transform_size;
        if size == 0 || !size.is_power_of_two() {
            return Err(BufferError::Config(format!(
                "transform_size must be a power of two, got {}",
                size
            )));
        }
        if self.pipeline.chunk_frames == 0 {
            return Err(BufferError::Config("chunk_frames must be positive".into()));
        }
        if self.pipeline.pool_size == 0 {
            return Err(BufferError::Config("pool_size must be positive".into()));
        }
        Ok(())
    }
}
