use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::WavReader;

use super::buffer::SampleBuffer;
use crate::error::{BufferError, Result};

/// Producer of interleaved sample chunks
pub trait AudioSource: Send {
    /// Fill `buffer` with the next chunk, including format and position.
    /// Returns `false` once the source is exhausted.
    fn next_buffer(&mut self, buffer: &mut SampleBuffer) -> Result<bool>;
    fn sample_rate(&self) -> u32;
    fn channels(&self) -> u16;
}

/// Decodes a whole WAV file up front and serves it in fixed-size chunks
pub struct WavFileSource {
    samples: Vec<f32>,
    position: usize,
    chunk_size: usize,
    sample_rate: u32,
    channels: u16,
}

impl WavFileSource {
    /// Open `path`, yielding chunks of `chunk_frames` frames
    pub fn new<P: AsRef<Path>>(path: P, chunk_frames: usize) -> Result<Self> {
        let reader = WavReader::open(path.as_ref())?;
        let spec = reader.spec();

        if spec.channels == 0 || spec.sample_rate == 0 {
            return Err(BufferError::InvalidFormat(format!(
                "unsupported WAV format: {} channels at {} Hz",
                spec.channels, spec.sample_rate
            )));
        }
        if chunk_frames == 0 {
            return Err(BufferError::Config("chunk_frames must be positive".into()));
        }

        let samples = Self::read_samples(reader, &spec)?;
        log::debug!(
            "Loaded {} samples ({} ch, {} Hz) from {}",
            samples.len(),
            spec.channels,
            spec.sample_rate,
            path.as_ref().display()
        );

        Ok(Self {
            samples,
            position: 0,
            chunk_size: chunk_frames * spec.channels as usize,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    fn read_samples(
        mut reader: WavReader<BufReader<File>>,
        spec: &hound::WavSpec,
    ) -> Result<Vec<f32>> {
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, hound::Error>>()?,
            hound::SampleFormat::Int => {
                let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_val))
                    .collect::<std::result::Result<Vec<_>, hound::Error>>()?
            }
        };
        Ok(samples)
    }

    /// Total decoded samples (all channels)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl AudioSource for WavFileSource {
    fn next_buffer(&mut self, buffer: &mut SampleBuffer) -> Result<bool> {
        if self.position >= self.samples.len() {
            return Ok(false);
        }

        let end = (self.position + self.chunk_size).min(self.samples.len());
        buffer.set_sample_rate(self.sample_rate)?;
        buffer.set_channels(self.channels)?;
        buffer.copy(&self.samples[self.position..end]);

        let start_frame = self.position / self.channels as usize;
        buffer.set_position(start_frame as f64 / self.sample_rate as f64);

        self.position = end;
        Ok(true)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }
}
