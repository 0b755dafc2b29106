use std::path::Path;

use hound::{WavSpec, WavWriter};

use crate::audio::SampleBuffer;
use crate::error::Result;

/// Write the logical content of `buffer` as a 32-bit float WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    // hound rejects a trailing partial frame
    let complete = buffer.frames() * buffer.channels() as usize;
    for &sample in &buffer.as_slice()[..complete] {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
