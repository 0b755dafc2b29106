use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded};

use crate::audio::{AudioSource, BufferPool, BufferPtr, SampleBuffer};
use crate::config::SpectrumConfig;
use crate::error::{BufferError, Result};
use crate::output::SpectrumOutput;
use crate::spectrum::{FftTransform, SpectrumTransform, bin_frequency, peak_bin, rms};

/// Computes one averaged spectrum per buffer and summarises it
pub struct SpectrumProcessor {
    transform: FftTransform,
    frame: Vec<f32>,
    channel: usize,
}

impl SpectrumProcessor {
    pub fn new(config: &SpectrumConfig, channel: usize) -> Self {
        Self {
            transform: FftTransform::new(config.transform_size, config.scale),
            frame: vec![0.0; config.transform_size],
            channel,
        }
    }

    /// Analyse `buffer`
    ///
    /// Buffers too short for one transform (typically the tail of a file)
    /// yield `Ok(None)`.
    pub fn process(&mut self, buffer: &SampleBuffer) -> Result<Option<SpectrumOutput>> {
        match buffer.fft_with(&mut self.transform, self.channel, &mut self.frame) {
            Ok(()) => {}
            Err(BufferError::InsufficientData { needed, available }) => {
                log::debug!(
                    "Skipping buffer at {:.3}s: {} frames, need {}",
                    buffer.position(),
                    available,
                    needed
                );
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        let (bin, peak_value) = peak_bin(&self.frame).unwrap_or((0, 0.0));
        Ok(Some(SpectrumOutput {
            position: buffer.position(),
            peak_hz: bin_frequency(bin, buffer.sample_rate(), self.transform.size()),
            peak_value,
            rms: rms(buffer.as_slice()),
        }))
    }

    /// Most recently computed spectrum frame
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }
}

/// Decode `source` on a background thread into pooled buffers
///
/// Filled buffers arrive on the returned channel in order; the consumer hands
/// each one back with [`BufferPool::release`] once done. At most `depth`
/// buffers are in flight. The thread ends when the source is exhausted or the
/// receiver is dropped.
pub fn spawn_reader<S>(
    mut source: S,
    pool: Arc<BufferPool>,
    depth: usize,
) -> (Receiver<BufferPtr>, JoinHandle<Result<()>>)
where
    S: AudioSource + 'static,
{
    let (tx, rx) = bounded(depth);

    let handle = thread::spawn(move || -> Result<()> {
        let mut chunks = 0usize;
        loop {
            let buffer = pool.obtain();
            let filled = {
                let mut inner = buffer.lock().map_err(|_| BufferError::Poisoned)?;
                source.next_buffer(&mut inner)?
            };

            if !filled {
                pool.release(buffer);
                break;
            }

            if tx.send(buffer).is_err() {
                log::warn!("Buffer receiver dropped");
                break;
            }
            chunks += 1;
        }

        log::debug!("Reader finished after {} buffers", chunks);
        Ok(())
    });

    (rx, handle)
}

/// Wait for a reader thread and surface its result
pub fn join_reader(handle: JoinHandle<Result<()>>) -> anyhow::Result<()> {
    match handle.join() {
        Ok(result) => Ok(result?),
        Err(_) => anyhow::bail!("Reader thread panicked"),
    }
}
