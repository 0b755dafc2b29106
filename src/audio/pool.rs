use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

use super::buffer::{BufferPtr, SampleBuffer};
use crate::config::FormatConfig;
use crate::error::Result;

/// Recycling pool of sample buffers
///
/// A decoder obtains buffers from the pool, fills them and hands them to a
/// consumer, which releases them back once done. Recycled buffers keep their
/// backing store, so after a few rounds the pipeline stops allocating.
pub struct BufferPool {
    free_tx: Sender<BufferPtr>,
    free_rx: Receiver<BufferPtr>,
    template: SampleBuffer,
}

impl BufferPool {
    /// Create a pool holding at most `size` idle buffers of `format`
    pub fn new(size: usize, format: &FormatConfig) -> Result<Self> {
        let template = SampleBuffer::from_format(format)?;
        let (free_tx, free_rx) = bounded(size);
        Ok(Self {
            free_tx,
            free_rx,
            template,
        })
    }

    /// Take an idle buffer, or allocate a new empty one if none is idle
    pub fn obtain(&self) -> BufferPtr {
        match self.free_rx.try_recv() {
            Ok(buffer) => buffer,
            Err(_) => {
                log::trace!("Buffer pool empty, allocating");
                Arc::new(Mutex::new(self.template.clone()))
            }
        }
    }

    /// Return a buffer to the pool
    ///
    /// The buffer is reset to the pool format with no samples. Buffers still
    /// referenced elsewhere, poisoned buffers and buffers beyond the pool size
    /// are dropped instead of recycled.
    pub fn release(&self, buffer: BufferPtr) {
        if Arc::strong_count(&buffer) != 1 {
            log::warn!("Not recycling a buffer that is still shared");
            return;
        }

        match buffer.lock() {
            Ok(mut inner) => {
                inner.clear();
                inner.copy_format(&self.template);
                inner.set_position(0.0);
            }
            Err(_) => {
                log::warn!("Not recycling a poisoned buffer");
                return;
            }
        }

        if let Err(TrySendError::Full(_)) = self.free_tx.try_send(buffer) {
            log::trace!("Buffer pool full, dropping buffer");
        }
    }

    /// Number of idle buffers ready for reuse
    pub fn available(&self) -> usize {
        self.free_rx.len()
    }
}
