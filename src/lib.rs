pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod spectrum;
pub mod wav;

#[cfg(test)]
mod test_utils;

pub use audio::{BufferPool, BufferPtr, SampleBuffer};
pub use config::PcmConfig;
pub use error::{BufferError, Result};
pub use wav::save_wav;
