use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("Insufficient data: need {needed} frames, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Frame size mismatch: transform expects {expected} values, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Range {start}..{end} outside backing store of {capacity} samples")]
    OutOfRange {
        start: usize,
        end: usize,
        capacity: usize,
    },

    #[error("Channel {channel} out of range for {channels}-channel buffer")]
    InvalidChannel { channel: usize, channels: u16 },

    #[error("Sample buffer lock poisoned")]
    Poisoned,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BufferError>;
