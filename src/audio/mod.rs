pub mod buffer;
pub mod pool;
pub mod source;

pub use buffer::{BufferPtr, SampleBuffer};
pub use pool::BufferPool;
pub use source::{AudioSource, WavFileSource};
