pub mod generate;

#[allow(unused_imports)]
pub use generate::{ramp, sine, tone_per_channel};
