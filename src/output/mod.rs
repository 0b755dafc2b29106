mod csv;
mod json;
mod text;

use chrono::Utc;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Summary of one analysed buffer
pub struct SpectrumOutput {
    /// Buffer position in seconds
    pub position: f64,
    /// Frequency of the strongest bin in Hz
    pub peak_hz: f32,
    /// Value of the strongest bin
    pub peak_value: f32,
    /// RMS level of the whole buffer
    pub rms: f32,
}

pub trait Formatter: Send {
    fn format(&self, output: &SpectrumOutput) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// RMS level in dBFS, clamped for silence
pub fn level_dbfs(rms: f32) -> f32 {
    20.0 * rms.max(crate::constants::MIN_RMS_THRESHOLD).log10()
}
