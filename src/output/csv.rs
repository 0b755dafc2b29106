use super::{Formatter, SpectrumOutput, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &SpectrumOutput) -> String {
        format!(
            "{},{:.3},{:.1},{:.2},{:.4}",
            iso8601_timestamp(),
            output.position,
            output.peak_hz,
            output.peak_value,
            output.rms
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,position,peak_hz,peak_value,rms")
    }
}
