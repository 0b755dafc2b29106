use super::{Formatter, SpectrumOutput, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, output: &SpectrumOutput) -> String {
        format!(
            r#"{{"ts":"{}","position":{:.3},"peak_hz":{:.1},"peak_value":{:.2},"rms":{:.4}}}"#,
            iso8601_timestamp(),
            output.position,
            output.peak_hz,
            output.peak_value,
            output.rms
        )
    }
}
