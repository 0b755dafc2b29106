use super::{Formatter, SpectrumOutput, level_dbfs};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &SpectrumOutput) -> String {
        if self.verbose {
            format!(
                "{:>10.3}s  peak: {:>7.1} Hz ({:.2})  level: {:>6.1} dBFS",
                output.position,
                output.peak_hz,
                output.peak_value,
                level_dbfs(output.rms)
            )
        } else {
            format!("{:>10.3}s  peak: {:>6.1} Hz", output.position, output.peak_hz)
        }
    }
}
