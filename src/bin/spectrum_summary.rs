use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::{Path, PathBuf};

use pcmbuf::audio::{AudioSource, SampleBuffer, WavFileSource};
use pcmbuf::config::{PcmConfig, SpectrumScale};
use pcmbuf::processing::SpectrumProcessor;

#[derive(Parser, Debug)]
#[command(name = "spectrum_summary")]
#[command(about = "Summarize peak frequency and level statistics of WAV files", long_about = None)]
struct Args {
    /// WAV files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bin scaling: power, magnitude
    #[arg(long, value_enum)]
    scale: Option<SpectrumScale>,

    /// Channel to analyze
    #[arg(long, default_value_t = 0)]
    channel: usize,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct FileAnalysis {
    filename: String,
    sample_rate: u32,
    channels: u16,
    duration_secs: f64,
    buffers: usize,
    peak_hz: Option<StatsSummary>,
    rms: Option<StatsSummary>,
    error: Option<String>,
}

impl FileAnalysis {
    fn failed(filename: String, error: String) -> Self {
        Self {
            filename,
            sample_rate: 0,
            channels: 0,
            duration_secs: 0.0,
            buffers: 0,
            peak_hz: None,
            rms: None,
            error: Some(error),
        }
    }
}

fn analyze_file(path: &Path, config: &PcmConfig, channel: usize) -> FileAnalysis {
    let filename = path.display().to_string();

    match run_analysis(path, config, channel) {
        Ok(mut analysis) => {
            analysis.filename = filename;
            analysis
        }
        Err(e) => {
            log::warn!("Failed to analyze {}: {:#}", filename, e);
            FileAnalysis::failed(filename, format!("{:#}", e))
        }
    }
}

fn run_analysis(path: &Path, config: &PcmConfig, channel: usize) -> anyhow::Result<FileAnalysis> {
    let mut source = WavFileSource::new(path, config.pipeline.chunk_frames)?;
    let mut processor = SpectrumProcessor::new(&config.spectrum, channel);
    let mut buffer = SampleBuffer::from_format(&config.format)?;

    let mut peak_stats: Stats<f32> = Stats::new();
    let mut rms_stats: Stats<f32> = Stats::new();
    let mut buffers = 0;
    let mut duration_secs = 0.0;

    while source.next_buffer(&mut buffer)? {
        buffers += 1;
        duration_secs += buffer.duration_secs();

        if let Some(output) = processor.process(&buffer)? {
            peak_stats.update(output.peak_hz);
            rms_stats.update(output.rms);
        }
    }

    Ok(FileAnalysis {
        filename: String::new(),
        sample_rate: source.sample_rate(),
        channels: source.channels(),
        duration_secs,
        buffers,
        peak_hz: StatsSummary::from_stats(&peak_stats),
        rms: StatsSummary::from_stats(&rms_stats),
        error: None,
    })
}

fn print_text(results: &[FileAnalysis], verbose: bool) {
    for result in results {
        println!("{}", result.filename);
        if let Some(ref error) = result.error {
            println!("  Error: {}", error);
            continue;
        }
        println!(
            "  Format: {} Hz, {} channels, {:.2}s in {} buffers",
            result.sample_rate, result.channels, result.duration_secs, result.buffers
        );
        match result.peak_hz {
            Some(ref peak) => {
                println!("  Peak: {:.1} Hz (std dev {:.1} Hz)", peak.mean, peak.std_dev);
                if verbose {
                    println!("    Min: {:.1} Hz", peak.min);
                    println!("    Max: {:.1} Hz", peak.max);
                    println!("    Spectra: {}", peak.count);
                }
            }
            None => println!("  Peak: - (too short for one transform)"),
        }
        if let Some(ref rms) = result.rms {
            println!("  RMS: {:.4} (min {:.4}, max {:.4})", rms.mean, rms.min, rms.max);
        }
    }
}

fn print_csv(results: &[FileAnalysis]) {
    println!(
        "filename,sample_rate,channels,duration_secs,buffers,peak_mean_hz,peak_std_hz,rms_mean,rms_max,error"
    );
    for result in results {
        let peak_mean = result
            .peak_hz
            .as_ref()
            .map(|s| format!("{:.2}", s.mean))
            .unwrap_or_default();
        let peak_std = result
            .peak_hz
            .as_ref()
            .map(|s| format!("{:.2}", s.std_dev))
            .unwrap_or_default();
        let rms_mean = result
            .rms
            .as_ref()
            .map(|s| format!("{:.5}", s.mean))
            .unwrap_or_default();
        let rms_max = result
            .rms
            .as_ref()
            .map(|s| format!("{:.5}", s.max))
            .unwrap_or_default();
        let error = result.error.as_deref().unwrap_or("");

        println!(
            "{},{},{},{:.3},{},{},{},{},{},{}",
            result.filename,
            result.sample_rate,
            result.channels,
            result.duration_secs,
            result.buffers,
            peak_mean,
            peak_std,
            rms_mean,
            rms_max,
            error
        );
    }
}

fn print_json(results: &[FileAnalysis]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => PcmConfig::load(path)?,
        None => PcmConfig::default(),
    };
    if let Some(scale) = args.scale {
        config.spectrum.scale = scale;
    }

    let results: Vec<FileAnalysis> = args
        .files
        .iter()
        .map(|path| analyze_file(path, &config, args.channel))
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&results, args.verbose > 0),
        OutputFormat::Csv => print_csv(&results),
        OutputFormat::Json => print_json(&results)?,
    }

    Ok(())
}
