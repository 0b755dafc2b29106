use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use pcmbuf::audio::{AudioSource, BufferPool, WavFileSource};
use pcmbuf::config::{PcmConfig, SpectrumScale};
use pcmbuf::output::{OutputFormat, create_formatter};
use pcmbuf::processing::{SpectrumProcessor, join_reader, spawn_reader};

#[derive(Parser, Debug)]
#[command(name = "pcmbuf")]
#[command(about = "Stream a WAV file through pooled sample buffers and print per-buffer spectra", long_about = None)]
struct Args {
    /// WAV file to analyze
    file: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Bin scaling: power, magnitude
    #[arg(long, value_enum)]
    scale: Option<SpectrumScale>,

    /// Transform size in samples per channel (power of two)
    #[arg(short = 't', long)]
    transform_size: Option<usize>,

    /// Frames per buffer
    #[arg(long)]
    chunk_frames: Option<usize>,

    /// Channel to analyze
    #[arg(long, default_value_t = 0)]
    channel: usize,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let source = WavFileSource::new(&args.file, config.pipeline.chunk_frames)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    if args.verbose > 0 {
        eprintln!("=== pcmbuf ===");
        eprintln!("File: {}", args.file.display());
        eprintln!(
            "Format: {} Hz, {} channels",
            source.sample_rate(),
            source.channels()
        );
        eprintln!(
            "Transform: {} points ({:?})",
            config.spectrum.transform_size, config.spectrum.scale
        );
        eprintln!("Chunk: {} frames", config.pipeline.chunk_frames);
        eprintln!();
    }

    let pool = Arc::new(BufferPool::new(config.pipeline.pool_size, &config.format)?);
    let (buffer_rx, reader) = spawn_reader(source, Arc::clone(&pool), config.pipeline.pool_size);

    let mut processor = SpectrumProcessor::new(&config.spectrum, args.channel);
    let formatter = create_formatter(args.format, args.verbose > 0);

    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    for buffer in buffer_rx.iter() {
        let output = {
            let inner = buffer
                .lock()
                .map_err(|_| anyhow::anyhow!("Sample buffer lock poisoned"))?;
            processor.process(&inner)?
        };
        pool.release(buffer);

        if let Some(output) = output {
            println!("{}", formatter.format(&output));
        }
    }

    join_reader(reader)?;
    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<PcmConfig> {
    let mut config = match args.config {
        Some(ref path) => PcmConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PcmConfig::default(),
    };

    if let Some(scale) = args.scale {
        config.spectrum.scale = scale;
    }
    if let Some(size) = args.transform_size {
        config.spectrum.transform_size = size;
    }
    if let Some(frames) = args.chunk_frames {
        config.pipeline.chunk_frames = frames;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
