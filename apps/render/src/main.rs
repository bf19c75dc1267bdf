use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dasp_sample::{Sample, I24};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vt2w_core::{EngineSettings, ParamId, ParameterListener, ParameterStore, PresetBank};
use vt2w_dsp::{calculate_peak_dbfs, AudioBlockMut, Engine};

/// VT-2W White - clean saturation, offline
#[derive(Parser, Debug)]
#[command(name = "vt2w", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a WAV file and write a 32-bit float WAV
    Render {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
        /// Engine settings TOML (time constants, block size)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Frames per processing block (overrides the config file)
        #[arg(long)]
        block_size: Option<usize>,
    },
    /// Print the impulse response for the given settings
    Impulse {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, default_value_t = 44100.0)]
        sample_rate: f64,
        #[arg(long, default_value_t = 16)]
        len: usize,
    },
    /// List factory presets and those in --presets
    Presets {
        #[arg(long)]
        presets: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct ParamArgs {
    /// Drive, 0 to 10
    #[arg(long)]
    drive: Option<f32>,
    /// Dry/wet mix in percent, 0 to 100
    #[arg(long)]
    mix: Option<f32>,
    /// Start from a named preset
    #[arg(long)]
    preset: Option<String>,
    /// Extra presets file (TOML, [[preset]] tables)
    #[arg(long)]
    presets: Option<PathBuf>,
}

/// Logs every parameter change the CLI makes
struct LogListener;

impl ParameterListener for LogListener {
    fn parameter_changed(&self, id: ParamId, value: f32) {
        tracing::debug!("{} set to {}", id, id.spec().format_value(value));
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vt2w=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            input,
            output,
            params,
            config,
            block_size,
        } => {
            let mut settings = match config {
                Some(path) => EngineSettings::load(&path)?,
                None => EngineSettings::default(),
            };
            if let Some(block_size) = block_size {
                settings.block_size = block_size;
            }
            render(&input, &output, &params, settings)
        }
        Command::Impulse {
            params,
            sample_rate,
            len,
        } => impulse(&params, sample_rate, len),
        Command::Presets { presets } => list_presets(presets.as_deref()),
    }
}

fn load_bank(path: Option<&Path>) -> Result<PresetBank> {
    match path {
        Some(path) => PresetBank::load(path)
            .with_context(|| format!("Failed to load presets from {}", path.display())),
        None => Ok(PresetBank::factory()),
    }
}

/// Build a parameter store from preset and explicit overrides
fn build_store(params: &ParamArgs) -> Result<Arc<ParameterStore>> {
    let store = Arc::new(ParameterStore::new());
    store.subscribe(Arc::new(LogListener));

    if let Some(name) = &params.preset {
        let bank = load_bank(params.presets.as_deref())?;
        let Some(preset) = bank.find(name) else {
            bail!("Unknown preset '{}'", name);
        };
        tracing::info!("Using preset '{}'", preset.name);
        preset.apply(&store);
    }

    if let Some(drive) = params.drive {
        store.set_target(ParamId::Drive, drive);
    }
    if let Some(mix) = params.mix {
        store.set_target(ParamId::Mix, mix);
    }

    Ok(store)
}

/// Read any PCM WAV into interleaved f32
fn read_wav(path: &Path) -> Result<(hound::WavSpec, Vec<f32>)> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v.to_sample::<f32>()))
            .collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v.to_sample::<f32>()))
            .collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| I24::new_unchecked(v).to_sample::<f32>()))
            .collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v.to_sample::<f32>()))
            .collect::<Result<Vec<_>, _>>()?,
        (format, bits) => bail!("Unsupported WAV format: {:?} {} bit", format, bits),
    };

    Ok((spec, samples))
}

fn render(input: &Path, output: &Path, params: &ParamArgs, settings: EngineSettings) -> Result<()> {
    let store = build_store(params)?;
    let (spec, mut samples) = read_wav(input)?;
    let channels = spec.channels as usize;
    if channels == 0 {
        bail!("{} has no audio channels", input.display());
    }

    let whole = AudioBlockMut::new(&mut samples, channels);
    tracing::info!(
        "Rendering {} ({} Hz, {} ch, {} frames)",
        input.display(),
        spec.sample_rate,
        channels,
        whole.num_frames()
    );
    if !whole.is_valid() {
        tracing::warn!("Trailing partial frame in {} is left unprocessed", input.display());
    }
    if channels > 2 {
        tracing::warn!("Only the first two of {} channels are processed", channels);
    }

    let mut engine = Engine::with_settings(store, settings.clone());
    engine
        .prepare(spec.sample_rate as f64, settings.block_size)
        .context("Failed to prepare engine")?;
    let block_size = engine.settings().block_size;

    let peak_in = calculate_peak_dbfs(&samples);
    for block in samples.chunks_mut(block_size * channels) {
        engine.process_block(AudioBlockMut::new(block, channels));
    }
    let peak_out = calculate_peak_dbfs(&samples);
    engine.release();

    let out_spec = hound::WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(output, out_spec)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    tracing::info!(
        "Wrote {} (peak {:.2} dBFS -> {:.2} dBFS)",
        output.display(),
        peak_in,
        peak_out
    );
    Ok(())
}

fn impulse(params: &ParamArgs, sample_rate: f64, len: usize) -> Result<()> {
    let mut engine = Engine::new(build_store(params)?);
    engine
        .prepare(sample_rate, len.max(1))
        .context("Failed to prepare engine")?;

    let mut samples = vec![0.0_f32; len];
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    engine.process_mono(&mut samples);

    let store = engine.store();
    println!(
        "# drive {} mix {} @ {} Hz",
        ParamId::Drive.spec().format_value(store.target(ParamId::Drive)),
        ParamId::Mix.spec().format_value(store.target(ParamId::Mix)),
        engine.sample_rate()
    );
    for (i, sample) in samples.iter().enumerate() {
        println!("{:>5} {:+.6}", i, sample);
    }
    Ok(())
}

fn list_presets(path: Option<&Path>) -> Result<()> {
    let bank = load_bank(path)?;
    for preset in bank.iter() {
        println!(
            "{:<20} drive {:>5}  mix {:>5}",
            preset.name,
            ParamId::Drive.spec().format_value(preset.drive),
            ParamId::Mix.spec().format_value(preset.mix)
        );
    }
    Ok(())
}
