//! Command-line entry point.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] from disk (default on first run) and apply flag
//!    overrides.
//! 4. Create the tokio runtime (multi-thread, 2 workers).
//! 5. Run the subcommand; `speak` spawns the readout orchestrator and waits
//!    for it to drain.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use yomiage::{
    config::AppConfig,
    drill::{Calculation, CalculationGenerator},
    numeral::verbalize_signed,
    phrase::{assemble, assemble_with, PhraseStyle},
    pipeline::{lock_status, new_shared_state, ReadoutCommand, ReadoutOrchestrator},
    playback::{AudioPlayer, WavFilePlayer},
    synthesis::{SpeechSynthesizer, VoicevoxClient},
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "yomiage")]
#[command(about = "Soroban-style mental arithmetic drills read aloud in Japanese")]
struct Cli {
    /// Settings file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a problem and print its expression, readings and answer.
    Generate(DrillArgs),
    /// Print the kana reading of a number.
    Verbalize {
        #[arg(allow_hyphen_values = true)]
        number: i64,
    },
    /// Generate a problem (or take --text) and read it aloud.
    Speak(SpeakArgs),
    /// List the voices offered by the synthesis engine.
    Speakers(EngineArgs),
}

#[derive(Debug, Args)]
struct DrillArgs {
    /// Operands per problem.
    #[arg(short = 'k', long = "operands")]
    operand_count: Option<usize>,
    /// Fewest digits per operand.
    #[arg(long = "min")]
    min_digits: Option<u32>,
    /// Most digits per operand.
    #[arg(long = "max")]
    max_digits: Option<u32>,
    /// Seed for a reproducible problem.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct EngineArgs {
    /// Engine base URL.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Args)]
struct SpeakArgs {
    #[command(flatten)]
    drill: DrillArgs,
    #[command(flatten)]
    engine: EngineArgs,
    /// Read this phrase instead of a generated problem.
    #[arg(long)]
    text: Option<String>,
    /// Voice style id.
    #[arg(long)]
    speaker: Option<u32>,
    /// Target readout length in seconds.
    #[arg(long)]
    duration: Option<f64>,
    /// Directory for WAV output.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Play on the default output device instead of writing files.
    #[cfg(feature = "rodio-playback")]
    #[arg(long)]
    device: bool,
}

impl DrillArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(k) = self.operand_count {
            config.drill.operand_count = k;
        }
        if let Some(min) = self.min_digits {
            config.drill.min_digits = min;
        }
        if let Some(max) = self.max_digits {
            config.drill.max_digits = max;
        }
    }

    fn generate(&self, config: &AppConfig) -> Result<Calculation> {
        let generator = CalculationGenerator::from_config(&config.drill)?;
        Ok(match self.seed {
            Some(seed) => generator.generate_with(&mut StdRng::seed_from_u64(seed)),
            None => generator.generate(),
        })
    }
}

impl EngineArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.url {
            config.synthesis.base_url = url.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn print_problem(calc: &Calculation) -> Result<()> {
    println!("{calc}");
    println!("{}", assemble(calc)?);
    println!("{}", assemble_with(calc, PhraseStyle::Display)?);
    let answer = calc.result()?;
    println!("= {answer} ({})", verbalize_signed(answer)?);
    Ok(())
}

async fn speak(args: SpeakArgs, mut config: AppConfig) -> Result<()> {
    args.drill.apply(&mut config);
    args.engine.apply(&mut config);
    if let Some(speaker) = args.speaker {
        config.synthesis.speaker_id = speaker;
    }
    if let Some(duration) = args.duration {
        config.drill.speech_duration_secs = duration;
    }
    if let Some(out) = &args.out {
        config.readout.output_dir = Some(out.clone());
    }

    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let calc = args.drill.generate(&config)?;
            print_problem(&calc)?;
            assemble(&calc)?
        }
    };

    if !config.synthesis.enabled {
        log::warn!("synthesis is disabled in settings; nothing to read");
        return Ok(());
    }

    let synthesizer = VoicevoxClient::from_config(&config.synthesis)?;
    let player: Arc<dyn AudioPlayer> = make_player(&args, &config);

    let state = new_shared_state();
    let orchestrator =
        ReadoutOrchestrator::new(state.clone(), Arc::new(synthesizer), player, &config);

    let (tx, rx) = mpsc::channel(4);
    let handle = tokio::spawn(orchestrator.run(rx));
    tx.send(ReadoutCommand::Speak(text)).await?;
    drop(tx);
    handle.await.context("readout task failed")?;

    let status = lock_status(&state).clone();
    if let Some(error) = status.last_error {
        bail!(error);
    }
    log::info!("readout finished ({} completed)", status.completed);
    Ok(())
}

#[cfg(feature = "rodio-playback")]
fn make_player(args: &SpeakArgs, config: &AppConfig) -> Arc<dyn AudioPlayer> {
    if args.device {
        Arc::new(yomiage::playback::RodioPlayer::new())
    } else {
        Arc::new(WavFilePlayer::new(config.output_dir()))
    }
}

#[cfg(not(feature = "rodio-playback"))]
fn make_player(_args: &SpeakArgs, config: &AppConfig) -> Arc<dyn AudioPlayer> {
    Arc::new(WavFilePlayer::new(config.output_dir()))
}

async fn list_speakers(args: EngineArgs, mut config: AppConfig) -> Result<()> {
    args.apply(&mut config);
    let client = VoicevoxClient::from_config(&config.synthesis)?;
    for speaker in client.speakers().await? {
        for style in &speaker.styles {
            println!("{:>4}  {} ({})", style.id, speaker.name, style.name);
        }
    }
    Ok(())
}

async fn run(cli: Cli, mut config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            args.apply(&mut config);
            print_problem(&args.generate(&config)?)
        }
        Commands::Verbalize { number } => {
            println!("{}", verbalize_signed(number)?);
            Ok(())
        }
        Commands::Speak(args) => speak(args, config).await,
        Commands::Speakers(args) => list_speakers(args, config).await,
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();

    // 3. Configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load settings")?;

    // 4. Runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    rt.block_on(run(cli, config))
}
