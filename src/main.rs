//! emotive - turns an emotion analysis into a generative melody with a
//! harmonic pad.
//!
//! Usage:
//!   emotive describe analysis.json
//!   emotive play analysis.json
//!   emotive render analysis.json --wav out.wav
//!
//! `analysis.json` holds the classifier output (`primary_emotion`,
//! `secondary_emotion`, `intensity`, `temperature`, `movement` and an
//! optional `fingerprint`); pass `-` to read it from stdin.

mod config;

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use em_ir::EmotionAnalysis;
use em_master::{
    export_melody, render, CpalHost, PlaybackEngine, PlaybackState, PlayerControls,
    SessionInfo, SessionPlan,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::Config;

#[derive(Parser)]
#[command(name = "emotive")]
#[command(author, version, about = "Emotion-driven melody engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: platform config dir, emotive/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for all randomness, overriding the config file
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the musical parameters chosen for an analysis
    Describe {
        analysis: PathBuf,
        /// Print the session info as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play an analysis on the default output device
    Play { analysis: PathBuf },
    /// Render an analysis to a WAV file without an audio device
    Render {
        analysis: PathBuf,
        #[arg(long)]
        wav: PathBuf,
        /// Length in seconds (default from config)
        #[arg(long)]
        seconds: Option<f32>,
        /// Output sample rate (default from config)
        #[arg(long)]
        sample_rate: Option<u32>,
    },
    /// Create a default configuration file
    Init,
    /// Show the configuration file path
    ConfigPath,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.engine.seed = cli.seed;
    }

    match cli.command {
        Commands::Describe { analysis, json } => describe(&read_analysis(&analysis)?, &config, json),
        Commands::Play { analysis } => play(&read_analysis(&analysis)?, &config),
        Commands::Render { analysis, wav, seconds, sample_rate } => {
            let seconds = seconds.unwrap_or(config.render.seconds);
            let sample_rate = sample_rate.unwrap_or(config.render.sample_rate);
            render_to_wav(&read_analysis(&analysis)?, &config, &wav, seconds, sample_rate)
        }
        Commands::Init => {
            let path = Config::create_default_config_file()?;
            println!("Created default config at: {}", path.display());
            Ok(())
        }
        Commands::ConfigPath => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn read_analysis(path: &Path) -> Result<EmotionAnalysis> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading analysis from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&content).context("parsing emotion analysis")
}

fn rng(config: &Config) -> StdRng {
    match config.engine.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn describe(analysis: &EmotionAnalysis, config: &Config, json: bool) -> Result<()> {
    let plan = SessionPlan::new(analysis, &mut rng(config));
    if json {
        println!("{}", serde_json::to_string_pretty(&plan.info)?);
    } else {
        print_info(&plan.info);
    }
    Ok(())
}

fn print_info(info: &SessionInfo) {
    let melody: Vec<String> = info.melody.iter().map(ToString::to_string).collect();
    println!("{}", info.summary);
    println!("Scale:    {} ({})", info.scale, info.scale_mode);
    println!("Harmony:  {} ({})", info.harmony_scale, info.harmony_mode);
    println!("Octave:   {}", info.octave);
    println!("Melody:   {}", melody.join(" "));
    println!("Chord:    {}", info.chord);
    println!("Accent:   {}", info.accent);
    println!("Gradient: {} -> {}", info.visual.gradient.0, info.visual.gradient.1);
    for (emotion, weight) in info.visual.fingerprint.axes() {
        println!("  {:<8} {:>6.1}", emotion.as_str(), weight);
    }
}

fn play(analysis: &EmotionAnalysis, config: &Config) -> Result<()> {
    let mut engine = PlaybackEngine::new(CpalHost, config.engine);
    let mut controls = PlayerControls::new();

    controls.play_pressed(&mut engine, analysis)?;
    if let Some(info) = engine.session_info() {
        print_info(info);
    }
    println!();
    println!("[enter] play/pause  [r] regenerate  [e] export  [q] quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line?.trim() {
            "" | "p" => match controls.play_pressed(&mut engine, analysis) {
                Ok(true) => println!("Playing"),
                Ok(false) => println!("Paused"),
                Err(e) => eprintln!("{}", e),
            },
            "r" => match controls.regenerate(&mut engine, analysis) {
                Ok(handle) => print_info(handle.info()),
                Err(e) => eprintln!("{}", e),
            },
            "e" => match engine.session_info() {
                Some(info) => {
                    let payload = export_melody(info);
                    fs::write(payload.file_name, &payload.body)?;
                    println!("Wrote {} ({})", payload.file_name, payload.media_type);
                }
                None => println!("Nothing to export"),
            },
            "q" => break,
            other => println!("Unknown command {:?}", other),
        }
        if engine.state() == PlaybackState::Idle {
            println!("Session ended");
        }
        io::stdout().flush()?;
    }

    engine.stop();
    Ok(())
}

fn render_to_wav(
    analysis: &EmotionAnalysis,
    config: &Config,
    path: &Path,
    seconds: f32,
    sample_rate: u32,
) -> Result<()> {
    let plan = SessionPlan::new(analysis, &mut rng(config));
    println!("{}", plan.info.summary);
    println!("Rendering {:.1}s to {} at {} Hz...", seconds, path.display(), sample_rate);

    let frames = render::render_frames(&plan, config.engine.mix, sample_rate, seconds);
    render::save_wav(path, &frames, sample_rate)
        .with_context(|| format!("writing {}", path.display()))?;

    let peak = frames.iter().map(|f| f.peak()).max().unwrap_or(0);
    println!("Done: {} frames, peak {}", frames.len(), peak);
    Ok(())
}
