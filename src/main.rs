//! Handwriting replay - command line entry point
//!
//! Works with recordings in their JSON text form:
//!
//! ```bash
//! # turn a scripted pointer log (one JSON sample per line) into a recording
//! handwriting-replay capture strokes.jsonl --out drawing.json
//!
//! # show when each draw instruction would fire
//! handwriting-replay schedule drawing.json
//!
//! # replay in real time, logging every instruction
//! handwriting-replay play drawing.json --speed 2
//! ```

use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use handwriting_replay::{
    config::{ReplayConfig, CONFIG_FILE},
    serialize, serialize_pretty,
    session::codec,
    spawn_playback, CaptureSession, InstructionLog, PlaybackSchedule, PointerSample,
    TracingRenderer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Record and replay freehand drawings
#[derive(Parser, Debug)]
#[command(name = "handwriting-replay")]
#[command(about = "Record and replay freehand drawings with their original timing", long_about = None)]
#[command(version)]
struct Cli {
    /// Timing configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a recording from a pointer sample log
    Capture {
        /// JSON lines of {"pos":[x,y],"pointer_down":bool,"at_ms":n}
        input: PathBuf,

        /// Write the recording here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the playback schedule of a recording
    Schedule { recording: PathBuf },

    /// Replay a recording in real time
    Play {
        recording: PathBuf,

        /// Speed multiplier, overrides the config file
        #[arg(long)]
        speed: Option<f64>,
    },

    /// Print summary statistics of a recording
    Inspect { recording: PathBuf },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,handwriting_replay=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ReplayConfig::load_or_default(&cli.config);
    let anchor_interval = config.recorder.anchor_interval();

    match cli.command {
        Commands::Capture { input, out, pretty } => {
            let file = std::fs::File::open(&input)
                .with_context(|| format!("Failed to open sample log {:?}", input))?;

            let mut session = CaptureSession::new(config.recorder);
            let sender = session.sender();
            let mut echo = InstructionLog::new();

            for (line_no, line) in BufReader::new(file).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let sample: PointerSample = serde_json::from_str(&line)
                    .with_context(|| format!("{:?} line {}: invalid sample", input, line_no + 1))?;
                sender.send_sample(sample)?;
                session.pump(&mut echo);
            }

            let recording = session.finish(&mut echo);
            tracing::info!(
                segments = recording.len(),
                strokes = recording.stroke_count(),
                live_lines = echo.line_count(),
                "capture complete"
            );

            match out {
                Some(path) => codec::save_to_file(&recording, &path)?,
                None if pretty => println!("{}", serialize_pretty(&recording)),
                None => println!("{}", serialize(&recording)),
            }
        }

        Commands::Schedule { recording } => {
            let recording = codec::load_from_file(&recording)?;
            let schedule = PlaybackSchedule::build(&recording, anchor_interval);

            for entry in &schedule {
                println!("{:>8} ms  {}", entry.offset.as_millis(), entry.instruction);
            }
        }

        Commands::Play { recording, speed } => {
            let recording = codec::load_from_file(&recording)?;
            let schedule = PlaybackSchedule::build(&recording, anchor_interval);
            let speed = speed.unwrap_or(config.playback.speed);

            tracing::info!(
                instructions = schedule.len(),
                duration_ms = schedule.total_duration().as_millis() as u64,
                speed,
                "Starting playback"
            );

            let outcome = spawn_playback(schedule, TracingRenderer::new(), speed).join()?;
            tracing::info!(applied = outcome.applied, "Playback finished");
        }

        Commands::Inspect { recording } => {
            let recording = codec::load_from_file(&recording)?;

            println!("segments:          {}", recording.len());
            println!("strokes:           {}", recording.stroke_count());
            println!("anchors:           {}", recording.anchor_count());
            println!(
                "playback duration: {} ms",
                recording.playback_duration(anchor_interval).as_millis()
            );
        }
    }

    Ok(())
}
