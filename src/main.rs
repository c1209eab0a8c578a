//! Slidekick - speech-driven slide navigation
//!
//! Listens to the presenter, matches the live transcript against the
//! expected script, and advances the deck when confidence is high enough.

use anyhow::Result;
use clap::Parser;
use slidekick::asr::VoskAsr;
use slidekick::config::Config;
use slidekick::core::load_sections;
use slidekick::embed::{Embedder, OpenAiEmbedder};
use slidekick::matching::{PhoneticUnit, SemanticUnit, SimilarityEngine};
use slidekick::navigator::driver::{DeckDriver, NullDriver, VirtualDeckDriver};
use slidekick::session::Session;
use slidekick::{audio, input};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the aligned script (JSON section list)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Audio input device index
    #[arg(short, long)]
    device: Option<usize>,

    /// List audio input devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Run the full pipeline but only log navigation, never press keys
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎞️ Slidekick v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.list_devices {
        audio::list_devices()?;
        return Ok(());
    }

    let config = Config::load()?;
    let script_path = args
        .script
        .ok_or_else(|| anyhow::anyhow!("--script <path> is required"))?;
    let sections = load_sections(&script_path)?;

    // Matching stack: embeddings for meaning, metaphone codes for sound
    let embedder = Arc::new(OpenAiEmbedder::from_config(&config)?);
    info!(
        "🧮 Embedder: {} ({} dims)",
        config.embed_model,
        embedder.dimension()
    );
    let engine = SimilarityEngine::new(
        Box::new(SemanticUnit::new(embedder)),
        Box::new(PhoneticUnit::new(config.phonetic_cache_size)),
        config.semantic_weight,
        config.phonetic_weight,
        config.score_floor,
    );

    let driver: Box<dyn DeckDriver> = if args.dry_run {
        info!("🧪 Dry run: navigation will be logged, not executed");
        Box::new(NullDriver::default())
    } else {
        Box::new(VirtualDeckDriver::new()?)
    };

    let session = Session::new(config.clone(), sections, engine, driver)?;
    let shutdown = session.shutdown_flag();

    // Workers: audio -> recognition -> shared state <- manual input
    let audio_rx = audio::start_capture(args.device, Arc::clone(&shutdown))?;
    info!("🎙️ Audio capture started");
    let asr = Box::new(VoskAsr::new(&config)?);
    let recognition = session.spawn_recognition_worker(audio_rx, asr);

    let input_rx = input::start_listener(Arc::clone(&shutdown));
    let manual = session.spawn_manual_worker(input_rx);

    info!("✅ Slidekick ready - F10 next, F9 previous, F8 pause");

    tokio::select! {
        _ = session.run_navigation_loop() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    session.stop();
    let _ = recognition.join();
    let _ = manual.join();

    info!("👋 Session ended");
    Ok(())
}
