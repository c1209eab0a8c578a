//! Presentation session
//!
//! Wires the long-lived workers together: audio capture feeds a bounded
//! frame queue, the recognition worker turns frames into normalized words
//! in shared state, the navigation worker scores a snapshot of that state
//! on a fixed tick, and the manual-input worker applies overrides the
//! moment they arrive. One shutdown flag, checked at every loop head and
//! blocking wait, stops all of them.

use crate::asr::AsrEngine;
use crate::config::Config;
use crate::core::{self, Chunk, Section};
use crate::error::{NavError, NavResult};
use crate::matching::SimilarityEngine;
use crate::navigator::driver::DeckDriver;
use crate::navigator::{decide_navigation, NavCommand, NavPhase, NavigationState, TickStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct Session {
    config: Config,
    sections: Arc<Vec<Section>>,
    chunks: Arc<Vec<Chunk>>,
    state: Arc<Mutex<NavigationState>>,
    shutdown: Arc<AtomicBool>,
    engine: Arc<SimilarityEngine>,
    driver: Arc<Mutex<Box<dyn DeckDriver>>>,
    status_tx: watch::Sender<TickStatus>,
    status_rx: watch::Receiver<TickStatus>,
}

impl Session {
    /// Validate configuration and pre-compute the chunk set.
    ///
    /// This is the only fatal path: a bad config or section list never
    /// reaches a running worker.
    pub fn new(
        config: Config,
        sections: Vec<Section>,
        engine: SimilarityEngine,
        driver: Box<dyn DeckDriver>,
    ) -> NavResult<Self> {
        config.validate()?;
        core::validate_sections(&sections)?;

        let chunks = core::generate_chunks(&sections, config.window_size);
        info!(
            "📚 {} sections -> {} chunks (window {})",
            sections.len(),
            chunks.len(),
            config.window_size
        );
        if chunks.is_empty() {
            warn!("Script shorter than one window; automatic navigation will never fire");
        }

        let state = NavigationState::new(config.window_size, sections.len());
        let (status_tx, status_rx) = watch::channel(TickStatus {
            total_sections: sections.len(),
            ..TickStatus::default()
        });

        Ok(Self {
            config,
            sections: Arc::new(sections),
            chunks: Arc::new(chunks),
            state: Arc::new(Mutex::new(state)),
            shutdown: Arc::new(AtomicBool::new(false)),
            engine: Arc::new(engine),
            driver: Arc::new(Mutex::new(driver)),
            status_tx,
            status_rx,
        })
    }

    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn state(&self) -> Arc<Mutex<NavigationState>> {
        Arc::clone(&self.state)
    }

    /// Watch side of the per-tick status readout
    pub fn status(&self) -> watch::Receiver<TickStatus> {
        self.status_rx.clone()
    }

    /// Recognition worker: pops audio frames, drives the ASR engine, and
    /// appends normalized words to the shared buffer in recognition order.
    pub fn spawn_recognition_worker(
        &self,
        audio_rx: Receiver<Vec<i16>>,
        mut asr: Box<dyn AsrEngine>,
    ) -> std::thread::JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let shutdown = Arc::clone(&self.shutdown);

        std::thread::spawn(move || {
            loop {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                let frame = match audio_rx.recv_timeout(Duration::from_millis(200)) {
                    Ok(frame) => frame,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                match asr.process(&frame) {
                    Ok(Some(result)) => {
                        debug!("📝 Heard ({:.2}): '{}'", result.confidence, result.text);
                        let normalized = core::normalize(&result.text);
                        if normalized.is_empty() {
                            continue;
                        }
                        let mut state = match state.lock() {
                            Ok(s) => s,
                            Err(_) => break,
                        };
                        if state.phase == NavPhase::Stopped {
                            break;
                        }
                        for word in normalized.split_whitespace() {
                            state.push_word(word.to_string());
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // Transient recognizer failure: skip, keep listening
                        warn!("ASR error, skipping frame: {}", e);
                    }
                }
            }
            debug!("Recognition worker exited");
        })
    }

    /// Manual-input worker: overrides apply immediately, outside the tick
    /// cadence, so a human is never stuck behind a scoring pass.
    pub fn spawn_manual_worker(&self, input_rx: Receiver<NavCommand>) -> std::thread::JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let driver = Arc::clone(&self.driver);
        let shutdown = Arc::clone(&self.shutdown);

        std::thread::spawn(move || {
            loop {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                let cmd = match input_rx.recv_timeout(Duration::from_millis(200)) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                info!("🎛️ Manual override: {:?}", cmd);
                let target = match state.lock() {
                    Ok(mut s) => s.apply_manual(cmd),
                    Err(_) => break,
                };
                if let Some(target) = target {
                    if let Ok(mut driver) = driver.lock() {
                        if let Err(e) = driver.go_to(target) {
                            warn!("Deck driver failed on manual move: {}", e);
                        }
                    }
                }
            }
            debug!("Manual-input worker exited");
        })
    }

    /// Navigation worker: one scoring pass per tick interval until the
    /// shutdown flag is raised.
    pub async fn run_navigation_loop(&self) {
        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.tick_interval_ms));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }
            if let Err(e) = self.tick().await {
                // Capability failure: skip this tick, keep the session alive
                warn!("Tick skipped: {}", e);
            }
        }
        debug!("Navigation worker exited");
    }

    /// One navigation tick: snapshot, select candidates, score, decide.
    ///
    /// The decision is committed only if no manual override landed while
    /// scoring was in flight.
    pub async fn tick(&self) -> NavResult<()> {
        let (phrase, current_index, snapshot_epoch) = {
            let state = self.state.lock()?;
            if state.phase != NavPhase::Matching {
                return Ok(());
            }
            (
                state.joined_words(),
                state.current_section_index,
                state.epoch,
            )
        };

        let current_section = self
            .sections
            .get(current_index)
            .ok_or_else(|| NavError::Script(format!("no section at index {current_index}")))?;

        let candidates = core::get_candidates(current_section, &self.chunks);
        if candidates.is_empty() {
            return Ok(());
        }

        let results = self.engine.compare(&phrase, &candidates).await?;

        let (best_match, best_score) = results
            .first()
            .map(|r| (r.chunk.partial_content.clone(), r.score))
            .unwrap_or_default();

        if let Some(target) = decide_navigation(&results, current_index, self.config.nav_threshold)
        {
            let committed = self.state.lock()?.commit_auto(target, snapshot_epoch);
            if committed {
                info!(
                    "🎯 Navigating to section {} (score {:.2})",
                    target, best_score
                );
                if let Err(e) = self.driver.lock()?.go_to(target) {
                    // Deck never moved: undo the commit so state stays in
                    // step with the deck
                    self.state
                        .lock()?
                        .revert_auto(current_index, target, snapshot_epoch);
                    return Err(e);
                }
            } else {
                debug!("Automatic decision discarded (manual override raced it)");
            }
        }

        let current_index = self.state.lock()?.current_section_index;
        let _ = self.status_tx.send(TickStatus {
            current_index,
            total_sections: self.sections.len(),
            heard: phrase,
            best_match,
            best_score,
        });

        Ok(())
    }

    /// Raise the shutdown flag; every worker observes it within one tick.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Ok(mut state) = self.state.lock() {
            state.stop();
        }
    }
}
