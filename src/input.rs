//! Manual override input
//!
//! Global key listener for presenter overrides. Uses keys the slide
//! software itself ignores, so an override does not double-fire the deck:
//! F10 = next, F9 = previous, F8 = pause/resume.

use rdev::{listen, Event, EventType, Key};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::warn;

use crate::navigator::NavCommand;

/// Start the global key listener.
///
/// Returns a receiver for override commands. The listener stops emitting
/// once `shutdown` is set; rdev offers no clean unhook, so the thread
/// goes quiet and dies with the process.
pub fn start_listener(shutdown: Arc<AtomicBool>) -> Receiver<NavCommand> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let callback = move |event: Event| {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            if let EventType::KeyPress(key) = event.event_type {
                let cmd = match key {
                    Key::F10 => Some(NavCommand::Next),
                    Key::F9 => Some(NavCommand::Previous),
                    Key::F8 => Some(NavCommand::PauseToggle),
                    _ => None,
                };
                if let Some(cmd) = cmd {
                    let _ = tx.send(cmd);
                }
            }
        };

        // Blocks until an error occurs
        if let Err(e) = listen(callback) {
            warn!("Key listener error: {:?}", e);
        }
    });

    rx
}
