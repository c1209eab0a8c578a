//! Deck drivers
//!
//! Translates `go_to(section_index)` into actual slide-deck control. The
//! evdev driver emits Page Down / Page Up taps through a virtual
//! keyboard, which every mainstream presentation tool understands; the
//! null driver only logs, for dry runs and tests.

use crate::error::{NavError, NavResult};
use evdev::{uinput::VirtualDeviceBuilder, AttributeSet, Key};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// The navigation side effect: move the deck to an absolute section
pub trait DeckDriver: Send {
    fn go_to(&mut self, section_index: usize) -> NavResult<()>;
}

/// Drives the deck by simulating Page Down / Page Up key taps.
///
/// Tracks the deck position it last drove to, so an absolute target
/// translates into the right number of taps.
pub struct VirtualDeckDriver {
    device: evdev::uinput::VirtualDevice,
    position: usize,
}

impl VirtualDeckDriver {
    pub fn new() -> NavResult<Self> {
        let mut keys = AttributeSet::<Key>::new();
        keys.insert(Key::KEY_PAGEUP);
        keys.insert(Key::KEY_PAGEDOWN);

        let device = VirtualDeviceBuilder::new()
            .map_err(|e| NavError::Input(e.to_string()))?
            .name("Slidekick Virtual Keyboard")
            .with_keys(&keys)
            .map_err(|e| NavError::Input(e.to_string()))?
            .build()
            .map_err(|e| NavError::Input(format!("Failed to create virtual keyboard: {e}")))?;

        info!("⌨️ Virtual keyboard created");
        Ok(Self {
            device,
            position: 0,
        })
    }

    fn tap_key(&mut self, key: Key) -> NavResult<()> {
        debug!("Key tap: {:?}", key);
        self.device
            .emit(&[evdev::InputEvent::new(evdev::EventType::KEY, key.code(), 1)])
            .map_err(NavError::Io)?;
        thread::sleep(Duration::from_millis(10));
        self.device
            .emit(&[evdev::InputEvent::new(evdev::EventType::KEY, key.code(), 0)])
            .map_err(NavError::Io)?;
        Ok(())
    }
}

impl DeckDriver for VirtualDeckDriver {
    fn go_to(&mut self, section_index: usize) -> NavResult<()> {
        while self.position < section_index {
            self.tap_key(Key::KEY_PAGEDOWN)?;
            self.position += 1;
            thread::sleep(Duration::from_millis(30));
        }
        while self.position > section_index {
            self.tap_key(Key::KEY_PAGEUP)?;
            self.position -= 1;
            thread::sleep(Duration::from_millis(30));
        }
        Ok(())
    }
}

/// Log-only driver for `--dry-run` and tests
#[derive(Debug, Default)]
pub struct NullDriver {
    pub visited: Vec<usize>,
}

impl DeckDriver for NullDriver {
    fn go_to(&mut self, section_index: usize) -> NavResult<()> {
        info!("→ go_to(section {})", section_index);
        self.visited.push(section_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_driver_records_targets() {
        let mut driver = NullDriver::default();
        driver.go_to(2).unwrap();
        driver.go_to(1).unwrap();
        assert_eq!(driver.visited, vec![2, 1]);
    }
}
