//! Audio capture module using cpal
//!
//! The capture callback pushes fixed-size frames into a bounded queue;
//! the recognition worker pops from the other end. When the queue is full
//! the frame is dropped rather than blocking the device callback.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use tracing::{info, warn};

const SAMPLE_RATE: u32 = 16000;
const FRAME_SIZE: usize = 1024;
/// Bound on queued frames (~4 s of audio at 16 kHz / 1024-sample frames)
const QUEUE_CAPACITY: usize = 64;

/// Print available input devices
pub fn list_devices() -> Result<()> {
    let host = cpal::default_host();
    info!("Available audio input devices:");
    for (i, device) in host.input_devices()?.enumerate() {
        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("  [{}] {}", i, name);
    }
    Ok(())
}

/// Start audio capture and return a receiver for audio frames.
///
/// The stream stops feeding the queue once `shutdown` is set; the
/// receiver then observes a closed channel and the recognition worker
/// exits.
pub fn start_capture(
    device_index: Option<usize>,
    shutdown: Arc<AtomicBool>,
) -> Result<Receiver<Vec<i16>>> {
    let host = cpal::default_host();

    let device = if let Some(idx) = device_index {
        host.input_devices()?
            .nth(idx)
            .context("Device index out of range")?
    } else {
        host.default_input_device()
            .context("No default input device")?
    };

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    info!("Using audio device: {}", device_name);

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Fixed(FRAME_SIZE as u32),
    };

    let (tx, rx): (SyncSender<Vec<i16>>, Receiver<Vec<i16>>) = mpsc::sync_channel(QUEUE_CAPACITY);

    let stream = device.build_input_stream(
        &config,
        move |data: &[i16], _: &cpal::InputCallbackInfo| {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            match tx.try_send(data.to_vec()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("Audio queue full, dropping frame");
                }
                Err(TrySendError::Disconnected(_)) => {}
            }
        },
        |err| {
            warn!("Audio stream error: {}", err);
        },
        None,
    )?;

    stream.play()?;

    // The stream lives for the session; dropping it would stop capture.
    // Shutdown is handled by the flag, so leaking here is deliberate.
    std::mem::forget(stream);

    Ok(rx)
}
