//! Sound-card playback through rodio.
//!
//! rodio's `OutputStream` is not `Send`, so each clip gets its own thread
//! that opens the default device, decodes the WAV bytes and polls the sink
//! until it drains or is stopped.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink};

use super::player::{AudioPlayer, OnFinished, PlaybackError};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Plays clips on the default output device.
#[derive(Default)]
pub struct RodioPlayer {
    /// Stop flag of the clip currently playing.
    current: Mutex<Option<Arc<AtomicBool>>>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&self, audio: Vec<u8>, on_finished: OnFinished) -> Result<(), PlaybackError> {
        self.stop();

        let stopped = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), PlaybackError>>();

        let flag = Arc::clone(&stopped);
        std::thread::spawn(move || {
            let (_stream, handle) = match OutputStream::try_default() {
                Ok(output) => output,
                Err(e) => {
                    let _ = ready_tx.send(Err(PlaybackError::Device(e.to_string())));
                    return;
                }
            };
            let source = match Decoder::new(Cursor::new(audio)) {
                Ok(source) => source,
                Err(e) => {
                    let _ = ready_tx.send(Err(PlaybackError::Decode(e.to_string())));
                    return;
                }
            };
            let sink = match Sink::try_new(&handle) {
                Ok(sink) => sink,
                Err(e) => {
                    let _ = ready_tx.send(Err(PlaybackError::Device(e.to_string())));
                    return;
                }
            };

            sink.append(source);
            let _ = ready_tx.send(Ok(()));

            while !sink.empty() {
                if flag.load(Ordering::SeqCst) {
                    sink.stop();
                    return;
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            if !flag.swap(true, Ordering::SeqCst) {
                on_finished();
            }
        });

        ready_rx
            .recv()
            .map_err(|_| PlaybackError::Device("playback thread exited".into()))??;

        if let Ok(mut current) = self.current.lock() {
            *current = Some(stopped);
        }
        Ok(())
    }

    fn stop(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(flag) = current.take() {
                flag.store(true, Ordering::SeqCst);
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.current
            .lock()
            .map(|c| c.as_ref().is_some_and(|flag| !flag.load(Ordering::SeqCst)))
            .unwrap_or(false)
    }
}
