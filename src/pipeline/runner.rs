//! Readout orchestrator: phrase → tune → synthesize → play.
//!
//! [`ReadoutOrchestrator`] owns the [`SharedState`] and responds to
//! [`ReadoutCommand`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Flow
//!
//! ```text
//! ReadoutCommand::Speak(text)
//!   └─▶ busy? ── RejectWhileBusy ──▶ ignored
//!             └─ CancelAndRestart ─▶ abort synthesis, stop player
//!   └─▶ tune(text) → spawn(synthesize_text)          [Synthesizing]
//!         ├─ Ok  → spawn_blocking(player.play)       [Playing]
//!         │          └─ on_finished                   [Idle]
//!         └─ Err → last_error                        [Idle]
//!
//! ReadoutCommand::Stop
//!   └─▶ abort synthesis, stop player                  [Idle]
//! ```
//!
//! Every readout gets a generation number; completions carrying an older
//! generation are dropped, so a cancelled readout can never move the state.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{AppConfig, BusyPolicy};
use crate::playback::{AudioPlayer, PlaybackError};
use crate::synthesis::{SpeechSynthesizer, SynthesisError};
use crate::tuning::{speed_for_duration, SpeechTuner, SynthesisParameters};

use super::state::{lock_status, ReadoutState, SharedState};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Why a readout ended without playing to completion.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("playback failed: {0}")]
    Playback(#[from] PlaybackError),

    /// A background task panicked or was lost.
    #[error("internal error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// Commands and completions
// ---------------------------------------------------------------------------

/// Requests accepted by [`ReadoutOrchestrator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadoutCommand {
    /// Read a phrase aloud.
    Speak(String),
    /// Silence the current readout.
    Stop,
}

/// Completions reported back to the loop by background work.
#[derive(Debug)]
enum Completion {
    Synthesized {
        generation: u64,
        result: Result<Vec<u8>, SynthesisError>,
    },
    PlaybackFinished {
        generation: u64,
    },
}

// ---------------------------------------------------------------------------
// ReadoutOrchestrator
// ---------------------------------------------------------------------------

/// Drives readouts through the synthesis engine and the audio player.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use yomiage::config::AppConfig;
/// use yomiage::pipeline::{new_shared_state, ReadoutCommand, ReadoutOrchestrator};
/// use yomiage::playback::WavFilePlayer;
/// use yomiage::synthesis::VoicevoxClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = AppConfig::default();
/// let state = new_shared_state();
/// let orchestrator = ReadoutOrchestrator::new(
///     state.clone(),
///     Arc::new(VoicevoxClient::from_config(&config.synthesis)?),
///     Arc::new(WavFilePlayer::new(config.output_dir())),
///     &config,
/// );
///
/// let (tx, rx) = tokio::sync::mpsc::channel(8);
/// tx.send(ReadoutCommand::Speak("ねがいましては…".into())).await?;
/// drop(tx);
/// orchestrator.run(rx).await;
/// # Ok(())
/// # }
/// ```
pub struct ReadoutOrchestrator {
    state: SharedState,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Arc<dyn AudioPlayer>,
    tuner: SpeechTuner,
    base: SynthesisParameters,
    speaker: u32,
    busy_policy: BusyPolicy,
    generation: u64,
    synth_task: Option<JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl ReadoutOrchestrator {
    /// Create a new orchestrator.
    ///
    /// The base speech speed comes from `config.drill.speech_duration_secs`,
    /// the voice from `config.synthesis.speaker_id` and the busy behaviour
    /// from `config.readout.busy_policy`.
    pub fn new(
        state: SharedState,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn AudioPlayer>,
        config: &AppConfig,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state,
            synthesizer,
            player,
            tuner: SpeechTuner::new(),
            base: SynthesisParameters::with_speed(speed_for_duration(
                config.drill.speech_duration_secs,
            )),
            speaker: config.synthesis.speaker_id,
            busy_policy: config.readout.busy_policy,
            generation: 0,
            synth_task: None,
            completions_tx,
            completions_rx,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run until `commands` is closed and the last readout has finished.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ReadoutCommand>) {
        let mut commands_open = true;

        loop {
            if !commands_open && !self.is_busy() {
                break;
            }

            tokio::select! {
                command = commands.recv(), if commands_open => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        log::debug!("readout: command channel closed");
                        commands_open = false;
                    }
                },
                Some(completion) = self.completions_rx.recv() => {
                    self.handle_completion(completion).await;
                }
            }
        }

        log::info!("readout: orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    fn handle_command(&mut self, command: ReadoutCommand) {
        match command {
            ReadoutCommand::Speak(text) => self.handle_speak(text),
            ReadoutCommand::Stop => {
                log::debug!("readout: stop requested");
                self.cancel_current();
                self.set_state(ReadoutState::Idle);
            }
        }
    }

    fn handle_speak(&mut self, text: String) {
        if self.is_busy() {
            match self.busy_policy {
                BusyPolicy::RejectWhileBusy => {
                    log::info!("readout: busy, request rejected");
                    return;
                }
                BusyPolicy::CancelAndRestart => {
                    log::debug!("readout: busy, cancelling current readout");
                    self.cancel_current();
                }
            }
        }

        self.generation += 1;
        let generation = self.generation;
        let params = self.tuner.tune(&text, self.base);

        {
            let mut st = lock_status(&self.state);
            st.state = ReadoutState::Synthesizing;
            st.text = Some(text.clone());
            st.last_error = None;
        }
        log::debug!("readout #{generation}: → Synthesizing");

        let synthesizer = Arc::clone(&self.synthesizer);
        let speaker = self.speaker;
        let tx = self.completions_tx.clone();
        self.synth_task = Some(tokio::spawn(async move {
            let result = synthesizer.synthesize_text(&text, speaker, &params).await;
            let _ = tx.send(Completion::Synthesized { generation, result });
        }));
    }

    // -----------------------------------------------------------------------
    // Completion handlers
    // -----------------------------------------------------------------------

    async fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Synthesized { generation, result } => {
                if generation != self.generation {
                    log::debug!("readout #{generation}: stale synthesis result dropped");
                    return;
                }
                self.synth_task = None;
                match result {
                    Ok(audio) => self.start_playback(generation, audio).await,
                    Err(e) => self.set_error(PipelineError::from(e)),
                }
            }
            Completion::PlaybackFinished { generation } => {
                if generation != self.generation {
                    log::debug!("readout #{generation}: stale playback completion dropped");
                    return;
                }
                let mut st = lock_status(&self.state);
                if st.state == ReadoutState::Playing {
                    st.state = ReadoutState::Idle;
                    st.completed += 1;
                    log::debug!("readout #{generation}: Playing → Idle");
                }
            }
        }
    }

    async fn start_playback(&mut self, generation: u64, audio: Vec<u8>) {
        self.set_state(ReadoutState::Playing);
        log::debug!("readout #{generation}: → Playing ({} bytes)", audio.len());

        let player = Arc::clone(&self.player);
        let tx = self.completions_tx.clone();
        let on_finished = Box::new(move || {
            let _ = tx.send(Completion::PlaybackFinished { generation });
        });

        let result = tokio::task::spawn_blocking(move || player.play(audio, on_finished)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.set_error(PipelineError::from(e)),
            Err(e) => self.set_error(PipelineError::Internal(e.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Invalidate the current readout and silence it.
    fn cancel_current(&mut self) {
        self.generation += 1;
        if let Some(task) = self.synth_task.take() {
            task.abort();
        }
        self.player.stop();
    }

    fn is_busy(&self) -> bool {
        lock_status(&self.state).state.is_busy()
    }

    fn set_state(&self, state: ReadoutState) {
        lock_status(&self.state).state = state;
    }

    fn set_error(&self, error: PipelineError) {
        let message = error.to_string();
        let mut st = lock_status(&self.state);
        st.state = ReadoutState::Idle;
        st.last_error = Some(message.clone());
        log::error!("readout error: {message}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
