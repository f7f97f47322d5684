//! Session driver: polls the engine on a fixed cadence and turns its output
//! into events for a renderer.
//!
//! The driver owns the engine, so every engine call happens on the driver's
//! task. After a completion the driver waits for an explicit acknowledgement
//! before resetting the display; no further renders are emitted meanwhile.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::controls::{self, Action, ActionOutcome};
use crate::config::HostConfig;
use crate::engine::{EngineError, SessionEngine};
use crate::sound::SoundPlayer;
use crate::types::{DisplayState, SessionKind};

/// Title shown with every completion.
pub const COMPLETION_TITLE: &str = "時間です";

/// Message shown when `kind` has just completed.
pub fn completion_message(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Work => "休憩の時間です",
        SessionKind::Break => "作業に戻りましょう",
    }
}

// ============================================================================
// Commands and Events
// ============================================================================

/// Input to the driver from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// A user action
    Action(Action),
    /// Dismiss the completion alert
    Acknowledge,
    /// Stop the driver loop
    Quit,
}

/// Output from the driver to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DriverEvent {
    /// Periodic display update
    Render(DisplayState),
    /// A session expired; the host must ask the user to acknowledge
    Completed {
        /// Kind of session that ended
        kind: SessionKind,
        /// Alert title
        title: &'static str,
        /// Alert message
        message: &'static str,
    },
    /// Result of a user action
    Action {
        /// What the action did
        outcome: ActionOutcome,
    },
    /// The display returned to its default projection
    Reset(DisplayState),
}

// ============================================================================
// SessionDriver
// ============================================================================

/// Drives a [`SessionEngine`] from a clock and host commands.
pub struct SessionDriver {
    engine: SessionEngine,
    clock: Arc<dyn Clock>,
    sound: Arc<dyn SoundPlayer>,
    config: HostConfig,
    awaiting_ack: Option<SessionKind>,
}

impl SessionDriver {
    /// Creates a driver around an idle engine.
    pub fn new(config: HostConfig, clock: Arc<dyn Clock>, sound: Arc<dyn SoundPlayer>) -> Self {
        Self {
            engine: SessionEngine::new(),
            clock,
            sound,
            config,
            awaiting_ack: None,
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    /// Returns the kind of the completion waiting for acknowledgement, if any.
    pub fn awaiting_ack(&self) -> Option<SessionKind> {
        self.awaiting_ack
    }

    /// The reset projection on this host's scale.
    pub fn reset_display(&self) -> DisplayState {
        DisplayState::reset(self.config.progress_scale)
    }

    /// Polls the engine once.
    ///
    /// Returns a render, or a render followed by a completion on expiry.
    /// Nothing is emitted while a completion awaits acknowledgement.
    pub fn poll(&mut self) -> Vec<DriverEvent> {
        if self.awaiting_ack.is_some() {
            return Vec::new();
        }

        let report = self.engine.tick(self.clock.now_ms());
        let display = DisplayState::from_report(&report, self.config.progress_scale);

        let Some(kind) = report.completed else {
            return vec![DriverEvent::Render(display)];
        };

        self.awaiting_ack = Some(kind);
        self.ring(kind);

        vec![
            DriverEvent::Render(display),
            DriverEvent::Completed {
                kind,
                title: COMPLETION_TITLE,
                message: completion_message(kind),
            },
        ]
    }

    /// Handles one host command.
    ///
    /// Returns the event to forward, if any. `Quit` yields nothing; the run
    /// loop ends on it before calling this.
    ///
    /// # Errors
    ///
    /// Propagates engine argument errors.
    pub fn handle(&mut self, command: DriverCommand) -> Result<Option<DriverEvent>, EngineError> {
        match command {
            DriverCommand::Action(action) => {
                if self.awaiting_ack.is_some() {
                    debug!(?action, "Action ignored until completion is acknowledged");
                    return Ok(Some(DriverEvent::Action {
                        outcome: ActionOutcome::Ignored,
                    }));
                }
                let outcome = controls::apply(&mut self.engine, action, self.clock.now_ms())?;
                Ok(Some(DriverEvent::Action { outcome }))
            }
            DriverCommand::Acknowledge => match self.awaiting_ack.take() {
                Some(kind) => {
                    debug!(kind = kind.as_str(), "Completion acknowledged");
                    self.engine.stop();
                    Ok(Some(DriverEvent::Reset(self.reset_display())))
                }
                None => Ok(None),
            },
            DriverCommand::Quit => Ok(None),
        }
    }

    /// Runs the driver loop until `Quit`, the command channel closes, or
    /// `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub async fn run<F>(
        mut self,
        mut commands: mpsc::UnboundedReceiver<DriverCommand>,
        events: mpsc::UnboundedSender<DriverEvent>,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(Duration::from_millis(self.config.tick_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        events
            .send(DriverEvent::Reset(self.reset_display()))
            .context("Failed to send initial display")?;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                command = commands.recv() => {
                    let command = match command {
                        None | Some(DriverCommand::Quit) => break,
                        Some(command) => command,
                    };
                    if let Some(event) = self.handle(command)? {
                        events.send(event).context("Failed to send action event")?;
                    }
                }
                _ = ticker.tick() => {
                    for event in self.poll() {
                        events.send(event).context("Failed to send tick event")?;
                    }
                }
            }
        }

        debug!("Driver loop finished");
        Ok(())
    }

    fn ring(&self, kind: SessionKind) {
        if self.sound.is_disabled() {
            debug!("Alert disabled, skipping");
            return;
        }
        if let Err(e) = self.sound.play(kind) {
            warn!("Failed to play alert: {} ({})", e, e.suggestion());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::clock::ManualClock;
    use crate::sound::MockSoundPlayer;
    use crate::types::{BREAK_EXTENSION_MS, WORK_DURATION_MS};

    fn create_driver() -> (SessionDriver, Arc<ManualClock>, Arc<MockSoundPlayer>) {
        let clock = Arc::new(ManualClock::new(0));
        let sound = Arc::new(MockSoundPlayer::new());
        let driver = SessionDriver::new(HostConfig::default(), clock.clone(), sound.clone());
        (driver, clock, sound)
    }

    fn render(events: &[DriverEvent]) -> &DisplayState {
        match events.first() {
            Some(DriverEvent::Render(display)) => display,
            other => panic!("Expected Render, got {:?}", other),
        }
    }

    mod poll_tests {
        use super::*;

        #[test]
        fn test_idle_poll_renders_reset() {
            let (mut driver, _clock, _sound) = create_driver();
            let events = driver.poll();

            assert_eq!(events.len(), 1);
            assert_eq!(render(&events), &driver.reset_display());
        }

        #[test]
        fn test_running_poll_renders_clock() {
            let (mut driver, clock, _sound) = create_driver();
            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();

            clock.set(50);
            let events = driver.poll();
            let display = render(&events);

            assert_eq!(display.clock, "24:59");
            assert_eq!(display.progress, 9_999);
            assert_eq!(display.kind, SessionKind::Work);
            assert!(display.running);
        }

        #[test]
        fn test_completion_emitted_once_and_rings() {
            let (mut driver, clock, sound) = create_driver();
            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();

            clock.set(WORK_DURATION_MS);
            let events = driver.poll();
            assert_eq!(events.len(), 2);
            assert_eq!(
                events[1],
                DriverEvent::Completed {
                    kind: SessionKind::Work,
                    title: COMPLETION_TITLE,
                    message: "休憩の時間です",
                }
            );
            assert_eq!(render(&events).clock, "00:00");
            assert_eq!(sound.get_play_calls(), vec![SessionKind::Work]);

            clock.advance(1_000);
            assert!(driver.poll().is_empty());
            assert_eq!(sound.play_count(), 1);
        }

        #[test]
        fn test_sound_failure_does_not_affect_engine() {
            let (mut driver, clock, sound) = create_driver();
            sound.set_should_fail(true);
            driver.handle(DriverCommand::Action(Action::BreakExtend)).unwrap();

            clock.set(BREAK_EXTENSION_MS);
            let events = driver.poll();

            assert!(matches!(
                events[1],
                DriverEvent::Completed {
                    kind: SessionKind::Break,
                    ..
                }
            ));
            assert_eq!(driver.awaiting_ack(), Some(SessionKind::Break));
            assert!(!driver.engine().is_running());
        }

        #[test]
        fn test_disabled_player_is_not_rung() {
            let (mut driver, clock, sound) = create_driver();
            sound.set_disabled(true);

            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();
            clock.set(WORK_DURATION_MS);
            let events = driver.poll();

            assert_eq!(events.len(), 2);
            assert_eq!(sound.play_count(), 0);
        }
    }

    mod command_tests {
        use super::*;

        #[test]
        fn test_acknowledge_resets() {
            let (mut driver, clock, _sound) = create_driver();
            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();
            clock.set(WORK_DURATION_MS);
            driver.poll();

            let event = driver.handle(DriverCommand::Acknowledge).unwrap();
            assert_eq!(event, Some(DriverEvent::Reset(driver.reset_display())));
            assert_eq!(driver.awaiting_ack(), None);

            // Rendering resumes with the reset projection.
            let events = driver.poll();
            assert_eq!(render(&events), &driver.reset_display());
        }

        #[test]
        fn test_acknowledge_without_completion_is_ignored() {
            let (mut driver, _clock, _sound) = create_driver();
            assert_eq!(driver.handle(DriverCommand::Acknowledge).unwrap(), None);
        }

        #[test]
        fn test_actions_ignored_while_awaiting_ack() {
            let (mut driver, clock, _sound) = create_driver();
            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();
            clock.set(WORK_DURATION_MS);
            driver.poll();

            let event = driver
                .handle(DriverCommand::Action(Action::BreakExtend))
                .unwrap();
            assert_eq!(
                event,
                Some(DriverEvent::Action {
                    outcome: ActionOutcome::Ignored
                })
            );
            assert!(!driver.engine().is_running());
        }

        #[test]
        fn test_stop_then_poll_is_idle() {
            let (mut driver, clock, _sound) = create_driver();
            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();
            clock.set(1_000);
            driver.handle(DriverCommand::Action(Action::StartStop)).unwrap();

            clock.set(WORK_DURATION_MS);
            let events = driver.poll();
            assert_eq!(events.len(), 1);
            assert_eq!(render(&events), &driver.reset_display());
        }
    }

    mod run_tests {
        use super::*;
        use tokio::time::timeout;

        #[tokio::test]
        async fn test_run_emits_initial_reset_and_quits() {
            let (driver, _clock, _sound) = create_driver();
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(driver.run(cmd_rx, ev_tx, std::future::pending()));

            let first = timeout(Duration::from_secs(1), ev_rx.recv()).await.unwrap();
            assert!(matches!(first, Some(DriverEvent::Reset(_))));

            cmd_tx.send(DriverCommand::Quit).unwrap();
            let result = timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn test_run_reports_completion() {
            let (driver, clock, _sound) = create_driver();
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(driver.run(cmd_rx, ev_tx, std::future::pending()));
            cmd_tx
                .send(DriverCommand::Action(Action::BreakExtend))
                .unwrap();

            let completed = timeout(Duration::from_secs(2), async {
                while let Some(event) = ev_rx.recv().await {
                    match event {
                        DriverEvent::Action { .. } => clock.set(BREAK_EXTENSION_MS),
                        DriverEvent::Completed { kind, .. } => return Some(kind),
                        _ => {}
                    }
                }
                None
            })
            .await
            .unwrap();

            handle.abort();
            assert_eq!(completed, Some(SessionKind::Break));
        }

        #[tokio::test]
        async fn test_run_stops_on_shutdown() {
            let (driver, _clock, _sound) = create_driver();
            let (_cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (ev_tx, _ev_rx) = mpsc::unbounded_channel();

            let shutdown = tokio::time::sleep(Duration::from_millis(100));
            let result = timeout(Duration::from_secs(1), driver.run(cmd_rx, ev_tx, shutdown)).await;

            assert!(matches!(result, Ok(Ok(()))));
        }
    }
}
