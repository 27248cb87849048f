//! Player driver
//!
//! Couples the state machine with a clock strategy. [`PlayerCore`] applies
//! one input at a time and keeps the clock in step; [`Player`] runs it as an
//! async loop over a single input queue and publishes snapshots.

use crate::{
    catalog::Catalog,
    clock::{ClockContext, PlaybackClock},
    error::{PlaybackError, Result},
    events::{PlayerEvent, SyncPlan},
    input::{ClockSignal, Intent, PlayerInput, SignalSender},
    machine::PlayerMachine,
    types::{PlayerConfig, PlayerSnapshot, TrackId},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace, warn};

/// Runtime-agnostic player core
///
/// Every input is applied to the machine, the resulting events are
/// drained and coalesced into a [`SyncPlan`], and the plan is pushed into
/// the clock before the next input is looked at.
pub struct PlayerCore<C: PlaybackClock> {
    machine: PlayerMachine,
    clock: C,
    released: bool,
}

impl<C: PlaybackClock> PlayerCore<C> {
    /// Bind `clock` to `machine` and bring it in line with the initial state
    pub fn new(machine: PlayerMachine, mut clock: C, signals: SignalSender) -> Self {
        clock.attach(signals);
        let ctx = ClockContext {
            state: machine.state(),
            track: machine.current_track(),
            generation: machine.generation(),
        };
        clock.sync(&SyncPlan::full(), &ctx);

        Self {
            machine,
            clock,
            released: false,
        }
    }

    pub fn machine(&self) -> &PlayerMachine {
        &self.machine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.machine.snapshot()
    }

    /// Apply a user intent
    pub fn handle_intent(&mut self, intent: Intent) -> Result<Vec<PlayerEvent>> {
        match intent {
            Intent::TogglePlay => self.machine.toggle_play(),
            Intent::Next => self.machine.next(),
            Intent::Previous => self.machine.previous(),
            Intent::SelectTrack(id) => self.machine.select_track(&id)?,
            Intent::Seek(position) => self.machine.seek(position),
            Intent::SetVolume(level) => self.machine.set_volume(level),
            Intent::ToggleMute => self.machine.toggle_mute(),
        }
        Ok(self.settle())
    }

    /// Apply a clock signal, discarding it if its generation is stale
    pub fn handle_signal(&mut self, signal: ClockSignal) -> Vec<PlayerEvent> {
        let current = self.machine.generation();
        if signal.generation() != current {
            trace!(?signal, current, "Dropping stale clock signal");
            return Vec::new();
        }

        match signal {
            ClockSignal::Tick { elapsed, .. } => self.machine.tick(elapsed),
            ClockSignal::TimeReport { position, .. } => self.machine.report_time(position),
            ClockSignal::Ended { .. } => self.machine.track_ended(),
            ClockSignal::StartRejected { generation, reason } => {
                self.machine.playback_rejected(generation, &reason);
            }
        }
        self.settle()
    }

    /// Tear down the clock; safe to call more than once
    pub fn release(&mut self) {
        if !self.released {
            self.clock.release();
            self.released = true;
        }
    }

    fn settle(&mut self) -> Vec<PlayerEvent> {
        let events = self.machine.drain_events();
        let plan = SyncPlan::from_events(&events);

        if !plan.is_empty() {
            let ctx = ClockContext {
                state: self.machine.state(),
                track: self.machine.current_track(),
                generation: self.machine.generation(),
            };
            self.clock.sync(&plan, &ctx);
        }

        events
    }
}

impl<C: PlaybackClock> Drop for PlayerCore<C> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Async player loop
///
/// Owns the receiving end of the input queue. The loop ends on
/// [`PlayerInput::Shutdown`] or once every [`PlayerHandle`] is dropped;
/// clock signal senders do not keep it alive.
pub struct Player<C: PlaybackClock> {
    core: PlayerCore<C>,
    inputs: mpsc::UnboundedReceiver<PlayerInput>,
    snapshots: watch::Sender<PlayerSnapshot>,
}

impl<C: PlaybackClock> Player<C> {
    /// Create a player and the handle used to control it
    pub fn new(catalog: Arc<Catalog>, config: &PlayerConfig, clock: C) -> (Self, PlayerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let machine = PlayerMachine::new(Arc::clone(&catalog), config);
        let core = PlayerCore::new(machine, clock, SignalSender::new(&tx));
        let (snapshots, snapshot_rx) = watch::channel(core.snapshot());

        let handle = PlayerHandle {
            inputs: tx,
            snapshots: snapshot_rx,
            catalog,
        };

        (
            Self {
                core,
                inputs: rx,
                snapshots,
            },
            handle,
        )
    }

    /// Process inputs until shutdown
    pub async fn run(mut self) {
        debug!("Player loop started");

        while let Some(input) = self.inputs.recv().await {
            let events = match input {
                PlayerInput::Intent(intent) => match self.core.handle_intent(intent) {
                    Ok(events) => events,
                    Err(error) => {
                        warn!(%error, "Ignoring intent");
                        continue;
                    }
                },
                PlayerInput::Signal(signal) => self.core.handle_signal(signal),
                PlayerInput::Shutdown => break,
            };

            if !events.is_empty() {
                self.snapshots.send_replace(self.core.snapshot());
            }
        }

        self.core.release();
        debug!("Player loop stopped");
    }
}

/// Cloneable control handle for a running [`Player`]
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    inputs: mpsc::UnboundedSender<PlayerInput>,
    snapshots: watch::Receiver<PlayerSnapshot>,
    catalog: Arc<Catalog>,
}

impl PlayerHandle {
    /// Queue an intent
    pub fn send(&self, intent: Intent) -> Result<()> {
        self.inputs
            .send(PlayerInput::Intent(intent))
            .map_err(|_| PlaybackError::Closed)
    }

    pub fn toggle_play(&self) -> Result<()> {
        self.send(Intent::TogglePlay)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Result<()> {
        self.send(Intent::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(Intent::Previous)
    }

    /// Select a track; unknown ids are rejected before anything is queued
    pub fn select_track(&self, id: impl Into<TrackId>) -> Result<()> {
        let id = id.into();
        if self.catalog.get(&id).is_none() {
            return Err(PlaybackError::UnknownTrack(id));
        }
        self.send(Intent::SelectTrack(id))
    }

    pub fn seek(&self, position: Duration) -> Result<()> {
        self.send(Intent::Seek(position))
    }

    pub fn set_volume(&self, level: u8) -> Result<()> {
        self.send(Intent::SetVolume(level))
    }

    pub fn toggle_mute(&self) -> Result<()> {
        self.send(Intent::ToggleMute)
    }

    /// Ask the loop to stop and release its clock
    pub fn shutdown(&self) -> Result<()> {
        self.inputs
            .send(PlayerInput::Shutdown)
            .map_err(|_| PlaybackError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.inputs.is_closed()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshots.clone()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Track;

    /// Clock that records sync plans and never emits signals
    #[derive(Default)]
    struct NullClock {
        plans: Vec<SyncPlan>,
        released: usize,
    }

    impl PlaybackClock for NullClock {
        fn attach(&mut self, _signals: SignalSender) {}

        fn sync(&mut self, plan: &SyncPlan, _ctx: &ClockContext<'_>) {
            self.plans.push(*plan);
        }

        fn release(&mut self) {
            self.released += 1;
        }
    }

    fn core() -> (PlayerCore<NullClock>, mpsc::UnboundedSender<PlayerInput>) {
        let catalog = Arc::new(
            Catalog::new(vec![
                Track::new("a", "A", "x", "", 10),
                Track::new("b", "B", "x", "", 20),
            ])
            .unwrap(),
        );
        let (tx, _rx) = mpsc::unbounded_channel();
        let machine = PlayerMachine::new(catalog, &PlayerConfig::default());
        (
            PlayerCore::new(machine, NullClock::default(), SignalSender::new(&tx)),
            tx,
        )
    }

    #[test]
    fn test_initial_full_sync() {
        let (core, _tx) = core();
        assert_eq!(core.clock().plans, vec![SyncPlan::full()]);
    }

    #[test]
    fn test_intent_syncs_clock() {
        let (mut core, _tx) = core();
        let events = core.handle_intent(Intent::TogglePlay).unwrap();
        assert_eq!(events, vec![PlayerEvent::PlayStateChanged { is_playing: true }]);

        let last = core.clock().plans.last().copied().unwrap();
        assert!(last.play_state_changed);
    }

    #[test]
    fn test_position_only_change_does_not_sync() {
        let (mut core, _tx) = core();
        core.handle_intent(Intent::TogglePlay).unwrap();
        let syncs = core.clock().plans.len();

        let generation = core.machine().generation();
        let events = core.handle_signal(ClockSignal::Tick {
            generation,
            elapsed: Duration::from_secs(1),
        });
        assert_eq!(events.len(), 1);
        assert_eq!(core.clock().plans.len(), syncs);
    }

    #[test]
    fn test_stale_signal_is_dropped() {
        let (mut core, _tx) = core();
        core.handle_intent(Intent::TogglePlay).unwrap();
        let stale = core.machine().generation();
        core.handle_intent(Intent::Next).unwrap();

        let events = core.handle_signal(ClockSignal::Ended { generation: stale });
        assert!(events.is_empty());
        assert_eq!(core.machine().state().current_track_id.as_str(), "b");
    }

    #[test]
    fn test_unknown_track_intent_is_an_error() {
        let (mut core, _tx) = core();
        let result = core.handle_intent(Intent::SelectTrack("zz".into()));
        assert!(matches!(result, Err(PlaybackError::UnknownTrack(_))));
    }

    #[test]
    fn test_release_is_idempotent() {
        let (mut core, _tx) = core();
        core.release();
        core.release();
        assert_eq!(core.clock().released, 1);
    }
}
