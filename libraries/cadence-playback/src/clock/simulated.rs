//! Timer-driven clock for tracks without real media

use super::{ClockContext, PlaybackClock};
use crate::events::SyncPlan;
use crate::input::{ClockSignal, SignalSender};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Repeating timer that ticks only while playing
///
/// Each firing sends `Tick { elapsed: period }`. The timer task is
/// replaced whenever the track or the play flag changes, so at most one
/// is alive at a time. Must be synced from inside a tokio runtime.
#[derive(Debug)]
pub struct SimulatedClock {
    period: Duration,
    signals: Option<SignalSender>,
    timer: Option<JoinHandle<()>>,
}

impl SimulatedClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            signals: None,
            timer: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a timer task is currently scheduled
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn start_timer(&mut self, generation: u64) {
        let Some(signals) = self.signals.clone() else {
            return;
        };
        let period = self.period;

        self.timer = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let tick = ClockSignal::Tick {
                    generation,
                    elapsed: period,
                };
                if !signals.send(tick) {
                    break;
                }
            }
        }));
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl PlaybackClock for SimulatedClock {
    fn attach(&mut self, signals: SignalSender) {
        self.signals = Some(signals);
    }

    fn sync(&mut self, plan: &SyncPlan, ctx: &ClockContext<'_>) {
        if !plan.rebinds() {
            return;
        }

        self.stop_timer();
        if ctx.state.is_playing {
            debug!(
                track = %ctx.track.id,
                generation = ctx.generation,
                "Starting simulated timer"
            );
            self.start_timer(ctx.generation);
        }
    }

    fn release(&mut self) {
        self.stop_timer();
        self.signals = None;
    }
}

impl Drop for SimulatedClock {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PlayerInput;
    use crate::types::{PlayerState, Track};
    use tokio::sync::mpsc;

    fn state(is_playing: bool) -> PlayerState {
        PlayerState {
            is_playing,
            current_time: Duration::ZERO,
            current_track_id: "a".into(),
            volume: 75,
        }
    }

    fn rebind() -> SyncPlan {
        SyncPlan {
            play_state_changed: true,
            ..SyncPlan::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_while_playing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let track = Track::new("a", "A", "x", "", 10);
        let playing = state(true);

        let mut clock = SimulatedClock::new(Duration::from_millis(250));
        clock.attach(SignalSender::new(&tx));
        clock.sync(
            &rebind(),
            &ClockContext {
                state: &playing,
                track: &track,
                generation: 4,
            },
        );
        assert!(clock.is_running());

        let input = rx.recv().await.unwrap();
        assert_eq!(
            input,
            PlayerInput::Signal(ClockSignal::Tick {
                generation: 4,
                elapsed: Duration::from_millis(250),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let track = Track::new("a", "A", "x", "", 10);
        let playing = state(true);
        let paused = state(false);

        let mut clock = SimulatedClock::default();
        clock.attach(SignalSender::new(&tx));
        clock.sync(
            &rebind(),
            &ClockContext {
                state: &playing,
                track: &track,
                generation: 1,
            },
        );
        clock.sync(
            &rebind(),
            &ClockContext {
                state: &paused,
                track: &track,
                generation: 2,
            },
        );
        assert!(!clock.is_running());

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_volume_change_keeps_timer() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let track = Track::new("a", "A", "x", "", 10);
        let playing = state(true);
        let ctx = ClockContext {
            state: &playing,
            track: &track,
            generation: 1,
        };

        let mut clock = SimulatedClock::default();
        clock.attach(SignalSender::new(&tx));
        clock.sync(&rebind(), &ctx);

        let volume_only = SyncPlan {
            volume_changed: true,
            ..SyncPlan::default()
        };
        clock.sync(&volume_only, &ctx);
        assert!(clock.is_running());

        clock.release();
        assert!(!clock.is_running());
    }
}
