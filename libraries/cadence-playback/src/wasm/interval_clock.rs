//! `setInterval` based simulated clock

use crate::clock::{ClockContext, PlaybackClock};
use crate::events::SyncPlan;
use crate::input::{ClockSignal, SignalSender};
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Browser counterpart of [`SimulatedClock`](crate::clock)
///
/// Ticks by `period` through `window.setInterval` while playing. The
/// interval is cleared and recreated whenever the track or play flag
/// changes.
pub struct IntervalClock {
    period: Duration,
    signals: Option<SignalSender>,
    timer: Option<(i32, Closure<dyn FnMut()>)>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            signals: None,
            timer: None,
        }
    }

    fn stop_timer(&mut self) {
        if let Some((handle, _callback)) = self.timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    fn start_timer(&mut self, generation: u64) {
        let Some(signals) = self.signals.clone() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            warn!("No window available, simulated clock disabled");
            return;
        };

        let elapsed = self.period;
        let callback = Closure::wrap(Box::new(move || {
            signals.send(ClockSignal::Tick {
                generation,
                elapsed,
            });
        }) as Box<dyn FnMut()>);

        let millis = i32::try_from(self.period.as_millis()).unwrap_or(i32::MAX);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(handle) => self.timer = Some((handle, callback)),
            Err(error) => warn!(?error, "Failed to start interval"),
        }
    }
}

impl PlaybackClock for IntervalClock {
    fn attach(&mut self, signals: SignalSender) {
        self.signals = Some(signals);
    }

    fn sync(&mut self, plan: &SyncPlan, ctx: &ClockContext<'_>) {
        if !plan.rebinds() {
            return;
        }

        self.stop_timer();
        if ctx.state.is_playing {
            debug!(track = %ctx.track.id, generation = ctx.generation, "Starting interval");
            self.start_timer(ctx.generation);
        }
    }

    fn release(&mut self) {
        self.stop_timer();
        self.signals = None;
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
