//! Playback clock strategies
//!
//! A clock is whatever makes time pass for the player: a repeating timer
//! ([`SimulatedClock`]) or a real media surface reporting its own position
//! ([`SurfaceClock`]). The driver tells the clock what changed after each
//! transition; the clock answers with [`ClockSignal`](crate::ClockSignal)s
//! on the player's input queue.

#[cfg(feature = "runtime")]
mod simulated;
mod surface;

#[cfg(feature = "runtime")]
pub use simulated::SimulatedClock;
pub use surface::SurfaceClock;

use crate::events::SyncPlan;
use crate::input::SignalSender;
use crate::types::{PlayerState, Track};

/// State the clock needs to act on a [`SyncPlan`]
#[derive(Debug, Clone, Copy)]
pub struct ClockContext<'a> {
    pub state: &'a PlayerState,
    pub track: &'a Track,
    pub generation: u64,
}

/// Time source bound to one player
///
/// Implementations keep at most one live timer or listener set per
/// `(track, playing)` binding and leave nothing running after
/// [`release`](PlaybackClock::release).
pub trait PlaybackClock {
    /// Connect the clock to the player's input queue
    ///
    /// Called once, before the first [`sync`](PlaybackClock::sync).
    fn attach(&mut self, signals: SignalSender);

    /// Apply the changes described by `plan`
    fn sync(&mut self, plan: &SyncPlan, ctx: &ClockContext<'_>);

    /// Stop all timers and listeners
    fn release(&mut self);
}

impl<C: PlaybackClock + ?Sized> PlaybackClock for Box<C> {
    fn attach(&mut self, signals: SignalSender) {
        (**self).attach(signals);
    }

    fn sync(&mut self, plan: &SyncPlan, ctx: &ClockContext<'_>) {
        (**self).sync(plan, ctx);
    }

    fn release(&mut self) {
        (**self).release();
    }
}
