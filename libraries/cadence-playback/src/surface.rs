//! Media playback surface contract
//!
//! Abstracts the object that actually decodes and outputs audio (an HTML
//! audio element in the browser, a mock in tests). The player never reads
//! position from the surface directly; the surface pushes time reports
//! and end-of-media notifications through [`SurfaceEvents`].

use crate::error::SurfaceError;
use crate::input::{ClockSignal, SignalSender};
use crate::types::duration_from_secs_lossy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A start-playback request
///
/// Starting playback may be refused asynchronously (browser autoplay
/// policy). The request carries the generation it was issued for so that
/// a late refusal can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRequest {
    pub generation: u64,
}

/// External media playback surface
///
/// Positions are seconds as `f64`, volume is a fraction in `0.0..=1.0`.
pub trait MediaSurface {
    /// Set the media URL
    fn set_source(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Begin loading the current source
    fn load(&mut self) -> Result<(), SurfaceError>;

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Request accepted; a later refusal is reported through
    ///   [`SurfaceEvents::start_rejected`]
    /// * `Err(_)` - Request refused immediately
    fn play(&mut self, request: StartRequest) -> Result<(), SurfaceError>;

    /// Pause playback
    fn pause(&mut self) -> Result<(), SurfaceError>;

    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Move the playback position
    fn set_position(&mut self, secs: f64);

    /// Current output level (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set the output level (0.0 to 1.0)
    fn set_volume(&mut self, level: f64);

    /// Start delivering time reports and end-of-media notifications
    fn subscribe(&mut self, events: SurfaceEvents);

    /// Stop delivering notifications and drop the listeners
    fn unsubscribe(&mut self);
}

/// Notification sink handed to a surface on subscribe
///
/// Time reports and end-of-media notifications are stamped with the
/// generation current when they are emitted; the player discards them if
/// the binding has moved on by the time they are processed.
#[derive(Debug, Clone)]
pub struct SurfaceEvents {
    signals: SignalSender,
    generation: Arc<AtomicU64>,
}

impl SurfaceEvents {
    pub fn new(signals: SignalSender, generation: Arc<AtomicU64>) -> Self {
        Self {
            signals,
            generation,
        }
    }

    fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// The surface's position advanced
    pub fn time_update(&self, secs: f64) {
        self.signals.send(ClockSignal::TimeReport {
            generation: self.current(),
            position: duration_from_secs_lossy(secs),
        });
    }

    /// The surface reached end of media
    pub fn ended(&self) {
        self.signals.send(ClockSignal::Ended {
            generation: self.current(),
        });
    }

    /// A start request was refused
    pub fn start_rejected(&self, request: StartRequest, error: &SurfaceError) {
        self.signals.send(ClockSignal::StartRejected {
            generation: request.generation,
            reason: error.to_string(),
        });
    }
}
