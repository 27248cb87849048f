//! Clock backed by a real media surface

use super::{ClockContext, PlaybackClock};
use crate::error::SurfaceError;
use crate::events::SyncPlan;
use crate::input::SignalSender;
use crate::surface::{MediaSurface, StartRequest, SurfaceEvents};
use crate::types::PlayerState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Drives a [`MediaSurface`] from the player state
///
/// Time comes from the surface's own reports. The clock subscribes to
/// them once on attach and pushes track, play state, volume and seek
/// changes to the surface on every sync.
///
/// Tracks without a media URL cannot be played by the surface. With a
/// fallback clock (see [`with_fallback`](Self::with_fallback)) their time
/// is simulated; without one, starting such a track is reported as a
/// rejected start and the player reverts to paused.
pub struct SurfaceClock<S: MediaSurface, F: PlaybackClock = Box<dyn PlaybackClock + Send>> {
    surface: S,
    generation: Arc<AtomicU64>,
    events: Option<SurfaceEvents>,
    fallback: Option<F>,
}

impl<S: MediaSurface> SurfaceClock<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            generation: Arc::new(AtomicU64::new(0)),
            events: None,
            fallback: None,
        }
    }
}

impl<S: MediaSurface, F: PlaybackClock> SurfaceClock<S, F> {
    /// Simulate time with `clock` while the current track has no URL
    ///
    /// Must be called before the clock is handed to a player.
    pub fn with_fallback<G: PlaybackClock>(self, clock: G) -> SurfaceClock<S, G> {
        SurfaceClock {
            surface: self.surface,
            generation: self.generation,
            events: self.events,
            fallback: Some(clock),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn start(&mut self, generation: u64) {
        let request = StartRequest { generation };
        if let Err(error) = self.surface.play(request) {
            self.reject(request, &error);
        }
    }

    fn reject(&self, request: StartRequest, error: &SurfaceError) {
        match &self.events {
            Some(events) => events.start_rejected(request, error),
            None => warn!(%error, "Media surface refused to play"),
        }
    }

    fn pause_surface(&mut self) {
        if let Err(error) = self.surface.pause() {
            warn!(%error, "Failed to pause media surface");
        }
    }

    /// Forward the plan to the fallback clock
    ///
    /// The fallback only runs while the track has no URL; for any other
    /// track it is told the player is paused so its timer stops.
    fn sync_fallback(&mut self, plan: &SyncPlan, ctx: &ClockContext<'_>) {
        let Some(fallback) = self.fallback.as_mut() else {
            return;
        };

        if ctx.track.url.is_none() {
            fallback.sync(plan, ctx);
        } else {
            let idle = PlayerState {
                is_playing: false,
                ..ctx.state.clone()
            };
            fallback.sync(
                plan,
                &ClockContext {
                    state: &idle,
                    ..*ctx
                },
            );
        }
    }
}

impl<S: MediaSurface, F: PlaybackClock> PlaybackClock for SurfaceClock<S, F> {
    fn attach(&mut self, signals: SignalSender) {
        if let Some(fallback) = self.fallback.as_mut() {
            fallback.attach(signals.clone());
        }
        let events = SurfaceEvents::new(signals, Arc::clone(&self.generation));
        self.surface.subscribe(events.clone());
        self.events = Some(events);
    }

    fn sync(&mut self, plan: &SyncPlan, ctx: &ClockContext<'_>) {
        self.generation.store(ctx.generation, Ordering::Release);

        if plan.volume_changed {
            self.surface.set_volume(f64::from(ctx.state.volume) / 100.0);
        }

        if plan.track_changed {
            match &ctx.track.url {
                Some(url) => {
                    debug!(track = %ctx.track.id, url = %url, "Loading media");
                    let loaded = self
                        .surface
                        .set_source(url)
                        .and_then(|()| self.surface.load());
                    if let Err(error) = loaded {
                        warn!(track = %ctx.track.id, %error, "Failed to load media");
                    }
                }
                None => {
                    debug!(track = %ctx.track.id, "Track has no media URL, keeping previous source");
                }
            }
        }

        if plan.seeked && ctx.track.url.is_some() {
            self.surface
                .set_position(ctx.state.current_time.as_secs_f64());
        }

        self.sync_fallback(plan, ctx);

        if plan.rebinds() {
            let has_media = ctx.track.url.is_some();
            if ctx.state.is_playing && has_media {
                self.start(ctx.generation);
                return;
            }

            self.pause_surface();
            if has_media {
                // Time reports lag behind; record where playback stopped
                if let Some(events) = &self.events {
                    events.time_update(self.surface.position());
                }
            } else if ctx.state.is_playing && self.fallback.is_none() {
                warn!(track = %ctx.track.id, "Track has no media URL and no fallback clock");
                self.reject(
                    StartRequest {
                        generation: ctx.generation,
                    },
                    &SurfaceError::Rejected(format!("track {} has no media URL", ctx.track.id)),
                );
            }
        }
    }

    fn release(&mut self) {
        if let Some(fallback) = self.fallback.as_mut() {
            fallback.release();
        }
        self.pause_surface();
        self.surface.unsubscribe();
        self.events = None;
    }
}
