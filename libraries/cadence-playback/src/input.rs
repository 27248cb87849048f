//! Player inputs
//!
//! User intents and clock signals share one queue so they are applied
//! strictly one at a time, in delivery order.

use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedSender, WeakUnboundedSender};

/// A user action coming from the presentation layer
///
/// Shuffle and repeat controls are decorative and have no intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Intent {
    TogglePlay,
    Next,
    Previous,
    SelectTrack(TrackId),
    Seek(Duration),
    SetVolume(u8),
    ToggleMute,
}

/// Asynchronous notification produced by a clock strategy
///
/// Each signal carries the generation of the binding that produced it.
/// The driver discards signals whose generation is no longer current.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockSignal {
    /// Simulated timer fired
    Tick { generation: u64, elapsed: Duration },

    /// Media surface reported its playback position
    TimeReport { generation: u64, position: Duration },

    /// Media surface reached end of media
    Ended { generation: u64 },

    /// Media surface refused a start-playback request
    StartRejected { generation: u64, reason: String },
}

impl ClockSignal {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Tick { generation, .. }
            | Self::TimeReport { generation, .. }
            | Self::Ended { generation }
            | Self::StartRejected { generation, .. } => *generation,
        }
    }
}

/// Message on the player's input queue
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    Intent(Intent),
    Signal(ClockSignal),
    Shutdown,
}

/// Sending half used by clocks and surfaces
///
/// Holds only a weak reference to the queue so that a running timer or a
/// media listener never keeps the player loop alive on its own.
#[derive(Debug, Clone)]
pub struct SignalSender {
    inner: WeakUnboundedSender<PlayerInput>,
}

impl SignalSender {
    pub fn new(sender: &UnboundedSender<PlayerInput>) -> Self {
        Self {
            inner: sender.downgrade(),
        }
    }

    /// Deliver a signal; returns false once the player has gone away
    pub fn send(&self, signal: ClockSignal) -> bool {
        match self.inner.upgrade() {
            Some(tx) => tx.send(PlayerInput::Signal(signal)).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_signal_generation() {
        let signal = ClockSignal::StartRejected {
            generation: 7,
            reason: "denied".into(),
        };
        assert_eq!(signal.generation(), 7);
        assert_eq!(ClockSignal::Ended { generation: 3 }.generation(), 3);
    }

    #[test]
    fn test_signal_sender_delivers_while_queue_alive() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let signals = SignalSender::new(&tx);

        assert!(signals.send(ClockSignal::Ended { generation: 1 }));
        assert_eq!(
            rx.try_recv().unwrap(),
            PlayerInput::Signal(ClockSignal::Ended { generation: 1 })
        );
    }

    #[test]
    fn test_signal_sender_does_not_keep_queue_alive() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let signals = SignalSender::new(&tx);
        drop(tx);

        assert!(!signals.send(ClockSignal::Ended { generation: 1 }));
        assert!(rx.try_recv().is_err());
    }
}
