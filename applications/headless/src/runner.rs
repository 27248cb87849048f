//! Command loop and status printer

use crate::commands::{self, Command, HELP};
use crate::error::Result;
use cadence_playback::{Intent, PlaybackError, PlayerHandle, PlayerSnapshot};
use cadence_view::{render_status, render_text, ControlsView, PlaylistView};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::{debug, info};

/// Read commands from `input` until `quit` or end of input
///
/// Bad commands and unknown track ids are reported on `out` and skipped.
/// Returns an error only if the player has gone away or `out` fails.
pub async fn execute<R, W>(handle: &PlayerHandle, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                writeln!(out, "error: {error}")?;
                continue;
            }
        };
        debug!(?command, "Executing command");

        match command {
            Command::Intent(intent) => {
                let sent = match intent {
                    Intent::SelectTrack(id) => handle.select_track(id),
                    other => handle.send(other),
                };
                match sent {
                    Ok(()) => {}
                    Err(PlaybackError::Closed) => return Err(PlaybackError::Closed.into()),
                    Err(error) => writeln!(out, "error: {error}")?,
                }
                // Give the player loop a chance to apply the intent
                tokio::task::yield_now().await;
            }
            Command::Show => {
                writeln!(out, "{}", render(handle, &handle.snapshot()))?;
            }
            Command::Wait(duration) => tokio::time::sleep(duration).await,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {
                info!("Quit requested");
                break;
            }
        }
    }

    Ok(())
}

/// Full text view of a snapshot
pub fn render(handle: &PlayerHandle, snapshot: &PlayerSnapshot) -> String {
    render_text(
        &ControlsView::new(snapshot),
        &PlaylistView::new(handle.catalog(), &snapshot.state),
    )
}

/// Print a status line for every published snapshot
///
/// Runs until the player loop stops, then hands `out` back.
pub async fn print_status<W: Write>(
    mut snapshots: watch::Receiver<PlayerSnapshot>,
    mut out: W,
) -> W {
    while snapshots.changed().await.is_ok() {
        let line = render_status(&ControlsView::new(&snapshots.borrow_and_update()));
        if writeln!(out, "{line}").is_err() {
            break;
        }
    }
    out
}
