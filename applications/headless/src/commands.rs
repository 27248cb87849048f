//! Line command parsing
//!
//! One command per line; blank lines and `#` comments are skipped.

use crate::error::{HeadlessError, Result};
use cadence_playback::types::duration_from_secs_lossy;
use cadence_playback::{Intent, TrackId};
use std::time::Duration;

pub const HELP: &str = "\
commands:
  play            toggle play/pause
  next | prev     skip forward / back
  select <id>     play a track from the start
  seek <secs>     jump to a position in the current track
  vol <0-100>     set the volume
  mute            toggle mute
  show            print the player and playlist
  wait <secs>     let time pass
  help            this text
  quit            stop the player and exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(Intent),
    Show,
    Wait(Duration),
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for blank lines and comments
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();
    let arg = words.next();
    if words.next().is_some() {
        return Err(HeadlessError::Command(format!("too many arguments: {line}")));
    }

    let command = match (name.as_str(), arg) {
        ("play" | "pause" | "toggle", None) => Command::Intent(Intent::TogglePlay),
        ("next" | "n", None) => Command::Intent(Intent::Next),
        ("prev" | "previous" | "p", None) => Command::Intent(Intent::Previous),
        ("select" | "s", Some(id)) => Command::Intent(Intent::SelectTrack(TrackId::new(id))),
        ("seek", Some(secs)) => Command::Intent(Intent::Seek(duration_from_secs_lossy(
            parse_secs(secs)?,
        ))),
        ("vol" | "volume", Some(level)) => {
            let level = level.parse::<u8>().map_err(|_| {
                HeadlessError::Command(format!("volume must be 0-100, got {level}"))
            })?;
            Command::Intent(Intent::SetVolume(level))
        }
        ("mute", None) => Command::Intent(Intent::ToggleMute),
        ("show" | "status", None) => Command::Show,
        ("wait" | "sleep", Some(secs)) => Command::Wait(duration_from_secs_lossy(parse_secs(secs)?)),
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit" | "q", None) => Command::Quit,
        ("select" | "s" | "seek" | "vol" | "volume" | "wait" | "sleep", None) => {
            return Err(HeadlessError::Command(format!("{name} needs an argument")));
        }
        _ => return Err(HeadlessError::Command(format!("unknown command: {line}"))),
    };

    Ok(Some(command))
}

fn parse_secs(input: &str) -> Result<f64> {
    input
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
        .ok_or_else(|| HeadlessError::Command(format!("not a number of seconds: {input}")))
}
