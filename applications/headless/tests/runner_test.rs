/// Runner integration tests
/// Feeds command scripts through a real player on a paused clock
use cadence_headless::runner::{execute, print_status};
use cadence_headless::HeadlessError;
use cadence_playback::{Catalog, Player, PlayerConfig, PlayerHandle, SimulatedClock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

fn start() -> (PlayerHandle, JoinHandle<()>) {
    let config = PlayerConfig::default();
    let (player, handle) = Player::new(
        Arc::new(Catalog::demo()),
        &config,
        SimulatedClock::new(config.tick_period),
    );
    (handle, tokio::spawn(player.run()))
}

async fn run_script(handle: &PlayerHandle, script: &str) -> String {
    let mut out = Vec::new();
    execute(handle, script.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_script_drives_player() {
    let (handle, _task) = start();
    run_script(
        &handle,
        "# start the second track and let it run\nselect 2\nwait 3.5\nvol 40\nwait 0.1\n",
    )
    .await;

    let state = handle.snapshot().state;
    assert_eq!(state.current_track_id.as_str(), "2");
    assert!(state.is_playing);
    assert_eq!(state.current_time, Duration::from_secs(3));
    assert_eq!(state.volume, 40);
}

#[tokio::test(start_paused = true)]
async fn test_show_prints_text_view() {
    let (handle, _task) = start();
    let output = run_script(&handle, "next\nwait 0.1\nshow\n").await;

    assert!(output.contains("[playing] Midnight Dreams - Luna Echo"));
    assert!(output.contains("Playlist (5 tracks)"));
    assert!(output.contains("*  2. Midnight Dreams"));
}

#[tokio::test(start_paused = true)]
async fn test_bad_commands_are_reported_and_skipped() {
    let (handle, _task) = start();
    let output = run_script(&handle, "dance\nselect 99\nmute\nwait 0.1\n").await;

    assert!(output.contains("error: Invalid command: unknown command: dance"));
    assert!(output.contains("error: Unknown track id: 99"));
    assert_eq!(handle.snapshot().state.volume, 0);
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_reading() {
    let (handle, _task) = start();
    run_script(&handle, "quit\nplay\n").await;
    assert!(!handle.snapshot().state.is_playing);
}

#[tokio::test(start_paused = true)]
async fn test_closed_player_is_an_error() {
    let (handle, task) = start();
    handle.shutdown().unwrap();
    task.await.unwrap();

    let mut out = Vec::new();
    let result = execute(&handle, "play\n".as_bytes(), &mut out).await;
    assert!(matches!(result, Err(HeadlessError::Playback(_))));
}

#[tokio::test(start_paused = true)]
async fn test_status_printer_follows_changes() {
    let (handle, task) = start();
    let printer = tokio::spawn(print_status(handle.subscribe(), Vec::new()));

    run_script(&handle, "vol 20\nwait 0.1\nmute\nwait 0.1\n").await;
    handle.shutdown().unwrap();
    task.await.unwrap();

    let output = String::from_utf8(printer.await.unwrap()).unwrap();
    assert!(output.contains("vol- 20%"));
    assert!(output.contains("muted 0%"));
}
