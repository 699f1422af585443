// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_persists_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve path to compiled binary (debug build during tests)
    let bin = assert_cmd::cargo::cargo_bin("toil");
    let dir = tempfile::tempdir()?;
    let data_file = dir.path().join("data.json");
    let cmd = format!("{} --data-file {}", bin.display(), data_file.display());

    // Spawn the TUI inside a pseudo terminal
    let mut p = spawn(cmd)?;

    // Give the app a moment to initialize the terminal/alternate screen
    std::thread::sleep(Duration::from_millis(300));

    // Space starts the stopwatch, a second space stops and records a session
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(300));
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(200));

    // Quit; the app flushes state on the way out
    p.send("q")?;
    p.expect(Eof)?;

    // The persisted document exists and carries the recorded session
    let text = std::fs::read_to_string(&data_file)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(value["sessions"].as_array().map(|s| s.len()), Some(1));
    Ok(())
}
