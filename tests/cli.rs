//! Exit codes and messages of the binary when no window gets opened

use std::process::{Command, Output};

use tempfile::tempdir;

fn wavmark(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wavmark"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_no_file_prints_usage() {
    let output = wavmark(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Usage: wavmark"));
    assert!(stdout(&output).contains("[WAV_FILE]"));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.wav");

    let output = wavmark(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.starts_with("Error loading WAV file: failed to open"));
    assert!(text.contains("nope.wav"));
}

#[test]
fn test_not_a_wav_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.wav");
    std::fs::write(&path, vec![b'x'; 64]).unwrap();

    let output = wavmark(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim_end(),
        "Error loading WAV file: not a valid WAV file"
    );
}

#[test]
fn test_truncated_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.wav");
    std::fs::write(&path, b"RIFF\x00\x00\x00\x00WAVE").unwrap();

    let output = wavmark(&[path.to_str().unwrap(), "--strict"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim_end(),
        "Error loading WAV file: truncated header"
    );
}
