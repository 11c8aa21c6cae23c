//! Integration tests for the tarpit CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write `lines` to a command file inside `dir`.
fn script(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn tarpit() -> Command {
    let mut cmd = Command::cargo_bin("tarpit").unwrap();
    cmd.env_remove("TARPIT_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// feedback routing
// ---------------------------------------------------------------------------

#[test]
fn batch_is_quiet_by_default() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "look.txt", &["look"]);

    tarpit()
        .arg("-f")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Welcome").not());
}

#[test]
fn feedback_on_stdout() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "look.txt", &["look"]);

    tarpit()
        .arg("-V")
        .arg("-f")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Welcome to Tarpit Adventure!")
                .and(predicate::str::contains("> look"))
                .and(predicate::str::contains("OUTSIDE OF A SMALL HOUSE")),
        );
}

#[test]
fn feedback_on_stderr() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "hello.txt", &["hello"]);

    tarpit()
        .arg("-v")
        .arg("-f")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Uh...hello."));
}

#[test]
fn conflicting_feedback_flags_are_rejected() {
    tarpit().args(["-q", "-V"]).assert().failure();
}

// ---------------------------------------------------------------------------
// batch files
// ---------------------------------------------------------------------------

#[test]
fn files_run_in_order() {
    let dir = TempDir::new().unwrap();
    let first = script(&dir, "a.txt", &["xyzzy"]);
    let second = script(&dir, "b.txt", &["hello"]);

    let assert = tarpit()
        .arg("-V")
        .arg("-f")
        .arg(&first)
        .arg("-f")
        .arg(&second)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let xyzzy = stdout.find("Nothing happens.").unwrap();
    let hello = stdout.find("Uh...hello.").unwrap();
    assert!(xyzzy < hello);
}

#[test]
fn quit_stops_the_batch() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "quit.txt", &["quit", "hello"]);

    tarpit()
        .arg("-V")
        .arg("-f")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!").and(predicate::str::contains("Uh...hello.").not()));
}

#[test]
fn missing_file_fails() {
    tarpit()
        .args(["-f", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// ---------------------------------------------------------------------------
// parameters
// ---------------------------------------------------------------------------

#[test]
fn parameters_are_written_on_the_letter() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "mail.txt",
        &["open mailbox", "take letter", "look letter"],
    );

    tarpit()
        .arg("-V")
        .arg("-f")
        .arg(&path)
        .args(["42", "frobozz"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Letter taken.")
                .and(predicate::str::contains("  42"))
                .and(predicate::str::contains("  frobozz")),
        );
}

#[test]
fn the_drain_prints_on_stdout_even_when_quiet() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "drain.txt",
        &[
            "open mailbox",
            "take letter",
            "east",
            "east",
            "northeast",
            "north",
            "north",
            "north",
            "north",
            "north",
            "north",
            "east",
            "put letter in drain",
        ],
    );

    tarpit()
        .arg("-q")
        .arg("-f")
        .arg(&path)
        .arg("hello, world")
        .assert()
        .success()
        .stdout("hello, world\n");
}
