//! End-to-end tests for the `bw` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Choices that lead from the entrance to the perfect crime ending.
const PERFECT_CRIME: &[&str] = &[
    "examine_exterior",
    "enter_tool_shed",
    "search_tools",
    "take_lockpick",
    "leave_shed",
    "enter_library",
    "search_books",
    "pull_lever",
    "proceed_deeper",
    "exit_hidden_room",
    "return_main_hall",
    "examine_hall",
    "follow_footprints",
    "inspect_desk",
    "analyze_records",
    "confront_elena",
];

/// Write a story file into a temp directory.
fn story_file(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

fn broken_story() -> (TempDir, PathBuf) {
    story_file(
        r#"{
    "title": "Broken",
    "start": "a",
    "hub": "a",
    "locations": [
        {
            "id": "a",
            "description": "Room.",
            "choices": [{ "id": "go", "label": "Go", "destination": "nowhere" }]
        }
    ]
}"#,
    )
}

fn dead_end_story() -> (TempDir, PathBuf) {
    story_file(
        r#"{
    "title": "Dead End",
    "start": "corridor",
    "hub": "corridor",
    "locations": [
        {
            "id": "corridor",
            "description": "A long corridor.",
            "choices": [{ "id": "walk", "label": "Walk on", "destination": "wall" }]
        },
        { "id": "wall", "description": "A blank wall." }
    ]
}"#,
    )
}

/// A library whose choices share names with the play commands.
fn library_story() -> (TempDir, PathBuf) {
    story_file(
        r#"{
    "title": "Library",
    "start": "library",
    "hub": "library",
    "locations": [
        {
            "id": "library",
            "description": "Shelves of ledgers.",
            "choices": [
                { "id": "history", "label": "Read the family history", "destination": "family_tree" },
                { "id": "status", "label": "Ask about the catalog", "destination": "catalog" }
            ]
        }
    ],
    "outcomes": {
        "family_tree": "The Blackwoods go back eleven generations.",
        "catalog": "Half the catalog is missing."
    },
    "endings": { "happily_ever_after": "Never shown." }
}"#,
    )
}

fn bw() -> Command {
    let mut cmd = Command::cargo_bin("bw").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn script(lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    input
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_builtin_story() {
    bw().arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "All checks passed for 'Blackwood Manor'.",
        ))
        .stdout(predicate::str::contains("26 locations, 8 evidence, 6 outcomes"));
}

#[test]
fn check_reports_unknown_destination() {
    let (_dir, path) = broken_story();
    bw().args(["check", "--content"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("a/go: unknown destination \"nowhere\""))
        .stderr(predicate::str::contains("validation failed with errors"));
}

#[test]
fn check_reports_malformed_json() {
    let (_dir, path) = story_file("{ this is not json");
    bw().args(["check", "--content"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid content"));
}

#[test]
fn check_warns_about_unknown_ending_text() {
    let (_dir, path) = library_story();
    bw().args(["check", "--content"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "endings: text for unknown ending \"happily_ever_after\" is never shown",
        ))
        .stdout(predicate::str::contains("All checks passed for 'Library'."));
}

#[test]
fn check_missing_file() {
    bw().args(["check", "--content", "/nonexistent/story.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// ---------------------------------------------------------------------------
// list / show / graph / endings
// ---------------------------------------------------------------------------

#[test]
fn list_locations() {
    bw().arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("mansion_entrance"))
        .stdout(predicate::str::contains("(start)"))
        .stdout(predicate::str::contains("(hub)"))
        .stdout(predicate::str::contains("26 locations, 6 outcomes"));
}

#[test]
fn show_location_with_requirements() {
    bw().args(["show", "main_hall"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main_hall [exploration]"))
        .stdout(predicate::str::contains("talk_elena"))
        .stdout(predicate::str::contains("elena -1 if > 3 else +1"))
        .stdout(predicate::str::contains(
            "requires found_secret_passage = true",
        ))
        .stdout(predicate::str::contains("<= 6h:"));
}

#[test]
fn show_dialogue_outcomes() {
    bw().args(["show", "ada_conversation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dialogue]"))
        .stdout(predicate::str::contains("ada_ai_info (outcome)"));
}

#[test]
fn show_unknown_location() {
    bw().args(["show", "ballroom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("location not found: \"ballroom\""));
}

#[test]
fn graph_full() {
    bw().arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("--front_door--> [main_hall]"))
        .stdout(predicate::str::contains("(elena_reveal) => [main_hall]"));
}

#[test]
fn graph_focused() {
    bw().args(["graph", "--focus", "study"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph for: study"))
        .stdout(predicate::str::contains(
            "<--follow_footprints-- [main_hall_search]",
        ));
}

#[test]
fn endings_in_priority_order() {
    let output = bw().arg("endings").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let timeout = stdout.find("timeout").unwrap();
    let breach = stdout.find("system_breach_ending").unwrap();
    let alliance = stdout.find("victoria_alliance").unwrap();
    assert!(timeout < breach && breach < alliance);
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_perfect_crime() {
    bw().arg("play")
        .write_stdin(script(PERFECT_CRIME))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== THE PERFECT CRIME ==="))
        .stdout(predicate::str::contains("Elena's perfect crime is unveiled"))
        .stdout(predicate::str::contains("New evidence: Financial Records"))
        .stdout(predicate::str::contains("Turns: 16 | Hours left: 5"));
}

#[test]
fn play_by_number() {
    bw().arg("play")
        .write_stdin(script(&["1", "quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("The grand hall is dimly lit"))
        .stdout(predicate::str::contains("with the mystery unsolved"));
}

#[test]
fn play_rejects_unknown_input() {
    bw().arg("play")
        .write_stdin(script(&["xyzzy", "inspect_desk", "front_door", "quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown choice 'xyzzy'."))
        .stdout(predicate::str::contains("Unknown choice 'inspect_desk'."))
        .stdout(predicate::str::contains("The grand hall is dimly lit"));
}

#[test]
fn play_dialogue_outcome() {
    bw().arg("play")
        .write_stdin(script(&["front_door", "talk_james", "james_reveal", "quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "James nervously confesses that he was in the library",
        ));
}

#[test]
fn play_timeout() {
    bw().args(["play", "--time", "2"])
        .write_stdin(script(&["front_door", "talk_elena"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== OUT OF TIME ==="))
        .stdout(predicate::str::contains(
            "The storm has made the mansion inaccessible",
        ));
}

#[test]
fn play_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("engine.toml");
    fs::write(&config, "initial_time = 5\n").unwrap();

    bw().args(["play", "--config"])
        .arg(&config)
        .write_stdin(script(&["quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("5 hours remaining"));
}

#[test]
fn play_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("engine.toml");
    fs::write(&config, "flag_policy = \"sometimes\"\n").unwrap();

    bw().args(["play", "--config"])
        .arg(&config)
        .write_stdin(script(&["quit"]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn play_strict_flags_hide_search_once_choices() {
    bw().args(["play", "--strict-flags"])
        .write_stdin(script(&[
            "examine_exterior",
            "enter_tool_shed",
            "search_tools",
            "quit",
        ]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown choice 'search_tools'."));
}

#[test]
fn play_show_locked() {
    bw().args(["play", "--show-locked"])
        .write_stdin(script(&["front_door", "quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Use the secret passage (requires found_secret_passage = true)",
        ));
}

#[test]
fn play_status_and_history() {
    bw().arg("play")
        .write_stdin(script(&["examine_exterior", "status", "history", "quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Broken Window: A partially opened window on the second floor",
        ))
        .stdout(predicate::str::contains("[personal, security]"))
        .stdout(predicate::str::contains("Relationships:"))
        .stdout(predicate::str::contains("1. mansion_entrance -> examine_exterior"));
}

#[test]
fn play_choice_named_like_a_command() {
    let (_dir, path) = library_story();
    bw().args(["play", "--content"])
        .arg(&path)
        .write_stdin(script(&["history", "status", "quit"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("eleven generations"))
        .stdout(predicate::str::contains("Half the catalog is missing."))
        .stdout(predicate::str::contains("No choices taken yet").not())
        .stdout(predicate::str::contains("Relationships:").not());
}

#[test]
fn play_json_lines() {
    let output = bw()
        .args(["play", "--json"])
        .write_stdin(script(&["front_door", "nonsense"]))
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(events[0]["event"], "turn");
    assert_eq!(events[0]["location"], "mansion_entrance");
    assert_eq!(events[0]["status"]["time_remaining"], 24);
    assert_eq!(events[1]["event"], "outcome");
    assert_eq!(events[1]["choice"], "front_door");
    assert_eq!(events[2]["event"], "turn");
    assert_eq!(events[2]["location"], "main_hall");
    assert_eq!(events[3]["event"], "rejected");
    assert_eq!(events[3]["input"], "nonsense");
}

#[test]
fn play_deadlock_is_reported() {
    let (_dir, path) = dead_end_story();
    bw().args(["play", "--content"])
        .arg(&path)
        .write_stdin(script(&["walk"]))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No valid choices available - Investigation deadlocked",
        ))
        .stderr(predicate::str::contains("deadlocked at \"wall\""));
}

#[test]
fn play_refuses_broken_story() {
    let (_dir, path) = broken_story();
    bw().args(["play", "--content"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("story has 1 error"));
}
