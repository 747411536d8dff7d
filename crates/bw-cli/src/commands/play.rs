use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bw_fiction::{
    ChoiceView, Conclusion, ConclusionKind, EngineConfig, FictionError, FlagPolicy, GameSession,
    StatusView, TurnOutcome, TurnSnapshot, resolve_choice, suggest_choices,
};
use colored::Colorize;
use serde::Serialize;

/// Options for an interactive playthrough.
pub struct PlayOptions {
    pub config: Option<PathBuf>,
    pub time: Option<i32>,
    pub strict_flags: bool,
    pub typing_delay: u64,
    pub json: bool,
    pub show_locked: bool,
}

const HELP: &str = "  Commands:
    <number>    take the numbered choice
    <text>      take the choice whose id or label matches
    status      show inventory, evidence, and relationships
    history     list the choices taken so far
    help        show this help
    quit        abandon the investigation";

/// One line of `--json` output.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Turn(&'a TurnSnapshot),
    Outcome(&'a TurnOutcome),
    Rejected { input: &'a str, message: String },
    Conclusion(&'a Conclusion),
}

pub fn run(content: Option<&Path>, options: &PlayOptions) -> Result<(), String> {
    let graph = super::load_playable(content)?;

    let mut config = match &options.config {
        Some(path) => EngineConfig::from_path(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    if let Some(hours) = options.time {
        config = config.with_initial_time(hours);
    }
    if options.strict_flags {
        config = config.with_flag_policy(FlagPolicy::Strict);
    }

    let mut session = GameSession::new(Arc::new(graph), config)
        .map_err(|e| format!("failed to start session: {e}"))?;
    let ui = Ui {
        json: options.json,
        typing_delay: options.typing_delay,
    };

    if !ui.json {
        println!("  {}", session.content().title.to_uppercase().bold());
        println!("  Type 'help' for commands, 'quit' to exit.\n");
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    'turns: while !session.is_over() {
        let snapshot = session
            .snapshot(options.show_locked)
            .map_err(|e| e.to_string())?;
        ui.show_turn(&snapshot)?;

        loop {
            if !ui.json {
                print!("> ");
                io::stdout().flush().map_err(|e| e.to_string())?;
            }

            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => break 'turns, // EOF
                Err(e) => return Err(e.to_string()),
                _ => {}
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            // A choice named like a command shadows the command
            let command = if names_choice(input, &snapshot.choices) {
                String::new()
            } else {
                input.to_lowercase()
            };
            match command.as_str() {
                "quit" | "q" => break 'turns,
                "help" | "?" => {
                    if !ui.json {
                        println!("{HELP}\n");
                    }
                    continue;
                }
                "status" => {
                    if !ui.json {
                        print_full_status(&snapshot.status);
                    }
                    continue;
                }
                "history" => {
                    if !ui.json {
                        print_history(&session);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(choice_id) = resolve_choice(input, &snapshot.choices) else {
                ui.reject(input, &format!("Unknown choice '{input}'."))?;
                if !ui.json {
                    let suggestions = suggest_choices(input, &snapshot.choices, 3);
                    if !suggestions.is_empty() {
                        println!("  Did you mean: {}?\n", suggestions.join(", "));
                    }
                }
                continue;
            };

            match session.choose(&choice_id) {
                Ok(outcome) => {
                    ui.show_outcome(&outcome)?;
                    break;
                }
                Err(e @ FictionError::InvalidChoice(_)) => ui.reject(input, &e.to_string())?,
                Err(e) => return Err(e.to_string()),
            }
        }
    }

    match session.conclusion() {
        Some(conclusion) => ui.show_conclusion(conclusion, &session)?,
        None if !ui.json => println!(
            "\n  You leave {} with the mystery unsolved.",
            session.content().title
        ),
        None => {}
    }

    Ok(())
}

struct Ui {
    json: bool,
    typing_delay: u64,
}

impl Ui {
    fn emit(&self, event: &Event<'_>) -> Result<(), String> {
        let line = serde_json::to_string(event).map_err(|e| e.to_string())?;
        println!("{line}");
        Ok(())
    }

    /// Print story text, one character at a time if a typing delay is set.
    fn narrate(&self, text: &str) -> Result<(), String> {
        if self.typing_delay == 0 {
            println!("  {text}");
            return Ok(());
        }

        let mut stdout = io::stdout();
        let delay = Duration::from_millis(self.typing_delay);
        print!("  ");
        for c in text.chars() {
            print!("{c}");
            stdout.flush().map_err(|e| e.to_string())?;
            thread::sleep(delay);
        }
        println!();
        Ok(())
    }

    fn show_turn(&self, snapshot: &TurnSnapshot) -> Result<(), String> {
        if self.json {
            return self.emit(&Event::Turn(snapshot));
        }

        print_status_bar(&snapshot.status);
        println!();
        self.narrate(&snapshot.description)?;
        println!();

        for (i, choice) in snapshot.choices.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().bold(), choice.label);
        }
        for locked in &snapshot.locked {
            let line = format!("  -. {} ({})", locked.label, locked.missing.join(", "));
            println!("{}", line.dimmed());
        }
        println!();
        Ok(())
    }

    fn reject(&self, input: &str, message: &str) -> Result<(), String> {
        if self.json {
            return self.emit(&Event::Rejected {
                input,
                message: message.to_string(),
            });
        }
        println!("  {}\n", message.yellow());
        Ok(())
    }

    fn show_outcome(&self, outcome: &TurnOutcome) -> Result<(), String> {
        if self.json {
            return self.emit(&Event::Outcome(outcome));
        }

        let effects = &outcome.effects;
        for evidence in &effects.evidence_gained {
            println!("  {} {}", "New evidence:".green(), evidence.name.bold());
        }
        for item in &effects.items_gained {
            println!("  {} {item}", "Picked up:".green());
        }
        for item in &effects.items_lost {
            println!("  {} {item}", "Left behind:".dimmed());
        }
        if let Some(track) = effects.new_track {
            println!("  Your investigation turns to the {} track.", track.title());
        }

        if let Some(text) = &outcome.outcome_text {
            println!();
            self.narrate(text)?;
        }
        if outcome.exhausted_dialogue.is_some() {
            println!("\n  No valid choices available in this conversation.");
        }
        println!();
        Ok(())
    }

    fn show_conclusion(&self, conclusion: &Conclusion, session: &GameSession) -> Result<(), String> {
        if self.json {
            return self.emit(&Event::Conclusion(conclusion));
        }

        match conclusion.kind {
            ConclusionKind::Deadlock => {
                println!("  {}", conclusion.text.red().bold());
                eprintln!(
                    "warning: investigation deadlocked at \"{}\"",
                    conclusion.location
                );
            }
            ConclusionKind::Ending | ConclusionKind::Timeout => {
                let title = conclusion
                    .ending
                    .map_or_else(|| "THE END".to_string(), |e| e.title().to_uppercase());
                println!("  {}", format!("=== {title} ===").bold());
                println!();
                self.narrate(&conclusion.text)?;
            }
        }

        let state = session.state();
        println!();
        println!(
            "  Turns: {} | Hours left: {} | Evidence: {}/{}",
            session.turn(),
            state.time_remaining.max(0),
            state.evidence.len(),
            session.content().evidence.len()
        );
        Ok(())
    }
}

/// Whether the input is exactly a choice's id or label, ignoring case.
fn names_choice(input: &str, choices: &[ChoiceView]) -> bool {
    choices
        .iter()
        .any(|c| c.id.eq_ignore_ascii_case(input) || c.label.eq_ignore_ascii_case(input))
}

fn stress_meter(level: i32, max: i32) -> String {
    let filled = usize::try_from(level).unwrap_or(0);
    let empty = usize::try_from(max - level).unwrap_or(0);
    format!("{}{}", "▮".repeat(filled), "▯".repeat(empty))
}

fn print_status_bar(status: &StatusView) {
    let hours = format!("{} hours remaining", status.time_remaining);
    let hours = if status.time_remaining <= 6 {
        hours.red().bold()
    } else {
        hours.bold()
    };
    println!("  --- {hours} ---");
    println!(
        "  Track: {} | Stress: {} {}/{}",
        status.current_track.title(),
        stress_meter(status.stress_level, status.max_stress),
        status.stress_level,
        status.max_stress
    );
    if !status.inventory.is_empty() {
        println!("  Inventory: {}", status.inventory.join(", "));
    }
    if !status.evidence.is_empty() {
        let names: Vec<_> = status.evidence.iter().map(|e| e.name.as_str()).collect();
        println!("  Evidence: {}", names.join(", "));
    }
}

fn print_full_status(status: &StatusView) {
    print_status_bar(status);
    println!();

    println!("  {}", "Evidence:".bold());
    if status.evidence.is_empty() {
        println!("    (none)");
    }
    for evidence in &status.evidence {
        if evidence.tags.is_empty() {
            println!("    {}: {}", evidence.name, evidence.description);
        } else {
            let tags: Vec<_> = evidence.tags.iter().map(String::as_str).collect();
            println!(
                "    {}: {} {}",
                evidence.name,
                evidence.description,
                format!("[{}]", tags.join(", ")).dimmed()
            );
        }
    }

    println!("  {}", "Relationships:".bold());
    for relationship in &status.relationships {
        println!("    {:<10} {:+}", relationship.character, relationship.score);
    }
    println!();
}

fn print_history(session: &GameSession) {
    if session.history().is_empty() {
        println!("  No choices taken yet.\n");
        return;
    }
    for (i, entry) in session.history().iter().enumerate() {
        println!("  {:>3}. {} -> {}", i + 1, entry.location, entry.choice);
    }
    println!();
}
