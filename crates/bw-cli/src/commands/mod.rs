pub mod check;
pub mod endings;
pub mod graph;
pub mod list;
pub mod play;
pub mod show;

use std::path::Path;

use bw_core::{ContentGraph, RelationshipDelta, ValidationIssue, validate_content};
use colored::Colorize;

/// Load a story file, or the built-in story when no path is given.
fn load_content(path: Option<&Path>) -> Result<ContentGraph, String> {
    match path {
        Some(path) => ContentGraph::from_path(path).map_err(|e| e.to_string()),
        None => ContentGraph::builtin().map_err(|e| format!("built-in story is broken: {e}")),
    }
}

/// Load a story and refuse it if validation finds errors.
/// Warnings are logged and otherwise ignored.
fn load_playable(path: Option<&Path>) -> Result<ContentGraph, String> {
    let graph = load_content(path)?;
    let issues = validate_content(&graph);

    for issue in issues.iter().filter(|i| !i.is_error) {
        tracing::warn!(subject = %issue.subject, "{}", issue.message);
    }

    let errors: Vec<_> = issues.iter().filter(|i| i.is_error).collect();
    if errors.is_empty() {
        Ok(graph)
    } else {
        print_issues(&errors);
        Err(format!(
            "story has {} error{}; run `bw check` for details",
            errors.len(),
            plural(errors.len())
        ))
    }
}

/// Print validation issues to stderr.
fn print_issues(issues: &[&ValidationIssue]) {
    for issue in issues {
        let level = if issue.is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        eprintln!("  {level}: {}: {}", issue.subject, issue.message);
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `+2`, `-1`, or `-1 if > 3 else +1`.
fn format_delta(delta: &RelationshipDelta) -> String {
    match delta {
        RelationshipDelta::Fixed(n) => format!("{n:+}"),
        RelationshipDelta::Conditional {
            above,
            then,
            otherwise,
        } => format!("{then:+} if > {above} else {otherwise:+}"),
    }
}

/// Truncate text for a table cell.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else if text.is_empty() {
        "—".to_string()
    } else {
        text.to_string()
    }
}

/// Join ids for display, or a dash if there are none.
fn join_ids(ids: &[String]) -> String {
    if ids.is_empty() {
        "—".to_string()
    } else {
        ids.join(", ")
    }
}
