use std::path::Path;

use bw_core::{ContentGraph, ValidationIssue, validate_content};
use bw_fiction::Ending;

use super::plural;

pub fn run(content: Option<&Path>) -> Result<(), String> {
    let graph = super::load_content(content)?;
    let mut issues = validate_content(&graph);
    issues.extend(unknown_ending_texts(&graph));

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;

    if !issues.is_empty() {
        super::print_issues(&issues.iter().collect::<Vec<_>>());
    }

    if errors > 0 {
        eprintln!(
            "  {errors} error{}, {warnings} warning{}",
            plural(errors),
            plural(warnings)
        );
        return Err("validation failed with errors".into());
    }
    if warnings > 0 {
        eprintln!("  {warnings} warning{}", plural(warnings));
    }

    println!("  All checks passed for '{}'.", graph.title);
    println!(
        "  {} locations, {} evidence, {} outcomes",
        graph.location_count(),
        graph.evidence.len(),
        graph.outcomes().count()
    );

    Ok(())
}

/// Ending texts keyed by an id the engine never resolves to.
fn unknown_ending_texts(graph: &ContentGraph) -> Vec<ValidationIssue> {
    graph
        .ending_texts()
        .filter(|(id, _)| !Ending::ALL.iter().any(|e| e.id() == *id))
        .map(|(id, _)| ValidationIssue {
            subject: "endings".to_string(),
            message: format!("text for unknown ending \"{id}\" is never shown"),
            is_error: false,
        })
        .collect()
}
