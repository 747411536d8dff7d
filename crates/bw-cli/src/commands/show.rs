use std::path::Path;

use bw_core::{Choice, ContentGraph, Destination, LocationKind};
use colored::Colorize;

pub fn run(content: Option<&Path>, id: &str) -> Result<(), String> {
    let graph = super::load_content(content)?;

    let location = graph
        .location(id)
        .ok_or_else(|| format!("location not found: \"{id}\""))?;

    let kind = match location.kind {
        LocationKind::Exploration => "exploration",
        LocationKind::Dialogue => "dialogue",
    };
    println!("  {} [{}]", location.id.bold(), kind.dimmed());
    println!();

    for line in location.description.lines() {
        println!("  {}", line.trim());
    }
    println!();

    if !location.time_descriptions.is_empty() {
        println!("  {}", "Time-sensitive text:".bold());
        for (threshold, text) in &location.time_descriptions {
            println!("    <= {threshold}h: {text}");
        }
        println!();
    }

    if location.choices.is_empty() {
        println!("  (no choices)");
        return Ok(());
    }

    println!("  {}", "Choices:".bold());
    for choice in &location.choices {
        println!(
            "    {} {} -> {}",
            choice.id.cyan(),
            choice.label,
            destination_label(&graph, choice)
        );
        for line in requirement_lines(choice) {
            println!("        {}", line.yellow());
        }
        println!("        {}", effect_summary(choice).dimmed());
    }

    Ok(())
}

fn destination_label(graph: &ContentGraph, choice: &Choice) -> String {
    match graph.resolve(&choice.destination) {
        Destination::Location(_) => choice.destination.clone(),
        Destination::Outcome(_) => format!("{} (outcome)", choice.destination),
        Destination::Unknown => format!("{} (missing)", choice.destination),
    }
}

fn requirement_lines(choice: &Choice) -> Vec<String> {
    let mut lines = Vec::new();
    if !choice.required_items.is_empty() {
        lines.push(format!(
            "requires items: {}",
            super::join_ids(&choice.required_items)
        ));
    }
    for (flag, value) in &choice.required_flags {
        lines.push(format!("requires {flag} = {value}"));
    }
    for name in &choice.required_evidence {
        lines.push(format!("requires evidence \"{name}\""));
    }
    lines
}

fn effect_summary(choice: &Choice) -> String {
    let mut parts = vec![format!("time {}h", choice.time_cost)];
    if choice.stress_change != 0 {
        parts.push(format!("stress {:+}", choice.stress_change));
    }
    if !choice.inventory_add.is_empty() {
        parts.push(format!("+items {}", choice.inventory_add.join(", ")));
    }
    if !choice.inventory_remove.is_empty() {
        parts.push(format!("-items {}", choice.inventory_remove.join(", ")));
    }
    for (flag, value) in &choice.flags_change {
        parts.push(format!("sets {flag} = {value}"));
    }
    if !choice.evidence_add.is_empty() {
        parts.push(format!("+evidence {}", choice.evidence_add.join(", ")));
    }
    for (character, delta) in &choice.relationship_changes {
        parts.push(format!("{character} {}", super::format_delta(delta)));
    }
    if let Some(track) = choice.track_change {
        parts.push(format!("track {track}"));
    }
    parts.join(", ")
}
