use std::path::Path;

use bw_core::{ContentGraph, Destination, Location};

pub fn run(content: Option<&Path>, focus: Option<&str>) -> Result<(), String> {
    let graph = super::load_content(content)?;

    if let Some(id) = focus {
        let location = graph
            .location(id)
            .ok_or_else(|| format!("location not found: \"{id}\""))?;

        println!("  Graph for: {}", location.id);
        println!();
        render_focused_graph(&graph, location);
    } else {
        println!("  Choice graph for '{}'", graph.title);
        println!();
        render_full_graph(&graph);
    }

    Ok(())
}

fn render_focused_graph(graph: &ContentGraph, center: &Location) {
    println!("  [{}]", center.id);

    if center.choices.is_empty() && !center.is_dialogue() {
        println!("    (no choices)");
    }
    for line in edges_from(graph, center) {
        println!("    {line}");
    }

    for location in graph.locations() {
        for choice in &location.choices {
            if choice.destination == center.id {
                println!("    <--{}-- [{}]", choice.id, location.id);
            }
        }
    }
}

fn render_full_graph(graph: &ContentGraph) {
    let mut edges = 0;

    for location in graph.locations() {
        let lines = edges_from(graph, location);
        if lines.is_empty() {
            continue;
        }
        println!("  [{}]", location.id);
        for line in &lines {
            println!("    {line}");
        }
        edges += location.choices.len();
    }

    println!();
    println!(
        "  {} locations, {edges} choices, hub: [{}]",
        graph.location_count(),
        graph.hub
    );
}

/// One line per outgoing choice. Dialogues and outcomes lead back to the hub.
fn edges_from(graph: &ContentGraph, location: &Location) -> Vec<String> {
    let mut lines: Vec<String> = location
        .choices
        .iter()
        .map(|choice| {
            let target = match graph.resolve(&choice.destination) {
                Destination::Location(dest) if location.is_dialogue() => {
                    format!("[{}] (dialogue ends at the hub)", dest.id)
                }
                Destination::Location(dest) => format!("[{}]", dest.id),
                Destination::Outcome(_) => {
                    format!("({}) => [{}]", choice.destination, graph.hub)
                }
                Destination::Unknown => format!("[{}] (missing!)", choice.destination),
            };
            format!("--{}--> {target}", choice.id)
        })
        .collect();

    if location.is_dialogue() && location.choices.is_empty() {
        lines.push(format!("==> [{}] (empty dialogue)", graph.hub));
    }
    lines
}
