use std::path::Path;

use bw_core::LocationKind;
use comfy_table::{ContentArrangement, Table};

pub fn run(content: Option<&Path>) -> Result<(), String> {
    let graph = super::load_content(content)?;

    if graph.location_count() == 0 {
        println!("  No locations found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Location", "Kind", "Choices", "Description"]);

    for location in graph.locations() {
        let mut kind = match location.kind {
            LocationKind::Exploration => "exploration".to_string(),
            LocationKind::Dialogue => "dialogue".to_string(),
        };
        if location.id == graph.start {
            kind.push_str(" (start)");
        } else if location.id == graph.hub {
            kind.push_str(" (hub)");
        }

        table.add_row(vec![
            location.id.clone(),
            kind,
            location.choices.len().to_string(),
            super::truncate(&location.description, 60),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} locations, {} outcomes",
        graph.location_count(),
        graph.outcomes().count()
    );

    Ok(())
}
