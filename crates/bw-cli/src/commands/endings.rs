use std::path::Path;

use bw_fiction::Ending;
use comfy_table::{ContentArrangement, Table};

pub fn run(content: Option<&Path>) -> Result<(), String> {
    let graph = super::load_content(content)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Id", "Ending", "Condition", "Text"]);

    for (i, ending) in Ending::ALL.iter().enumerate() {
        let text = graph
            .ending_text(ending.id())
            .unwrap_or_else(|| ending.default_text());
        table.add_row(vec![
            (i + 1).to_string(),
            ending.id().to_string(),
            ending.title().to_string(),
            ending.condition_summary().to_string(),
            super::truncate(text, 50),
        ]);
    }

    println!("{table}");
    println!();
    println!("  Checked in order after every choice; the first match ends the investigation.");

    Ok(())
}
