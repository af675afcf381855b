//! List the media categories

use anyhow::Result;
use serde::Serialize;

use crate::category::Category;
use crate::cli::output::{OutputFormat, print_formatted};

#[derive(Serialize)]
struct CategoryEntry {
    id: &'static str,
    label: &'static str,
}

pub async fn run(format: OutputFormat) -> Result<()> {
    let entries: Vec<CategoryEntry> = Category::all()
        .iter()
        .map(|c| CategoryEntry { id: c.id(), label: c.label() })
        .collect();

    print_formatted(&entries, format, |entries| {
        entries
            .iter()
            .map(|e| format!("{:<10} {}", e.id, e.label))
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}
