//! Output formatting

use miette::{IntoDiagnostic, Result};
use sqlcue_core::metadata::InMemoryCatalog;
use sqlcue_core::Completions;

use crate::args::OutputFormat;

/// Output formatter for completion results
pub struct OutputFormatter {
    format: OutputFormat,
    limit: Option<usize>,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, limit: Option<usize>) -> Self {
        Self { format, limit }
    }

    /// Print completions in the configured format
    pub fn print_completions(&self, completions: &Completions) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                print!("{}", self.render_human(completions));
                Ok(())
            }
            OutputFormat::Json => self.print_json(completions),
        }
    }

    fn visible<'c>(&self, completions: &'c Completions) -> &'c [sqlcue_core::CompletionItem] {
        let len = self
            .limit
            .map_or(completions.len(), |limit| limit.min(completions.len()));
        &completions.items[..len]
    }

    fn render_human(&self, completions: &Completions) -> String {
        let items = self.visible(completions);
        if items.is_empty() {
            return "No completions\n".to_string();
        }

        let width = items
            .iter()
            .map(|i| i.value.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for item in items {
            let weight = item
                .weight
                .map_or_else(|| "-".to_string(), |w| w.to_string());
            out.push_str(&format!(
                "{:>5}  {:<width$}  \x1b[2m{}\x1b[0m  ({})\n",
                item.score, item.value, item.meta, weight
            ));
        }
        if items.len() < completions.len() {
            out.push_str(&format!("... {} more\n", completions.len() - items.len()));
        }
        out
    }

    fn print_json(&self, completions: &Completions) -> Result<()> {
        let output = serde_json::json!({
            "identifierRegex": completions.identifier_regex,
            "completions": self.visible(completions),
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        Ok(())
    }
}

/// Print the databases, tables and columns of a catalog snapshot
pub fn print_catalog(catalog: &InMemoryCatalog) {
    println!("Catalog Information:");
    println!("====================");
    for (db_name, db) in &catalog.databases {
        println!("\nDatabase: {}", db_name);
        for (table_name, table) in &db.tables {
            println!("  {}: {}", table.kind.label(), table_name);
            for (col_name, col) in &table.columns {
                let sample = if col.sample.is_empty() {
                    String::new()
                } else {
                    format!(" (sample: {} values)", col.sample.len())
                };
                println!("    - {} {}{}", col_name, col.data_type, sample);
            }
        }
    }

    if !catalog.filesystem.is_empty() {
        println!("\nFilesystem:");
        for (path, entries) in &catalog.filesystem {
            println!("  {} ({} entries)", path, entries.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlcue_core::CompletionItem;

    fn completions(values: &[&str]) -> Completions {
        Completions::new(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| CompletionItem {
                    value: value.to_string(),
                    meta: "keyword".to_string(),
                    weight: Some(10),
                    score: 1000 - i as i32,
                    prioritize_score: true,
                })
                .collect(),
        )
    }

    #[test]
    fn test_human_output_respects_limit() {
        let formatter = OutputFormatter::new(OutputFormat::Human, Some(1));
        let rendered = formatter.render_human(&completions(&["FROM", "SELECT"]));

        assert!(rendered.contains("FROM"));
        assert!(!rendered.contains("SELECT"));
        assert!(rendered.contains("... 1 more"));
    }

    #[test]
    fn test_human_output_empty() {
        let formatter = OutputFormatter::new(OutputFormat::Human, None);
        assert_eq!(formatter.render_human(&completions(&[])), "No completions\n");
    }
}
