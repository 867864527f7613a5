//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::ItemDisplay;
use crate::session::{DisplayItem, Icon, Response};

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(self)?),
            OutputFormat::Table | OutputFormat::Pretty => {
                Ok(table::format_table(self, "No accounts found."))
            }
        }
    }
}

impl Formattable for Response {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(&self.items)?),
            OutputFormat::Table => {
                let rows: Vec<ItemDisplay> = self.items.iter().map(ItemDisplay::from).collect();
                Ok(table::format_table(&rows, "Nothing to show."))
            }
            OutputFormat::Pretty => Ok(format_items_pretty(&self.items)),
        }
    }
}

/// Render items as a launcher-style list
fn format_items_pretty(items: &[DisplayItem]) -> String {
    if items.is_empty() {
        return "Nothing to show.".dimmed().to_string();
    }

    items
        .iter()
        .map(|item| {
            let marker = match item.icon {
                Icon::Warning => "⚠".yellow(),
                Icon::Account | Icon::Cached(_) => "●".cyan(),
                Icon::Sync => "↻".green(),
                Icon::Launch => "→".cyan(),
                Icon::Edit => "✎".normal(),
                Icon::App => "○".dimmed(),
            };
            let action = crate::models::display::describe_action(&item.on_enter);
            let mut line = format!("{} {}", marker, item.title.bold());
            if let Some(ref subtitle) = item.subtitle {
                line.push_str(&format!("  {}", subtitle.dimmed()));
            }
            if action != "-" {
                line.push_str(&format!("  [{}]", action.cyan()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::account;
    use crate::models::AccountDisplay;

    #[test]
    fn test_pretty_items_include_titles_and_actions() {
        colored::control::set_override(false);
        let response = Response {
            items: vec![DisplayItem::instructions(), DisplayItem::sync_action()],
        };

        let out = response.format(OutputFormat::Pretty).unwrap();

        assert!(out.contains("Account Search"));
        assert!(out.contains("Enter the service and/or account name"));
        assert!(out.contains("[sync]"));
    }

    #[test]
    fn test_response_json_is_item_list() {
        let response = Response::single(DisplayItem::instructions());

        let out = response.format(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["data"][0]["title"], "Account Search");
        assert_eq!(value["data"][0]["on_enter"]["type"], "do_nothing");
    }

    #[test]
    fn test_account_list_table() {
        let rows = vec![AccountDisplay::from(account(1, "GitHub", "alice"))];

        let out = rows.format(OutputFormat::Table).unwrap();

        assert!(out.contains("SERVICE"));
        assert!(out.contains("GitHub"));
    }

    #[test]
    fn test_empty_response_pretty() {
        colored::control::set_override(false);
        let out = Response::default().format(OutputFormat::Pretty).unwrap();
        assert_eq!(out, "Nothing to show.");
    }
}
