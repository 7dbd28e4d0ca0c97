use std::io::BufRead;

use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::filter::{filter_list, normalize_query, visible_items};

pub async fn handle(query: String, items: Vec<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let items = if items.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()?
    } else {
        items
    };

    tracing::debug!("Filtering {} items with '{}'", items.len(), normalize_query(&query));

    match output_format {
        OutputFormat::Text => {
            for text in visible_items(&query, items.as_slice()) {
                println!("{}", text);
            }
        }
        _ => output_structured(
            &output_format,
            &json!({ "query": normalize_query(&query), "items": filter_list(&query, items.as_slice()) }),
        )?,
    }

    Ok(())
}
