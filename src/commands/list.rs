use crate::args::{ListArgs, OutputFormat};
use crate::commands::Out;
use crate::metrics;
use crate::render::TableRow;
use crate::{Config, Result};
use anyhow::Context;

/// Renders every transaction, in ledger order, followed by the net worth.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<TableRow>>> {
    let store = config.store().await;
    let renderer = config.renderer();
    let rows = renderer.rows(store.records());

    let text = match args.format() {
        OutputFormat::Table => format!(
            "{}\n{}\n",
            renderer.table(store.records()),
            renderer.net_worth(metrics::net_worth(store.records()))
        ),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&rows).context("Unable to serialize the table")?
        }
    };

    let message = format!("Listed {}", super::transactions(rows.len()));
    Ok(Out::new(message, rows).with_stdout(text))
}
