use crate::args::{OutputFormat, ReportArgs};
use crate::commands::Out;
use crate::render::View;
use crate::{Config, Result};
use anyhow::Context;

/// Computes net worth, category totals, the trend and the projection and renders them.
///
/// With `--format json`, figures that are not finite come out as `"NaN"` or `"Infinity"`
/// strings rather than numbers.
pub async fn report(config: Config, args: ReportArgs) -> Result<Out<View>> {
    let store = config.store().await;
    let renderer = config.renderer();
    let view = View::new(&renderer, store.records());

    let text = match args.format() {
        OutputFormat::Table => renderer.report(&view.metrics),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&view).context("Unable to serialize the report")?
        }
    };

    let message = format!("Reported on {}", super::transactions(store.len()));
    Ok(Out::new(message, view).with_stdout(text))
}
