use crate::args::AddArgs;
use crate::commands::Out;
use crate::metrics;
use crate::model::Record;
use crate::store::{Action, Applied};
use crate::{Config, Result};

/// Appends a new transaction to the end of the ledger.
///
/// Values are stored exactly as given; nothing is validated. An amount that is not a number is
/// accepted and will show up as `NaN` in every total until it is deleted.
///
/// Returns `Applied::Added` with the position the transaction was stored at.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Applied>> {
    let record = Record::new(args.kind(), args.amount(), args.date(), args.growth());
    let mut store = config.store().await;
    let applied = store.dispatch(Action::Add(record)).await?;

    let net_worth = config
        .renderer()
        .net_worth(metrics::net_worth(store.records()));
    let message = match &applied {
        Applied::Added { index } => format!("Added transaction at position {index}. {net_worth}"),
        _ => format!("Added transaction. {net_worth}"),
    };
    Ok(Out::new(message, applied))
}
