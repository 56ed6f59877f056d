use crate::args::RestoreArgs;
use crate::backup::{self, PRE_RESTORE};
use crate::commands::Out;
use crate::metrics;
use crate::store::{Action, Applied};
use crate::{Config, Result};
use tracing::debug;

/// Replaces the whole ledger with the records in `args.file()`.
///
/// The file is read and parsed completely before anything changes. If it cannot be read or is
/// not a JSON array of transactions, an error is returned and the ledger is left as it was. The
/// current ledger is snapshotted to `$LEDGER_HOME/.backups` before it is replaced.
pub async fn restore(config: Config, args: RestoreArgs) -> Result<Out<Applied>> {
    let records = backup::read_restore_file(args.file()).await?;

    let mut store = config.store().await;
    let snapshot = config
        .backup()
        .save_json(PRE_RESTORE, store.records())
        .await?;
    debug!("Saved pre-restore snapshot to {}", snapshot.display());

    let applied = store.dispatch(Action::Restore(records)).await?;
    let net_worth = config
        .renderer()
        .net_worth(metrics::net_worth(store.records()));
    let message = format!(
        "Restored {} from {}. {net_worth}",
        super::transactions(store.len()),
        args.file().display()
    );
    Ok(Out::new(message, applied))
}
