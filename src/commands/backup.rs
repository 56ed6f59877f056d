use crate::args::BackupArgs;
use crate::backup::{self, BACKUP};
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

/// Writes the whole ledger to `investments_backup.json` in `args.out()`, or in the current
/// directory when no directory is given. A snapshot is also kept in `$LEDGER_HOME/.backups`.
///
/// Returns the path of the exported file.
pub async fn backup(config: Config, args: BackupArgs) -> Result<Out<PathBuf>> {
    let store = config.store().await;
    let dir = match args.out() {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Unable to determine the current directory")?,
    };

    let path = backup::export(store.records(), &dir).await?;
    let snapshot = config.backup().save_json(BACKUP, store.records()).await?;
    debug!("Saved snapshot to {}", snapshot.display());

    let message = format!(
        "Backed up {} to {}",
        super::transactions(store.len()),
        path.display()
    );
    Ok(Out::new(message, path))
}
