use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its backups subdirectory and an initial `config.json`.
///
/// # Arguments
/// - `ledger_home` - The directory that will be the root of data directory, e.g. `$HOME/ledger`
/// - `currency` - The symbol shown in front of amounts. `None` uses the default.
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operation fails.
pub async fn init(ledger_home: &Path, currency: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(ledger_home, currency)
        .await
        .context("Unable to create the data directory and config")?;
    Ok(format!(
        "Successfully created the ledger directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("ledger");
        let out = init(&home, Some("€")).await.unwrap();
        assert!(out.message().contains("Successfully created"));

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.currency_symbol(), "€");
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), None).await.unwrap();
        assert!(init(dir.path(), None).await.is_err());
    }
}
