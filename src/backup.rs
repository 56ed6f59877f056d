//! Backup export, restore parsing, and the rotating snapshots kept in `$LEDGER_HOME/.backups`.

use crate::model::{Record, Records};
use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};

/// The file name a backup export is written to.
pub const BACKUP_FILE_NAME: &str = "investments_backup.json";

/// Prefix for snapshots taken when a backup is exported.
pub const BACKUP: &str = "backup";

/// Prefix for snapshots taken right before a restore replaces the ledger.
pub const PRE_RESTORE: &str = "pre-restore";

const EXTENSION: &str = "json";

/// Serializes `records` into the backup file format, which is the same JSON array the ledger is
/// persisted as.
pub fn to_json(records: &[Record]) -> Result<String> {
    serde_json::to_string(records).context("Failed to serialize records to JSON")
}

/// Parses the full contents of a restore file. Anything that is not a JSON array of records is
/// an error.
pub fn parse(content: &str) -> Result<Records> {
    serde_json::from_str(content).context("The file is not a valid ledger backup")
}

/// Writes `records` to `dir/investments_backup.json`, returning the path written.
pub async fn export(records: &[Record], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(BACKUP_FILE_NAME);
    utils::write(&path, to_json(records)?).await?;
    Ok(path)
}

/// Reads and parses a restore file. The file is read in full before parsing begins.
pub async fn read_restore_file(path: &Path) -> Result<Records> {
    let content = utils::read(path).await?;
    parse(&content).with_context(|| format!("Unable to restore from {}", path.display()))
}

/// Manages snapshot file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
        }
    }

    /// Saves `records` as a pretty-printed JSON snapshot.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old snapshots, keeping only `backup_copies` files per prefix.
    ///
    /// Returns the path to the created snapshot file.
    pub async fn save_json(&self, prefix: &str, records: &[Record]) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let filename = format!("{prefix}.{date}-{seq:03}.{EXTENSION}");
        let path = self.backups_dir.join(&filename);

        let json =
            serde_json::to_string_pretty(records).context("Failed to serialize records to JSON")?;
        utils::write(&path, json).await?;

        self.rotate(prefix).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        for name in self.file_names().await? {
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Rotates old snapshot files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<String> = self
            .file_names()
            .await?
            .into_iter()
            .filter(|name| is_backup_file(name, prefix))
            .collect();

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort();

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for name in files.into_iter().take(to_delete) {
            utils::remove(self.backups_dir.join(name)).await?;
        }

        Ok(())
    }

    async fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a snapshot filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.json
    let remainder = filename.strip_prefix(&format!("{prefix}.{date}-"))?;
    let seq_str = remainder.strip_suffix(&format!(".{EXTENSION}"))?;
    seq_str.parse().ok()
}

/// Checks if a filename is a snapshot file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(&format!(".{EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use tempfile::TempDir;

    fn records() -> Records {
        vec![
            Record::new("Stock", "500", "2024-01-01", "8"),
            Record::new("Bond", "100", "2024-02-01", ""),
        ]
    }

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("backup.2025-12-14-001.json", "backup", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("backup.2025-12-14-042.json", "backup", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("pre-restore.2025-12-14-001.json", "backup", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("backup.2025-12-13-001.json", "backup", "2025-12-14"),
            None
        );
        // Wrong extension
        assert_eq!(
            parse_sequence_number("backup.2025-12-14-001.txt", "backup", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("backup.2025-12-14-001.json", "backup"));
        assert!(is_backup_file("pre-restore.2025-12-14-001.json", "pre-restore"));
        assert!(!is_backup_file("backup.2025-12-14-001.json", "pre-restore"));
        assert!(!is_backup_file("backup.2025-12-14-001", "backup"));
    }

    #[test]
    fn test_to_json_then_parse() {
        let json = to_json(&records()).unwrap();
        assert_eq!(parse(&json).unwrap(), records());
    }

    #[test]
    fn test_parse_single_record() {
        let json = r#"[{"type":"Stock","amount":"500","date":"2024-01-01","growth":"8"}]"#;
        let parsed = parse(json).unwrap();
        assert_eq!(parsed, vec![Record::new("Stock", "500", "2024-01-01", "8")]);
    }

    #[test]
    fn test_parse_rejects_bad_content() {
        assert!(parse("not json").is_err());
        assert!(parse(r#"{"type":"Stock"}"#).is_err());
        assert!(parse(r#"[{"type":"Stock"}]"#).is_err());
        assert!(parse("").is_err());
    }

    #[tokio::test]
    async fn test_export_writes_backup_file() {
        let dir = TempDir::new().unwrap();
        let path = export(&records(), dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join(BACKUP_FILE_NAME));
        assert_eq!(read_restore_file(&path).await.unwrap(), records());
    }

    #[tokio::test]
    async fn test_read_restore_file_missing() {
        let dir = TempDir::new().unwrap();
        assert!(read_restore_file(&dir.path().join("missing.json"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_save_json_sequence_and_rotation() {
        let env = TestEnv::new().await;
        let backup = env.config().backup();

        let first = backup.save_json(BACKUP, &records()).await.unwrap();
        let second = backup.save_json(BACKUP, &records()).await.unwrap();
        assert!(first.to_string_lossy().ends_with("-001.json"));
        assert!(second.to_string_lossy().ends_with("-002.json"));

        for _ in 0..6 {
            backup.save_json(BACKUP, &records()).await.unwrap();
        }
        backup.save_json(PRE_RESTORE, &records()).await.unwrap();

        let names = backup.file_names().await.unwrap();
        let kept = names.iter().filter(|n| is_backup_file(n, BACKUP)).count();
        assert_eq!(kept, env.config().backup_copies() as usize);
        assert!(!first.exists());
        assert_eq!(
            names.iter().filter(|n| is_backup_file(n, PRE_RESTORE)).count(),
            1
        );
    }
}
