//! Delete command handler and its confirmation prompt.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::metrics;
use crate::model::Record;
use crate::store::{Action, Applied};
use crate::{Config, Result};
use anyhow::{bail, Context};
use std::io::{BufRead, Write};
use tracing::debug;

/// Deletes the transaction at `args.index()`.
///
/// Unless `args.yes()` is set, `confirm` is called with the transaction first, and nothing is
/// deleted when it returns `false`. Later transactions move up by one position.
///
/// # Errors
/// - Returns an error if there is no transaction at that position.
/// - Returns an error if `confirm` fails or the ledger cannot be persisted.
pub async fn delete<F>(config: Config, args: DeleteArgs, confirm: F) -> Result<Out<Option<Applied>>>
where
    F: FnOnce(&Record) -> Result<bool>,
{
    let mut store = config.store().await;
    let index = args.index();
    let Some(record) = store.records().get(index) else {
        bail!(
            "There is no transaction at position {index}, the ledger has {}",
            super::transactions(store.len())
        )
    };

    if !args.yes() && !confirm(record)? {
        debug!("Delete of {index} declined");
        return Ok(Out::new_message("Nothing was deleted"));
    }

    let applied = store.dispatch(Action::Delete(index)).await?;
    let net_worth = config
        .renderer()
        .net_worth(metrics::net_worth(store.records()));
    let message = match &applied {
        Applied::Deleted { record, .. } => {
            format!("Deleted transaction {index} ({record}). {net_worth}")
        }
        _ => format!("Deleted transaction {index}. {net_worth}"),
    };
    Ok(Out::new(message, Some(applied)))
}

/// Asks `Are you sure?` about `record` on `output` and reads the answer from `input`. Only an
/// answer starting with `y` or `Y` counts as yes.
pub fn ask<R, W>(record: &Record, input: &mut R, output: &mut W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Delete {record}? Are you sure? [y/N] ").context("Unable to write prompt")?;
    output.flush().context("Unable to write prompt")?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Unable to read the answer")?;
    Ok(answer.trim_start().starts_with(['y', 'Y']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{sample_records, TestEnv};
    use std::io::Cursor;

    #[tokio::test]
    async fn test_delete_confirmed() {
        let env = TestEnv::new().await;
        env.seed(sample_records()).await;

        let out = delete(env.config(), DeleteArgs::new(1, false), |r| {
            assert_eq!(r.kind(), "Mutual Fund");
            Ok(true)
        })
        .await
        .unwrap();

        assert!(out.message().contains("Deleted transaction 1"));
        assert!(out.message().contains("Net Worth: ₹1250"));
        let records = env.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].amount(), "250");
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let env = TestEnv::new().await;
        env.seed(sample_records()).await;

        let out = delete(env.config(), DeleteArgs::new(0, false), |_| Ok(false))
            .await
            .unwrap();

        assert_eq!(out.message(), "Nothing was deleted");
        assert!(out.structure().is_none());
        assert_eq!(env.records().await, sample_records());
    }

    #[tokio::test]
    async fn test_delete_yes_skips_confirmation() {
        let env = TestEnv::new().await;
        env.seed(sample_records()).await;

        let out = delete(env.config(), DeleteArgs::new(2, true), |_| {
            panic!("should not ask")
        })
        .await
        .unwrap();

        assert!(matches!(
            out.structure(),
            Some(Some(Applied::Deleted { index: 2, .. }))
        ));
        assert_eq!(env.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_out_of_range() {
        let env = TestEnv::new().await;
        env.seed(sample_records()).await;

        let err = delete(env.config(), DeleteArgs::new(3, true), |_| Ok(true))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no transaction at position 3"));
        assert_eq!(env.records().await, sample_records());
    }

    #[test]
    fn test_ask() {
        let record = Record::new("Stock", "10", "2024", "");
        let mut output = Vec::new();

        assert!(ask(&record, &mut Cursor::new("y\n"), &mut output).unwrap());
        assert!(ask(&record, &mut Cursor::new("Yes\n"), &mut output).unwrap());
        assert!(!ask(&record, &mut Cursor::new("n\n"), &mut output).unwrap());
        assert!(!ask(&record, &mut Cursor::new("\n"), &mut output).unwrap());
        assert!(!ask(&record, &mut Cursor::new(""), &mut output).unwrap());

        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.contains("Are you sure? [y/N]"));
    }
}
