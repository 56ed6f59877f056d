use crate::args::EditArgs;
use crate::commands::Out;
use crate::metrics;
use crate::model::Record;
use crate::store::{Action, Applied};
use crate::{Config, Result};

/// Takes the transaction at `args.index()` out of the ledger so it can be re-entered.
///
/// The transaction is deleted and persisted right away, before any new values exist. The
/// returned text shows the values it had and the `ledger add` command that puts it back. It is
/// only back in the ledger once that command runs, and then at the end of the ledger rather than
/// at its old position.
pub async fn edit(config: Config, args: EditArgs) -> Result<Out<Applied>> {
    let mut store = config.store().await;
    let applied = store.dispatch(Action::BeginEdit(args.index())).await?;
    let net_worth = config
        .renderer()
        .net_worth(metrics::net_worth(store.records()));

    let Applied::Editing { index, record } = &applied else {
        return Ok(Out::new(format!("Editing. {net_worth}"), applied));
    };
    let form = edit_form(record);
    let message = format!(
        "Removed transaction {index} for editing, re-add it to keep it. {net_worth}"
    );
    Ok(Out::new(message, applied).with_stdout(form))
}

/// The record's values followed by the command that re-adds them.
fn edit_form(record: &Record) -> String {
    format!(
        "Type:   {}\nAmount: {}\nDate:   {}\nGrowth: {}\n\n{}\n",
        record.kind(),
        record.amount(),
        record.date(),
        record.growth(),
        add_command(record)
    )
}

/// A shell command that adds `record` back.
fn add_command(record: &Record) -> String {
    let mut words = vec![
        "ledger",
        "add",
        "--type",
        record.kind(),
        "--amount",
        record.amount(),
        "--date",
        record.date(),
    ];
    if !record.growth().is_empty() {
        words.push("--growth");
        words.push(record.growth());
    }
    shell_words::join(words)
}
