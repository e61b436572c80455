//! Line-oriented driver for a single in-process catalog.
//!
//! Each input line is one command; each produces one JSON line on the output.
//! A failing line is reported and the session carries on with the next one.
//!
//! ```text
//! add name=Desk Lamp;category=Office;price=19.99;quantity=4;rating=4.5;image=lamp.jpg;...
//! adjust 7 -2
//! sell 7
//! rename 7 Desk Lamp Pro
//! select 7
//! selected
//! filter Office
//! list
//! delete 7 --yes
//! stats
//! ```

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};
use stockroom_core::config::AppConfig;
use stockroom_core::{ApplicationError, CatalogStore, CategoryFilter, ProductDraft, ProductId};

use crate::commands::catalog::{categories_payload, list_payload};
use crate::commands::{open_store, to_value, CommandResult, ProductView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Add(ProductDraft),
    Adjust { id: ProductId, delta: i64 },
    Sell(ProductId),
    Rename { id: ProductId, name: String },
    Delete { id: ProductId, confirmed: bool },
    Select(ProductId),
    Clear,
    Filter(CategoryFilter),
    List,
    Stats,
    Categories,
    Selected,
}

impl ShellCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Adjust { .. } => "adjust",
            Self::Sell(_) => "sell",
            Self::Rename { .. } => "rename",
            Self::Delete { .. } => "delete",
            Self::Select(_) => "select",
            Self::Clear => "clear",
            Self::Filter(_) => "filter",
            Self::List => "list",
            Self::Stats => "stats",
            Self::Categories => "categories",
            Self::Selected => "selected",
        }
    }

    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "add" => Self::Add(parse_draft(rest)?),
            "adjust" => {
                let mut args = rest.split_whitespace();
                let id = parse_id(args.next())?;
                let raw_delta = args.next().ok_or_else(|| anyhow!("adjust needs a delta"))?;
                let delta = raw_delta
                    .parse::<i64>()
                    .with_context(|| format!("invalid quantity delta `{raw_delta}`"))?;
                Self::Adjust { id, delta }
            }
            "sell" => Self::Sell(parse_id(rest.split_whitespace().next())?),
            "rename" => {
                let (raw_id, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Self::Rename { id: parse_id(Some(raw_id))?, name: name.to_string() }
            }
            "delete" => {
                let mut args = rest.split_whitespace();
                let id = parse_id(args.next())?;
                let confirmed = args.any(|arg| arg == "--yes" || arg == "-y");
                Self::Delete { id, confirmed }
            }
            "select" => Self::Select(parse_id(rest.split_whitespace().next())?),
            "clear" => Self::Clear,
            "filter" => {
                if rest.is_empty() {
                    bail!("filter needs a category label (use `All` to reset)");
                }
                Self::Filter(CategoryFilter::from(rest))
            }
            "list" => Self::List,
            "stats" => Self::Stats,
            "categories" => Self::Categories,
            "selected" => Self::Selected,
            "" => bail!("empty command"),
            other => bail!("unknown command `{other}`"),
        };

        Ok(command)
    }
}

fn parse_id(raw: Option<&str>) -> Result<ProductId> {
    let raw = raw.filter(|raw| !raw.is_empty()).ok_or_else(|| anyhow!("missing product id"))?;
    let id = raw.parse::<u64>().with_context(|| format!("invalid product id `{raw}`"))?;
    Ok(ProductId(id))
}

/// `key=value` pairs separated by `;`. Omitted fields stay at their draft defaults.
fn parse_draft(raw: &str) -> Result<ProductDraft> {
    let mut draft = ProductDraft::default();
    for pair in raw.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (key, value) =
            pair.split_once('=').ok_or_else(|| anyhow!("expected `field=value`, got `{pair}`"))?;
        if !draft.set_field(key.trim(), value.trim()) {
            bail!("unknown product field `{}`", key.trim());
        }
    }
    Ok(draft)
}

pub fn execute(
    store: &mut CatalogStore,
    command: &ShellCommand,
) -> Result<Value, ApplicationError> {
    let threshold = store.low_stock_threshold();
    let data = match command {
        ShellCommand::Add(draft) => {
            let product = store.add_product(draft.clone())?;
            to_value(&ProductView::new(product, threshold))
        }
        ShellCommand::Adjust { id, delta } => {
            let quantity = store.update_quantity(*id, *delta)?;
            json!({ "id": id, "quantity": quantity })
        }
        ShellCommand::Sell(id) => {
            let quantity = store.sell_one(*id)?;
            json!({ "id": id, "quantity": quantity })
        }
        ShellCommand::Rename { id, name } => {
            store.rename_product(*id, name)?;
            json!({ "id": id, "name": name.trim() })
        }
        ShellCommand::Delete { id, .. } => {
            let removed = store.delete_product(*id)?;
            json!({ "id": id, "name": removed.name })
        }
        ShellCommand::Select(id) => {
            let product = store.select_product(*id)?;
            to_value(&ProductView::new(product, threshold))
        }
        ShellCommand::Clear => {
            store.clear_selection();
            json!({ "selected": Value::Null })
        }
        ShellCommand::Filter(filter) => {
            store.set_category_filter(filter.clone());
            list_payload(store)
        }
        ShellCommand::List => list_payload(store),
        ShellCommand::Stats => to_value(&store.statistics()),
        ShellCommand::Categories => categories_payload(store),
        ShellCommand::Selected => match store.selected() {
            Some(product) => to_value(&ProductView::new(product, threshold)),
            None => json!({ "selected": Value::Null }),
        },
    };

    Ok(data)
}

fn process_line(store: &mut CatalogStore, line_number: usize, line: &str) -> CommandResult {
    let command = match ShellCommand::parse(line) {
        Ok(command) => command,
        Err(error) => return CommandResult::failure("shell", "parse", format!("{error:#}"), 1),
    };

    if let ShellCommand::Delete { id, confirmed: false } = &command {
        return CommandResult::failure(
            "delete",
            "confirmation_required",
            format!("deleting product {id} needs confirmation; repeat with --yes"),
            1,
        );
    }

    match execute(store, &command) {
        Ok(data) => CommandResult::success_with_data(command.name(), data),
        Err(error) => {
            let interface = error.into_interface(format!("line-{line_number}"));
            let message = interface.to_string();
            CommandResult::failure(command.name(), interface.error_class(), message, 1)
        }
    }
}

/// Runs commands from `input` against one store until end of input.
/// Blank lines and lines starting with `#` are skipped.
pub fn run<R, W>(config: &AppConfig, input: R, mut output: W) -> CommandResult
where
    R: BufRead,
    W: Write,
{
    let mut store = open_store(config);
    let mut processed = 0usize;
    let mut failed = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                return CommandResult::failure("shell", "io", format!("read failed: {error}"), 3)
            }
        };
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let result = process_line(&mut store, index + 1, &line);
        processed += 1;
        if result.exit_code != 0 {
            failed += 1;
        }
        if let Err(error) = writeln!(output, "{}", result.output) {
            return CommandResult::failure("shell", "io", format!("write failed: {error}"), 3);
        }
    }

    tracing::info!(
        event_name = "cli.shell.finished",
        processed,
        failed,
        remaining_products = store.len(),
        "shell session finished"
    );
    let message = format!(
        "processed {processed} commands ({failed} failed); catalog holds {} products",
        store.len()
    );
    CommandResult::success("shell", message)
}
