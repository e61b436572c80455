pub mod commands;
pub mod logging;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stockroom_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    about = "Stockroom inventory catalog CLI",
    long_about = "Inspect and operate an in-memory product catalog: statistics, category filters, product detail, and an interactive shell for stock changes.",
    after_help = "Examples:\n  stockroom stats\n  stockroom list --category Electronics\n  stockroom show 3\n  printf 'adjust 1 -2\\nstats\\n' | stockroom shell"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Print catalog-wide statistics (count, value, categories, low stock)")]
    Stats,
    #[command(about = "List products, optionally restricted to one category")]
    List {
        #[arg(long, help = "Category label to filter by (`All` shows everything)")]
        category: Option<String>,
    },
    #[command(about = "List categories with the number of products in each")]
    Categories,
    #[command(about = "Show one product with its subtotal and stock flags")]
    Show {
        #[arg(help = "Product identifier")]
        id: u64,
    },
    #[command(about = "Read catalog commands from stdin and apply them to one in-memory catalog")]
    Shell,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::List { .. } => "list",
            Self::Categories => "categories",
            Self::Show { .. } => "show",
            Self::Shell => "shell",
            Self::Config => "config",
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            logging::init(&config.logging);
            dispatch(cli.command, &config)
        }
        Err(error) => CommandResult::failure(
            cli.command.name(),
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        ),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn dispatch(command: Command, config: &AppConfig) -> CommandResult {
    match command {
        Command::Stats => commands::catalog::stats(config),
        Command::List { category } => commands::catalog::list(config, category.as_deref()),
        Command::Categories => commands::catalog::categories(config),
        Command::Show { id } => commands::catalog::show(config, id),
        Command::Shell => commands::shell::run(config, io::stdin().lock(), io::stdout().lock()),
        Command::Config => commands::config::run(config),
    }
}
