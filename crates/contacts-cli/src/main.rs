mod cli;
mod config;
mod shell;
mod storage;

use std::io::{self, Write};

use crate::cli::ConfigCommand;
use clap::Parser;
use color_eyre::Result;
use contacts_core::{storage::ContactStorage, ContactStore, Loaded};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Entry point wiring the CLI to the interactive menu.
fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    let storage = storage::storage_from_config(&config);
    match cli.command.unwrap_or(cli::Command::Shell) {
        cli::Command::Shell => run_shell(&storage)?,
        cli::Command::List => run_list(&storage, &mut io::stdout().lock())?,
        cli::Command::Search { name } => run_search(&storage, &name, &mut io::stdout().lock())?,
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
    }

    Ok(())
}

fn init_tracing() {
    // Load/save warnings are printed directly; keep logs quiet unless asked for.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("contacts {}", env!("CARGO_PKG_VERSION"));
}

/// Load the store, printing any warnings to stderr. Never fails.
fn load_contacts<S: ContactStorage + ?Sized>(storage: &S) -> ContactStore {
    let Loaded { store, warnings } = ContactStore::load(storage);
    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }
    store
}

fn run_shell<S: ContactStorage + ?Sized>(storage: &S) -> Result<()> {
    let mut store = load_contacts(storage);
    let stdin = io::stdin();
    let end = shell::Shell::new(stdin.lock(), io::stdout().lock()).run(&mut store, storage)?;
    debug!(?end, "session finished");
    Ok(())
}

fn run_list<S: ContactStorage + ?Sized>(storage: &S, out: &mut impl Write) -> Result<()> {
    let store = load_contacts(storage);
    shell::write_contacts(out, &store)?;
    Ok(())
}

fn run_search<S: ContactStorage + ?Sized>(
    storage: &S,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let store = load_contacts(storage);
    match store.search(name) {
        Some(contact) => shell::write_contact(out, contact)?,
        None => writeln!(out, "Contact not found.")?,
    }
    Ok(())
}

fn init_config(config: &config::Config) -> Result<()> {
    let resolved = config::Config {
        contacts_file: Some(config.contacts_path()),
    };
    let path = config::write_default_if_missing(&resolved)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
