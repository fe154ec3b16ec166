use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use numlog::domain::Log;
use numlog::storage::FileStore;
use numlog::{LogStore, NumlogError};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

type Store = LogStore<FileStore>;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("numlog")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("numlog.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Let every record through the logger; the max level set below (or RUST_LOG) filters
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Apply the configured `log_level` unless RUST_LOG already chose one.
fn apply_log_level(config: &Config) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    match config.log_level_filter() {
        Some(level) => log::set_max_level(level),
        None => log::warn!("Ignoring unknown log_level {:?}", config.log_level),
    }
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let storage = FileStore::new(&config.storage.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.storage.data_dir.display()))?;
    let mut store = LogStore::open(storage, config.storage.state_key.clone());

    match &cli.command {
        None | Some(Commands::Show) => handle_show_command(&store),
        Some(Commands::Logs) => handle_logs_command(&store),
        Some(Commands::Add { value }) => handle_add_command(&mut store, value),
        Some(Commands::Select { index }) => handle_select_command(&mut store, *index),
        Some(Commands::New { name }) => handle_new_command(&mut store, name.as_deref()),
        Some(Commands::Rename { name }) => handle_rename_command(&mut store, name),
        Some(Commands::Delete { yes }) => handle_delete_command(&mut store, *yes),
        Some(Commands::Export { output }) => handle_export_command(&store, output.as_deref(), config),
        Some(Commands::Import { file }) => handle_import_command(&mut store, file),
    }
}

/// Print a notice for errors that leave the state untouched, propagate the rest.
fn report_no_op(result: numlog::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(NumlogError::NoCurrentLog) => {
            println!("{}", "No log selected. Use `numlog new` to create one.".yellow());
            Ok(false)
        }
        Err(NumlogError::InvalidInput(text)) => {
            println!("{} {:?} is not a number, not logging", "Skipped:".yellow(), text);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_show_command(store: &Store) -> Result<()> {
    let Some(log) = store.current_log() else {
        println!("{}", "No log selected. Use `numlog new` to create one.".yellow());
        return Ok(());
    };

    println!("{} {}", "Current Log:".green().bold(), log.name);
    if log.is_empty() {
        println!("  (no entries)");
        return Ok(());
    }

    println!("{:<12} {:<10} {}", "Date".bold(), "Time".bold(), log.units.bold());
    for entry in &log.entries {
        let local = entry.time.with_timezone(&chrono::Local);
        println!(
            "{:<12} {:<10} {}",
            local.format("%Y-%m-%d"),
            local.format("%H:%M:%S"),
            entry.value
        );
    }
    Ok(())
}

fn handle_logs_command(store: &Store) -> Result<()> {
    let state = store.state();
    if state.logs.is_empty() {
        println!("{}", "No logs. Use `numlog new` to create one.".yellow());
        return Ok(());
    }
    for (index, log) in state.logs.iter().enumerate() {
        let marker = if state.current_index() == Some(index) { "*" } else { " " };
        println!("{} {:>3}  {}", marker.green(), index, describe(log));
    }
    Ok(())
}

fn describe(log: &Log) -> String {
    format!("{} ({}, {} entries)", log.name, log.units, log.len())
}

fn handle_add_command(store: &mut Store, value: &str) -> Result<()> {
    info!("Adding value: {}", value);
    store.set_new_value_input(value)?;
    if !report_no_op(store.append_entry())? {
        return Ok(());
    }
    if let Some(log) = store.current_log() {
        if let Some(entry) = log.entries.last() {
            println!("{} {} {} to {}", "Added:".green(), entry.value, log.units, log.name);
        }
    }
    Ok(())
}

fn handle_select_command(store: &mut Store, index: usize) -> Result<()> {
    info!("Selecting log: {}", index);
    store.select_log(index)?;
    if let Some(log) = store.current_log() {
        println!("{} {}", "Current Log:".green(), describe(log));
    }
    Ok(())
}

fn handle_new_command(store: &mut Store, name: Option<&str>) -> Result<()> {
    info!("Creating log: {:?}", name);
    store.create_log()?;
    if let Some(name) = name {
        rename_via_dialog(store, name)?;
    }
    if let Some(log) = store.current_log() {
        println!("{} {}", "Created:".green(), describe(log));
    }
    Ok(())
}

fn handle_rename_command(store: &mut Store, name: &str) -> Result<()> {
    info!("Renaming current log to: {}", name);
    let old_name = store.current_log().map(|l| l.name.clone());
    if !report_no_op(rename_via_dialog(store, name))? {
        return Ok(());
    }
    if let Some(log) = store.current_log() {
        if Some(&log.name) == old_name.as_ref() {
            println!("{} {}", "Kept:".cyan(), log.name);
        } else {
            println!("{} {}", "Renamed:".green(), log.name);
        }
    }
    Ok(())
}

fn rename_via_dialog(store: &mut Store, name: &str) -> numlog::Result<()> {
    store.begin_rename()?;
    store.set_new_log_name(name)?;
    store.commit_rename()
}

fn handle_delete_command(store: &mut Store, yes: bool) -> Result<()> {
    if !report_no_op(store.request_delete())? {
        return Ok(());
    }
    let name = store.current_log().map(|l| l.name.clone()).unwrap_or_default();

    let confirmed = yes
        || confirm(&format!(
            "Are you sure you want to delete Log \"{}\"? This action cannot be undone. [y/N] ",
            name
        ))?;

    if confirmed {
        info!("Deleting log: {}", name);
        store.confirm_delete()?;
        println!("{} {}", "Deleted:".red(), name);
    } else {
        store.cancel_delete()?;
        println!("{}", "Kept.".cyan());
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn handle_export_command(store: &Store, output: Option<&Path>, config: &Config) -> Result<()> {
    let (file_name, body) = match store.export_current_log(config.export.line_separator) {
        Ok(export) => export,
        Err(e) => {
            report_no_op(Err(e))?;
            return Ok(());
        }
    };

    let dir = output.map(Path::to_path_buf).unwrap_or_else(|| config.export_dir());
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(&file_name);
    fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Exported current log to {}", path.display());
    println!("{} {}", "Exported:".green(), path.display());
    Ok(())
}

fn handle_import_command(store: &mut Store, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    info!("Importing {}", file.display());
    store.import_log(&file_name, &text)?;
    if let Some(log) = store.current_log() {
        println!("{} {}", "Imported:".green(), describe(log));
    }
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(&config);

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
