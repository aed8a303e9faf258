use anyhow::Result;
use crossterm::style::Stylize;
use std::time::Duration;

use pg_explorer::config::config::Config;
use pg_explorer::config::db_config::DbConfig;
use pg_explorer::config::setup;
use pg_explorer::data::data_provider::{DataProvider, MemoryProvider};
use pg_explorer::data::postgres_provider::PostgresProvider;
use pg_explorer::logging::init_tracing;
use pg_explorer::tui_app::run_tui_app;
use pg_explorer::utils::app_paths::AppPaths;

fn print_help() {
    println!("{}", "pg-explorer - Browse PostgreSQL tables in the terminal".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  pg-explorer [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}           - Run the connection setup wizard", "--setup".green());
    println!("  {}            - Browse built-in sample data (no database)", "--demo".green());
    println!("  {} - Generate config file with defaults", "--generate-config".green());
    println!("  {}            - Show this help", "--help".green());
    println!();
    println!("{}", "Connection:".yellow());
    println!("  Read from .env or the environment: DB_USER, DB_PASSWORD, DB_NAME, DB_HOST, DB_PORT");
    println!();
    println!("{}", "Logging:".yellow());
    println!("  PG_EXPLORER_LOG (or RUST_LOG) sets the filter, e.g. PG_EXPLORER_LOG=debug");
    println!();
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    println!("Edit this file to customize pg-explorer.");
    Ok(())
}

/// Run the setup wizard when asked to or when nothing is configured.
///
/// Returns false when the operator cancelled and there is nothing to start with.
fn ensure_connection_settings(force_setup: bool) -> Result<bool> {
    let env_path = AppPaths::env_file()?;
    let cwd = std::env::current_dir()?;
    if !force_setup && DbConfig::is_configured(&cwd) {
        return Ok(true);
    }

    match setup::run_setup(&env_path) {
        Ok(_) => Ok(true),
        Err(e) if setup::is_cancelled(&e) => {
            println!("Setup cancelled.");
            Ok(env_path.exists())
        }
        Err(e) => Err(e),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        if let Err(e) = generate_config() {
            eprintln!("Error writing config file: {:#}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    match init_tracing(true) {
        Ok(Some(path)) => {
            eprintln!("📝 Debug logs will be written to:");
            eprintln!("   {}", path.display());
            eprintln!();
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Warning: file logging disabled: {:#}", e);
            init_tracing(false)?;
        }
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: using default settings: {:#}", e);
            Config::default()
        }
    };

    let provider: Box<dyn DataProvider> = if args.contains(&"--demo".to_string()) {
        Box::new(MemoryProvider::demo().with_row_limit(config.behavior.row_limit))
    } else {
        if !ensure_connection_settings(args.contains(&"--setup".to_string()))? {
            return Ok(());
        }

        let db_config = match DbConfig::load() {
            Ok(db_config) => db_config,
            Err(e) => {
                eprintln!("Invalid connection settings: {:#}", e);
                eprintln!("Check your .env file or run `pg-explorer --setup`.");
                std::process::exit(1);
            }
        };

        let timeout = Duration::from_secs(config.behavior.connect_timeout_secs);
        match PostgresProvider::connect(&db_config, config.behavior.row_limit, timeout) {
            Ok(provider) => Box::new(provider),
            Err(e) => {
                eprintln!("Failed to connect to database: {:#}", e);
                eprintln!("Check the settings in your .env file or run `pg-explorer --setup`.");
                std::process::exit(1);
            }
        }
    };

    run_tui_app(provider, config)
}
