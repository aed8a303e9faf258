//! First-run setup wizard for the database connection.
//!
//! Prompts line by line for the five connection settings, shows a summary
//! and writes `.env` after confirmation.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::config::db_config::{parse_port, DbConfig};

/// Error text when the operator declines to save
pub const SETUP_CANCELLED: &str = "setup cancelled";

/// Whether an error is the operator declining the wizard
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.to_string() == SETUP_CANCELLED
}

/// Run the wizard on stdin/stdout and save the result to `env_path`
pub fn run_setup(env_path: &Path) -> Result<DbConfig> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let config = prompt_db_config(&mut stdin.lock(), &mut stdout, &DbConfig::default())?;
    config.write_env_file(env_path)?;
    writeln!(stdout, "\nConfiguration saved to: {}", env_path.display())?;
    Ok(config)
}

/// Ask for each connection setting, offering `defaults` on empty input.
///
/// Fails with `SETUP_CANCELLED` when the operator declines the summary or
/// input ends early.
pub fn prompt_db_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: &DbConfig,
) -> Result<DbConfig> {
    writeln!(output, "pg-explorer Database Setup")?;
    writeln!(output, "==========================")?;
    writeln!(output, "Press Enter to keep the value in brackets.\n")?;

    let user = ask(input, output, "Database user", &defaults.user)?;
    let password = ask(input, output, "Password", &defaults.password)?;
    let name = ask(input, output, "Database name", &defaults.name)?;
    let host = ask(input, output, "Host", &defaults.host)?;
    let port = loop {
        let raw = ask(input, output, "Port", &defaults.port.to_string())?;
        match parse_port(&raw) {
            Ok(port) => break port,
            Err(e) => writeln!(output, "  {}", e)?,
        }
    };

    let config = DbConfig {
        user,
        password,
        name,
        host,
        port,
    };

    writeln!(output, "\nConnection: {}", config.connection_details())?;
    writeln!(
        output,
        "Password:   {}",
        if config.password.is_empty() { "(none)" } else { "(set)" }
    )?;
    let confirm = ask(input, output, "Save these settings? (y/n)", "y")?;
    if !confirm.eq_ignore_ascii_case("y") && !confirm.eq_ignore_ascii_case("yes") {
        info!(target: "config", "Setup declined");
        bail!(SETUP_CANCELLED);
    }

    Ok(config)
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &str,
) -> Result<String> {
    write!(output, "{} [{}]: ", label, default)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!(SETUP_CANCELLED);
    }
    let value = line.trim();
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<DbConfig>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_db_config(&mut input, &mut output, &DbConfig::default());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_empty_answers_keep_defaults() {
        let (result, _) = run("\n\n\n\n\n\n");
        assert_eq!(result.unwrap(), DbConfig::default());
    }

    #[test]
    fn test_answers_are_used() {
        let (result, output) = run("app\nsecret\nshop\ndb\n6000\ny\n");
        let config = result.unwrap();
        assert_eq!(config.connection_details(), "app@db:6000/shop");
        assert_eq!(config.password, "secret");
        assert!(!output.contains("secret"));
    }

    #[test]
    fn test_bad_port_is_asked_again() {
        let (result, output) = run("\n\n\n\nabc\n5433\ny\n");
        assert_eq!(result.unwrap().port, 5433);
        assert!(output.contains("DB_PORT must be a number"));
    }

    #[test]
    fn test_declining_cancels() {
        let (result, _) = run("\n\n\n\n\nn\n");
        let err = result.unwrap_err();
        assert!(is_cancelled(&err));
    }

    #[test]
    fn test_eof_cancels() {
        let (result, _) = run("app\n");
        assert!(is_cancelled(&result.unwrap_err()));
    }
}
