//! Pictograph preferences CLI
//!
//! Inspects and edits the preferences file used by Pictograph.

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use {
    clap::{ArgAction, Parser, Subcommand},
    serde_json::to_string_pretty,
    tracing_subscriber::EnvFilter,
};

use pictograph::{
    DataController, JsonFileStore, UserPreferences,
    error::{ErrorReporter, Result, ResultExt},
    shared_instance,
};

/// Shown in place of a masked encryption key.
const MASKED_KEY: &str = "********";

#[derive(Parser, Debug)]
#[command(name = "pictograph", version, about = "Inspect and edit Pictograph preferences")]
struct Cli {
    /// Preferences file to use instead of the default location.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every preference.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Mark whether the next launch is the first one.
    SetFirstLaunch {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
    /// Turn encryption on or off.
    SetEncryption {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Store the encryption key.
    SetKey { key: String },
    /// Remove the stored encryption key.
    ClearKey,
    /// Show or mask the encryption key.
    SetShowPassword {
        #[arg(action = ArgAction::Set)]
        show: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            ErrorReporter::error(&error, "pictograph cli");
            eprintln!("error: {}", ErrorReporter::to_user_message(&error));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let controller = match cli.file {
        Some(path) => Arc::new(DataController::new(Arc::new(JsonFileStore::new(path)))),
        None => shared_instance(),
    };

    match cli.command {
        Command::Show { json } => {
            let preferences = controller
                .preferences()
                .add_context("Reading preferences")?;
            let shown = masked(preferences);
            if json {
                println!("{}", to_string_pretty(&shown)?);
            } else {
                print_preferences(&shown);
            }
        }
        Command::SetFirstLaunch { value } => controller
            .set_first_time_opening_app(value)
            .add_context("Saving first launch flag")?,
        Command::SetEncryption { enabled } => {
            controller
                .set_encryption_enabled(enabled)
                .add_context("Saving encryption flag")?;
            if enabled && controller.get_encryption_key()?.is_none() {
                eprintln!("warning: encryption is enabled but no key is set");
            }
        }
        Command::SetKey { key } => controller
            .set_encryption_key(&key)
            .add_context("Saving encryption key")?,
        Command::ClearKey => controller
            .clear_encryption_key()
            .add_context("Clearing encryption key")?,
        Command::SetShowPassword { show } => controller
            .set_show_password_on_screen(show)
            .add_contextf(format!("Saving password visibility ({show})"))?,
    }

    Ok(())
}

/// Hides the encryption key unless the user asked to see it.
fn masked(mut preferences: UserPreferences) -> UserPreferences {
    if !preferences.show_password_on_screen && preferences.encryption_key.is_some() {
        preferences.encryption_key = Some(MASKED_KEY.to_string());
    }
    preferences
}

fn print_preferences(preferences: &UserPreferences) {
    println!("first launch:     {}", preferences.first_time_opening_app);
    println!("encryption:       {}", preferences.encryption_enabled);
    println!(
        "encryption key:   {}",
        preferences.encryption_key.as_deref().unwrap_or("<unset>")
    );
    println!("show password:    {}", preferences.show_password_on_screen);
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use pictograph::UserPreferences;

    use crate::{Cli, Command, MASKED_KEY, masked};

    #[test]
    fn test_key_is_masked_unless_shown() {
        let preferences = UserPreferences {
            encryption_key: Some("abc123".to_string()),
            ..UserPreferences::default()
        };
        assert_eq!(masked(preferences.clone()).encryption_key.as_deref(), Some(MASKED_KEY));

        let visible = UserPreferences {
            show_password_on_screen: true,
            ..preferences
        };
        assert_eq!(masked(visible).encryption_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parses_boolean_values() {
        let cli = Cli::try_parse_from(["pictograph", "set-encryption", "true"]).unwrap();
        assert!(matches!(cli.command, Command::SetEncryption { enabled: true }));

        let cli =
            Cli::try_parse_from(["pictograph", "--file", "/tmp/p.json", "set-first-launch", "false"])
                .unwrap();
        assert!(matches!(cli.command, Command::SetFirstLaunch { value: false }));
        assert!(cli.file.is_some());
    }

    #[test]
    fn test_rejects_non_boolean() {
        assert!(Cli::try_parse_from(["pictograph", "set-encryption", "maybe"]).is_err());
    }
}
