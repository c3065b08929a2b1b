//! Config subcommand handlers.

use dialoguer::{Input, Select};

use deskbook_config::{
    self as config, Booking, COLOR_MODES, Config, Defaults, LOG_LEVELS, Logging, OUTPUT_FORMATS,
};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

fn select(prompt: &str, items: &[&str], current: &str) -> Result<String, CliError> {
    let default = items.iter().position(|i| *i == current).unwrap_or(0);
    let idx = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(prompt_err)?;
    Ok(items.get(idx).copied().unwrap_or(current).to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, current: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("deskbook configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            if config_path.exists()
                && !util::confirm("A config file already exists. Overwrite it?", global.yes)?
            {
                return Ok(());
            }

            // 1. Output defaults
            let output = select("Default output format", OUTPUT_FORMATS, &current.defaults.output)?;
            let color = select("Color output", COLOR_MODES, &current.defaults.color)?;

            // 2. Booking defaults
            let user: String = Input::new()
                .with_prompt("Your user ID (leave empty to pass --user each time)")
                .default(current.booking.user_id.map(|id| id.to_string()).unwrap_or_default())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;
            let user_id = match user.trim() {
                "" => None,
                id => Some(id.parse::<i64>().map_err(|_| CliError::Validation {
                    field: "booking.user_id".into(),
                    reason: format!("'{id}' is not a number"),
                })?),
            };
            let notes: String = Input::new()
                .with_prompt("Default reservation notes")
                .default(current.booking.notes.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Logging
            let level = select("Log level", LOG_LEVELS, &current.logging.level)?;

            let cfg = Config {
                defaults: Defaults { output, color },
                logging: Logging {
                    level,
                    file: current.logging.file.clone(),
                },
                booking: Booking { user_id, notes },
            };
            cfg.validate()?;
            let path = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("\n  Test it: deskbook areas");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let out = output::render_single(
                global.output_format(),
                current,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}")),
                |_| config::config_path().display().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
