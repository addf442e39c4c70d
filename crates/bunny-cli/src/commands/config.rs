//! `bunny config`: inspect the effective configuration.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                println!("{}", display_value(&value));
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised = toml::to_string_pretty(config)
                    .map_err(|e| CliError::config("Failed to serialise config", e))?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            match AppConfig::resolve_path(global.config.as_deref(), &global.project_dir) {
                Some(path) => println!("{}", path.display()),
                None => {
                    output.info("No configuration file found; using built-in defaults")?;
                    output.print(&format!(
                        "Create one with 'bunny init' at {}",
                        AppConfig::project_path(&global.project_dir).display()
                    ))?;
                }
            }
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<serde_json::Value> {
    config
        .get(key)
        .ok_or_else(|| CliError::UnknownConfigKey { key: key.into() })
}

/// Strings print bare; everything else as compact JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
