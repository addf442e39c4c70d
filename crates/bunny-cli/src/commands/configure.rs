//! `bunny configure <type>`: toggle the `[settings]` of an installed type.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use super::prompt;
use crate::{
    cli::{ConfigureArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(type_id = %args.type_id))]
pub fn execute(
    args: ConfigureArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::website_type_service(config, &global.project_dir)?;

    let updates: BTreeMap<String, bool> = if args.set.is_empty() {
        if !output.is_interactive() {
            return Err(CliError::MissingArgument {
                what: "settings",
                flag: "--set",
            });
        }
        let current = service.settings(&args.type_id)?;
        let mut answers = BTreeMap::new();
        for (key, enabled) in current.settings {
            let question = format!("Enable {}?", key.trim_start_matches("enable_"));
            let answer = prompt::confirm(output, &question, enabled, "--set")?;
            answers.insert(key, answer);
        }
        answers
    } else {
        args.set.into_iter().collect()
    };
    debug!(count = updates.len(), "Applying settings");

    let report = service.configure(&args.type_id, &updates)?;
    info!(type_id = %report.type_id, "Configured");

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.header(&format!("Settings ({})", report.path))?;
    for (key, enabled) in &report.settings {
        output.key_value(key, if *enabled { "on" } else { "off" })?;
    }
    output.success(&format!("{} settings saved", report.type_id))?;
    Ok(())
}
