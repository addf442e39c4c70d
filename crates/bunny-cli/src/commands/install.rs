//! `bunny install <type>`: publish, migrate, seed, configure.

use tracing::{info, instrument};

use bunny_core::application::StepOutcome;

use super::prompt;
use crate::{
    cli::{GlobalArgs, InstallArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(type_id = %args.type_id))]
pub fn execute(
    args: InstallArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::website_type_service(config, &global.project_dir)?;
    let descriptor = service.resolve(&args.type_id)?.clone();

    if !args.force {
        if service.is_installed(&descriptor.id)? {
            output.warning(&format!(
                "{} is already installed; its config file will be kept",
                descriptor.name
            ))?;
        }
        output.header(&format!("Install {}", descriptor.name))?;
        output.key_value("Type:", &descriptor.id)?;
        output.key_value("Project:", &global.project_dir.display().to_string())?;
        output.key_value("Features:", &descriptor.features.join(", "))?;
        output.print("")?;
        let question = format!("Install the {} website type?", descriptor.name);
        if !prompt::confirm(output, &question, true, "--force")? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner(format!("Installing {}", descriptor.name));
    let result = service.install(&descriptor.id, args.force, |step| {
        spinner.set_message(format!("{}...", step.label()));
    });
    spinner.finish_and_clear();
    let report = result?;
    info!(type_id = %report.type_id, steps = report.steps.len(), "Installed");

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    print_steps(&report.steps, output)?;
    output.success(&format!("{} website type installed", descriptor.name))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!(
        "  Review config/bunny/{}.toml and adjust features or settings",
        descriptor.id
    ))?;
    output.print(&format!(
        "  Dependencies: {}",
        descriptor.dependencies.join(", ")
    ))?;
    Ok(())
}

/// One line per step; skipped steps are informational.
pub fn print_steps(steps: &[StepOutcome], output: &OutputManager) -> CliResult<()> {
    for outcome in steps {
        let line = format!("{}: {}", outcome.step.label(), outcome.detail);
        if outcome.skipped {
            output.info(&line)?;
        } else {
            output.success(&line)?;
        }
    }
    Ok(())
}
