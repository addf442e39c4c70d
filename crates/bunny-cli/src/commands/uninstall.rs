//! `bunny uninstall <type>`: roll back migrations and delete published assets.
//! With `--all`, every type goes at once along with the package directories.

use bunny_core::application::WebsiteTypeService;
use tracing::{info, instrument};

use super::{install::print_steps, prompt};
use crate::{
    cli::{GlobalArgs, UninstallArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(type_id = ?args.type_id, all = args.all))]
pub fn execute(
    args: UninstallArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = super::website_type_service(config, &global.project_dir)?;
    let Some(type_id) = args.type_id.as_deref() else {
        return uninstall_all(&service, args.force, output);
    };
    let name = service.registry().display_name(type_id);

    if !args.force {
        output.warning(&format!(
            "This rolls back the {name} migrations and deletes its views, config and translations"
        ))?;
        output.warning("Seed files under storage/bunny/seeds are kept")?;
        let question = format!("Uninstall the {name} website type?");
        if !prompt::confirm(output, &question, false, "--force")? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner(format!("Uninstalling {name}"));
    let result = service.uninstall(type_id, |step| {
        spinner.set_message(format!("{}...", step.label()));
    });
    spinner.finish_and_clear();
    let report = result?;
    info!(type_id = %report.type_id, "Uninstalled");

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    print_steps(&report.steps, output)?;
    output.success(&format!("{name} website type uninstalled"))?;
    Ok(())
}

/// `--all`: every type's migrations, then the package directories.
fn uninstall_all(
    service: &WebsiteTypeService,
    force: bool,
    output: &OutputManager,
) -> CliResult<()> {
    if !force {
        output.warning(
            "This rolls back every website type's migrations and deletes config/bunny \
             and all vendor/bunny directories",
        )?;
        output.warning("Seed files under storage/bunny/seeds are kept")?;
        if !prompt::confirm(output, "Uninstall every website type?", false, "--force")? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner("Uninstalling every website type");
    let result = service.uninstall_all(|step| {
        spinner.set_message(format!("{}...", step.label()));
    });
    spinner.finish_and_clear();
    let report = result?;
    info!("Uninstalled every type");

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    print_steps(&report.steps, output)?;
    output.success("Every website type uninstalled")?;
    Ok(())
}
