//! `bunny make-type <name>`: generate the files of a new website type.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::instrument;

use bunny_adapters::LocalFilesystem;
use bunny_core::application::{ApplicationError, GeneratorService, Overwrite, PlanWriter};
use bunny_core::domain::{DomainError, WebsiteTypeDescriptor};

use crate::{
    cli::{GlobalArgs, MakeTypeArgs},
    config::{AppConfig, CustomTypeConfig},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: MakeTypeArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let generator = GeneratorService::new(super::stub_store(config, &global.project_dir)?);
    let (descriptor, plan) = generator.make_type_plan(&args.name)?;

    let registry = super::registry(config)?;
    if registry
        .get_any(&descriptor.id)
        .is_some_and(|existing| existing.builtin)
    {
        return Err(CliError::Core(
            DomainError::DuplicateCustomType { id: descriptor.id }.into(),
        ));
    }

    let writer = PlanWriter::new(Arc::new(LocalFilesystem::new()), &global.project_dir);
    let conflicts = writer.conflicts(&plan);
    if let Some(first) = conflicts.first().filter(|_| !args.force) {
        return Err(CliError::Core(
            ApplicationError::FileExists {
                path: first.under(writer.root()),
            }
            .into(),
        ));
    }

    let report = writer.apply(&plan, Overwrite::from_force(args.force))?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    for path in report.files() {
        output.success(&format!("Created {path}"))?;
    }
    output.success(&format!(
        "Website type '{}' generated ({} files)",
        descriptor.id,
        report.file_count()
    ))?;

    output.print("")?;
    output.print("Next steps:")?;
    if !registry.has_type(&descriptor.id) {
        output.print("  Register the type in bunny.toml:")?;
        output.print("")?;
        for line in custom_type_snippet(&descriptor)?.lines() {
            output.print(&format!("    {line}"))?;
        }
        output.print("")?;
    }
    output.print(&format!("  bunny install {}", descriptor.id))?;
    Ok(())
}

/// `[custom_types.<id>]` table for the new type.
fn custom_type_snippet(descriptor: &WebsiteTypeDescriptor) -> CliResult<String> {
    let entry = BTreeMap::from([(descriptor.id.clone(), CustomTypeConfig::from(descriptor))]);
    let doc = BTreeMap::from([("custom_types", entry)]);
    toml::to_string_pretty(&doc).map_err(|e| CliError::config("Failed to render type entry", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_a_loadable_custom_types_table() {
        let descriptor = WebsiteTypeDescriptor::custom("law-firm");
        let snippet = custom_type_snippet(&descriptor).unwrap();
        assert!(snippet.contains("[custom_types.law-firm]"));

        let config: AppConfig = toml::from_str(&snippet).unwrap();
        let registry = config.registry().unwrap();
        assert_eq!(registry.get("law-firm"), Some(&descriptor));
    }
}
