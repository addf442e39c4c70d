//! `bunny types`: list the website types in the registry.

use serde::Serialize;

use bunny_core::domain::WebsiteTypeDescriptor;

use crate::{
    cli::{TypesArgs, TypesFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Serialize)]
struct TypeRow<'a> {
    #[serde(flatten)]
    descriptor: &'a WebsiteTypeDescriptor,
    enabled: bool,
    default: bool,
}

pub fn execute(args: TypesArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let registry = super::registry(config)?;
    let default_type = config.default_type.as_str();
    let rows: Vec<TypeRow<'_>> = registry
        .list_all()
        .iter()
        .map(|descriptor| TypeRow {
            enabled: registry.is_enabled(&descriptor.id),
            default: descriptor.id == default_type,
            descriptor,
        })
        .collect();

    let format = if output.is_json() {
        TypesFormat::Json
    } else {
        args.format
    };

    match format {
        TypesFormat::Json => output.json(&rows)?,
        TypesFormat::List => {
            for row in rows.iter().filter(|r| r.enabled) {
                println!("{}", row.descriptor.id);
            }
        }
        TypesFormat::Table => {
            output.header("Available Website Types:")?;
            for row in &rows {
                print_row(row, args.detailed, output)?;
            }
        }
    }
    Ok(())
}

fn print_row(row: &TypeRow<'_>, detailed: bool, output: &OutputManager) -> CliResult<()> {
    let d = row.descriptor;
    let mut tags = Vec::new();
    if row.default {
        tags.push("default");
    }
    if !d.builtin {
        tags.push("custom");
    }
    if !row.enabled {
        tags.push("disabled");
    }
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    };

    output.print(&format!("  {:<14} {}{tags}", d.id, d.name))?;
    if detailed {
        output.print(&format!("      {}", d.description))?;
        output.print(&format!("      icon: {}  color: {}", d.icon, d.color))?;
        output.print(&format!("      features: {}", d.features.join(", ")))?;
        output.print(&format!("      dependencies: {}", d.dependencies.join(", ")))?;
        output.print("")?;
    }
    Ok(())
}
