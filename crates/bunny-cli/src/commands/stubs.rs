//! `bunny stubs`: list the stubs generators can use.

use serde::Serialize;

use crate::{
    cli::{GlobalArgs, StubsArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Serialize)]
struct StubRow {
    name: String,
    markers: Vec<String>,
}

pub fn execute(
    args: StubsArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let store = super::stub_store(config, &global.project_dir)?;

    let mut rows = Vec::new();
    for name in store.list()? {
        let markers = if args.markers || output.is_json() {
            store.get(&name)?.markers()
        } else {
            Vec::new()
        };
        rows.push(StubRow {
            name: name.as_str().to_owned(),
            markers,
        });
    }

    if output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    output.header(&format!("Available Stubs ({}):", rows.len()))?;
    if let Some(dir) = config.stubs_dir(&global.project_dir) {
        output.info(&format!("Overrides from {}", dir.display()))?;
    }
    for row in &rows {
        if args.markers {
            output.print(&format!("  {:<32} {}", row.name, row.markers.join(", ")))?;
        } else {
            output.print(&format!("  {}", row.name))?;
        }
    }
    Ok(())
}
