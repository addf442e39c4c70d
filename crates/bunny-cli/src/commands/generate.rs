//! `bunny generate`: render stubs for one model and write them.
//!
//! Responsibility: gather the model, fields and options (flags, config,
//! prompts), ask the core for a plan, then preview or apply it.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use bunny_adapters::LocalFilesystem;
use bunny_core::application::{
    ApplicationError, GeneratorService, ModelRequest, Overwrite, PlanWriter, ScaffoldOptions,
};
use bunny_core::domain::{
    ApiStyle, FieldDefinition, FrontendFramework, GeneratedFile, GenerationPlan, RelativePath,
    UiLibrary, WriteMode, parse_fields, parse_fields_strict,
};

use super::prompt;
use crate::{
    cli::{ApiArg, FrontendArg, GenerateArgs, GlobalArgs, UiArg},
    config::{AppConfig, FrontendConfig},
    error::{CliError, CliResult},
    output::OutputManager,
};

const FIELDS_HINT: &str = "Fields (e.g. title:string, email:string:unique)";

/// Dispatch sequence:
/// 1. Resolve site, model and fields (prompting when allowed)
/// 2. Resolve API/frontend/UI options from flags, then `[frontend]`
/// 3. Build the plan; drop site templates that already exist
/// 4. `--dry-run`: print the plan and stop
/// 5. Refuse conflicts without `--force`, confirm, write
#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let can_prompt = output.is_interactive() && !args.yes;

    // 1. Inputs
    let site = args
        .site
        .clone()
        .unwrap_or_else(|| config.default_type.clone());
    let model = match &args.model {
        Some(model) => model.clone(),
        None if can_prompt => prompt::input("Model name", Some(&default_model(&site)), false)?,
        None => {
            return Err(CliError::MissingArgument {
                what: "model name",
                flag: "--model",
            });
        }
    };
    let fields = match &args.fields {
        Some(spec) => parse_fields_strict(spec).map_err(|e| CliError::Core(e.into()))?,
        None if can_prompt => prompt_fields(output)?,
        None => Vec::new(),
    };

    // 2. Options
    let options = scaffold_options(&args, &config.frontend)?;
    let request = ModelRequest::new(&site, &model, fields)?;

    // 3. Plan
    let generator = GeneratorService::new(super::stub_store(config, &global.project_dir)?);
    let mut plan = generator.scaffold_plan(&request, &options)?;
    let writer = PlanWriter::new(Arc::new(LocalFilesystem::new()), &global.project_dir);
    if !args.force {
        keep_existing_site_templates(&mut plan, &writer);
    }

    // 4. Dry run
    if args.dry_run {
        return show_plan(&plan, &writer, output);
    }

    // 5. Write
    let conflicts = writer.conflicts(&plan);
    if let Some(first) = conflicts.first().filter(|_| !args.force) {
        for path in &conflicts {
            warn!(path = %path, "Target exists");
        }
        return Err(CliError::Core(
            ApplicationError::FileExists {
                path: first.under(writer.root()),
            }
            .into(),
        ));
    }

    if can_prompt {
        show_summary(&request, &options, &plan, output)?;
        let question = format!("Write {} files?", plan.file_count());
        if !prompt::confirm(output, &question, true, "--yes")? {
            return Err(CliError::Cancelled);
        }
    }

    info!(site = %site, model = %request.model(), files = plan.file_count(), "Generating");
    let report = writer.apply(&plan, Overwrite::from_force(args.force))?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    for path in &report.created {
        output.success(&format!("Created {path}"))?;
    }
    for path in &report.overwritten {
        output.warning(&format!("Overwrote {path}"))?;
    }
    for path in &report.appended {
        output.info(&format!("Appended to {path}"))?;
    }
    output.success(&format!(
        "{} scaffolding for '{site}' generated ({} files)",
        request.model(),
        report.file_count()
    ))?;

    if !plan.notes().is_empty() {
        output.print("")?;
        output.print("Next steps:")?;
        for note in plan.notes() {
            output.print(&format!("  {note}"))?;
        }
    }
    Ok(())
}

/// `ecommerce` → `Ecommerce`, as the interactive default.
fn default_model(site: &str) -> String {
    bunny_core::domain::naming::studly(site)
}

/// Lenient parse of prompted input: bad entries are reported and skipped.
fn prompt_fields(output: &OutputManager) -> CliResult<Vec<FieldDefinition>> {
    let raw = prompt::input(FIELDS_HINT, None, true)?;
    let parsed = parse_fields(&raw);
    for rejected in &parsed.rejected {
        output.warning(&format!("Skipped {rejected}"))?;
    }
    Ok(parsed.fields)
}

fn scaffold_options(args: &GenerateArgs, frontend: &FrontendConfig) -> CliResult<ScaffoldOptions> {
    let invalid = |e| CliError::config("Invalid [frontend] settings", e);

    let api = match args.api {
        Some(api) => Some(convert_api(api)),
        None if frontend.components => frontend.api_style().map_err(invalid)?,
        None => None,
    };
    let framework = match args.frontend {
        Some(fw) => convert_frontend(fw),
        None if frontend.components => frontend.framework().map_err(invalid)?,
        None => None,
    };
    let ui = match args.ui {
        Some(ui) => convert_ui(ui),
        None => frontend.ui_library().map_err(invalid)?,
    };

    Ok(ScaffoldOptions {
        backend: args.backend,
        api,
        frontend: framework,
        ui,
        cms: args.cms,
    })
}

/// Site templates are shared by every model of a site: an existing copy is
/// left alone instead of counting as a conflict.
fn keep_existing_site_templates(plan: &mut GenerationPlan, writer: &PlanWriter) {
    let existing = writer.conflicts(plan);
    plan.retain_files(|file| !(is_site_template(file) && existing.contains(&file.path)));
}

fn is_site_template(file: &GeneratedFile) -> bool {
    file.stub
        .as_ref()
        .is_some_and(|stub| stub.as_str().starts_with("sites/"))
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_api(api: ApiArg) -> ApiStyle {
    match api {
        ApiArg::Rest => ApiStyle::Rest,
        ApiArg::Graphql => ApiStyle::Graphql,
    }
}

fn convert_frontend(fw: FrontendArg) -> Option<FrontendFramework> {
    match fw {
        FrontendArg::Vue => Some(FrontendFramework::Vue),
        FrontendArg::React => Some(FrontendFramework::React),
        FrontendArg::Alpine => Some(FrontendFramework::Alpine),
        FrontendArg::None => None,
    }
}

fn convert_ui(ui: UiArg) -> UiLibrary {
    match ui {
        UiArg::Tailwind => UiLibrary::Tailwind,
        UiArg::Bootstrap => UiLibrary::Bootstrap,
        UiArg::None => UiLibrary::None,
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PlannedFile<'a> {
    path: &'a RelativePath,
    mode: WriteMode,
    exists: bool,
    bytes: usize,
    unresolved: &'a [String],
}

#[derive(Serialize)]
struct DryRun<'a> {
    files: Vec<PlannedFile<'a>>,
    notes: &'a [String],
}

fn show_plan(plan: &GenerationPlan, writer: &PlanWriter, output: &OutputManager) -> CliResult<()> {
    let conflicts = writer.conflicts(plan);
    let files: Vec<PlannedFile<'_>> = plan
        .files()
        .iter()
        .map(|f| PlannedFile {
            path: &f.path,
            mode: f.mode,
            exists: conflicts.contains(&f.path),
            bytes: f.size(),
            unresolved: &f.unresolved,
        })
        .collect();

    if output.is_json() {
        output.json(&DryRun {
            files,
            notes: plan.notes(),
        })?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would write {} files under {}",
        files.len(),
        writer.root().display()
    ))?;
    for file in &files {
        let action = match (file.mode, file.exists) {
            (WriteMode::Append, _) => "append",
            (WriteMode::Create, true) => "overwrite",
            (WriteMode::Create, false) => "create",
        };
        output.print(&format!("  {action:<9} {}", file.path))?;
        if !file.unresolved.is_empty() {
            output.warning(&format!(
                "    unresolved markers: {}",
                file.unresolved.join(", ")
            ))?;
        }
    }
    for note in plan.notes() {
        output.print(&format!("  note      {note}"))?;
    }
    Ok(())
}

fn show_summary(
    request: &ModelRequest,
    options: &ScaffoldOptions,
    plan: &GenerationPlan,
    out: &OutputManager,
) -> CliResult<()> {
    let or_none = |v: Option<String>| v.unwrap_or_else(|| "none".into());
    out.header("Generate")?;
    out.key_value("Site:", request.site())?;
    out.key_value("Model:", request.model())?;
    out.key_value("Table:", &request.table_name())?;
    out.key_value("Fields:", &request.fields().len().to_string())?;
    out.key_value("Backend:", if options.backend { "full" } else { "basic" })?;
    out.key_value("API:", &or_none(options.api.map(|a| a.to_string())))?;
    out.key_value("Frontend:", &or_none(options.frontend.map(|f| f.to_string())))?;
    out.key_value("Files:", &plan.file_count().to_string())?;
    out.print("")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn args(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["bunny", "generate", "--model", "Post"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_win_over_config() {
        let frontend = FrontendConfig {
            components: true,
            ..FrontendConfig::default()
        };
        let opts = scaffold_options(&args(&["--api", "graphql", "--frontend", "react"]), &frontend)
            .unwrap();
        assert_eq!(opts.api, Some(ApiStyle::Graphql));
        assert_eq!(opts.frontend, Some(FrontendFramework::React));
    }

    #[test]
    fn config_components_apply_without_flags() {
        let frontend = FrontendConfig {
            components: true,
            ..FrontendConfig::default()
        };
        let opts = scaffold_options(&args(&[]), &frontend).unwrap();
        assert_eq!(opts.api, Some(ApiStyle::Rest));
        assert_eq!(opts.frontend, Some(FrontendFramework::Vue));
        assert_eq!(opts.ui, UiLibrary::Tailwind);
    }

    #[test]
    fn components_off_means_model_files_only() {
        let opts = scaffold_options(&args(&["--cms"]), &FrontendConfig::default()).unwrap();
        assert_eq!(opts.api, None);
        assert_eq!(opts.frontend, None);
        assert!(opts.cms);
        assert!(!opts.backend);
    }

    #[test]
    fn frontend_none_flag_overrides_config() {
        let frontend = FrontendConfig {
            components: true,
            ..FrontendConfig::default()
        };
        let opts = scaffold_options(&args(&["--frontend", "none"]), &frontend).unwrap();
        assert_eq!(opts.frontend, None);
    }

    #[test]
    fn bad_config_value_is_a_config_error() {
        let frontend = FrontendConfig {
            components: true,
            framework: "svelte".into(),
            ..FrontendConfig::default()
        };
        let err = scaffold_options(&args(&[]), &frontend).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn site_templates_are_recognised_by_stub() {
        let file =
            GeneratedFile::create(RelativePath::new("resources/views/blog/layout.blade.php"), "")
                .from_stub(bunny_core::domain::StubName::new("sites/default/layout.blade"), vec![]);
        assert!(is_site_template(&file));
        let model = GeneratedFile::create(RelativePath::new("app/Models/Post.php"), "");
        assert!(!is_site_template(&model));
    }

    #[test]
    fn default_model_is_studly_site() {
        assert_eq!(default_model("real-estate"), "RealEstate");
    }
}
