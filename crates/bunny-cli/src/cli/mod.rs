//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "bunny",
    bin_name = "bunny",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f407} Website scaffolding from template stubs",
    long_about = "Bunny generates models, controllers, migrations, views, API \
                  and frontend files from stubs, and installs website types \
                  (portfolio, ecommerce, restaurant, ...) into a project.",
    after_help = "EXAMPLES:\n\
        \x20 bunny generate --site ecommerce --model Product --fields \"name:string,price:decimal\"\n\
        \x20 bunny install restaurant\n\
        \x20 bunny types --detailed\n\
        \x20 bunny completions bash > /usr/share/bash-completion/completions/bunny",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate model, controller, migration and view files.
    #[command(
        visible_alias = "g",
        about = "Generate files from stubs",
        after_help = "EXAMPLES:\n\
            \x20 bunny generate --site blog --model Post --fields \"title:string,body:text:nullable\"\n\
            \x20 bunny generate --model Product --backend --api rest --frontend vue\n\
            \x20 bunny generate --model Page --cms --dry-run"
    )]
    Generate(GenerateArgs),

    /// List website types.
    #[command(
        visible_alias = "ls",
        about = "List available website types",
        after_help = "EXAMPLES:\n\
            \x20 bunny types\n\
            \x20 bunny types --detailed\n\
            \x20 bunny types --format json"
    )]
    Types(TypesArgs),

    /// Install a website type into the project.
    #[command(
        about = "Install a website type",
        after_help = "EXAMPLES:\n\
            \x20 bunny install restaurant\n\
            \x20 bunny install real-estate --force"
    )]
    Install(InstallArgs),

    /// Remove a website type's migrations and assets.
    #[command(
        about = "Uninstall a website type",
        after_help = "EXAMPLES:\n\
            \x20 bunny uninstall restaurant\n\
            \x20 bunny uninstall fitness --force\n\
            \x20 bunny uninstall --all --force"
    )]
    Uninstall(UninstallArgs),

    /// Toggle the `[settings]` of an installed website type.
    #[command(
        about = "Change an installed type's settings",
        after_help = "EXAMPLES:\n\
            \x20 bunny configure restaurant\n\
            \x20 bunny configure portfolio --set enable_cache=false --set enable_seo=true"
    )]
    Configure(ConfigureArgs),

    /// Generate the files for a new custom website type.
    #[command(
        name = "make-type",
        about = "Create a new website type",
        after_help = "EXAMPLES:\n\
            \x20 bunny make-type \"Law Firm\"\n\
            \x20 bunny make-type travel --force"
    )]
    MakeType(MakeTypeArgs),

    /// List available stubs.
    #[command(
        about = "List available stubs",
        after_help = "EXAMPLES:\n\
            \x20 bunny stubs\n\
            \x20 bunny stubs --markers"
    )]
    Stubs(StubsArgs),

    /// Write a default `bunny.toml`.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 bunny init\n\
            \x20 bunny -C ./my-site init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 bunny completions bash > ~/.local/share/bash-completion/completions/bunny\n\
            \x20 bunny completions zsh  > ~/.zfunc/_bunny\n\
            \x20 bunny completions fish > ~/.config/fish/completions/bunny.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Bunny configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 bunny config get default_type\n\
            \x20 bunny config get cache.ttl\n\
            \x20 bunny config list"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Website type the files belong to. Falls back to `default_type`.
    #[arg(short = 's', long = "site", value_name = "TYPE", help = "Website type")]
    pub site: Option<String>,

    #[arg(short = 'm', long = "model", value_name = "NAME", help = "Model name")]
    pub model: Option<String>,

    /// Comma-separated `name:type[:constraint]*` entries.
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "SPEC",
        help = "Fields, e.g. \"title:string,price:decimal:nullable\""
    )]
    pub fields: Option<String>,

    #[arg(long = "api", value_enum, value_name = "STYLE", help = "Also generate API files")]
    pub api: Option<ApiArg>,

    #[arg(
        long = "frontend",
        value_enum,
        value_name = "FRAMEWORK",
        help = "Also generate a frontend component"
    )]
    pub frontend: Option<FrontendArg>,

    #[arg(long = "ui", value_enum, value_name = "LIBRARY", help = "UI library for components")]
    pub ui: Option<UiArg>,

    /// Generate the full backend set (casts, routes, four views) instead
    /// of the basic model/controller/migration/view files.
    #[arg(long = "backend", help = "Generate the full backend set")]
    pub backend: bool,

    #[arg(long = "cms", help = "Also generate the CMS pages scaffold")]
    pub cms: bool,

    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    #[arg(short = 'y', long = "yes", help = "Skip confirmation and prompts")]
    pub yes: bool,
}

// ── types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Include features and dependencies.
    #[arg(short = 'd', long = "detailed", help = "Show features and dependencies")]
    pub detailed: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: TypesFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypesFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── install / uninstall / make-type ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InstallArgs {
    #[arg(value_name = "TYPE", help = "Website type id")]
    pub type_id: String,

    /// Skip confirmation and overwrite an existing per-type config.
    #[arg(long = "force", help = "Skip confirmation and overwrite existing config")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct UninstallArgs {
    #[arg(
        value_name = "TYPE",
        required_unless_present = "all",
        conflicts_with = "all",
        help = "Website type id"
    )]
    pub type_id: Option<String>,

    /// Remove every type's assets and the whole `config/bunny` directory.
    #[arg(long = "all", help = "Uninstall every website type")]
    pub all: bool,

    #[arg(long = "force", help = "Skip confirmation")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    #[arg(value_name = "TYPE", help = "Installed website type id")]
    pub type_id: String,

    /// Prompts for every setting when omitted.
    #[arg(
        long = "set",
        value_name = "KEY=BOOL",
        value_parser = parse_setting,
        help = "Set one setting, e.g. enable_cache=false (repeatable)"
    )]
    pub set: Vec<(String, bool)>,
}

fn parse_setting(raw: &str) -> Result<(String, bool), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=BOOL, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing setting name in '{raw}'"));
    }
    let value = match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => true,
        "false" | "no" | "off" | "0" => false,
        other => return Err(format!("'{other}' is not a boolean")),
    };
    Ok((key.to_owned(), value))
}

#[derive(Debug, Args)]
pub struct MakeTypeArgs {
    /// Display name or id; kebab-cased into the type id.
    #[arg(value_name = "NAME", help = "Name of the new website type")]
    pub name: String,

    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── stubs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StubsArgs {
    #[arg(long = "markers", help = "Show the markers each stub expects")]
    pub markers: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `cache.ttl`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiArg {
    #[value(alias = "restful")]
    Rest,
    #[value(alias = "gql")]
    Graphql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrontendArg {
    Vue,
    React,
    Alpine,
    /// No component.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UiArg {
    #[value(alias = "tailwindcss")]
    Tailwind,
    Bootstrap,
    None,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "bunny",
            "generate",
            "--site",
            "ecommerce",
            "--model",
            "Product",
            "--fields",
            "name:string",
            "--api",
            "rest",
            "--frontend",
            "vue",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.site.as_deref(), Some("ecommerce"));
        assert_eq!(args.api, Some(ApiArg::Rest));
        assert_eq!(args.frontend, Some(FrontendArg::Vue));
        assert!(!args.backend);
    }

    #[test]
    fn api_alias_gql() {
        let cli = Cli::parse_from(["bunny", "g", "--model", "Post", "--api", "gql"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.api, Some(ApiArg::Graphql));
    }

    #[test]
    fn make_type_takes_a_name() {
        let cli = Cli::parse_from(["bunny", "make-type", "Law Firm", "--force"]);
        let Commands::MakeType(args) = cli.command else {
            panic!("expected MakeType command");
        };
        assert_eq!(args.name, "Law Firm");
        assert!(args.force);
    }

    #[test]
    fn install_requires_a_type() {
        assert!(Cli::try_parse_from(["bunny", "install"]).is_err());
    }

    #[test]
    fn uninstall_takes_a_type_or_all() {
        let cli = Cli::parse_from(["bunny", "uninstall", "--all", "--force"]);
        let Commands::Uninstall(args) = cli.command else {
            panic!("expected Uninstall command");
        };
        assert!(args.all);
        assert_eq!(args.type_id, None);

        assert!(Cli::try_parse_from(["bunny", "uninstall"]).is_err());
        assert!(Cli::try_parse_from(["bunny", "uninstall", "blog", "--all"]).is_err());
    }

    #[test]
    fn configure_collects_settings() {
        let cli = Cli::parse_from([
            "bunny",
            "configure",
            "blog",
            "--set",
            "enable_cache=false",
            "--set",
            "enable_seo = on",
        ]);
        let Commands::Configure(args) = cli.command else {
            panic!("expected Configure command");
        };
        assert_eq!(args.type_id, "blog");
        assert_eq!(
            args.set,
            vec![
                ("enable_cache".to_owned(), false),
                ("enable_seo".to_owned(), true)
            ]
        );
    }

    #[test]
    fn configure_rejects_malformed_settings() {
        for bad in ["enable_cache", "=true", "enable_cache=maybe"] {
            let result = Cli::try_parse_from(["bunny", "configure", "blog", "--set", bad]);
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn project_dir_is_global() {
        let cli = Cli::parse_from(["bunny", "types", "-C", "/tmp/site"]);
        assert_eq!(cli.global.project_dir, std::path::PathBuf::from("/tmp/site"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["bunny", "--quiet", "--verbose", "types"]);
        assert!(result.is_err());
    }
}
