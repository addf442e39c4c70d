//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees what is derived from it
//! (the type registry, generator options).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `BUNNY_<SECTION>__<KEY>`, e.g. `BUNNY_CACHE__TTL`
//! 3. Config file: `--config`, else `<project>/bunny.toml`, else the
//!    platform config dir
//! 4. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bunny_core::domain::{
    ApiStyle, DomainError, FrontendFramework, UiLibrary, WebsiteTypeDescriptor,
    WebsiteTypeRegistry,
};
use bunny_core::error::BunnyResult;

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "bunny.toml";

const ENV_PREFIX: &str = "BUNNY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Website type used when `--site` is not given.
    pub default_type: String,
    /// Enabled map; a type set to `false` is hidden and cannot be installed.
    pub types: BTreeMap<String, bool>,
    pub media: MediaConfig,
    pub cache: CacheConfig,
    pub analytics: AnalyticsConfig,
    pub seo: SeoConfig,
    pub api: ApiConfig,
    pub theme: ThemeConfig,
    pub frontend: FrontendConfig,
    pub stubs: StubsConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    /// Extra website types, keyed by id.
    pub custom_types: BTreeMap<String, CustomTypeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub disk: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Seconds.
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    pub tracking_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    pub meta_description: String,
    pub meta_keywords: String,
    pub generate_sitemap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub prefix: String,
    pub middleware: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub default: String,
    pub custom_css: bool,
    pub custom_js: bool,
}

/// Frontend defaults for `generate`.
///
/// When `components` is on, `framework` and `api_type` apply to every
/// `generate` run that does not pass `--frontend` / `--api`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// `vue`, `react`, `alpine` or `none`.
    pub framework: String,
    /// `rest`, `graphql` or `none`.
    pub api_type: String,
    /// `tailwind`, `bootstrap` or `none`.
    pub ui_library: String,
    pub components: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
    /// Directory of `*.stub` files layered over the built-in stubs.
    /// Relative paths are resolved against the project directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file (no ANSI).
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

/// `[custom_types.<id>]` entry. Missing fields fall back to the defaults
/// used by `make-type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomTypeConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub features: Option<Vec<String>>,
    pub dependencies: Option<Vec<String>>,
}

impl CustomTypeConfig {
    pub fn descriptor(&self, id: &str) -> WebsiteTypeDescriptor {
        let mut descriptor = WebsiteTypeDescriptor::custom(id);
        if let Some(name) = &self.name {
            descriptor.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            descriptor.description.clone_from(description);
        }
        if let Some(icon) = &self.icon {
            descriptor.icon.clone_from(icon);
        }
        if let Some(color) = &self.color {
            descriptor.color.clone_from(color);
        }
        if let Some(features) = &self.features {
            descriptor.features.clone_from(features);
        }
        if let Some(dependencies) = &self.dependencies {
            descriptor.dependencies.clone_from(dependencies);
        }
        descriptor
    }
}

impl From<&WebsiteTypeDescriptor> for CustomTypeConfig {
    fn from(d: &WebsiteTypeDescriptor) -> Self {
        Self {
            name: Some(d.name.clone()),
            description: Some(d.description.clone()),
            icon: Some(d.icon.clone()),
            color: Some(d.color.clone()),
            features: Some(d.features.clone()),
            dependencies: Some(d.dependencies.clone()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let types = [
            "portfolio",
            "ecommerce",
            "educational",
            "healthcare",
            "hospitality",
            "real_estate",
            "restaurant",
            "fitness",
        ]
        .into_iter()
        .map(|id| (id.to_owned(), true))
        .collect();

        Self {
            default_type: "portfolio".into(),
            types,
            media: MediaConfig::default(),
            cache: CacheConfig::default(),
            analytics: AnalyticsConfig::default(),
            seo: SeoConfig::default(),
            api: ApiConfig::default(),
            theme: ThemeConfig::default(),
            frontend: FrontendConfig::default(),
            stubs: StubsConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
            custom_types: BTreeMap::new(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            disk: "public".into(),
            path: "bunny/media".into(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: 3600,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tracking_id: None,
        }
    }
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            meta_description: "A professional website built with Bunny".into(),
            meta_keywords: "website, professional, bunny".into(),
            generate_sitemap: true,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: "api/bunny".into(),
            middleware: vec!["api".into()],
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: "default".into(),
            custom_css: true,
            custom_js: true,
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            framework: "vue".into(),
            api_type: "rest".into(),
            ui_library: "tailwind".into(),
            components: false,
        }
    }
}

impl FrontendConfig {
    pub fn framework(&self) -> Result<Option<FrontendFramework>, DomainError> {
        match self.framework.trim() {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }

    pub fn api_style(&self) -> Result<Option<ApiStyle>, DomainError> {
        match self.api_type.trim() {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }

    pub fn ui_library(&self) -> Result<UiLibrary, DomainError> {
        self.ui_library.parse()
    }
}

impl AppConfig {
    /// Layer defaults, the config file and `BUNNY_*` variables.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>, project_dir: &Path) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = Self::resolve_path(config_file, project_dir) {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("api.middleware"),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Config file that [`AppConfig::load`] reads, if any.
    pub fn resolve_path(config_file: Option<&Path>, project_dir: &Path) -> Option<PathBuf> {
        if let Some(path) = config_file {
            return Some(path.to_path_buf());
        }
        let local = Self::project_path(project_dir);
        if local.is_file() {
            return Some(local);
        }
        let global = Self::config_path();
        global.is_file().then_some(global)
    }

    /// `<project>/bunny.toml`.
    pub fn project_path(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_FILE_NAME)
    }

    /// Path of the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `bunny.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kisalay", "bunny")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Built-in types plus `custom_types`, filtered by `types`.
    pub fn registry(&self) -> BunnyResult<WebsiteTypeRegistry> {
        let mut registry = WebsiteTypeRegistry::builtin();
        for (id, custom) in &self.custom_types {
            registry = registry.with_custom(custom.descriptor(id))?;
        }
        Ok(registry.with_enabled(&self.types))
    }

    /// Override stub directory, resolved against `project_dir`.
    pub fn stubs_dir(&self, project_dir: &Path) -> Option<PathBuf> {
        self.stubs.path.as_ref().map(|p| project_dir.join(p))
    }

    /// Value at a dotted key path such as `cache.ttl`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for segment in key.split('.') {
            value = value.get_mut(segment)?.take();
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_follow_the_package_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_type, "portfolio");
        assert_eq!(cfg.cache.ttl, 3600);
        assert_eq!(cfg.api.prefix, "api/bunny");
        assert_eq!(cfg.types.get("real_estate"), Some(&true));
        assert!(!cfg.frontend.components);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.default_type, "portfolio");
        assert_eq!(cfg.media.disk, "public");
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "default_type = \"restaurant\"\n\n[cache]\nttl = 60\n\n[types]\nfitness = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.default_type, "restaurant");
        assert_eq!(cfg.cache.ttl, 60);
        assert!(cfg.cache.enabled);
        assert_eq!(cfg.types.get("fitness"), Some(&false));
        assert_eq!(cfg.types.get("portfolio"), Some(&true));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn registry_applies_custom_and_disabled_types() {
        let mut cfg = AppConfig::default();
        cfg.types.insert("fitness".into(), false);
        cfg.custom_types.insert(
            "law-firm".into(),
            CustomTypeConfig {
                name: Some("Law Firm".into()),
                features: Some(vec!["cases".into()]),
                ..CustomTypeConfig::default()
            },
        );

        let registry = cfg.registry().unwrap();
        assert!(registry.get("fitness").is_none());
        assert!(registry.has_type("fitness"));
        let law = registry.get("law-firm").unwrap();
        assert_eq!(law.name, "Law Firm");
        assert_eq!(law.features, vec!["cases".to_owned()]);
        assert!(!law.dependencies.is_empty());
    }

    #[test]
    fn custom_type_colliding_with_builtin_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.custom_types
            .insert("restaurant".into(), CustomTypeConfig::default());
        assert!(cfg.registry().is_err());
    }

    #[test]
    fn custom_entry_round_trips_a_descriptor() {
        let descriptor = WebsiteTypeDescriptor::custom("law-firm");
        let entry = CustomTypeConfig::from(&descriptor);
        assert_eq!(entry.descriptor("law-firm"), descriptor);
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("default_type"), Some(serde_json::json!("portfolio")));
        assert_eq!(cfg.get("cache.ttl"), Some(serde_json::json!(3600)));
        assert_eq!(cfg.get("analytics.tracking_id"), Some(serde_json::Value::Null));
        assert!(cfg.get("cache.nope").is_none());
    }

    #[test]
    fn frontend_none_disables_components() {
        let frontend = FrontendConfig {
            framework: "none".into(),
            api_type: "graphql".into(),
            ..FrontendConfig::default()
        };
        assert_eq!(frontend.framework().unwrap(), None);
        assert_eq!(frontend.api_style().unwrap(), Some(ApiStyle::Graphql));
        assert_eq!(frontend.ui_library().unwrap(), UiLibrary::Tailwind);
    }

    #[test]
    fn defaults_serialise_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("default_type = \"portfolio\""));
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }
}
