//! Generator service: turns requests into [`GenerationPlan`]s.
//!
//! Every generator is pure with respect to the filesystem. It looks stubs up
//! through the [`StubStore`] port, renders them and returns a plan; the
//! caller decides whether to print it (`--dry-run`) or hand it to a
//! [`PlanWriter`](super::PlanWriter).
//!
//! Site-specific stubs fall back to a `default` variant, so
//! `backend/controllers/portfolio` is tried before
//! `backend/controllers/default`.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ports::StubStore};
use crate::domain::{
    ApiStyle, DEFAULT_SETTINGS, FieldDefinition, FrontendFramework, GeneratedFile,
    GenerationPlan, NpmPackages, RelativePath, Replacements, Stub, StubName, TypeLayout,
    UiLibrary, WebsiteTypeDescriptor, WriteMode, fragments, naming,
    website_type::{normalize_type_id, validate_type_id},
};
use crate::error::BunnyResult;

/// Fallback segment used when no site-specific stub exists.
pub const DEFAULT_VARIANT: &str = "default";

/// Views the backend generator writes per site.
pub const BACKEND_VIEWS: &[&str] = &["index", "create", "edit", "show"];

/// Views a website type publishes.
pub const TYPE_VIEWS: &[&str] = &["index", "show", "create", "edit"];

/// Migrations a website type publishes.
pub const TYPE_MIGRATIONS: &[&str] = &["create_base_tables", "create_settings_table"];

/// Timestamp prefix for migration file names (`2024_01_31_120000`).
pub fn migration_timestamp() -> String {
    chrono::Local::now().format("%Y_%m_%d_%H%M%S").to_string()
}

/// What to generate for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    site: String,
    model: String,
    fields: Vec<FieldDefinition>,
    timestamp: String,
}

impl ModelRequest {
    /// Validate the site id and normalise the model name to a class name.
    pub fn new(site: &str, model: &str, fields: Vec<FieldDefinition>) -> BunnyResult<Self> {
        let site = normalize_type_id(site);
        validate_type_id(&site)?;
        Ok(Self {
            site,
            model: naming::model_class(model)?,
            fields,
            timestamp: migration_timestamp(),
        })
    }

    /// Pin the migration timestamp (tests, reproducible output).
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn table_name(&self) -> String {
        naming::table_name(&self.model)
    }

    pub fn route_name(&self) -> String {
        naming::route_name(&self.model)
    }

    pub fn model_variable(&self) -> String {
        naming::camel(&self.model)
    }
}

/// Which generators a `generate` run combines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Full backend (CRUD controller, routes, four views) instead of the
    /// common scaffold.
    pub backend: bool,
    pub api: Option<ApiStyle>,
    pub frontend: Option<FrontendFramework>,
    pub ui: UiLibrary,
    pub cms: bool,
}

fn path(raw: String) -> BunnyResult<RelativePath> {
    Ok(RelativePath::try_new(raw)?)
}

fn stub_name(raw: String) -> BunnyResult<StubName> {
    Ok(StubName::parse(&raw)?)
}

/// JSON-encode a value; the result is also a valid TOML value.
fn toml_value<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_owned())
}

/// Builds generation plans from stubs.
pub struct GeneratorService {
    stubs: Arc<dyn StubStore>,
}

impl GeneratorService {
    pub fn new(stubs: Arc<dyn StubStore>) -> Self {
        Self { stubs }
    }

    pub fn stubs(&self) -> &dyn StubStore {
        self.stubs.as_ref()
    }

    // -------------------------------------------------------------------------
    // Stub resolution
    // -------------------------------------------------------------------------

    /// First stub that exists among `candidates`.
    fn resolve(&self, candidates: &[StubName]) -> BunnyResult<Stub> {
        for name in candidates {
            if let Some(stub) = self.stubs.find(name)? {
                debug!(stub = %name, "Resolved stub");
                return Ok(stub);
            }
        }
        Err(ApplicationError::StubNotFound {
            name: candidates
                .iter()
                .map(StubName::as_str)
                .collect::<Vec<_>>()
                .join(" | "),
        }
        .into())
    }

    /// `<group>/<site>` then `<group>/default`, with an optional suffix.
    fn site_candidates(group: &str, site: &str, suffix: &str) -> BunnyResult<Vec<StubName>> {
        Ok(vec![
            stub_name(format!("{group}/{site}{suffix}"))?,
            stub_name(format!("{group}/{DEFAULT_VARIANT}{suffix}"))?,
        ])
    }

    fn render(
        &self,
        target: RelativePath,
        mode: WriteMode,
        candidates: &[StubName],
        replacements: &Replacements,
    ) -> BunnyResult<GeneratedFile> {
        let stub = self.resolve(candidates)?;
        let content = stub.render(replacements);
        let file = match mode {
            WriteMode::Create => GeneratedFile::create(target, content),
            WriteMode::Append => GeneratedFile::append(target, content),
        };
        Ok(file.from_stub(stub.name().clone(), stub.unresolved(replacements)))
    }

    fn render_one(
        &self,
        target: RelativePath,
        stub: &str,
        replacements: &Replacements,
    ) -> BunnyResult<GeneratedFile> {
        self.render(target, WriteMode::Create, &[StubName::parse(stub)?], replacements)
    }

    // -------------------------------------------------------------------------
    // Common scaffold
    // -------------------------------------------------------------------------

    /// Model, controller, migration, view, factory and seeder, plus the
    /// site's default templates.
    #[instrument(skip_all, fields(site = %req.site(), model = %req.model()))]
    pub fn common_plan(&self, req: &ModelRequest) -> BunnyResult<GenerationPlan> {
        let model = req.model();
        let controller = format!("{model}Controller");
        let table = req.table_name();
        let reps = Replacements::new()
            .with("modelName", model)
            .with("fillableFields", fragments::fillable_inline(req.fields()))
            .with("optionalRelations", "// Define relationships here if needed")
            .with("controllerName", controller.as_str())
            .with("viewName", req.site())
            .with("tableName", table.as_str())
            .with("migrationFields", fragments::migration_columns(req.fields()))
            .with("factoryFields", fragments::factory_fields(req.fields()));

        let mut plan = GenerationPlan::new();
        plan.add_file(self.render_one(
            path(format!("app/Models/{model}.php"))?,
            "common/model",
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("app/Http/Controllers/{controller}.php"))?,
            "common/controller",
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!(
                "database/migrations/{}_create_{table}_table.php",
                req.timestamp()
            ))?,
            "common/migration",
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("resources/views/{}.blade.php", req.site()))?,
            "common/view",
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("database/factories/{model}Factory.php"))?,
            "common/factory",
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("database/seeders/{model}Seeder.php"))?,
            "common/seeder",
            &reps,
        )?);

        plan.extend(self.site_templates_plan(req.site())?);
        Ok(plan)
    }

    /// Copy `sites/<site>/*` (or `sites/default/*`) into
    /// `resources/views/<site>/`.
    pub fn site_templates_plan(&self, site: &str) -> BunnyResult<GenerationPlan> {
        let all = self.stubs.list()?;
        let pick = |variant: &str| -> Vec<StubName> {
            let prefix = format!("sites/{variant}/");
            all.iter()
                .filter(|n| n.as_str().starts_with(&prefix))
                .cloned()
                .collect()
        };
        let mut chosen = pick(site);
        if chosen.is_empty() {
            chosen = pick(DEFAULT_VARIANT);
        }

        let reps = Replacements::new()
            .with("siteType", site)
            .with("siteName", naming::ucwords(site));

        let view_dir = path(format!("resources/views/{site}"))?;
        let mut plan = GenerationPlan::new().with_directory(view_dir.clone());
        for name in chosen {
            let file_name = name.as_str().rsplit('/').next().unwrap_or(name.as_str());
            let target = view_dir.join(format!("{file_name}.php"))?;
            plan.add_file(self.render(target, WriteMode::Create, &[name], &reps)?);
        }
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Backend
    // -------------------------------------------------------------------------

    /// Model with fillable/casts, CRUD controller, migration, web routes and
    /// the four views.
    #[instrument(skip_all, fields(site = %req.site(), model = %req.model()))]
    pub fn backend_plan(&self, req: &ModelRequest) -> BunnyResult<GenerationPlan> {
        let model = req.model();
        let site = req.site();
        let table = req.table_name();
        let reps = Replacements::new()
            .with("modelName", model)
            .with("modelVariable", req.model_variable())
            .with("fillable", fragments::fillable(req.fields()))
            .with("casts", fragments::casts(req.fields()))
            .with("tableName", table.as_str())
            .with("columns", fragments::migration_columns(req.fields()))
            .with("routeName", req.route_name())
            .with("siteType", site)
            .with("fields", fragments::form_fields(req.fields()));

        let mut plan = GenerationPlan::new();
        plan.add_file(self.render_one(
            path(format!("app/Models/{model}.php"))?,
            "backend/model",
            &reps,
        )?);
        plan.add_file(self.render(
            path(format!("app/Http/Controllers/{model}Controller.php"))?,
            WriteMode::Create,
            &Self::site_candidates("backend/controllers", site, "")?,
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!(
                "database/migrations/{}_create_{table}_table.php",
                req.timestamp()
            ))?,
            "backend/migration",
            &reps,
        )?);

        let mut routes = self.render(
            RelativePath::new("routes/web.php"),
            WriteMode::Append,
            &Self::site_candidates("backend/routes", site, "")?,
            &reps,
        )?;
        routes.content.insert(0, '\n');
        plan.add_file(routes);

        let view_dir = path(format!("resources/views/{site}"))?;
        plan.add_directory(view_dir.clone());
        for view in BACKEND_VIEWS {
            let candidates = vec![
                stub_name(format!("backend/views/{site}/{view}.blade"))?,
                stub_name(format!("backend/views/{DEFAULT_VARIANT}/{view}.blade"))?,
            ];
            plan.add_file(self.render(
                view_dir.join(format!("{view}.blade.php"))?,
                WriteMode::Create,
                &candidates,
                &reps,
            )?);
        }

        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // API
    // -------------------------------------------------------------------------

    /// API controller, resource, form request, routes, feature test and
    /// policy for one model.
    #[instrument(skip_all, fields(model = %req.model(), style = %style))]
    pub fn api_plan(&self, req: &ModelRequest, style: ApiStyle) -> BunnyResult<GenerationPlan> {
        let model = req.model();
        let style = style.as_str();
        let reps = Replacements::new()
            .with("modelName", model)
            .with("modelVariable", req.model_variable())
            .with("resourceName", format!("{model}Resource"))
            .with("requestName", format!("{model}Request"))
            .with("routeName", req.route_name())
            .with("fields", fragments::resource_fields(req.fields()))
            .with("rules", fragments::validation_rules(req.fields(), &req.table_name()));

        let mut plan = GenerationPlan::new();
        plan.add_file(self.render_one(
            path(format!("app/Http/Controllers/Api/{model}Controller.php"))?,
            &format!("api/controllers/{style}"),
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("app/Http/Resources/{model}Resource.php"))?,
            "api/resource",
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("app/Http/Requests/Api/{model}Request.php"))?,
            "api/request",
            &reps,
        )?);

        let mut routes = self.render(
            RelativePath::new("routes/api.php"),
            WriteMode::Append,
            &[stub_name(format!("api/routes/{style}"))?],
            &reps,
        )?;
        routes.content.insert(0, '\n');
        plan.add_file(routes);

        plan.add_file(self.render_one(
            path(format!("tests/Feature/Api/{model}Test.php"))?,
            &format!("api/tests/{style}"),
            &reps,
        )?);
        plan.add_file(self.render_one(
            path(format!("app/Policies/{model}Policy.php"))?,
            "api/policy",
            &reps,
        )?);
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Frontend
    // -------------------------------------------------------------------------

    /// One list component for the chosen framework plus the npm packages
    /// the selection needs (reported as plan notes).
    #[instrument(skip_all, fields(site = %req.site(), framework = %framework, ui = %ui))]
    pub fn frontend_plan(
        &self,
        req: &ModelRequest,
        framework: FrontendFramework,
        ui: UiLibrary,
    ) -> BunnyResult<GenerationPlan> {
        let model = req.model();
        let site = req.site();
        let ext = framework.extension();
        let reps = Replacements::new()
            .with("modelName", model)
            .with("modelVariable", req.model_variable())
            .with("routeName", req.route_name())
            .with("uiLibrary", ui.as_str());

        let dir = path(format!("resources/js/components/{site}"))?;
        let mut plan = GenerationPlan::new().with_directory(dir.clone());
        plan.add_file(self.render(
            dir.join(format!("{model}List.{ext}"))?,
            WriteMode::Create,
            &Self::site_candidates(&format!("frontend/{framework}"), site, &format!(".{ext}"))?,
            &reps,
        )?);

        for command in NpmPackages::for_selection(framework, ui).install_commands() {
            plan.add_note(command);
        }
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // CMS
    // -------------------------------------------------------------------------

    /// Pages migration, `Page` model and `PageController`.
    pub fn cms_plan(&self, timestamp: &str) -> BunnyResult<GenerationPlan> {
        let reps = Replacements::new().with("tableName", "pages");
        let mut plan = GenerationPlan::new();
        plan.add_file(self.render_one(
            path(format!("database/migrations/{timestamp}_create_pages_table.php"))?,
            "cms/migration",
            &reps,
        )?);
        plan.add_file(self.render_one(
            RelativePath::new("app/Models/Page.php"),
            "cms/model",
            &reps,
        )?);
        plan.add_file(self.render_one(
            RelativePath::new("app/Http/Controllers/PageController.php"),
            "cms/controller",
            &reps,
        )?);
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Combined
    // -------------------------------------------------------------------------

    /// Everything a `generate` run asked for, in one plan.
    #[instrument(skip_all, fields(site = %req.site(), model = %req.model()))]
    pub fn scaffold_plan(
        &self,
        req: &ModelRequest,
        options: &ScaffoldOptions,
    ) -> BunnyResult<GenerationPlan> {
        let mut plan = if options.backend {
            self.backend_plan(req)?
        } else {
            self.common_plan(req)?
        };

        if let Some(style) = options.api {
            plan.extend(self.api_plan(req, style)?);
        }
        if let Some(framework) = options.frontend {
            plan.extend(self.frontend_plan(req, framework, options.ui)?);
        }
        if options.cms {
            plan.extend(self.cms_plan(req.timestamp())?);
        }

        plan.validate()?;
        info!(files = plan.file_count(), "Scaffold plan built");
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Website type assets
    // -------------------------------------------------------------------------

    /// Config file, migrations, views and translations for a website type.
    ///
    /// Used both when publishing an existing type and by `make-type`.
    #[instrument(skip_all, fields(type_id = %descriptor.id))]
    pub fn type_assets_plan(
        &self,
        descriptor: &WebsiteTypeDescriptor,
    ) -> BunnyResult<GenerationPlan> {
        let layout = TypeLayout::new(&descriptor.id)?;
        let type_id = layout.type_id();

        let settings = DEFAULT_SETTINGS
            .iter()
            .map(|(key, on)| format!("{key} = {on}"))
            .collect::<Vec<_>>()
            .join("\n");
        let config_reps = Replacements::new()
            .with("type", toml_value(type_id))
            .with("name", toml_value(&descriptor.name))
            .with("description", toml_value(&descriptor.description))
            .with("icon", toml_value(&descriptor.icon))
            .with("color", toml_value(&descriptor.color))
            .with("features", toml_value(&descriptor.features))
            .with("dependencies", toml_value(&descriptor.dependencies))
            .with("settings", settings);

        let text_reps = Replacements::new()
            .with("type", type_id)
            .with("name", descriptor.name.as_str())
            .with("description", descriptor.description.as_str());

        let mut plan = GenerationPlan::new();
        for dir in layout.directories() {
            plan.add_directory(dir);
        }

        plan.add_file(self.render_one(layout.config_file(), "type/config", &config_reps)?);

        for migration in TYPE_MIGRATIONS {
            let reps = text_reps
                .clone()
                .with("class", naming::studly(migration))
                .with("table", layout.table_name(migration));
            plan.add_file(self.render_one(
                layout.migrations_dir().join(format!("{migration}.php"))?,
                "type/migration",
                &reps,
            )?);
        }

        for view in TYPE_VIEWS {
            plan.add_file(self.render_one(
                layout.views_dir().join(format!("{view}.blade.php"))?,
                &format!("type/views/{view}.blade"),
                &text_reps,
            )?);
        }

        plan.add_file(self.render_one(
            layout.lang_dir().join("en.php")?,
            "type/translation",
            &text_reps,
        )?);

        Ok(plan)
    }

    /// Files for a brand-new custom type named `name` (kebab-cased to an id).
    pub fn make_type_plan(
        &self,
        name: &str,
    ) -> BunnyResult<(WebsiteTypeDescriptor, GenerationPlan)> {
        let id = naming::kebab(name);
        validate_type_id(&id)?;
        let descriptor = WebsiteTypeDescriptor::custom(id);
        let plan = self.type_assets_plan(&descriptor)?;
        Ok((descriptor, plan))
    }
}
