//! Where a website type's published assets live inside a project.

use crate::domain::common::RelativePath;
use crate::domain::error::DomainError;
use crate::domain::website_type::{normalize_type_id, validate_type_id};

/// Vendor namespace used under every published directory.
pub const VENDOR_DIR: &str = "vendor/bunny";

/// Every `vendor/bunny` tree any type publishes into, plus `config/bunny`.
/// Removing these uninstalls all types at once.
pub fn package_paths() -> Vec<RelativePath> {
    vec![
        RelativePath::new("config/bunny"),
        RelativePath::new(format!("resources/views/{VENDOR_DIR}")),
        RelativePath::new(format!("public/{VENDOR_DIR}")),
        RelativePath::new(format!("database/migrations/{VENDOR_DIR}")),
        RelativePath::new(format!("resources/lang/{VENDOR_DIR}")),
    ]
}

/// Asset locations for one website type, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLayout {
    type_id: String,
}

impl TypeLayout {
    pub fn new(type_id: &str) -> Result<Self, DomainError> {
        let type_id = normalize_type_id(type_id);
        validate_type_id(&type_id)?;
        Ok(Self { type_id })
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// `resources/views/vendor/bunny/<type>`
    pub fn views_dir(&self) -> RelativePath {
        RelativePath::new(format!("resources/views/{VENDOR_DIR}/{}", self.type_id))
    }

    /// `config/bunny/<type>.toml`
    pub fn config_file(&self) -> RelativePath {
        RelativePath::new(format!("config/bunny/{}.toml", self.type_id))
    }

    /// `database/migrations/vendor/bunny/<type>`
    pub fn migrations_dir(&self) -> RelativePath {
        RelativePath::new(format!("database/migrations/{VENDOR_DIR}/{}", self.type_id))
    }

    /// `resources/lang/vendor/bunny/<type>`
    pub fn lang_dir(&self) -> RelativePath {
        RelativePath::new(format!("resources/lang/{VENDOR_DIR}/{}", self.type_id))
    }

    /// Every directory publishing creates, in publish order.
    pub fn directories(&self) -> Vec<RelativePath> {
        let mut dirs = vec![self.views_dir()];
        dirs.extend(self.config_file().parent());
        dirs.push(self.migrations_dir());
        dirs.push(self.lang_dir());
        dirs
    }

    /// Every path uninstall removes, in removal order.
    pub fn asset_paths(&self) -> Vec<RelativePath> {
        vec![
            self.views_dir(),
            self.config_file(),
            self.migrations_dir(),
            self.lang_dir(),
        ]
    }

    /// Database table name for a migration of this type
    /// (`pet-shop` + `settings` -> `pet_shop_settings`).
    pub fn table_name(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.type_id.replace('-', "_"))
    }
}
