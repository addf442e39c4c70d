//! Stubs compiled into the binary.
//!
//! The files live under `stubs/` in this crate and are embedded with
//! `include_str!`, so a release binary needs nothing on disk. A user stub
//! directory (see [`crate::stub_loader`]) can override any of them by name.

use bunny_core::domain::{Stub, StubName};

macro_rules! stub {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/stubs/", $name, ".stub")),
        )
    };
}

/// `(name, text)` for every built-in stub.
pub static BUILTIN_STUBS: &[(&str, &str)] = &[
    // common
    stub!("common/model"),
    stub!("common/controller"),
    stub!("common/migration"),
    stub!("common/view"),
    stub!("common/factory"),
    stub!("common/seeder"),
    // sites
    stub!("sites/default/layout.blade"),
    stub!("sites/default/home.blade"),
    // backend
    stub!("backend/model"),
    stub!("backend/migration"),
    stub!("backend/controllers/default"),
    stub!("backend/routes/default"),
    stub!("backend/views/default/index.blade"),
    stub!("backend/views/default/create.blade"),
    stub!("backend/views/default/edit.blade"),
    stub!("backend/views/default/show.blade"),
    // api
    stub!("api/controllers/rest"),
    stub!("api/controllers/graphql"),
    stub!("api/resource"),
    stub!("api/request"),
    stub!("api/routes/rest"),
    stub!("api/routes/graphql"),
    stub!("api/tests/rest"),
    stub!("api/tests/graphql"),
    stub!("api/policy"),
    // frontend
    stub!("frontend/vue/default.vue"),
    stub!("frontend/react/default.jsx"),
    stub!("frontend/alpine/default.js"),
    // cms
    stub!("cms/migration"),
    stub!("cms/model"),
    stub!("cms/controller"),
    // type
    stub!("type/config"),
    stub!("type/migration"),
    stub!("type/views/index.blade"),
    stub!("type/views/show.blade"),
    stub!("type/views/create.blade"),
    stub!("type/views/edit.blade"),
    stub!("type/translation"),
];

/// All built-in stubs as domain values.
pub fn all_stubs() -> Vec<Stub> {
    BUILTIN_STUBS
        .iter()
        .map(|(name, text)| Stub::new(StubName::new(*name), *text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_valid() {
        let mut seen = HashSet::new();
        for (name, _) in BUILTIN_STUBS {
            assert!(StubName::parse(name).is_ok(), "{name}");
            assert!(seen.insert(*name), "duplicate {name}");
        }
    }

    #[test]
    fn every_stub_has_content() {
        for stub in all_stubs() {
            assert!(!stub.text().trim().is_empty(), "{} is empty", stub.name());
        }
    }

    #[test]
    fn type_config_only_uses_known_tokens() {
        let config = all_stubs()
            .into_iter()
            .find(|s| s.name().as_str() == "type/config")
            .unwrap();
        let known = [
            "type",
            "name",
            "description",
            "icon",
            "color",
            "features",
            "dependencies",
            "settings",
        ];
        for marker in config.markers() {
            assert!(known.contains(&marker.as_str()), "{marker}");
        }
    }
}
