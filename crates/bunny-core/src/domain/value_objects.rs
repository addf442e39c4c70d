//! Generator option value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── ApiStyle ─────────────────────────────────────────────────────────────────

/// Flavour of API scaffolding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    Rest,
    Graphql,
}

impl ApiStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Graphql => "graphql",
        }
    }
}

impl fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rest" | "restful" => Ok(Self::Rest),
            "graphql" | "gql" => Ok(Self::Graphql),
            other => Err(DomainError::InvalidOption {
                option: "api",
                value: other.to_owned(),
                expected: "rest, graphql",
            }),
        }
    }
}

// ── FrontendFramework ────────────────────────────────────────────────────────

/// JavaScript framework for generated components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontendFramework {
    Vue,
    React,
    Alpine,
}

impl FrontendFramework {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vue => "vue",
            Self::React => "react",
            Self::Alpine => "alpine",
        }
    }

    /// File extension of a generated component.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Vue => "vue",
            Self::React => "jsx",
            Self::Alpine => "js",
        }
    }

    /// Runtime npm packages the framework needs.
    pub fn npm_dependencies(self) -> &'static [&'static str] {
        match self {
            Self::Vue => &["vue@^3.3.0", "@vitejs/plugin-vue"],
            Self::React => &["react@^18.2.0", "react-dom@^18.2.0", "@vitejs/plugin-react"],
            Self::Alpine => &["alpinejs@^3.13.0"],
        }
    }
}

impl fmt::Display for FrontendFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrontendFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vue" | "vuejs" => Ok(Self::Vue),
            "react" => Ok(Self::React),
            "alpine" | "alpinejs" => Ok(Self::Alpine),
            other => Err(DomainError::InvalidOption {
                option: "frontend",
                value: other.to_owned(),
                expected: "vue, react, alpine",
            }),
        }
    }
}

// ── UiLibrary ────────────────────────────────────────────────────────────────

/// CSS library the components are styled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLibrary {
    #[default]
    Tailwind,
    Bootstrap,
    None,
}

impl UiLibrary {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::Bootstrap => "bootstrap",
            Self::None => "none",
        }
    }

    pub fn npm_dependencies(self) -> &'static [&'static str] {
        match self {
            Self::Bootstrap => &["bootstrap@^5.3.0"],
            Self::Tailwind | Self::None => &[],
        }
    }

    pub fn npm_dev_dependencies(self) -> &'static [&'static str] {
        match self {
            Self::Tailwind => &["tailwindcss@^3.3.0", "postcss@^8.4.0", "autoprefixer@^10.4.0"],
            Self::Bootstrap | Self::None => &[],
        }
    }
}

impl fmt::Display for UiLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiLibrary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tailwind" | "tailwindcss" => Ok(Self::Tailwind),
            "bootstrap" => Ok(Self::Bootstrap),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::InvalidOption {
                option: "ui",
                value: other.to_owned(),
                expected: "tailwind, bootstrap, none",
            }),
        }
    }
}

/// npm packages a frontend selection needs. Reported to the user, never
/// installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NpmPackages {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl NpmPackages {
    pub fn for_selection(framework: FrontendFramework, ui: UiLibrary) -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        let mut dependencies = owned(framework.npm_dependencies());
        dependencies.extend(owned(ui.npm_dependencies()));
        Self {
            dependencies,
            dev_dependencies: owned(ui.npm_dev_dependencies()),
        }
    }

    /// `npm install ...` command lines, runtime packages first.
    pub fn install_commands(&self) -> Vec<String> {
        let mut commands = Vec::new();
        if !self.dependencies.is_empty() {
            commands.push(format!("npm install {}", self.dependencies.join(" ")));
        }
        if !self.dev_dependencies.is_empty() {
            commands.push(format!("npm install -D {}", self.dev_dependencies.join(" ")));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_options() {
        assert_eq!("REST".parse::<ApiStyle>().unwrap(), ApiStyle::Rest);
        assert_eq!("gql".parse::<ApiStyle>().unwrap(), ApiStyle::Graphql);
        assert_eq!("alpinejs".parse::<FrontendFramework>().unwrap(), FrontendFramework::Alpine);
        assert_eq!("none".parse::<UiLibrary>().unwrap(), UiLibrary::None);
        assert!("soap".parse::<ApiStyle>().is_err());
        assert!("svelte".parse::<FrontendFramework>().is_err());
    }

    #[test]
    fn vue_with_tailwind_packages() {
        let pkgs = NpmPackages::for_selection(FrontendFramework::Vue, UiLibrary::Tailwind);
        assert_eq!(pkgs.dependencies, vec!["vue@^3.3.0", "@vitejs/plugin-vue"]);
        assert_eq!(
            pkgs.dev_dependencies,
            vec!["tailwindcss@^3.3.0", "postcss@^8.4.0", "autoprefixer@^10.4.0"]
        );
        assert_eq!(
            pkgs.install_commands(),
            vec![
                "npm install vue@^3.3.0 @vitejs/plugin-vue",
                "npm install -D tailwindcss@^3.3.0 postcss@^8.4.0 autoprefixer@^10.4.0"
            ]
        );
    }

    #[test]
    fn react_with_bootstrap_packages() {
        let pkgs = NpmPackages::for_selection(FrontendFramework::React, UiLibrary::Bootstrap);
        assert_eq!(
            pkgs.dependencies,
            vec!["react@^18.2.0", "react-dom@^18.2.0", "@vitejs/plugin-react", "bootstrap@^5.3.0"]
        );
        assert!(pkgs.dev_dependencies.is_empty());
    }
}
