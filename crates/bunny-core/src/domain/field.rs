//! Model field definitions parsed from `name:type[:constraint]*` lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One model attribute as typed by the user.
///
/// Known constraints are `nullable`, `unique`, `default=<value>`,
/// `min=<n>` and `max=<n>`. Anything else is kept verbatim and ignored by
/// the generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub column_type: String,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.has_flag("nullable")
    }

    pub fn is_unique(&self) -> bool {
        self.has_flag("unique")
    }

    pub fn default_value(&self) -> Option<&str> {
        self.option("default")
    }

    pub fn min(&self) -> Option<&str> {
        self.option("min")
    }

    pub fn max(&self) -> Option<&str> {
        self.option("max")
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.constraints.iter().any(|c| c == flag)
    }

    fn option(&self, key: &str) -> Option<&str> {
        self.constraints.iter().find_map(|c| {
            c.split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for FieldDefinition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();

        let invalid = |reason: &str| DomainError::InvalidField {
            input: s.trim().to_owned(),
            reason: reason.to_owned(),
        };

        if parts.len() < 2 {
            return Err(invalid("expected name:type"));
        }
        if !is_identifier(parts[0]) {
            return Err(invalid("field name must be an identifier"));
        }
        if !is_identifier(parts[1]) {
            return Err(invalid("column type must be an identifier"));
        }

        Ok(Self {
            name: parts[0].to_owned(),
            column_type: parts[1].to_owned(),
            constraints: parts[2..]
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| (*c).to_owned())
                .collect(),
        })
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.column_type)?;
        for c in &self.constraints {
            write!(f, ":{c}")?;
        }
        Ok(())
    }
}

/// Result of lenient parsing: accepted fields plus the entries that were
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub fields: Vec<FieldDefinition>,
    pub rejected: Vec<DomainError>,
}

/// Parse a comma-separated field list, skipping malformed entries.
///
/// Blank entries are ignored silently; malformed ones are reported in
/// [`ParsedFields::rejected`] so callers can warn about them.
pub fn parse_fields(input: &str) -> ParsedFields {
    let mut parsed = ParsedFields::default();
    for entry in input.split(',').filter(|e| !e.trim().is_empty()) {
        match entry.parse::<FieldDefinition>() {
            Ok(field) => parsed.fields.push(field),
            Err(e) => parsed.rejected.push(e),
        }
    }
    parsed
}

/// Parse a comma-separated field list, failing on the first malformed entry.
pub fn parse_fields_strict(input: &str) -> Result<Vec<FieldDefinition>, DomainError> {
    input
        .split(',')
        .filter(|e| !e.trim().is_empty())
        .map(str::parse)
        .collect()
}
