//! Stub templates and the `{{ name }}` marker renderer.
//!
//! A stub is plain text with zero or more markers of the exact form
//! `{{ name }}`: two opening braces, one space, the token name, one space,
//! two closing braces. Rendering replaces every marker whose name has an
//! entry in a [`Replacements`] map and leaves all other text untouched.
//!
//! ## Rendering model
//!
//! Rendering is a single left-to-right scan of the template. Text produced
//! by a replacement value is written to the output and never scanned again,
//! so a value that itself contains `{{ other }}` comes out literally.
//!
//! ```rust
//! use bunny_core::domain::{Replacements, render};
//!
//! let out = render(
//!     "Hello {{ name }}, you are {{ role }}.",
//!     &Replacements::new().with("name", "Ann").with("role", "admin"),
//! );
//! assert_eq!(out, "Hello Ann, you are admin.");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Opening half of a marker, including the inner space.
pub const MARKER_OPEN: &str = "{{ ";

/// Closing half of a marker, including the inner space.
pub const MARKER_CLOSE: &str = " }}";

/// File extension stub files carry on disk.
pub const STUB_EXTENSION: &str = "stub";

// ============================================================================
// Replacements
// ============================================================================

/// Insertion-ordered mapping from token name to replacement text.
///
/// Keys are unique; inserting an existing key replaces its value in place
/// and keeps its original position. Order never affects rendered output, it
/// only drives display (for example the `--dry-run` listing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a token value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another map into this one; `other` wins on conflicts.
    pub fn extend(&mut self, other: Replacements) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Replace every `{{ key }}` marker in `template` whose key is present in
/// `replacements`.
///
/// Markers with unknown names are copied through unchanged. Inserted values
/// are never re-scanned. Rendering cannot fail.
pub fn render(template: &str, replacements: &Replacements) -> String {
    if template.is_empty() || replacements.is_empty() {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(MARKER_OPEN) {
        let body = &rest[start + MARKER_OPEN.len()..];
        // Keys may themselves contain ` }}`; the longest matching marker wins.
        let hit = replacements
            .iter()
            .filter(|&(key, _)| {
                body.starts_with(key) && body[key.len()..].starts_with(MARKER_CLOSE)
            })
            .max_by_key(|&(key, _)| key.len())
            .map(|(key, value)| (key.len(), value));

        match hit {
            Some((name_len, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &body[name_len + MARKER_CLOSE.len()..];
            }
            None => {
                // Step over one '{' only, so a marker starting inside this
                // one (e.g. `{{ {{ a }}`) is still found.
                out.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Distinct marker names found in `template`, in order of first appearance.
///
/// A marker name runs from `{{ ` up to the nearest following ` }}` and may
/// not itself contain `{{ `. Only identifier-shaped names count, so Blade
/// echoes such as `{{ $post->title }}` are not reported.
pub fn markers(template: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(MARKER_OPEN) {
        let body = &rest[start + MARKER_OPEN.len()..];
        match body.find(MARKER_CLOSE) {
            Some(end) => {
                let name = &body[..end];
                if name.contains(MARKER_OPEN) {
                    rest = &rest[start + 1..];
                    continue;
                }
                if is_token_name(name) && seen.insert(name) {
                    names.push(name.to_owned());
                }
                rest = &body[end + MARKER_CLOSE.len()..];
            }
            None => break,
        }
    }

    names
}

fn is_token_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// StubName
// ============================================================================

/// Identifier of a stub inside a stub store.
///
/// A `/`-separated relative path without the `.stub` suffix, e.g.
/// `common/model` or `backend/views/portfolio/index.blade`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StubName(String);

impl StubName {
    /// Create a stub name from a known-good literal.
    ///
    /// # Panics
    /// Panics if the name is not a valid stub name (use [`StubName::parse`]
    /// for user input).
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match Self::parse(&name) {
            Ok(parsed) => parsed,
            Err(e) => panic!("invalid stub name {name:?}: {e}"),
        }
    }

    /// Parse a stub name, stripping a trailing `.stub` and normalising `\`
    /// separators to `/`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().replace('\\', "/");
        let trimmed = normalized
            .strip_suffix(".stub")
            .unwrap_or(&normalized)
            .to_owned();

        let invalid = |reason: &str| DomainError::InvalidStubName {
            name: raw.to_owned(),
            reason: reason.to_owned(),
        };

        if trimmed.is_empty() {
            return Err(invalid("name is empty"));
        }
        if trimmed.starts_with('/') {
            return Err(invalid("name must be relative"));
        }
        if trimmed.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(invalid("name contains an empty, '.' or '..' segment"));
        }

        Ok(Self(trimmed))
    }

    /// Join a child segment.
    pub fn join(&self, segment: &str) -> Result<Self, DomainError> {
        Self::parse(&format!("{}/{}", self.0, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative file path the stub would have on disk.
    pub fn file_name(&self) -> String {
        format!("{}.{STUB_EXTENSION}", self.0)
    }
}

impl fmt::Display for StubName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StubName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Stub
// ============================================================================

/// Where a stub's text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    /// Compiled into the binary with `include_str!`.
    Static(&'static str),

    /// Loaded at runtime.
    Owned(String),
}

impl StubSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for StubSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for StubSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// An immutable, named template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    name: StubName,
    source: StubSource,
}

impl Stub {
    pub fn new(name: StubName, source: impl Into<StubSource>) -> Self {
        Self {
            name,
            source: source.into(),
        }
    }

    pub fn name(&self) -> &StubName {
        &self.name
    }

    pub fn text(&self) -> &str {
        self.source.as_str()
    }

    pub fn render(&self, replacements: &Replacements) -> String {
        render(self.text(), replacements)
    }

    pub fn markers(&self) -> Vec<String> {
        markers(self.text())
    }

    /// Marker names in this stub that `replacements` has no entry for.
    pub fn unresolved(&self, replacements: &Replacements) -> Vec<String> {
        self.markers()
            .into_iter()
            .filter(|m| !replacements.contains_key(m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reps(pairs: &[(&str, &str)]) -> Replacements {
        pairs.iter().copied().collect()
    }

    #[test]
    fn renders_sentence() {
        let out = render(
            "Hello {{ name }}, you are {{ role }}.",
            &reps(&[("name", "Ann"), ("role", "admin")]),
        );
        assert_eq!(out, "Hello Ann, you are admin.");
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(render("{{ a }}-{{ a }}", &reps(&[("a", "x")])), "x-x");
    }

    #[test]
    fn unknown_marker_survives() {
        assert_eq!(render("{{ missing }}", &Replacements::new()), "{{ missing }}");
        assert_eq!(
            render("{{ missing }} {{ a }}", &reps(&[("a", "1")])),
            "{{ missing }} 1"
        );
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(render("", &reps(&[("a", "1")])), "");
        assert_eq!(render("plain {{ a }}", &Replacements::new()), "plain {{ a }}");
    }

    #[test]
    fn template_without_markers_is_unchanged() {
        let text = "no markers {here} {{tight}} {{  wide  }}";
        assert_eq!(render(text, &reps(&[("here", "x"), ("tight", "y")])), text);
    }

    #[test]
    fn names_are_exact_and_case_sensitive() {
        let r = reps(&[("name", "x")]);
        assert_eq!(render("{{ Name }}", &r), "{{ Name }}");
        assert_eq!(render("{{name}}", &r), "{{name}}");
        assert_eq!(render("{{  name }}", &r), "{{  name }}");
    }

    #[test]
    fn replacement_values_are_not_rescanned() {
        let r = reps(&[("a", "{{ b }}"), ("b", "boom")]);
        assert_eq!(render("{{ a }}", &r), "{{ b }}");

        // Order of insertion must not matter either.
        let r = reps(&[("b", "boom"), ("a", "{{ b }}")]);
        assert_eq!(render("{{ a }}", &r), "{{ b }}");
    }

    #[test]
    fn rendering_twice_with_empty_map_is_identity() {
        let r = reps(&[("a", "{{ b }}")]);
        let once = render("x {{ a }} {{ c }}", &r);
        assert_eq!(render(&once, &Replacements::new()), once);
    }

    #[test]
    fn overlapping_open_marker_still_matches_inner() {
        assert_eq!(render("{{ {{ a }} }}", &reps(&[("a", "b")])), "{{ b }}");
        assert_eq!(render("{{ foo {{ a }}", &reps(&[("a", "b")])), "{{ foo b");
    }

    #[test]
    fn key_containing_close_delimiter_matches_its_own_marker() {
        let r = reps(&[("a }} b", "X")]);
        assert_eq!(render("[{{ a }} b }}]", &r), "[X]");
    }

    #[test]
    fn longest_matching_key_wins() {
        let r = reps(&[("a", "short"), ("a }} b", "long")]);
        assert_eq!(render("{{ a }} b }} {{ a }}", &r), "long short");
    }

    #[test]
    fn unterminated_marker_is_literal() {
        assert_eq!(render("{{ a", &reps(&[("a", "b")])), "{{ a");
    }

    #[test]
    fn multibyte_text_around_markers() {
        assert_eq!(
            render("→ {{ a }} ←", &reps(&[("a", "ünïcode")])),
            "→ ünïcode ←"
        );
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut r = Replacements::new().with("a", "1").with("b", "2");
        r.insert("a", "3");
        let keys: Vec<_> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(r.get("a"), Some("3"));
    }

    #[test]
    fn markers_are_distinct_and_ordered() {
        let m = markers("{{ b }} {{ a }} {{ b }} {{ {{ c }}");
        assert_eq!(m, vec!["b", "a", "c"]);
    }

    #[test]
    fn blade_echoes_are_not_markers() {
        let m = markers("{{ $post->title }} {{ route('{{ routeName }}.index') }} {{ date('Y') }}");
        assert_eq!(m, vec!["routeName"]);
    }

    #[test]
    fn stub_reports_unresolved_markers() {
        let stub = Stub::new(StubName::new("common/model"), "{{ modelName }} {{ extra }}");
        let r = reps(&[("modelName", "Post")]);
        assert_eq!(stub.unresolved(&r), vec!["extra"]);
        assert_eq!(stub.render(&r), "Post {{ extra }}");
    }

    #[test]
    fn stub_name_parsing() {
        assert_eq!(StubName::parse("common/model.stub").unwrap().as_str(), "common/model");
        assert_eq!(
            StubName::parse("backend\\views\\index.blade").unwrap().as_str(),
            "backend/views/index.blade"
        );
        assert!(StubName::parse("").is_err());
        assert!(StubName::parse("/abs").is_err());
        assert!(StubName::parse("a/../b").is_err());
        assert!(StubName::parse("a//b").is_err());
    }

    #[test]
    fn stub_name_file_name() {
        assert_eq!(StubName::new("type/config").file_name(), "type/config.stub");
    }

    #[test]
    #[should_panic]
    fn stub_name_new_panics_on_invalid() {
        StubName::new("../escape");
    }
}
