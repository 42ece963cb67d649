//! Literal placeholder substitution.
//!
//! Templates are plain text. A placeholder is a key wrapped in dollar signs
//! (`$NAME$`); every occurrence is replaced verbatim. There are no
//! conditionals, loops or filters.
//!
//! A second, separate pass rewrites root-relative import markers (`'~/…'`)
//! into paths relative to the generated file. See [`rewrite_root_imports`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Key substituted with the PascalCase module identifier.
pub const NAME_KEY: &str = "NAME";

/// Prefix that marks an import path as relative to the source root.
pub const ROOT_MARKER: &str = "~/";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+)\$").expect("valid placeholder pattern"));

static ROOT_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(['"`])~/"#).expect("valid root marker pattern"));

/// Values for `$KEY$` placeholders.
///
/// Immutable after creation; `with_variable` returns a new context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a module stub: `$NAME$` → `identifier`.
    pub fn for_module(identifier: impl Into<String>) -> Self {
        Self::new().with_variable(NAME_KEY, identifier)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Replace every `$KEY$` occurrence in one pass over `template`.
    ///
    /// Unknown placeholders stay as they are. Substituted values are never
    /// scanned again, so a value may itself contain `$KEY$` text.
    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                match self.variables.get(&caps[1]) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Render a module template: every `$NAME$` becomes `identifier`.
pub fn render(template: &str, identifier: &str) -> String {
    RenderContext::for_module(identifier).render(template)
}

/// Replace the `~/` of every quoted import path with `prefix`.
///
/// Only markers directly after a quote (`'`, `"` or a backtick) are rewritten,
/// so a `~/` in a comment or in prose is left alone. `prefix` is expected to
/// end in `/` (see [`crate::domain::paths::import_prefix`]).
pub fn rewrite_root_imports(text: &str, prefix: &str) -> String {
    ROOT_IMPORT
        .replace_all(text, |caps: &Captures<'_>| format!("{}{prefix}", &caps[1]))
        .into_owned()
}
