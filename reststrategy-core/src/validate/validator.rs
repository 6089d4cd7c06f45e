use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::expressions::parse_template;
use crate::types::Recipe;

use super::rules;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid"));

/// Collects every violation in a recipe instead of stopping at the first. Warnings are
/// findings the engine copes with at run time and never fail validation.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    violations: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl Validator {
    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<Violation> {
        self.warnings
    }

    pub(crate) fn validate_recipe(&mut self, recipe: &Recipe) {
        rules::recipe::validate_recipe(self, recipe);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Violation::new(path, message));
    }

    pub(crate) fn validate_name(&mut self, path: &str, name: &str) {
        if !NAME_RE.is_match(name) {
            self.push(path, "name must match ^[A-Za-z0-9_.\\-]+$");
        }
    }

    pub(crate) fn validate_http_url(&mut self, path: &str, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            self.push(path, "must not be empty");
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            self.push(path, "must be an http:// or https:// URL");
        }
    }

    pub(crate) fn validate_template(&mut self, path: &str, template: &str) {
        if let Err(e) = parse_template(template) {
            self.push(path, e.to_string());
        }
    }
}
