use std::path::Path;

use reststrategy_core::{parse_recipe_str, recipe_warnings, validate_recipe, RecipeFormat};
use serde::Serialize;

use crate::cmd::{read_recipe, report_parse_error};
use crate::exit_codes;
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    actions: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let content = match read_recipe(path, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let parsed = match parse_recipe_str(&content, RecipeFormat::Auto) {
        Ok(p) => p,
        Err(e) => return report_parse_error(&output, &e),
    };

    let mut result = ValidateResult {
        valid: true,
        format: format!("{:?}", parsed.format),
        actions: parsed.recipe.seed.len(),
        errors: vec![],
        warnings: recipe_warnings(&parsed.recipe)
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    if output.is_human() {
        for w in &result.warnings {
            eprintln!("warning: {w}");
        }
    }

    match validate_recipe(&parsed.recipe) {
        Ok(()) => {
            if output.is_human() {
                println!(
                    "ok: valid recipe ({:?}, {} actions)",
                    parsed.format, result.actions
                );
            } else {
                output.emit(&result);
            }
            exit_codes::SUCCESS
        }
        Err(err) => {
            result.valid = false;
            result.errors = err
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.path, v.message))
                .collect();
            if output.is_human() {
                eprintln!("error: validation failed");
                for e in &result.errors {
                    eprintln!("- {e}");
                }
            } else {
                output.emit(&result);
            }
            exit_codes::VALIDATION_FAILED
        }
    }
}
