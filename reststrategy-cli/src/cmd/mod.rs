pub mod execute;
pub mod validate;

use std::path::Path;

use reststrategy_core::ParseError;

use crate::exit_codes;
use crate::OutputArgs;

/// Read the recipe file; on failure the error is printed and the exit code returned.
pub(crate) fn read_recipe(path: &Path, output: &OutputArgs) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        output.fail(&format!("failed to read {}: {e}", path.display()));
        exit_codes::RUNTIME_ERROR
    })
}

pub(crate) fn report_parse_error(output: &OutputArgs, err: &ParseError) -> i32 {
    let message = match err {
        ParseError::Json(e) => format!("JSON parse failed: {e}"),
        ParseError::Yaml(e) => format!("YAML parse failed: {e}"),
    };
    output.fail(&message);
    exit_codes::VALIDATION_FAILED
}
