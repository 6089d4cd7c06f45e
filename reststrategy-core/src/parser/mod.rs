use crate::error::{ParseError, RecipeError};
use crate::types::Recipe;
use crate::validate::validate_recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedRecipe {
    pub recipe: Recipe,
    pub format: RecipeFormat,
}

/// Decode a recipe document.
///
/// Both `auth` and `seed` keep the order in which they appear in the document, which is the
/// order the engine later runs actions in.
pub fn parse_recipe_str(input: &str, format: RecipeFormat) -> Result<ParsedRecipe, ParseError> {
    match format {
        RecipeFormat::Json => Ok(ParsedRecipe {
            recipe: serde_json::from_str::<Recipe>(input)?,
            format,
        }),
        RecipeFormat::Yaml => Ok(ParsedRecipe {
            recipe: serde_yaml::from_str::<Recipe>(input)?,
            format,
        }),
        RecipeFormat::Auto => parse_recipe_auto(input),
    }
}

fn parse_recipe_auto(input: &str) -> Result<ParsedRecipe, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<Recipe>(input) {
            Ok(recipe) => Ok(ParsedRecipe {
                recipe,
                format: RecipeFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<Recipe>(input) {
                Ok(recipe) => Ok(ParsedRecipe {
                    recipe,
                    format: RecipeFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<Recipe>(input) {
        Ok(recipe) => Ok(ParsedRecipe {
            recipe,
            format: RecipeFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(recipe) = serde_json::from_str::<Recipe>(input) {
                return Ok(ParsedRecipe {
                    recipe,
                    format: RecipeFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}

/// Parse and validate in one step; what the engine should be handed.
pub fn load_recipe_str(input: &str, format: RecipeFormat) -> Result<ParsedRecipe, RecipeError> {
    let parsed = parse_recipe_str(input, format)?;
    validate_recipe(&parsed.recipe)?;
    Ok(parsed)
}
