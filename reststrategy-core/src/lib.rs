#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::error::{ParseError, RecipeError, ValidationError, Violation};
pub use crate::parser::{load_recipe_str, parse_recipe_str, ParsedRecipe, RecipeFormat};
pub use crate::types::{
    Action, AuthConfig, AuthStrategy, CustomToTokenConfig, OAuthConfig, Recipe, Strategy,
};
pub use crate::validate::{recipe_warnings, validate_recipe, Validate};
