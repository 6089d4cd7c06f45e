mod rules;
mod validator;

use crate::error::{ValidationError, Violation};
use crate::types::Recipe;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for Recipe {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_recipe(self)
    }
}

pub fn validate_recipe(recipe: &Recipe) -> Result<(), ValidationError> {
    let mut v = Validator::default();
    v.validate_recipe(recipe);
    v.finish()
}

/// Findings that do not fail validation because the engine tolerates them: an undeclared
/// `authMapRef` sends the request without credentials, an empty `payloadTemplate` sends an
/// empty body.
pub fn recipe_warnings(recipe: &Recipe) -> Vec<Violation> {
    let mut v = Validator::default();
    v.validate_recipe(recipe);
    v.into_warnings()
}
