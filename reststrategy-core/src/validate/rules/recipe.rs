use crate::types::Recipe;
use crate::validate::rules::{action, auth};
use crate::validate::validator::Validator;

pub(crate) fn validate_recipe(v: &mut Validator, recipe: &Recipe) {
    for (name, cfg) in &recipe.auth {
        let path = format!("auth.{name}");
        v.validate_name(&path, name);
        auth::validate_auth(v, cfg, &path);
    }

    for (name, a) in &recipe.seed {
        let path = format!("seed.{name}");
        v.validate_name(&path, name);
        action::validate_action(v, a, &path);

        if !a.auth_map_ref.is_empty() && !recipe.auth.contains_key(&a.auth_map_ref) {
            v.warn(
                format!("{path}.authMapRef"),
                format!(
                    "references undeclared auth config {}; requests go out without credentials",
                    a.auth_map_ref
                ),
            );
        }
    }
}
