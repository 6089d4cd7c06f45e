mod action;
mod auth;
mod common;
mod recipe;
mod strategy;

pub use action::{Action, HttpVerb};
pub use auth::{AuthConfig, AuthConfigDoc, AuthConfigError, AuthStrategy, CustomToTokenConfig, OAuthConfig};
pub use common::{AnyValue, JsonPathExpression, Variables};
pub use recipe::Recipe;
pub use strategy::{Strategy, UnknownStrategy};
