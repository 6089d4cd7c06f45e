pub(crate) mod action;
pub(crate) mod auth;
pub(crate) mod recipe;
