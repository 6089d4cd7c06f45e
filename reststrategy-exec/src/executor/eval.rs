use std::collections::BTreeMap;

use reststrategy_core::expressions::{parse_template_lenient, Segment, TemplateError};
use reststrategy_core::types::Variables;
use serde_json::Value as JsonValue;

use crate::executor::runtime_vars::RuntimeVars;

/// A placeholder problem; `partial` is the best-effort rendering that callers fall back to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{source}")]
pub struct RenderError {
    pub partial: String,
    #[source]
    pub source: TemplateError,
}

/// Render `template` with action variables overlaid by runtime variables, then the process
/// environment. Unknown names render as empty strings.
pub fn render(
    template: &str,
    action_vars: &Variables,
    runtime: &RuntimeVars,
) -> Result<String, RenderError> {
    let vars = merge_vars(action_vars, runtime);
    render_with(template, &vars, |name| std::env::var(name).ok())
}

pub fn merge_vars(action_vars: &Variables, runtime: &RuntimeVars) -> BTreeMap<String, JsonValue> {
    let mut merged: BTreeMap<String, JsonValue> = action_vars
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(runtime.snapshot());
    merged
}

pub fn render_with(
    template: &str,
    vars: &BTreeMap<String, JsonValue>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, RenderError> {
    if !template.contains('$') {
        return Ok(template.to_string());
    }

    let (tpl, err) = parse_template_lenient(template);
    let mut out = String::with_capacity(template.len());
    for seg in tpl.segments {
        match seg {
            Segment::Literal(l) => out.push_str(&l),
            Segment::Var(name) => match vars.get(&name) {
                Some(v) => out.push_str(&value_to_string(v)),
                None => out.push_str(&env(&name).unwrap_or_default()),
            },
        }
    }

    match err {
        None => Ok(out),
        Some(source) => Err(RenderError {
            partial: out,
            source,
        }),
    }
}

pub(crate) fn value_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
