use crate::expressions::is_identifier;
use crate::types::{Action, Strategy};
use crate::validate::validator::Validator;

pub(crate) fn validate_action(v: &mut Validator, a: &Action, path: &str) {
    v.validate_http_url(&format!("{path}.endpoint"), &a.endpoint);

    if a.strategy.requires_find_expr() && a.find_expr().trim().is_empty() {
        v.push(
            format!("{path}.findByJsonPathExpr"),
            format!("strategy {} requires findByJsonPathExpr", a.strategy),
        );
    }

    // Every strategy ends up writing with the primary payload on some branch.
    if a.payload_template.trim().is_empty() {
        v.warn(
            format!("{path}.payloadTemplate"),
            format!("strategy {} will send an empty body", a.strategy),
        );
    } else {
        v.validate_template(&format!("{path}.payloadTemplate"), &a.payload_template);
    }

    if a.strategy == Strategy::FindPatchPost {
        match a.patch_payload_template.as_deref() {
            Some(p) if !p.trim().is_empty() => {
                v.validate_template(&format!("{path}.patchPayloadTemplate"), p);
            }
            _ => v.push(
                format!("{path}.patchPayloadTemplate"),
                "strategy FIND/PATCH/POST requires patchPayloadTemplate",
            ),
        }
    }

    let suffixes = [
        ("getEndpointSuffix", &a.get_endpoint_suffix),
        ("postEndpointSuffix", &a.post_endpoint_suffix),
        ("putEndpointSuffix", &a.put_endpoint_suffix),
        ("patchEndpointSuffix", &a.patch_endpoint_suffix),
        ("deleteEndpointSuffix", &a.delete_endpoint_suffix),
    ];
    for (field, suffix) in suffixes {
        if let Some(s) = suffix {
            v.validate_template(&format!("{path}.{field}"), s);
        }
    }

    for (name, expr) in &a.runtime_vars {
        if !is_identifier(name) {
            v.push(
                format!("{path}.runtimeVars.{name}"),
                "runtime variable names must be identifiers ([A-Za-z_][A-Za-z0-9_]*)",
            );
        }
        if expr.trim().is_empty() {
            v.push(format!("{path}.runtimeVars.{name}"), "JSONPath expression must not be empty");
        }
    }
}
