use std::collections::BTreeMap;

use reststrategy_core::types::Variables;
use reststrategy_exec::executor::eval::{merge_vars, render, render_with};
use reststrategy_exec::RuntimeVars;
use serde_json::json;

fn vars(pairs: &[(&str, serde_json::Value)]) -> BTreeMap<String, serde_json::Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn text_without_placeholders_is_returned_unchanged() {
    let tpl = r#"{"name":"plain","cost":"$1","esc":"$$"}"#;
    assert_eq!(render_with(tpl, &BTreeMap::new(), no_env).unwrap(), tpl);
}

#[test]
fn both_placeholder_spellings_are_substituted() {
    let v = vars(&[("a", json!("x")), ("b", json!("y"))]);
    assert_eq!(render_with("$a-${b}", &v, no_env).unwrap(), "x-y");
}

#[test]
fn values_render_by_type() {
    let v = vars(&[
        ("s", json!("str")),
        ("n", json!(1.5)),
        ("b", json!(true)),
        ("z", json!(null)),
        ("o", json!({"k": [1, 2]})),
    ]);
    assert_eq!(
        render_with("${s}|${n}|${b}|${z}|${o}", &v, no_env).unwrap(),
        r#"str|1.5|true||{"k":[1,2]}"#
    );
}

#[test]
fn unknown_names_fall_back_to_environment_then_empty() {
    let env = |name: &str| (name == "HOME_DIR").then(|| "/home/me".to_string());
    assert_eq!(
        render_with("${HOME_DIR}:${NOT_SET}:end", &BTreeMap::new(), env).unwrap(),
        "/home/me::end"
    );
}

#[test]
fn variables_shadow_environment() {
    let v = vars(&[("HOME_DIR", json!("mine"))]);
    let env = |_: &str| Some("env".to_string());
    assert_eq!(render_with("$HOME_DIR", &v, env).unwrap(), "mine");
}

#[test]
fn digit_led_names_are_literal() {
    let v = vars(&[("1", json!("nope"))]);
    assert_eq!(render_with("$1 ${1}", &v, no_env).unwrap(), "$1 ${1}");
}

#[test]
fn unclosed_placeholder_returns_partial_rendering() {
    let v = vars(&[("a", json!("x"))]);
    let err = render_with("${a} then ${b", &v, no_env).unwrap_err();
    assert_eq!(err.partial, "x then ${b");
}

#[test]
fn runtime_values_override_action_variables() {
    let mut action_vars = Variables::new();
    action_vars.insert("id".to_string(), json!("from-action"));
    action_vars.insert("other".to_string(), json!("kept"));

    let runtime = RuntimeVars::new();
    runtime.set("id", json!("from-runtime"));

    let merged = merge_vars(&action_vars, &runtime);
    assert_eq!(merged["id"], json!("from-runtime"));
    assert_eq!(merged["other"], json!("kept"));

    assert_eq!(
        render("${id}/${other}", &action_vars, &runtime).unwrap(),
        "from-runtime/kept"
    );
}

#[test]
fn empty_variable_map_renders_placeholders_empty() {
    let rendered = render(
        "[${reststrategy_test_surely_unset_var}]",
        &Variables::new(),
        &RuntimeVars::new(),
    )
    .unwrap();
    assert_eq!(rendered, "[]");
}
