use assert_cmd::Command;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    std::io::Write::write_all(&mut f, contents.as_bytes()).expect("write");
    f
}

#[test]
fn validate_command_returns_0_for_valid_recipe() {
    let recipe = r#"
auth:
  basic: { type: BasicAuth, username: u, password: p }
seed:
  widget:
    strategy: FIND/PUT/POST
    endpoint: https://api.example/widgets
    findByJsonPathExpr: "$.items[?(@.name=='foo')].id"
    payloadTemplate: '{"name":"foo"}'
    authMapRef: basic
"#;
    let f = write_temp(recipe);

    let bin = assert_cmd::cargo::cargo_bin!("reststrategy");
    let out = Command::new(bin)
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.contains("ok: valid recipe"), "{stdout}");
}

#[test]
fn validate_command_returns_2_for_invalid_recipe() {
    let recipe = r#"
seed:
  widget:
    strategy: FIND/POST
    endpoint: ftp://api.example/widgets
    payloadTemplate: "{}"
"#;
    let f = write_temp(recipe);

    let bin = assert_cmd::cargo::cargo_bin!("reststrategy");
    Command::new(bin)
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .code(2); // VALIDATION_FAILED
}

#[test]
fn validate_command_outputs_json_violations() {
    let recipe = r#"
seed:
  widget:
    strategy: FIND/PATCH/POST
    endpoint: http://h
    findByJsonPathExpr: $.id
    payloadTemplate: "{}"
"#;
    let f = write_temp(recipe);

    let bin = assert_cmd::cargo::cargo_bin!("reststrategy");
    let out = Command::new(bin)
        .args([
            "validate",
            f.path().to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).expect("json output");
    assert_eq!(v["valid"], false);
    assert_eq!(v["actions"], 1);
    assert!(v["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("seed.widget.patchPayloadTemplate"));
}

#[test]
fn undeclared_auth_ref_is_reported_as_warning() {
    let recipe = r#"
seed:
  widget:
    strategy: POST
    endpoint: http://h/widgets
    authMapRef: missing
"#;
    let f = write_temp(recipe);

    let bin = assert_cmd::cargo::cargo_bin!("reststrategy");
    let out = Command::new(bin)
        .args([
            "validate",
            f.path().to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).expect("json output");
    assert_eq!(v["valid"], true);
    let warnings = v["warnings"].as_array().expect("warnings");
    assert_eq!(warnings.len(), 2);
    assert!(warnings[1]
        .as_str()
        .unwrap()
        .starts_with("seed.widget.authMapRef"));
}

#[test]
fn unknown_strategy_is_rejected_at_parse_time() {
    let recipe = r#"
seed:
  widget:
    strategy: FIND/DELETE
    endpoint: http://h
"#;
    let f = write_temp(recipe);

    let bin = assert_cmd::cargo::cargo_bin!("reststrategy");
    Command::new(bin)
        .args(["validate", f.path().to_string_lossy().as_ref()])
        .assert()
        .code(2);
}

#[test]
fn missing_file_is_a_runtime_error() {
    let bin = assert_cmd::cargo::cargo_bin!("reststrategy");
    Command::new(bin)
        .args(["validate", "/definitely/not/here.yaml"])
        .assert()
        .code(4);
}
