mod common;

use common::{FakeService, TestEnv, UPLOAD_ENROLLMENT};
use jsonschema::JSONSchema;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).expect("read schema");
    serde_json::from_str(&raw).expect("schema is json")
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn run_output_matches_contract() {
    let env = TestEnv::new();
    let service = FakeService::happy();
    let out = env.run_json(&service.base_url);
    validate("run_report.schema.json", &out);
}

#[test]
fn stage_failure_matches_contract() {
    let env = TestEnv::new();
    let service =
        FakeService::with_overrides(&[(UPLOAD_ENROLLMENT, 422, json!({"error": "bad csv"}))]);
    let out = env.run_json_failure(&service.base_url);
    validate("error.schema.json", &out);
    assert_eq!(out["error"]["code"], "S7_FAILED");
}

#[test]
fn config_failure_matches_contract() {
    let env = TestEnv::new();
    let profile = env.home.join("profile.toml");
    fs::write(&profile, "[credential]\nvalidity_days = \"soon\"\n").expect("write profile");

    let out = env
        .run_cmd("http://127.0.0.1:9")
        .env("BULK_PROFILE", &profile)
        .args(["--json", "run"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let v: Value = serde_json::from_slice(&out).expect("error json");
    validate("error.schema.json", &v);
    assert_eq!(v["error"]["stage"], "load_config");
}

#[test]
fn generate_output_matches_contract() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .args(["--json", "generate", "--count", "3", "--out-dir"])
        .arg(&env.out_dir)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: Value = serde_json::from_slice(&out).expect("json output");
    validate("artifacts.schema.json", &v);
}
