#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const CLIENT_TOKEN: &str = "/bulk/v1/clienttoken";
pub const GET_DID: &str = "/bulk/v1/getdid";
pub const ISSUER_REGISTER: &str = "/bulk/v1/issuerregister";
pub const ISSUER_TOKEN: &str = "/bulk/v1/issuertoken";
pub const UPLOAD_ENROLLMENT: &str = "/bulk/v1/uploadFiles/proofOfEnrollment";
pub const UPLOAD_ASSESSMENT: &str = "/bulk/v1/uploadFiles/proofOfAssessment";

pub const DEFAULT_PASSWORD: &str = "Pass@1234";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct ServiceState {
    routes: Arc<HashMap<String, (u16, Value)>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Records the request, then answers with the canned reply for its path.
async fn record_and_reply(
    State(state): State<ServiceState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().expect("request log").push(Recorded {
        path: path.clone(),
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, payload) = state
        .routes
        .get(&path)
        .cloned()
        .unwrap_or((404, json!({"error": "not found"})));
    (
        StatusCode::from_u16(status).expect("canned status"),
        Json(payload),
    )
}

/// Local axum service with one canned reply per path.
pub struct FakeService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeService {
    /// All six endpoints succeed with `CTOK` / `ITOK` / `did:example:123`.
    pub fn happy() -> Self {
        Self::with_overrides(&[])
    }

    pub fn with_overrides(overrides: &[(&str, u16, Value)]) -> Self {
        let mut routes: HashMap<String, (u16, Value)> = HashMap::new();
        routes.insert(CLIENT_TOKEN.to_string(), (200, json!({"result": "CTOK"})));
        routes.insert(GET_DID.to_string(), (200, json!({"result": "did:example:123"})));
        routes.insert(
            ISSUER_REGISTER.to_string(),
            (200, json!({"success": true, "message": "issuer registered"})),
        );
        routes.insert(ISSUER_TOKEN.to_string(), (200, json!({"result": "ITOK"})));
        routes.insert(
            UPLOAD_ENROLLMENT.to_string(),
            (200, json!({"success": true, "message": "enrollment queued"})),
        );
        routes.insert(
            UPLOAD_ASSESSMENT.to_string(),
            (200, json!({"success": true, "message": "assessment queued"})),
        );
        for (path, status, body) in overrides {
            routes.insert(path.to_string(), (*status, body.clone()));
        }

        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(ServiceState {
                routes: Arc::new(routes),
                requests: Arc::clone(&requests),
            });

        // Bound before the server thread starts so the port is ready on return.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake service");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("fake service addr");
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake service runtime");
            runtime.block_on(async move {
                let listener = TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("fake service");
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

/// Base URL on which nothing is listening.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}", addr)
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub out_dir: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let out_dir = tmp.path().join("out");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            out_dir,
            cargo_home,
            rustup_home,
        }
    }

    /// Bare command: isolated home/cwd, no proxy and no inherited `BULK_*`.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("bulk-issuance");
        cmd.current_dir(&self.home)
            .env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove("HTTP_PROXY")
            .env_remove("HTTPS_PROXY")
            .env_remove("ALL_PROXY")
            .env_remove("http_proxy")
            .env_remove("https_proxy")
            .env_remove("all_proxy");
        for (key, _) in std::env::vars() {
            if key.starts_with("BULK_") {
                cmd.env_remove(key);
            }
        }
        cmd
    }

    /// Command configured entirely through the environment against `base_url`.
    pub fn run_cmd(&self, base_url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("BULK_BASE_URL", base_url)
            .env("BULK_CLIENT_USERNAME", "client-user")
            .env("BULK_DEFAULT_PASSWORD", DEFAULT_PASSWORD)
            .env("BULK_WALLET_URL", "https://wallet.example.org")
            .env("BULK_VERIFICATION_URL", "https://verify.example.org")
            .env("BULK_OUT_DIR", &self.out_dir)
            .env("BULK_SEED", "7");
        cmd
    }

    pub fn run_json(&self, base_url: &str) -> Value {
        let out = self
            .run_cmd(base_url)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, base_url: &str) -> Value {
        let out = self
            .run_cmd(base_url)
            .arg("--json")
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    pub fn out_files(&self) -> Vec<PathBuf> {
        files_in(&self.out_dir)
    }
}

pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => vec![],
    }
}
