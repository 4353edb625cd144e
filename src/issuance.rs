use crate::domain::constants::{
    CLIENT_TOKEN_PATH, GET_DID_PATH, ISSUER_REGISTER_PATH, ISSUER_TOKEN_PATH,
};
use crate::domain::models::{ClientToken, CredentialKind, IssuerIdentity, IssuerToken};
use crate::error::IssuanceError;
use reqwest::blocking::multipart::{Form, Part};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

/// One multipart submission to an upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub kind: CredentialKind,
    pub csv_path: PathBuf,
    pub issuer_detail: Value,
    pub vc_data: Value,
    pub credential_subject_common: Value,
}

/// Remote bulk issuance service. Each call yields its parsed success value or
/// a transport/application failure.
pub trait IssuanceApi {
    fn client_token(&self, username: &str, password: &str) -> Result<ClientToken, IssuanceError>;

    fn get_did(&self, unique_text: &str) -> Result<String, IssuanceError>;

    fn register_issuer(
        &self,
        token: &ClientToken,
        issuer: &IssuerIdentity,
    ) -> Result<Value, IssuanceError>;

    fn issuer_token(&self, username: &str, password: &str) -> Result<IssuerToken, IssuanceError>;

    fn upload_files(
        &self,
        token: &IssuerToken,
        request: &UploadRequest,
    ) -> Result<Value, IssuanceError>;
}

pub struct HttpIssuanceApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpIssuanceApi {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, IssuanceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_json(
        &self,
        path: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<Value, IssuanceError> {
        tracing::debug!(path, "POST");
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        read_response(req.send()?)
    }
}

impl IssuanceApi for HttpIssuanceApi {
    fn client_token(&self, username: &str, password: &str) -> Result<ClientToken, IssuanceError> {
        let payload = self.post_json(
            CLIENT_TOKEN_PATH,
            &json!({"username": username, "password": password}),
            None,
        )?;
        result_string(payload).map(ClientToken)
    }

    fn get_did(&self, unique_text: &str) -> Result<String, IssuanceError> {
        let payload = self.post_json(GET_DID_PATH, &json!({"uniquetext": unique_text}), None)?;
        result_string(payload)
    }

    fn register_issuer(
        &self,
        token: &ClientToken,
        issuer: &IssuerIdentity,
    ) -> Result<Value, IssuanceError> {
        let body = json!({
            "name": issuer.name,
            "did": issuer.did,
            "email": issuer.email,
            "mobile": issuer.mobile,
            "userid": issuer.issuer_id,
        });
        self.post_json(ISSUER_REGISTER_PATH, &body, Some(token.as_str()))
    }

    fn issuer_token(&self, username: &str, password: &str) -> Result<IssuerToken, IssuanceError> {
        let payload = self.post_json(
            ISSUER_TOKEN_PATH,
            &json!({"username": username, "password": password}),
            None,
        )?;
        result_string(payload).map(IssuerToken)
    }

    fn upload_files(
        &self,
        token: &IssuerToken,
        request: &UploadRequest,
    ) -> Result<Value, IssuanceError> {
        let path = request.kind.upload_path();
        tracing::debug!(path = %path, file = %request.csv_path.display(), "POST multipart");
        let csv = Part::file(&request.csv_path)?.mime_str("text/csv")?;
        let form = Form::new()
            .part("csvfile", csv)
            .text("issuerDetail", request.issuer_detail.to_string())
            .text("vcData", request.vc_data.to_string())
            .text(
                "credentialSubjectCommon",
                request.credential_subject_common.to_string(),
            );
        let resp = self
            .client
            .post(self.url(&path))
            .bearer_auth(token.as_str())
            .multipart(form)
            .send()?;
        read_response(resp)
    }
}

fn read_response(resp: reqwest::blocking::Response) -> Result<Value, IssuanceError> {
    let status = resp.status().as_u16();
    let text = resp.text()?;
    tracing::debug!(status, body = %text, "response");
    classify_response(status, parse_body(&text))
}

/// Non-JSON bodies are kept verbatim as a JSON string.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// An explicit `success: false` or an `error` key fails the call whatever the
/// HTTP status; otherwise any non-2xx status fails it.
pub fn classify_response(status: u16, payload: Value) -> Result<Value, IssuanceError> {
    let flagged = payload.get("success").and_then(Value::as_bool) == Some(false)
        || payload.get("error").is_some();
    if flagged || !(200..300).contains(&status) {
        return Err(IssuanceError::Application {
            status: Some(status),
            payload,
        });
    }
    Ok(payload)
}

/// Token and DID endpoints answer `{"result": "<value>"}`.
pub fn result_string(payload: Value) -> Result<String, IssuanceError> {
    match payload.get("result").and_then(Value::as_str) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(IssuanceError::Application {
            status: None,
            payload,
        }),
    }
}
