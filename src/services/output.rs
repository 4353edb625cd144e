use crate::domain::models::{JsonOut, Stage};
use crate::error::StageFailure;
use serde::Serialize;
use serde_json::{json, Value};

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", render(&data));
    }
    Ok(())
}

fn error_envelope(
    stage: Stage,
    kind: &str,
    message: String,
    detail: Value,
    registered_issuer: Option<&str>,
) -> Value {
    json!({
        "ok": false,
        "error": {
            "code": format!("{}_FAILED", stage.code()),
            "stage": stage,
            "kind": kind,
            "message": message,
            "detail": detail,
            "registered_issuer": registered_issuer,
        }
    })
}

pub fn failure_json(failure: &StageFailure) -> Value {
    error_envelope(
        failure.stage,
        failure.error.kind(),
        failure.to_string(),
        failure.error.detail(),
        failure.registered_issuer.as_deref(),
    )
}

/// Errors raised before any stage runs are reported against S0.
pub fn config_failure_json(error: &anyhow::Error) -> Value {
    error_envelope(
        Stage::LoadConfig,
        "config",
        error.to_string(),
        Value::String(format!("{:#}", error)),
        None,
    )
}

pub fn print_failure(json: bool, failure: &StageFailure) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&failure_json(failure))?);
    } else {
        eprintln!("error: {}", failure);
        eprintln!("detail: {}", failure.error.detail());
        if let Some(issuer) = &failure.registered_issuer {
            eprintln!(
                "note: issuer {} stays registered on the service; it is not cleaned up",
                issuer
            );
        }
    }
    Ok(())
}

pub fn print_config_failure(json: bool, error: &anyhow::Error) {
    if json {
        println!("{}", config_failure_json(error));
    } else {
        eprintln!("error: {:#}", error);
    }
}
