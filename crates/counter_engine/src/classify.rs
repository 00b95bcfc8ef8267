//! Interprets raw HTTP exchanges into typed outcomes.
//!
//! Both functions are total: every exchange maps to exactly one outcome and
//! nothing here can fail or panic.

use counter_core::{FailureCategory, HealthOutcome, Outcome, ProcessingFailure, ProcessingStats};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{HttpExchange, TransportError, TransportErrorKind};

pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";

/// Body of `POST /process`. Missing or `null` fields fall back to their
/// defaults; a field of the wrong type is a parse failure.
#[derive(Debug, Deserialize)]
struct ProcessResponse {
    #[serde(default, deserialize_with = "truthy")]
    success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    letters_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    numbers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    total_characters: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    processing_time_ms: f64,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `false`, `null`, `0`, `""`, `[]` and `{}` are falsy; everything else is truthy.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}

pub fn classify(exchange: &HttpExchange) -> Outcome {
    match exchange {
        HttpExchange::Transport(err) => Outcome::Failure(transport_failure(err)),
        HttpExchange::Response { status: 200, body } => classify_body(body),
        HttpExchange::Response { status, body } => Outcome::Failure(ProcessingFailure::new(
            FailureCategory::HttpStatus,
            format!("HTTP {status}: {body}"),
        )),
    }
}

fn classify_body(body: &str) -> Outcome {
    let parsed: ProcessResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Outcome::Failure(
                ProcessingFailure::new(
                    FailureCategory::Unexpected,
                    format!("Erro ao analisar resposta JSON: {err}"),
                )
                .with_raw_body(body),
            );
        }
    };

    if parsed.success {
        Outcome::Success(ProcessingStats {
            letters_count: parsed.letters_count,
            numbers_count: parsed.numbers_count,
            total_characters: parsed.total_characters,
            processing_time_ms: parsed.processing_time_ms,
        })
    } else {
        let message = parsed
            .error_message
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        Outcome::Failure(
            ProcessingFailure::new(FailureCategory::Unexpected, message).with_raw_body(body),
        )
    }
}

fn transport_failure(err: &TransportError) -> ProcessingFailure {
    let (category, message) = match err.kind {
        TransportErrorKind::Connect => (
            FailureCategory::Connection,
            format!("Erro de conexão: {}", err.message),
        ),
        TransportErrorKind::Timeout => (
            FailureCategory::Timeout,
            format!(
                "Timeout: Servidor não respondeu em tempo hábil ({})",
                err.message
            ),
        ),
        TransportErrorKind::Other => (
            FailureCategory::Unexpected,
            format!("Erro inesperado: {}", err.message),
        ),
    };
    ProcessingFailure::new(category, message)
}

pub fn classify_health(exchange: &HttpExchange) -> HealthOutcome {
    match exchange {
        HttpExchange::Transport(err) => {
            let failure = transport_failure(err);
            HealthOutcome::Unreachable {
                category: failure.category,
                message: failure.message,
            }
        }
        HttpExchange::Response { status: 200, body } => HealthOutcome::Healthy {
            // Any 200 is healthy; the status field is informational only.
            service_status: serde_json::from_str::<HealthResponse>(body)
                .ok()
                .and_then(|health| health.status),
        },
        HttpExchange::Response { status, .. } => HealthOutcome::Unhealthy { status: *status },
    }
}
