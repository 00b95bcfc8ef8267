use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Operator input that was empty or whitespace-only. Never reaches the network.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Texto não pode estar vazio!")]
pub struct RejectedInput;

/// Text approved for dispatch together with the label shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingRequest {
    text: String,
    source_label: String,
}

#[derive(Serialize)]
struct ProcessBody<'a> {
    text: &'a str,
}

impl ProcessingRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// JSON payload for `POST /process`.
    pub fn json_body(&self) -> Vec<u8> {
        // Serializing a struct holding a single &str cannot fail.
        serde_json::to_vec(&ProcessBody { text: &self.text }).unwrap_or_default()
    }
}

/// Validates operator input. The text itself is kept exactly as given.
pub fn build(
    text: impl Into<String>,
    source_label: impl Into<String>,
) -> Result<ProcessingRequest, RejectedInput> {
    let text = text.into();
    if text.trim().is_empty() {
        return Err(RejectedInput);
    }
    Ok(ProcessingRequest {
        text,
        source_label: source_label.into(),
    })
}

/// Label for text typed or pasted by the operator.
pub fn text_source_label(text: &str) -> String {
    format!("Texto ({} caracteres)", text.chars().count())
}

/// Label for text loaded from a file; only the file name is shown.
pub fn file_source_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Arquivo: {name}")
}
