use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Connection,
    HttpStatus,
    Timeout,
    Unexpected,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Connection => write!(f, "connection"),
            FailureCategory::HttpStatus => write!(f, "http status"),
            FailureCategory::Timeout => write!(f, "timeout"),
            FailureCategory::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Counts reported by the service. `letters_count + numbers_count` may exceed
/// `total_characters`; the service owns that guarantee, not this client.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingStats {
    pub letters_count: u64,
    pub numbers_count: u64,
    pub total_characters: u64,
    pub processing_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingFailure {
    pub category: FailureCategory,
    pub message: String,
    pub raw_body: Option<String>,
}

impl ProcessingFailure {
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            raw_body: None,
        }
    }

    pub fn with_raw_body(mut self, raw_body: impl Into<String>) -> Self {
        self.raw_body = Some(raw_body.into());
        self
    }
}

/// Terminal result of one processing dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(ProcessingStats),
    Failure(ProcessingFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Terminal result of one health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthOutcome {
    Healthy { service_status: Option<String> },
    Unhealthy { status: u16 },
    Unreachable {
        category: FailureCategory,
        message: String,
    },
}

impl HealthOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthOutcome::Healthy { .. })
    }
}
