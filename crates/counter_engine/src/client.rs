use std::time::Duration;

use counter_core::{ProcessingRequest, ServerEndpoint};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use crate::{EngineError, EngineEvent, HttpExchange, TransportError, TransportErrorKind};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub process_timeout: Duration,
    pub health_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            process_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
            user_agent: concat!("counter-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Receives the single terminal event of each dispatch.
pub(crate) trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub(crate) struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub(crate) fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// One attempt per call, no retries. Failures are reported inside the
/// returned exchange rather than as errors.
#[async_trait::async_trait]
pub trait ServiceClient: Send + Sync {
    async fn process(&self, endpoint: &ServerEndpoint, request: &ProcessingRequest)
        -> HttpExchange;

    async fn health(&self, endpoint: &ServerEndpoint) -> HttpExchange;
}

#[derive(Debug, Clone)]
pub struct ReqwestServiceClient {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl ReqwestServiceClient {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| EngineError::ClientBuild(err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn finish(response: Result<reqwest::Response, reqwest::Error>) -> HttpExchange {
        let response = match response {
            Ok(response) => response,
            Err(err) => return HttpExchange::Transport(map_send_error(&err)),
        };
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => HttpExchange::Response { status, body },
            Err(err) => HttpExchange::Transport(map_body_error(&err)),
        }
    }
}

#[async_trait::async_trait]
impl ServiceClient for ReqwestServiceClient {
    async fn process(
        &self,
        endpoint: &ServerEndpoint,
        request: &ProcessingRequest,
    ) -> HttpExchange {
        let response = self
            .client
            .post(endpoint.process_url())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .timeout(self.settings.process_timeout)
            .body(request.json_body())
            .send()
            .await;
        Self::finish(response).await
    }

    async fn health(&self, endpoint: &ServerEndpoint) -> HttpExchange {
        let response = self
            .client
            .get(endpoint.health_url())
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .timeout(self.settings.health_timeout)
            .send()
            .await;
        Self::finish(response).await
    }
}

/// Errors before any response arrived are connection problems unless the
/// deadline fired first.
fn map_send_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, describe(err));
    }
    TransportError::new(TransportErrorKind::Connect, describe(err))
}

fn map_body_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, describe(err));
    }
    TransportError::new(TransportErrorKind::Other, describe(err))
}

/// reqwest keeps the useful part ("connection refused") in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
