use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::config::client::ClientConfig;
use shared::models::{
    ApiError, AuthResponse, Campaign, CampaignRequest, ChatReply, ChatRequest, CompetitorAnalysis,
    CompetitorRequest, Endpoint, HealthResponse, LoginRequest, RegisterRequest, RegisterResponse,
    RevenueRequest, RevenueSimulation,
};
use tracing::{debug, warn};

const USER_AGENT: &str = "marketmind-client";

/// Every backend operation the view layer depends on.
///
/// [`ApiClient`] is the HTTP implementation; controllers and the health
/// monitor only see this trait.
#[async_trait]
pub trait MarketMindApi: Send + Sync {
    async fn analyze_competitor(
        &self,
        request: &CompetitorRequest,
    ) -> Result<CompetitorAnalysis, ApiError>;

    async fn simulate_revenue(&self, request: &RevenueRequest)
    -> Result<RevenueSimulation, ApiError>;

    async fn generate_campaign(&self, request: &CampaignRequest) -> Result<Campaign, ApiError>;

    async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError>;

    /// Liveness probe. Never fails: any error reads as offline.
    async fn check_health(&self) -> bool;
}

/// HTTP client for the MarketMind backend.
///
/// Stateless between calls: no retries, no cookies, no auth header.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    health_url: String,
    client: Client,
}

impl ApiClient {
    /// Builds a client from the loaded configuration.
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::with_client(
            client,
            &config.api_base_url,
            &config.health_url,
        ))
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, health_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            health_url: health_url.to_string(),
            client,
        }
    }

    /// Base URL endpoint paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends `payload` to `endpoint` and decodes the reply.
    ///
    /// # Errors
    /// - [`ApiError::unreachable`] when no response arrives.
    /// - An application error carrying the body's `detail` verbatim when the
    ///   backend answers with a non-2xx status.
    /// - An application error carrying the body's `error` text when a 2xx body
    ///   reports a failure that way.
    /// - An application error with the endpoint's fallback message when a 2xx
    ///   body does not decode.
    pub async fn call<B, R>(&self, endpoint: Endpoint, payload: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.api_url(endpoint.path());
        let response = match self.client.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = %endpoint, error = %err, "backend unreachable");
                return Err(ApiError::unreachable());
            }
        };

        let status = response.status();
        debug!(endpoint = %endpoint, status = status.as_u16(), "received response");

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!(endpoint = %endpoint, error = %err, "failed to read response body");
                return Err(ApiError::application(endpoint.fallback_detail()));
            }
        };

        if !status.is_success() {
            return Err(ApiError::application(rejection_detail(endpoint, &body)));
        }

        if let Some(detail) = reported_error(&body) {
            debug!(endpoint = %endpoint, detail = %detail, "backend reported an error");
            return Err(ApiError::application(detail));
        }

        serde_json::from_slice(&body).map_err(|err| {
            warn!(endpoint = %endpoint, error = %err, "unexpected response body");
            ApiError::application(endpoint.fallback_detail())
        })
    }

    /// Probes the backend root; `true` only for a 2xx `{"status": "active"}`.
    pub async fn check_health(&self) -> bool {
        let response = match self.client.get(&self.health_url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "health probe failed");
                return false;
            }
        };

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "health probe rejected");
            return false;
        }

        match response.json::<HealthResponse>().await {
            Ok(body) => body.is_active(),
            Err(err) => {
                debug!(error = %err, "health probe returned an unexpected body");
                false
            }
        }
    }
}

/// The `error` text of a successful response that reports a failure in its body.
fn reported_error(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(mut map) => match map.remove("error")? {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        },
        _ => None,
    }
}

/// Extracts the message to show for a rejected request.
///
/// A string `detail` passes through untouched. Any other `detail` value (for
/// example a list of field errors) is shown as compact JSON. Without one, the
/// endpoint's fallback message is used.
fn rejection_detail(endpoint: Endpoint, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| match value {
            Value::Object(mut map) => map.remove("detail"),
            _ => None,
        });

    match detail {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => endpoint.fallback_detail().to_string(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl MarketMindApi for ApiClient {
    async fn analyze_competitor(
        &self,
        request: &CompetitorRequest,
    ) -> Result<CompetitorAnalysis, ApiError> {
        self.call(Endpoint::CompetitorAnalyze, request).await
    }

    async fn simulate_revenue(
        &self,
        request: &RevenueRequest,
    ) -> Result<RevenueSimulation, ApiError> {
        self.call(Endpoint::RevenueSimulate, request).await
    }

    async fn generate_campaign(&self, request: &CampaignRequest) -> Result<Campaign, ApiError> {
        self.call(Endpoint::CampaignGenerate, request).await
    }

    async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.call(Endpoint::ChatSend, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.call(Endpoint::Login, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.call(Endpoint::Register, request).await
    }

    async fn check_health(&self) -> bool {
        ApiClient::check_health(self).await
    }
}
