//! Scripted [`MarketMindApi`] used by unit tests.

use crate::api::MarketMindApi;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::models::{
    ApiError, AuthResponse, Campaign, CampaignRequest, ChatReply, ChatRequest, CompetitorAnalysis,
    CompetitorRequest, Endpoint, LoginRequest, RegisterRequest, RegisterResponse, RevenueRequest,
    RevenueSimulation,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::watch;

/// Replies are queued per endpoint; an endpoint with nothing queued answers
/// with its fallback error. Health probes pop from their own queue and repeat
/// the last outcome once it is empty.
pub struct FakeApi {
    replies: Mutex<HashMap<Endpoint, VecDeque<Result<Value, ApiError>>>>,
    requests: Mutex<Vec<(Endpoint, Value)>>,
    probes: Mutex<VecDeque<bool>>,
    last_probe: AtomicBool,
    probe_count: AtomicUsize,
    open: watch::Sender<bool>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            replies: Mutex::default(),
            requests: Mutex::default(),
            probes: Mutex::default(),
            last_probe: AtomicBool::new(false),
            probe_count: AtomicUsize::new(0),
            open: watch::channel(true).0,
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, endpoint: Endpoint, body: impl Serialize) {
        let value = serde_json::to_value(body).expect("serializable reply");
        self.push(endpoint, Ok(value));
    }

    pub fn fail(&self, endpoint: Endpoint, error: ApiError) {
        self.push(endpoint, Err(error));
    }

    fn push(&self, endpoint: Endpoint, outcome: Result<Value, ApiError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(outcome);
    }

    pub fn probes(&self, outcomes: impl IntoIterator<Item = bool>) {
        self.probes.lock().unwrap().extend(outcomes);
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<(Endpoint, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(seen, _)| *seen == endpoint)
            .count()
    }

    /// Holds every endpoint call until [`FakeApi::release`].
    pub fn hold(&self) {
        self.open.send_replace(false);
    }

    pub fn release(&self) {
        self.open.send_replace(true);
    }

    async fn answer<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: &B,
    ) -> Result<R, ApiError> {
        let request = serde_json::to_value(request).expect("serializable request");
        self.requests.lock().unwrap().push((endpoint, request));

        let mut open = self.open.subscribe();
        open.wait_for(|open| *open).await.expect("fake api alive");

        let outcome = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);

        match outcome {
            Some(Ok(value)) => Ok(serde_json::from_value(value).expect("reply matches endpoint")),
            Some(Err(error)) => Err(error),
            None => Err(ApiError::application(endpoint.fallback_detail())),
        }
    }
}

#[async_trait]
impl MarketMindApi for FakeApi {
    async fn analyze_competitor(
        &self,
        request: &CompetitorRequest,
    ) -> Result<CompetitorAnalysis, ApiError> {
        self.answer(Endpoint::CompetitorAnalyze, request).await
    }

    async fn simulate_revenue(
        &self,
        request: &RevenueRequest,
    ) -> Result<RevenueSimulation, ApiError> {
        self.answer(Endpoint::RevenueSimulate, request).await
    }

    async fn generate_campaign(&self, request: &CampaignRequest) -> Result<Campaign, ApiError> {
        self.answer(Endpoint::CampaignGenerate, request).await
    }

    async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.answer(Endpoint::ChatSend, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.answer(Endpoint::Login, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.answer(Endpoint::Register, request).await
    }

    async fn check_health(&self) -> bool {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        match self.probes.lock().unwrap().pop_front() {
            Some(online) => {
                self.last_probe.store(online, Ordering::SeqCst);
                online
            }
            None => self.last_probe.load(Ordering::SeqCst),
        }
    }
}
