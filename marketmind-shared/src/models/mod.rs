pub mod campaign;
pub mod chat;
pub mod competitor;
pub mod endpoint;
pub mod errors;
pub mod health;
pub mod revenue;
pub mod user;

pub use campaign::{AdCopy, Campaign, CampaignRequest};
pub use chat::{ChatEntry, ChatReply, ChatRequest, ChatRole};
pub use competitor::{CompetitorAnalysis, CompetitorRequest};
pub use endpoint::Endpoint;
pub use errors::{ApiError, BACKEND_UNREACHABLE, ErrorKind};
pub use health::{ACTIVE_STATUS, HealthResponse, HealthStatus};
pub use revenue::{
    CurrentPerformance, Dataset, GraphData, Projection, RevenueRequest, RevenueSimulation,
};
pub use user::{
    AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, Session, UserProfile,
};
