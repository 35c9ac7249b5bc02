//! Page controllers.
//!
//! Every page follows the same submission cycle, implemented once by
//! [`PageController`]:
//!
//! `Idle -> Submitting -> Success(result) | Failure(error)`
//!
//! Starting a submission clears the previous result and error before the call
//! is issued, and a second submission is refused while one is in flight.

pub mod auth;
pub mod campaign;
pub mod chat;
pub mod competitor;
pub mod revenue;

pub use auth::{
    LoginController, RegisterController, RegisterForm, RegisterOutcome, password_strength,
};
pub use campaign::{CampaignController, CampaignField};
pub use chat::{CHAT_FALLBACK_REPLY, CHAT_GREETING, ChatController};
pub use competitor::CompetitorController;
pub use revenue::{ChartPoint, RevenueController, RevenueField, chart_points, projections_csv};

use shared::models::ApiError;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Where a page is in its submission cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState<T> {
    /// Nothing submitted yet, or the last submission was abandoned.
    #[default]
    Idle,
    /// A call is in flight.
    Submitting,
    /// The last call succeeded.
    Success(T),
    /// The last call, or local validation, failed.
    Failure(ApiError),
}

impl<T> SubmissionState<T> {
    /// Short name for logs and status lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

/// Why a submission did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another submission from the same page is still in flight.
    #[error("a submission is already in progress")]
    Busy,

    /// A required form field is blank; nothing was sent and no error is shown.
    #[error("{0} is required")]
    Required(&'static str),

    /// The call, or local validation, failed; the page now shows this error.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// The user-facing error, when the failure is one the page displays.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}

/// Submission state machine shared by every page.
#[derive(Debug, Default)]
pub struct PageController<T> {
    state: Mutex<SubmissionState<T>>,
}

impl<T: Clone> PageController<T> {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SubmissionState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `call` as the next submission.
    ///
    /// `call` is not polled at all when the page is busy. If the returned
    /// future is dropped before it completes, the page goes back to `Idle` and
    /// the late response is discarded.
    ///
    /// # Errors
    /// [`SubmitError::Busy`] when a submission is already in flight, otherwise
    /// [`SubmitError::Api`] with the failure the page now displays.
    pub async fn submit<F>(&self, call: F) -> Result<T, SubmitError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let mut in_flight = self.begin()?;
        let outcome = call.await;
        in_flight.finish(outcome.clone());
        outcome.map_err(SubmitError::from)
    }

    /// Records a failure detected before any call, such as a validation error.
    ///
    /// # Errors
    /// Always errors: [`SubmitError::Busy`] if a submission is in flight
    /// (the error is then not recorded), otherwise [`SubmitError::Api`].
    pub fn reject(&self, error: ApiError) -> Result<T, SubmitError> {
        let mut state = self.lock();
        if matches!(*state, SubmissionState::Submitting) {
            return Err(SubmitError::Busy);
        }
        debug!(detail = %error.detail, kind = %error.kind, "submission rejected locally");
        *state = SubmissionState::Failure(error.clone());
        Err(SubmitError::Api(error))
    }

    fn begin(&self) -> Result<InFlight<'_, T>, SubmitError> {
        let mut state = self.lock();
        if matches!(*state, SubmissionState::Submitting) {
            debug!("submission ignored while another is in flight");
            return Err(SubmitError::Busy);
        }
        *state = SubmissionState::Submitting;
        Ok(InFlight {
            controller: self,
            finished: false,
        })
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SubmissionState<T> {
        self.lock().clone()
    }

    /// Result of the last successful submission.
    #[must_use]
    pub fn result(&self) -> Option<T> {
        match &*self.lock() {
            SubmissionState::Success(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Error of the last failed submission.
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        match &*self.lock() {
            SubmissionState::Failure(error) => Some(error.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(*self.lock(), SubmissionState::Submitting)
    }

    /// Clears result and error. Has no effect while submitting.
    pub fn reset(&self) {
        let mut state = self.lock();
        if !matches!(*state, SubmissionState::Submitting) {
            *state = SubmissionState::Idle;
        }
    }
}

/// Marks a submission as in flight until it finishes or is dropped.
struct InFlight<'a, T: Clone> {
    controller: &'a PageController<T>,
    finished: bool,
}

impl<T: Clone> InFlight<'_, T> {
    fn finish(&mut self, outcome: Result<T, ApiError>) {
        let next = match outcome {
            Ok(result) => SubmissionState::Success(result),
            Err(error) => SubmissionState::Failure(error),
        };
        debug!(state = next.name(), "submission finished");
        *self.controller.lock() = next;
        self.finished = true;
    }
}

impl<T: Clone> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("submission abandoned before completion");
            *self.controller.lock() = SubmissionState::Idle;
        }
    }
}
