use super::{PageController, SubmitError};
use crate::api::MarketMindApi;
use shared::models::{ChatEntry, ChatRequest};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// First assistant message of every transcript.
pub const CHAT_GREETING: &str = "Hi! I'm MarketMind AI. How can I help you today?";

/// Assistant entry appended when a send fails.
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Chat assistant page with an append-only transcript.
pub struct ChatController {
    api: Arc<dyn MarketMindApi>,
    transcript: Mutex<Vec<ChatEntry>>,
    page: PageController<String>,
}

impl ChatController {
    /// Creates the page with the greeting as the only entry.
    #[must_use]
    pub fn new(api: Arc<dyn MarketMindApi>) -> Self {
        Self {
            api,
            transcript: Mutex::new(vec![ChatEntry::assistant(CHAT_GREETING)]),
            page: PageController::new(),
        }
    }

    /// Sends `message` and returns the assistant entry that was appended.
    ///
    /// The user entry is appended as soon as the send is accepted. A failed
    /// call, or a send abandoned before its reply arrives, still appends
    /// [`CHAT_FALLBACK_REPLY`], so every accepted send grows the transcript
    /// by two.
    ///
    /// # Errors
    /// - [`SubmitError::Required`] for blank input; nothing is appended.
    /// - [`SubmitError::Busy`] while a reply is pending; nothing is appended.
    pub async fn send(&self, message: &str) -> Result<ChatEntry, SubmitError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SubmitError::Required("message"));
        }

        let request = ChatRequest::new(message);
        let reply = self.page.submit(async {
            let turn = OpenTurn::start(&self.transcript, message);
            let reply = self
                .api
                .send_chat_message(&request)
                .await
                .map(|reply| reply.response);
            turn.finish(match &reply {
                Ok(text) => ChatEntry::assistant(text.clone()),
                Err(error) => {
                    debug!(detail = %error.detail, "chat reply failed");
                    ChatEntry::assistant(CHAT_FALLBACK_REPLY)
                }
            });
            reply
        });

        match reply.await {
            Ok(text) => Ok(ChatEntry::assistant(text)),
            Err(SubmitError::Api(_)) => Ok(ChatEntry::assistant(CHAT_FALLBACK_REPLY)),
            Err(other) => Err(other),
        }
    }

    /// Snapshot of the transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> Vec<ChatEntry> {
        lock(&self.transcript).clone()
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.page.is_submitting()
    }
}

/// A user entry waiting for its assistant entry.
///
/// Dropped unfinished, it appends [`CHAT_FALLBACK_REPLY`] so the transcript
/// never ends on an unanswered message.
struct OpenTurn<'a> {
    transcript: &'a Mutex<Vec<ChatEntry>>,
    finished: bool,
}

impl<'a> OpenTurn<'a> {
    fn start(transcript: &'a Mutex<Vec<ChatEntry>>, message: &str) -> Self {
        lock(transcript).push(ChatEntry::user(message));
        Self {
            transcript,
            finished: false,
        }
    }

    fn finish(mut self, entry: ChatEntry) {
        lock(self.transcript).push(entry);
        self.finished = true;
    }
}

impl Drop for OpenTurn<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("chat send abandoned before its reply");
            lock(self.transcript).push(ChatEntry::assistant(CHAT_FALLBACK_REPLY));
        }
    }
}

fn lock(transcript: &Mutex<Vec<ChatEntry>>) -> MutexGuard<'_, Vec<ChatEntry>> {
    transcript.lock().unwrap_or_else(PoisonError::into_inner)
}
