use async_trait::async_trait;

use super::ChatModel;
use super::ChatRole;

/// Everything one remote call needs, snapshotted from a conversation at the
/// moment the send is committed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub model: ChatModel,
    pub messages: Vec<(ChatRole, String)>,
    pub temperature: f64,
    pub top_probability_mass: f64,
    pub max_tokens: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

/// The assistant's answer, taken from the first choice of a completion
/// response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub role: ChatRole,
    pub content: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// What one remote call produced. Expected failures are values rather than
/// errors, the store renders each of them as a system authored chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Success(ChatReply),
    /// The request never produced a response, or the server answered with a
    /// status outside the 2xx/3xx range.
    TransportFailure { status_code: Option<u16> },
    /// A successful status whose body matches neither the completion shape
    /// nor the structured error shape.
    DecodeFailure,
    /// The server accepted the request at the HTTP layer but refused it
    /// semantically.
    RemoteError {
        message: String,
        kind: String,
        param: String,
        code: String,
    },
}

#[async_trait]
pub trait ChatBackend {
    /// Ships one transcript to the completions endpoint and classifies the
    /// result. Exactly one outbound call, no retries.
    async fn send_chat(&self, auth_token: &str, request: ChatRequest) -> ChatOutcome;
}

pub type BackendBox = Box<dyn ChatBackend + Send + Sync>;
