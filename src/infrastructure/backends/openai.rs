#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::ChatBackend;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatRole;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

// Optional tuning keys stay off the wire entirely when unset, matching what
// the completions endpoint documents as defaults.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<HashMap<u32, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    index: u32,
    message: CompletionMessageResponse,
    finish_reason: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UsageResponse {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    id: String,
    object: String,
    choices: Vec<CompletionChoiceResponse>,
    usage: UsageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorDetailResponse {
    message: String,
    #[serde(rename = "type")]
    kind: String,
    param: String,
    code: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorDetailResponse,
}

fn reply_from(decoded: CompletionResponse) -> ChatOutcome {
    // An empty choices array still decodes. Degrade to an empty assistant
    // reply and keep the usage counts.
    let (role, content) = match decoded.choices.first() {
        Some(choice) => (
            ChatRole::parse(&choice.message.role),
            choice.message.content.to_string(),
        ),
        None => (ChatRole::Assistant, "".to_string()),
    };

    return ChatOutcome::Success(ChatReply {
        role,
        content,
        prompt_tokens: decoded.usage.prompt_tokens,
        completion_tokens: decoded.usage.completion_tokens,
    });
}

pub struct OpenAI {
    url: String,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            url: "https://api.openai.com".to_string(),
        };
    }
}

#[async_trait]
impl ChatBackend for OpenAI {
    #[allow(clippy::implicit_return)]
    async fn send_chat(&self, auth_token: &str, request: ChatRequest) -> ChatOutcome {
        let messages = request
            .messages
            .iter()
            .map(|(role, content)| {
                return MessageRequest {
                    role: role.as_str().to_string(),
                    content: content.to_string(),
                };
            })
            .collect::<Vec<MessageRequest>>();

        let req = CompletionRequest {
            model: request.model.as_str().to_string(),
            messages,
            temperature: Some(request.temperature),
            top_p: Some(request.top_probability_mass),
            n: None,
            stream: None,
            stop: None,
            max_tokens: Some(request.max_tokens),
            presence_penalty: Some(request.presence_penalty),
            frequency_penalty: Some(request.frequency_penalty),
            logit_bias: None,
            user: None,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {auth_token}"))
            .json(&req)
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "The completions endpoint is not reachable");
                return ChatOutcome::TransportFailure { status_code: None };
            }
        };

        let status = res.status().as_u16();
        if !(200..400).contains(&status) {
            tracing::error!(status = status, "The completions request failed");
            return ChatOutcome::TransportFailure {
                status_code: Some(status),
            };
        }

        let payload = match res.bytes().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = ?err, "The response body could not be read");
                return ChatOutcome::TransportFailure { status_code: None };
            }
        };

        if let Ok(decoded) = serde_json::from_slice::<CompletionResponse>(&payload) {
            tracing::debug!(body = ?decoded, "Completion response");
            return reply_from(decoded);
        }

        if let Ok(decoded) = serde_json::from_slice::<ErrorResponse>(&payload) {
            tracing::debug!(body = ?decoded, "Structured error response");
            return ChatOutcome::RemoteError {
                message: decoded.error.message,
                kind: decoded.error.kind,
                param: decoded.error.param,
                code: decoded.error.code,
            };
        }

        tracing::error!("The response body matches neither the completion nor the error shape");
        return ChatOutcome::DecodeFailure;
    }
}
