#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn parse(text: &str) -> ChatRole {
        if text == "system" {
            return ChatRole::System;
        }
        if text == "user" {
            return ChatRole::User;
        }
        return ChatRole::Assistant;
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => return "system",
            ChatRole::User => return "user",
            ChatRole::Assistant => return "assistant",
        }
    }
}

/// Token counts reported by the service alongside a reply. The counts cover
/// the whole conversation sent so far, not just the chat they hang off of.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> ChatUsage {
        return ChatUsage {
            prompt_tokens,
            completion_tokens,
        };
    }

    pub fn total(&self) -> u32 {
        return self.prompt_tokens.saturating_add(self.completion_tokens);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub usage: Option<ChatUsage>,
}

impl Chat {
    pub fn new(role: ChatRole, content: &str) -> Chat {
        return Chat {
            id: Uuid::new_v4(),
            role,
            content: content.to_string(),
            usage: None,
        };
    }

    pub fn new_with_usage(role: ChatRole, content: &str, usage: ChatUsage) -> Chat {
        return Chat {
            id: Uuid::new_v4(),
            role,
            content: content.to_string(),
            usage: Some(usage),
        };
    }

    pub fn id(&self) -> Uuid {
        return self.id;
    }

    pub fn is_user(&self) -> bool {
        return self.role == ChatRole::User;
    }

    pub fn is_assistant(&self) -> bool {
        return self.role == ChatRole::Assistant;
    }
}
