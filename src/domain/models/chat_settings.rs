#[cfg(test)]
#[path = "chat_settings_test.rs"]
mod tests;

use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
pub enum ChatModel {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-0314")]
    Gpt4_0314,
    #[serde(rename = "gpt-4-32k")]
    Gpt4_32k,
    #[serde(rename = "gpt-4-32k-0314")]
    Gpt4_32k0314,
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-3.5-turbo-0301")]
    Gpt35Turbo0301,
}

impl ChatModel {
    pub fn parse(text: &str) -> Option<ChatModel> {
        return ChatModel::iter().find(|model| return model.as_str() == text);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Gpt4 => return "gpt-4",
            ChatModel::Gpt4_0314 => return "gpt-4-0314",
            ChatModel::Gpt4_32k => return "gpt-4-32k",
            ChatModel::Gpt4_32k0314 => return "gpt-4-32k-0314",
            ChatModel::Gpt35Turbo => return "gpt-3.5-turbo",
            ChatModel::Gpt35Turbo0301 => return "gpt-3.5-turbo-0301",
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.as_str());
    }
}

/// Generation settings owned by a single conversation. Two conversations
/// never share these, so tuning one leaves the rest untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub chat_model: ChatModel,
    pub temperature: f64,
    pub top_probability_mass: f64,
    pub max_tokens: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    /// Persisted per conversation, but the request builder leaves it out of
    /// the wire transcript.
    pub system_content: String,
}

impl ChatSettings {
    pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
    pub const TOP_PROBABILITY_MASS_RANGE: (f64, f64) = (0.0, 1.0);
    pub const MAX_TOKENS_RANGE: (u32, u32) = (1, 2048);
    pub const PRESENCE_PENALTY_RANGE: (f64, f64) = (-2.0, 2.0);
    pub const FREQUENCY_PENALTY_RANGE: (f64, f64) = (-2.0, 2.0);
    pub const DEFAULT_SYSTEM_CONTENT: &'static str = "You are an AI assistant.";

    pub fn new(chat_model: ChatModel) -> ChatSettings {
        return ChatSettings {
            chat_model,
            temperature: 1.0,
            top_probability_mass: 1.0,
            max_tokens: 600,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            system_content: ChatSettings::DEFAULT_SYSTEM_CONTENT.to_string(),
        };
    }
}

impl Default for ChatSettings {
    fn default() -> ChatSettings {
        return ChatSettings::new(ChatModel::default());
    }
}
