#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::Conversation;
use crate::domain::models::UserSettings;

// The persisted artifacts are plain JSON so hosts on any platform can read
// back what another one wrote. Decoding tolerates unknown fields, which keeps
// old payloads loadable after the schema grows.

pub fn encode_conversations(conversations: &[Conversation]) -> Result<Vec<u8>> {
    return Ok(serde_json::to_vec(conversations)?);
}

pub fn decode_conversations(payload: &[u8]) -> Result<Vec<Conversation>> {
    return Ok(serde_json::from_slice(payload)?);
}

pub fn encode_user_settings(user_settings: &UserSettings) -> Result<Vec<u8>> {
    return Ok(serde_json::to_vec(user_settings)?);
}

pub fn decode_user_settings(payload: &[u8]) -> Result<UserSettings> {
    return Ok(serde_json::from_slice(payload)?);
}
