use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ChatModel;

/// Store wide settings, shared by every conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Credential for the completions service. Sends are refused while this
    /// is empty.
    pub api_key: String,
    /// Model handed to conversations created after the change. Existing
    /// conversations keep whatever they were created with.
    pub default_model: ChatModel,
}
