#[cfg(test)]
#[path = "chat_store_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::codec;
use crate::domain::models::BackendBox;
use crate::domain::models::Chat;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatRole;
use crate::domain::models::ChatSettings;
use crate::domain::models::ChatUsage;
use crate::domain::models::Conversation;
use crate::domain::models::ConversationState;
use crate::domain::models::UserSettings;
use crate::infrastructure::backends::openai::OpenAI;

const CONVERSATIONS_FILE: &str = "conversations.json";
const USER_SETTINGS_FILE: &str = "user_settings.json";
const DEFAULT_TITLE: &str = "A chat";

// Failure outcomes land in the transcript as system authored chats. That is
// the only error channel a collaborator ever sees for a send.
fn chat_from_outcome(outcome: ChatOutcome) -> Chat {
    match outcome {
        ChatOutcome::Success(reply) => {
            return Chat::new_with_usage(
                reply.role,
                &reply.content,
                ChatUsage::new(reply.prompt_tokens, reply.completion_tokens),
            );
        }
        ChatOutcome::TransportFailure { status_code } => {
            let code = status_code.map_or(-1, i64::from);
            return Chat::new_with_usage(
                ChatRole::System,
                &format!("HTTP Error: Status code = {code}"),
                ChatUsage::new(0, 0),
            );
        }
        ChatOutcome::DecodeFailure => {
            return Chat::new_with_usage(
                ChatRole::System,
                "Error: Decoding error due to an invalid data.",
                ChatUsage::new(0, 0),
            );
        }
        ChatOutcome::RemoteError { message, .. } => {
            return Chat::new_with_usage(ChatRole::System, &message, ChatUsage::new(0, 0));
        }
    }
}

struct StoreData {
    conversations: Vec<Conversation>,
    user_settings: UserSettings,
}

impl StoreData {
    fn index_of(&self, id: Uuid) -> Option<usize> {
        return self
            .conversations
            .iter()
            .position(|conversation| return conversation.id() == id);
    }
}

/// The authoritative collection of conversations plus the user settings.
///
/// One instance serves every collaborator. Share it behind an `Arc` and call
/// operations from any task: the interior lock is held only for synchronous
/// sections, and `send_conversation` releases it across the network await so
/// the rest of the store stays responsive while a send is in flight.
pub struct ChatStore {
    data: Mutex<StoreData>,
    backend: BackendBox,
    pub storage_dir: path::PathBuf,
}

impl Default for ChatStore {
    fn default() -> ChatStore {
        let storage_dir = dirs::data_dir().unwrap().join("parley");

        return ChatStore::new(Box::<OpenAI>::default(), storage_dir);
    }
}

impl ChatStore {
    pub fn new(backend: BackendBox, storage_dir: path::PathBuf) -> ChatStore {
        return ChatStore {
            data: Mutex::new(StoreData {
                conversations: vec![],
                user_settings: UserSettings::default(),
            }),
            backend,
            storage_dir,
        };
    }

    /// Reads user settings and conversations back from disk. Absent or
    /// unreadable artifacts leave the current values in place, so a fresh
    /// install comes up with defaults and an empty collection. Never fails
    /// outward.
    pub async fn load(&self) {
        let mut loaded_settings = None;
        if let Ok(payload) = fs::read(self.storage_dir.join(USER_SETTINGS_FILE)).await {
            match codec::decode_user_settings(&payload) {
                Ok(decoded) => loaded_settings = Some(decoded),
                Err(err) => {
                    tracing::warn!(err = ?err, "Stored user settings are unreadable, keeping defaults");
                }
            }
        }

        let mut loaded_conversations = None;
        if let Ok(payload) = fs::read(self.storage_dir.join(CONVERSATIONS_FILE)).await {
            match codec::decode_conversations(&payload) {
                Ok(decoded) => loaded_conversations = Some(decoded),
                Err(err) => {
                    tracing::warn!(err = ?err, "Stored conversations are unreadable, keeping the current collection");
                }
            }
        }

        let mut data = self.data.lock().await;
        if let Some(user_settings) = loaded_settings {
            data.user_settings = user_settings;
        }
        if let Some(conversations) = loaded_conversations {
            data.conversations = conversations;
        }
    }

    /// Writes the user settings unconditionally, and the conversation
    /// collection only while it is non empty. Emptying the collection and
    /// saving leaves the previous snapshot on disk.
    pub async fn save(&self) {
        let (encoded_settings, encoded_conversations) = {
            let data = self.data.lock().await;
            let encoded_conversations = if data.conversations.is_empty() {
                None
            } else {
                Some(codec::encode_conversations(&data.conversations))
            };

            (codec::encode_user_settings(&data.user_settings), encoded_conversations)
        };

        self.persist(USER_SETTINGS_FILE, encoded_settings).await;

        if let Some(encoded) = encoded_conversations {
            self.persist(CONVERSATIONS_FILE, encoded).await;
        }
    }

    // A failed write only logs in release builds. Debug builds stop hard so
    // a broken storage setup is caught during development.
    async fn persist(&self, file_name: &str, encoded: Result<Vec<u8>>) {
        let payload = match encoded {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(err = ?err, file_name = file_name, "Failed to encode");
                debug_assert!(false, "failed to encode {file_name}: {err}");
                return;
            }
        };

        if !self.storage_dir.exists() {
            if let Err(err) = fs::create_dir_all(&self.storage_dir).await {
                tracing::error!(err = ?err, "Failed to create the storage directory");
                debug_assert!(false, "failed to create the storage directory: {err}");
                return;
            }
        }

        let file = fs::File::create(self.storage_dir.join(file_name)).await;
        match file {
            Ok(mut file) => {
                if let Err(err) = file.write_all(&payload).await {
                    tracing::error!(err = ?err, file_name = file_name, "Failed to write");
                    debug_assert!(false, "failed to write {file_name}: {err}");
                }
            }
            Err(err) => {
                tracing::error!(err = ?err, file_name = file_name, "Failed to create");
                debug_assert!(false, "failed to create {file_name}: {err}");
            }
        }
    }

    /// Creates a conversation holding one empty user chat, inserts it at the
    /// front of the collection, and returns its id.
    pub async fn add_new_conversation(&self) -> Uuid {
        let mut data = self.data.lock().await;
        let mut conversation =
            Conversation::new(DEFAULT_TITLE, ChatSettings::new(data.user_settings.default_model));
        conversation.add_chat();

        let id = conversation.id();
        data.conversations.insert(0, conversation);

        return id;
    }

    /// Deep copies a conversation under a fresh id, forces the copy back to
    /// `Idle`, and inserts it right below its source. Returns the copy's id,
    /// or `None` when the source is gone.
    pub async fn duplicate_conversation(&self, id: Uuid) -> Option<Uuid> {
        let mut data = self.data.lock().await;
        let index = match data.index_of(id) {
            Some(index) => index,
            None => {
                tracing::warn!(id = ?id, "Cannot duplicate an unknown conversation");
                return None;
            }
        };

        let mut duplicated = data.conversations[index].clone();
        let new_id = duplicated.assign_new_id();
        duplicated.state = ConversationState::Idle;
        data.conversations.insert(index + 1, duplicated);

        return Some(new_id);
    }

    pub async fn delete_conversation(&self, id: Uuid) -> bool {
        let mut data = self.data.lock().await;
        if let Some(index) = data.index_of(id) {
            data.conversations.remove(index);
            return true;
        }

        return false;
    }

    /// Appends an empty chat to the conversation, alternating the speaker.
    pub async fn add_chat(&self, id: Uuid) {
        let mut data = self.data.lock().await;
        if let Some(index) = data.index_of(id) {
            data.conversations[index].add_chat();
        }
    }

    pub async fn set_chat_content(&self, id: Uuid, chat_id: Uuid, content: &str) {
        let mut data = self.data.lock().await;
        if let Some(index) = data.index_of(id) {
            if let Some(chat) = data.conversations[index]
                .chats
                .iter_mut()
                .find(|chat| return chat.id() == chat_id)
            {
                chat.content = content.to_string();
            }
        }
    }

    pub async fn delete_chat(&self, id: Uuid, chat_id: Uuid) {
        let mut data = self.data.lock().await;
        if let Some(index) = data.index_of(id) {
            data.conversations[index]
                .chats
                .retain(|chat| return chat.id() != chat_id);
        }
    }

    /// Renames a conversation without touching `last_updated`.
    pub async fn set_title(&self, id: Uuid, title: &str) {
        let mut data = self.data.lock().await;
        if let Some(index) = data.index_of(id) {
            data.conversations[index].title = title.to_string();
        }
    }

    /// Replaces a conversation's generation settings without touching
    /// `last_updated`.
    pub async fn update_settings(&self, id: Uuid, settings: ChatSettings) {
        let mut data = self.data.lock().await;
        if let Some(index) = data.index_of(id) {
            data.conversations[index].settings = settings;
        }
    }

    /// Snapshot of the collection in display order.
    pub async fn conversations(&self) -> Vec<Conversation> {
        let data = self.data.lock().await;
        return data.conversations.clone();
    }

    pub async fn conversation(&self, id: Uuid) -> Option<Conversation> {
        let data = self.data.lock().await;
        return data
            .conversations
            .iter()
            .find(|conversation| return conversation.id() == id)
            .cloned();
    }

    pub async fn user_settings(&self) -> UserSettings {
        let data = self.data.lock().await;
        return data.user_settings.clone();
    }

    pub async fn set_user_settings(&self, user_settings: UserSettings) {
        let mut data = self.data.lock().await;
        data.user_settings = user_settings;
    }

    /// Ships the conversation's transcript to the backend and appends what
    /// came back. The flip to `Asking` doubles as the duplicate send guard:
    /// an unknown id, a conversation already asking, or an empty API key make
    /// this a silent no-op.
    pub async fn send_conversation(&self, id: Uuid) {
        let (auth_token, request) = {
            let mut data = self.data.lock().await;
            let index = match data.index_of(id) {
                Some(index) => index,
                None => {
                    tracing::debug!(id = ?id, "Send requested for an unknown conversation");
                    return;
                }
            };
            if data.conversations[index].is_asking() {
                tracing::debug!(id = ?id, "Send already in flight");
                return;
            }
            if data.user_settings.api_key.is_empty() {
                tracing::debug!("Send requested without an API key");
                return;
            }

            data.conversations[index].state = ConversationState::Asking;

            let conversation = &data.conversations[index];
            let request = ChatRequest {
                model: conversation.settings.chat_model,
                messages: conversation
                    .chats
                    .iter()
                    .map(|chat| return (chat.role, chat.content.clone()))
                    .collect(),
                temperature: conversation.settings.temperature,
                top_probability_mass: conversation.settings.top_probability_mass,
                max_tokens: conversation.settings.max_tokens,
                presence_penalty: conversation.settings.presence_penalty,
                frequency_penalty: conversation.settings.frequency_penalty,
            };

            (data.user_settings.api_key.clone(), request)
        };

        let outcome = self.backend.send_chat(&auth_token, request).await;

        // The collection may have been reordered or the conversation deleted
        // while awaiting. Resolve by id again before touching anything.
        let mut data = self.data.lock().await;
        match data.index_of(id) {
            Some(index) => {
                data.conversations[index].state = ConversationState::Idle;
                data.conversations[index].append(chat_from_outcome(outcome));
            }
            None => {
                tracing::debug!(id = ?id, "Conversation deleted mid send, dropping the response");
            }
        }
    }
}
