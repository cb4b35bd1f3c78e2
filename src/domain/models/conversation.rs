#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Chat;
use super::ChatRole;
use super::ChatSettings;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    Asking,
}

/// One independent thread of chats with its own generation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: Uuid,
    pub state: ConversationState,
    pub title: String,
    pub chats: Vec<Chat>,
    last_updated: DateTime<Utc>,
    pub settings: ChatSettings,
}

impl Conversation {
    pub fn new(title: &str, settings: ChatSettings) -> Conversation {
        return Conversation {
            id: Uuid::new_v4(),
            state: ConversationState::Idle,
            title: title.to_string(),
            chats: vec![],
            last_updated: Utc::now(),
            settings,
        };
    }

    pub fn id(&self) -> Uuid {
        return self.id;
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        return self.last_updated;
    }

    pub fn is_asking(&self) -> bool {
        return self.state == ConversationState::Asking;
    }

    /// Pushes an empty chat whose speaker alternates with the previous one.
    /// The first chat of a conversation always belongs to the user.
    pub fn add_chat(&mut self) {
        let role = match self.chats.last() {
            Some(last_chat) if last_chat.is_user() => ChatRole::Assistant,
            Some(_) => ChatRole::User,
            None => ChatRole::User,
        };

        self.append(Chat::new(role, ""));
    }

    /// Appends a finished chat and refreshes `last_updated`. Title and
    /// settings edits deliberately leave the timestamp alone.
    pub fn append(&mut self, chat: Chat) {
        self.chats.push(chat);
        self.last_updated = Utc::now();
    }

    /// Swaps in a fresh identity so a duplicated conversation stops aliasing
    /// its source. Returns the new id.
    pub fn assign_new_id(&mut self) -> Uuid {
        self.id = Uuid::new_v4();
        return self.id;
    }

    /// The first user authored content, used by index screens as a preview
    /// row. Empty when the user never typed anything.
    pub fn first_user_content(&self) -> &str {
        if let Some(chat) = self.chats.iter().find(|chat| return chat.is_user()) {
            return &chat.content;
        }
        return "";
    }

    /// Total tokens consumed by the conversation. The service reports
    /// cumulative counts, so the largest total on record is the current one.
    pub fn all_tokens(&self) -> u32 {
        return self
            .chats
            .iter()
            .map(|chat| {
                if let Some(usage) = chat.usage {
                    return usage.total();
                }
                return 0;
            })
            .max()
            .unwrap_or(0);
    }
}
