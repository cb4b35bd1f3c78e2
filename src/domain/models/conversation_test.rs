use super::Chat;
use super::ChatRole;
use super::ChatSettings;
use super::Conversation;
use super::ConversationState;
use crate::domain::models::ChatUsage;

fn conversation_fixture() -> Conversation {
    return Conversation::new("A chat", ChatSettings::default());
}

#[test]
fn it_executes_new() {
    let conversation = conversation_fixture();
    assert_eq!(conversation.state, ConversationState::Idle);
    assert_eq!(conversation.title, "A chat".to_string());
    assert!(conversation.chats.is_empty());
    assert_eq!(conversation.settings, ChatSettings::default());
    assert!(!conversation.is_asking());
}

#[test]
fn it_alternates_speakers_starting_with_the_user() {
    let mut conversation = conversation_fixture();
    conversation.add_chat();
    conversation.add_chat();
    conversation.add_chat();

    assert_eq!(conversation.chats.len(), 3);
    assert_eq!(conversation.chats[0].role, ChatRole::User);
    assert_eq!(conversation.chats[1].role, ChatRole::Assistant);
    assert_eq!(conversation.chats[2].role, ChatRole::User);
    assert!(conversation.chats.iter().all(|chat| return chat.content.is_empty()));
}

#[test]
fn it_adds_a_user_chat_after_a_system_chat() {
    let mut conversation = conversation_fixture();
    conversation.append(Chat::new(ChatRole::User, "Hi"));
    conversation.append(Chat::new(ChatRole::System, "HTTP Error: Status code = 500"));
    conversation.add_chat();

    assert_eq!(conversation.chats[2].role, ChatRole::User);
}

#[test]
fn it_refreshes_last_updated_on_append() {
    let mut conversation = conversation_fixture();
    let before = conversation.last_updated();
    conversation.append(Chat::new(ChatRole::User, "Hi"));

    assert!(conversation.last_updated() >= before);
}

#[test]
fn it_executes_assign_new_id() {
    let mut conversation = conversation_fixture();
    let old_id = conversation.id();
    let new_id = conversation.assign_new_id();

    assert_ne!(old_id, new_id);
    assert_eq!(conversation.id(), new_id);
}

#[test]
fn it_executes_first_user_content() {
    let mut conversation = conversation_fixture();
    assert_eq!(conversation.first_user_content(), "");

    conversation.append(Chat::new(ChatRole::System, "HTTP Error: Status code = 429"));
    conversation.append(Chat::new(ChatRole::User, "What is an algorithm?"));
    conversation.append(Chat::new(ChatRole::User, "Another question"));

    assert_eq!(conversation.first_user_content(), "What is an algorithm?");
}

#[test]
fn it_executes_all_tokens() {
    let mut conversation = conversation_fixture();
    assert_eq!(conversation.all_tokens(), 0);

    conversation.append(Chat::new(ChatRole::User, "What is an algorithm?"));
    conversation.append(Chat::new_with_usage(
        ChatRole::Assistant,
        "A finite recipe of steps.",
        ChatUsage::new(12, 30),
    ));
    conversation.append(Chat::new(ChatRole::User, "Shorter please"));
    conversation.append(Chat::new_with_usage(
        ChatRole::Assistant,
        "A recipe.",
        ChatUsage::new(50, 8),
    ));

    assert_eq!(conversation.all_tokens(), 58);
}

#[test]
fn it_ignores_failure_chats_when_counting_tokens() {
    let mut conversation = conversation_fixture();
    conversation.append(Chat::new_with_usage(
        ChatRole::Assistant,
        "Hello!",
        ChatUsage::new(4, 2),
    ));
    conversation.append(Chat::new_with_usage(
        ChatRole::System,
        "HTTP Error: Status code = 500",
        ChatUsage::new(0, 0),
    ));

    assert_eq!(conversation.all_tokens(), 6);
}
