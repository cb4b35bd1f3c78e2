mod backend;
mod chat;
mod chat_settings;
mod conversation;
mod user_settings;

pub use backend::*;
pub use chat::*;
pub use chat_settings::*;
pub use conversation::*;
pub use user_settings::*;
