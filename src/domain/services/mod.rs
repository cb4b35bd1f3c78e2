mod chat_store;
pub mod codec;

pub use chat_store::*;
