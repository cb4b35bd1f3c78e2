//! Client core for OpenAI-style chat-completion services: an authoritative
//! store of independent conversations, each carrying its own generation
//! settings, plus the backend client that ships transcripts to the remote
//! endpoint and classifies what comes back.
//!
//! The crate owns no UI and no scheduling. Hosts embed one [`ChatStore`]
//! (usually behind an `Arc`), call its operations from their own event
//! handling, and decide when `load`/`save` run.
//!
//! [`ChatStore`]: domain::services::ChatStore

#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

pub mod domain;
pub mod infrastructure;
