//! Terminal chat client for the EduGen educational assistant service.
//!
//! The core of the crate is [`chat::ChatStore`], a multi-conversation store
//! that owns the conversation list and the active selection, persists every
//! change through a [`storage::StorageBackend`], and derives conversation
//! titles from the first user message. Around it sit the generation-service
//! HTTP client ([`api::GenerationClient`]), file-attachment ingestion
//! ([`files::Attachment`]), and an interactive REPL ([`app::repl`]).

pub mod api;
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod files;
pub mod models;
pub mod storage;

pub use chat::store::ChatStore;
pub use models::{Conversation, Message, Role};
