//! # FocusFlow Core Library
//!
//! Core logic for the FocusFlow study companion. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI binary,
//! with any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer**: a background countdown engine on a dedicated thread, driven
//!   and observed purely through message channels
//! - **Store**: key-value persistence (SQLite on disk, memory for tests)
//!   hosting the session log, the chat transcript and the API credential
//! - **Gateway**: the Gemini REST boundary for structured study analysis
//!   and the multi-turn coach chat
//!
//! ## Key Components
//!
//! - [`TimerWorker`]: background countdown engine
//! - [`SessionStore`] / [`ChatStore`]: persisted study log and transcript
//! - [`GeminiClient`] / [`CoachSession`]: AI gateway
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod gateway;
pub mod store;
pub mod timer;

pub use config::Config;
pub use error::{CoreError, GatewayError, Result, StorageError, TimerError, TransferError};
pub use gateway::{CoachSession, GeminiClient, StudyAnalysis};
pub use store::{
    ApiKeyStore, Backup, ChatMessage, ChatRole, ChatStore, DataTransfer, KeyValueStore,
    MemoryStore, SessionStore, SqliteStore, StudySession,
};
pub use timer::{Countdown, TimerEvent, TimerWorker};
