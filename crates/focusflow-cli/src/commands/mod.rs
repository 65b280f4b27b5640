pub mod analyze;
pub mod auth;
pub mod chat;
pub mod config;
pub mod data;
pub mod sessions;
pub mod timer;
