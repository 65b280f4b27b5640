//! Gemini REST gateway.
//!
//! Two request shapes against the `generateContent` endpoint: a
//! schema-constrained study analysis and the multi-turn coach chat. Every
//! failure (missing credential, HTTP error, transport fault, unusable body)
//! surfaces as a [`crate::error::GatewayError`] at the call site and is
//! never retried automatically.

mod analysis;
mod client;
mod coach;

pub use analysis::{analyze_sessions, Indicators, StudyAnalysis};
pub use client::{Content, GeminiClient, Part};
pub use coach::CoachSession;
