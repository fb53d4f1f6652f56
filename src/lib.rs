//! Room visualisation service library
//!
//! Modules:
//! - `room`: The validated `RoomDescription` and the validator that builds it.
//! - `prompt`: Deterministic prompt text for a validated room.
//! - `gateway`: The `ImageGateway` trait and its error type.
//! - `openai`: Thin client for the OpenAI Images API implementing the gateway.
//! - `api`: Axum handlers and router setup used by the binary.
//! - `utils`: Data URI encoding.
//! - `config`: Env-driven configuration loader.
//! - `error`: Handler error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `OpenAIImageClient`,
//! `RoomDescription`, `RoomValidator`, and `build_prompt`.
pub mod api;
pub mod gateway;
pub mod openai;
pub mod prompt;
pub mod room;
pub mod utils;
pub mod config;
pub mod error;

pub use config::Config;
pub use openai::client::OpenAIImageClient;
pub use prompt::build_prompt;
pub use room::{RoomDescription, RoomValidator};
