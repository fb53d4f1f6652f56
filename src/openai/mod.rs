pub mod client;

pub use client::OpenAIImageClient;
