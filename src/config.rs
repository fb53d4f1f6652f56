//! Env-driven configuration for the service and the CLI.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Everything except the API key has a development default.
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::openai::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::room::ValidationPolicy;

pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub image_model: String,
    pub api_host: String,
    pub api_port: String,
    pub generation_timeout_secs: u64,
    pub strict_door_placement: bool,
    pub output_dir: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    /// Load from the environment. Fails only when `OPENAI_API_KEY` is unset.
    pub fn new() -> Result<Self, env::VarError> {
        Ok(Config {
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            image_model: env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "3000".to_string()),
            generation_timeout_secs: parsed_var("GENERATION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            strict_door_placement: parsed_var("STRICT_DOOR_PLACEMENT", false),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "./renders".to_string()),
        })
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy { check_door_within_wall: self.strict_door_placement }
    }

    /// Log the effective settings. The API key is never printed.
    pub fn log_settings(&self) {
        tracing::info!(
            openai_base_url = %self.openai_base_url,
            image_model = %self.image_model,
            api_host = %self.api_host,
            api_port = %self.api_port,
            generation_timeout_secs = self.generation_timeout_secs,
            strict_door_placement = self.strict_door_placement,
            openai_api_key = %mask(&self.openai_api_key),
            "Loaded configuration"
        );
    }
}

fn parsed_var<T: FromStr + Copy + std::fmt::Debug>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => parse_or(name, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Debug>(name: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid {} '{}', falling back to {:?}", name, raw, default);
        default
    })
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "<empty>".to_string()
    } else {
        format!("<set, {} chars>", secret.chars().count())
    }
}
