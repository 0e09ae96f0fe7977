//! Configuration management for the `TripVaults` backend
//!
//! All settings come from environment variables with sensible defaults.
//! The result is validated once at startup and injected into the handler
//! state; nothing reads the environment after boot.

use anyhow::{Context, Result};
use std::env;

use crate::error::TripVaultsError;

/// Root configuration for the `TripVaults` backend
#[derive(Debug, Clone)]
pub struct TripVaultsConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Completion API configuration
    pub openai: OpenAiConfig,
}

/// HTTP server configuration settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind port
    pub port: u16,
}

/// Completion API configuration settings
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API credential; the travel-plan endpoint answers 500 without it
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Completion length cap
    pub max_tokens: u32,
    /// Outbound request timeout in seconds
    pub timeout_seconds: u32,
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout_seconds() -> u32 {
    120
}

impl Default for TripVaultsConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
            },
            openai: OpenAiConfig {
                api_key: None,
                base_url: default_base_url(),
                model: default_model(),
                temperature: default_temperature(),
                max_tokens: default_max_tokens(),
                timeout_seconds: default_timeout_seconds(),
            },
        }
    }
}

impl TripVaultsConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {raw}"))?,
            Err(_) => default_port(),
        };

        // An empty credential behaves the same as an absent one.
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty());

        let config = Self {
            server: ServerConfig { port },
            openai: OpenAiConfig {
                api_key,
                base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| default_base_url()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| default_model()),
                temperature: default_temperature(),
                max_tokens: default_max_tokens(),
                timeout_seconds: default_timeout_seconds(),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(api_key) = &self.openai.api_key {
            if api_key.len() < 8 {
                return Err(TripVaultsError::config(
                    "OpenAI API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }
        }

        if !self.openai.base_url.starts_with("http://")
            && !self.openai.base_url.starts_with("https://")
        {
            return Err(TripVaultsError::config(
                "OpenAI base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.openai.model.is_empty() {
            return Err(TripVaultsError::config("OpenAI model must not be empty").into());
        }

        Ok(())
    }
}
