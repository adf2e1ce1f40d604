//! Server configuration
//!
//! Built once at start-up from Shuttle secrets (`Secrets.toml` locally).
//! Values are read through a lookup function so tests can use a plain map.

use std::fs;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use voicelogic::PromptTemplates;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BUYER_TEMPERATURE: f32 = 0.9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("{key} is required when AUTH_MODE={mode}")]
    MissingCredential {
        key: &'static str,
        mode: &'static str,
    },

    #[error("Failed to load prompt templates from {path}: {message}")]
    Templates { path: String, message: String },
}

/// How callers of `/simulate` are authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    Disabled,
    /// Shared bearer key
    ApiKey(String),
    /// Firebase ID tokens, verified with the project's web API key
    Firebase { web_api_key: String },
}

impl AuthConfig {
    pub fn mode(&self) -> &'static str {
        match self {
            AuthConfig::Disabled => "disabled",
            AuthConfig::ApiKey(_) => "api_key",
            AuthConfig::Firebase { .. } => "firebase",
        }
    }
}

/// Completion provider settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` is a configuration fault surfaced per request
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub buyer_temperature: Option<f32>,
    pub feedback_temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub auth: AuthConfig,
    pub allow_persona_override: bool,
    /// `None` allows every origin
    pub cors_origins: Option<Vec<String>>,
    pub templates: PromptTemplates,
}

impl AppConfig {
    /// Build the configuration from a key lookup (e.g. `SecretStore::get`)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let llm = LlmConfig {
            api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                parse_or("LLM_TIMEOUT_SECS", get("LLM_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?,
            ),
            buyer_temperature: Some(parse_or(
                "BUYER_TEMPERATURE",
                get("BUYER_TEMPERATURE"),
                DEFAULT_BUYER_TEMPERATURE,
            )?),
            feedback_temperature: get("FEEDBACK_TEMPERATURE")
                .map(|v| parse_value::<f32>("FEEDBACK_TEMPERATURE", &v))
                .transpose()?,
        };

        for (key, temperature) in [
            ("BUYER_TEMPERATURE", llm.buyer_temperature),
            ("FEEDBACK_TEMPERATURE", llm.feedback_temperature),
        ] {
            if let Some(t) = temperature {
                if !(0.0..=2.0).contains(&t) {
                    return Err(ConfigError::InvalidValue {
                        key,
                        message: format!("{} is outside 0.0..=2.0", t),
                    });
                }
            }
        }

        let auth = match get("AUTH_MODE")
            .map(|m| m.to_lowercase())
            .as_deref()
            .unwrap_or("disabled")
        {
            "disabled" | "none" => AuthConfig::Disabled,
            "api_key" => AuthConfig::ApiKey(get("VOICELOGIC_API_KEY").ok_or(
                ConfigError::MissingCredential {
                    key: "VOICELOGIC_API_KEY",
                    mode: "api_key",
                },
            )?),
            "firebase" => AuthConfig::Firebase {
                web_api_key: get("FIREBASE_WEB_API_KEY").ok_or(
                    ConfigError::MissingCredential {
                        key: "FIREBASE_WEB_API_KEY",
                        mode: "firebase",
                    },
                )?,
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "AUTH_MODE",
                    message: format!("unknown mode '{}'", other),
                })
            }
        };

        let allow_persona_override = parse_or(
            "ALLOW_PERSONA_OVERRIDE",
            get("ALLOW_PERSONA_OVERRIDE"),
            true,
        )?;

        let cors_origins = get("CORS_ALLOWED_ORIGINS").and_then(|raw| {
            let origins: Vec<String> = raw
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if origins.is_empty() || origins.iter().any(|o| o == "*") {
                None
            } else {
                Some(origins)
            }
        });

        let templates = match get("PROMPT_TEMPLATES_PATH") {
            Some(path) => load_templates(&path)?,
            None => PromptTemplates::default(),
        };

        Ok(Self {
            llm,
            auth,
            allow_persona_override,
            cors_origins,
            templates,
        })
    }

    /// CORS layer for the configured origins; all methods and headers allowed
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let Some(origins) = &self.cors_origins else {
            return Ok(CorsLayer::permissive());
        };

        let origins = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|e| ConfigError::InvalidValue {
                    key: "CORS_ALLOWED_ORIGINS",
                    message: format!("'{}': {}", o, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any))
    }
}

fn load_templates(path: &str) -> Result<PromptTemplates, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Templates {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    PromptTemplates::from_toml_str(&content).map_err(|e| ConfigError::Templates {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        message: format!("'{}': {}", raw, e),
    })
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}
