//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required setting '{0}'")]
    MissingSetting(&'static str),

    #[error("Invalid base URL '{value}': {message}")]
    InvalidBaseUrl { value: String, message: String },

    #[error("Setting '{name}' must be greater than zero")]
    ZeroDuration { name: &'static str },

    #[error("Setting 'state_filename' cannot be empty")]
    EmptyStateFilename,
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let global = &config.global;

    match &global.baseurl {
        None => errors.push(ValidationError::MissingSetting("baseurl")),
        Some(url) => {
            if let Err(message) = check_base_url(url) {
                errors.push(ValidationError::InvalidBaseUrl {
                    value: url.clone(),
                    message,
                });
            }
        }
    }

    match global.keep_history {
        None => errors.push(ValidationError::MissingSetting("keep_history")),
        Some(0) => errors.push(ValidationError::ZeroDuration {
            name: "keep_history",
        }),
        Some(_) => {}
    }

    if global.request_timeout_seconds == Some(0) {
        errors.push(ValidationError::ZeroDuration {
            name: "request_timeout_seconds",
        });
    }

    if let Some(path) = &global.state_filename
        && path.as_os_str().is_empty()
    {
        errors.push(ValidationError::EmptyStateFilename);
    }

    errors
}

/// Check that a base URL names an http(s) host
pub fn check_base_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| "expected an http:// or https:// URL".to_string())?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err("missing host".into());
    }
    if rest.contains(['?', '#']) {
        return Err("query and fragment are not allowed".into());
    }

    Ok(())
}
