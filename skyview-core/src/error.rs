use reqwest::StatusCode;
use serde::Deserialize;

pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to fetch weather data";

/// A failed weather lookup. `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    #[error(
        "API key is invalid or Weather API is not enabled. Please check your Google Cloud Console settings."
    )]
    AuthOrConfig,

    #[error(
        "Weather API endpoint not found. Please ensure the Weather API is enabled in your Google Cloud Console."
    )]
    EndpointNotFound,

    /// Message taken verbatim from the provider's error body.
    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Generic(String),
}

impl WeatherError {
    /// Generic failure carrying `message`, or the default text when it is blank.
    pub fn generic(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            WeatherError::Generic(DEFAULT_FAILURE_MESSAGE.to_string())
        } else {
            WeatherError::Generic(message)
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::generic(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::generic(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Extract a provider supplied error message from a response body, if any.
pub fn provider_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    parsed
        .error
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .or(parsed.error_message.filter(|m| !m.is_empty()))
}

/// Classify a non-success response.
///
/// Status specific messages win over provider messages, which win over the
/// generic fallback.
pub fn classify_failure(status: StatusCode, body: &str) -> WeatherError {
    match status {
        StatusCode::FORBIDDEN => WeatherError::AuthOrConfig,
        StatusCode::NOT_FOUND => WeatherError::EndpointNotFound,
        _ => match provider_message(body) {
            Some(message) => WeatherError::Provider(message),
            None => WeatherError::generic(format!(
                "Request failed with status code {}",
                status.as_u16()
            )),
        },
    }
}
