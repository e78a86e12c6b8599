use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::state::data::{DataUrl, DataUrlError, ImageValue};

/// Fallback when a non-2xx response carries no readable message
const NON_2XX_MESSAGE: &str = "Edge Function returned a non-2xx status code";

/// Payload sent to the generation function
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    pub base_image: DataUrl,
    pub outfit_image: DataUrl,
    pub user_prompt: String,
}

/// Why a generation attempt failed
///
/// Kept `Clone` so it can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Transport(String),
    #[error("The try-on service did not answer within {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    #[error("No image returned from API")]
    MissingImage,
    #[error("Returned image is unusable: {0}")]
    InvalidImage(#[from] DataUrlError),
    #[error("Preparing the returned image failed: {0}")]
    Join(String),
}

impl GenerateError {
    /// Best-effort human message, `None` when there is nothing to say
    pub fn message(&self) -> Option<String> {
        let message = match self {
            GenerateError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

/// HTTP client for the remote virtual try-on function
#[derive(Debug, Clone)]
pub struct TryOnClient {
    http: reqwest::Client,
    endpoint: String,
    anon_key: String,
    timeout: Duration,
}

impl TryOnClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(
            config.endpoint(),
            config.supabase_anon_key.clone(),
            config.request_timeout(),
        )
    }

    pub fn with_endpoint(
        endpoint: String,
        anon_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            anon_key,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one try-on request and wait for the composited image
    pub async fn generate(&self, request: &TryOnRequest) -> Result<DataUrl, GenerateError> {
        tracing::info!(
            endpoint = %self.endpoint,
            base_len = request.base_image.encoded_len(),
            outfit_len = request.outfit_image.encoded_len(),
            prompt_len = request.user_prompt.len(),
            "submitting try-on request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.anon_key)
            .header("apikey", &self.anon_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(%status, body_len = body.len(), "try-on response received");
        interpret_response(status, &body)
    }

    /// Like `generate`, but also decodes the preview on the blocking pool
    /// so the UI thread receives a value ready to render.
    pub async fn generate_image(&self, request: &TryOnRequest) -> Result<ImageValue, GenerateError> {
        let url = self.generate(request).await?;

        tokio::task::spawn_blocking(move || result_value(url))
            .await
            .map_err(|e| GenerateError::Join(e.to_string()))?
    }

    fn transport_error(&self, error: reqwest::Error) -> GenerateError {
        if error.is_timeout() {
            GenerateError::Timeout(self.timeout)
        } else {
            GenerateError::Transport(error.to_string())
        }
    }
}

/// Turn a raw HTTP response into the result image or an error
///
/// Anything other than a 2xx JSON object with a data URL in `image`
/// counts as a failure.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<DataUrl, GenerateError> {
    let json: Option<Value> = serde_json::from_str(body).ok();

    if !status.is_success() {
        let message = json
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| NON_2XX_MESSAGE.to_string());
        return Err(GenerateError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let image = json
        .as_ref()
        .and_then(|value| value.get("image"))
        .and_then(Value::as_str)
        .filter(|image| !image.trim().is_empty())
        .ok_or(GenerateError::MissingImage)?;

    Ok(DataUrl::parse(image)?)
}

/// Decode a returned data URL into a displayable image
fn result_value(url: DataUrl) -> Result<ImageValue, GenerateError> {
    Ok(ImageValue::from_data_url(url)?)
}

fn error_message(body: &Value) -> Option<String> {
    let candidate = match body.get("error") {
        Some(Value::String(message)) => Some(message.as_str()),
        Some(Value::Object(error)) => error.get("message").and_then(Value::as_str),
        _ => None,
    }
    .or_else(|| body.get("message").and_then(Value::as_str))?;

    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
