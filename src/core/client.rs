use crate::domain::model::{AvatarHistory, Credentials, LoginResponse, ProbeResult, UploadResponse};
use crate::utils::error::{Result, SmokeError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

/// Largest avatar the server accepts.
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// HTTP client bound to the server under test.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a server-relative path such as `/api/health`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let endpoint = self.url("/api/auth/login");
        tracing::debug!("POST {}", endpoint);

        let response = self.client.post(&endpoint).json(credentials).send().await?;
        let status = response.status();
        tracing::debug!("Login response status: {}", status);

        if status != StatusCode::OK {
            return Err(SmokeError::LoginRejected {
                status: status.as_u16(),
            });
        }

        let body: LoginResponse = response.json().await?;
        if let Some(message) = &body.message {
            tracing::debug!("Login message: {}", message);
        }
        body.token.ok_or(SmokeError::MissingToken)
    }

    pub async fn upload_avatar(&self, token: &str, file: &Path) -> Result<UploadResponse> {
        let mime = image_mime_type(file).ok_or_else(|| SmokeError::UploadError {
            message: format!("{} is not an image file", file.display()),
        })?;

        let size = tokio::fs::metadata(file).await?.len();
        if size > MAX_AVATAR_BYTES {
            return Err(SmokeError::UploadError {
                message: format!("{} is {} bytes, limit is 5MB", file.display(), size),
            });
        }

        let data = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "avatar".to_string());

        let part = Part::bytes(data).file_name(file_name).mime_str(mime)?;
        let form = Form::new().part("avatar", part);

        let endpoint = self.url("/api/avatar/upload");
        tracing::debug!("POST {} ({} bytes, {})", endpoint, size, mime);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmokeError::UploadError {
                message: error_message(status, response).await,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn avatar_history(&self, token: &str) -> Result<AvatarHistory> {
        let endpoint = self.url("/api/avatar/history");
        tracing::debug!("GET {}", endpoint);

        let response = self.client.get(&endpoint).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SmokeError::UnexpectedResponse {
                endpoint,
                message: error_message(status, response).await,
            });
        }

        Ok(response.json().await?)
    }

    /// HEAD request; any HTTP status means the server answered.
    pub async fn head(&self, url: &str) -> ProbeResult {
        tracing::debug!("HEAD {}", url);

        match self.client.head(url).send().await {
            Ok(response) => ProbeResult {
                url: url.to_string(),
                status: Some(response.status().as_u16()),
                error: None,
            },
            Err(e) => {
                tracing::warn!("HEAD {} failed: {}", url, e);
                ProbeResult {
                    url: url.to_string(),
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Status plus the server's `{"error": ..}` text when it sent one.
async fn error_message(status: StatusCode, response: reqwest::Response) -> String {
    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string));

    match detail {
        Some(detail) => format!("{} ({})", status.as_u16(), detail),
        None => status.as_u16().to_string(),
    }
}

pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
