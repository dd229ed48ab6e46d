//! Image host boundary: raw bytes in, public URL out.
//!
//! Client for an imgbb-style upload endpoint. Accepts either a base64 data
//! URL or a bare base64 string; values that are already `http(s)` URLs pass
//! through untouched so tenants can be re-saved without re-uploading.

use serde::Deserialize;

use crate::config::ServicesConfig;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Image host API key not configured")]
    MissingApiKey,
    #[error("Transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Image host returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Image host returned an unexpected response shape")]
    MalformedResponse,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
}

/// Strip a `data:<mime>;base64,` prefix, leaving bare base64.
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        data.split_once(',').map(|(_, b64)| b64).unwrap_or(data)
    } else {
        data
    }
}

/// The mime type of a data URL, when present.
pub fn data_url_mime(data: &str) -> Option<&str> {
    let rest = data.strip_prefix("data:")?;
    let meta = rest.split_once(',')?.0;
    Some(meta.split(';').next().unwrap_or(meta))
}

pub struct ImageService {
    client: reqwest::Client,
    api_key: Option<String>,
    upload_url: String,
}

impl ImageService {
    pub fn from_config(services: &ServicesConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: services.imgbb_api_key.clone(),
            upload_url: services.imgbb_upload_url.clone(),
        }
    }

    /// Upload image data and return its public URL.
    pub async fn upload(&self, image_data: &str) -> Result<String, ImageError> {
        // Already hosted; nothing to do.
        if image_data.starts_with("http://") || image_data.starts_with("https://") {
            return Ok(image_data.to_string());
        }

        let api_key = self.api_key.as_deref().ok_or(ImageError::MissingApiKey)?;
        let base64_data = strip_data_url(image_data);

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("key", api_key)])
            .form(&[("image", base64_data)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: UploadResponse = response.json().await?;
        body.data
            .and_then(|d| d.url)
            .ok_or(ImageError::MalformedResponse)
    }

    /// Upload an optional image field, passing `None` straight through.
    pub async fn upload_optional(
        &self,
        image_data: Option<&str>,
    ) -> Result<Option<String>, ImageError> {
        match image_data {
            Some(data) if !data.is_empty() => Ok(Some(self.upload(data).await?)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(strip_data_url("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
    }

    #[test]
    fn data_url_mime_extraction() {
        assert_eq!(data_url_mime("data:image/png;base64,AAAA"), Some("image/png"));
        assert_eq!(data_url_mime("data:image/jpeg,AAAA"), Some("image/jpeg"));
        assert_eq!(data_url_mime("AAAA"), None);
    }
}
