//! Subida de imágenes al host de media (multipart `file` + `upload_preset`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::ClientError;

/// Fichero recibido del panel de admin
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Destino de las imágenes de vehículos
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Devuelve la URL pública de la imagen
    async fn upload(&self, file: UploadedFile) -> Result<String, ClientError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MediaClient {
    client: Client,
    upload_url: Option<String>,
    upload_preset: String,
}

impl MediaClient {
    pub fn new(
        upload_url: Option<String>,
        upload_preset: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            upload_url,
            upload_preset: upload_preset.into(),
        })
    }
}

#[async_trait]
impl MediaUploader for MediaClient {
    async fn upload(&self, file: UploadedFile) -> Result<String, ClientError> {
        let url = self
            .upload_url
            .as_deref()
            .ok_or(ClientError::NotConfigured("MEDIA_UPLOAD_URL"))?;

        let size = file.bytes.len();
        let mut part = Part::bytes(file.bytes).file_name(file.file_name.clone());
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let uploaded: UploadResponse = response.json().await?;
        let secure_url = uploaded
            .secure_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("upload response has no secure_url".to_string()))?;

        info!("🖼️ Imagen '{}' subida ({} bytes)", file.file_name, size);
        Ok(secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_requires_url() {
        let client = MediaClient::new(None, "cars_fill", Duration::from_secs(1)).unwrap();
        let file = UploadedFile {
            file_name: "car.jpg".to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(
            client.upload(file).await.unwrap_err(),
            ClientError::NotConfigured("MEDIA_UPLOAD_URL")
        );
    }
}
