use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::Form;
use serde::Deserialize;

use super::{MediaError, MediaHost};

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Cloudinary unsigned-upload client.
///
/// Posts the data URI itself as the `file` field along with the upload
/// preset; Cloudinary decodes it server-side.
pub struct CloudinaryHost {
    client: Client,
    upload_url: String,
    upload_preset: String,
    folder: Option<String>,
}

impl CloudinaryHost {
    pub fn new(
        client: Client,
        api_base: &str,
        cloud_name: &str,
        upload_preset: &str,
        folder: Option<String>,
    ) -> Self {
        Self {
            client,
            upload_url: format!("{}/{}/upload", api_base.trim_end_matches('/'), cloud_name),
            upload_preset: upload_preset.to_string(),
            folder,
        }
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    async fn upload(&self, data_uri: &str) -> Result<String, MediaError> {
        let mut form = Form::new()
            .text("file", data_uri.to_string())
            .text("upload_preset", self.upload_preset.clone());
        if let Some(folder) = &self.folder {
            form = form.text("folder", folder.clone());
        }

        let res = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(MediaError::Status(res.status().as_u16()));
        }

        let body: UploadResponse = res.json().await?;
        body.secure_url.ok_or(MediaError::MissingSecureUrl)
    }
}
