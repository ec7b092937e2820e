use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use url::Url;

use crate::constants::{IMAGES_FIELD, ORPHANAGES_PATH};
use crate::errors::IntakeError;
use crate::interfaces::api::OrphanageApi;
use crate::settings::AppConfig;
use crate::use_cases::submission::SubmissionPayload;

/// `reqwest`-backed client for the orphanages API. No request timeout is
/// configured; a submission waits as long as the network does.
pub struct HttpOrphanageApi {
    client: Client,
    base_url: Url,
}

impl HttpOrphanageApi {
    pub fn new(config: &AppConfig) -> Result<Self, IntakeError> {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, IntakeError> {
        Ok(HttpOrphanageApi {
            client: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Guarantees a trailing slash so `Url::join` appends the resource path
/// instead of replacing the last segment of the base.
fn normalize_base_url(raw: &str) -> Result<Url, IntakeError> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(&format!("{trimmed}/"))?;
    Ok(url)
}

#[async_trait]
impl OrphanageApi for HttpOrphanageApi {
    async fn create_orphanage(&self, payload: SubmissionPayload) -> Result<(), IntakeError> {
        let url = self.base_url.join(ORPHANAGES_PATH)?;

        let mut form = Form::new();
        for (name, value) in payload.fields {
            form = form.text(name, value);
        }
        for image in payload.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| IntakeError::InvalidImagePart(e.to_string()))?;
            form = form.part(IMAGES_FIELD, part);
        }

        tracing::debug!(%url, "posting orphanage registration");

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();

        if status.is_success() {
            // Response body is ignored
            Ok(())
        } else {
            Err(IntakeError::ApiRejected(status.as_u16()))
        }
    }
}
