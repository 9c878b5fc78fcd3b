//! reqwest-backed `FormsApi`.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use formcraft_core::error::StoreError;
use formcraft_core::model::Form;
use formcraft_core::traits::FormsApi;

/// Client for the `/forms` resource.
pub struct HttpFormsApi {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpFormsApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn forms_url(&self) -> String {
        format!("{}/forms", self.base_url)
    }

    fn form_url(&self, id: &str) -> String {
        format!("{}/forms/{id}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(self.timeout.as_secs())
            } else {
                StoreError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        debug!(status, %message, "forms API returned an error");

        Err(match status {
            404 => StoreError::NotFound(message),
            400 => StoreError::InvalidPayload(message),
            _ => StoreError::Status { status, message },
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FormsApi for HttpFormsApi {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_forms(&self) -> anyhow::Result<Vec<Form>> {
        let response = self.send(self.client.get(self.forms_url())).await?;
        Ok(Self::decode(response).await?)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_form(&self, id: &str) -> anyhow::Result<Form> {
        let response = self.send(self.client.get(self.form_url(id))).await?;
        Ok(Self::decode(response).await?)
    }

    #[instrument(skip(self, form), fields(base_url = %self.base_url))]
    async fn create_form(&self, form: &Form) -> anyhow::Result<Form> {
        let response = self
            .send(self.client.post(self.forms_url()).json(form))
            .await?;
        Ok(Self::decode(response).await?)
    }

    #[instrument(skip(self, form), fields(base_url = %self.base_url))]
    async fn update_form(&self, id: &str, form: &Form) -> anyhow::Result<Form> {
        let response = self
            .send(self.client.put(self.form_url(id)).json(form))
            .await?;
        Ok(Self::decode(response).await?)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn delete_form(&self, id: &str) -> anyhow::Result<()> {
        self.send(self.client.delete(self.form_url(id))).await?;
        Ok(())
    }
}
