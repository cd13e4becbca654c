//! Outbound HTTP client for the upstream product API.

use crate::domain::model::Producto;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx upstream response; keeps the status and raw body so callers
    /// can translate recognized statuses into their own shapes.
    #[error("upstream responded {status}")]
    Status { status: u16, body: String },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    pub async fn find_all(&self) -> Result<Vec<Producto>, ClientError> {
        let response = self.http.get(&self.base_url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Producto, ClientError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, id))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn save(&self, producto: &Producto) -> Result<Producto, ClientError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(producto)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update(&self, producto: &Producto, id: &str) -> Result<Producto, ClientError> {
        let response = self
            .http
            .put(format!("{}/{}", self.base_url, id))
            .json(producto)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.base_url, id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn upload(
        &self,
        id: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<Producto, ClientError> {
        let part = reqwest::multipart::Part::bytes(content).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .http
            .post(format!("{}/upload/{}", self.base_url, id))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
