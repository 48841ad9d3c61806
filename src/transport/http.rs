//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::{ApiRequest, FormValue, Method, Payload, RawResponse, Transport};
use crate::config::ProviderConfig;
use crate::error::{ClientError, ClientResult};

pub const USER_AGENT: &str = concat!(
    "reseller-client/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ")"
);

/// HTTP transport with certificate verification left on.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ProviderConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(secs) = config.timeout_secs {
            builder = builder
                .timeout(Duration::from_secs(secs))
                .connect_timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            ClientError::ConnectionFailure(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

async fn multipart_form(params: &Payload) -> ClientResult<Form> {
    let mut form = Form::new();

    for (name, value) in params.iter() {
        form = match value {
            FormValue::Text(text) => form.text(name.to_string(), text.clone()),
            FormValue::Null => form.text(name.to_string(), String::new()),
            FormValue::File(path) => form.part(name.to_string(), file_part(path).await?),
        };
    }

    Ok(form)
}

async fn file_part(path: &Path) -> ClientResult<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ClientError::MissingUploadFile(path.to_path_buf()),
        _ => ClientError::ConnectionFailure(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(Part::bytes(bytes).file_name(file_name))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url).query(&request.params.query_pairs()),
            Method::Delete => self
                .client
                .delete(&request.url)
                .query(&request.params.query_pairs()),
            Method::Post => self
                .client
                .post(&request.url)
                .multipart(multipart_form(&request.params).await?),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::ConnectionFailure(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.text().await.map_err(|e| {
            ClientError::ConnectionFailure(format!("Failed to read response body: {}", e))
        })?;

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "provider responded"
        );

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
