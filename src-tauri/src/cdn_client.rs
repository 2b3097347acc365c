use std::{future::Future, time::Duration};

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};

use crate::asset_loader::{ProxyError, UpstreamFetcher, UpstreamResponse};

#[derive(Debug, Clone)]
pub(crate) struct CdnClient {
    client: Client,
}

impl CdnClient {
    pub(crate) fn new(timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|error| format!("Failed to build CDN client: {error}"))?;
        Ok(Self { client })
    }

    #[cfg(test)]
    fn for_loopback() -> Self {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("build loopback client");
        Self { client }
    }

    async fn get(&self, url: String) -> Result<UpstreamResponse, ProxyError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| ProxyError::Transport(error.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|error| ProxyError::BodyRead(error.to_string()))?;

        Ok(UpstreamResponse {
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}

impl UpstreamFetcher for CdnClient {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<UpstreamResponse, ProxyError>> + Send {
        self.get(url.to_string())
    }
}
