use crate::error::ApiError;
use crate::models::ApiKey;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ApiResult;

/// JSON-over-HTTP client that authenticates with a bearer token.
///
/// Anything other than `200 OK` is reported as [`ApiError::Status`] with the
/// response body kept verbatim.
pub struct BearerHttpClient {
    pub(crate) client: Client,
    api_key: ApiKey,
    base_url: String,
    service: &'static str,
}

impl BearerHttpClient {
    pub fn new_with_client(
        api_key: ApiKey,
        base_url: String,
        client: Client,
        service: &'static str,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            service,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> ApiResult<Resp> {
        let url = self.endpoint(path);
        tracing::debug!("POST {} ({})", url, self.service);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", self.service, e);
                ApiError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!("{} API error (status {}): {}", self.service, status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse {} response: {}\nBody: {}",
                self.service,
                e,
                body
            );
            ApiError::MalformedResponse(format!("{} response: {}", self.service, e))
        })
    }

    /// Unauthenticated GET of a binary resource, such as a generated image URL.
    pub async fn get_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        tracing::debug!("GET {} ({})", url, self.service);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch {}: {}", url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
