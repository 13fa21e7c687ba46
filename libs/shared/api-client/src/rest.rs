use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::auth::AccessToken;

use crate::error::ApiClientError;

pub type ApiResult<T> = Result<T, ApiClientError>;

/// Thin JSON client for the clinic REST API.
///
/// Every call is independent: no retries, no caching, no request
/// deduplication. Failures are classified into [`ApiClientError`] and left
/// for the caller to surface.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn get_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&AccessToken>,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method.clone(), &url)
            .headers(Self::get_headers());

        if let Some(token) = token {
            req = req.bearer_auth(token.as_str());
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            error!("{} {} failed before a response arrived: {}", method, url, e);
            ApiClientError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("API error ({}) on {} {}: {}", status, method, url, text);
            return Err(ApiClientError::from_response(status, &text));
        }

        // 204 and empty 200 bodies decode as JSON null.
        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        let data = serde_json::from_str::<T>(payload).map_err(|e| {
            error!("Unexpected payload from {} {}: {}", method, url, e);
            ApiClientError::Decode(e)
        })?;

        Ok(data)
    }

    pub async fn get<T>(&self, path: &str, token: &AccessToken) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(Method::GET, path, Some(token), None).await
    }

    pub async fn post<T, B>(&self, path: &str, token: &AccessToken, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, token: &AccessToken, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(token), Some(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, token: &AccessToken, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(token), Some(body)).await
    }
}
