//! reqwest-backed list source

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Response, Url,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    api::ApiError,
    config::Config,
    list::source::{parse_list_body, ListPage, ListSource},
    models::EntityKind,
};

/// Client for the hospital list endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.api_base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Config(format!("Invalid API token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(config.http_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of an entity's list endpoint
    pub fn list_url(&self, entity: EntityKind) -> Result<Url, ApiError> {
        self.base_url
            .join(entity.endpoint())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// URL of a single row of an entity
    pub fn item_url(&self, entity: EntityKind, id: &str) -> Result<Url, ApiError> {
        let mut url = self.list_url(entity)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }
}

/// Parse the base URL so that endpoint paths join beneath it
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Turn non-2xx responses into `ApiError::Status`, keeping the server's message
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body);

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ListSource for ApiClient {
    async fn fetch_page(
        &self,
        entity: EntityKind,
        params: &[(String, String)],
    ) -> Result<ListPage, ApiError> {
        let url = self.list_url(entity)?;
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;
        let response = check_status(response).await?;
        let body: Value = response.json().await?;

        parse_list_body(entity, &body)
    }

    async fn delete(&self, entity: EntityKind, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(entity, id)?;
        info!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
