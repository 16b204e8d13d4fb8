use futures::future::{
    BoxFuture,
    FutureExt,
};
use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        AUTHORIZATION,
        CONTENT_TYPE,
    },
    Client,
    Method,
    RequestBuilder,
    Response,
};
use serde::{
    de::DeserializeOwned,
    Deserialize,
};
use tracing::{
    debug,
    error,
};

use super::ApplicationStore;
use crate::core::{
    config::BackendConfig,
    errors::{
        JobTrackError,
        Result,
    },
    models::{
        Application,
        ApplicationDraft,
        ApplicationPatch,
    },
};

const REST_PATH: &str = "rest/v1";

/// Error body returned by the REST gateway.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    hint: Option<String>,
}

/// PostgREST-style client for the hosted applications table.
pub struct RestStore {
    client: Client,
    config: BackendConfig,
}

impl RestStore {
    pub fn new(config: BackendConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn table_url(&self) -> String {
        format!("{}/{}/{}", self.config.url.trim_end_matches('/'), REST_PATH, self.config.table())
    }

    fn session(&self) -> Result<(&str, &str)> {
        match (self.config.access_token.as_deref(), self.config.user_id.as_deref()) {
            (Some(token), Some(user_id)) if !token.is_empty() && !user_id.is_empty() => {
                Ok((token, user_id))
            }
            _ => Err(JobTrackError::NotAuthenticated),
        }
    }

    fn headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let invalid = |e: reqwest::header::InvalidHeaderValue| {
            JobTrackError::Config(format!("invalid header value: {}", e))
        };
        headers.insert("apikey", HeaderValue::from_str(&self.config.anon_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).map_err(invalid)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Builds a request against the table, scoped to the session user.
    fn request(&self, method: Method, filters: &[(&str, String)]) -> Result<RequestBuilder> {
        let (token, user_id) = self.session()?;
        let mut query: Vec<(&str, String)> = filters.to_vec();
        if method != Method::POST {
            query.push(("user_id", format!("eq.{}", user_id)));
        }

        Ok(self.client.request(method, self.table_url()).headers(self.headers(token)?).query(&query))
    }

    fn load_request(&self) -> Result<RequestBuilder> {
        Ok(self
            .request(Method::GET, &[("select", "*".to_string())])?
            .query(&[("order", "applied_at.desc")]))
    }

    fn create_request(&self, draft: &ApplicationDraft) -> Result<RequestBuilder> {
        let (_, user_id) = self.session()?;
        let mut body = serde_json::to_value(draft)?;
        if let Some(object) = body.as_object_mut() {
            object.insert("user_id".to_string(), serde_json::Value::String(user_id.to_string()));
        }

        Ok(self
            .request(Method::POST, &[])?
            .header("Prefer", "return=representation")
            .json(&serde_json::Value::Array(vec![body])))
    }

    fn update_request(&self, id: &str, patch: &ApplicationPatch) -> Result<RequestBuilder> {
        Ok(self
            .request(Method::PATCH, &[("id", format!("eq.{}", id))])?
            .header("Prefer", "return=representation")
            .json(patch))
    }

    fn delete_request(&self, id: &str) -> Result<RequestBuilder> {
        self.request(Method::DELETE, &[("id", format!("eq.{}", id))])
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&text)
            .ok()
            .and_then(|e| e.message.or(e.hint))
            .unwrap_or(text);
        error!(status = status.as_u16(), "backend request failed: {}", message);
        Err(JobTrackError::Backend { status: status.as_u16(), message })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Ok(Self::send(request).await?.json::<T>().await?)
    }

    async fn first_row(request: RequestBuilder, id: &str) -> Result<Application> {
        let rows: Vec<Application> = Self::send_json(request).await?;
        rows.into_iter().next().ok_or_else(|| JobTrackError::NotFound(id.to_string()))
    }
}

impl ApplicationStore for RestStore {
    fn load_applications(&self) -> BoxFuture<'_, Result<Vec<Application>>> {
        async move {
            let rows: Vec<Application> = Self::send_json(self.load_request()?).await?;
            debug!(count = rows.len(), "applications fetched");
            Ok(rows)
        }
        .boxed()
    }

    fn create_application<'a>(
        &'a self,
        draft: &'a ApplicationDraft,
    ) -> BoxFuture<'a, Result<Application>> {
        async move { Self::first_row(self.create_request(draft)?, "new").await }.boxed()
    }

    fn update_application<'a>(
        &'a self,
        id: &'a str,
        patch: &'a ApplicationPatch,
    ) -> BoxFuture<'a, Result<Application>> {
        async move { Self::first_row(self.update_request(id, patch)?, id).await }.boxed()
    }

    fn delete_application<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        async move {
            Self::send(self.delete_request(id)?).await?;
            Ok(())
        }
        .boxed()
    }
}
