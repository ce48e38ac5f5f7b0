use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::types::{AuthInfo, LoginRequest, LoginResponse, Series, SeriesDetail, WatchItem};

/// CineFinn REST client.
///
/// Holds no token itself; every gated call takes the current bearer token,
/// so a stale in-flight request can never pick up a newer credential.
pub struct CinemaClient {
    base: String,
    http: Client,
}

impl CinemaClient {
    /// Build a client for the given API origin (e.g. `https://cinema-api.example.org`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::BaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::BaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        Ok(Self {
            base: parsed.as_str().trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "CineFinn API error");
            Err(ApiError::Api {
                status,
                message: body,
            })
        }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(format!("{}/auth/login", self.base))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(body.token)
    }

    /// Fetch the profile for the given token. Fails server-side when the
    /// token is empty or invalid.
    pub async fn auth_info(&self, token: &str) -> Result<AuthInfo, ApiError> {
        let resp = self
            .http
            .get(format!("{}/auth/info", self.base))
            .header("auth-token", token)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch the full series index (summary level).
    pub async fn series_index(&self, token: &str) -> Result<Vec<Series>, ApiError> {
        let resp = self
            .http
            .get(format!("{}/index", self.base))
            .query(&[("auth-token", token)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch detail fields for one series.
    pub async fn series_detail(&self, id: &str, token: &str) -> Result<SeriesDetail, ApiError> {
        let resp = self
            .http
            .get(format!("{}/index/{id}", self.base))
            .query(&[("auth-token", token)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch all watch records for one series.
    pub async fn watch_info(&self, series_id: &str, token: &str) -> Result<Vec<WatchItem>, ApiError> {
        let resp = self
            .http
            .get(format!("{}/watch/info", self.base))
            .query(&[("series", series_id), ("auth-token", token)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
