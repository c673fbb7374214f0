use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{MovieRecord, RatingSubmission};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 5;

pub const DEFAULT_LOAD_ERROR: &str = "Erreur lors du chargement";
pub const DEFAULT_SAVE_ERROR: &str = "Erreur lors de la sauvegarde";

/// The remote rating endpoint. Reads and the single write all go through one
/// base URL and are told apart by an action name.
#[async_trait]
pub trait RatingApi: Send + Sync {
    async fn get_genres(&self) -> Result<Vec<String>, ApiError>;
    async fn get_unrated_movies(&self) -> Result<Vec<MovieRecord>, ApiError>;
    async fn save_rating(&self, submission: &RatingSubmission) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct RatingClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct MoviesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    movies: Option<Vec<MovieRecord>>,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl RatingClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("ticketrate/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build rating HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("RATING_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("RATING_API_URL not set")?;
        let timeout = match env::var("RATING_API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Self::new(base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn action_url(&self, action: &str) -> String {
        let sep = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}action={}",
            self.base_url,
            sep,
            urlencoding::encode(action)
        )
    }

    async fn get_action<T: DeserializeOwned>(&self, action: &str) -> Result<T, ApiError> {
        let url = self.action_url(action);
        debug!("GET {}", url);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("{action} request failed: {e}")))?;
        read_json(action, res).await
    }
}

/// Parses a whole-request timeout in seconds. Zero is rejected since it
/// would fail every request.
pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid RATING_API_TIMEOUT_SECS '{}'", raw))?;
    if secs == 0 {
        anyhow::bail!("RATING_API_TIMEOUT_SECS must be at least 1");
    }
    Ok(Duration::from_secs(secs))
}

async fn read_json<T: DeserializeOwned>(
    action: &str,
    res: reqwest::Response,
) -> Result<T, ApiError> {
    let status = res.status();
    let text = res
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("{action} body could not be read: {e}")))?;
    if !status.is_success() {
        return Err(ApiError::Network(format!(
            "{action} HTTP error (status {status}): {text}"
        )));
    }
    serde_json::from_str(&text)
        .map_err(|e| ApiError::Network(format!("{action} returned invalid JSON: {e}")))
}

#[async_trait]
impl RatingApi for RatingClient {
    async fn get_genres(&self) -> Result<Vec<String>, ApiError> {
        let data: GenresResponse = self.get_action("getGenres").await?;
        Ok(data.genres.unwrap_or_default())
    }

    async fn get_unrated_movies(&self) -> Result<Vec<MovieRecord>, ApiError> {
        let data: MoviesResponse = self.get_action("getUnratedMovies").await?;
        if !data.success {
            return Err(ApiError::Remote(
                data.error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_LOAD_ERROR.to_string()),
            ));
        }
        Ok(data.movies.unwrap_or_default())
    }

    async fn save_rating(&self, submission: &RatingSubmission) -> Result<(), ApiError> {
        let body = json!({
            "action": "saveRating",
            "movie": submission,
        });
        debug!("POST {} saveRating", self.base_url);
        let res = self
            .client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("saveRating request failed: {e}")))?;
        let data: SaveResponse = read_json("saveRating", res).await?;
        if data.success {
            Ok(())
        } else {
            Err(ApiError::Remote(
                data.error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_SAVE_ERROR.to_string()),
            ))
        }
    }
}
