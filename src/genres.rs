use tracing::{info, warn};

use crate::api::RatingApi;
use crate::genre_fallback::fallback_genres;

/// One entry of the genre selector: `value` is the lowercase key, `label` is
/// the genre exactly as received and is what gets submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreOption {
    pub value: String,
    pub label: String,
}

impl GenreOption {
    pub fn new(label: &str) -> Self {
        Self {
            value: label.to_lowercase(),
            label: label.to_string(),
        }
    }
}

/// Fetches the genre list, falling back to the built-in list on any failure
/// or when the endpoint returns nothing.
pub async fn load_genres(api: &dyn RatingApi) -> Vec<String> {
    match api.get_genres().await {
        Ok(genres) if !genres.is_empty() => {
            info!("Loaded {} genres from endpoint", genres.len());
            genres
        }
        Ok(_) => {
            warn!("Endpoint returned no genres, using fallback list");
            fallback_genres()
        }
        Err(e) => {
            warn!("Failed to load genres, using fallback list: {}", e);
            fallback_genres()
        }
    }
}

pub fn genre_options(genres: &[String]) -> Vec<GenreOption> {
    genres.iter().map(|g| GenreOption::new(g)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::genre_fallback::FALLBACK_GENRES;
    use crate::models::{MovieRecord, RatingSubmission};
    use async_trait::async_trait;

    struct GenresOnly(Result<Vec<String>, ApiError>);

    #[async_trait]
    impl RatingApi for GenresOnly {
        async fn get_genres(&self) -> Result<Vec<String>, ApiError> {
            self.0.clone()
        }
        async fn get_unrated_movies(&self) -> Result<Vec<MovieRecord>, ApiError> {
            Ok(Vec::new())
        }
        async fn save_rating(&self, _submission: &RatingSubmission) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn uses_remote_list_when_present() {
        let api = GenresOnly(Ok(vec!["Western".to_string(), "Policier".to_string()]));
        assert_eq!(load_genres(&api).await, vec!["Western", "Policier"]);
    }

    #[tokio::test]
    async fn falls_back_on_every_failure_kind() {
        let failures = [
            Err(ApiError::Network("timed out".to_string())),
            Err(ApiError::Network("invalid JSON".to_string())),
            Ok(Vec::new()),
        ];
        for failure in failures {
            let genres = load_genres(&GenresOnly(failure)).await;
            assert_eq!(genres, FALLBACK_GENRES.to_vec());
        }
    }

    #[test]
    fn options_lowercase_value_and_keep_label() {
        let options = genre_options(&["Science-Fiction".to_string()]);
        assert_eq!(options[0].value, "science-fiction");
        assert_eq!(options[0].label, "Science-Fiction");
    }

    #[test]
    fn case_variants_stay_distinct_options() {
        let options = genre_options(&["Drame".to_string(), "drame".to_string()]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, options[1].value);
        assert_eq!(options[1].label, "drame");
    }
}
