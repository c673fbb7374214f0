use thiserror::Error;

/// Failure of a call to the remote rating endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request did not complete or the response could not be read.
    #[error("{0}")]
    Network(String),
    /// The endpoint answered with `success: false`.
    #[error("{0}")]
    Remote(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Veuillez sélectionner une note")]
    MissingRating,
    #[error("Veuillez sélectionner un genre")]
    MissingGenre,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Erreur lors de la sauvegarde: {0}")]
    Api(#[from] ApiError),
    #[error("no movie is awaiting a rating")]
    NotReviewing,
}
