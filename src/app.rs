use tracing::{debug, error, info, warn};

use crate::api::RatingApi;
use crate::error::{ReviewError, ValidationError};
use crate::genres::{self, GenreOption};
use crate::models::{MovieRecord, RatingSubmission, StarRating};
use crate::ticket::{Poster, Ticket};
use crate::utils::star_styles;
use crate::view::{
    FormInput, Panel, View, COMPLETE_MESSAGE, EMPTY_MESSAGE, SUBMIT_BUSY_LABEL, SUBMIT_LABEL,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Error(String),
    Empty,
    Reviewing,
    Submitting,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the next movie is on screen.
    Next,
    /// Saved; that was the last movie.
    Complete,
}

/// State of one rating session: the genre list, the queue of unrated movies
/// and the cursor into it. A fresh session is the only way to reload.
#[derive(Debug)]
pub struct ReviewSession {
    genres: Vec<String>,
    options: Vec<GenreOption>,
    queue: Vec<MovieRecord>,
    cursor: usize,
    phase: Phase,
    rated: usize,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            genres: Vec::new(),
            options: Vec::new(),
            queue: Vec::new(),
            cursor: 0,
            phase: Phase::Loading,
            rated: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn rated(&self) -> usize {
        self.rated
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn genre_options(&self) -> &[GenreOption] {
        &self.options
    }

    pub fn current(&self) -> Option<&MovieRecord> {
        self.queue.get(self.cursor)
    }

    /// Loads genres, then the queue.
    pub async fn start<V: View>(&mut self, api: &dyn RatingApi, view: &mut V) {
        info!("Rating session initialised");
        self.load_genres(api, view).await;
        self.load_queue(api, view).await;
    }

    pub async fn load_genres<V: View>(&mut self, api: &dyn RatingApi, view: &mut V) {
        self.genres = genres::load_genres(api).await;
        self.options = genres::genre_options(&self.genres);
        view.set_genre_options(&self.options);
    }

    pub async fn load_queue<V: View>(&mut self, api: &dyn RatingApi, view: &mut V) {
        self.phase = Phase::Loading;
        view.show_panel(Panel::Loading);

        let movies = match api.get_unrated_movies().await {
            Ok(movies) => movies,
            Err(e) => {
                error!("Failed to load unrated movies: {}", e);
                let message = format!("Erreur: {}", e);
                view.set_error_message(&message);
                view.show_panel(Panel::Error);
                self.phase = Phase::Error(e.to_string());
                return;
            }
        };

        if movies.is_empty() {
            info!("No movies left to rate");
            view.set_empty_message(EMPTY_MESSAGE);
            view.show_panel(Panel::Empty);
            self.phase = Phase::Empty;
            return;
        }

        info!("Loaded {} movies to rate", movies.len());
        self.queue = movies;
        self.cursor = 0;
        self.phase = Phase::Reviewing;
        self.render_current(view);
        view.show_panel(Panel::Content);
        view.set_submit_state(true, SUBMIT_LABEL);
    }

    /// Shows the movie under the cursor with a cleared form, or the empty
    /// view when the cursor is past the end.
    pub fn render_current<V: View>(&mut self, view: &mut V) {
        let Some(movie) = self.current() else {
            view.set_empty_message(EMPTY_MESSAGE);
            view.show_panel(Panel::Empty);
            self.phase = Phase::Empty;
            return;
        };
        let ticket = Ticket::from_movie(movie);
        debug!(cursor = self.cursor, title = %ticket.title, "Rendering ticket");
        view.render_ticket(&ticket);
        if let Poster::Url(url) = &ticket.poster {
            if !view.poster_loads(url) {
                self.poster_failed(view);
            }
        }
        view.reset_form();
        view.set_stars(&star_styles(0));
    }

    /// Image-load failure of the current poster: swaps in the placeholder.
    /// Front ends that load images asynchronously call this directly.
    pub fn poster_failed<V: View>(&self, view: &mut V) {
        if let Some(movie) = self.current() {
            warn!("Poster failed to load for '{}'", movie.title());
        }
        view.set_poster(&Poster::Placeholder);
    }

    pub fn select_rating<V: View>(&self, view: &mut V, rating: u8) {
        view.set_stars(&star_styles(rating));
    }

    /// Validates the form, saves the rating and moves to the next movie.
    /// On failure the cursor stays put so the same movie can be resubmitted.
    pub async fn submit<V: View>(
        &mut self,
        api: &dyn RatingApi,
        view: &mut V,
    ) -> Result<SubmitOutcome, ReviewError> {
        if self.phase != Phase::Reviewing {
            return Err(ReviewError::NotReviewing);
        }
        let movie = self.current().cloned().ok_or(ReviewError::NotReviewing)?;

        let submission = match self.build_submission(movie, &view.form_input()) {
            Ok(s) => s,
            Err(e) => {
                view.alert(&e.to_string());
                return Err(e.into());
            }
        };

        self.phase = Phase::Submitting;
        view.set_submit_state(false, SUBMIT_BUSY_LABEL);
        info!(
            "Saving rating {} for '{}' (genre {}, favorite {})",
            submission.note.get(),
            submission.movie.title(),
            submission.genre,
            submission.coup_de_coeur
        );

        let outcome = match api.save_rating(&submission).await {
            Ok(()) => {
                self.cursor += 1;
                self.rated += 1;
                if self.cursor < self.queue.len() {
                    self.phase = Phase::Reviewing;
                    self.render_current(view);
                    Ok(SubmitOutcome::Next)
                } else {
                    info!("All {} movies rated", self.rated);
                    self.phase = Phase::Complete;
                    view.set_empty_message(COMPLETE_MESSAGE);
                    view.show_panel(Panel::Empty);
                    Ok(SubmitOutcome::Complete)
                }
            }
            Err(e) => {
                error!("Failed to save rating: {}", e);
                self.phase = Phase::Reviewing;
                let err = ReviewError::from(e);
                view.alert(&err.to_string());
                Err(err)
            }
        };

        view.set_submit_state(true, SUBMIT_LABEL);
        outcome
    }

    fn build_submission(
        &self,
        movie: MovieRecord,
        input: &FormInput,
    ) -> Result<RatingSubmission, ValidationError> {
        let note = input
            .rating
            .ok_or(ValidationError::MissingRating)
            .and_then(StarRating::try_from)?;
        let genre = input
            .genre
            .and_then(|index| self.options.get(index))
            .ok_or(ValidationError::MissingGenre)?;
        Ok(RatingSubmission::new(
            movie,
            note,
            input.favorite,
            genre.label.clone(),
        ))
    }
}
