use crate::genres::GenreOption;
use crate::ticket::{Poster, Ticket};
use crate::utils::StarStyle;

pub const SUBMIT_LABEL: &str = "Enregistrer";
pub const SUBMIT_BUSY_LABEL: &str = "Enregistrement...";
pub const EMPTY_MESSAGE: &str = "Tout est à jour : aucun film à noter.";
pub const COMPLETE_MESSAGE: &str = "Tous les films ont été notés ! 🎉";

/// The mutually exclusive areas of the page. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Loading,
    Empty,
    Error,
    Content,
}

/// Current state of the rating form as the user left it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub rating: Option<u8>,
    pub favorite: bool,
    /// Position of the selected genre option, if any.
    pub genre: Option<usize>,
}

/// What the review flow needs from a display surface.
pub trait View {
    fn show_panel(&mut self, panel: Panel);
    fn set_error_message(&mut self, message: &str);
    fn set_empty_message(&mut self, message: &str);
    /// Replaces every genre option. Calling it twice must not duplicate.
    fn set_genre_options(&mut self, options: &[GenreOption]);
    fn render_ticket(&mut self, ticket: &Ticket);
    fn set_poster(&mut self, poster: &Poster);
    /// Whether the poster at `url` can be shown. Returning `false` makes the
    /// session fall back to the placeholder right after rendering.
    fn poster_loads(&self, _url: &str) -> bool {
        true
    }
    fn form_input(&self) -> FormInput;
    fn reset_form(&mut self);
    fn set_stars(&mut self, styles: &[StarStyle]);
    fn set_submit_state(&mut self, enabled: bool, label: &str);
    fn alert(&mut self, message: &str);
}
