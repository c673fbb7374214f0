//! Line-oriented front end: prints the ticket and reads the form from any
//! buffered async reader (stdin in the binary).

use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{info, warn};

use crate::api::RatingApi;
use crate::app::{Phase, ReviewSession};
use crate::genres::GenreOption;
use crate::models::MAX_STARS;
use crate::ticket::{Poster, Ticket};
use crate::utils::{stars_text, StarStyle};
use crate::view::{FormInput, Panel, View};

const POSTER_UNAVAILABLE: &str = "Affiche non disponible";

pub struct TerminalView<W: Write> {
    out: W,
    panel: Option<Panel>,
    error_message: String,
    empty_message: String,
    options: Vec<GenreOption>,
    form: FormInput,
    submit_enabled: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            panel: None,
            error_message: String::new(),
            empty_message: String::new(),
            options: Vec::new(),
            form: FormInput::default(),
            submit_enabled: false,
        }
    }

    pub fn panel(&self) -> Option<Panel> {
        self.panel
    }

    pub fn options(&self) -> &[GenreOption] {
        &self.options
    }

    pub fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn prompt(&mut self, text: &str) {
        let res = write!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(e) = res {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show_panel(&mut self, panel: Panel) {
        self.panel = Some(panel);
        match panel {
            Panel::Loading => self.line("Chargement..."),
            Panel::Error => {
                let message = self.error_message.clone();
                self.line(&message);
            }
            Panel::Empty => {
                let message = self.empty_message.clone();
                self.line(&message);
            }
            Panel::Content => {}
        }
    }

    fn set_error_message(&mut self, message: &str) {
        self.error_message = message.to_string();
    }

    fn set_empty_message(&mut self, message: &str) {
        self.empty_message = message.to_string();
    }

    fn set_genre_options(&mut self, options: &[GenreOption]) {
        self.options = options.to_vec();
    }

    fn render_ticket(&mut self, ticket: &Ticket) {
        self.line("");
        self.line(&format!("┌ {}", ticket.title));
        self.set_poster(&ticket.poster);
        self.line(&format!(
            "│ {} · {} · {} · {}",
            ticket.date, ticket.time, ticket.duration, ticket.language
        ));
        self.line(&format!("│ {} · {}", ticket.room, ticket.seat));
        self.line("└");
    }

    fn set_poster(&mut self, poster: &Poster) {
        let text = match poster {
            Poster::Url(url) => url.as_str(),
            Poster::Placeholder => POSTER_UNAVAILABLE,
        };
        self.line(&format!("│ Affiche : {}", text));
    }

    fn poster_loads(&self, url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    fn form_input(&self) -> FormInput {
        self.form.clone()
    }

    fn reset_form(&mut self) {
        self.form = FormInput::default();
    }

    fn set_stars(&mut self, styles: &[StarStyle]) {
        if self.form.rating.is_some() {
            self.line(&stars_text(styles));
        }
    }

    fn set_submit_state(&mut self, enabled: bool, label: &str) {
        self.submit_enabled = enabled;
        if !enabled {
            self.line(label);
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }
}

enum Step<T> {
    Value(T),
    Quit,
}

async fn read_line<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Result<Step<String>> {
    let line = lines.next_line().await.context("Failed to read input")?;
    Ok(match line {
        Some(l) if l.trim().eq_ignore_ascii_case("q") => Step::Quit,
        Some(l) => Step::Value(l.trim().to_string()),
        None => Step::Quit,
    })
}

/// Runs sessions until the user quits or the queue is exhausted. Returns the
/// number of ratings saved.
pub async fn run_terminal<R, W>(api: &dyn RatingApi, input: R, out: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut view = TerminalView::new(out);
    let mut lines = input.lines();
    let mut saved = 0;

    loop {
        let mut session = ReviewSession::new();
        session.start(api, &mut view).await;

        match session.phase().clone() {
            Phase::Error(_) => {
                view.prompt("r pour recharger, q pour quitter : ");
                match read_line(&mut lines).await? {
                    Step::Value(v) if v.eq_ignore_ascii_case("r") => {
                        info!("Reloading session");
                        continue;
                    }
                    _ => return Ok(saved),
                }
            }
            Phase::Reviewing => {
                review(&mut session, api, &mut view, &mut lines).await?;
                saved += session.rated();
                return Ok(saved);
            }
            _ => return Ok(saved),
        }
    }
}

async fn review<R, W>(
    session: &mut ReviewSession,
    api: &dyn RatingApi,
    view: &mut TerminalView<W>,
    lines: &mut Lines<R>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    while *session.phase() == Phase::Reviewing {
        let Step::Value(rating) = ask_rating(session, view, lines).await? else {
            return Ok(());
        };
        view.form_mut().rating = rating;

        view.prompt("Coup de cœur ? (o/N) : ");
        let Step::Value(fav) = read_line(lines).await? else {
            return Ok(());
        };
        view.form_mut().favorite = matches!(fav.to_lowercase().as_str(), "o" | "oui" | "y" | "yes");

        let Step::Value(genre) = ask_genre(view, lines).await? else {
            return Ok(());
        };
        view.form_mut().genre = genre;

        // Failures are already reported through the view; the same movie
        // stays on screen for another attempt.
        let _ = session.submit(api, view).await;
    }
    Ok(())
}

async fn ask_rating<R, W>(
    session: &ReviewSession,
    view: &mut TerminalView<W>,
    lines: &mut Lines<R>,
) -> Result<Step<Option<u8>>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        view.prompt("Note (1-5) : ");
        let Step::Value(raw) = read_line(lines).await? else {
            return Ok(Step::Quit);
        };
        if raw.is_empty() {
            return Ok(Step::Value(None));
        }
        match raw.parse::<u8>() {
            Ok(n) if (1..=MAX_STARS).contains(&n) => {
                view.form_mut().rating = Some(n);
                session.select_rating(view, n);
                return Ok(Step::Value(Some(n)));
            }
            _ => view.line("Note invalide, entrez un nombre entre 1 et 5."),
        }
    }
}

async fn ask_genre<R, W>(
    view: &mut TerminalView<W>,
    lines: &mut Lines<R>,
) -> Result<Step<Option<usize>>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let listing: Vec<String> = view
        .options()
        .iter()
        .enumerate()
        .map(|(i, o)| format!("  {}. {}", i + 1, o.label))
        .collect();
    for entry in &listing {
        view.line(entry);
    }
    loop {
        view.prompt("Genre (numéro) : ");
        let Step::Value(raw) = read_line(lines).await? else {
            return Ok(Step::Quit);
        };
        if raw.is_empty() {
            return Ok(Step::Value(None));
        }
        let picked = raw
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|i| *i < view.options().len());
        match picked {
            Some(index) => return Ok(Step::Value(Some(index))),
            None => view.line("Genre invalide."),
        }
    }
}
