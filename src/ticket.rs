use crate::models::{
    MovieRecord, FIELD_DATE, FIELD_DURATION, FIELD_LANGUAGE, FIELD_POSTER, FIELD_ROOM,
    FIELD_SEAT, FIELD_TIME,
};

pub const DATE_PLACEHOLDER: &str = "XX/XX/XXXX";
pub const TIME_PLACEHOLDER: &str = "XX:XX";
pub const DURATION_PLACEHOLDER: &str = "XhXX";
pub const LANGUAGE_PLACEHOLDER: &str = "VF";
pub const ROOM_PLACEHOLDER: &str = "Salle XX";
pub const SEAT_PLACEHOLDER: &str = "Siège AXX";

/// Grey 296x242 SVG reading "Affiche non disponible".
pub const POSTER_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"296\" height=\"242\" viewBox=\"0 0 296 242\"%3E%3Crect fill=\"%23e0e0e0\" width=\"296\" height=\"242\"/%3E%3Ctext x=\"50%25\" y=\"50%25\" dominant-baseline=\"middle\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"18\" fill=\"%23999\"%3EAffiche non disponible%3C/text%3E%3C/svg%3E";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
    Url(String),
    Placeholder,
}

impl Poster {
    pub fn src(&self) -> &str {
        match self {
            Poster::Url(url) => url,
            Poster::Placeholder => POSTER_PLACEHOLDER,
        }
    }
}

/// Display strings for one movie card. Each field falls back on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub title: String,
    pub poster: Poster,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub language: String,
    pub room: String,
    pub seat: String,
}

impl Ticket {
    pub fn from_movie(movie: &MovieRecord) -> Self {
        let or = |key: &str, placeholder: &str| {
            movie.text(key).unwrap_or_else(|| placeholder.to_string())
        };
        Self {
            title: movie.title(),
            poster: movie
                .text(FIELD_POSTER)
                .map(Poster::Url)
                .unwrap_or(Poster::Placeholder),
            date: or(FIELD_DATE, DATE_PLACEHOLDER),
            time: or(FIELD_TIME, TIME_PLACEHOLDER),
            duration: or(FIELD_DURATION, DURATION_PLACEHOLDER),
            language: or(FIELD_LANGUAGE, LANGUAGE_PLACEHOLDER),
            room: movie
                .text(FIELD_ROOM)
                .map(|r| format!("Salle {r}"))
                .unwrap_or_else(|| ROOM_PLACEHOLDER.to_string()),
            seat: movie
                .text(FIELD_SEAT)
                .map(|s| format!("Siège {s}"))
                .unwrap_or_else(|| SEAT_PLACEHOLDER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_movie() -> MovieRecord {
        MovieRecord::from(json!({
            "titre": "Film A",
            "affiche": "https://img.test/a.jpg",
            "jourSeance": "12/03/2025",
            "heureSeance": "20:45",
            "duree": "2h05",
            "langue": "VOST",
            "salle": "4",
            "siege": "F12",
        }))
    }

    #[test]
    fn renders_every_field() {
        let ticket = Ticket::from_movie(&full_movie());
        assert_eq!(ticket.title, "Film A");
        assert_eq!(ticket.poster, Poster::Url("https://img.test/a.jpg".to_string()));
        assert_eq!(ticket.date, "12/03/2025");
        assert_eq!(ticket.time, "20:45");
        assert_eq!(ticket.duration, "2h05");
        assert_eq!(ticket.language, "VOST");
        assert_eq!(ticket.room, "Salle 4");
        assert_eq!(ticket.seat, "Siège F12");
    }

    #[test]
    fn missing_duration_only_touches_duration() {
        let mut movie = full_movie();
        movie.0.remove("duree");
        let expected = Ticket {
            duration: DURATION_PLACEHOLDER.to_string(),
            ..Ticket::from_movie(&full_movie())
        };
        assert_eq!(Ticket::from_movie(&movie), expected);
    }

    #[test]
    fn empty_record_gets_all_placeholders() {
        let ticket = Ticket::from_movie(&MovieRecord::default());
        assert_eq!(ticket.title, "");
        assert_eq!(ticket.poster, Poster::Placeholder);
        assert_eq!(ticket.date, "XX/XX/XXXX");
        assert_eq!(ticket.time, "XX:XX");
        assert_eq!(ticket.duration, "XhXX");
        assert_eq!(ticket.language, "VF");
        assert_eq!(ticket.room, "Salle XX");
        assert_eq!(ticket.seat, "Siège AXX");
    }

    #[test]
    fn empty_poster_url_uses_placeholder() {
        let movie = MovieRecord::from(json!({ "affiche": "" }));
        let ticket = Ticket::from_movie(&movie);
        assert_eq!(ticket.poster.src(), POSTER_PLACEHOLDER);
        assert!(POSTER_PLACEHOLDER.contains("Affiche non disponible"));
    }

    #[test]
    fn numeric_room_is_prefixed() {
        let movie = MovieRecord::from(json!({ "salle": 3 }));
        assert_eq!(Ticket::from_movie(&movie).room, "Salle 3");
    }
}
