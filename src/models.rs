use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ValidationError;

pub const FIELD_TITLE: &str = "titre";
pub const FIELD_POSTER: &str = "affiche";
pub const FIELD_DATE: &str = "jourSeance";
pub const FIELD_TIME: &str = "heureSeance";
pub const FIELD_DURATION: &str = "duree";
pub const FIELD_LANGUAGE: &str = "langue";
pub const FIELD_ROOM: &str = "salle";
pub const FIELD_SEAT: &str = "siege";

const FIELD_NOTE: &str = "note";
const FIELD_FAVORITE: &str = "coupDeCoeur";
const FIELD_GENRE: &str = "genre";

pub const MAX_STARS: u8 = 5;

/// One unrated screening as sent by the remote endpoint. Every field is
/// optional and unknown fields are carried through to the submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieRecord(pub Map<String, Value>);

impl MovieRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the field as display text, or `None` when it is missing or
    /// falsy (`null`, `false`, `0`, `""`).
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn title(&self) -> String {
        self.text(FIELD_TITLE).unwrap_or_default()
    }
}

impl From<Value> for MovieRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StarRating(u8);

impl StarRating {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StarRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_STARS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::MissingRating)
        }
    }
}

/// Movie fields merged with the user's rating. The user fields win over any
/// movie field with the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSubmission {
    pub movie: MovieRecord,
    pub note: StarRating,
    pub coup_de_coeur: bool,
    pub genre: String,
}

impl RatingSubmission {
    pub fn new(movie: MovieRecord, note: StarRating, coup_de_coeur: bool, genre: String) -> Self {
        Self {
            movie,
            note,
            coup_de_coeur,
            genre,
        }
    }
}

impl Serialize for RatingSubmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.movie.0 {
            if matches!(key.as_str(), FIELD_NOTE | FIELD_FAVORITE | FIELD_GENRE) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(FIELD_NOTE, &self.note.get())?;
        map.serialize_entry(FIELD_FAVORITE, &self.coup_de_coeur)?;
        map.serialize_entry(FIELD_GENRE, &self.genre)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MovieRecord {
        MovieRecord::from(value)
    }

    #[test]
    fn falsy_fields_read_as_absent() {
        let movie = record(json!({
            "duree": "",
            "langue": null,
            "salle": 0,
            "siege": false,
        }));
        assert_eq!(movie.text(FIELD_DURATION), None);
        assert_eq!(movie.text(FIELD_LANGUAGE), None);
        assert_eq!(movie.text(FIELD_ROOM), None);
        assert_eq!(movie.text(FIELD_SEAT), None);
        assert_eq!(movie.text("missing"), None);
    }

    #[test]
    fn numbers_render_plainly() {
        let movie = record(json!({ "salle": 7, "siege": 1.5 }));
        assert_eq!(movie.text(FIELD_ROOM).as_deref(), Some("7"));
        assert_eq!(movie.text(FIELD_SEAT).as_deref(), Some("1.5"));
    }

    #[test]
    fn star_rating_bounds() {
        assert!(StarRating::try_from(0).is_err());
        assert_eq!(StarRating::try_from(1).map(StarRating::get), Ok(1));
        assert_eq!(StarRating::try_from(5).map(StarRating::get), Ok(5));
        assert!(StarRating::try_from(6).is_err());
    }

    #[test]
    fn submission_payload_matches_example() {
        let movie = record(json!({ "titre": "Film A" }));
        let note = StarRating::try_from(4).unwrap();
        let submission = RatingSubmission::new(movie, note, true, "Comédie".to_string());
        let payload = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            payload,
            json!({ "titre": "Film A", "note": 4, "coupDeCoeur": true, "genre": "Comédie" })
        );
    }

    #[test]
    fn submission_keeps_passthrough_and_overrides_collisions() {
        let movie = record(json!({
            "titre": "Film B",
            "row": 12,
            "note": "stale",
            "genre": "old",
        }));
        let note = StarRating::try_from(2).unwrap();
        let submission = RatingSubmission::new(movie, note, false, "Drame".to_string());
        let payload = serde_json::to_value(&submission).unwrap();
        assert_eq!(payload["row"], json!(12));
        assert_eq!(payload["note"], json!(2));
        assert_eq!(payload["genre"], json!("Drame"));
        assert_eq!(payload["coupDeCoeur"], json!(false));
    }
}
