//! Genres offered when the endpoint cannot provide its own list.

pub const FALLBACK_GENRES: [&str; 9] = [
    "Action",
    "Aventure",
    "Comédie",
    "Drame",
    "Fantastique",
    "Horreur",
    "Romance",
    "Science-Fiction",
    "Thriller",
];

pub fn fallback_genres() -> Vec<String> {
    FALLBACK_GENRES.iter().map(|g| g.to_string()).collect()
}
