use crate::models::MAX_STARS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarStyle {
    Active,
    Inactive,
}

/// Emphasis for each star icon once `rating` is picked: icons up to the
/// rating are active, the rest inactive. `0` clears every star.
pub fn star_styles(rating: u8) -> Vec<StarStyle> {
    (1..=MAX_STARS)
        .map(|pos| {
            if pos <= rating {
                StarStyle::Active
            } else {
                StarStyle::Inactive
            }
        })
        .collect()
}

pub fn stars_text(styles: &[StarStyle]) -> String {
    styles
        .iter()
        .map(|s| match s {
            StarStyle::Active => '★',
            StarStyle::Inactive => '☆',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_stars() {
        use StarStyle::*;
        assert_eq!(star_styles(3), vec![Active, Active, Active, Inactive, Inactive]);
        assert_eq!(stars_text(&star_styles(3)), "★★★☆☆");
    }

    #[test]
    fn zero_and_overflow() {
        assert!(star_styles(0).iter().all(|s| *s == StarStyle::Inactive));
        assert!(star_styles(9).iter().all(|s| *s == StarStyle::Active));
        assert_eq!(star_styles(9).len(), MAX_STARS as usize);
    }
}
