//! Star ratings.
//!
//! Vendors, products and reviews show a 0–5 rating as a row of five stars.
//! Only whole stars are filled: `4.9` renders four. Out-of-range input is
//! clamped, and NaN renders as zero stars.

pub const MAX_STARS: usize = 5;

/// Number of filled stars for `rating`.
pub fn filled_count(rating: f64) -> usize {
    if rating.is_nan() {
        return 0;
    }
    rating.clamp(0.0, MAX_STARS as f64).floor() as usize
}

/// Filled flags for the five star slots: `filled[i] = i < floor(rating)`.
pub fn stars(rating: f64) -> [bool; MAX_STARS] {
    let filled = filled_count(rating);
    std::array::from_fn(|i| i < filled)
}

/// Render the star row with the given glyphs.
pub fn render(rating: f64, filled: &str, empty: &str) -> String {
    stars(rating)
        .iter()
        .map(|&on| if on { filled } else { empty })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_stars_only() {
        assert_eq!(stars(3.0), [true, true, true, false, false]);
        assert_eq!(stars(4.9), [true, true, true, true, false]);
        assert_eq!(stars(0.5), [false; 5]);
    }

    #[test]
    fn clamps_above_five() {
        assert_eq!(stars(5.7), [true; 5]);
        assert_eq!(filled_count(1e9), 5);
    }

    #[test]
    fn clamps_below_zero() {
        assert_eq!(stars(-1.0), [false; 5]);
        assert_eq!(filled_count(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn nan_is_zero_stars() {
        assert_eq!(filled_count(f64::NAN), 0);
    }

    #[test]
    fn render_uses_glyphs() {
        assert_eq!(render(2.0, "★", "☆"), "★★☆☆☆");
        assert_eq!(render(f64::INFINITY, "*", "."), "*****");
    }
}
