// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ratings::WireReview;

pub const MAX_COMMENT_LEN: usize = 500;

/// A review as the UI holds it: a read-through projection of the backend row.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,          // opaque id owned by the backend
    pub author_id: i64,
    pub author: String,
    pub rating: u8,          // 1-5
    pub comment: String,     // may be empty, never over MAX_COMMENT_LEN
    pub date: Option<DateTime<Utc>>,
    pub helpful_count: u32,
    pub not_helpful_count: u32,
}

impl Review {
    pub fn from_wire(item: WireReview) -> Self {
        Self {
            id: item.review_id,
            author_id: item.buyer_id,
            author: item.buyer_name,
            rating: item.rating,
            comment: item.comment.unwrap_or_default(),
            date: DateTime::parse_from_rfc3339(&item.date)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            helpful_count: item.votes.up,
            not_helpful_count: item.votes.down,
        }
    }

    /// Edit/delete affordances are only offered to the author.
    pub fn authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    pub fn display_date(&self) -> String {
        self.date
            .map(|d| d.format("%B %e, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Aggregate rating for one product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    /// Numeric label rounds to the nearest 0.1.
    pub fn rounded_average(&self) -> f64 {
        (self.average * 10.0).round() / 10.0
    }

    /// Star fill rounds to the nearest whole star.
    pub fn filled_stars(&self) -> u8 {
        self.average.round().clamp(0.0, 5.0) as u8
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.rounded_average(), self.count)
    }
}

/// Recompute the aggregate from an already-mapped review list. Used by the
/// page header mirror so it stays in sync without a second fetch.
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary::default();
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    RatingSummary {
        average: f64::from(sum) / reviews.len() as f64,
        count: reviews.len() as u32,
    }
}

/// A user's helpfulness choice on one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Up,
    Down,
}

impl VoteChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteChoice::Up => "up",
            VoteChoice::Down => "down",
        }
    }
}

/// The stars carry the mandatory part of a review.
pub fn validate_rating(rating: u8) -> Result<(), String> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err("Please pick a star rating before publishing.".to_string())
    }
}

/// The comment itself is optional; only the upper bound is enforced.
pub fn validate_comment(text: &str) -> Result<(), String> {
    if text.chars().count() > MAX_COMMENT_LEN {
        Err(format!(
            "The comment is too long ({MAX_COMMENT_LEN} characters max)."
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::VoteTotals;

    fn wire_review() -> WireReview {
        WireReview {
            review_id: "r-1".into(),
            comment: Some("Warm and well made".into()),
            rating: 4,
            date: "2026-08-01T12:30:00Z".into(),
            buyer_id: 10,
            buyer_name: "UserTest".into(),
            votes: VoteTotals { up: 3, down: 1 },
        }
    }

    #[test]
    fn maps_wire_item_to_view_record() {
        let review = Review::from_wire(wire_review());
        assert_eq!(review.id, "r-1");
        assert_eq!(review.author_id, 10);
        assert_eq!(review.author, "UserTest");
        assert_eq!(review.rating, 4);
        assert_eq!(review.comment, "Warm and well made");
        assert!(review.date.is_some());
        assert_eq!(review.helpful_count, 3);
        assert_eq!(review.not_helpful_count, 1);
    }

    #[test]
    fn missing_comment_maps_to_empty_string() {
        let mut wire = wire_review();
        wire.comment = None;
        assert_eq!(Review::from_wire(wire).comment, "");
    }

    #[test]
    fn unparseable_date_is_none() {
        let mut wire = wire_review();
        wire.date = "not a date".into();
        let review = Review::from_wire(wire);
        assert!(review.date.is_none());
        assert_eq!(review.display_date(), "");
    }

    #[test]
    fn author_gate() {
        let review = Review::from_wire(wire_review());
        assert!(review.authored_by(10));
        assert!(!review.authored_by(45));
    }

    #[test]
    fn label_rounds_to_one_decimal() {
        let summary = RatingSummary {
            average: 4.0,
            count: 2,
        };
        assert_eq!(summary.label(), "4 (2)");
        assert_eq!(summary.filled_stars(), 4);

        let summary = RatingSummary {
            average: 4.26,
            count: 19,
        };
        assert!((summary.rounded_average() - 4.3).abs() < 1e-9);
        assert_eq!(summary.filled_stars(), 4);
    }

    #[test]
    fn fill_rounds_to_nearest_whole_star() {
        let halfway = RatingSummary {
            average: 4.5,
            count: 2,
        };
        assert_eq!(halfway.filled_stars(), 5);
        let low = RatingSummary {
            average: 1.4,
            count: 5,
        };
        assert_eq!(low.filled_stars(), 1);
    }

    #[test]
    fn summarize_is_mean_of_ratings() {
        let reviews: Vec<Review> = [5u8, 4, 3]
            .iter()
            .map(|&rating| {
                let mut wire = wire_review();
                wire.rating = rating;
                Review::from_wire(wire)
            })
            .collect();
        let summary = summarize(&reviews);
        assert_eq!(summary.count, 3);
        assert!((summary.average - 4.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_empty_is_zero() {
        assert_eq!(summarize(&[]), RatingSummary::default());
    }

    #[test]
    fn rating_must_be_one_to_five() {
        assert!(validate_rating(0).is_err());
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn comment_bounded_at_500_chars() {
        assert!(validate_comment("").is_ok());
        assert!(validate_comment(&"x".repeat(MAX_COMMENT_LEN)).is_ok());
        assert!(validate_comment(&"x".repeat(MAX_COMMENT_LEN + 1)).is_err());
    }
}
