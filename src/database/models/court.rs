use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::review::Review;

/// A court annotated with its live review aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub address: String,
    /// `None` means "not specified"
    pub price: Option<Decimal>,
    /// Owner
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rating: f64,
    pub num_reviews: i64,
}

/// Single-court payload: the court plus its reviews, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtDetail {
    #[serde(flatten)]
    pub court: Court,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone)]
pub struct NewCourt {
    pub name: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct CourtChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub price: Option<Decimal>,
}

impl CourtChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.address.is_none()
            && self.price.is_none()
    }
}

/// Average of `ratings` truncated to one decimal, 0 when there are none.
/// Mirrors `COALESCE(TRUNC(AVG(rating), 1), 0)` in the court queries.
pub fn aggregate_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    // Integer arithmetic keeps the truncation exact
    let tenths = sum * 10 / ratings.len() as i64;
    tenths as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reviews_rates_zero() {
        assert_eq!(aggregate_rating(&[]), 0.0);
    }

    #[test]
    fn averages_and_truncates_to_one_decimal() {
        assert_eq!(aggregate_rating(&[4]), 4.0);
        assert_eq!(aggregate_rating(&[4, 5]), 4.5);
        assert_eq!(aggregate_rating(&[3, 4, 4]), 3.6);
        assert_eq!(aggregate_rating(&[5, 5, 4]), 4.6);
    }

    #[test]
    fn empty_changes_detected() {
        assert!(CourtChanges::default().is_empty());
        let changes = CourtChanges {
            price: Some(Decimal::new(50, 0)),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
