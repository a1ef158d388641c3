// Input validation shared by the services. Each check reports the first
// failing field only.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ApiError;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{4,20}$").expect("valid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_username(name: &str) -> Result<(), ApiError> {
    let len = name.chars().count();
    if !(4..=20).contains(&len) {
        return Err(ApiError::invalid_field("name", "must be between 4 and 20 characters"));
    }
    if !USERNAME_RE.is_match(name) {
        return Err(ApiError::invalid_field(
            "name",
            "may only contain letters, numbers and underscores",
        ));
    }
    Ok(())
}

/// Returns the normalized (trimmed, lower-cased) address
pub fn normalize_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::invalid_field("email", "is required"));
    }
    if email.len() > 255 || !EMAIL_RE.is_match(&email) {
        return Err(ApiError::invalid_field("email", "must be a valid email address"));
    }
    Ok(email)
}

pub fn validate_password(field: &str, password: &str, require_strong: bool) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::invalid_field(field, "is required"));
    }
    if !require_strong {
        return Ok(());
    }

    if password.chars().count() < 8 {
        return Err(ApiError::invalid_field(field, "must be at least 8 characters"));
    }
    if password.len() > 128 {
        return Err(ApiError::invalid_field(field, "must be at most 128 characters"));
    }

    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_uppercase || !has_lowercase || !has_digit {
        return Err(ApiError::invalid_field(
            field,
            "must contain an uppercase letter, a lowercase letter and a digit",
        ));
    }
    Ok(())
}

/// A required free-text field; returns the trimmed value
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::invalid_field(field, "is required")),
    }
}

/// An optional free-text field that, when supplied, must not be blank
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => require_text(field, Some(v)).map(Some),
    }
}

pub fn validate_price(price: Option<Decimal>) -> Result<Option<Decimal>, ApiError> {
    match price {
        Some(p) if p.is_sign_negative() && !p.is_zero() => {
            Err(ApiError::invalid_field("price", "must not be negative"))
        }
        Some(p) if p > Decimal::new(99_999_999, 2) => Err(ApiError::invalid_field("price", "is too large")),
        other => Ok(other),
    }
}

pub fn validate_rating(rating: Option<i32>) -> Result<i32, ApiError> {
    match rating {
        Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => Ok(r),
        Some(_) => Err(ApiError::invalid_field("rating", "must be an integer between 1 and 5")),
        None => Err(ApiError::invalid_field("rating", "is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ApiError) -> String {
        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                fields.keys().next().cloned().unwrap_or_default()
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn usernames() {
        assert!(validate_username("alice1").is_ok());
        assert!(validate_username("a_b_").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("abcdefghijklmnopqrstu").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("ñandú").is_err());
        assert_eq!(field_of(validate_username("x").unwrap_err()), "name");
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  A@X.com ").unwrap(), "a@x.com");
        assert!(normalize_email("a@x").is_err());
        assert!(normalize_email("no-at-sign.com").is_err());
        assert!(normalize_email("a b@x.com").is_err());
        assert_eq!(field_of(normalize_email("").unwrap_err()), "email");
    }

    #[test]
    fn strong_password_policy() {
        assert!(validate_password("password", "Passw0rd!", true).is_ok());
        assert!(validate_password("password", "Short1", true).is_err());
        assert!(validate_password("password", "alllowercase1", true).is_err());
        assert!(validate_password("password", "NoDigitsHere", true).is_err());
        assert!(validate_password("password", "", false).is_err());
        assert!(validate_password("password", "x", false).is_ok());
    }

    #[test]
    fn text_fields() {
        assert_eq!(require_text("name", Some("  Court1 ")).unwrap(), "Court1");
        assert!(require_text("name", Some("   ")).is_err());
        assert!(require_text("name", None).is_err());
        assert_eq!(optional_text("name", None).unwrap(), None);
        assert!(optional_text("name", Some("")).is_err());
    }

    #[test]
    fn prices_and_ratings() {
        assert_eq!(validate_price(None).unwrap(), None);
        assert!(validate_price(Some(Decimal::new(50, 0))).is_ok());
        assert!(validate_price(Some(Decimal::new(-1, 0))).is_err());
        assert!(validate_price(Some(Decimal::ZERO)).is_ok());

        assert_eq!(validate_rating(Some(1)).unwrap(), 1);
        assert_eq!(validate_rating(Some(5)).unwrap(), 5);
        assert!(validate_rating(Some(0)).is_err());
        assert!(validate_rating(Some(6)).is_err());
        assert_eq!(field_of(validate_rating(None).unwrap_err()), "rating");
    }
}
