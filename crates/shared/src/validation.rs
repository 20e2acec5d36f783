//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    /// Conservative address pattern: a 1-256 char local part, `@`, a domain
    /// label, then one or more dot-prefixed labels of at most 26 chars.
    pub static ref EMAIL_REGEX: regex::Regex = regex::Regex::new(concat!(
        r"^[a-zA-Z0-9+._%\-]{1,256}",
        r"@",
        r"[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}",
        r"(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    ))
    .unwrap();
}

/// Longest address the `users.email` column stores.
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Returns true when `email` is non-blank, at most [`MAX_EMAIL_LENGTH`] bytes
/// and fully matches [`EMAIL_REGEX`].
pub fn is_valid_email(email: &str) -> bool {
    !email.trim().is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("peter.parker@example.com"));
        assert!(is_valid_email("john+tag@mail.example.org"));
        assert!(is_valid_email("a_b%c-d@sub-domain.co"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("   "));
        assert!(!is_valid_email("@example"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("peter@example"));
        assert!(!is_valid_email("peter parker@example.com"));
        assert!(!is_valid_email("peter@-example.com"));
    }

    #[test]
    fn test_email_pattern_is_anchored() {
        assert!(!is_valid_email("peter@example.com trailing"));
        assert!(!is_valid_email("<peter@example.com>"));
    }

    #[test]
    fn test_email_label_length_limit() {
        let label = "a".repeat(26);
        assert!(is_valid_email(&format!("x@example.{}", label)));
        let label = "a".repeat(27);
        assert!(!is_valid_email(&format!("x@example.{}", label)));
    }

    #[test]
    fn test_email_total_length_limit() {
        // Pattern-valid at any length; the column bound decides
        let local = "a".repeat(64);
        let domain = vec!["b".repeat(20); 14].join(".");
        let long = format!("{}@{}", local, domain);
        assert!(long.len() > MAX_EMAIL_LENGTH);
        assert!(EMAIL_REGEX.is_match(&long));
        assert!(!is_valid_email(&long));

        let label = "y".repeat(25);
        let exact = format!("{}@example.{}.{}.com", "a".repeat(256), label, label);
        assert_eq!(exact.len(), MAX_EMAIL_LENGTH);
        assert!(is_valid_email(&exact));
        assert!(!is_valid_email(&format!("{}x", exact)));
    }

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_latitude(-90.1).is_err());
    }

    #[test]
    fn test_validate_latitude_error_message() {
        let err = validate_latitude(100.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Latitude must be between -90 and 90"
        );
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.1).is_err());
        assert!(validate_longitude(-180.1).is_err());
    }
}
