use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Regex for specimen catalog numbers
    /// Must start with a letter or digit; may contain letters, digits, '-', '_', '/' and '.'
    /// - Valid: "MIN-0042", "2024/117", "A.12_b"
    /// - Invalid: "-12", "cat no", "#12", ""
    pub static ref CATALOG_NUMBER_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\-_/.]*$").unwrap();
}

/// `validator` hook rejecting values that are empty after trimming
pub fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Trim a required text field, failing with a validation error when nothing is left
pub fn require_non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank input to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn check_latitude(latitude: Option<f64>) -> Result<()> {
    match latitude {
        Some(lat) if !(-90.0..=90.0).contains(&lat) => Err(AppError::Validation(
            "latitude must be between -90 and 90".to_string(),
        )),
        _ => Ok(()),
    }
}

pub fn check_longitude(longitude: Option<f64>) -> Result<()> {
    match longitude {
        Some(lng) if !(-180.0..=180.0).contains(&lng) => Err(AppError::Validation(
            "longitude must be between -180 and 180".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_number_regex_valid() {
        assert!(CATALOG_NUMBER_REGEX.is_match("MIN-0042"));
        assert!(CATALOG_NUMBER_REGEX.is_match("2024/117"));
        assert!(CATALOG_NUMBER_REGEX.is_match("A.12_b"));
        assert!(CATALOG_NUMBER_REGEX.is_match("7"));
    }

    #[test]
    fn test_catalog_number_regex_invalid() {
        assert!(!CATALOG_NUMBER_REGEX.is_match("-12")); // starts with hyphen
        assert!(!CATALOG_NUMBER_REGEX.is_match("cat no")); // space
        assert!(!CATALOG_NUMBER_REGEX.is_match("#12")); // symbol
        assert!(!CATALOG_NUMBER_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_require_non_blank_trims() {
        assert_eq!(require_non_blank("name", "  Brazil ").unwrap(), "Brazil");
        assert!(matches!(
            require_non_blank("name", " \t\n"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("quarry").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some(" SiO2 ".to_string())),
            Some("SiO2".to_string())
        );
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn test_coordinate_ranges() {
        assert!(check_latitude(Some(-20.38)).is_ok());
        assert!(check_latitude(None).is_ok());
        assert!(check_latitude(Some(91.0)).is_err());
        assert!(check_longitude(Some(-43.5)).is_ok());
        assert!(check_longitude(Some(-180.5)).is_err());
    }
}
