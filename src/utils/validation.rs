use crate::utils::error::{EstimateError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative_number(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Value must be a non-negative number, got {}", value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EstimateError::ValidationError {
                field: field_name.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("project_name", "Villa Ubud").is_ok());
        assert!(validate_non_empty_string("project_name", "").is_err());
        assert!(validate_non_empty_string("project_name", "   ").is_err());
    }

    #[test]
    fn test_validate_non_negative_number() {
        assert!(validate_non_negative_number("land_area", 0.0).is_ok());
        assert!(validate_non_negative_number("land_area", 150.5).is_ok());
        assert!(validate_non_negative_number("land_area", -1.0).is_err());
        assert!(validate_non_negative_number("land_area", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("floors", 1u32, 1, 10).is_ok());
        assert!(validate_range("floors", 10u32, 1, 10).is_ok());
        assert!(validate_range("floors", 0u32, 1, 10).is_err());
        assert!(validate_range("floors", 11u32, 1, 10).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://example.com").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
        assert!(validate_url("endpoint", "not-a-url").is_err());
    }
}
