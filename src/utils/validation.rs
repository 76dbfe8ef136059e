use crate::utils::error::{HealthCheckError, Result};
use chrono::{DateTime, Utc};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(HealthCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HealthCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(HealthCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
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
        return Err(HealthCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(HealthCheckError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn parse_timestamp(field_name: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| HealthCheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected an RFC 3339 timestamp: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("root", "./workflows").is_ok());
        assert!(validate_path("root", "").is_err());
        assert!(validate_path("root", "   ").is_err());
        assert!(validate_path("root", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_concurrency", 4, 1).is_ok());
        assert!(validate_positive_number("max_concurrency", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("read_timeout_ms", 2000u64, 1, 60_000).is_ok());
        assert!(validate_range("read_timeout_ms", 0u64, 1, 60_000).is_err());
        assert!(validate_range("read_timeout_ms", 60_001u64, 1, 60_000).is_err());
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("timestamp", "2024-05-01T12:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        assert!(parse_timestamp("timestamp", "yesterday").is_err());
    }
}
