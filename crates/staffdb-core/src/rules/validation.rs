//! Field validation rules
//!
//! Shared by model constructors and setters. Every rule validates before the
//! caller mutates anything, so a rejected value never leaves a partial object.

use crate::errors::{Result, StaffError};

/// Earliest year a review may be filed for
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Reject review years before [`MIN_REVIEW_YEAR`]
///
/// # Errors
/// `InvalidYear`
pub fn validate_year(year: i64) -> Result<()> {
    if year < MIN_REVIEW_YEAR {
        return Err(StaffError::InvalidYear { year });
    }
    Ok(())
}

/// Reject empty review summaries
///
/// Whitespace-only summaries are accepted; only the empty string is refused.
///
/// # Errors
/// `InvalidSummary`
pub fn validate_summary(summary: &str) -> Result<()> {
    if summary.is_empty() {
        return Err(StaffError::InvalidSummary {
            reason: "summary must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

/// Reject empty department or employee names
///
/// # Errors
/// `InvalidName`
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StaffError::InvalidName {
            reason: "name must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

/// Reject empty job titles
///
/// # Errors
/// `InvalidJobTitle`
pub fn validate_job_title(job_title: &str) -> Result<()> {
    if job_title.is_empty() {
        return Err(StaffError::InvalidJobTitle {
            reason: "job title must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

/// Reject empty department locations
///
/// # Errors
/// `InvalidLocation`
pub fn validate_location(location: &str) -> Result<()> {
    if location.is_empty() {
        return Err(StaffError::InvalidLocation {
            reason: "location must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_year_boundary() {
        assert!(validate_year(2000).is_ok());
        assert_eq!(
            validate_year(1999),
            Err(StaffError::InvalidYear { year: 1999 })
        );
    }

    #[test]
    fn test_whitespace_summary_is_accepted() {
        assert!(validate_summary(" ").is_ok());
    }

    #[test]
    fn test_empty_strings_rejected() {
        assert!(matches!(
            validate_summary(""),
            Err(StaffError::InvalidSummary { .. })
        ));
        assert!(matches!(validate_name(""), Err(StaffError::InvalidName { .. })));
        assert!(matches!(
            validate_job_title(""),
            Err(StaffError::InvalidJobTitle { .. })
        ));
        assert!(matches!(
            validate_location(""),
            Err(StaffError::InvalidLocation { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_years_before_floor_rejected(year in i64::MIN..MIN_REVIEW_YEAR) {
            prop_assert_eq!(validate_year(year), Err(StaffError::InvalidYear { year }));
        }

        #[test]
        fn prop_years_from_floor_accepted(year in MIN_REVIEW_YEAR..i64::MAX) {
            prop_assert!(validate_year(year).is_ok());
        }

        #[test]
        fn prop_non_empty_summary_accepted(summary in ".+") {
            prop_assert!(validate_summary(&summary).is_ok());
        }
    }
}
