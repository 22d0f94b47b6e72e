use chrono::NaiveDate;
use validator::ValidationError;

use crate::error::AppError;

pub fn validate_birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    validate_birth_date_on(date, chrono::Utc::now().date_naive())
}

fn validate_birth_date_on(date: &NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if *date > today {
        let mut error = ValidationError::new("future_date");
        error.message = Some("Birth date cannot be in the future.".into());
        return Err(error);
    }
    Ok(())
}

pub struct UpdateStudentChanges<'a> {
    pub name: Option<&'a str>,
    pub birth_date: Option<Option<&'a NaiveDate>>,
}

pub fn validate_update_student(changes: &UpdateStudentChanges) -> Result<(), AppError> {
    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(AppError::field("name", "blank", "Student name cannot be empty"));
        }
        if name.chars().count() > 256 {
            return Err(AppError::field(
                "name",
                "length",
                "Student name must be at most 256 characters",
            ));
        }
    }
    if let Some(Some(date)) = changes.birth_date {
        validate_birth_date(date)
            .map_err(|_| AppError::field("birth_date", "future_date", "Birth date cannot be in the future"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birth_date_not_in_future() {
        let today = date(2024, 5, 6);
        assert!(validate_birth_date_on(&date(2001, 9, 1), today).is_ok());
        assert!(validate_birth_date_on(&today, today).is_ok());
        assert!(validate_birth_date_on(&date(2024, 5, 7), today).is_err());
    }

    #[test]
    fn test_update_validation() {
        // nothing to change is fine
        let c = UpdateStudentChanges {
            name: None,
            birth_date: None,
        };
        assert!(validate_update_student(&c).is_ok());

        // blank name
        let c = UpdateStudentChanges {
            name: Some("  "),
            birth_date: None,
        };
        assert!(validate_update_student(&c).is_err());

        // clearing the date
        let c = UpdateStudentChanges {
            name: Some("Ada"),
            birth_date: Some(None),
        };
        assert!(validate_update_student(&c).is_ok());

        // too long
        let long = "x".repeat(257);
        let c = UpdateStudentChanges {
            name: Some(&long),
            birth_date: None,
        };
        assert!(validate_update_student(&c).is_err());
    }
}
