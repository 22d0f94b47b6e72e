// Sub-modules organized by functional domain
pub mod api;
pub mod course;
pub mod student;

// API response structures
pub use api::*;

// Course models
pub use course::*;

// Student models
pub use student::*;

use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};

/// Query filters treat `?id=` the same as an absent `id`.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_values_are_ignored() {
        let filter: CourseFilter = serde_json::from_str(r#"{"id": "", "name": ""}"#).unwrap();
        assert_eq!(filter.id, None);
        assert_eq!(filter.name, None);

        let filter: StudentFilter = serde_json::from_str(r#"{"id": "3", "name": "Ada"}"#).unwrap();
        assert_eq!(filter.id, Some(3));
        assert_eq!(filter.name.as_deref(), Some("Ada"));

        let filter: CourseFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.id.is_none() && filter.name.is_none());

        assert!(serde_json::from_str::<CourseFilter>(r#"{"id": "abc"}"#).is_err());
    }
}
