//! # Domain models for gallery memories and users
//!
//! Defines the data structures that cross every boundary in the workspace:
//! the client store, the REST API, and the storage backends. All of them are
//! `Serialize + Deserialize` so the same types appear on the wire and in the
//! on-device JSON document.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Memory`] | A persisted gallery record: photo, title, description, and the day it was saved. |
//! | [`NewMemory`] | A create draft, before the backend assigns `id`, `date`, and `created_at`. |
//! | [`User`] / [`NewUser`] | The reserved account entity. Carried by the schema and [`crate::UserStore`], wired to no route. |
//! | [`ValidationErrors`] | Per-field problems found while checking a create payload. |

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single saved memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    /// Backend-assigned, unique, never reused.
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Remote URL or inline `data:` URL, stored as-is.
    pub image: String,
    /// `YYYY-MM-DD`, stamped by the backend on creation.
    pub date: String,
    /// Stamped at insert. No endpoint reads it.
    pub created_at: DateTime<Utc>,
}

/// A validated draft for creating a [`Memory`].
///
/// `date` is accepted on the wire for compatibility with older clients but is
/// ignored: every backend stamps the current day itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl NewMemory {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            date: None,
        }
    }

    /// Check an already-typed draft: title, description, and image must be
    /// non-empty after trimming.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("image", &self.image),
        ] {
            if value.trim().is_empty() {
                errors.push(field, "must not be empty");
            }
        }
        errors.into_result(())
    }

    /// Parse and validate a raw JSON request body.
    ///
    /// Collects every field problem instead of stopping at the first, so the
    /// caller can return them all in one response.
    pub fn from_value(value: &Value) -> Result<NewMemory, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let Some(body) = value.as_object() else {
            errors.push("body", "must be a JSON object");
            return Err(errors);
        };

        let title = required_string(body, "title", &mut errors);
        let description = required_string(body, "description", &mut errors);
        let image = required_string(body, "image", &mut errors);

        let date = match body.get("date") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push("date", "must be a string");
                None
            }
        };

        errors.into_result(NewMemory {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            image: image.unwrap_or_default(),
            date,
        })
    }
}

fn required_string(
    body: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => errors.push(field, "is required"),
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(field, "must not be empty")
        }
        Some(Value::String(s)) => return Some(s.clone()),
        Some(_) => errors.push(field, "must be a string"),
    }
    None
}

/// Field-level problems found while validating a create payload.
///
/// Serializes as a plain `{"field": "problem"}` map so it can be embedded in
/// an error response and read back by the HTTP client backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn push(&mut self, field: &str, problem: &str) {
        self.0.insert(field.to_string(), problem.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn into_result<T>(self, ok: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, problem) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{field} {problem}")?;
            first = false;
        }
        Ok(())
    }
}

/// Account record reserved for future authentication. No route reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

/// Insert shape for [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_complete_body() {
        let draft = NewMemory::from_value(&json!({
            "title": "Beach trip",
            "description": "Sunset at the shore",
            "image": "data:image/png;base64,AAAA",
            "date": "2024-01-01",
        }))
        .unwrap();

        assert_eq!(draft.title, "Beach trip");
        assert_eq!(draft.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn date_is_optional() {
        let draft = NewMemory::from_value(&json!({
            "title": "t",
            "description": "d",
            "image": "i",
        }))
        .unwrap();
        assert!(draft.date.is_none());
    }

    #[test]
    fn collects_every_missing_field() {
        let errors = NewMemory::from_value(&json!({ "title": "ok" })).unwrap_err();
        assert!(errors.get("title").is_none());
        assert_eq!(errors.get("description"), Some("is required"));
        assert_eq!(errors.get("image"), Some("is required"));
    }

    #[test]
    fn rejects_wrong_types_and_blank_strings() {
        let errors = NewMemory::from_value(&json!({
            "title": "   ",
            "description": 7,
            "image": "i",
            "date": false,
        }))
        .unwrap_err();
        assert_eq!(errors.get("title"), Some("must not be empty"));
        assert_eq!(errors.get("description"), Some("must be a string"));
        assert_eq!(errors.get("date"), Some("must be a string"));
    }

    #[test]
    fn rejects_non_object_body() {
        let errors = NewMemory::from_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.get("body"), Some("must be a JSON object"));
    }

    #[test]
    fn typed_draft_validation_matches_wire_rules() {
        assert!(NewMemory::new("t", "d", "i").validate().is_ok());
        let errors = NewMemory::new("", "d", " ").validate().unwrap_err();
        assert!(errors.get("title").is_some());
        assert!(errors.get("image").is_some());
        assert!(errors.get("description").is_none());
    }
}
