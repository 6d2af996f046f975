//! Incremental extraction state.
//!
//! A [`State`] maps each entity to the newest timestamp seen for it. The
//! timestamps use [`DATETIME_FMT`](crate::utils::time::DATETIME_FMT), which
//! is fixed-width and zero-padded, so comparing the strings compares the
//! instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::utils::json::load_json;
use crate::utils::time::strftime;

/// A candidate watermark value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bookmark {
    /// Already formatted as a bookmark string
    Text(String),
    /// A datetime that still needs formatting
    DateTime(DateTime<Utc>),
}

impl Bookmark {
    /// The bookmark as a state string.
    pub fn into_string(self) -> String {
        match self {
            Bookmark::Text(s) => s,
            Bookmark::DateTime(dt) => strftime(&dt),
        }
    }
}

impl From<String> for Bookmark {
    fn from(s: String) -> Self {
        Bookmark::Text(s)
    }
}

impl From<&str> for Bookmark {
    fn from(s: &str) -> Self {
        Bookmark::Text(s.to_string())
    }
}

impl From<DateTime<Utc>> for Bookmark {
    fn from(dt: DateTime<Utc>) -> Self {
        Bookmark::DateTime(dt)
    }
}

impl From<&DateTime<Utc>> for Bookmark {
    fn from(dt: &DateTime<Utc>) -> Self {
        Bookmark::DateTime(*dt)
    }
}

/// High-watermarks keyed by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    bookmarks: BTreeMap<String, String>,
}

impl State {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load state from a JSON object file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading state");
        load_json(path)
    }

    /// Advance the watermark for `entity`.
    ///
    /// `None` is ignored. The stored value only moves forward: a candidate
    /// older than what is stored leaves it unchanged.
    pub fn update<B: Into<Bookmark>>(&mut self, entity: &str, dt: Option<B>) {
        let Some(dt) = dt else {
            return;
        };
        let dt = dt.into().into_string();

        match self.bookmarks.get_mut(entity) {
            Some(current) => {
                if dt >= *current {
                    if dt != *current {
                        debug!(entity = %entity, from = %current, to = %dt, "Advancing bookmark");
                    }
                    *current = dt;
                }
            }
            None => {
                debug!(entity = %entity, to = %dt, "Adding bookmark");
                self.bookmarks.insert(entity.to_string(), dt);
            }
        }
    }

    /// The stored watermark for `entity`.
    pub fn get(&self, entity: &str) -> Option<&str> {
        self.bookmarks.get(entity).map(String::as_str)
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    /// Whether no entity is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Entities and their watermarks, ordered by entity name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bookmarks.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as a JSON object.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Advance the watermark for `entity` in `state`. See [`State::update`].
pub fn update_state<B: Into<Bookmark>>(state: &mut State, entity: &str, dt: Option<B>) {
    state.update(entity, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_update_inserts_new_entity() {
        let mut state = State::new();
        state.update("accounts", Some("2024-01-01T00:00:00Z"));
        assert_eq!(state.get("accounts"), Some("2024-01-01T00:00:00Z"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_update_none_is_noop() {
        let mut state = State::new();
        state.update("accounts", Some("2024-01-01T00:00:00Z"));
        let before = state.clone();

        state.update::<&str>("accounts", None);
        state.update::<DateTime<Utc>>("visitors", None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_only_moves_forward() {
        let mut state = State::new();
        state.update("guides", Some("2024-05-01T12:00:00Z"));
        state.update("guides", Some("2024-04-30T23:59:59Z"));
        assert_eq!(state.get("guides"), Some("2024-05-01T12:00:00Z"));

        state.update("guides", Some("2024-05-01T12:00:01Z"));
        assert_eq!(state.get("guides"), Some("2024-05-01T12:00:01Z"));
    }

    #[test]
    fn test_update_final_value_is_max() {
        let stamps = [
            "2023-06-01T00:00:00Z",
            "2023-12-31T23:59:59Z",
            "2023-01-15T08:30:00Z",
            "2023-12-31T23:59:58Z",
            "2023-07-04T12:00:00Z",
        ];
        let mut state = State::new();
        for ts in stamps {
            state.update("pages", Some(ts));
        }
        assert_eq!(state.get("pages"), stamps.iter().max().copied());
    }

    #[test]
    fn test_update_idempotent() {
        let mut once = State::new();
        once.update("features", Some("2022-02-02T02:02:02Z"));

        let mut twice = once.clone();
        twice.update("features", Some("2022-02-02T02:02:02Z"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_normalizes_datetime() {
        let mut state = State::new();
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
        state.update("events", Some(dt));
        assert_eq!(state.get("events"), Some("2024-03-09T07:05:03Z"));

        // Mixed inputs compare on the formatted string.
        state.update("events", Some("2024-03-09T07:05:02Z"));
        assert_eq!(state.get("events"), Some("2024-03-09T07:05:03Z"));
        state.update("events", Some(&(dt + chrono::Duration::seconds(1))));
        assert_eq!(state.get("events"), Some("2024-03-09T07:05:04Z"));
    }

    #[test]
    fn test_update_entities_are_independent() {
        let mut state = State::new();
        update_state(&mut state, "accounts", Some("2024-01-02T00:00:00Z"));
        update_state(&mut state, "visitors", Some("2020-01-01T00:00:00Z"));
        assert_eq!(state.get("accounts"), Some("2024-01-02T00:00:00Z"));
        assert_eq!(state.get("visitors"), Some("2020-01-01T00:00:00Z"));
        assert_eq!(state.get("guides"), None);
    }

    #[test]
    fn test_state_json_is_plain_object() {
        let mut state = State::new();
        state.update("visitors", Some("2024-01-01T00:00:00Z"));
        state.update("accounts", Some("2024-02-01T00:00:00Z"));

        assert_eq!(
            state.to_json_string().unwrap(),
            r#"{"accounts":"2024-02-01T00:00:00Z","visitors":"2024-01-01T00:00:00Z"}"#
        );
        let entities: Vec<&str> = state.iter().map(|(entity, _)| entity).collect();
        assert_eq!(entities, vec!["accounts", "visitors"]);
    }

    #[test]
    fn test_load_state_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"accounts": "2024-01-01T00:00:00Z"}}"#).unwrap();

        let state = State::load(file.path()).unwrap();
        assert_eq!(state.get("accounts"), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_load_state_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        assert!(State::load(file.path()).is_err());
    }
}
