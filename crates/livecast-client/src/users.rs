//! Loading of the externally maintained user id sets.
//!
//! The files are JSON objects keyed by user id string (the values carry
//! display metadata this layer does not read). Membership checks are by
//! string-cast id, so missing entries only cost detection, never crash.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

/// Read a user id set; a missing or unreadable file yields the empty set.
pub fn load_user_set(path: &Path) -> HashSet<String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "user id set not loaded");
            return HashSet::new();
        }
    };
    match serde_json::from_str::<serde_json::Map<String, Value>>(&text) {
        Ok(map) => map.keys().cloned().collect(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "user id set not valid JSON");
            HashSet::new()
        }
    }
}

/// Convenience over an optional configured path.
pub fn user_set_from(path: Option<&Path>) -> HashSet<String> {
    match path {
        Some(path) => load_user_set(path),
        None => HashSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_keys_of_json_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"5": {{"name": "me"}}, "777545": {{}}}}"#).unwrap();
        let set = load_user_set(file.path());
        assert!(set.contains("5"));
        assert!(set.contains("777545"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let set = load_user_set(Path::new("/nonexistent/users.json"));
        assert!(set.is_empty());
    }
}
