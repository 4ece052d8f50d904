use crate::error::DriftError;
use crate::parser::Entries;
use fs_err as fs;
use serde_json::{Map, Value};
use std::path::Path;

/// Separator used when flattening nested objects into keys.
pub const KEY_SEPARATOR: char = '.';

/// Reads and parses a JSON locale file.
pub fn parse_file(path: &Path) -> Result<Entries, DriftError> {
    let content = fs::read_to_string(path)?;
    parse_str(&content, path)
}

/// Parses JSON locale content.
///
/// Nested objects are flattened (`{"menu": {"open": "Open"}}` becomes
/// `menu.open`). String leaves are kept verbatim, every other leaf is stored
/// as its compact JSON text.
pub fn parse_str(content: &str, path: &Path) -> Result<Entries, DriftError> {
    let value: Value = serde_json::from_str(content).map_err(|source| DriftError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(object) = value else {
        return Err(DriftError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    let mut entries = Entries::new();
    flatten_into(None, object, &mut entries, path)?;
    Ok(entries)
}

fn flatten_into(
    prefix: Option<&str>,
    object: Map<String, Value>,
    entries: &mut Entries,
    path: &Path,
) -> Result<(), DriftError> {
    for (key, value) in object {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{KEY_SEPARATOR}{key}"),
            None => key,
        };

        let text = match value {
            Value::Object(nested) => {
                flatten_into(Some(&key), nested, entries, path)?;
                continue;
            },
            Value::String(text) => text,
            other => other.to_string(),
        };

        if entries.contains_key(&key) {
            return Err(DriftError::DuplicateKey {
                path: path.to_path_buf(),
                key,
            });
        }
        entries.insert(key, text);
    }

    Ok(())
}
