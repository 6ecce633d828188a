//! Parser for the freedesktop `os-release` format.

use std::collections::HashMap;

/// Parsed `KEY=value` pairs from an os-release file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    entries: HashMap<String, String>,
}

impl OsRelease {
    /// Parse os-release content.
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. Keys and
    /// values are trimmed, and one matching pair of surrounding quotes is
    /// removed from the value. Later duplicates win.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
            .collect();

        Self { entries }
    }

    /// Non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Distribution name (`NAME`).
    pub fn name(&self) -> Option<&str> {
        self.get("NAME")
    }

    /// Distribution version (`VERSION`, falling back to `VERSION_ID`).
    pub fn version(&self) -> Option<&str> {
        self.get("VERSION").or_else(|| self.get("VERSION_ID"))
    }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if value.len() >= 2 => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
