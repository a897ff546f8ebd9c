//! Flat key/value property file parsing
//!
//! Reads credential files the way `java.util.Properties` does:
//!
//! ```text
//! # comment
//! ! also a comment
//! keyAlias=upload
//! storePassword: secret
//! storeFile C:\\Users\\me\\upload.jks
//! ```
//!
//! The key runs up to the first unescaped `=`, `:` or whitespace. Whitespace
//! before the value is skipped, trailing whitespace is kept. Backslash escapes
//! (`\\`, `\=`, `\:`, `\t`, `\uXXXX`, ...) are decoded in keys and values, and a
//! line ending in an odd number of backslashes continues on the next line.
//! A bad `\u` escape or an empty key is malformed. When a key repeats, the
//! last value wins.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::Chars;

use tracing::warn;

use crate::error::{CredentialError, Result};

/// Characters the properties format treats as whitespace
const WHITESPACE: &[char] = &[' ', '\t', '\u{c}'];

/// Parsed key/value pairs from a property file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: BTreeMap<String, String>,
}

impl PropertyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw file bytes, rejecting content that is not UTF-8
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        match std::str::from_utf8(bytes) {
            Ok(content) => Self::parse(content, path),
            Err(e) => {
                let valid = &bytes[..e.valid_up_to()];
                let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
                Err(CredentialError::Malformed {
                    path: path.to_path_buf(),
                    line,
                    reason: "content is not valid UTF-8".to_string(),
                })
            }
        }
    }

    /// Parse property file content. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut entries = BTreeMap::new();
        let mut lines = content
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .enumerate();

        while let Some((idx, raw)) = lines.next() {
            let first = raw.trim_start_matches(WHITESPACE);
            if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
                continue;
            }

            let mut logical = first.to_string();
            while continues(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                    None => break,
                }
            }

            let malformed = |reason: String| CredentialError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            };

            let (key, value) = split_pair(&logical).map_err(malformed)?;
            if key.is_empty() {
                return Err(malformed("empty key".to_string()));
            }

            if entries.contains_key(&key) {
                warn!(path = %path.display(), key = %key, line = idx + 1, "duplicate property, last value wins");
            }
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Whether a line ends in an odd number of backslashes
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into its decoded key and value
fn split_pair(line: &str) -> std::result::Result<(String, String), String> {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            c if WHITESPACE.contains(&c) => {
                key_end = i;
                let rest = line[i..].trim_start_matches(WHITESPACE);
                let rest = rest.strip_prefix(&['=', ':'][..]).unwrap_or(rest);
                value_start = line.len() - rest.len();
                break;
            }
            _ => {}
        }
    }

    let key = unescape(&line[..key_end])?;
    let value = unescape(line[value_start..].trim_start_matches(WHITESPACE))?;
    Ok((key, value))
}

/// Decode backslash escapes
fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(unicode_escape(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Decode the digits of a `\uXXXX` escape, joining UTF-16 surrogate pairs
fn unicode_escape(chars: &mut Chars<'_>) -> std::result::Result<char, String> {
    let unit = hex_unit(chars)?;
    if !(0xD800..=0xDBFF).contains(&unit) {
        return char::from_u32(u32::from(unit))
            .ok_or_else(|| format!("unpaired surrogate \\u{unit:04X}"));
    }

    let low = match (chars.next(), chars.next()) {
        (Some('\\'), Some('u')) => hex_unit(chars)?,
        _ => return Err(format!("unpaired surrogate \\u{unit:04X}")),
    };
    char::decode_utf16([unit, low])
        .next()
        .and_then(|decoded| decoded.ok())
        .ok_or_else(|| format!("invalid surrogate pair \\u{unit:04X}\\u{low:04X}"))
}

fn hex_unit(chars: &mut Chars<'_>) -> std::result::Result<u16, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed \\uxxxx escape '\\u{digits}'"));
    }
    u16::from_str_radix(&digits, 16).map_err(|e| e.to_string())
}
