//! URL query-string codec.
//!
//! Values are strings on the wire; parsing is lossy for anything richer.
//! `stringify` takes `Option<String>` values so callers can express "absent"
//! (`None`) distinctly from "empty" (`Some("")`) and skip either.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to encode query string: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StringifyOptions {
    /// Drop pairs whose value is `None`.
    pub skip_null: bool,
    /// Drop pairs whose value is `Some("")`.
    pub skip_empty_string: bool,
}

/// Decodes a query string (with or without a leading `?`) into a map.
/// Duplicate keys keep the last occurrence. Undecodable input yields an
/// empty map rather than an error.
pub fn parse(query: &str) -> BTreeMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs.into_iter().collect(),
        Err(err) => {
            log::warn!("query::parse: discarding undecodable query string: {err}");
            BTreeMap::new()
        }
    }
}

/// Percent-encodes `pairs` into a query string (no leading `?`).
/// A non-skipped `None` serializes as an empty value.
pub fn stringify<I>(pairs: I, options: StringifyOptions) -> Result<String, QueryError>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    let filtered: Vec<(String, String)> = pairs
        .into_iter()
        .filter_map(|(key, value)| match value {
            None if options.skip_null => None,
            None => Some((key, String::new())),
            Some(v) if options.skip_empty_string && v.is_empty() => None,
            Some(v) => Some((key, v)),
        })
        .collect();
    Ok(serde_urlencoded::to_string(filtered)?)
}
