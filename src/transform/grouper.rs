//! Partition flat export rows into product groups.
//!
//! A Shopify export is one row per variant; rows belonging to the same
//! product share a `Handle`. The first row of a group is authoritative
//! for shared fields (title, description, tags, price) and the remaining
//! rows contribute variants.
//!
//! ```text
//! CSV input (flat rows)              →  Groups (first-seen order)
//! ┌──────────────────────────────┐     ┌──────────────────────────┐
//! │ Handle: shirt, Size: S       │     │ shirt: [S, M]            │
//! │ Handle: shirt, Size: M       │  →  ├──────────────────────────┤
//! │ Handle: mug,   Size: (none)  │     │ mug: [(none)]            │
//! └──────────────────────────────┘     └──────────────────────────┘
//! ```
//!
//! Group order is first-seen order of handles; the emission cap in the
//! shaper depends on it, so the ordering is kept explicit with an
//! `IndexMap` rather than re-sorting a hash map.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ShapeError, ShapeResult};

/// Column carrying the grouping key.
pub const HANDLE: &str = "Handle";

/// Partition rows by `Handle`, preserving first-seen group order.
///
/// Every row must carry the handle column; its absence is a
/// [`ShapeError::MissingColumn`] aborting the whole file.
pub fn group_by_handle(rows: &[Value]) -> ShapeResult<IndexMap<String, Vec<&Value>>> {
    let mut groups: IndexMap<String, Vec<&Value>> = IndexMap::new();

    for row in rows {
        let handle = row
            .get(HANDLE)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ShapeError::MissingColumn(HANDLE.to_string()))?;

        groups.entry(handle.to_string()).or_default().push(row);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let rows = vec![
            json!({"Handle": "shirt", "Title": "Shirt"}),
            json!({"Handle": "mug", "Title": "Mug"}),
            json!({"Handle": "shirt", "Title": ""}),
            json!({"Handle": "poster", "Title": "Poster"}),
        ];

        let groups = group_by_handle(&rows).unwrap();
        let handles: Vec<&String> = groups.keys().collect();

        assert_eq!(handles, ["shirt", "mug", "poster"]);
        assert_eq!(groups["shirt"].len(), 2);
        assert_eq!(groups["mug"].len(), 1);
    }

    #[test]
    fn test_first_row_stays_first() {
        let rows = vec![
            json!({"Handle": "shirt", "Title": "The Shirt"}),
            json!({"Handle": "shirt", "Title": ""}),
        ];

        let groups = group_by_handle(&rows).unwrap();
        assert_eq!(groups["shirt"][0]["Title"], "The Shirt");
    }

    #[test]
    fn test_missing_handle_column() {
        let rows = vec![json!({"Title": "No handle here"})];
        let err = group_by_handle(&rows).unwrap_err();
        assert!(matches!(err, ShapeError::MissingColumn(c) if c == "Handle"));
    }
}
