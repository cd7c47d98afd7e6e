//! Plain-text cleanup passes.
//!
//! Three passes run after tag stripping, in this order: literal
//! replacements, marker-delimited range removal, cutoff truncation.
//! All matching is literal substring search on the current state of the
//! text, so earlier passes feed later ones.

/// Apply literal substring replacements sequentially, in order.
///
/// Order is part of the contract: when keys overlap, a later pair sees
/// the text produced by the earlier ones.
pub fn apply_replacements(content: &str, replacements: &[(String, String)]) -> String {
    let mut result = content.to_string();
    for (old, new) in replacements {
        result = result.replace(old.as_str(), new.as_str());
    }
    result
}

/// Delete every span delimited by a (start, end) marker pair, markers
/// included.
///
/// For each pair: find the first start marker; without one, move to the
/// next pair. Find the end marker after it; without one, truncate at the
/// start marker and move on. Otherwise delete the whole span and restart
/// the search from the beginning of the string, which also catches spans
/// whose markers only line up after an earlier deletion. Pairs with an
/// empty marker are skipped.
pub fn remove_ranges(content: &str, ranges: &[(String, String)]) -> String {
    let mut result = content.to_string();

    for (start, end) in ranges {
        if start.is_empty() || end.is_empty() {
            continue;
        }

        loop {
            let Some(start_idx) = result.find(start.as_str()) else {
                break;
            };

            let search_from = start_idx + start.len();
            match result[search_from..].find(end.as_str()) {
                None => {
                    result.truncate(start_idx);
                    break;
                }
                Some(rel) => {
                    let end_idx = search_from + rel + end.len();
                    result.replace_range(start_idx..end_idx, "");
                }
            }
        }
    }

    result
}

/// Truncate at the earliest-occurring cutoff marker.
///
/// The winning marker is the one matching at the lowest string position,
/// regardless of its place in the list. No match leaves the text as is.
pub fn truncate_at_markers(content: &str, markers: &[String]) -> String {
    let mut cut: Option<usize> = None;

    for marker in markers {
        if let Some(idx) = content.find(marker.as_str()) {
            cut = Some(cut.map_or(idx, |current| current.min(idx)));
        }
    }

    match cut {
        Some(idx) => content[..idx].to_string(),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ---- replacements ----

    #[test]
    fn test_replacements_applied_in_order() {
        // The second pair only matches text produced by the first.
        let out = apply_replacements("abc", &pairs(&[("ab", "b"), ("bc", "X")]));
        assert_eq!(out, "X");
    }

    #[test]
    fn test_replacements_all_occurrences() {
        let out = apply_replacements(
            "bando and Bando",
            &pairs(&[("bando", "starlinkprox")]),
        );
        assert_eq!(out, "starlinkprox and Bando");
    }

    // ---- range removal ----

    #[test]
    fn test_range_no_start_marker_unchanged() {
        let out = remove_ranges("nothing to see", &pairs(&[("<start>", "<end>")]));
        assert_eq!(out, "nothing to see");
    }

    #[test]
    fn test_range_multiple_occurrences() {
        let out = remove_ranges("a<del>1</del>b<del>2</del>c", &pairs(&[("<del>", "</del>")]));
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_range_missing_end_truncates() {
        let out = remove_ranges("keep<start>dropped forever", &pairs(&[("<start>", "<end>")]));
        assert_eq!(out, "keep");
    }

    #[test]
    fn test_range_pairs_run_in_sequence() {
        let out = remove_ranges(
            "<script>x</script>text<style>y</style>",
            &pairs(&[("<script>", "</script>"), ("<style>", "</style>")]),
        );
        assert_eq!(out, "text");
    }

    #[test]
    fn test_range_restart_catches_markers_formed_by_deletion() {
        // Deleting "ab1cd" glues the leading "a" to the following "b",
        // forming a new start marker before the deletion point. The
        // restart-from-beginning scan removes that span too; resuming at
        // the deletion point would leave "ab2cd3".
        let out = remove_ranges("aab1cdb2cd3", &pairs(&[("ab", "cd")]));
        assert_eq!(out, "3");
    }

    #[test]
    fn test_range_empty_marker_skipped() {
        let out = remove_ranges("unchanged", &pairs(&[("", "<e>"), ("<s>", "")]));
        assert_eq!(out, "unchanged");
    }

    #[test]
    fn test_range_markers_included_in_deletion() {
        let out = remove_ranges("pre<!-- note -->post", &pairs(&[("<!--", "-->")]));
        assert_eq!(out, "prepost");
    }

    // ---- cutoff truncation ----

    #[test]
    fn test_cutoff_earliest_position_wins() {
        // '#' occurs before '@' even though '@' is listed first.
        let out = truncate_at_markers("x#y@z", &strings(&["@", "#"]));
        assert_eq!(out, "x");
    }

    #[test]
    fn test_cutoff_no_marker_unchanged() {
        let out = truncate_at_markers("plain text", &strings(&["#", "@"]));
        assert_eq!(out, "plain text");
    }

    #[test]
    fn test_cutoff_multibyte_boundary() {
        let out = truncate_at_markers("前面#后面", &strings(&["#"]));
        assert_eq!(out, "前面");
    }

    #[test]
    fn test_cutoff_multi_char_marker() {
        let out = truncate_at_markers("body<ul><li>specs", &strings(&["<ul>"]));
        assert_eq!(out, "body");
    }
}
