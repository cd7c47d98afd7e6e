//! HTML element removal.
//!
//! The description column carries storefront markup studded with
//! links, media embeds and tracking buttons that must not reach the
//! destination platform. Removal is structural: the value is parsed as
//! an HTML fragment, every element matching the configured kinds is
//! detached together with its descendants, and the remaining tree is
//! serialized back.

use scraper::{Html, Selector};

use crate::error::{SanitizeError, SanitizeResult};

/// Compile the configured element kinds into one selector.
pub fn build_selector(tags: &[String]) -> SanitizeResult<Selector> {
    let css = tags.join(", ");
    Selector::parse(&css).map_err(|e| SanitizeError::Selector(format!("{:?}", e)))
}

/// Remove every element matching `selector` (and its contents) from an
/// HTML fragment. Empty input passes through unchanged.
pub fn strip_elements(html: &str, selector: &Selector) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut fragment = Html::parse_fragment(html);

    let ids: Vec<_> = fragment.select(selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }

    fragment.root_element().inner_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SanitizerConfig;

    fn strip(html: &str) -> String {
        let selector = build_selector(&SanitizerConfig::default().strip_tags).unwrap();
        strip_elements(html, &selector)
    }

    #[test]
    fn test_anchor_removed_with_its_text() {
        // The whole element goes, not just the tags around its text.
        let out = strip("<p>keep <a href=\"https://x\">the link text</a> tail</p>");
        assert!(!out.contains("the link text"));
        assert!(out.contains("keep"));
        assert!(out.contains("tail"));
    }

    #[test]
    fn test_img_removed() {
        assert_eq!(strip("<p>a<img src=\"u\">b</p>"), "<p>ab</p>");
    }

    #[test]
    fn test_video_removed_with_children() {
        let out = strip("<video controls><source src=\"v.mp4\"></video><p>after</p>");
        assert_eq!(out, "<p>after</p>");
    }

    #[test]
    fn test_button_and_svg_removed() {
        let out = strip("<div><button>Buy</button><svg><path d=\"M0 0\"></path></svg>ok</div>");
        assert_eq!(out, "<div>ok</div>");
    }

    #[test]
    fn test_nested_matches_inside_removed_subtree() {
        // An anchor wrapping an image: removing the anchor takes the
        // image with it, and the already-detached image is not an error.
        let out = strip("<p><a href=\"x\"><img src=\"y\"></a>text</p>");
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(strip("just words"), "just words");
    }

    #[test]
    fn test_empty_passes_through() {
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_unlisted_tags_survive() {
        let out = strip("<p><strong>bold</strong> and <em>italic</em></p>");
        assert_eq!(out, "<p><strong>bold</strong> and <em>italic</em></p>");
    }
}
