use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Deliberately not a full HTML parser: an anchor-opening tag followed by a
// double-quoted href attribute, matched non-greedily.
static A_TAG_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+.*?href="(.*?)""#).expect("valid href pattern"));

/// Pull the raw (possibly relative) href targets out of anchor tags in
/// `html`. Duplicates collapse into the set; malformed markup degrades to
/// fewer matches, never an error.
pub fn extract_links(html: &str) -> HashSet<String> {
    A_TAG_HREF
        .captures_iter(html)
        .map(|captures| captures[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_anchor_hrefs() {
        let html = r#"<html><body>
            <a href="/one">one</a>
            <a class="nav" href="http://x.com/two">two</a>
        </body></html>"#;
        let links = extract_links(html);
        assert_eq!(links.len(), 2);
        assert!(links.contains("/one"));
        assert!(links.contains("http://x.com/two"));
    }

    #[test]
    fn collapses_duplicate_targets() {
        let html = r#"<a href="/same">a</a><a href="/same">b</a>"#;
        assert_eq!(extract_links(html).len(), 1);
    }

    #[test]
    fn tolerates_malformed_markup() {
        let html = "<a href=\"/ok\"><a junk<><p></a href=broken>";
        let links = extract_links(html);
        assert_eq!(links.len(), 1);
        assert!(links.contains("/ok"));
    }

    #[test]
    fn no_anchors_yields_empty_set() {
        assert!(extract_links("<p>plain text</p>").is_empty());
        assert!(extract_links("").is_empty());
    }

    #[test]
    fn ignores_unquoted_and_single_quoted_hrefs() {
        let html = "<a href=/bare>x</a><a href='/single'>y</a>";
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn keeps_fragment_targets_verbatim() {
        // Fragment filtering happens in the engine, not here.
        let links = extract_links(r##"<a href="#section">jump</a>"##);
        assert!(links.contains("#section"));
    }
}
