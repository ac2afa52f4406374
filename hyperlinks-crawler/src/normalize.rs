use url::Url;

/// Scheme assumed for URLs that arrive without one.
const DEFAULT_SCHEME: &str = "http";

/// Resolve a possibly-relative `reference` against `base` into an absolute,
/// scheme-qualified URL string.
///
/// With no `reference` the result is `base` itself (used to seed the crawl
/// root). References that already carry a network location are returned
/// unchanged, so an absolute scheme-qualified URL normalizes to itself.
/// Pure string work only; never performs I/O.
pub fn normalize(base: &str, reference: Option<&str>) -> String {
    let resolved = match reference {
        Some(reference) if !has_host(reference) => join(base, reference),
        Some(reference) => reference.to_string(),
        None => base.to_string(),
    };
    with_default_scheme(&resolved)
}

/// True for pure in-page fragment references such as `#section`.
pub fn is_fragment(reference: &str) -> bool {
    reference.starts_with('#')
}

fn join(base: &str, reference: &str) -> String {
    Url::parse(&with_default_scheme(base))
        .and_then(|base| base.join(reference))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| reference.to_string())
}

fn has_host(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|parsed| parsed.has_host())
        .unwrap_or(false)
}

fn with_default_scheme(url: &str) -> String {
    if Url::parse(url).is_ok() {
        url.to_string()
    } else {
        format!("{DEFAULT_SCHEME}://{url}")
    }
}
