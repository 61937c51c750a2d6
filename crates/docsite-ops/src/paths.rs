/// Return true if the provided target points to an external resource (http/mailto/etc.).
pub fn is_external(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
}

/// Strip any `?query` or `#fragment` suffix from a link target.
pub fn strip_suffixes(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Canonical form used to compare routes: no trailing slash, except for the
/// root route `/`.
pub fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Prefix a site-relative route with the site base URL.
pub fn join_base(base_url: &str, route: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if route.starts_with('/') {
        format!("{base}{route}")
    } else {
        format!("{base}/{route}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_targets() {
        assert!(is_external("https://chiselstrike.com"));
        assert!(is_external("MAILTO:team@example.com"));
        assert!(!is_external("/tutorials/"));
        assert!(!is_external("tutorials"));
    }

    #[test]
    fn normalises_trailing_slashes() {
        assert_eq!(normalize_route("/tutorials/"), "/tutorials");
        assert_eq!(normalize_route("/tutorials"), "/tutorials");
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route(""), "/");
    }

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(strip_suffixes("/reference/cursors#filter"), "/reference/cursors");
        assert_eq!(strip_suffixes("/search?q=x"), "/search");
        assert_eq!(strip_suffixes("/plain"), "/plain");
    }

    #[test]
    fn joins_base_url() {
        assert_eq!(join_base("/", "/tutorials/"), "/tutorials/");
        assert_eq!(join_base("/docs/", "/tutorials/"), "/docs/tutorials/");
        assert_eq!(join_base("/docs/", "/"), "/docs/");
    }
}
