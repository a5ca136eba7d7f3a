/// Normalize a title into a URL-safe token.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and drops leading and trailing separators. May return an empty
/// string.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Pick the first free slug for `title`: the normalized title itself, then
/// `{base}-1`, `{base}-2`, ... `fallback` stands in when the title normalizes
/// to nothing.
pub fn unique_slug(title: &str, fallback: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let base = match slugify(title) {
        s if s.is_empty() => fallback.to_string(),
        s => s,
    };

    if !is_taken(&base) {
        return base;
    }

    (1u64..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}
