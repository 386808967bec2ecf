/// Extracts the in-page anchor identifier from a link `href`.
///
/// Only fragment links count (`"#about"` → `"about"`). A bare `"#"` and links to other
/// documents yield `None`.
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}
