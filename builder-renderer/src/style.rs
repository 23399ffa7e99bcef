//! Style bag to CSS conversion.

use builder_core::StyleMap;
use url::Url;

/// Characters that could break out of an inline `style` declaration.
const FORBIDDEN: [char; 6] = [';', '{', '}', '<', '>', '"'];

/// Substrings that make a declaration executable, matched case-insensitively
/// with whitespace removed.
const SCRIPT_MARKERS: [&str; 4] = ["javascript:", "vbscript:", "expression(", "data:text/html"];

/// Schemes allowed in link targets. Relative URLs are always allowed.
const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Schemes allowed for images, video and iframes.
const MEDIA_SCHEMES: [&str; 2] = ["http", "https"];

/// Convert a camelCase property name to kebab-case.
///
/// Names that already contain a dash (custom properties, vendor prefixes)
/// are returned lowercased but otherwise untouched.
#[must_use]
pub fn to_kebab_case(name: &str) -> String {
    if name.contains('-') {
        return name.to_ascii_lowercase();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether a value is safe to place in an inline declaration.
#[must_use]
pub fn is_safe_value(value: &str) -> bool {
    if value.trim().is_empty()
        || value.contains(FORBIDDEN)
        || value.contains('\\')
        || value.chars().any(char::is_control)
    {
        return false;
    }
    let folded: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    !SCRIPT_MARKERS.iter().any(|marker| folded.contains(marker))
}

/// CSS declarations for an element's style bag.
///
/// Unsafe or empty values are dropped with a debug log.
#[must_use]
pub fn css_declarations(styles: &StyleMap) -> Vec<(String, String)> {
    styles
        .iter()
        .filter_map(|(key, value)| {
            if is_safe_value(value) && is_safe_name(key) {
                Some((to_kebab_case(key), value.trim().to_string()))
            } else {
                tracing::debug!(key = %key, value = %value, "Dropped style declaration");
                None
            }
        })
        .collect()
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A CSS `url(...)` for an image source, or `None` if the source could
/// escape the function or uses a scheme other than http(s).
#[must_use]
pub fn css_url(src: &str) -> Option<String> {
    let src = src.trim();
    if src.contains(['(', ')', '\'', '"', '\\']) || !is_safe_value(src) || !is_safe_src(src) {
        return None;
    }
    Some(format!("url('{src}')"))
}

/// Whether `target` is relative or uses one of `allowed`.
///
/// Targets with control characters are refused outright: browsers strip
/// tabs and newlines from URLs, so `java\tscript:` would still run.
fn has_allowed_scheme(target: &str, allowed: &[&str]) -> bool {
    let target = target.trim();
    if target.is_empty() || target.chars().any(char::is_control) {
        return false;
    }
    match Url::parse(target) {
        Ok(url) => allowed.contains(&url.scheme()),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Whether a link target is safe to emit as an `href`.
///
/// Allows relative URLs, fragments and the http, https, mailto and tel
/// schemes.
#[must_use]
pub fn is_safe_href(href: &str) -> bool {
    has_allowed_scheme(href, &LINK_SCHEMES)
}

/// `href` to emit for a link target; unsafe and empty targets become `#`.
#[must_use]
pub fn safe_href(href: &str) -> String {
    if is_safe_href(href) {
        href.trim().to_string()
    } else {
        "#".to_string()
    }
}

/// Whether a media source is relative or http(s).
#[must_use]
pub fn is_safe_src(src: &str) -> bool {
    has_allowed_scheme(src, &MEDIA_SCHEMES)
}

/// Media source to emit, or `None` when it is empty or unsafe.
#[must_use]
pub fn safe_src(src: &str) -> Option<String> {
    if is_safe_src(src) {
        Some(src.trim().to_string())
    } else {
        if !src.trim().is_empty() {
            tracing::debug!(src = %src, "Dropped unsafe media source");
        }
        None
    }
}
