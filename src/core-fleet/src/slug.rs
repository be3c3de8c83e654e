//! Slug and identifier helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that isn't a word character, whitespace or a hyphen (input is already lowercase).
/// U+FEFF counts as whitespace.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s\x{FEFF}-]").expect("slug pattern is valid"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x{FEFF}_-]+").expect("separator pattern is valid"));

fn is_slug_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Turns free text into a URL-safe slug.
///
/// Absent or empty input yields an empty string. The output only contains
/// `[a-z0-9-]`, never starts or ends with a hyphen and never contains `--`.
///
/// ```
/// # use core_fleet::generate_slug;
/// assert_eq!(generate_slug("  Toyota Corolla 2024! "), "toyota-corolla-2024");
/// assert_eq!(generate_slug(None::<&str>), "");
/// ```
pub fn generate_slug<'a>(text: impl Into<Option<&'a str>>) -> String {
    let text = match text.into() {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    let lowered = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(lowered.trim_matches(is_slug_space), "");
    let collapsed = SEPARATORS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// True iff the text is exactly 24 hexadecimal characters, the shape of a MongoDB ObjectId.
///
/// ```
/// # use core_fleet::is_object_id;
/// assert!(is_object_id("507f1f77bcf86cd799439011"));
/// assert!(!is_object_id("not-an-id"));
/// ```
pub fn is_object_id<'a>(text: impl Into<Option<&'a str>>) -> bool {
    match text.into() {
        Some(t) => t.len() == 24 && t.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
