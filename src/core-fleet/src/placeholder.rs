use base64::{Engine as _, engine::general_purpose::STANDARD};
use quick_xml::escape::escape;

pub const DEFAULT_PLACEHOLDER_TEXT: &str = "No Image Available";

pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Builds a self-contained `data:` URI of a grey 400x300 SVG with the caption centered.
/// Falls back to [`DEFAULT_PLACEHOLDER_TEXT`] when no caption is given.
pub fn generate_placeholder_image(text: Option<&str>) -> String {
    let caption = escape(text.unwrap_or(DEFAULT_PLACEHOLDER_TEXT));
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" viewBox="0 0 400 300"><rect width="100%" height="100%" fill="#e5e7eb"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="Arial, sans-serif" font-size="20" fill="#6b7280">{}</text></svg>"##,
        caption
    );
    format!("{}{}", SVG_DATA_URI_PREFIX, STANDARD.encode(svg))
}
