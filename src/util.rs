//! Utility functions with platform-specific implementations.

/// Get current time as milliseconds since Unix epoch.
///
/// On native platforms, uses `SystemTime::now()`.
/// On WASM, uses `js_sys::Date::now()`.
#[cfg(not(target_arch = "wasm32"))]
pub fn time_now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn time_now_millis() -> u64 {
    // js_sys::Date::now() returns milliseconds as f64
    js_sys::Date::now() as u64
}

/// Derive a download filename from an article title.
///
/// Every character that is not an ASCII letter or digit becomes `_`,
/// and `.epub` is appended.
///
/// # Examples
///
/// ```
/// use web2epub::suggested_filename;
///
/// assert_eq!(suggested_filename("A & B: Part 2"), "A___B__Part_2.epub");
/// ```
pub fn suggested_filename(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    name.push_str(".epub");
    name
}

/// Check whether `name` is usable as an XML element or attribute name.
///
/// This is the ASCII-leaning subset of the XML `Name` production; anything
/// outside ASCII is accepted as a name character since the tokenizer has
/// already lowercased and delimited it.
pub(crate) fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == ':') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

/// Check whether `c` may appear in an XML 1.0 document.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
