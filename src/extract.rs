/// Locate the JSON object embedded in a SOAP response body.
///
/// Returns the slice from the first `{` through the last `}` in the whole
/// text, or `None` if either is missing or the last `}` does not come after the
/// first `{`. Braces are not balanced: stray braces in the surrounding text
/// widen or truncate the slice.
pub fn extract_json_payload(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    Some(&text[start..=end])
}
