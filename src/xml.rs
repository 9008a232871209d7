/// Escape the five reserved XML characters so `text` can sit inside an element.
///
/// `&` is replaced first so the entities introduced by later replacements are
/// not escaped again. Empty input comes back unchanged.
pub fn escape_xml(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
