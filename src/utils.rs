use jiff::Timestamp;

/// Format an ISO 8601 timestamp for display. Falls back to the raw string
/// when the server sends something unparseable.
pub fn format_last_updated(iso: &str) -> String {
    match iso.parse::<Timestamp>() {
        Ok(ts) => ts.strftime("%b %d, %Y %H:%M:%S").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Capitalize the first letter and lowercase the rest ("capsule" -> "Capsule").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
