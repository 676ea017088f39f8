//! Common display helpers

use honeycombio::client::models::Timestamps;

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Creation time as `YYYY-MM-DDTHH:MM:SSZ`, or empty when unknown
pub fn created_at(timestamps: Option<&Timestamps>) -> String {
    timestamps
        .map(|t| t.created_at.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

/// Checkmark for set flags
pub fn check(flag: bool) -> String {
    if flag {
        "\u{2713}".to_string()
    } else {
        String::new()
    }
}
