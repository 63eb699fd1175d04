//! Canonical-text construction for the terminal signal and memory.
//!
//! The canonical text for a valid menu cycle is rebuilt from the candidate
//! list rather than taken from what was streamed: photo links are ephemeral
//! search results and are deliberately kept out of long-term memory.

/// Header streamed before the per-item messages of a menu cycle.
pub fn menu_header(photos_available: bool) -> &'static str {
    if photos_available {
        "Here are the items I found on the menu:\n"
    } else {
        "Here are the items I found on the menu (photo search unavailable):\n"
    }
}

/// Canonical text for a valid menu cycle. Never embeds photo URLs.
pub fn menu_summary(candidates: &[String]) -> String {
    if candidates.is_empty() {
        return "I could not extract any food items from the menu image.".to_string();
    }
    let mut out = String::from("Menu items identified:\n");
    for (idx, name) in candidates.iter().enumerate() {
        out.push_str(&format!("{}. {} (photo search performed)\n", idx + 1, name));
    }
    out
}
