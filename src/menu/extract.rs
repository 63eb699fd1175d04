//! Food-item candidate extraction from free-text model output.
//!
//! Pure, no side effects. Applied line-by-line; candidates come out in
//! source order and duplicates are preserved (repetition in the source text
//! stays visible — the caller caps the list before enrichment anyway).

/// Tokens dropped during cleanup, matched case-insensitively.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "with", "of", "in", "on", "at", "to", "for",
];

/// Cleaned lines rejected outright, matched on the lowercase form.
const REJECTED: &[&str] = &[
    "menu",
    "food",
    "dish",
    "item",
    "price",
    "description",
    "s",
    "es",
];

/// Extract candidate food-item names from accumulated assistant text.
pub fn extract_candidates(text: &str) -> Vec<String> {
    text.lines().filter_map(clean_line).collect()
}

fn clean_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let line = strip_list_marker(line);

    // Keep only the text before the first delimiter: names come first,
    // prices and descriptions after.
    let cut = line
        .find([':', '-', '(', '['])
        .map(|idx| &line[..idx])
        .unwrap_or(line)
        .trim();

    let name = cut
        .split_whitespace()
        .filter(|token| !is_noise(token))
        .collect::<Vec<_>>()
        .join(" ");

    let lower = name.to_lowercase();
    if name.len() > 2 && !REJECTED.contains(&lower.as_str()) {
        Some(name)
    } else {
        None
    }
}

/// Strip a single leading list marker: a bullet (`- `, `• `, `* `) or a
/// numeric ordinal `"<1-10>. "`. Only the first match is stripped.
fn strip_list_marker(line: &str) -> &str {
    for bullet in ["- ", "• ", "* "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest;
        }
    }
    for n in 1..=10 {
        let ordinal = format!("{n}. ");
        if let Some(rest) = line.strip_prefix(&ordinal) {
            return rest;
        }
    }
    line
}

fn is_noise(token: &str) -> bool {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let lower = token.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}
