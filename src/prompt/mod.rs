//! Prompt assembly: system text merge, history layout, image attachment.

use crate::history::StoredMessage;
use crate::types::{Attachment, ContentPart, ModelMessage, Role};

/// Sentinel the menu-analysis prompt instructs the model to lead with when
/// the attached image is not a food menu. The pipeline keys its decline
/// path off this prefix.
pub const NOT_A_MENU_SENTINEL: &str = "NOT_A_MENU";

/// Specialized system prompt used for menu-analysis cycles. Replaces the
/// general system text entirely; the two modes are mutually exclusive.
const MENU_ANALYSIS_PROMPT: &str = "You are a menu reader. The user has attached a photo. \
If the photo is a food menu, list every food item you can read, one item per line, \
with no prices, descriptions, or commentary. \
If the photo is not a food menu, reply with a single line starting with NOT_A_MENU \
followed by a short explanation.";

/// Which system prompt a cycle assembles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    General,
    MenuAnalysis,
}

/// Merge the general and project-level system texts.
///
/// Deterministic rule: the general text comes first; non-empty project text
/// is appended after a blank line. Neither overrides the other.
pub fn merge_system_text(system: &str, project: Option<&str>) -> String {
    match project {
        Some(p) if !p.trim().is_empty() => format!("{system}\n\n{p}"),
        _ => system.to_string(),
    }
}

/// Build the ordered message list: `[system] + history (oldest-first) + [new user]`.
///
/// Pure: identical inputs produce an identical list (timestamps excluded,
/// prompt messages carry none).
pub fn build_prompt(
    mode: PromptMode,
    system_message: &str,
    project_system_message: Option<&str>,
    history: &[StoredMessage],
    new_message: &str,
) -> Vec<ModelMessage> {
    let system_text = match mode {
        PromptMode::General => merge_system_text(system_message, project_system_message),
        PromptMode::MenuAnalysis => MENU_ANALYSIS_PROMPT.to_string(),
    };

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(bare(Role::System, &system_text));
    for entry in history {
        messages.push(bare(entry.role, &entry.content));
    }
    messages.push(bare(Role::User, new_message));
    messages
}

/// Attach an image to the last user entry, converting its content into a
/// {text, image url} composite. Pass-through when there is no attachment.
pub fn attach_image(mut messages: Vec<ModelMessage>, attachment: &Attachment) -> Vec<ModelMessage> {
    let Some(url) = attachment.image_url() else {
        return messages;
    };
    if let Some(last) = messages.iter_mut().rev().find(|m| m.role == Role::User) {
        last.content.push(ContentPart::ImageUrl {
            url: url.to_string(),
        });
    }
    messages
}

fn bare(role: Role, text: &str) -> ModelMessage {
    ModelMessage {
        role,
        content: vec![ContentPart::Text {
            text: text.to_string(),
        }],
        timestamp: None,
    }
}
