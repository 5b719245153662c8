//! Prompt library for the consultation pipeline.
//!
//! Every builder is a pure function from a user message (plus intent and
//! history where relevant) to a [`PromptPair`]. Nothing here touches the
//! network or the store.

pub mod classification;
pub mod generic;
pub mod specialist;

use podscription_types::session::{Category, Message};

/// A system instruction plus the user instruction sent with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the diagnosis prompt for a classified message.
///
/// Networking and storage get their specialist prompts; every other
/// category, including unrecognized ones, gets the generic Pod Doctor prompt.
pub fn diagnosis_prompt(message: &str, category: &Category, history: &[Message]) -> PromptPair {
    match category {
        Category::Networking => specialist::networking_prompt(message, history),
        Category::Storage => specialist::storage_prompt(message, history),
        other => generic::diagnosis_prompt(message, other, history),
    }
}

/// The first `max_chars` characters of `s`, never splitting a code point.
pub(crate) fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
