//! Consultation session, message, intent, and prescription types.
//!
//! These types model a troubleshooting conversation: a session owns an
//! append-only list of messages, and assistant messages carry the classified
//! intent plus the structured prescription extracted from the model reply.
//!
//! Field names serialize in camelCase to match the web client and the
//! snapshot file format.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from llm module (it's used in both session and llm contexts).
pub use crate::llm::MessageRole;

/// Confidence assigned when classification fails and the pipeline falls back.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Symptom recorded when classification fails and the pipeline falls back.
pub const FALLBACK_SYMPTOM: &str = "unknown issue";

/// Treatment text attached to every prescription.
pub const TREATMENT_BOILERPLATE: &str =
    "Refer to the detailed diagnosis above for treatment recommendations.";

/// Kubernetes problem category assigned by the intent classifier.
///
/// The model may answer with a category outside the known set; such values
/// are kept verbatim in [`Category::Other`] instead of being rejected.
/// Serializes as the plain category string (`"pod-issues"`, `"rbac"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Networking,
    Storage,
    PodIssues,
    Rbac,
    Performance,
    #[default]
    General,
    Other(String),
}

impl Category {
    /// All categories the prompts know how to brief.
    pub const KNOWN: [Category; 6] = [
        Category::Networking,
        Category::Storage,
        Category::PodIssues,
        Category::Rbac,
        Category::Performance,
        Category::General,
    ];

    /// The wire name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Networking => "networking",
            Category::Storage => "storage",
            Category::PodIssues => "pod-issues",
            Category::Rbac => "rbac",
            Category::Performance => "performance",
            Category::General => "general",
            Category::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "networking" => Category::Networking,
            "storage" => Category::Storage,
            "pod-issues" => Category::PodIssues,
            "rbac" => Category::Rbac,
            "performance" => Category::Performance,
            "general" => Category::General,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// The classified intent of a single user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub category: Category,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f64,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl Intent {
    /// Intent substituted when classification fails.
    pub fn fallback() -> Self {
        Self {
            category: Category::General,
            confidence: FALLBACK_CONFIDENCE,
            symptoms: vec![FALLBACK_SYMPTOM.to_string()],
        }
    }
}

/// Structured remediation extracted from a generated diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub diagnosis: String,
    pub treatment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub follow_up: String,
}

/// A single message within a session.
///
/// `id` and `timestamp` are assigned by the session store at insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Classified intent (assistant messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Structured prescription (assistant messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Prescription>,
}

/// A message draft handed to the store, which assigns its id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: MessageRole,
    pub content: String,
    pub intent: Option<Intent>,
    pub prescription: Option<Prescription>,
}

impl NewMessage {
    /// A user turn carrying only text.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            intent: None,
            prescription: None,
        }
    }

    /// An assistant reply with its intent and prescription attached.
    pub fn assistant(content: impl Into<String>, intent: Intent, prescription: Prescription) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            intent: Some(intent),
            prescription: Some(prescription),
        }
    }

    /// Materialize the draft with a store-assigned id and timestamp.
    pub fn into_message(self, id: Uuid, timestamp: DateTime<Utc>) -> Message {
        Message {
            id,
            role: self.role,
            content: self.content,
            timestamp,
            intent: self.intent,
            prescription: self.prescription,
        }
    }
}

/// A named, ordered conversation thread.
///
/// `messages` is append-only and kept in conversational order.
/// `updated_at` never moves backwards and is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Start an empty session stamped at `now`.
    pub fn new(id: Uuid, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The most recent `count` messages, oldest first.
    pub fn recent_messages(&self, count: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    /// The last message in the session, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
