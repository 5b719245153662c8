//! Generic "Pod Doctor" diagnosis prompt for categories without a specialist.

use podscription_types::session::{Category, Message};

use super::{PromptPair, take_chars};

/// History text longer than this stops accepting entries.
const HISTORY_CHAR_LIMIT: usize = 500;

/// Characters of each history message quoted in the prompt.
const HISTORY_ENTRY_CHARS: usize = 100;

const HISTORY_HEADER: &str = "\n\nPrevious consultation history:\n";

/// Fixed briefing for each known category. Unrecognized categories get none.
pub fn category_context(category: &Category) -> &'static str {
    match category {
        Category::Networking => {
            "Focus on service discovery, ingress configuration, DNS resolution, network policies, and connectivity issues. Common treatments include checking service selectors, endpoints, and network policies."
        }
        Category::Storage => {
            "Focus on persistent volumes, volume claims, storage classes, and mount issues. Common treatments include checking PVC status, storage class availability, and mount permissions."
        }
        Category::PodIssues => {
            "Focus on pod lifecycle, container startup, image pulls, and resource constraints. Common treatments include checking pod events, logs, and resource limits."
        }
        Category::Rbac => {
            "Focus on permissions, service accounts, roles, and security policies. Common treatments include checking RBAC rules, service account permissions, and security contexts."
        }
        Category::Performance => {
            "Focus on resource utilization, scaling, and optimization. Common treatments include adjusting resource requests/limits, HPA configuration, and performance tuning."
        }
        Category::General => {
            "Provide general Kubernetes guidance and best practices. Focus on cluster health, basic troubleshooting, and educational responses."
        }
        Category::Other(_) => "",
    }
}

fn system_prompt(category: &Category) -> String {
    let context = category_context(category);
    format!(
        r#"You are the "Pod Doctor" - a Kubernetes troubleshooting assistant with a medical personality. You diagnose and treat "sick" Kubernetes pods and clusters.

Your specialty: {category}

PERSONALITY:
- Speak like a doctor treating patients
- Use medical metaphors and terminology
- Be professional but friendly
- Provide clear "prescriptions" (solutions)
- Reference "symptoms" (error conditions) and "treatments" (fixes)

RESPONSE FORMAT - Use exactly this structure:
## Diagnosis: [Medical-style diagnosis name]

[Brief explanation of the issue using medical metaphors]

### Prescribed Treatment:
1. **[Step name]**: `[command or action]`
2. **[Step name]**: `[command or action]`
[Continue with numbered steps]

### Follow-up Care:
[Additional guidance or next steps]

*[End with a medical-themed joke or memorable phrase]*

CONTEXT: {context}"#
    )
}

/// Render recent messages as `"{role}: {first 100 chars}"` lines.
///
/// The length check runs before each entry, so the last entry admitted may
/// push the text past the limit.
pub fn history_context(history: &[Message]) -> String {
    if history.is_empty() {
        return String::new();
    }

    let mut text = String::from(HISTORY_HEADER);
    let mut chars = text.chars().count();
    for message in history {
        if chars > HISTORY_CHAR_LIMIT {
            break;
        }
        let entry = format!(
            "{}: {}\n",
            message.role,
            take_chars(&message.content, HISTORY_ENTRY_CHARS)
        );
        chars += entry.chars().count();
        text.push_str(&entry);
    }
    text
}

/// Diagnosis prompt for any category without a specialist.
pub fn diagnosis_prompt(message: &str, category: &Category, history: &[Message]) -> PromptPair {
    PromptPair {
        system: system_prompt(category),
        user: format!("Patient symptoms: {message}{}", history_context(history)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use podscription_types::session::NewMessage;
    use uuid::Uuid;

    fn user(content: &str) -> Message {
        NewMessage::user(content).into_message(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_system_prompt_names_category_and_context() {
        let prompt = diagnosis_prompt("image pull backoff", &Category::PodIssues, &[]);
        assert!(prompt.system.contains("Your specialty: pod-issues"));
        assert!(prompt
            .system
            .contains("CONTEXT: Focus on pod lifecycle, container startup"));
        assert!(prompt.system.contains("### Follow-up Care:"));
        assert_eq!(prompt.user, "Patient symptoms: image pull backoff");
    }

    #[test]
    fn test_unknown_category_has_empty_context() {
        let prompt = diagnosis_prompt("?", &Category::Other("service-mesh".into()), &[]);
        assert!(prompt.system.ends_with("CONTEXT: "));
    }

    #[test]
    fn test_history_entries_are_truncated_to_100_chars() {
        let long = "x".repeat(250);
        let history = vec![user(&long)];
        let context = history_context(&history);
        assert_eq!(
            context,
            format!("\n\nPrevious consultation history:\nuser: {}\n", "x".repeat(100))
        );
    }

    #[test]
    fn test_history_stops_after_500_chars() {
        let history: Vec<Message> = (0..20).map(|i| user(&format!("{i}{}", "y".repeat(99)))).collect();
        let context = history_context(&history);
        let entries = context.lines().filter(|l| l.starts_with("user: ")).count();

        // Header plus five 107-char entries crosses the limit; a sixth is never added.
        assert_eq!(entries, 5);
        assert!(context.chars().count() > HISTORY_CHAR_LIMIT);
    }

    #[test]
    fn test_history_appended_to_user_text() {
        let history = vec![user("pods pending"), user("still pending")];
        let prompt = diagnosis_prompt("help", &Category::General, &history);
        assert_eq!(
            prompt.user,
            "Patient symptoms: help\n\nPrevious consultation history:\nuser: pods pending\nuser: still pending\n"
        );
    }
}
