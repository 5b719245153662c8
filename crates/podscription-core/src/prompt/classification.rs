//! Intent classification prompt.

use super::PromptPair;

const CLASSIFICATION_SYSTEM: &str = "You are an expert Kubernetes troubleshooting assistant. Your job is to classify user messages into specific Kubernetes problem categories.

Analyze the user's message and classify it into one of these categories:
- networking: Service discovery, ingress, connectivity, DNS issues
- storage: PVC, PV, volume mounts, disk space, storage classes
- pod-issues: Pod startup, container crashes, image pulls, resource constraints
- rbac: Permissions, service accounts, cluster roles, security
- performance: CPU, memory, scaling, resource optimization
- general: General questions, cluster info, basic troubleshooting

Respond with ONLY this format:
CATEGORY: [category name]
CONFIDENCE: [0.0-1.0]
SYMPTOMS: [comma-separated list of 2-3 key symptoms detected]

Be concise and accurate.";

/// Prompt asking the model to answer in the three-line CATEGORY/CONFIDENCE/SYMPTOMS format.
pub fn classification_prompt(message: &str) -> PromptPair {
    PromptPair {
        system: CLASSIFICATION_SYSTEM.to_string(),
        user: format!("Classify this Kubernetes issue: {message}"),
    }
}
